//! Canonical text form used by the fuzzy line matcher.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // The information separators \x1c-\x1f count as whitespace.
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9\s\x1c-\x1f]").unwrap();
}

/// Lower-case `text` and replace every character that is not `a-z`, `0-9` or
/// whitespace with a single space.
///
/// Only the fuzzy matcher sees this form; the regex extractors need the
/// original punctuation.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_ALNUM.replace_all(&lowered, " ").into_owned()
}

/// Split text into trimmed, non-empty lines.
///
/// Splits on line breaks only: `\n`, `\r`, vertical tab, form feed, the file,
/// group and record separators, NEL and the Unicode line/paragraph separators.
pub fn non_empty_lines(text: &str) -> Vec<&str> {
    text.split(is_line_break)
        .map(|line| line.trim_matches(is_blank))
        .filter(|line| !line.is_empty())
        .collect()
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{000b}'
            | '\u{000c}'
            | '\u{001c}'..='\u{001e}'
            | '\u{0085}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{001f}'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("Issued by: ACME, Inc."), "issued by  acme  inc ");
        assert_eq!(normalize("Total: $1,234.56"), "total   1 234 56");
    }

    #[test]
    fn test_normalize_empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!?.,"), "    ");
    }

    #[test]
    fn test_normalize_non_ascii_letters() {
        assert_eq!(normalize("Facture numéro"), "facture num ro");
        assert_eq!(normalize("Ωmega"), " mega");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "Invoice # 12345\nDate: 01/02/2024",
            "Facture numéro: 987 · TVA 20%",
            "ÄÖÜ ß İstanbul \u{2028} tab\there",
            "\u{0000}\u{ffff} binary-ish \u{1f600}",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_information_separators() {
        assert_eq!(normalize("Vendor\x1cAcme\x1fLtd"), "vendor\x1cacme\x1fltd");
        assert_eq!(
            non_empty_lines("vendor\x1cacme\x1dltd\x1e\x1f inc \x1f"),
            vec!["vendor", "acme", "ltd", "inc"]
        );
    }

    #[test]
    fn test_normalize_keeps_line_breaks() {
        assert_eq!(normalize("A:\nB!"), "a \nb ");
    }

    #[test]
    fn test_non_empty_lines() {
        let text = "  first  \r\n\r\n second\u{2028}third\n\n   \n";
        assert_eq!(non_empty_lines(text), vec!["first", "second", "third"]);
        assert!(non_empty_lines("").is_empty());
        assert!(non_empty_lines(" \n \t \n").is_empty());
    }
}
