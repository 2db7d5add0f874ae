//! String similarity scorers on a 0-100 scale.
//!
//! The default scorer is the partial ratio: how well the shorter string
//! matches as a fragment somewhere inside the longer one. Scores are built on
//! the indel-normalized similarity `100 * 2 * LCS / (len_a + len_b)`, computed
//! over Unicode scalar values.

use std::collections::HashSet;

/// A similarity function between a query (keyword) and a choice (line).
///
/// Scores must lie in `0.0..=100.0`. Any `Fn(&str, &str) -> f64` closure is a
/// scorer, which keeps the matcher pluggable in tests.
pub trait SimilarityScorer {
    fn score(&self, query: &str, choice: &str) -> f64;
}

impl<F> SimilarityScorer for F
where
    F: Fn(&str, &str) -> f64,
{
    fn score(&self, query: &str, choice: &str) -> f64 {
        self(query, choice)
    }
}

/// Substring-tolerant scorer; see [`partial_ratio`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl SimilarityScorer for PartialRatio {
    fn score(&self, query: &str, choice: &str) -> f64 {
        partial_ratio(query, choice)
    }
}

/// Indel-normalized similarity of two whole strings.
///
/// Two empty strings are identical (100).
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of the shorter string against any alignment window of the
/// longer one.
///
/// Windows are every prefix of the longer string shorter than the needle,
/// every full needle-length window, and every suffix shorter than the needle.
/// A window is only scored when its newly entered boundary character occurs in
/// the needle. Returns 100 as soon as the needle appears verbatim, and 0 when
/// either string is empty.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a.len() == b.len() {
        return partial_ratio_short_needle(&a, &b).max(partial_ratio_short_needle(&b, &a));
    }

    if a.len() < b.len() {
        partial_ratio_short_needle(&a, &b)
    } else {
        partial_ratio_short_needle(&b, &a)
    }
}

fn partial_ratio_short_needle(needle: &[char], haystack: &[char]) -> f64 {
    let len1 = needle.len();
    let len2 = haystack.len();
    let needle_chars: HashSet<char> = needle.iter().copied().collect();
    let mut best = 0.0_f64;

    // Prefixes shorter than the needle.
    for end in 1..len1 {
        if !needle_chars.contains(&haystack[end - 1]) {
            continue;
        }
        let score = ratio_chars(needle, &haystack[..end]);
        if score > best {
            best = score;
            if best >= 100.0 {
                return best;
            }
        }
    }

    // Full-length windows.
    for start in 0..(len2 - len1) {
        if !needle_chars.contains(&haystack[start + len1 - 1]) {
            continue;
        }
        let score = ratio_chars(needle, &haystack[start..start + len1]);
        if score > best {
            best = score;
            if best >= 100.0 {
                return best;
            }
        }
    }

    // Suffixes, starting with the last full-length window.
    for start in (len2 - len1)..len2 {
        if !needle_chars.contains(&haystack[start]) {
            continue;
        }
        let score = ratio_chars(needle, &haystack[start..]);
        if score > best {
            best = score;
            if best >= 100.0 {
                return best;
            }
        }
    }

    best
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let lcs = lcs_len(a, b);
    100.0 * (2 * lcs) as f64 / total as f64
}

/// Longest common subsequence length, single-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_lcs_len() {
        let chars = |s: &str| s.chars().collect::<Vec<_>>();
        assert_eq!(lcs_len(&chars("abcde"), &chars("ace")), 3);
        assert_eq!(lcs_len(&chars("abc"), &chars("xyz")), 0);
        assert_eq!(lcs_len(&chars(""), &chars("abc")), 0);
        assert_eq!(lcs_len(&chars("vendor"), &chars("vendors")), 6);
    }

    #[test]
    fn test_ratio() {
        assert!(approx(ratio("", ""), 100.0));
        assert!(approx(ratio("abc", "abc"), 100.0));
        assert!(approx(ratio("abc", "xyz"), 0.0));
        // LCS("kitten", "sitting") = 4 ("ittn"), 2*4/13
        assert!(approx(ratio("kitten", "sitting"), 800.0 / 13.0));
    }

    #[test]
    fn test_partial_ratio_verbatim_containment() {
        assert!(approx(partial_ratio("issued by", "issued by  acme corporation"), 100.0));
        assert!(approx(partial_ratio("vendor", "our vendor is acme"), 100.0));
        // Argument order does not matter.
        assert!(approx(partial_ratio("our vendor is acme", "vendor"), 100.0));
    }

    #[test]
    fn test_partial_ratio_empty() {
        assert!(approx(partial_ratio("", "abc"), 0.0));
        assert!(approx(partial_ratio("abc", ""), 0.0));
        assert!(approx(partial_ratio("", ""), 0.0));
    }

    #[test]
    fn test_partial_ratio_no_overlap() {
        assert!(approx(partial_ratio("vendor", "12345 67890"), 0.0));
    }

    #[test]
    fn test_partial_ratio_partial_overlap() {
        // The prefix window "supplie" beats the full window "supplies":
        // LCS 7 over 8+7 against LCS 7 over 8+8.
        let score = partial_ratio("supplier", "supplies ltd");
        assert!(approx(score, 1400.0 / 15.0), "got {score}");
    }

    #[test]
    fn test_partial_ratio_prefix_window() {
        // Needle longer than the overlap at the start of the haystack.
        let score = partial_ratio("company", "pany holdings");
        assert!(score > 50.0, "got {score}");
        assert!(score < 100.0, "got {score}");
    }

    #[test]
    fn test_partial_ratio_equal_length_is_symmetric() {
        let forward = partial_ratio("vendor", "render");
        let backward = partial_ratio("render", "vendor");
        assert!(approx(forward, backward));
    }

    #[test]
    fn test_closure_scorer() {
        let constant = |_: &str, _: &str| 42.0;
        assert!(approx(constant.score("a", "b"), 42.0));
        assert!(approx(PartialRatio.score("tax", "tax 10"), 100.0));
    }
}
