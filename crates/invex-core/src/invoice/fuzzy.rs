//! Best-line fuzzy matching for fields without a reliable anchor token.

use tracing::trace;

use super::normalize::{non_empty_lines, normalize};
use super::similarity::{PartialRatio, SimilarityScorer};

/// Default acceptance threshold on the 0-100 similarity scale.
pub const DEFAULT_THRESHOLD: f64 = 50.0;

/// Finds the normalized line most similar to any of a set of keywords.
#[derive(Debug, Clone)]
pub struct FuzzyLineMatcher<S = PartialRatio> {
    scorer: S,
    threshold: f64,
}

impl FuzzyLineMatcher<PartialRatio> {
    /// Create a matcher with the partial-ratio scorer and the default threshold.
    pub fn new() -> Self {
        Self {
            scorer: PartialRatio,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Default for FuzzyLineMatcher<PartialRatio> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SimilarityScorer> FuzzyLineMatcher<S> {
    /// Create a matcher with a custom scorer and the default threshold.
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            scorer,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Set the minimum score (inclusive) a line needs to be returned.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Return the best-scoring normalized line across all keywords.
    ///
    /// Per keyword the first line with the maximum score is its candidate.
    /// Across keywords the best candidate is only replaced by a strictly
    /// greater score, so exact ties go to the earlier keyword. A score of 0
    /// never qualifies. Empty text or an empty keyword set yields `None`.
    pub fn find<K: AsRef<str>>(&self, text: &str, keywords: &[K]) -> Option<String> {
        let normalized = normalize(text);
        let lines = non_empty_lines(&normalized);
        if lines.is_empty() {
            return None;
        }

        let mut best: Option<(&str, f64)> = None;
        for keyword in keywords {
            let keyword = keyword.as_ref();
            let Some((line, score)) = self.best_line(keyword, &lines) else {
                continue;
            };
            trace!("keyword {:?} best line {:?} score {:.2}", keyword, line, score);

            let best_score = best.map(|(_, s)| s).unwrap_or(0.0);
            if score > best_score {
                best = Some((line, score));
            }
        }

        match best {
            Some((line, score)) if score >= self.threshold => Some(line.to_string()),
            _ => None,
        }
    }

    fn best_line<'a>(&self, keyword: &str, lines: &[&'a str]) -> Option<(&'a str, f64)> {
        let mut best: Option<(&'a str, f64)> = None;
        for &line in lines {
            let score = self.scorer.score(keyword, line);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((line, score));
            }
        }
        best
    }
}

/// Find the normalized line of `text` best matching any keyword, if its
/// partial-ratio score is at least `threshold`.
pub fn fuzzy_extract<K: AsRef<str>>(text: &str, keywords: &[K], threshold: f64) -> Option<String> {
    FuzzyLineMatcher::new()
        .with_threshold(threshold)
        .find(text, keywords)
}
