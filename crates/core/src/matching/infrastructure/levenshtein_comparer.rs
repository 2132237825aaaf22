use strsim::levenshtein;

use crate::matching::domain::phrase_comparer::{MatchPolicy, PhraseComparer};

/// Edit-distance comparer with the dual threshold policy.
///
/// The similarity percentage collapses to 0 once the distance reaches the
/// subject length (no similarity salvageable), and floors on integer
/// division so near-misses round down.
pub struct LevenshteinComparer {
    policy: MatchPolicy,
    percent_mode: bool,
    subject: String,
    subject_len: usize,
}

impl LevenshteinComparer {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
            percent_mode: policy.percent_mode(),
            subject: String::new(),
            subject_len: 0,
        }
    }

    fn distance(&self, candidate: &str) -> usize {
        levenshtein(&self.subject, candidate)
    }
}

impl PhraseComparer for LevenshteinComparer {
    fn set_subject(&mut self, subject: &str) {
        self.subject = subject.to_string();
        self.subject_len = subject.chars().count();
    }

    fn similarity_percent(&self, candidate: &str) -> u32 {
        let d = self.distance(candidate);
        if d >= self.subject_len {
            return 0;
        }
        if d == 0 {
            return 100;
        }
        (100 * (self.subject_len - d) / self.subject_len) as u32
    }

    fn is_similar_to(&self, candidate: &str) -> bool {
        if self.percent_mode {
            self.similarity_percent(candidate) >= self.policy.min_similarity_percent
        } else {
            self.distance(candidate) <= self.policy.max_distance
        }
    }

    fn is_not_similar_to(&self, candidate: &str) -> bool {
        if self.percent_mode {
            self.similarity_percent(candidate) < self.policy.min_similarity_percent
        } else {
            self.distance(candidate) > self.policy.max_distance
        }
    }
}
