/// Accept/reject rule for candidate windows: either an absolute edit-distance
/// cap or a minimum similarity percentage.
///
/// Percent mode wins whenever `min_similarity_percent` is in (0, 100]; a
/// configured 0 is indistinguishable from "not set" and leaves distance mode
/// active. Existing configurations rely on that precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPolicy {
    pub max_distance: usize,
    pub min_similarity_percent: u32,
}

impl MatchPolicy {
    pub fn percent_mode(&self) -> bool {
        self.min_similarity_percent > 0 && self.min_similarity_percent <= 100
    }
}

/// Stateful comparator bound to one subject string at a time.
///
/// Bind with `set_subject`, then query any number of candidates; the
/// comparer holds no other state, so rebinding is only needed when the
/// subject changes. `is_similar_to` and `is_not_similar_to` are exact
/// logical negations for every candidate under the same policy.
pub trait PhraseComparer: Send {
    fn set_subject(&mut self, subject: &str);
    fn similarity_percent(&self, candidate: &str) -> u32;
    fn is_similar_to(&self, candidate: &str) -> bool;
    fn is_not_similar_to(&self, candidate: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(80, true)]
    #[case(100, true)]
    #[case(101, false)]
    #[case(250, false)]
    fn percent_mode_is_active_only_inside_unit_range(#[case] percent: u32, #[case] active: bool) {
        let policy = MatchPolicy {
            max_distance: 2,
            min_similarity_percent: percent,
        };
        assert_eq!(policy.percent_mode(), active);
    }
}
