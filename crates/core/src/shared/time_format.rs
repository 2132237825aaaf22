use std::time::Duration;

/// "HH:mm:ss" rendering of an offset into the recording, used in report
/// detail lines.
pub fn clock(offset: Duration) -> String {
    let total = offset.as_secs();
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// "HH:mm:ss.d" with a single deci-second digit, used in transcript lines.
pub fn clock_with_decis(offset: Duration) -> String {
    format!("{}.{}", clock(offset), offset.subsec_millis() / 100)
}

/// Parses "HH:mm:ss" with an optional fraction of up to three digits.
/// Accepts everything [`clock_with_decis`] emits.
pub fn parse_clock(text: &str) -> Option<Duration> {
    let (hms, fraction) = match text.split_once('.') {
        Some((hms, fraction)) => (hms, Some(fraction)),
        None => (text, None),
    };

    let mut parts = hms.split(':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds: u64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
        return None;
    }

    let mut millis: u64 = 0;
    if let Some(fraction) = fraction {
        if fraction.is_empty()
            || fraction.len() > 3
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let value: u64 = fraction.parse().ok()?;
        millis = value * 10u64.pow(3 - fraction.len() as u32);
    }

    Some(Duration::from_secs(hours * 3600 + minutes * 60 + seconds) + Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "00:00:00")]
    #[case(59, "00:00:59")]
    #[case(60, "00:01:00")]
    #[case(3661, "01:01:01")]
    #[case(36_000, "10:00:00")]
    fn clock_renders_zero_padded(#[case] secs: u64, #[case] expected: &str) {
        assert_eq!(clock(Duration::from_secs(secs)), expected);
    }

    #[test]
    fn clock_with_decis_truncates_to_one_digit() {
        assert_eq!(clock_with_decis(Duration::from_millis(1_234)), "00:00:01.2");
        assert_eq!(clock_with_decis(Duration::from_millis(999)), "00:00:00.9");
        assert_eq!(clock_with_decis(Duration::from_secs(2)), "00:00:02.0");
    }

    #[rstest]
    #[case("00:00:00", 0)]
    #[case("00:01:30", 90_000)]
    #[case("01:00:00.5", 3_600_500)]
    #[case("00:00:01.2", 1_200)]
    #[case("00:00:01.25", 1_250)]
    #[case("00:00:01.250", 1_250)]
    fn parse_clock_accepts_rendered_forms(#[case] input: &str, #[case] expected_ms: u64) {
        assert_eq!(parse_clock(input), Some(Duration::from_millis(expected_ms)));
    }

    #[rstest]
    #[case("")]
    #[case("1:2")]
    #[case("00:61:00")]
    #[case("00:00:61")]
    #[case("00:00:00.1234")]
    #[case("00:00:00.")]
    #[case("aa:bb:cc")]
    #[case("00:00:00:00")]
    fn parse_clock_rejects_malformed_input(#[case] input: &str) {
        assert_eq!(parse_clock(input), None);
    }

    #[rstest]
    #[case(Duration::from_millis(0))]
    #[case(Duration::from_millis(7_800))]
    #[case(Duration::from_millis(3_723_400))]
    fn parse_inverts_render(#[case] offset: Duration) {
        assert_eq!(parse_clock(&clock_with_decis(offset)), Some(offset));
    }
}
