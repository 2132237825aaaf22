use once_cell::sync::Lazy;
use regex::Regex;

use crate::shared::time_format::{clock_with_decis, parse_clock};

use super::transcript_segment::TranscriptSegment;

static LINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(?P<from>[0-9:.]*)\] \[(?P<to>[0-9:.]*)\]:(?P<text>.*)$").unwrap());

/// Canonical transcript line: `"[HH:mm:ss.d] [HH:mm:ss.d]: text"`. This is
/// both the report echo format and the on-disk file format; `parse_line`
/// inverts it bit-exactly.
pub fn render_line(from: std::time::Duration, to: std::time::Duration, text: &str) -> String {
    format!("[{}] [{}]: {}", clock_with_decis(from), clock_with_decis(to), text)
}

/// Reads one stored transcript line back into a segment.
///
/// Returns `None` for blank lines, lines not matching the pattern, and lines
/// whose text begins with `[` — those are treated as non-speech/comment
/// lines and skipped on reload. The single leading space `render_line` emits
/// after `]:` is stripped so a render/parse round trip reproduces the line.
pub fn parse_line(line: &str) -> Option<TranscriptSegment> {
    if line.trim().is_empty() {
        return None;
    }

    let caps = LINE_PATTERN.captures(line)?;
    let from = parse_clock(caps.name("from")?.as_str())?;
    let to = parse_clock(caps.name("to")?.as_str())?;

    let raw_text = caps.name("text")?.as_str();
    if raw_text.trim_start().starts_with('[') {
        return None;
    }
    let text = raw_text.strip_prefix(' ').unwrap_or(raw_text);

    Some(TranscriptSegment {
        start: from,
        end: to,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use rstest::rstest;

    #[test]
    fn renders_canonical_line() {
        let line = render_line(
            Duration::from_millis(1_500),
            Duration::from_millis(3_200),
            "hello there",
        );
        assert_eq!(line, "[00:00:01.5] [00:00:03.2]: hello there");
    }

    #[test]
    fn parse_inverts_render_bit_exactly() {
        let segment = TranscriptSegment {
            start: Duration::from_millis(61_400),
            end: Duration::from_millis(65_000),
            text: "some spoken words".to_string(),
        };
        let line = render_line(segment.start, segment.end, &segment.text);
        let parsed = parse_line(&line).unwrap();
        assert_eq!(parsed, segment);
        assert_eq!(render_line(parsed.start, parsed.end, &parsed.text), line);
    }

    #[test]
    fn parses_line_without_leading_space() {
        let parsed = parse_line("[00:00:00.0] [00:00:01.0]:tight text").unwrap();
        assert_eq!(parsed.text, "tight text");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("free-form note")]
    #[case("[not a timestamp] [00:00:01.0]: text")]
    #[case("[00:00:00.0] [00:00:01.0]: [MUSIC]")]
    #[case("[00:00:00.0] [00:00:01.0]:  [inaudible]")]
    fn skips_blank_malformed_and_non_speech_lines(#[case] line: &str) {
        assert_eq!(parse_line(line), None);
    }

    #[test]
    fn keeps_interior_brackets() {
        let parsed = parse_line("[00:00:00.0] [00:00:01.0]: see [1] for details").unwrap();
        assert_eq!(parsed.text, "see [1] for details");
    }
}
