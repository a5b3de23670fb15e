// src/snippet/lines.rs
// =============================================================================
// Cuts a line range out of a decoded file.
//
// Lines are split on '\n' only, so a '\r' from CRLF files stays at the end of
// its line and the text round-trips exactly when the whole file is selected.
// =============================================================================

use super::request::LineRange;

// Selects a 1-based, inclusive line range.
//
// Parameters:
//   text: the decoded file
//   range: start and optional end (None = to the last line)
//
// Returns: lines start..=end joined with '\n'. An end past the last line
// stops at the last line; a start past it yields an empty string. The full
// range returns `text` unchanged.
pub fn select_lines(text: &str, range: LineRange) -> String {
    if range.is_full() {
        return text.to_string();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let start = range.start.saturating_sub(1).min(lines.len());
    let end = range
        .end
        .map_or(lines.len(), |end| end.min(lines.len()))
        .max(start);

    lines[start..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_lines() -> String {
        (1..=10).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_middle_range() {
        let text = ten_lines();
        assert_eq!(
            select_lines(&text, LineRange::new(3, Some(5))),
            "line 3\nline 4\nline 5"
        );
    }

    #[test]
    fn test_full_range_is_unchanged() {
        let text = "fn main() {\r\n}\n\ntrailing\n";
        assert_eq!(select_lines(text, LineRange::full()), text);
    }

    #[test]
    fn test_open_end_runs_to_last_line() {
        let text = ten_lines();
        assert_eq!(select_lines(&text, LineRange::new(9, None)), "line 9\nline 10");
    }

    #[test]
    fn test_end_past_last_line_is_clamped() {
        let text = ten_lines();
        assert_eq!(
            select_lines(&text, LineRange::new(8, Some(1_000))),
            "line 8\nline 9\nline 10"
        );
    }

    #[test]
    fn test_start_past_last_line_is_empty() {
        let text = ten_lines();
        assert_eq!(select_lines(&text, LineRange::new(11, Some(20))), "");
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let text = ten_lines();
        assert_eq!(select_lines(&text, LineRange::new(5, Some(3))), "");
    }

    #[test]
    fn test_single_line() {
        let text = ten_lines();
        assert_eq!(select_lines(&text, LineRange::new(10, Some(10))), "line 10");
    }

    #[test]
    fn test_matches_zero_indexed_slice() {
        let text = ten_lines();
        let lines: Vec<&str> = text.split('\n').collect();
        for start in 1..=10 {
            for end in start..=10 {
                let expected = lines[start - 1..end].join("\n");
                assert_eq!(select_lines(&text, LineRange::new(start, Some(end))), expected);
            }
        }
    }
}
