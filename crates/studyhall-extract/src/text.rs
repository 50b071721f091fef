use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());
static MULTI_BLANK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize extracted text: strip trailing whitespace from lines, collapse
/// runs of blank lines down to one, and trim the ends. Page separators
/// (a single blank line) survive.
pub fn normalize_whitespace(raw: &str) -> String {
    let no_trailing = TRAILING_SPACE.replace_all(raw, "\n");
    let collapsed = MULTI_BLANK.replace_all(&no_trailing, "\n\n");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_blank_runs_but_keeps_page_breaks() {
        let input = "page one\n\n\n\n\npage two\n";
        assert_eq!(normalize_whitespace(input), "page one\n\npage two");
    }

    #[test]
    fn strips_trailing_line_whitespace() {
        let input = "line with trail   \nnext\t\n";
        assert_eq!(normalize_whitespace(input), "line with trail\nnext");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_whitespace("  \n \n "), "");
    }
}
