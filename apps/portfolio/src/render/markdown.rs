//! Narrow markdown → HTML transform for generated text.
//!
//! Fixed rule set, applied per line after HTML-escaping the input:
//! - `**text**` becomes `<strong>text</strong>` (non-greedy, never spans lines)
//! - a line starting with `* ` or `- ` becomes `<li>`; consecutive items are
//!   wrapped in one `<ul>`
//! - every other line break becomes `<br />`
//!
//! Not supported: nested formatting, single-star emphasis, headings, links,
//! code spans, and backslash escapes. Those characters pass through literally.

use std::sync::OnceLock;

use regex::Regex;

use super::escape_html;

fn bold_pattern() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"))
}

fn list_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
        .map(str::trim)
}

fn inline(text: &str) -> String {
    bold_pattern()
        .replace_all(text, "<strong>$1</strong>")
        .into_owned()
}

/// Converts generated text into display markup. Output is safe to embed in HTML.
pub fn to_markup(text: &str) -> String {
    let escaped = escape_html(text.trim_end());
    let mut out = String::with_capacity(escaped.len() + 32);
    let mut in_list = false;
    let mut first_line = true;

    for line in escaped.lines() {
        match list_item(line) {
            Some(item) => {
                if !in_list {
                    out.push_str("<ul>");
                    in_list = true;
                }
                out.push_str("<li>");
                out.push_str(&inline(item));
                out.push_str("</li>");
            }
            None => {
                if in_list {
                    out.push_str("</ul>");
                    in_list = false;
                } else if !first_line {
                    out.push_str("<br />");
                }
                out.push_str(&inline(line));
            }
        }
        first_line = false;
    }

    if in_list {
        out.push_str("</ul>");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_spans_become_strong() {
        assert_eq!(
            to_markup("Learn **MLOps** and **Rust**"),
            "Learn <strong>MLOps</strong> and <strong>Rust</strong>"
        );
    }

    #[test]
    fn test_newlines_become_line_breaks() {
        assert_eq!(to_markup("one\ntwo\n\nthree"), "one<br />two<br /><br />three");
    }

    #[test]
    fn test_consecutive_list_items_share_one_list() {
        let text = "**Technical Breakdown**\n* Use a CNN\n* Add **augmentation**\nDone.";
        assert_eq!(
            to_markup(text),
            "<strong>Technical Breakdown</strong>\
             <ul><li>Use a CNN</li><li>Add <strong>augmentation</strong></li></ul>\
             Done."
        );
    }

    #[test]
    fn test_dash_and_indented_markers_are_list_items() {
        assert_eq!(
            to_markup("  - first\n- second"),
            "<ul><li>first</li><li>second</li></ul>"
        );
    }

    #[test]
    fn test_html_in_generated_text_is_escaped() {
        assert_eq!(
            to_markup("<script>alert('x')</script> & **bold**"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; <strong>bold</strong>"
        );
    }

    #[test]
    fn test_unsupported_syntax_passes_through() {
        assert_eq!(to_markup("*maybe* ### heading"), "*maybe* ### heading");
        assert_eq!(to_markup("**unclosed"), "**unclosed");
    }

    #[test]
    fn test_bold_does_not_span_lines() {
        assert_eq!(to_markup("**a\nb**"), "**a<br />b**");
    }

    #[test]
    fn test_trailing_newlines_are_dropped() {
        assert_eq!(to_markup("done\n\n"), "done");
        assert_eq!(to_markup(""), "");
    }
}
