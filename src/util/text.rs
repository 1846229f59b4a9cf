use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended when text is cut off.
const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncates a string to fit within a maximum display width.
///
/// Unicode-aware: CJK characters and emoji count as two columns, combining
/// marks as zero. Returns `Cow::Borrowed` when the string already fits.
/// For widths of three columns or fewer there is no room for "char +
/// ellipsis", so as many characters as fit are returned without one.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }
    if UnicodeWidthStr::width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let budget = max_width.saturating_sub(ELLIPSIS_WIDTH);
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }

    if max_width > ELLIPSIS_WIDTH {
        out.push_str(ELLIPSIS);
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_returns_borrowed() {
        let result = truncate_to_width("Short", 10);
        assert_eq!(result, "Short");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        assert_eq!(truncate_to_width("A long article title", 10), "A long ...");
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(truncate_to_width("anything", 0), "");
    }

    #[test]
    fn test_narrow_width_no_ellipsis() {
        assert_eq!(truncate_to_width("abcdef", 2), "ab");
    }

    #[test]
    fn test_cjk_counts_double_width() {
        // Each CJK char is 2 columns; "日本" = 4 columns + "..." = 7.
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本...");
    }
}
