use crate::Layout;

/// Default column budget for shortened values.
pub const TRUNCATE_WIDTH: usize = 49;

impl Layout<'_> {
    /// Cut `text` down to at most `max_width` columns.
    ///
    /// Text that already fits is returned as is. Otherwise the longest prefix
    /// that fits is returned; no ellipsis is added.
    pub fn truncate<'t>(&self, text: &'t str, max_width: usize) -> &'t str {
        if self.width(text) <= max_width {
            return text;
        }

        let mut used = 0;
        for (i, c) in text.char_indices() {
            let w = self.char_width(c);
            if used + w > max_width {
                return &text[..i];
            }
            used += w;
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_unchanged() {
        let layout = Layout::uniform();
        assert_eq!(layout.truncate("Regular", 7), "Regular");
        assert_eq!(layout.truncate("", 0), "");
    }

    #[test]
    fn test_cuts_prefix() {
        let layout = Layout::uniform();
        let text = "Copyright 2024 The Example Project Authors. All rights reserved.";
        let cut = layout.truncate(text, TRUNCATE_WIDTH);
        assert_eq!(cut.chars().count(), TRUNCATE_WIDTH);
        assert!(text.starts_with(cut));
    }

    #[test]
    fn test_uniform_counts_wide_as_one() {
        assert_eq!(Layout::uniform().truncate("日本語", 2), "日本");
    }

    #[cfg(feature = "unicode-width")]
    #[test]
    fn test_wide_char_not_split() {
        let layout = Layout::detect();
        // 日本 is 4 columns; 語 would make it 6
        assert_eq!(layout.truncate("日本語", 5), "日本");
        assert_eq!(layout.truncate("a日本", 2), "a");
    }

    #[cfg(feature = "unicode-width")]
    #[test]
    fn test_zero_width_kept() {
        let layout = Layout::detect();
        assert_eq!(layout.truncate("e\u{301}xyz", 2), "e\u{301}x");
    }
}
