//! Per-character display width strategies.

/// Measures how many terminal columns text occupies.
pub trait DisplayWidth: Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Columns occupied by `c`. Zero-width and control characters yield 0.
    fn char_width(&self, c: char) -> usize;

    /// Sum of the widths of every character in `text`.
    fn width(&self, text: &str) -> usize {
        text.chars().map(|c| self.char_width(c)).sum()
    }
}

/// East Asian Width aware lookup backed by the `unicode-width` tables.
#[cfg(feature = "unicode-width")]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWidth;

#[cfg(feature = "unicode-width")]
impl DisplayWidth for UnicodeWidth {
    fn name(&self) -> &'static str {
        "unicode"
    }

    fn char_width(&self, c: char) -> usize {
        unicode_width::UnicodeWidthChar::width(c).unwrap_or(0)
    }
}

/// One column per character.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformWidth;

impl DisplayWidth for UniformWidth {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn char_width(&self, _c: char) -> usize {
        1
    }
}

/// Resolve the width strategy available in this build.
///
/// Returns [`UnicodeWidth`] when the `unicode-width` feature is enabled and
/// [`UniformWidth`] otherwise.
pub fn detect() -> &'static dyn DisplayWidth {
    #[cfg(feature = "unicode-width")]
    {
        &UnicodeWidth
    }
    #[cfg(not(feature = "unicode-width"))]
    {
        &UniformWidth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_counts_chars() {
        assert_eq!(UniformWidth.width("abc"), 3);
        assert_eq!(UniformWidth.width("日本"), 2);
        assert_eq!(UniformWidth.width(""), 0);
    }

    #[cfg(feature = "unicode-width")]
    #[test]
    fn test_unicode_wide_chars() {
        assert_eq!(UnicodeWidth.width("abc"), 3);
        assert_eq!(UnicodeWidth.width("日本"), 4);
        assert_eq!(UnicodeWidth.width("ヒラギノ角ゴ"), 12);
    }

    #[cfg(feature = "unicode-width")]
    #[test]
    fn test_unicode_zero_width() {
        // combining acute accent
        assert_eq!(UnicodeWidth.width("e\u{301}"), 1);
        // zero width joiner
        assert_eq!(UnicodeWidth.width("a\u{200d}b"), 2);
    }

    #[cfg(feature = "unicode-width")]
    #[test]
    fn test_detect_prefers_lookup() {
        assert_eq!(detect().name(), "unicode");
    }
}
