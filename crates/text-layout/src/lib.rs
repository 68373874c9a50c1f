//! Display-width-aware text layout for terminal output.
//!
//! Every measurement goes through a [`DisplayWidth`] strategy. The strategy is
//! picked once (see [`detect`]) and carried by a [`Layout`], which provides
//! [`Layout::truncate`] and [`Layout::wrap`].
//!
//! ```
//! use fontinfo_text_layout::{Layout, WrapOptions};
//!
//! let layout = Layout::detect();
//! assert_eq!(layout.truncate("Regular", 3), "Reg");
//! assert_eq!(layout.wrap("short", WrapOptions::DEFAULT), "short");
//! ```

mod truncate;
mod width;
mod wrap;

use std::fmt;

pub use truncate::TRUNCATE_WIDTH;
#[cfg(feature = "unicode-width")]
pub use width::UnicodeWidth;
pub use width::{DisplayWidth, UniformWidth, detect};
pub use wrap::WrapOptions;

/// Text layout operations bound to a single width strategy.
#[derive(Clone, Copy)]
pub struct Layout<'a> {
    measure: &'a dyn DisplayWidth,
}

impl<'a> Layout<'a> {
    pub fn new(measure: &'a dyn DisplayWidth) -> Self {
        Self { measure }
    }

    /// Display width of `text` in terminal columns.
    pub fn width(&self, text: &str) -> usize {
        self.measure.width(text)
    }

    fn char_width(&self, c: char) -> usize {
        self.measure.char_width(c)
    }
}

impl Layout<'static> {
    /// Layout using the strategy resolved by [`detect`].
    pub fn detect() -> Self {
        Self::new(detect())
    }

    /// Layout counting one column per character.
    pub fn uniform() -> Self {
        Self::new(&UniformWidth)
    }
}

impl Default for Layout<'static> {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Debug for Layout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout").field("measure", &self.measure.name()).finish()
    }
}
