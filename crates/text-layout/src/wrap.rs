use std::borrow::Cow;

use crate::Layout;

/// Line budget and hanging indent for [`Layout::wrap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapOptions {
    /// Maximum columns per line, indent excluded.
    pub max_width: usize,
    /// Spaces prepended to every produced line.
    pub indent_width: usize,
}

impl WrapOptions {
    /// 74 columns with a 23 column hanging indent.
    pub const DEFAULT: Self = Self { max_width: 74, indent_width: 23 };

    pub const fn new(max_width: usize, indent_width: usize) -> Self {
        Self { max_width, indent_width }
    }
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Layout<'_> {
    /// Wrap `text` into lines of at most `options.max_width` columns.
    ///
    /// Text that already fits is returned untouched. Otherwise each explicit
    /// line is wrapped on its own, every produced line gets the indent, and
    /// the result is trimmed, so the first line starts flush and the caller
    /// is expected to print a label column in front of it.
    ///
    /// Breaks happen at the last space in the right half of the line. A word
    /// with no space to break at is emitted whole, even when it overflows.
    pub fn wrap<'t>(&self, text: &'t str, options: WrapOptions) -> Cow<'t, str> {
        if self.width(text) <= options.max_width {
            return Cow::Borrowed(text);
        }

        let indent = " ".repeat(options.indent_width);
        let wrapped = split_lines(text)
            .into_iter()
            .map(|line| self.wrap_line(line, options.max_width, &indent))
            .collect::<Vec<_>>()
            .join("\n");

        Cow::Owned(wrapped.trim().to_owned())
    }

    fn wrap_line(&self, line: &str, max_width: usize, indent: &str) -> String {
        let min_break = max_width / 2;
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0;

        for c in line.chars() {
            let w = self.char_width(c);
            if current_width + w <= max_width {
                if current.is_empty() && c == ' ' {
                    continue;
                }
                current.push(c);
                current_width += w;
            } else if c == ' ' {
                lines.push(format!("{indent}{current}"));
                current.clear();
                current_width = 0;
            } else if let Some(at) = last_space_from(&current, min_break) {
                lines.push(format!("{indent}{}", &current[..at]));
                let mut rest = current[at + 1..].to_owned();
                rest.push(c);
                current_width = self.width(&rest);
                current = rest;
            } else {
                lines.push(format!("{indent}{current}"));
                current = c.to_string();
                current_width = w;
            }
        }

        if !current.is_empty() {
            lines.push(format!("{indent}{current}"));
        }
        lines.join("\n")
    }
}

/// Byte offset of the last space at or after the `start`-th character.
fn last_space_from(line: &str, start: usize) -> Option<usize> {
    let (from, _) = line.char_indices().nth(start)?;
    line[from..].rfind(' ').map(|i| from + i)
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

/// Split on every Unicode line boundary, treating `\r\n` as one break.
/// A trailing break does not produce an empty final line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r'
            && let Some(&(_, '\n')) = chars.peek()
        {
            chars.next();
            start += 1;
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
