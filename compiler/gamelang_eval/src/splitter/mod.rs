//! Quote- and nesting-aware splitting of expression text.
//!
//! GameLang has no tokenizer. Call arguments, array elements, map entries
//! and `+` operands are all found by walking the text once while tracking
//! whether we are inside a quoted string and how deep we are in `()`, `[]`
//! and `{}`. A separator only counts at the top level.
//!
//! Malformed input never fails: an unclosed quote or bracket simply keeps
//! the rest of the text in the current segment.

/// Nesting state while walking a fragment.
#[derive(Clone, Copy, Debug, Default)]
struct Nesting {
    quote: Option<char>,
    parens: usize,
    brackets: usize,
    braces: usize,
}

impl Nesting {
    fn is_top_level(&self) -> bool {
        self.quote.is_none() && self.parens == 0 && self.brackets == 0 && self.braces == 0
    }

    /// Advance past `c`. Returns whether `c` itself sat at the top level.
    fn step(&mut self, c: char) -> bool {
        let top = self.is_top_level();
        if let Some(q) = self.quote {
            if c == q {
                self.quote = None;
            }
            return top;
        }
        match c {
            '"' | '\'' => self.quote = Some(c),
            '(' => self.parens += 1,
            ')' => self.parens = self.parens.saturating_sub(1),
            '[' => self.brackets += 1,
            ']' => self.brackets = self.brackets.saturating_sub(1),
            '{' => self.braces += 1,
            '}' => self.braces = self.braces.saturating_sub(1),
            _ => {}
        }
        top
    }
}

/// Split `text` on every top-level occurrence of `sep`.
///
/// Pieces are returned untrimmed and may be empty; a text without any
/// top-level separator comes back as a single piece.
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut nesting = Nesting::default();
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if nesting.step(c) && c == sep {
            pieces.push(&text[start..idx]);
            start = idx + c.len_utf8();
        }
    }
    pieces.push(&text[start..]);
    pieces
}

/// Byte offset of the first top-level `sep`, if any.
pub fn find_top_level(text: &str, sep: char) -> Option<usize> {
    let mut nesting = Nesting::default();
    text.char_indices()
        .find(|&(_, c)| nesting.step(c) && c == sep)
        .map(|(idx, _)| idx)
}

/// Split argument or element text on top-level commas.
///
/// Segments are trimmed and empty segments are dropped, so `""` yields no
/// arguments and a trailing comma is harmless.
pub fn split_arguments(text: &str) -> Vec<String> {
    split_top_level(text, ',')
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
