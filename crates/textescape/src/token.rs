//! Escape-aware scanning of `${name}` tokens.
//!
//! A [`Tokenizer`] splits text into [`Piece`]s. Every backslash run that sits
//! directly in front of a `${` is attached to the piece it precedes, so callers
//! can decide escaping by parity alone:
//!
//! - `${a}` - unescaped token (run of 0)
//! - `\${a}` - escaped token (run of 1), renders as `${a}`
//! - `\\${a}` - escaped backslash then unescaped token, renders as `\` + value
//! - `\\\${a}` - escaped token (run of 3), renders as `\\${a}`
//!
//! An escaped piece loses exactly one backslash. An unescaped token halves
//! its run. Backslashes anywhere else are plain text and are never consumed.
//!
//! # Example
//!
//! ```rust
//! use textescape::token::{Piece, Tokenizer};
//!
//! let pieces: Vec<_> = Tokenizer::new(r"x\${a}${b}").collect();
//! assert_eq!(
//!     pieces,
//!     vec![
//!         Piece::Text("x"),
//!         Piece::Token { name: "a", backslashes: 1 },
//!         Piece::Token { name: "b", backslashes: 0 },
//!     ]
//! );
//! ```

use std::collections::BTreeSet;

const OPEN: &str = "${";
const CLOSE: char = '}';
const BACKSLASH: u8 = b'\\';

/// A slice of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    /// Literal text. Never ends with backslashes that precede a `${`.
    Text(&'a str),

    /// A complete `${name}` token with the backslash run in front of it.
    Token { name: &'a str, backslashes: usize },

    /// A `${` with no closing `}` after it.
    Opener { backslashes: usize },
}

impl Piece<'_> {
    /// Returns `true` if an odd backslash run escapes this piece.
    pub fn is_escaped(&self) -> bool {
        match self {
            Piece::Text(_) => false,
            Piece::Token { backslashes, .. } | Piece::Opener { backslashes } => {
                backslashes % 2 == 1
            }
        }
    }

    /// Returns how many of the leading backslashes survive rendering.
    ///
    /// An escaped piece drops the single escaping backslash; otherwise the
    /// run is made of escaped backslashes and collapses pairwise.
    pub fn kept_backslashes(&self) -> usize {
        match self {
            Piece::Text(_) => 0,
            Piece::Token { backslashes, .. } | Piece::Opener { backslashes } => {
                if self.is_escaped() {
                    backslashes - 1
                } else {
                    backslashes / 2
                }
            }
        }
    }
}

/// Iterator over the [`Piece`]s of a text.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];

        let Some(open) = remaining.find(OPEN) else {
            self.pos = self.input.len();
            return Some(Piece::Text(remaining));
        };

        let backslashes = remaining.as_bytes()[..open]
            .iter()
            .rev()
            .take_while(|b| **b == BACKSLASH)
            .count();
        let run_start = open - backslashes;

        if run_start > 0 {
            self.pos += run_start;
            return Some(Piece::Text(&remaining[..run_start]));
        }

        let body = &remaining[open + OPEN.len()..];
        match body.find(CLOSE) {
            Some(close) => {
                self.pos += open + OPEN.len() + close + CLOSE.len_utf8();
                Some(Piece::Token {
                    name: &body[..close],
                    backslashes,
                })
            }
            None => {
                self.pos += open + OPEN.len();
                Some(Piece::Opener { backslashes })
            }
        }
    }
}

/// Returns `true` if `text` contains at least one unescaped token.
pub fn has_unescaped_token(text: &str) -> bool {
    Tokenizer::new(text).any(|piece| matches!(piece, Piece::Token { .. }) && !piece.is_escaped())
}

/// Collects the distinct names of every token in `text`, escaped or not.
pub fn token_names(text: &str) -> BTreeSet<&str> {
    Tokenizer::new(text)
        .filter_map(|piece| match piece {
            Piece::Token { name, .. } => Some(name),
            _ => None,
        })
        .collect()
}

/// Rewrites `text`, substituting unescaped tokens that `resolve` knows.
///
/// Escaped tokens and openers lose their escaping backslash and stay
/// literal. The even run in front of a substituted token collapses pairwise,
/// so `\\${a}` renders as `\` + value. Resolved values are [`unescape`]d before they
/// are inserted and are not scanned again. Tokens that stay unresolved are
/// written back literally.
pub fn expand<'v, F>(text: &str, mut resolve: F) -> String
where
    F: FnMut(&str) -> Option<&'v str>,
{
    let mut out = String::with_capacity(text.len());

    for piece in Tokenizer::new(text) {
        match piece {
            Piece::Text(literal) => out.push_str(literal),
            Piece::Opener { .. } => {
                push_backslashes(&mut out, piece.kept_backslashes());
                out.push_str(OPEN);
            }
            Piece::Token { name, .. } => {
                push_backslashes(&mut out, piece.kept_backslashes());
                let value = if piece.is_escaped() {
                    None
                } else {
                    resolve(name)
                };
                match value {
                    Some(value) => out.push_str(&unescape(value)),
                    None => {
                        out.push_str(OPEN);
                        out.push_str(name);
                        out.push(CLOSE);
                    }
                }
            }
        }
    }

    out
}

/// Strips the escaping backslash in front of `${`, leaving tokens literal.
pub fn unescape(text: &str) -> String {
    expand(text, |_| None)
}

fn push_backslashes(out: &mut String, count: usize) {
    out.extend(std::iter::repeat('\\').take(count));
}
