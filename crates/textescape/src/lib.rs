//! Textescape - heredoc-style text composition with `${name}` substitution.
//!
//! Textescape joins text fragments with a delimiter and replaces `${name}`
//! tokens with bound values. It provides:
//!
//! - A fluent builder for fragments, delimiter, bindings and a default value
//! - Backslash escaping that lets literal `${name}` survive compilation
//! - Fail-fast validation of bound values and defaults
//! - Declarative configuration from JSON or YAML
//!
//! # Quick Start
//!
//! ```rust
//! use textescape::TextEscape;
//!
//! let mut engine = TextEscape::new([
//!     "Hello, ${name}!",
//!     r"Write \${name} to insert a name.",
//! ])
//! .delimiter(" ")
//! .bind("name", "World")?;
//!
//! assert_eq!(
//!     engine.compile()?,
//!     "Hello, World! Write ${name} to insert a name."
//! );
//! # Ok::<(), textescape::EscapeError>(())
//! ```
//!
//! # Compilation
//!
//! ```text
//! composed = fragments joined by delimiter
//! names    = every ${name} in composed (escaped or not)
//! resolve  = binding, else default (remembered as a binding), else error
//! output   = composed with unescaped tokens substituted and escapes removed
//! ```
//!
//! The delimiter is joined in before substitution, so a delimiter of `${a}`
//! is substituted like any other text.
//!
//! # Escaping
//!
//! Escaping is decided by the run of backslashes directly in front of `${`:
//!
//! | Source | Output (`a` = `x`) |
//! |--------|--------------------|
//! | `${a}` | `x` |
//! | `\${a}` | `${a}` |
//! | `\\${a}` | `\x` |
//! | `\\\${a}` | `\\${a}` |
//!
//! An odd run escapes the token, which keeps it literal and strips exactly
//! one backslash. An even run in front of a substituted token is made of
//! escaped backslashes and collapses to half its length. Backslashes that
//! are not in front of `${` are kept as they are.
//!
//! Bound values and the default must not contain unescaped tokens. Bind
//! `\${a}` to produce a literal `${a}`.

pub mod config;
mod error;
mod escape;
pub mod token;

// Re-export public API
pub use config::EscapeConfig;
pub use error::{EscapeError, Result};
pub use escape::{escape, TextEscape, LINE_SEPARATOR};
