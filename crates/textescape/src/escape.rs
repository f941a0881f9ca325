//! The substitution engine.
//!
//! [`TextEscape`] joins its fragments with a delimiter and replaces every
//! unescaped `${name}` token with a bound value. See the [crate docs](crate)
//! for the escaping rules.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

use crate::config::EscapeConfig;
use crate::error::{EscapeError, Result};
use crate::token;

/// The platform line separator, used as the default delimiter.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";

/// The platform line separator, used as the default delimiter.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Creates a [`TextEscape`] over the given fragments.
///
/// Shorthand for [`TextEscape::new`].
///
/// ```
/// let text = textescape::escape(["Dear ${name},", "Thanks!"])
///     .delimiter(" ")
///     .bind("name", "Ada")?
///     .compile()?;
///
/// assert_eq!(text, "Dear Ada, Thanks!");
/// # Ok::<(), textescape::EscapeError>(())
/// ```
pub fn escape<I, S>(fragments: I) -> TextEscape
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    TextEscape::new(fragments)
}

/// Composes text fragments and substitutes `${name}` tokens.
///
/// Fragments are fixed at construction. The delimiter, bindings and default
/// are configured afterwards, either through the consuming builder methods
/// or their `&mut self` counterparts.
///
/// # Example
///
/// ```
/// use textescape::TextEscape;
///
/// let mut engine = TextEscape::new(["${a}bc", "abc", "${a}bc"])
///     .delimiter(",")
///     .bind("a", "b")?;
///
/// assert_eq!(engine.compile()?, "bbc,abc,bbc");
/// # Ok::<(), textescape::EscapeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEscape {
    fragments: Vec<String>,
    delimiter: String,
    bindings: HashMap<String, String>,
    default: Option<String>,
}

impl TextEscape {
    /// Creates an engine over the given fragments, in order.
    ///
    /// The delimiter starts out as [`LINE_SEPARATOR`]. An empty fragment list
    /// is valid and compiles to an empty string.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            delimiter: LINE_SEPARATOR.to_string(),
            bindings: HashMap::new(),
            default: None,
        }
    }

    /// Applies a declarative [`EscapeConfig`].
    pub fn with_config(self, config: EscapeConfig) -> Result<Self> {
        config.apply(self)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Sets the delimiter placed between fragments.
    ///
    /// The delimiter is joined in before substitution, so any tokens it
    /// contains are substituted like the rest of the text.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.set_delimiter(delimiter);
        self
    }

    /// Binds `key` to the string form of `value`.
    ///
    /// Rebinding a key replaces the previous value.
    ///
    /// # Errors
    ///
    /// [`EscapeError::UnescapedValue`] if the value contains an unescaped
    /// token. Write `\${name}` to bind a literal `${name}`.
    pub fn bind(mut self, key: impl Into<String>, value: impl Display) -> Result<Self> {
        self.bind_mut(key, value)?;
        Ok(self)
    }

    /// Binds every entry of `bindings`, in iteration order.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid value, like [`bind`](Self::bind). Use
    /// [`bind_all_mut`](Self::bind_all_mut) to keep the entries committed
    /// before the failure.
    pub fn bind_all<I, K, V>(mut self, bindings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
    {
        self.bind_all_mut(bindings)?;
        Ok(self)
    }

    /// Sets the value used for tokens that have no binding.
    ///
    /// # Errors
    ///
    /// [`EscapeError::UnescapedDefault`] if the value contains an unescaped
    /// token.
    pub fn default_value(mut self, value: impl Into<String>) -> Result<Self> {
        self.set_default(value)?;
        Ok(self)
    }

    // ========================================================================
    // In-place configuration
    // ========================================================================

    /// Sets the delimiter in place.
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) -> &mut Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Binds `key` to the string form of `value` in place.
    pub fn bind_mut(&mut self, key: impl Into<String>, value: impl Display) -> Result<&mut Self> {
        let value = value.to_string();
        if token::has_unescaped_token(&value) {
            return Err(EscapeError::UnescapedValue(value));
        }
        self.bindings.insert(key.into(), value);
        Ok(self)
    }

    /// Binds every entry of `bindings` in place, one at a time.
    ///
    /// Entries before a failing one stay bound.
    pub fn bind_all_mut<I, K, V>(&mut self, bindings: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
    {
        for (key, value) in bindings {
            self.bind_mut(key, value)?;
        }
        Ok(self)
    }

    /// Sets the default value in place.
    pub fn set_default(&mut self, value: impl Into<String>) -> Result<&mut Self> {
        let value = value.into();
        if token::has_unescaped_token(&value) {
            return Err(EscapeError::UnescapedDefault(value));
        }
        self.default = Some(value);
        Ok(self)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the fragments, in order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Returns the delimiter.
    pub fn get_delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Returns the default value, if one is set.
    pub fn get_default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Returns the value bound to `key`.
    pub fn binding(&self, key: &str) -> Option<&str> {
        self.bindings.get(key).map(String::as_str)
    }

    /// Returns all bindings, including those filled in from the default by
    /// earlier [`compile`](Self::compile) calls.
    pub fn bindings(&self) -> &HashMap<String, String> {
        &self.bindings
    }

    /// Returns the fragments joined by the delimiter, before substitution.
    pub fn composed(&self) -> String {
        self.fragments.join(self.delimiter.as_str())
    }

    /// Returns the distinct names of all tokens in the composed text,
    /// escaped ones included.
    pub fn keys(&self) -> BTreeSet<String> {
        token::token_names(&self.composed())
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // ========================================================================
    // Compilation
    // ========================================================================

    /// Joins the fragments and substitutes every unescaped token.
    ///
    /// Every token name in the composed text must resolve, escaped tokens
    /// included. When a default is set, each name without a binding is bound
    /// to it: the engine remembers those bindings, so later calls (and
    /// [`bindings`](Self::bindings)) see them as explicit.
    ///
    /// # Errors
    ///
    /// [`EscapeError::MissingKeys`] listing every unresolved name when no
    /// default is set.
    pub fn compile(&mut self) -> Result<String> {
        let text = self.composed();
        let names = token::token_names(&text);

        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| !self.bindings.contains_key(*name))
            .collect();

        if !missing.is_empty() {
            match &self.default {
                Some(default) => {
                    for name in missing {
                        self.bindings.insert(name.to_string(), default.clone());
                    }
                }
                None => {
                    return Err(EscapeError::MissingKeys(
                        missing.into_iter().map(str::to_string).collect(),
                    ));
                }
            }
        }

        let bindings = &self.bindings;
        Ok(token::expand(&text, |name| {
            bindings.get(name).map(String::as_str)
        }))
    }

    /// Renders the engine as text. Identical to [`compile`](Self::compile).
    pub fn to_text(&mut self) -> Result<String> {
        self.compile()
    }
}
