//! draw.io style strings as ordered token sequences.
//!
//! A style string is a `;`-terminated list of tokens. A token is either a bare name
//! (`swimlane`, `ellipse`, `text`) or a `key=value` pair. Later occurrences of a key win when
//! draw.io reads the string, so [`Style::get`] returns the last one. [`Style::set`] updates an
//! existing token in place; [`Style::push`] appends a shadowing copy.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleToken {
    pub key: String,
    pub value: Option<String>,
}

impl StyleToken {
    pub fn bare(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    tokens: Vec<StyleToken>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `text` carries at least one `key=value` pair, i.e. it is a complete style
    /// rather than a bare shape or route name.
    pub fn is_explicit(text: &str) -> bool {
        text.contains('=')
    }

    /// Splits `text` into tokens, keeping duplicates and their order. Empty segments are
    /// skipped.
    pub fn parse(text: &str) -> Self {
        let tokens = text
            .split(';')
            .filter(|seg| !seg.is_empty())
            .map(|seg| match seg.split_once('=') {
                Some((k, v)) => StyleToken::pair(k, v),
                None => StyleToken::bare(seg),
            })
            .collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[StyleToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Effective value of `key`: the value of its last occurrence.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tokens
            .iter()
            .rev()
            .find(|t| t.key == key)
            .and_then(|t| t.value.as_deref())
    }

    pub fn has(&self, key: &str) -> bool {
        self.tokens.iter().any(|t| t.key == key)
    }

    /// Sets `key=value`, overwriting the last existing occurrence in place or appending.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.tokens.iter_mut().rev().find(|t| t.key == key) {
            Some(t) => t.value = Some(value),
            None => self.tokens.push(StyleToken::pair(key, value)),
        }
        self
    }

    /// Appends a bare token unless one with that name is already present.
    pub fn flag(&mut self, key: impl Into<String>) -> &mut Self {
        let key = key.into();
        if !self.has(&key) {
            self.tokens.push(StyleToken::bare(key));
        }
        self
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.tokens.retain(|t| t.key != key);
        self
    }

    /// Appends `key=value` even when `key` is already present; the new token shadows the
    /// earlier ones.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.tokens.push(StyleToken::pair(key, value));
        self
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.tokens {
            match &t.value {
                Some(v) => write!(f, "{}={};", t.key, v)?,
                None => write!(f, "{};", t.key)?,
            }
        }
        Ok(())
    }
}

impl FromStr for Style {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Style {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
