//! Bearer token held alongside a batch for later submission.

use crate::error::{Error, Result};
use std::fmt;

/// A non-blank bearer token (usually a JWT). Kept in memory only.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Trim `raw` and keep it, refusing blank input.
    ///
    /// The token's structure is not checked.
    pub fn new(raw: &str) -> Result<Self> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(Error::EmptyToken);
        }
        Ok(BearerToken(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken(<{} chars>)", self.0.chars().count())
    }
}
