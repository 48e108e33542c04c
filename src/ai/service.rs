//! Service abstraction for turning a prompt into a completion.

use crate::error::DigestError;

/// Contract shared by every language model backend.
#[cfg_attr(test, mockall::automock)]
pub trait ModelInvoker: std::fmt::Debug {
    /// Generate a completion for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError`] when the provider call fails or yields no
    /// text.
    fn invoke(&self, prompt: &str) -> Result<String, DigestError>;
}
