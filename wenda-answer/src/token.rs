//! Token counter implementations.
//!
//! Budgets are enforced in model tokens, so counting goes through the
//! [`TokenCounter`] seam. [`TiktokenCounter`] wraps a real BPE vocabulary;
//! [`WhitespaceTokenCounter`] is a deterministic stand-in for tests and
//! offline estimation.

use tiktoken_rs::CoreBPE;

use wenda_core::{Result, WendaError, traits::TokenCounter};

/// Token counter backed by a tiktoken BPE vocabulary.
///
/// # Examples
///
/// ```rust,no_run
/// use wenda_answer::token::TiktokenCounter;
/// use wenda_core::traits::TokenCounter;
///
/// # fn example() -> wenda_core::Result<()> {
/// let counter = TiktokenCounter::cl100k()?;
/// assert!(counter.count("hello world") > 0);
/// # Ok(())
/// # }
/// ```
pub struct TiktokenCounter {
    bpe: CoreBPE,
    encoding: String,
}

impl std::fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenCounter")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl TiktokenCounter {
    /// Create a counter for the `cl100k_base` encoding (GPT-3.5/4 family).
    pub fn cl100k() -> Result<Self> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| WendaError::Configuration {
            message: format!("Failed to load cl100k_base encoding: {e}"),
        })?;
        Ok(Self {
            bpe,
            encoding: "cl100k_base".to_string(),
        })
    }

    /// Create a counter for the `p50k_base` encoding (legacy completion models).
    pub fn p50k() -> Result<Self> {
        let bpe = tiktoken_rs::p50k_base().map_err(|e| WendaError::Configuration {
            message: format!("Failed to load p50k_base encoding: {e}"),
        })?;
        Ok(Self {
            bpe,
            encoding: "p50k_base".to_string(),
        })
    }

    /// Create a counter for the encoding a given model uses.
    ///
    /// Unknown models fall back to `cl100k_base`.
    pub fn for_model(model: &str) -> Result<Self> {
        match tiktoken_rs::get_bpe_from_model(model) {
            Ok(bpe) => Ok(Self {
                bpe,
                encoding: model.to_string(),
            }),
            Err(_) => {
                tracing::debug!(model, "No dedicated encoding for model, using cl100k_base");
                Self::cl100k()
            }
        }
    }

    /// Name of the underlying encoding, or the model it was resolved from.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

/// Deterministic token counter that treats whitespace-separated words as tokens.
///
/// Useful for tests and rough estimation where loading a BPE vocabulary is
/// unnecessary. Counts are stable across platforms and library versions.
///
/// # Examples
///
/// ```rust
/// use wenda_answer::token::WhitespaceTokenCounter;
/// use wenda_core::traits::TokenCounter;
///
/// let counter = WhitespaceTokenCounter;
/// assert_eq!(counter.count("most relevant document"), 3);
/// assert_eq!(counter.count(""), 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenCounter;

impl TokenCounter for WhitespaceTokenCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}
