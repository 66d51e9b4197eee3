//! Token counting traits.
//!
//! Token budgets are expressed in model-specific sub-word units, so the
//! counting capability is injected wherever budgets are enforced. Swapping in
//! a deterministic counter makes budget logic testable without a real
//! tokenizer.

/// Counts model-specific tokens in text.
///
/// Implementations only need to report lengths; the token sequences
/// themselves are never exposed.
///
/// # Examples
///
/// ```rust
/// use wenda_core::traits::TokenCounter;
///
/// #[derive(Debug)]
/// struct CharCounter;
///
/// impl TokenCounter for CharCounter {
///     fn count(&self, text: &str) -> usize {
///         text.chars().count()
///     }
/// }
///
/// assert_eq!(CharCounter.count("abc"), 3);
/// ```
pub trait TokenCounter: Send + Sync + std::fmt::Debug {
    /// Number of tokens the given text encodes to.
    fn count(&self, text: &str) -> usize;
}
