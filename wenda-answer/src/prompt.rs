//! Prompt templates and token-budget-bounded prompt construction.
//!
//! The prompt builder takes a query, a list of candidate documents pre-ranked
//! by relevance, and a maximum token budget. Documents are included greedily
//! in ranking order; the first document that would push the cumulative token
//! count over the budget is excluded along with everything ranked below it.
//! Running out of budget is handled by truncation with an informational log,
//! never by an error.

use tracing::{debug, info};

use wenda_core::{Result, WendaError, traits::TokenCounter, types::Document};

/// Placeholder for the document context in a template.
pub const CONTEXT_SLOT: &str = "{context}";

/// Placeholder for the query in a template.
pub const QUERY_SLOT: &str = "{query}";

/// A prompt template with `{context}` and `{query}` slots.
///
/// # Examples
///
/// ```rust
/// use wenda_answer::prompt::PromptTemplate;
///
/// let template = PromptTemplate::new("Context: {context}\nQuestion: {query}\nAnswer:").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    doc_separator: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: "Please answer the question according to the provided paragraphs. \
                       If the paragraphs do not contain the answer, say so.\n===\n\
                       Paragraphs: {context}\n===\nQuestion: {query}\nAnswer:"
                .to_string(),
            doc_separator: " ".to_string(),
        }
    }
}

impl PromptTemplate {
    /// Create a template from a format string.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the string is missing the `{context}` or
    /// `{query}` slot.
    pub fn new<S: Into<String>>(template: S) -> Result<Self> {
        let template = template.into();
        for slot in [CONTEXT_SLOT, QUERY_SLOT] {
            if !template.contains(slot) {
                return Err(WendaError::validation(format!(
                    "Prompt template is missing the required {slot} placeholder"
                )));
            }
        }
        Ok(Self {
            template,
            doc_separator: " ".to_string(),
        })
    }

    /// Set the separator placed between document contents in the context slot.
    pub fn with_doc_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.doc_separator = separator.into();
        self
    }

    /// The raw template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the template with the given query and documents.
    pub fn render(&self, query: &str, documents: &[Document]) -> String {
        let context = documents
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join(&self.doc_separator);
        self.template
            .replace(CONTEXT_SLOT, &context)
            .replace(QUERY_SLOT, query)
    }

    /// Fixed token overhead of the template itself (both slots empty).
    pub fn overhead(&self, counter: &dyn TokenCounter) -> usize {
        counter.count(
            &self
                .template
                .replace(CONTEXT_SLOT, "")
                .replace(QUERY_SLOT, ""),
        )
    }

    /// Build a prompt for `query`, greedily including `documents` in order
    /// while the cumulative token count stays within `budget`.
    ///
    /// The cost of a prompt is the template overhead plus the query tokens
    /// plus the tokens of every included document (and the separators between
    /// them). Inclusion is a strict prefix of the input: once a document does
    /// not fit, it and every lower-ranked document are excluded. With a budget
    /// below the query's own token count, no documents are included and the
    /// prompt is rendered with an empty context.
    ///
    /// Token counts are computed per part; sub-word tokenizers may merge
    /// tokens across joins, so the rendered prompt can encode to slightly
    /// fewer tokens than the sum.
    pub fn build_within_budget(
        &self,
        query: &str,
        documents: &[Document],
        budget: usize,
        counter: &dyn TokenCounter,
    ) -> FittedPrompt {
        let separator_tokens = counter.count(&self.doc_separator);
        let mut used = self.overhead(counter) + counter.count(query);

        let mut included: Vec<Document> = Vec::new();
        let mut skipped = 0usize;
        for document in documents {
            if skipped > 0 {
                skipped += 1;
                continue;
            }
            let mut cost = counter.count(&document.content);
            if !included.is_empty() {
                cost += separator_tokens;
            }
            if used + cost > budget {
                skipped += 1;
                continue;
            }
            used += cost;
            included.push(document.clone());
        }

        if skipped > 0 {
            if included.is_empty() {
                info!(
                    budget,
                    "Even the most relevant document does not fit the token budget. \
                     Skipping all of the provided documents"
                );
            } else {
                info!(
                    included = included.len(),
                    skipped, budget, "Answering based on the top documents that fit the budget"
                );
            }
        }

        let prompt = self.render(query, &included);
        debug!(
            tokens = used,
            documents = included.len(),
            "Built prompt within token budget"
        );

        FittedPrompt {
            prompt,
            documents: included,
            tokens: used,
        }
    }
}

/// Result of fitting a prompt into a token budget.
#[derive(Debug, Clone)]
pub struct FittedPrompt {
    /// The assembled prompt string.
    pub prompt: String,

    /// The documents actually included, in their original relative order.
    pub documents: Vec<Document>,

    /// Estimated token count of the assembled prompt.
    pub tokens: usize,
}
