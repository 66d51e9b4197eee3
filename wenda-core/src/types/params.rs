//! Generation and pipeline parameter types.
//!
//! Parameters flow through a pipeline in two layers: a global set that applies
//! to every node, and per-node overrides keyed by node name. A node receives
//! the merge of both, with the node-specific value winning.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sampling and output parameters for answer generation.
///
/// All fields are optional; generators substitute their configured defaults
/// for `None` values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerationParams {
    /// Number of answers to produce for the query.
    pub top_k: Option<usize>,

    /// Maximum number of tokens the model may generate per answer.
    pub max_tokens: Option<usize>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling probability mass.
    pub top_p: Option<f32>,

    /// Stop sequences that end generation.
    pub stop: Option<Vec<String>>,

    /// Additional provider-specific parameters.
    pub extra: HashMap<String, serde_json::Value>,
}

impl GenerationParams {
    /// Create empty parameters (generators apply their defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of answers to produce.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Set the completion token allowance.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Add a provider-specific parameter.
    pub fn with_extra<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Parameters addressed to a single pipeline node.
///
/// Structurally identical to [`GenerationParams`] so that retrieval-only
/// fields (`top_k`) and generation-only fields share one override mechanism,
/// the way a pipeline `params` map addresses heterogeneous nodes.
pub type NodeParams = GenerationParams;

/// Layered parameters for a pipeline run.
///
/// # Examples
///
/// ```rust
/// use wenda_core::types::{NodeParams, PipelineParams};
///
/// let params = PipelineParams::new()
///     .with_global(NodeParams::new().with_top_k(1))
///     .with_node("generator", NodeParams::new().with_top_k(2));
///
/// // The generator sees its override, the retriever the global value.
/// assert_eq!(params.resolve("generator").top_k, Some(2));
/// assert_eq!(params.resolve("retriever").top_k, Some(1));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PipelineParams {
    /// Parameters applied to every node unless overridden.
    pub global: NodeParams,

    /// Per-node overrides keyed by node name.
    pub per_node: HashMap<String, NodeParams>,
}

impl PipelineParams {
    /// Create empty pipeline parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global parameter layer.
    pub fn with_global(mut self, global: NodeParams) -> Self {
        self.global = global;
        self
    }

    /// Set the override layer for a named node.
    pub fn with_node<S: Into<String>>(mut self, node: S, params: NodeParams) -> Self {
        self.per_node.insert(node.into(), params);
        self
    }

    /// Node names that have explicit overrides.
    pub fn overridden_nodes(&self) -> impl Iterator<Item = &str> {
        self.per_node.keys().map(String::as_str)
    }

    /// Resolve the effective parameters for a named node.
    ///
    /// Starts from the global layer and applies the node's overrides on top;
    /// `extra` maps are merged key-wise with the node layer winning.
    pub fn resolve(&self, node: &str) -> NodeParams {
        let mut resolved = self.global.clone();
        if let Some(overrides) = self.per_node.get(node) {
            if overrides.top_k.is_some() {
                resolved.top_k = overrides.top_k;
            }
            if overrides.max_tokens.is_some() {
                resolved.max_tokens = overrides.max_tokens;
            }
            if overrides.temperature.is_some() {
                resolved.temperature = overrides.temperature;
            }
            if overrides.top_p.is_some() {
                resolved.top_p = overrides.top_p;
            }
            if overrides.stop.is_some() {
                resolved.stop.clone_from(&overrides.stop);
            }
            for (key, value) in &overrides.extra {
                resolved.extra.insert(key.clone(), value.clone());
            }
        }
        resolved
    }
}
