//! Caller-facing model names and their backend equivalents.
//!
//! The table is built once at startup and never mutated. Lookup never fails:
//! unmapped names fall back to the configured base model.

use std::collections::HashMap;

/// Default backend model used when a requested model has no mapping.
pub const DEFAULT_BASE_MODEL: &str = "gpt-4o";

/// Immutable mapping from normalized caller model names to backend model names.
#[derive(Debug, Clone)]
pub struct ModelTable {
    map: HashMap<String, String>,
    base_model: String,
}

impl ModelTable {
    /// Build a table from a mapping and a fallback model. Keys are normalized
    /// so config entries match however the caller spells them.
    #[must_use]
    pub fn new(map: HashMap<String, String>, base_model: String) -> Self {
        let map = map
            .into_iter()
            .map(|(k, v)| (normalize(&k), v))
            .collect();
        Self { map, base_model }
    }

    /// Resolve a caller-supplied model name to a backend model name.
    /// Absence of a mapping is not an error; the base model is the
    /// documented fallback.
    #[must_use]
    pub fn resolve(&self, requested: &str) -> String {
        let normalized = normalize(requested);
        let resolved = self
            .map
            .get(&normalized)
            .cloned()
            .unwrap_or_else(|| self.base_model.clone());

        tracing::info!(requested, resolved = %resolved, "Model mapped");

        resolved
    }

    #[must_use]
    pub fn base_model(&self) -> &str {
        &self.base_model
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// The mapping shipped with the proxy. Config entries extend or override it.
#[must_use]
pub fn default_model_mapping() -> HashMap<String, String> {
    let mut map = HashMap::new();
    map.insert("claude-3-7-sonnet".to_string(), "claude-3-7-sonnet".to_string());
    map.insert("claude-3.5-sonnet".to_string(), "claude-3-7-sonnet".to_string());
    map.insert("o3-mini".to_string(), "3o-mini".to_string());
    map.insert("gpt-4o".to_string(), "gpt-4o".to_string());
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ModelTable {
        ModelTable::new(default_model_mapping(), DEFAULT_BASE_MODEL.to_string())
    }

    #[test]
    fn test_mapped_model_resolves() {
        assert_eq!(table().resolve("claude-3.5-sonnet"), "claude-3-7-sonnet");
        assert_eq!(table().resolve("o3-mini"), "3o-mini");
    }

    #[test]
    fn test_case_and_space_variants_resolve() {
        assert_eq!(table().resolve("Claude 3.5 Sonnet"), "claude-3-7-sonnet");
        assert_eq!(table().resolve("O3-Mini"), "3o-mini");
        assert_eq!(table().resolve("GPT 4o"), "gpt-4o");
    }

    #[test]
    fn test_unmapped_model_falls_back_to_base() {
        assert_eq!(table().resolve("some-unknown-model"), DEFAULT_BASE_MODEL);
        assert_eq!(table().resolve(""), DEFAULT_BASE_MODEL);
    }

    #[test]
    fn test_config_keys_are_normalized() {
        let mut map = HashMap::new();
        map.insert("My Custom Model".to_string(), "backend-model".to_string());
        let table = ModelTable::new(map, "base".to_string());

        assert_eq!(table.resolve("my custom model"), "backend-model");
        assert_eq!(table.resolve("MY-CUSTOM-MODEL"), "backend-model");
    }
}
