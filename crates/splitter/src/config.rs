use serde::{Deserialize, Serialize};

/// Tokenizer model used when none is specified
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Separator placed between sections when they are joined into one string
pub const DEFAULT_SEPARATOR: &str = "=== SPLIT ===";

/// Context size assumed for models missing from [`model_context_size`]
pub const FALLBACK_CONTEXT_SIZE: usize = 2048;

/// Known OpenAI model context sizes, used as the default section limit
/// when no explicit limit is configured.
pub fn model_context_size(model: &str) -> Option<usize> {
    match model {
        "gpt-4" | "gpt-4-0613" => Some(8192),
        "gpt-4-32k" | "gpt-4-32k-0613" => Some(32_768),
        "gpt-3.5-turbo" | "gpt-3.5-turbo-0613" => Some(4096),
        "gpt-3.5-turbo-16k" | "gpt-3.5-turbo-16k-0613" => Some(16_384),
        _ => None,
    }
}

/// Configuration for Markdown splitting behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitterConfig {
    /// Tokenizer model identifier; affects token counting and the
    /// default limit
    pub model: String,

    /// Explicit token ceiling per section; `None` falls back to the
    /// model's context size (or [`FALLBACK_CONTEXT_SIZE`] for unknown
    /// models)
    pub limit: Option<usize>,

    /// Delimiter string joining sections when rendered as one string
    pub separator: String,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            limit: None,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl SplitterConfig {
    /// Create a config for a specific model, keeping the default limit
    /// lookup and separator
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Builder: set an explicit token limit
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The effective per-section token budget
    #[must_use]
    pub fn resolved_limit(&self) -> usize {
        self.limit.unwrap_or_else(|| {
            model_context_size(&self.model).unwrap_or(FALLBACK_CONTEXT_SIZE)
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("model must not be empty".to_string());
        }

        if self.limit == Some(0) {
            return Err("limit must be > 0".to_string());
        }

        Ok(())
    }
}
