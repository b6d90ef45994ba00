//! Configuration for editing sessions.

use formforge_engine::EngineConfig;
use formforge_model::FieldDefaults;
use serde::{Deserialize, Serialize};

/// Number of undo steps kept by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Configuration for a [`BuilderStore`](crate::BuilderStore) and its session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderConfig {
    /// Maximum undo steps.
    pub history_capacity: usize,
    /// Appended to the label of a duplicated field.
    pub copy_suffix: String,
    /// Name of a new, unsaved form.
    pub default_name: String,
    /// Name used when a generated schema arrives without one.
    pub generated_name: String,
    /// Description sent with every save.
    pub save_description: String,
    /// Defaults for freshly added fields.
    pub field_defaults: FieldDefaults,
    /// Rule engine settings for the live preview.
    pub engine: EngineConfig,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            copy_suffix: " (Copy)".to_string(),
            default_name: "My New Form".to_string(),
            generated_name: "AI Generated Form".to_string(),
            save_description: "A dynamically Created Form".to_string(),
            field_defaults: FieldDefaults::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl BuilderConfig {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the undo capacity.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Builder method to set the duplicate label suffix.
    #[must_use]
    pub fn with_copy_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.copy_suffix = suffix.into();
        self
    }

    /// Builder method to set the name of new forms.
    #[must_use]
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    /// Builder method to set field defaults.
    #[must_use]
    pub fn with_field_defaults(mut self, defaults: FieldDefaults) -> Self {
        self.field_defaults = defaults;
        self
    }

    /// Builder method to set engine settings.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}
