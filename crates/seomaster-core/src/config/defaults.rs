//! Default values for SEOMaster configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model. Chosen for deep reasoning and search grounding.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";

/// Default thinking budget passed with every analysis request. Bounds the
/// model's reasoning effort while leaving room for complex SEO logic.
pub const DEFAULT_THINKING_BUDGET: u32 = 1024;

/// Project-local config file name.
pub const DEFAULT_CONFIG_FILE: &str = "seomaster.toml";

/// Subdirectory of the user config dir holding the user-level config file.
pub const DEFAULT_CONFIG_DIR: &str = "seomaster";
