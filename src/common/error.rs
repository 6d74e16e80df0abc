//! Error types for the regression suite
//!
//! The taxonomy covers the failures a run can actually produce: a missing
//! environment variable, a broken configuration file, a browser that
//! cannot be launched, and the two test-level failures: an element wait
//! that times out, or a content assertion that does not hold.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the regression suite
#[derive(Error, Debug)]
pub enum Error {
    // === Environment Errors ===
    #[error("Missing environment variable {name}. Set it in the environment or a .env file")]
    MissingEnv { name: &'static str },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === Browser/Session Errors ===
    #[error("No Chromium-based browser found.\n{hint}")]
    BrowserNotFound { hint: String },

    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Navigation to '{url}' failed: {reason}")]
    NavigationFailed { url: String, reason: String },

    #[error("CDP command failed: {0}")]
    Cdp(String),

    #[error("JavaScript evaluation failed: {0}")]
    JsEval(String),

    #[error("Element no longer attached to the page (ref {0})")]
    ElementVanished(u64),

    // === Wait/Assertion Errors ===
    #[error("Element '{selector}' not found within {waited_secs}s")]
    ElementTimeout { selector: String, waited_secs: u64 },

    #[error("{step}: expected {expected}, got '{actual}'")]
    ContentMismatch {
        step: &'static str,
        expected: String,
        actual: String,
    },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an element timeout error from a selector description
    pub fn element_timeout(selector: impl Into<String>, waited_secs: u64) -> Self {
        Self::ElementTimeout {
            selector: selector.into(),
            waited_secs,
        }
    }

    /// Create a content mismatch error for a step expectation
    pub fn content_mismatch(
        step: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ContentMismatch {
            step,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
