//! Rule configuration.

/// Default size above which an image is reported as large.
pub const DEFAULT_LARGE_IMAGE_MB: f64 = 10.0;

/// Options for the validation rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOptions {
    /// Images strictly larger than this (in MB) get a `LARGE_IMAGE` info
    pub large_image_threshold_mb: f64,
}

impl RuleOptions {
    /// Create rule options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the large-image threshold in megabytes.
    pub fn with_large_image_threshold_mb(mut self, threshold: f64) -> Self {
        self.large_image_threshold_mb = threshold;
        self
    }
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            large_image_threshold_mb: DEFAULT_LARGE_IMAGE_MB,
        }
    }
}
