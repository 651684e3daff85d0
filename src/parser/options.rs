//! Parsing options and configuration.

use crate::model::DEFAULT_MAX_DEPTH;
use std::path::PathBuf;

/// Options for building the document model.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for per-file artifacts
    pub error_mode: ErrorMode,

    /// Maximum BasedOn chain length before resolution fails
    pub max_style_depth: usize,

    /// Folder holding `Links` and `Document Fonts` (defaults to the package root)
    pub asset_root: Option<PathBuf>,

    /// Create empty `Links` / `Document Fonts` folders when absent
    pub create_missing_asset_dirs: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unparsable artifacts).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable strict mode (fail on any unparsable artifact).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the BasedOn recursion bound.
    pub fn with_max_style_depth(mut self, depth: usize) -> Self {
        self.max_style_depth = depth;
        self
    }

    /// Look for `Links` and `Document Fonts` in another folder.
    pub fn with_asset_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_root = Some(dir.into());
        self
    }

    /// Enable or disable creation of missing asset folders.
    pub fn with_create_missing_asset_dirs(mut self, create: bool) -> Self {
        self.create_missing_asset_dirs = create;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            max_style_depth: DEFAULT_MAX_DEPTH,
            asset_root: None,
            create_missing_asset_dirs: true,
        }
    }
}

/// Error handling mode during parsing.
///
/// Missing or unparsable mandatory files always end the run; the mode only
/// decides what happens to individual spread, story and master spread files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    Strict,
    /// Skip the failing artifact, record it and continue
    #[default]
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .strict()
            .with_max_style_depth(8)
            .with_asset_root("/tmp/package")
            .with_create_missing_asset_dirs(false);

        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.max_style_depth, 8);
        assert_eq!(options.asset_root, Some(PathBuf::from("/tmp/package")));
        assert!(!options.create_missing_asset_dirs);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.max_style_depth, DEFAULT_MAX_DEPTH);
        assert!(options.create_missing_asset_dirs);
        assert!(options.asset_root.is_none());
    }
}
