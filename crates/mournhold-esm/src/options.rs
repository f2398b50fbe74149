//! Load configuration.

/// Options controlling how a file is loaded and indexed.
///
/// The default is lenient: duplicate identifiers and coordinates within a
/// file are reported as diagnostics and the first definition is kept.
///
/// ```
/// use mournhold_esm::LoadOptions;
///
/// let options = LoadOptions::new().strict(true).source_name("Tribunal.esm");
/// assert!(options.is_strict());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    strict: bool,
    source_name: Option<String>,
}

impl LoadOptions {
    /// Create lenient default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat duplicate identifiers and coordinates as fatal errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Label the source in log output.
    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Check if strict mode is enabled.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Get the source label, or `"<memory>"` when none was set.
    pub fn name(&self) -> &str {
        self.source_name.as_deref().unwrap_or("<memory>")
    }
}
