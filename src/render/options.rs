//! Rendering options and configuration.

/// Options for rendering a classified document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit each page's footnotes after its body
    pub include_footnotes: bool,

    /// Emit comment markers for uninterpreted objects
    pub include_passthrough: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable footnote output.
    pub fn with_footnotes(mut self, include: bool) -> Self {
        self.include_footnotes = include;
        self
    }

    /// Enable or disable passthrough markers.
    pub fn with_passthrough(mut self, include: bool) -> Self {
        self.include_passthrough = include;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_footnotes: true,
            include_passthrough: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_footnotes(false)
            .with_passthrough(false);

        assert!(!options.include_footnotes);
        assert!(!options.include_passthrough);
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert!(options.include_footnotes);
        assert!(options.include_passthrough);
    }
}
