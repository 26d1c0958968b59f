use crate::Result;
use crate::canvas::CanvasModule;
use serde::Deserialize;
use std::fmt;
use std::rc::Rc;

/// Configuration of an [`SvgSnap`](crate::SvgSnap).
///
/// Every field defaults to empty. The string fields can be loaded from JSON (`selector`,
/// `container`, `styles`); the canvas provider is only ever injected in code.
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapOptions {
    /// CSS selector narrowing the working root below `body`.
    pub selector: String,
    /// Markup the document is seeded with. Empty means a blank document.
    pub container: String,
    /// CSS text embedded into every SVG created by the adapter.
    pub styles: String,
    #[serde(skip)]
    pub canvas_module: Option<Rc<dyn CanvasModule>>,
}

impl fmt::Debug for SnapOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapOptions")
            .field("selector", &self.selector)
            .field("container", &self.container)
            .field("styles", &self.styles)
            .field(
                "canvas_module",
                &self.canvas_module.as_ref().map(|m| m.version()),
            )
            .finish()
    }
}

impl SnapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    pub fn with_styles(mut self, styles: impl Into<String>) -> Self {
        self.styles = styles.into();
        self
    }

    pub fn with_canvas_module(mut self, module: Rc<dyn CanvasModule>) -> Self {
        self.canvas_module = Some(module);
        self
    }
}
