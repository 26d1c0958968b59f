use crate::canvas::{Canvas, CanvasConstructor, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::selection::{AttrValue, Selection};
use crate::xml_case::fix_xml_case;
use crate::{Error, Result, SnapOptions};
use std::rc::Rc;
use svgsnap_dom::Document;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A simulated document that chart code renders into.
///
/// The document is built once from [`SnapOptions`] and owned by the adapter. New content is
/// appended under the working root: `body`, or the first element below `body` matching the
/// configured selector.
pub struct SvgSnap {
    options: SnapOptions,
    document: Document,
    root: Selection,
    canvas: Option<Rc<dyn Canvas>>,
}

impl Default for SvgSnap {
    fn default() -> Self {
        Self::new(SnapOptions::default())
    }
}

impl std::fmt::Debug for SvgSnap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgSnap")
            .field("options", &self.options)
            .field("root", &self.root)
            .field("has_canvas", &self.canvas.is_some())
            .finish()
    }
}

impl SvgSnap {
    pub fn new(options: SnapOptions) -> Self {
        let document = if options.container.is_empty() {
            Document::new()
        } else {
            Document::parse(&options.container)
        };
        let root = working_root(&document, &options.selector);
        tracing::debug!(
            container_len = options.container.len(),
            selector = %options.selector,
            root_found = !root.is_empty(),
            "created document"
        );
        Self {
            options,
            document,
            root,
            canvas: None,
        }
    }

    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    /// Appends an `<svg>` element to the working root.
    ///
    /// `width` and `height` are applied only when both are given and strictly positive.
    pub fn create_svg(&self, width: Option<f64>, height: Option<f64>) -> Selection {
        self.create_svg_with_attrs(width, height, std::iter::empty::<(&str, AttrValue)>())
    }

    /// Like [`create_svg`](Self::create_svg), then applies `attrs` in iteration order; a later
    /// duplicate name overwrites an earlier one.
    pub fn create_svg_with_attrs<I, K, V>(
        &self,
        width: Option<f64>,
        height: Option<f64>,
        attrs: I,
    ) -> Selection
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttrValue>,
    {
        let svg = self.root.append("svg");
        svg.attr("xmlns", SVG_NAMESPACE);

        if let (Some(w), Some(h)) = (width, height) {
            if w > 0.0 && h > 0.0 {
                svg.attr("width", w).attr("height", h);
            }
        }

        for (name, value) in attrs {
            svg.attr(name.as_ref(), value);
        }

        if !self.options.styles.is_empty() {
            // Serializers in this stack cannot emit CDATA sections, so the marker is plain text.
            svg.append("defs")
                .append("style")
                .attr("type", "text/css")
                .text(format!("<![CDATA[ {} ]]>", self.options.styles));
        }

        tracing::debug!(
            appended = !svg.is_empty(),
            styled = !self.options.styles.is_empty(),
            "created svg"
        );
        svg
    }

    /// Creates a canvas through the configured provider. Absent or zero sizes default to
    /// 800x600.
    ///
    /// The instance is returned and remembered (see [`canvas`](Self::canvas)); the provider stays
    /// configured, so every call constructs a fresh canvas from it.
    pub fn create_canvas(
        &mut self,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Rc<dyn Canvas>> {
        let module = self
            .options
            .canvas_module
            .as_ref()
            .ok_or_else(canvas_not_installed)?;
        let version = module
            .version()
            .filter(|v| !v.is_empty())
            .ok_or_else(canvas_not_installed)?;

        let width = width.filter(|w| *w > 0).unwrap_or(DEFAULT_CANVAS_WIDTH);
        let height = height.filter(|h| *h > 0).unwrap_or(DEFAULT_CANVAS_HEIGHT);
        let constructor = CanvasConstructor::for_version(&version);
        tracing::debug!(%version, ?constructor, width, height, "creating canvas");

        let canvas = constructor.construct(&**module, width, height);
        self.canvas = Some(Rc::clone(&canvas));
        Ok(canvas)
    }

    /// The canvas created by the most recent successful [`create_canvas`](Self::create_canvas).
    pub fn canvas(&self) -> Option<Rc<dyn Canvas>> {
        self.canvas.clone()
    }

    /// Markup of the first `<svg>` under the working root, with camel-case SVG tag names
    /// restored. Empty when there is none.
    pub fn svg_string(&self) -> String {
        let svg = self
            .root
            .first()
            .and_then(|root| self.document.first_descendant_named(root, "svg"));
        match svg {
            Some(svg) => fix_xml_case(&self.document.outer_html(svg)).into_owned(),
            None => String::new(),
        }
    }

    /// The whole document, serialized as-is.
    pub fn html(&self) -> String {
        self.document.serialize()
    }

    /// Markup of the first element in the document matching the configured selector. Empty when
    /// no selector is configured or nothing matches.
    pub fn chart_html(&self) -> String {
        if self.options.selector.is_empty() {
            return String::new();
        }
        match self
            .document
            .query_selector(self.document.root(), &self.options.selector)
        {
            Ok(Some(id)) => self.document.outer_html(id),
            Ok(None) | Err(_) => String::new(),
        }
    }
}

fn canvas_not_installed() -> Error {
    Error::Configuration {
        message: "canvas capability not installed".to_string(),
    }
}

fn working_root(document: &Document, selector: &str) -> Selection {
    let Some(body) = document.body() else {
        return Selection::empty(document.clone());
    };
    if selector.is_empty() {
        return Selection::new(document.clone(), vec![body]);
    }
    match document.query_selector(body, selector) {
        Ok(Some(found)) => Selection::new(document.clone(), vec![found]),
        Ok(None) => {
            tracing::warn!(selector, "selector matched nothing; appends will be dropped");
            Selection::empty(document.clone())
        }
        Err(err) => {
            tracing::warn!(selector, error = %err, "invalid selector; appends will be dropped");
            Selection::empty(document.clone())
        }
    }
}
