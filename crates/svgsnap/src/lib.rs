#![forbid(unsafe_code)]

//! `svgsnap` lets chart-building code render into a simulated document and captures the result
//! as an SVG or HTML string, without a browser.
//!
//! ```
//! use svgsnap::{SnapOptions, SvgSnap};
//!
//! let snap = SvgSnap::new(SnapOptions::new().with_styles("circle { stroke: red; }"));
//! let svg = snap.create_svg(Some(200.0), Some(200.0));
//! svg.append("circle").attr("cx", 100).attr("cy", 100).attr("r", 80);
//! assert!(snap.svg_string().starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
//! ```
//!
//! The document emulation lives in [`svgsnap_dom`]; this crate adds the adapter, the
//! selection API and the canvas provider seam.

pub mod canvas;
pub mod error;
pub mod options;
pub mod selection;
mod snap;
pub mod xml_case;

pub use canvas::{Canvas, CanvasConstructor, CanvasModule};
pub use error::{Error, Result};
pub use options::SnapOptions;
pub use selection::{AttrValue, Selection};
pub use snap::{SVG_NAMESPACE, SvgSnap};
pub use xml_case::fix_xml_case;

pub use svgsnap_dom as dom;
