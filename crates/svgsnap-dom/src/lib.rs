#![forbid(unsafe_code)]

//! In-memory document emulation for headless SVG/HTML generation.
//!
//! A [`Document`] is a shared handle over a `scraper` tree: markup is parsed by html5ever,
//! selectors are matched by Servo's `selectors` engine and serialization follows the HTML
//! fragment serialization algorithm. On top of that the handle adds what chart-building code
//! needs from a browser DOM:
//! - element creation, attributes and text content
//! - `querySelector` / `querySelectorAll` scoped to a node
//! - `outerHTML` / `innerHTML` and full-document serialization
//!
//! Element names are lower-cased on creation, the same way browser-emulation libraries treat
//! elements created in an HTML document. Camel-case SVG names therefore do not round-trip.

pub mod error;
pub mod selector;
mod tree;

pub use error::{Error, Result};
pub use selector::Selector;
pub use tree::{Document, Namespace, NodeId, NodeKind};
