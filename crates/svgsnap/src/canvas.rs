//! Canvas construction through an injected provider.
//!
//! Canvas libraries changed their constructor shape at major version 2: older releases are
//! constructed directly, newer ones through a namespaced constructor. A provider exposes both
//! paths and its version; [`CanvasConstructor::for_version`] picks the path.

use std::any::Any;
use std::rc::Rc;

/// A canvas instance created by a [`CanvasModule`].
pub trait Canvas: Any {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn as_any(&self) -> &dyn Any;
}

/// A canvas-construction capability.
pub trait CanvasModule {
    /// Version marker of the provider, e.g. `"2.11.2"`. `None` or an empty string means the
    /// provider cannot be used.
    fn version(&self) -> Option<String>;

    /// Constructor path of providers at major version 2 and later.
    fn namespaced_canvas(&self, width: u32, height: u32) -> Rc<dyn Canvas>;

    /// Constructor path of providers before major version 2.
    fn direct_canvas(&self, width: u32, height: u32) -> Rc<dyn Canvas>;
}

pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasConstructor {
    Namespaced,
    Direct,
}

impl CanvasConstructor {
    /// Major version >= 2 selects the namespaced constructor; anything else, including a
    /// version without a leading integer, selects the direct one.
    pub fn for_version(version: &str) -> Self {
        match major_version(version) {
            Some(major) if major >= 2 => Self::Namespaced,
            _ => Self::Direct,
        }
    }

    pub(crate) fn construct(
        self,
        module: &dyn CanvasModule,
        width: u32,
        height: u32,
    ) -> Rc<dyn Canvas> {
        match self {
            Self::Namespaced => module.namespaced_canvas(width, height),
            Self::Direct => module.direct_canvas(width, height),
        }
    }
}

/// Leading integer of a version string, read the way `parseInt` reads it.
fn major_version(version: &str) -> Option<i64> {
    let s = version.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}
