// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display surface identification.
//!
//! [`DisplaySurface`] names the drawing area child views are inserted into.
//! The host creates and destroys surfaces; the stack only keeps the handle and
//! the frame it was last told about.

use core::fmt;

use kurbo::Rect;

/// Identifies a display surface.
///
/// Hosts assign surface ids; core code passes them through without
/// interpreting the value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SurfaceId(pub u32);

impl fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceId({})", self.0)
    }
}

/// A non-owning reference to the host's display surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplaySurface {
    /// Host-assigned identity.
    pub id: SurfaceId,
    /// Frame every child view is laid out in.
    pub frame: Rect,
}

impl DisplaySurface {
    /// Creates a surface handle.
    #[inline]
    #[must_use]
    pub const fn new(id: SurfaceId, frame: Rect) -> Self {
        Self { id, frame }
    }
}
