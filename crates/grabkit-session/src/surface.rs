#![forbid(unsafe_code)]

//! The collaborator boundary of an interaction session.
//!
//! A session never touches the DOM (or whatever the host renders into). Every
//! read of element state and every side effect goes through
//! [`InteractionSurface`], implemented once per host. Tests implement it with
//! a recording double.

use grabkit_core::{ElementId, OffsetBox, Pivot, PointerDelta, Rect};

/// Errors reported by fallible surface operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The element left the document while an operation was pending.
    #[error("element {0} is detached")]
    Detached(ElementId),
    /// A collaborator operation failed.
    #[error("{operation} failed: {reason}")]
    Failed {
        operation: &'static str,
        reason: String,
    },
}

/// CSS `position` of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Positioning {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl Positioning {
    /// Whether the surface is taken out of the document flow.
    #[must_use]
    pub const fn is_out_of_flow(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }
}

/// Host-side element access for one interactive surface.
pub trait InteractionSurface {
    /// The component element owning the session.
    fn owner(&self) -> ElementId;

    /// The manipulable element (ancestor or self), if any resolves.
    fn resolve_interaction_surface(&mut self) -> Option<ElementId>;

    /// Host component of `element`.
    fn resolve_host_of(&self, element: ElementId) -> Option<ElementId>;

    /// Attribute value of `element`.
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Inline `transform` style of `element`.
    fn transform(&self, element: ElementId) -> Option<String>;

    fn offset_box(&self, element: ElementId) -> OffsetBox;

    /// Current viewport rectangle.
    fn bounding_rect(&self) -> Rect;

    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }

    fn positioning(&self) -> Positioning {
        Positioning::Static
    }

    /// Set or remove the grabbed indicator attribute on `element`.
    fn set_grabbed(&mut self, element: ElementId, grabbed: bool);

    /// Mirror the grabbed state onto the owner's attribute alias.
    fn reflect_grabbed(&mut self, grabbed: bool);

    /// Clamp `element` into the visible viewport.
    fn fit_to_viewport(&mut self, element: ElementId) -> Result<(), SurfaceError>;

    /// Stretch `element` over the available space, honoring `pivot`.
    fn stretch_to_fill(
        &mut self,
        element: ElementId,
        pivot: Option<Pivot>,
    ) -> Result<(), SurfaceError>;

    /// Ask the host for a global layout update.
    fn request_layout_update(&mut self, flag: bool);

    /// Track `element` as the current element for keyboard routing.
    fn set_current_element(&mut self, element: Option<ElementId>);

    fn active_element(&self) -> Option<ElementId>;

    /// Whether `element` lies within this surface's component.
    fn is_component_context(&self, element: ElementId) -> bool;

    fn blur(&mut self, element: ElementId);

    /// Per-frame hook receiving the pointer delta since the drag started.
    fn on_frame_update(&mut self, delta: PointerDelta) -> PointerDelta {
        delta
    }
}
