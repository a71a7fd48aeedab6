//! Recording `InteractionSurface` shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use grabkit_core::{ElementId, OffsetBox, Pivot, PointerDelta, Rect};
use grabkit_session::{InteractionSurface, Positioning, SurfaceError};

pub const OWNER: ElementId = ElementId::new(1);
pub const CONTEXT: ElementId = ElementId::new(2);
pub const HANDLE: ElementId = ElementId::new(3);
pub const OUTSIDE: ElementId = ElementId::new(99);

#[derive(Debug)]
pub struct RecordingSurface {
    pub owner: ElementId,
    pub context: Option<ElementId>,
    pub viewport: Rect,
    pub dpr: f64,
    pub positioning: Positioning,
    pub attributes: HashMap<(ElementId, String), String>,
    pub transform: Option<String>,
    pub offset: OffsetBox,
    pub fail_fit: bool,
    pub active: Option<ElementId>,

    pub grabbed_calls: Vec<(ElementId, bool)>,
    pub reflected: Vec<bool>,
    pub deltas: Vec<PointerDelta>,
    pub fits: Vec<ElementId>,
    pub stretches: Vec<(ElementId, Option<Pivot>)>,
    pub layout_updates: Vec<bool>,
    pub current: Option<ElementId>,
    pub current_history: Vec<Option<ElementId>>,
    pub blurred: Vec<ElementId>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            owner: OWNER,
            context: Some(CONTEXT),
            viewport: Rect::from_size(1000.0, 800.0),
            dpr: 1.0,
            positioning: Positioning::Static,
            attributes: HashMap::new(),
            transform: None,
            offset: OffsetBox::default(),
            fail_fit: false,
            active: None,
            grabbed_calls: Vec::new(),
            reflected: Vec::new(),
            deltas: Vec::new(),
            fits: Vec::new(),
            stretches: Vec::new(),
            layout_updates: Vec::new(),
            current: None,
            current_history: Vec::new(),
            blurred: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, element: ElementId, name: &str, value: &str) -> Self {
        self.attributes
            .insert((element, name.to_owned()), value.to_owned());
        self
    }

    pub fn with_positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = positioning;
        self
    }

    pub fn without_context(mut self) -> Self {
        self.context = None;
        self
    }

    /// Last grabbed value set on `element`.
    pub fn grabbed(&self, element: ElementId) -> Option<bool> {
        self.grabbed_calls
            .iter()
            .rev()
            .find(|(e, _)| *e == element)
            .map(|(_, g)| *g)
    }
}

impl InteractionSurface for RecordingSurface {
    fn owner(&self) -> ElementId {
        self.owner
    }

    fn resolve_interaction_surface(&mut self) -> Option<ElementId> {
        self.context
    }

    fn resolve_host_of(&self, _element: ElementId) -> Option<ElementId> {
        Some(self.owner)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.attributes.get(&(element, name.to_owned())).cloned()
    }

    fn transform(&self, _element: ElementId) -> Option<String> {
        self.transform.clone()
    }

    fn offset_box(&self, _element: ElementId) -> OffsetBox {
        self.offset
    }

    fn bounding_rect(&self) -> Rect {
        self.viewport
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn positioning(&self) -> Positioning {
        self.positioning
    }

    fn set_grabbed(&mut self, element: ElementId, grabbed: bool) {
        self.grabbed_calls.push((element, grabbed));
    }

    fn reflect_grabbed(&mut self, grabbed: bool) {
        self.reflected.push(grabbed);
    }

    fn fit_to_viewport(&mut self, element: ElementId) -> Result<(), SurfaceError> {
        self.fits.push(element);
        if self.fail_fit {
            return Err(SurfaceError::Failed {
                operation: "fit_to_viewport",
                reason: "layout unavailable".into(),
            });
        }
        Ok(())
    }

    fn stretch_to_fill(
        &mut self,
        element: ElementId,
        pivot: Option<Pivot>,
    ) -> Result<(), SurfaceError> {
        self.stretches.push((element, pivot));
        Ok(())
    }

    fn request_layout_update(&mut self, flag: bool) {
        self.layout_updates.push(flag);
    }

    fn set_current_element(&mut self, element: Option<ElementId>) {
        self.current = element;
        self.current_history.push(element);
    }

    fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn is_component_context(&self, element: ElementId) -> bool {
        element != OUTSIDE
    }

    fn blur(&mut self, element: ElementId) {
        self.blurred.push(element);
    }

    fn on_frame_update(&mut self, delta: PointerDelta) -> PointerDelta {
        self.deltas.push(delta);
        delta
    }
}
