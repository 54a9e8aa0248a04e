//! The graph-canvas widget seen from the core.
//!
//! The widget owns pointer handling: it knows when the user is dragging from a
//! pin, which pin is hovered, when a drag is released and when a link was
//! picked for deletion. [`LinkCanvas`] is the narrow query interface the
//! [`LinkInteraction`](crate::LinkInteraction) protocol consumes once per
//! frame; [`FrameEvents`] is a recorded frame that implements it, used for
//! replaying input and in tests.

use crate::ids::{LinkId, PinId};
use std::collections::VecDeque;

/// Per-frame queries against the canvas widget.
///
/// Per frame the protocol calls, in order:
///
/// 1. `begin_create`, then `query_new_link` and `accept_new_item` (or
///    `reject_new_item`) while creating, then always `end_create`
/// 2. `begin_delete`, then `query_deleted_link` / `accept_deleted_item`
///    until the queue is drained, then always `end_delete`
///
/// `draw_link` registers a link with the widget's visual link set and may be
/// called at any point during the frame.
pub trait LinkCanvas {
    /// True while the user drags a new link out of a pin.
    fn begin_create(&mut self) -> bool;

    /// The pin the drag started from and the pin currently hovered, either
    /// unset until the drag is over a valid target.
    fn query_new_link(&mut self) -> (Option<PinId>, Option<PinId>);

    /// True once the gesture is released over the candidate target.
    fn accept_new_item(&mut self) -> bool;

    /// Tell the widget the current candidate is refused.
    fn reject_new_item(&mut self) {}

    fn end_create(&mut self);

    /// True when the widget has deletions to report this frame.
    fn begin_delete(&mut self) -> bool;

    /// Next link the user asked to delete, `None` once drained.
    fn query_deleted_link(&mut self) -> Option<LinkId>;

    /// Whether the widget lets the last queried deletion go through.
    fn accept_deleted_item(&mut self) -> bool;

    fn end_delete(&mut self);

    fn draw_link(&mut self, id: LinkId, input: PinId, output: PinId);
}

/// A link registered through [`LinkCanvas::draw_link`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DrawnLink {
    pub id: LinkId,
    pub input: PinId,
    pub output: PinId,
}

/// One frame of widget answers, built up front and replayed.
///
/// ```
/// use stack_node_graph::{FrameEvents, PinId};
///
/// // Drag from pin 2 onto pin 4 and let go
/// let frame = FrameEvents::new()
///     .drag(PinId::from_raw(2), PinId::from_raw(4))
///     .release();
/// assert!(frame.is_creating());
/// ```
#[derive(Clone, Debug, Default)]
pub struct FrameEvents {
    creating: bool,
    start: Option<PinId>,
    hovered: Option<PinId>,
    released: bool,
    deleting: bool,
    deletions: VecDeque<(LinkId, bool)>,
    last_confirmation: Option<bool>,
    drawn: Vec<DrawnLink>,
    rejections: usize,
}

impl FrameEvents {
    /// A frame without any link gesture.
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag that started on `pin` and is not over any target yet.
    pub fn drag_from(mut self, pin: PinId) -> Self {
        self.creating = true;
        self.start = Some(pin);
        self
    }

    /// The ongoing drag hovers `pin`.
    pub fn hover(mut self, pin: PinId) -> Self {
        self.creating = true;
        self.hovered = Some(pin);
        self
    }

    /// Shorthand for `drag_from(start).hover(target)`.
    pub fn drag(self, start: PinId, target: PinId) -> Self {
        self.drag_from(start).hover(target)
    }

    /// The drag is released this frame.
    pub fn release(mut self) -> Self {
        self.released = true;
        self
    }

    /// The user deletes `id` and the widget confirms it.
    pub fn delete(mut self, id: LinkId) -> Self {
        self.deleting = true;
        self.deletions.push_back((id, true));
        self
    }

    /// The user deletes `id` but the widget vetoes it.
    pub fn delete_vetoed(mut self, id: LinkId) -> Self {
        self.deleting = true;
        self.deletions.push_back((id, false));
        self
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Links registered with the widget so far, in call order.
    pub fn drawn(&self) -> &[DrawnLink] {
        &self.drawn
    }

    /// How many candidates were refused this frame.
    pub fn rejections(&self) -> usize {
        self.rejections
    }
}

impl LinkCanvas for FrameEvents {
    fn begin_create(&mut self) -> bool {
        self.creating
    }

    fn query_new_link(&mut self) -> (Option<PinId>, Option<PinId>) {
        (self.start, self.hovered)
    }

    fn accept_new_item(&mut self) -> bool {
        self.released
    }

    fn reject_new_item(&mut self) {
        self.rejections += 1;
    }

    fn end_create(&mut self) {}

    fn begin_delete(&mut self) -> bool {
        self.deleting
    }

    fn query_deleted_link(&mut self) -> Option<LinkId> {
        let (id, confirmed) = self.deletions.pop_front()?;
        self.last_confirmation = Some(confirmed);
        Some(id)
    }

    fn accept_deleted_item(&mut self) -> bool {
        self.last_confirmation.take().unwrap_or(false)
    }

    fn end_delete(&mut self) {}

    fn draw_link(&mut self, id: LinkId, input: PinId, output: PinId) {
        self.drawn.push(DrawnLink { id, input, output });
    }
}
