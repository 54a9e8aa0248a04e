//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use stack_node_graph::{FrameEvents, LinkCanvas, LinkId, PinId};

/// One call the protocol made on the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CanvasCall {
    BeginCreate,
    QueryNewLink,
    AcceptNewItem,
    RejectNewItem,
    EndCreate,
    BeginDelete,
    QueryDeletedLink,
    AcceptDeletedItem,
    EndDelete,
    DrawLink(LinkId, PinId, PinId),
}

/// Canvas that answers from a recorded frame and logs every call.
pub struct TracingCanvas {
    pub frame: FrameEvents,
    pub calls: Vec<CanvasCall>,
}

impl TracingCanvas {
    pub fn new(frame: FrameEvents) -> Self {
        Self {
            frame,
            calls: Vec::new(),
        }
    }
}

impl LinkCanvas for TracingCanvas {
    fn begin_create(&mut self) -> bool {
        self.calls.push(CanvasCall::BeginCreate);
        self.frame.begin_create()
    }

    fn query_new_link(&mut self) -> (Option<PinId>, Option<PinId>) {
        self.calls.push(CanvasCall::QueryNewLink);
        self.frame.query_new_link()
    }

    fn accept_new_item(&mut self) -> bool {
        self.calls.push(CanvasCall::AcceptNewItem);
        self.frame.accept_new_item()
    }

    fn reject_new_item(&mut self) {
        self.calls.push(CanvasCall::RejectNewItem);
        self.frame.reject_new_item();
    }

    fn end_create(&mut self) {
        self.calls.push(CanvasCall::EndCreate);
        self.frame.end_create();
    }

    fn begin_delete(&mut self) -> bool {
        self.calls.push(CanvasCall::BeginDelete);
        self.frame.begin_delete()
    }

    fn query_deleted_link(&mut self) -> Option<LinkId> {
        self.calls.push(CanvasCall::QueryDeletedLink);
        self.frame.query_deleted_link()
    }

    fn accept_deleted_item(&mut self) -> bool {
        self.calls.push(CanvasCall::AcceptDeletedItem);
        self.frame.accept_deleted_item()
    }

    fn end_delete(&mut self) {
        self.calls.push(CanvasCall::EndDelete);
        self.frame.end_delete();
    }

    fn draw_link(&mut self, id: LinkId, input: PinId, output: PinId) {
        self.calls.push(CanvasCall::DrawLink(id, input, output));
        self.frame.draw_link(id, input, output);
    }
}
