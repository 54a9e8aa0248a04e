//! Test harness mirroring the configurator's starting canvas.
//!
//! Seeds the default stack plus a Systemd component and names their pins so
//! tests can script gestures without digging through the store.

#![allow(dead_code)]

use stack_node_graph::{
    EditorSession, FrameEvents, FrameReport, InteractionConfig, LinkAddressing, LinkId,
    LinkInteraction, LinkValidator, NodeId, PinId,
};

pub struct StackHarness {
    pub session: EditorSession,
    pub disk: NodeId,
    pub base: NodeId,
    pub systemd: NodeId,
    /// "Physical Disk 1" input
    pub disk_in: PinId,
    /// "Linux Base System" output
    pub base_out: PinId,
    pub systemd_in: PinId,
    pub systemd_out: PinId,
}

impl StackHarness {
    /// Stable link ids, permissive policy.
    pub fn new() -> Self {
        Self::with_interaction(LinkInteraction::default())
    }

    /// Links addressed by display index.
    pub fn display_indexed() -> Self {
        Self::with_interaction(LinkInteraction::new(
            InteractionConfig::default().with_addressing(LinkAddressing::DisplayIndex),
        ))
    }

    pub fn with_validator<V: LinkValidator + 'static>(validator: V) -> Self {
        Self::with_interaction(LinkInteraction::default().with_validator(validator))
    }

    pub fn with_interaction(interaction: LinkInteraction) -> Self {
        let session = EditorSession::with_interaction(interaction);
        let [disk, base] = session.seed_default_stack();
        let systemd = session.add_component("Systemd").unwrap();

        let pin = |node: NodeId, index: usize| session.with_graph(|g| g.node(node).unwrap().pins[index]);
        let disk_in = pin(disk, 0);
        let base_out = pin(base, 0);
        let systemd_in = pin(systemd, 0);
        let systemd_out = pin(systemd, 1);

        Self {
            session,
            disk,
            base,
            systemd,
            disk_in,
            base_out,
            systemd_in,
            systemd_out,
        }
    }

    /// Drag from `start` onto `target` and release.
    pub fn connect(&self, start: PinId, target: PinId) -> FrameReport {
        self.session
            .frame(&mut FrameEvents::new().drag(start, target).release())
    }

    /// Deletion of `id` as the widget reports it, confirmed.
    pub fn delete(&self, id: LinkId) -> FrameReport {
        self.session.frame(&mut FrameEvents::new().delete(id))
    }

    /// Pin pairs of the current links, in display order.
    pub fn link_pairs(&self) -> Vec<(PinId, PinId)> {
        self.session.with_graph(|g| {
            g.links()
                .iter()
                .map(|l| (l.input_pin, l.output_pin))
                .collect()
        })
    }

    pub fn link_ids(&self) -> Vec<LinkId> {
        self.session
            .with_graph(|g| g.links().iter().map(|l| l.id).collect())
    }
}
