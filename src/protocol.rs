//! Per-frame link creation and deletion.
//!
//! [`LinkInteraction`] reconciles the canvas widget's drag state with the
//! [`GraphStore`] once per frame, after input has reached the widget and
//! before the frame is drawn. Nothing here is fatal: a candidate that is never
//! released leaves no trace, and a deletion for a link that does not exist is
//! logged and skipped.

use crate::canvas::{FrameEvents, LinkCanvas};
use crate::graph::{AcceptAll, GraphError, GraphStore, Link, LinkValidator, ValidationError, ValidationResult};
use crate::ids::{LinkId, PinId};

/// How links are identified towards the canvas widget.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LinkAddressing {
    /// Links are drawn and deleted by their allocator-issued [`LinkId`].
    /// A link keeps its id when links before it are removed.
    #[default]
    Stable,
    /// Links are drawn with their position in [`GraphStore::links`] as id and
    /// a deletion removes whatever link sits at that position. Ids handed to
    /// the widget go stale after any removal before them.
    DisplayIndex,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionConfig {
    pub addressing: LinkAddressing,
}

impl InteractionConfig {
    pub fn with_addressing(mut self, addressing: LinkAddressing) -> Self {
        self.addressing = addressing;
        self
    }
}

/// A candidate the validator refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedLink {
    pub input: PinId,
    pub output: PinId,
    pub reason: ValidationError,
}

/// What one frame did to the graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Ids of links committed this frame
    pub created: Vec<LinkId>,
    /// Links removed this frame
    pub deleted: Vec<Link>,
    pub rejected: Vec<RejectedLink>,
    /// Confirmed deletions that matched no link
    pub missed: Vec<LinkId>,
}

impl FrameReport {
    /// True if links were added or removed.
    pub fn changed_graph(&self) -> bool {
        !self.created.is_empty() || !self.deleted.is_empty()
    }
}

/// The link creation/deletion protocol.
///
/// ```
/// use stack_node_graph::{FrameEvents, GraphStore, LinkInteraction, PinKind};
///
/// let mut graph = GraphStore::default();
/// let disk = graph.add_node("Physical Disk 1", [PinKind::Input]);
/// let base = graph.add_node("Linux Base System", [PinKind::Output]);
/// let from = graph.node(disk).unwrap().pins[0];
/// let to = graph.node(base).unwrap().pins[0];
///
/// let interaction = LinkInteraction::default();
/// let mut frame = FrameEvents::new().drag(from, to).release();
/// let report = interaction.process_frame(&mut graph, &mut frame);
///
/// assert_eq!(report.created.len(), 1);
/// assert_eq!(graph.links()[0].input_pin, from);
/// ```
pub struct LinkInteraction {
    config: InteractionConfig,
    validator: Box<dyn LinkValidator>,
}

impl Default for LinkInteraction {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl LinkInteraction {
    /// Create a protocol that accepts every candidate.
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            validator: Box::new(AcceptAll),
        }
    }

    /// Replace the acceptance policy.
    pub fn with_validator<V: LinkValidator + 'static>(mut self, validator: V) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn config(&self) -> InteractionConfig {
        self.config
    }

    /// Id under which the link at `index` is known to the widget.
    pub fn display_id(&self, index: usize, link: &Link) -> LinkId {
        match self.config.addressing {
            LinkAddressing::Stable => link.id,
            LinkAddressing::DisplayIndex => LinkId::from_display_index(index),
        }
    }

    /// Register every link with the widget, in display order.
    pub fn draw_links<C: LinkCanvas + ?Sized>(&self, graph: &GraphStore, canvas: &mut C) {
        for (index, link) in graph.links().iter().enumerate() {
            canvas.draw_link(self.display_id(index, link), link.input_pin, link.output_pin);
        }
    }

    /// Run the creation and then the deletion sub-protocol for one frame.
    pub fn process_frame<C: LinkCanvas + ?Sized>(&self, graph: &mut GraphStore, canvas: &mut C) -> FrameReport {
        let mut report = FrameReport::default();
        self.process_creation(graph, canvas, &mut report);
        self.process_deletion(graph, canvas, &mut report);
        report
    }

    fn process_creation<C: LinkCanvas + ?Sized>(&self, graph: &mut GraphStore, canvas: &mut C, report: &mut FrameReport) {
        if canvas.begin_create() {
            if let (Some(input), Some(output)) = canvas.query_new_link() {
                match self.validator.validate(input, output, graph) {
                    ValidationResult::Valid => {
                        if canvas.accept_new_item() {
                            let id = graph.add_link(input, output);
                            let index = graph.link_count() - 1;
                            // Draw right away so the link shows up this frame
                            canvas.draw_link(self.display_id(index, &graph.links()[index]), input, output);
                            log::debug!("created {} from {} to {}", id, input, output);
                            report.created.push(id);
                        }
                    }
                    ValidationResult::Invalid(reason) => {
                        log::trace!("refusing link from {} to {}: {}", input, output, reason);
                        canvas.reject_new_item();
                        report.rejected.push(RejectedLink {
                            input,
                            output,
                            reason,
                        });
                    }
                }
            }
        }
        canvas.end_create();
    }

    fn process_deletion<C: LinkCanvas + ?Sized>(&self, graph: &mut GraphStore, canvas: &mut C, report: &mut FrameReport) {
        if canvas.begin_delete() {
            while let Some(id) = canvas.query_deleted_link() {
                if !canvas.accept_deleted_item() {
                    log::trace!("widget kept {}", id);
                    continue;
                }
                match self.remove(graph, id) {
                    Ok(link) => {
                        log::debug!("deleted {}", link.id);
                        report.deleted.push(link);
                    }
                    Err(err) => {
                        log::debug!("ignoring deletion of {}: {}", id, err);
                        report.missed.push(id);
                    }
                }
            }
        }
        canvas.end_delete();
    }

    fn remove(&self, graph: &mut GraphStore, id: LinkId) -> Result<Link, GraphError> {
        match self.config.addressing {
            LinkAddressing::Stable => graph.remove_link(id),
            LinkAddressing::DisplayIndex => {
                let index = usize::try_from(id.get()).map_err(|_| GraphError::LinkNotFound(id))?;
                graph.remove_link_by_display_index(index)
            }
        }
    }
}

/// One frame as a value transformation: draw the current links, then apply
/// the recorded gestures.
pub fn apply_frame(
    mut graph: GraphStore,
    interaction: &LinkInteraction,
    mut events: FrameEvents,
) -> (GraphStore, FrameReport) {
    interaction.draw_links(&graph, &mut events);
    let report = interaction.process_frame(&mut graph, &mut events);
    (graph, report)
}
