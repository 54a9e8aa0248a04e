//! # Stack Node Graph
//!
//! Node graph model and link interaction protocol for visually assembling a
//! software stack: components are nodes, their typed connection points are
//! pins, and the user draws links between pins on a canvas.
//!
//! ## Features
//!
//! - **Single Id Source** - Nodes, pins and links draw from one [`IdAllocator`]
//! - **Frame-Atomic Mutation** - Links change only inside [`LinkInteraction::process_frame`]
//! - **Widget-Agnostic** - The canvas widget is reached through the [`LinkCanvas`] trait
//! - **Pluggable Policy** - Link acceptance is a [`LinkValidator`]; permissive by default
//! - **Slint Binding** - [`LinkRows`] and [`EditorSession`] feed Slint models and callbacks
//!
//! ## Quick Start
//!
//! ```
//! use stack_node_graph::{seed_default_stack, FrameEvents, GraphStore, LinkInteraction};
//!
//! let mut graph = GraphStore::default();
//! let [disk, base] = seed_default_stack(&mut graph);
//! let disk_in = graph.node(disk).unwrap().pins[0];
//! let base_out = graph.node(base).unwrap().pins[0];
//!
//! let interaction = LinkInteraction::default();
//! let mut frame = FrameEvents::new().drag(disk_in, base_out).release();
//! interaction.process_frame(&mut graph, &mut frame);
//!
//! assert_eq!(graph.link_count(), 1);
//! ```
//!
//! ## Core Types
//!
//! - [`GraphStore`] - Nodes, pins and links of the session
//! - [`LinkInteraction`] - Per-frame link creation and deletion
//! - [`LinkCanvas`] - What the protocol asks of the canvas widget
//! - [`FrameEvents`] - A recorded frame implementing [`LinkCanvas`]
//! - [`ComponentCatalog`] - Components the user can add, with [`TextFilter`] search
//! - [`EditorSession`] - Shared handle tying it together for a Slint UI

pub mod ids;
pub mod graph;
pub mod canvas;
pub mod protocol;
pub mod links;
pub mod catalog;
pub mod session;

pub use ids::{IdAllocator, LinkId, NodeId, PinId};
pub use graph::{
    GraphError, GraphStore, Link, Node, Pin, PinKind,
    // Link validation framework
    AcceptAll, BasicLinkValidator, CompositeValidator, LinkValidator, NoCyclesValidator,
    NoDuplicatesValidator, ValidationError, ValidationResult,
};
pub use canvas::{DrawnLink, FrameEvents, LinkCanvas};
pub use protocol::{apply_frame, FrameReport, InteractionConfig, LinkAddressing, LinkInteraction, RejectedLink};
pub use links::{LinkRow, LinkRows};
pub use catalog::{seed_default_stack, ComponentCatalog, ComponentTemplate, PinTemplate, TextFilter};
pub use session::EditorSession;
