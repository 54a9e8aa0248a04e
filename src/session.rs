//! High-level session handle for configurator applications.
//!
//! [`EditorSession`] owns the graph, the link protocol, the drawable link rows
//! and the component catalog in one place, and hands out callbacks for a Slint
//! UI. The frame driver calls [`EditorSession::frame`] once per frame after
//! delivering input to the canvas widget and before drawing.
//!
//! # Example
//!
//! ```ignore
//! use stack_node_graph::{EditorSession, InteractionConfig};
//!
//! let session = EditorSession::seeded(InteractionConfig::default());
//! let links = Rc::new(VecModel::<LinkData>::default());
//! session.bind_link_model(links.clone(), |row| LinkData { /* .. */ });
//! window.set_links(ModelRc::from(links));
//!
//! window.on_component_selected(session.component_selected_callback());
//! window.on_search_changed({
//!     let session = session.clone();
//!     let w = window.as_weak();
//!     move |text| {
//!         if let Some(w) = w.upgrade() {
//!             w.set_components(session.filtered_components(&text));
//!         }
//!     }
//! });
//!
//! // In the render loop, with the widget for this frame:
//! session.draw(&mut canvas);
//! session.frame(&mut canvas);
//! ```

use crate::canvas::LinkCanvas;
use crate::catalog::{seed_default_stack, ComponentCatalog, TextFilter};
use crate::graph::GraphStore;
use crate::ids::NodeId;
use crate::links::{LinkRow, LinkRows};
use crate::protocol::{FrameReport, InteractionConfig, LinkInteraction};
use slint::{ModelRc, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to one editing session.
///
/// Clone this to share it across callbacks; all clones see the same graph.
#[derive(Clone)]
pub struct EditorSession {
    graph: Rc<RefCell<GraphStore>>,
    interaction: Rc<LinkInteraction>,
    rows: Rc<RefCell<LinkRows>>,
    catalog: Rc<ComponentCatalog>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl EditorSession {
    /// Create an empty session with the built-in catalog.
    pub fn new(config: InteractionConfig) -> Self {
        Self::with_interaction(LinkInteraction::new(config))
    }

    /// Create an empty session around a configured protocol, e.g. one with a
    /// stricter validator.
    pub fn with_interaction(interaction: LinkInteraction) -> Self {
        Self {
            graph: Rc::new(RefCell::new(GraphStore::default())),
            interaction: Rc::new(interaction),
            rows: Rc::new(RefCell::new(LinkRows::new())),
            catalog: Rc::new(ComponentCatalog::builtin()),
        }
    }

    /// Create a session holding the default starting stack.
    pub fn seeded(config: InteractionConfig) -> Self {
        let session = Self::new(config);
        session.seed_default_stack();
        session
    }

    /// Place the default starting stack. Returns `[disk, base_system]`.
    pub fn seed_default_stack(&self) -> [NodeId; 2] {
        seed_default_stack(&mut self.graph.borrow_mut())
    }

    /// Replace the catalog offered by [`add_component`](Self::add_component).
    pub fn with_catalog(mut self, catalog: ComponentCatalog) -> Self {
        self.catalog = Rc::new(catalog);
        self
    }

    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    pub fn interaction(&self) -> &LinkInteraction {
        &self.interaction
    }

    /// Run `f` against the current graph.
    pub fn with_graph<R>(&self, f: impl FnOnce(&GraphStore) -> R) -> R {
        f(&self.graph.borrow())
    }

    // === Per-frame entry points ===

    /// Register the current links with the canvas widget.
    pub fn draw<C: LinkCanvas + ?Sized>(&self, canvas: &mut C) {
        self.interaction.draw_links(&self.graph.borrow(), canvas);
    }

    /// Apply this frame's link gestures, then refresh bound link rows so the
    /// frame's draw pass already shows the result.
    pub fn frame<C: LinkCanvas + ?Sized>(&self, canvas: &mut C) -> FrameReport {
        let report = self
            .interaction
            .process_frame(&mut self.graph.borrow_mut(), canvas);
        if report.changed_graph() {
            self.sync_rows();
        }
        report
    }

    // === Components ===

    /// Place the catalog component called `name`. Returns `None` if the
    /// catalog has no such entry.
    pub fn add_component(&self, name: &str) -> Option<NodeId> {
        let template = self.catalog.get(name)?;
        let id = self.graph.borrow_mut().add_node_from(template);
        log::debug!("added component {:?} as {}", name, id);
        Some(id)
    }

    /// Catalog names passing the search text, for the popup list.
    pub fn filtered_components(&self, search: &str) -> ModelRc<SharedString> {
        let filter = TextFilter::parse(search);
        let names: Vec<SharedString> = self
            .catalog
            .search(&filter)
            .map(|t| SharedString::from(t.name.as_str()))
            .collect();
        ModelRc::from(Rc::new(VecModel::from(names)))
    }

    // === Link rows ===

    /// Bind a Slint model that mirrors the link rows from now on.
    pub fn bind_link_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&LinkRow) -> P + 'static,
    {
        self.sync_rows();
        self.rows.borrow_mut().bind_model(model, constructor);
    }

    /// Set the color used for link rows.
    pub fn set_link_color(&self, color: slint::Color) {
        self.rows.borrow_mut().set_color(color);
        self.sync_rows();
    }

    /// Snapshot of the link rows as last synced.
    pub fn link_rows(&self) -> Vec<LinkRow> {
        self.rows.borrow().rows().to_vec()
    }

    fn sync_rows(&self) {
        self.rows
            .borrow_mut()
            .sync(&self.graph.borrow(), &self.interaction);
    }

    // === Callback factories ===

    /// Returns a callback for the component popup's selection.
    pub fn component_selected_callback(&self) -> impl Fn(SharedString) {
        let session = self.clone();
        move |name| {
            if session.add_component(name.as_str()).is_none() {
                log::warn!("no catalog entry named {:?}", name.as_str());
            }
        }
    }
}
