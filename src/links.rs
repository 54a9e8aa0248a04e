//! Drawable link rows for a Slint UI.
//!
//! [`LinkRows`] mirrors the store's link sequence into rows the UI can bind
//! to, using the same ids the [`LinkInteraction`] hands to the canvas widget.
//!
//! # Example
//!
//! ```ignore
//! use stack_node_graph::{LinkRows, LinkInteraction};
//!
//! let mut rows = LinkRows::new();
//! let model = Rc::new(VecModel::<LinkData>::default());
//! rows.bind_model(model.clone(), |row| LinkData {
//!     id: row.id.get() as i32,
//!     start_pin_id: row.output.get() as i32,
//!     end_pin_id: row.input.get() as i32,
//!     color: row.color,
//! });
//! window.set_links(ModelRc::from(model));
//!
//! // After every frame that changed the graph
//! rows.sync(&graph, &interaction);
//! ```

use crate::graph::GraphStore;
use crate::ids::{LinkId, PinId};
use crate::protocol::LinkInteraction;
use slint::{Color, Model, ModelRc, VecModel};
use std::rc::Rc;

/// One link as the UI draws it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinkRow {
    /// Id known to the canvas widget
    pub id: LinkId,
    pub input: PinId,
    pub output: PinId,
    pub color: Color,
}

/// Internal trait for auto-syncing to Slint models.
trait ModelSyncer {
    fn sync(&self, rows: &[LinkRow]);
}

struct ConcreteModelSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> ModelSyncer for ConcreteModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&LinkRow) -> P,
{
    fn sync(&self, rows: &[LinkRow]) {
        write_rows(&self.model, rows, &self.constructor);
    }
}

/// Update existing rows in place, append new ones, drop the excess tail.
fn write_rows<P, F>(model: &VecModel<P>, rows: &[LinkRow], constructor: F)
where
    P: Clone + 'static,
    F: Fn(&LinkRow) -> P,
{
    for (i, row) in rows.iter().enumerate() {
        let item = constructor(row);
        if i < model.row_count() {
            model.set_row_data(i, item);
        } else {
            model.push(item);
        }
    }
    while model.row_count() > rows.len() {
        model.remove(model.row_count() - 1);
    }
}

/// Link rows in display order, optionally pushed into a bound Slint model.
pub struct LinkRows {
    rows: Vec<LinkRow>,
    color: Color,
    syncer: Option<Box<dyn ModelSyncer>>,
}

impl Default for LinkRows {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkRows {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            color: Color::from_rgb_u8(255, 255, 255),
            syncer: None,
        }
    }

    /// Set the color for links (default: white). Applies from the next sync.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Bind to a Slint model; every [`sync`](Self::sync) rewrites it.
    pub fn bind_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&LinkRow) -> P + 'static,
    {
        write_rows(&model, &self.rows, &constructor);
        self.syncer = Some(Box::new(ConcreteModelSyncer { model, constructor }));
    }

    /// Rebuild the rows from the store's current links.
    pub fn sync(&mut self, graph: &GraphStore, interaction: &LinkInteraction) {
        self.rows.clear();
        for (index, link) in graph.links().iter().enumerate() {
            self.rows.push(LinkRow {
                id: interaction.display_id(index, link),
                input: link.input_pin,
                output: link.output_pin,
                color: self.color,
            });
        }

        if let Some(syncer) = &self.syncer {
            syncer.sync(&self.rows);
        }
    }

    pub fn rows(&self) -> &[LinkRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build a fresh, unbound model from the current rows.
    pub fn create_model<P, F>(&self, constructor: F) -> ModelRc<P>
    where
        P: Clone + 'static,
        F: Fn(&LinkRow) -> P,
    {
        let items: Vec<P> = self.rows.iter().map(constructor).collect();
        ModelRc::from(Rc::new(VecModel::from(items)))
    }
}
