//! Catalog of stack components that can be placed on the canvas.
//!
//! The catalog is what the "add a component" popup lists and filters. Picking
//! an entry hands its [`ComponentTemplate`] to
//! [`GraphStore::add_node_from`](crate::GraphStore::add_node_from).

use crate::graph::{GraphStore, PinKind};
use crate::ids::NodeId;

/// A pin a component exposes when placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinTemplate {
    pub kind: PinKind,
    pub label: String,
}

impl PinTemplate {
    pub fn new(kind: PinKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}

/// Everything needed to create a node for one component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentTemplate {
    pub name: String,
    pub description: Option<String>,
    pub pins: Vec<PinTemplate>,
}

impl ComponentTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            pins: Vec::new(),
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn pin(mut self, kind: PinKind, label: impl Into<String>) -> Self {
        self.pins.push(PinTemplate::new(kind, label));
        self
    }
}

const BASE_SYSTEM_DESCRIPTION: &str =
    "Includes the core functionality to boot a minimal Linux system.";

/// Ordered list of the components a user can add.
#[derive(Clone, Debug, Default)]
pub struct ComponentCatalog {
    entries: Vec<ComponentTemplate>,
}

impl ComponentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The components shipped with the configurator.
    pub fn builtin() -> Self {
        Self::new()
            .with(
                ComponentTemplate::new("Chromium")
                    .pin(PinKind::Input, "Display")
                    .pin(PinKind::Input, "System"),
            )
            .with(
                ComponentTemplate::new("Linux Base System")
                    .description(BASE_SYSTEM_DESCRIPTION)
                    .pin(PinKind::Input, "Disk")
                    .pin(PinKind::Output, "Output ->"),
            )
            .with(
                ComponentTemplate::new("Systemd")
                    .pin(PinKind::Input, "Base")
                    .pin(PinKind::Output, "Services ->"),
            )
            .with(
                ComponentTemplate::new("Wayland Window System")
                    .pin(PinKind::Input, "Services")
                    .pin(PinKind::Output, "Display ->"),
            )
            .with(
                ComponentTemplate::new("Genesis Desktop")
                    .pin(PinKind::Input, "Display")
                    .pin(PinKind::Output, "Session ->"),
            )
    }

    /// Append an entry. [`get`](Self::get) returns the first entry with a
    /// matching name.
    pub fn with(mut self, template: ComponentTemplate) -> Self {
        self.entries.push(template);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ComponentTemplate> {
        self.entries.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|t| t.name.as_str())
    }

    /// Entries passing `filter`, in catalog order.
    pub fn search<'a>(&'a self, filter: &'a TextFilter) -> impl Iterator<Item = &'a ComponentTemplate> + 'a {
        self.entries.iter().filter(move |t| filter.passes(&t.name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Search box filter.
///
/// The input is split on commas into terms. A term matches a case-insensitive
/// substring; a term starting with `-` excludes instead. Text passes when it
/// matches no exclude term and, if there are include terms, at least one of
/// them. An empty filter passes everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl TextFilter {
    pub fn parse(input: &str) -> Self {
        let mut filter = Self::default();
        for term in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match term.strip_prefix('-') {
                Some(rest) => {
                    let rest = rest.trim();
                    if !rest.is_empty() {
                        filter.exclude.push(rest.to_lowercase());
                    }
                }
                None => filter.include.push(term.to_lowercase()),
            }
        }
        filter
    }

    pub fn is_active(&self) -> bool {
        !self.include.is_empty() || !self.exclude.is_empty()
    }

    pub fn passes(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        if self.exclude.iter().any(|t| text.contains(t.as_str())) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|t| text.contains(t.as_str()))
    }
}

/// Place the starting stack: a physical disk to boot from and the base
/// system that boots from it. Returns `[disk, base_system]`.
pub fn seed_default_stack(graph: &mut GraphStore) -> [NodeId; 2] {
    let disk = graph.add_node_from(
        &ComponentTemplate::new("Physical Disk 1").pin(PinKind::Input, "Physical Disk 1"),
    );
    let base = graph.add_node_from(
        &ComponentTemplate::new("Linux Base System")
            .description(BASE_SYSTEM_DESCRIPTION)
            .pin(PinKind::Output, "Output ->"),
    );
    [disk, base]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(catalog: &'a ComponentCatalog, filter: &'a TextFilter) -> Vec<&'a str> {
        catalog.search(filter).map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = ComponentCatalog::builtin();
        let all: Vec<&str> = catalog.names().collect();
        assert_eq!(
            all,
            vec![
                "Chromium",
                "Linux Base System",
                "Systemd",
                "Wayland Window System",
                "Genesis Desktop"
            ]
        );
    }

    #[test]
    fn test_get() {
        let catalog = ComponentCatalog::builtin();
        let base = catalog.get("Linux Base System").unwrap();
        assert_eq!(base.description.as_deref(), Some(BASE_SYSTEM_DESCRIPTION));
        assert!(catalog.get("Windows").is_none());
    }

    // ========================================================================
    // TextFilter
    // ========================================================================

    #[test]
    fn test_empty_filter_passes_everything() {
        let catalog = ComponentCatalog::builtin();
        let filter = TextFilter::parse("  ");
        assert!(!filter.is_active());
        assert_eq!(names(&catalog, &filter).len(), catalog.len());
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let catalog = ComponentCatalog::builtin();
        let filter = TextFilter::parse("SYS");
        assert_eq!(
            names(&catalog, &filter),
            vec!["Linux Base System", "Systemd", "Wayland Window System"]
        );
    }

    #[test]
    fn test_filter_any_include_term() {
        let catalog = ComponentCatalog::builtin();
        let filter = TextFilter::parse("chrom, desktop");
        assert_eq!(names(&catalog, &filter), vec!["Chromium", "Genesis Desktop"]);
    }

    #[test]
    fn test_filter_exclude_term() {
        let catalog = ComponentCatalog::builtin();
        let filter = TextFilter::parse("system,-wayland");
        assert_eq!(names(&catalog, &filter), vec!["Linux Base System", "Systemd"]);

        let only_exclude = TextFilter::parse("-linux");
        assert_eq!(names(&catalog, &only_exclude).len(), catalog.len() - 1);
    }

    #[test]
    fn test_lone_dash_is_ignored() {
        let filter = TextFilter::parse("-");
        assert!(!filter.is_active());
        assert!(filter.passes("anything"));
    }

    // ========================================================================
    // Seeding
    // ========================================================================

    #[test]
    fn test_seed_default_stack() {
        let mut graph = GraphStore::default();
        let [disk, base] = seed_default_stack(&mut graph);

        let disk = graph.node(disk).unwrap();
        assert_eq!(disk.label, "Physical Disk 1");
        assert_eq!(disk.pins.len(), 1);
        assert_eq!(graph.pin(disk.pins[0]).unwrap().kind, PinKind::Input);

        let base = graph.node(base).unwrap();
        assert_eq!(base.description.as_deref(), Some(BASE_SYSTEM_DESCRIPTION));
        let out = graph.pin(base.pins[0]).unwrap();
        assert_eq!(out.kind, PinKind::Output);
        assert_eq!(out.label, "Output ->");
        assert_eq!(graph.link_count(), 0);
    }

    #[test]
    fn test_add_node_from_template() {
        let mut graph = GraphStore::default();
        let catalog = ComponentCatalog::builtin();
        let id = graph.add_node_from(catalog.get("Systemd").unwrap());

        let labels: Vec<String> = graph.pins_of(id).unwrap().map(|p| p.label.clone()).collect();
        assert_eq!(labels, vec!["Base", "Services ->"]);
    }
}
