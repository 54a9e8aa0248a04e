use crate::catalog::ComponentTemplate;
use crate::ids::{IdAllocator, LinkId, NodeId, PinId};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Direction of a [`Pin`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PinKind {
    Input,
    Output,
}

impl fmt::Display for PinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Output => write!(f, "Output"),
        }
    }
}

/// A connection point owned by exactly one node.
#[derive(Clone, Debug, PartialEq)]
pub struct Pin {
    pub id: PinId,
    pub node: NodeId,
    pub kind: PinKind,
    pub label: String,
}

/// A component placed on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub description: Option<String>,
    /// Pins in display order
    pub pins: Vec<PinId>,
}

/// A committed connection between two pins.
///
/// `input_pin` is the pin the creation gesture reported first and
/// `output_pin` the second; kinds are only checked if the configured
/// [`LinkValidator`] asks for it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub id: LinkId,
    pub input_pin: PinId,
    pub output_pin: PinId,
}

impl Link {
    /// Check whether this link joins `a` and `b`, in either orientation.
    pub fn connects(&self, a: PinId, b: PinId) -> bool {
        (self.input_pin == a && self.output_pin == b) || (self.input_pin == b && self.output_pin == a)
    }

    /// Check whether either end of the link is `pin`.
    pub fn touches(&self, pin: PinId) -> bool {
        self.input_pin == pin || self.output_pin == pin
    }
}

/// Failed lookups against a [`GraphStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("{0} not found")]
    NodeNotFound(NodeId),
    #[error("{0} not found")]
    LinkNotFound(LinkId),
    #[error("display index {index} out of range for {len} links")]
    DisplayIndexOutOfRange { index: usize, len: usize },
}

/// Authoritative container for the nodes, pins and links of one session.
///
/// Nodes keep their creation order and links their insertion order, which is
/// also the order they are drawn in. Links can be addressed both by their
/// [`LinkId`] and by their position in [`links`](Self::links).
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    ids: IdAllocator,
    nodes: Vec<Node>,
    node_slots: HashMap<NodeId, usize>,
    pins: HashMap<PinId, Pin>,
    links: Vec<Link>,
}

impl GraphStore {
    pub fn new(ids: IdAllocator) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    /// Add a node with one pin per entry in `pins`, each labelled with its kind.
    pub fn add_node<I>(&mut self, label: impl Into<String>, pins: I) -> NodeId
    where
        I: IntoIterator<Item = PinKind>,
    {
        self.insert_node(
            label.into(),
            None,
            pins.into_iter().map(|kind| (kind, kind.to_string())),
        )
    }

    /// Add a node described by a catalog template.
    pub fn add_node_from(&mut self, template: &ComponentTemplate) -> NodeId {
        self.insert_node(
            template.name.clone(),
            template.description.clone(),
            template.pins.iter().map(|p| (p.kind, p.label.clone())),
        )
    }

    fn insert_node<I>(&mut self, label: String, description: Option<String>, pins: I) -> NodeId
    where
        I: Iterator<Item = (PinKind, String)>,
    {
        let id = self.ids.next_node_id();
        let mut pin_ids = Vec::new();
        for (kind, pin_label) in pins {
            let pin_id = self.ids.next_pin_id();
            self.pins.insert(
                pin_id,
                Pin {
                    id: pin_id,
                    node: id,
                    kind,
                    label: pin_label,
                },
            );
            pin_ids.push(pin_id);
        }

        self.node_slots.insert(id, self.nodes.len());
        self.nodes.push(Node {
            id,
            label,
            description,
            pins: pin_ids,
        });
        id
    }

    pub fn set_description(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), GraphError> {
        let slot = *self.node_slots.get(&id).ok_or(GraphError::NodeNotFound(id))?;
        self.nodes[slot].description = Some(text.into());
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_slots.get(&id).map(|&slot| &self.nodes[slot])
    }

    pub fn pin(&self, id: PinId) -> Option<&Pin> {
        self.pins.get(&id)
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Pins of `node` in display order.
    pub fn pins_of(&self, node: NodeId) -> Result<impl Iterator<Item = &Pin> + '_, GraphError> {
        let node = self.node(node).ok_or(GraphError::NodeNotFound(node))?;
        Ok(node.pins.iter().filter_map(move |id| self.pins.get(id)))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    // === Links ===

    /// Links in insertion order. The position of a link in this slice is its
    /// display index.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Append a link between two pins. Existing links between the same pins
    /// are not checked for.
    pub fn add_link(&mut self, input_pin: PinId, output_pin: PinId) -> LinkId {
        let id = self.ids.next_link_id();
        self.links.push(Link {
            id,
            input_pin,
            output_pin,
        });
        id
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Current position of link `id` in [`links`](Self::links).
    pub fn display_index_of(&self, id: LinkId) -> Option<usize> {
        self.links.iter().position(|l| l.id == id)
    }

    /// Remove the link at position `index`.
    ///
    /// Every link after it moves down by one; indices read before the call
    /// are stale afterwards.
    pub fn remove_link_by_display_index(&mut self, index: usize) -> Result<Link, GraphError> {
        if index >= self.links.len() {
            return Err(GraphError::DisplayIndexOutOfRange {
                index,
                len: self.links.len(),
            });
        }
        Ok(self.links.remove(index))
    }

    /// Remove link `id`, wherever it currently sits.
    pub fn remove_link(&mut self, id: LinkId) -> Result<Link, GraphError> {
        let index = self.display_index_of(id).ok_or(GraphError::LinkNotFound(id))?;
        Ok(self.links.remove(index))
    }

    /// Ids of all links with an end on one of `node`'s pins.
    pub fn links_attached_to(&self, node: NodeId) -> Vec<LinkId> {
        let Some(node) = self.node(node) else {
            return Vec::new();
        };
        self.links
            .iter()
            .filter(|link| node.pins.iter().any(|&pin| link.touches(pin)))
            .map(|link| link.id)
            .collect()
    }

    /// Check if a link between `a` and `b` already exists, in either orientation.
    pub fn duplicate_link_exists(&self, a: PinId, b: PinId) -> bool {
        self.links.iter().any(|link| link.connects(a, b))
    }

    /// Resolve the two pins of a candidate link into (source node, target
    /// node), following data from the Output pin to the Input pin.
    ///
    /// Returns `None` if a pin is unknown or both pins have the same kind.
    fn flow_endpoints(&self, a: PinId, b: PinId) -> Option<(NodeId, NodeId)> {
        let pa = self.pins.get(&a)?;
        let pb = self.pins.get(&b)?;
        match (pa.kind, pb.kind) {
            (PinKind::Output, PinKind::Input) => Some((pa.node, pb.node)),
            (PinKind::Input, PinKind::Output) => Some((pb.node, pa.node)),
            _ => None,
        }
    }

    /// Check whether `to` is reachable from `from` by following existing links.
    fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        let mut edges: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for link in &self.links {
            if let Some((src, dst)) = self.flow_endpoints(link.input_pin, link.output_pin) {
                edges.entry(src).or_default().push(dst);
            }
        }

        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([from]);
        while let Some(node) = queue.pop_front() {
            if node == to {
                return true;
            }
            if !seen.insert(node) {
                continue;
            }
            if let Some(next) = edges.get(&node) {
                queue.extend(next.iter().copied());
            }
        }
        false
    }
}

// ============================================================================
// Link Validation Framework
// ============================================================================

/// Result of link validation with optional rejection reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Combine two results (AND logic): returns first error if any
    pub fn and(self, other: ValidationResult) -> ValidationResult {
        match self {
            ValidationResult::Valid => other,
            invalid => invalid,
        }
    }
}

/// Reasons why a candidate link was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Pin {0} not found")]
    PinNotFound(PinId),
    #[error("Cannot link pin to itself")]
    SamePin,
    #[error("Cannot link pins on same node")]
    SameNode,
    #[error("Must connect input to output")]
    IncompatibleDirection,
    #[error("Link already exists")]
    DuplicateLink,
    #[error("Link would create a cycle")]
    WouldCycle,
    #[error("{0}")]
    Custom(String),
}

/// Policy deciding whether a candidate link may be committed.
///
/// Implement this to add custom rules, or compose the provided validators
/// with [`CompositeValidator`].
///
/// ```ignore
/// struct OnlyFromDisks;
///
/// impl LinkValidator for OnlyFromDisks {
///     fn validate(&self, input: PinId, _output: PinId, graph: &GraphStore) -> ValidationResult {
///         match graph.pin(input).and_then(|p| graph.node(p.node)) {
///             Some(node) if node.label.contains("Disk") => ValidationResult::Valid,
///             _ => ValidationResult::Invalid(ValidationError::Custom("not a disk".into())),
///         }
///     }
/// }
/// ```
pub trait LinkValidator {
    fn validate(&self, input: PinId, output: PinId, graph: &GraphStore) -> ValidationResult;
}

/// Accepts every candidate. This is the permissive default policy: no kind,
/// duplicate or cycle checks.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl LinkValidator for AcceptAll {
    fn validate(&self, _input: PinId, _output: PinId, _graph: &GraphStore) -> ValidationResult {
        ValidationResult::Valid
    }
}

/// Structural checks:
/// 1. Pins must exist
/// 2. Pins must differ and sit on different nodes
/// 3. One pin must be input, one must be output
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicLinkValidator;

impl LinkValidator for BasicLinkValidator {
    fn validate(&self, input: PinId, output: PinId, graph: &GraphStore) -> ValidationResult {
        if input == output {
            return ValidationResult::Invalid(ValidationError::SamePin);
        }

        let Some(a) = graph.pin(input) else {
            return ValidationResult::Invalid(ValidationError::PinNotFound(input));
        };
        let Some(b) = graph.pin(output) else {
            return ValidationResult::Invalid(ValidationError::PinNotFound(output));
        };

        if a.node == b.node {
            return ValidationResult::Invalid(ValidationError::SameNode);
        }
        if a.kind == b.kind {
            return ValidationResult::Invalid(ValidationError::IncompatibleDirection);
        }

        ValidationResult::Valid
    }
}

/// Rejects a link between two pins that are already linked, in either
/// orientation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDuplicatesValidator;

impl LinkValidator for NoDuplicatesValidator {
    fn validate(&self, input: PinId, output: PinId, graph: &GraphStore) -> ValidationResult {
        if graph.duplicate_link_exists(input, output) {
            ValidationResult::Invalid(ValidationError::DuplicateLink)
        } else {
            ValidationResult::Valid
        }
    }
}

/// Rejects a link that would close a cycle between nodes, following data
/// from Output pins to Input pins.
///
/// Candidates whose direction cannot be resolved (unknown pins, two pins of
/// the same kind) are left to [`BasicLinkValidator`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCyclesValidator;

impl LinkValidator for NoCyclesValidator {
    fn validate(&self, input: PinId, output: PinId, graph: &GraphStore) -> ValidationResult {
        match graph.flow_endpoints(input, output) {
            Some((source, target)) if graph.reaches(target, source) => {
                ValidationResult::Invalid(ValidationError::WouldCycle)
            }
            _ => ValidationResult::Valid,
        }
    }
}

/// Composite validator that combines multiple validators
///
/// All validators must return Valid for the link to be valid (AND logic).
/// Returns the first error encountered.
///
/// ```ignore
/// let validator = CompositeValidator::new()
///     .add(BasicLinkValidator)
///     .add(NoDuplicatesValidator)
///     .add(NoCyclesValidator);
/// ```
#[derive(Default)]
pub struct CompositeValidator {
    validators: Vec<Box<dyn LinkValidator>>,
}

impl CompositeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validator; validators are checked in the order they were added.
    pub fn add<V: LinkValidator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Structural, duplicate and cycle checks together.
    pub fn strict() -> Self {
        Self::new()
            .add(BasicLinkValidator)
            .add(NoDuplicatesValidator)
            .add(NoCyclesValidator)
    }
}

impl LinkValidator for CompositeValidator {
    fn validate(&self, input: PinId, output: PinId, graph: &GraphStore) -> ValidationResult {
        for v in &self.validators {
            let result = v.validate(input, output, graph);
            if !result.is_valid() {
                return result;
            }
        }
        ValidationResult::Valid
    }
}

// ============================================================================
// Tests
// ============================================================================
