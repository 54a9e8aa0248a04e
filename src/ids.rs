//! Identifiers for nodes, pins and links.
//!
//! All three kinds of id are drawn from one [`IdAllocator`] counter, so a raw
//! value never refers to two entities at once. The allocator is an explicit
//! object owned by the [`GraphStore`](crate::GraphStore); two stores (or two
//! tests) never share hidden counter state.

use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw value, e.g. one reported back by the canvas widget.
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// The raw integer value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a [`Node`](crate::Node).
    NodeId,
    "node#"
);
id_type!(
    /// Identifier of a [`Pin`](crate::Pin).
    PinId,
    "pin#"
);
id_type!(
    /// Identifier of a [`Link`](crate::Link).
    LinkId,
    "link#"
);

impl LinkId {
    /// Id used to draw a link under [`LinkAddressing::DisplayIndex`](crate::LinkAddressing),
    /// where the widget knows a link only by its position in the sequence.
    pub fn from_display_index(index: usize) -> Self {
        Self(index as u64)
    }
}

/// Monotonic id source shared by nodes, pins and links.
///
/// ```
/// use stack_node_graph::IdAllocator;
///
/// let mut ids = IdAllocator::new();
/// let node = ids.next_node_id();
/// let pin = ids.next_pin_id();
/// assert!(pin.get() > node.get());
/// ```
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Create an allocator whose first id is 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create an allocator whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// The raw value the next call will hand out.
    pub fn peek(&self) -> u64 {
        self.next
    }

    fn next_raw(&mut self) -> u64 {
        let current = self.next;
        // u64 cannot be exhausted by an interactive session
        self.next += 1;
        current
    }

    pub fn next_node_id(&mut self) -> NodeId {
        NodeId(self.next_raw())
    }

    pub fn next_pin_id(&mut self) -> PinId {
        PinId(self.next_raw())
    }

    pub fn next_link_id(&mut self) -> LinkId {
        LinkId(self.next_raw())
    }
}
