use lasso::{Spur, ThreadedRodeo};
use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for board node IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Interned identifier of a board node. 4 bytes, Copy, O(1) Eq/Hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

impl NodeId {
    /// Intern `s` as a NodeId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        NodeId(INTERNER.get_or_intern(s))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// A process-unique id of the form `node_<n>`, used for dropped nodes.
    pub fn fresh() -> Self {
        Self::with_prefix("node")
    }

    pub fn with_prefix(prefix: &str) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Handle of an element in the [`Scene`](crate::scene::Scene) tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) NodeIndex);

impl ElementId {
    pub fn index(self) -> usize {
        self.0.index()
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0.index() as u64)
    }
}

/// Handle of a directed connection between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(EdgeIndex);

impl ConnectionId {
    pub fn new(edge: EdgeIndex) -> Self {
        Self(edge)
    }

    pub fn edge(self) -> EdgeIndex {
        self.0
    }

    pub fn index(self) -> usize {
        self.0.index()
    }
}

impl Serialize for ConnectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0.index() as u64)
    }
}
