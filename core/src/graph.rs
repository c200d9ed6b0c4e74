use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{GraphError, Result};

/// Default vertex identifier.
pub type VertexId = u64;

/// Edge weight. Always non-negative; the insertion API takes `i64` so that
/// negative input can be rejected rather than silently wrapped.
pub type Weight = u64;

/// Anything usable as a vertex id: integers, strings, small tuples.
///
/// `Ord` fixes neighbor iteration order and the Dijkstra tie-break.
pub trait VertexKey: Clone + Ord + Hash + Debug {}

impl<T: Clone + Ord + Hash + Debug> VertexKey for T {}

/// A vertex and its outgoing edges.
#[derive(Debug, Clone)]
pub struct Vertex<V> {
    id: V,
    edges: BTreeMap<V, Weight>,
}

impl<V: VertexKey> Vertex<V> {
    fn new(id: V) -> Self {
        Self {
            id,
            edges: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &V {
        &self.id
    }

    /// Outgoing edges as `(neighbor, weight)`, ascending by neighbor id.
    pub fn edges(&self) -> impl Iterator<Item = (&V, Weight)> {
        self.edges.iter().map(|(to, &w)| (to, w))
    }

    pub fn weight_to(&self, to: &V) -> Option<Weight> {
        self.edges.get(to).copied()
    }

    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }
}

/// In-memory directed weighted graph.
///
/// Each vertex owns a single edge per ordered neighbor pair; inserting the
/// same `(from, to)` twice overwrites the weight. The graph holds no
/// traversal state: every algorithm allocates its own visited/distance maps,
/// so queries only need `&Graph` and may run concurrently.
#[derive(Debug, Clone)]
pub struct Graph<V = VertexId> {
    vertices: HashMap<V, Vertex<V>>,
    edge_count: usize,
}

impl<V: VertexKey> Graph<V> {
    pub fn new() -> Self {
        Self {
            vertices: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Pre-allocate for a known vertex count.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: HashMap::with_capacity(vertex_count),
            edge_count: 0,
        }
    }

    /// Insert a vertex with no edges.
    ///
    /// Fails with `DuplicateVertex` if the id is already present; the
    /// existing vertex and its edges are left untouched.
    pub fn add_vertex(&mut self, id: V) -> Result<()> {
        if self.vertices.contains_key(&id) {
            return Err(GraphError::duplicate(&id));
        }
        self.vertices.insert(id.clone(), Vertex::new(id));
        Ok(())
    }

    /// Insert or overwrite the directed edge `from -> to`.
    ///
    /// Returns the previous weight of that edge, if there was one.
    pub fn add_edge(&mut self, from: V, to: V, weight: i64) -> Result<Option<Weight>> {
        self.require(&from)?;
        self.require(&to)?;
        let weight = Weight::try_from(weight).map_err(|_| GraphError::InvalidWeight(weight))?;
        let vertex = self
            .vertices
            .get_mut(&from)
            .ok_or_else(|| GraphError::unknown(&from))?;

        tracing::trace!(?from, ?to, weight, "add edge");
        let previous = vertex.edges.insert(to, weight);
        if previous.is_none() {
            self.edge_count += 1;
        }
        Ok(previous)
    }

    /// Insert both `a -> b` and `b -> a` with the same weight.
    pub fn add_undirected_edge(&mut self, a: V, b: V, weight: i64) -> Result<()> {
        self.add_edge(a.clone(), b.clone(), weight)?;
        self.add_edge(b, a, weight)?;
        Ok(())
    }

    /// Bulk load from `(from, to, weight)` triples, creating endpoints that
    /// are not yet present.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V, i64)>,
    {
        let mut graph = Self::new();
        for (from, to, weight) in edges {
            graph.ensure_vertex(&from);
            graph.ensure_vertex(&to);
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    fn ensure_vertex(&mut self, id: &V) {
        if !self.vertices.contains_key(id) {
            self.vertices.insert(id.clone(), Vertex::new(id.clone()));
        }
    }

    pub fn contains(&self, id: &V) -> bool {
        self.vertices.contains_key(id)
    }

    /// Get a vertex by id.
    pub fn vertex(&self, id: &V) -> Option<&Vertex<V>> {
        self.vertices.get(id)
    }

    /// Get a vertex by id, or `UnknownVertex`.
    pub(crate) fn require(&self, id: &V) -> Result<&Vertex<V>> {
        self.vertices.get(id).ok_or_else(|| GraphError::unknown(id))
    }

    /// Outgoing edges of `id`, ascending by neighbor id.
    pub fn neighbors(&self, id: &V) -> Result<impl Iterator<Item = (&V, Weight)>> {
        Ok(self.require(id)?.edges())
    }

    /// Weight of the directed edge `from -> to`, if present.
    pub fn edge_weight(&self, from: &V, to: &V) -> Option<Weight> {
        self.vertices.get(from).and_then(|v| v.weight_to(to))
    }

    /// All vertices, in no particular order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<V>> {
        self.vertices.values()
    }

    /// All vertex ids, ascending.
    pub fn vertex_ids(&self) -> Vec<V> {
        let mut ids: Vec<V> = self.vertices.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl<V: VertexKey> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}
