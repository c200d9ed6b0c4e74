use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexKey, Weight};

/// Total weight of a path.
///
/// Wider than [`Weight`]: a simple path has at most `V - 1` edges of at most
/// `i64::MAX` each, so no reachable sum can overflow.
pub type Distance = u128;

/// Distance and predecessor of one vertex after a shortest-path run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry<V> {
    /// Minimum total weight from the source. `None` if unreachable.
    pub distance: Option<Distance>,
    /// Previous vertex on one shortest path. `None` for the source and for
    /// unreachable vertices.
    pub predecessor: Option<V>,
}

/// Result of a single-source shortest-path computation.
///
/// Holds an entry for every vertex of the graph at the time of the run.
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPaths<V> {
    source: V,
    entries: BTreeMap<V, PathEntry<V>>,
}

impl<V: VertexKey> ShortestPaths<V> {
    pub fn source(&self) -> &V {
        &self.source
    }

    pub fn entry(&self, id: &V) -> Option<&PathEntry<V>> {
        self.entries.get(id)
    }

    /// Shortest distance to `id`, or `None` if unreachable or unknown.
    pub fn distance(&self, id: &V) -> Option<Distance> {
        self.entries.get(id).and_then(|e| e.distance)
    }

    pub fn predecessor(&self, id: &V) -> Option<&V> {
        self.entries.get(id).and_then(|e| e.predecessor.as_ref())
    }

    pub fn is_reachable(&self, id: &V) -> bool {
        self.distance(id).is_some()
    }

    /// All entries, ascending by vertex id.
    pub fn iter(&self) -> impl Iterator<Item = (&V, &PathEntry<V>)> {
        self.entries.iter()
    }

    /// Number of vertices reachable from the source, the source included.
    pub fn reachable_count(&self) -> usize {
        self.entries.values().filter(|e| e.distance.is_some()).count()
    }

    /// Vertices from the source to `target`, both inclusive.
    ///
    /// Fails with `UnknownVertex` if `target` was not in the graph and with
    /// `Unreachable` if no path leads to it.
    pub fn path_to(&self, target: &V) -> Result<Vec<V>> {
        let entry = self
            .entries
            .get(target)
            .ok_or_else(|| GraphError::unknown(target))?;
        if entry.distance.is_none() {
            return Err(GraphError::unreachable(&self.source, target));
        }

        let mut path = vec![target.clone()];
        let mut current = target;
        while *current != self.source {
            // A simple path never repeats a vertex
            if path.len() > self.entries.len() {
                return Err(GraphError::unreachable(&self.source, target));
            }
            current = self
                .predecessor(current)
                .ok_or_else(|| GraphError::unreachable(&self.source, target))?;
            path.push(current.clone());
        }

        path.reverse();
        Ok(path)
    }
}

/// Per-run distance and predecessor tables, borrowed from the graph.
struct Relaxation<'g, V> {
    distance: HashMap<&'g V, Distance>,
    predecessor: HashMap<&'g V, &'g V>,
}

impl<'g, V: VertexKey> Relaxation<'g, V> {
    fn new(source: &'g V, capacity: usize) -> Self {
        let mut distance = HashMap::with_capacity(capacity);
        distance.insert(source, 0);
        Self {
            distance,
            predecessor: HashMap::with_capacity(capacity),
        }
    }

    fn distance(&self, id: &V) -> Option<Distance> {
        self.distance.get(id).copied()
    }

    /// Relax `u -> v` with weight `w`, given `u` is settled at `du`.
    ///
    /// Returns the new distance of `v` if it improved. Self-loops never
    /// relax.
    fn relax(&mut self, u: &'g V, du: Distance, v: &'g V, w: Weight) -> Option<Distance> {
        if u == v {
            return None;
        }
        let candidate = du + Distance::from(w);
        if self.distance(v).is_some_and(|dv| dv <= candidate) {
            return None;
        }

        tracing::trace!(from = ?u, to = ?v, distance = candidate, "relax");
        self.distance.insert(v, candidate);
        self.predecessor.insert(v, u);
        Some(candidate)
    }

    fn finish(self, graph: &'g Graph<V>, source: &V) -> ShortestPaths<V> {
        let entries: BTreeMap<V, PathEntry<V>> = graph
            .vertices()
            .map(|vertex| {
                let id = vertex.id();
                let entry = PathEntry {
                    distance: self.distance(id),
                    predecessor: self.predecessor.get(id).map(|&p| p.clone()),
                };
                (id.clone(), entry)
            })
            .collect();

        tracing::debug!(
            source = ?source,
            reachable = self.distance.len(),
            vertices = entries.len(),
            "shortest paths computed"
        );

        ShortestPaths {
            source: source.clone(),
            entries,
        }
    }
}

/// Dijkstra single-source shortest paths with a binary heap.
///
/// The next vertex to settle is the unsettled one with the smallest
/// `(distance, id)`; relaxation is strict, so on equal-cost paths the first
/// predecessor found is kept. O((V + E) log V).
#[tracing::instrument(level = "debug", skip(graph), fields(vertices = graph.vertex_count()))]
pub fn shortest_paths<V: VertexKey>(graph: &Graph<V>, source: &V) -> Result<ShortestPaths<V>> {
    let source = graph.require(source)?.id();
    tracing::debug!(source = ?source, "shortest paths (heap) started");
    let mut state = Relaxation::new(source, graph.vertex_count());
    let mut settled: HashSet<&V> = HashSet::with_capacity(graph.vertex_count());
    let mut heap: BinaryHeap<Reverse<(Distance, &V)>> = BinaryHeap::new();
    heap.push(Reverse((0, source)));

    while let Some(Reverse((du, u))) = heap.pop() {
        // Stale entry: u was settled through a shorter distance
        if !settled.insert(u) {
            continue;
        }
        for (v, w) in graph.require(u)?.edges() {
            if settled.contains(v) {
                continue;
            }
            if let Some(dv) = state.relax(u, du, v, w) {
                heap.push(Reverse((dv, v)));
            }
        }
    }

    Ok(state.finish(graph, source))
}

/// Dijkstra with a linear scan for the minimum instead of a heap.
///
/// Same selection order and tie-break as [`shortest_paths`], so results are
/// identical, predecessors included. O(V²); competitive on dense graphs.
#[tracing::instrument(level = "debug", skip(graph), fields(vertices = graph.vertex_count()))]
pub fn shortest_paths_dense<V: VertexKey>(
    graph: &Graph<V>,
    source: &V,
) -> Result<ShortestPaths<V>> {
    let source = graph.require(source)?.id();
    tracing::debug!(source = ?source, "shortest paths (linear scan) started");
    let mut state = Relaxation::new(source, graph.vertex_count());
    let mut frontier: Vec<&V> = graph.vertices().map(|v| v.id()).collect();

    while !frontier.is_empty() {
        let next = frontier
            .iter()
            .enumerate()
            .filter_map(|(i, &id)| state.distance(id).map(|d| (d, id, i)))
            .min_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        // Everything left is unreachable
        let Some((du, _, idx)) = next else {
            break;
        };

        let u = frontier.swap_remove(idx);
        for (v, w) in graph.require(u)?.edges() {
            state.relax(u, du, v, w);
        }
    }

    Ok(state.finish(graph, source))
}

/// Shortest path from `source` to `target`, both inclusive.
pub fn path_to<V: VertexKey>(graph: &Graph<V>, source: &V, target: &V) -> Result<Vec<V>> {
    graph.require(target)?;
    shortest_paths(graph, source)?.path_to(target)
}

/// Total weight along `path`, or `None` if two consecutive vertices are not
/// joined by an edge.
pub fn path_weight<V: VertexKey>(graph: &Graph<V>, path: &[V]) -> Option<Distance> {
    path.windows(2).try_fold(0, |total: Distance, pair| {
        graph
            .edge_weight(&pair[0], &pair[1])
            .map(|w| total + Distance::from(w))
    })
}
