// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

use std::collections::VecDeque;

use clap::ValueEnum;
use wgraph_core::{Graph, Result, VertexId};

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Random edge weights in `1..=max_weight`.
struct Weights {
    rng: FastRng,
    max: u64,
}

impl Weights {
    fn new(seed: u64, max: u64) -> Self {
        Self {
            rng: FastRng::new(seed ^ 0x9e37_79b9_7f4a_7c15),
            max: max.max(1),
        }
    }

    fn next(&mut self) -> i64 {
        // max is bounded by the CLI, well below i64::MAX
        (self.rng.next(self.max) + 1) as i64
    }
}

/// Synthetic topology to benchmark against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Generator {
    /// Fractal branching tree (deep paths)
    Lsystem,
    /// Preferential attachment via edge sampling (hub-and-spoke)
    Scalefree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random edges
    Random,
    /// Two dense cliques connected by a thin bridge
    Barbell,
    /// Diffusion-limited aggregation (organic branching)
    Dla,
}

impl Generator {
    pub const ALL: [Generator; 6] = [
        Generator::Lsystem,
        Generator::Scalefree,
        Generator::Smallworld,
        Generator::Random,
        Generator::Barbell,
        Generator::Dla,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Generator::Lsystem => "L-system tree",
            Generator::Scalefree => "Scale-free (edge sampling)",
            Generator::Smallworld => "Small-world (Watts-Strogatz)",
            Generator::Random => "Erdos-Renyi random",
            Generator::Barbell => "Barbell (clique-bridge-clique)",
            Generator::Dla => "DLA (organic branching)",
        }
    }

    pub fn build(self, vertex_count: u64, max_weight: u64) -> Result<Graph> {
        match self {
            Generator::Lsystem => gen_lsystem(vertex_count, max_weight),
            Generator::Scalefree => gen_scale_free(vertex_count, max_weight),
            Generator::Smallworld => gen_small_world(vertex_count, max_weight),
            Generator::Random => gen_random(vertex_count, max_weight),
            Generator::Barbell => gen_barbell(vertex_count, max_weight),
            Generator::Dla => gen_dla(vertex_count, max_weight),
        }
    }
}

fn with_vertices(ids: std::ops::Range<VertexId>) -> Result<Graph> {
    let mut graph = Graph::with_capacity((ids.end - ids.start) as usize);
    for id in ids {
        graph.add_vertex(id)?;
    }
    Ok(graph)
}

/// L-system fractal tree: deep branching with self-similar structure.
///
/// Each vertex spawns `branching` children. Produces deep paths (log depth)
/// with exponential width. Tests deep traversal and path reconstruction.
fn gen_lsystem(vertex_count: u64, max_weight: u64) -> Result<Graph> {
    let mut graph = with_vertices(0..vertex_count)?;
    let mut weights = Weights::new(42, max_weight);

    let branching = 3u64;
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < vertex_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= vertex_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                graph.add_edge(parent, child, weights.next())?;
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    Ok(graph)
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge and connecting
/// to one of its endpoints. Vertices with more edges are more likely to be picked.
fn gen_scale_free(vertex_count: u64, max_weight: u64) -> Result<Graph> {
    let edges_per_vertex = 10u64;
    let mut graph = with_vertices(0..vertex_count)?;
    let mut rng = FastRng::new(12345);
    let mut weights = Weights::new(12345, max_weight);

    let mut edge_endpoints: Vec<u64> =
        Vec::with_capacity((vertex_count * edges_per_vertex * 2) as usize);

    // Seed: small clique
    let seed = 5u64.min(vertex_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            graph.add_edge(i, j, weights.next())?;
            edge_endpoints.push(i);
            edge_endpoints.push(j);
        }
    }
    if edge_endpoints.is_empty() {
        return Ok(graph);
    }

    // Grow: each new vertex attaches to `edges_per_vertex` existing vertices
    for new_vertex in seed..vertex_count {
        let attach = edges_per_vertex.min(new_vertex);
        for _ in 0..attach {
            let idx = rng.next(edge_endpoints.len() as u64) as usize;
            let target = edge_endpoints[idx];
            if target != new_vertex {
                graph.add_edge(new_vertex, target, weights.next())?;
                edge_endpoints.push(new_vertex);
                edge_endpoints.push(target);
            }
        }
    }

    Ok(graph)
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each vertex links to its K forward neighbors on a ring, and each link is
/// rewired with probability p. High clustering, short path lengths.
fn gen_small_world(vertex_count: u64, max_weight: u64) -> Result<Graph> {
    let k = 10u64.min(vertex_count.saturating_sub(1));
    let p = 0.05f64;
    let mut graph = with_vertices(0..vertex_count)?;
    let mut rng = FastRng::new(67890);
    let mut weights = Weights::new(67890, max_weight);

    for i in 0..vertex_count {
        for j in 1..=k {
            let neighbor = (i + j) % vertex_count;
            let target = if rng.next_f64() < p {
                let rewired = rng.next(vertex_count);
                if rewired != i {
                    rewired
                } else {
                    neighbor
                }
            } else {
                neighbor
            };
            graph.add_edge(i, target, weights.next())?;
        }
    }

    Ok(graph)
}

/// Erdos-Renyi: uniform random edges, ~10 per vertex on average.
fn gen_random(vertex_count: u64, max_weight: u64) -> Result<Graph> {
    let target_edges = vertex_count * 10;
    let mut graph = with_vertices(0..vertex_count)?;
    let mut rng = FastRng::new(54321);
    let mut weights = Weights::new(54321, max_weight);

    for _ in 0..target_edges {
        let from = rng.next(vertex_count);
        let to = rng.next(vertex_count);
        if from != to {
            graph.add_edge(from, to, weights.next())?;
        }
    }

    Ok(graph)
}

/// Barbell: two dense cliques connected by a single thin bridge.
///
/// Worst case for "find path through bottleneck." The cliques split the
/// vertices left after a chain of up to 10 bridge vertices; clique B takes
/// the odd one out, so the graph always has exactly `vertex_count` vertices.
fn gen_barbell(vertex_count: u64, max_weight: u64) -> Result<Graph> {
    let bridge_len = 10u64.min(vertex_count / 3);
    let size_a = (vertex_count - bridge_len) / 2;
    let size_b = vertex_count - bridge_len - size_a;
    let mut graph = with_vertices(0..vertex_count)?;
    let mut rng = FastRng::new(99999);
    let mut weights = Weights::new(99999, max_weight);

    let mut wire_clique = |graph: &mut Graph, offset: u64, size: u64| -> Result<()> {
        for i in 0..size {
            for _ in 0..20u64.min(size.saturating_sub(1)) {
                let target = rng.next(size);
                if target != i {
                    graph.add_edge(offset + i, offset + target, weights.next())?;
                }
            }
        }
        Ok(())
    };

    // Clique A: 0..size_a, clique B after the bridge
    let b_start = size_a + bridge_len;
    wire_clique(&mut graph, 0, size_a)?;
    wire_clique(&mut graph, b_start, size_b)?;

    if size_a == 0 {
        return Ok(graph);
    }

    // Bridge: chain from the last vertex of A through to the first of B
    let mut prev = size_a - 1;
    for id in size_a..=b_start {
        graph.add_edge(prev, id, 1)?;
        prev = id;
    }

    Ok(graph)
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new vertex attaches to a random recent "surface" vertex, with
/// occasional long-range jumps. Produces tree-like topology with winding paths.
fn gen_dla(vertex_count: u64, max_weight: u64) -> Result<Graph> {
    let mut graph = with_vertices(0..vertex_count)?;
    let mut rng = FastRng::new(77777);
    let mut weights = Weights::new(77777, max_weight);

    let surface_max = 10000usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_vertex in 1..vertex_count {
        // Edges point outward from the seed so everything is reachable from 0
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        graph.add_edge(attach_to, new_vertex, weights.next())?;

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next(10) == 0 && new_vertex > 1 {
            let other = rng.next(new_vertex);
            if other != attach_to {
                graph.add_edge(new_vertex, other, weights.next())?;
            }
        }

        surface.push_back(new_vertex);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    Ok(graph)
}
