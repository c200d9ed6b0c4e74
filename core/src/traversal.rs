use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::Result;
use crate::graph::{Graph, VertexKey};

/// Depth-first pre-order from `root`.
///
/// Neighbors are explored in ascending id order, so the result is the same
/// as the recursive formulation. Uses an explicit stack: depth is bounded by
/// heap memory, not by the call stack.
pub fn depth_first<V: VertexKey>(graph: &Graph<V>, root: &V) -> Result<Vec<V>> {
    graph.require(root)?;

    let mut visited: HashSet<&V> = HashSet::new();
    let mut order = Vec::new();
    let mut stack: Vec<&V> = vec![root];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        order.push(current.clone());

        // Reverse so the smallest neighbor is popped first
        let vertex = graph.require(current)?;
        let pending: Vec<&V> = vertex
            .edges()
            .map(|(to, _)| to)
            .filter(|to| !visited.contains(to))
            .collect();
        stack.extend(pending.into_iter().rev());
    }

    Ok(order)
}

/// True iff `target` can be reached from `root` along directed edges.
///
/// `root == target` is always reachable. Both ids must exist.
pub fn reachable<V: VertexKey>(graph: &Graph<V>, root: &V, target: &V) -> Result<bool> {
    graph.require(root)?;
    graph.require(target)?;

    if root == target {
        return Ok(true);
    }

    let mut visited: HashSet<&V> = HashSet::new();
    let mut stack: Vec<&V> = vec![root];
    visited.insert(root);

    while let Some(current) = stack.pop() {
        for (to, _) in graph.require(current)?.edges() {
            if to == target {
                return Ok(true);
            }
            if visited.insert(to) {
                stack.push(to);
            }
        }
    }

    Ok(false)
}

/// Lazy breadth-first traversal. Created by [`breadth_first`].
///
/// Vertices are marked visited when enqueued, so each one is yielded at
/// most once. The iterator is finite and cannot be restarted.
pub struct BreadthFirst<'a, V> {
    graph: &'a Graph<V>,
    queue: VecDeque<&'a V>,
    visited: HashSet<&'a V>,
}

impl<'a, V: VertexKey> Iterator for BreadthFirst<'a, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        let graph = self.graph;
        let current = self.queue.pop_front()?;
        if let Some(vertex) = graph.vertex(current) {
            for (to, _) in vertex.edges() {
                if self.visited.insert(to) {
                    self.queue.push_back(to);
                }
            }
        }
        Some(current.clone())
    }
}

/// Breadth-first traversal from `root`, in non-decreasing hop distance.
pub fn breadth_first<'a, V: VertexKey>(
    graph: &'a Graph<V>,
    root: &V,
) -> Result<BreadthFirst<'a, V>> {
    let root = graph.require(root)?.id();
    let mut visited = HashSet::new();
    visited.insert(root);
    Ok(BreadthFirst {
        graph,
        queue: VecDeque::from([root]),
        visited,
    })
}

/// Vertices reachable from `root`, grouped by hop count.
///
/// Layer 0 is `[root]`. Each layer is sorted ascending. With `max_depth`,
/// layers beyond that many hops are not explored.
pub fn breadth_first_layers<V: VertexKey>(
    graph: &Graph<V>,
    root: &V,
    max_depth: Option<u32>,
) -> Result<Vec<Vec<V>>> {
    let root = graph.require(root)?.id();

    let mut visited: HashSet<&V> = HashSet::new();
    let mut layers: Vec<Vec<V>> = Vec::new();
    let mut frontier: Vec<&V> = vec![root];
    visited.insert(root);

    while !frontier.is_empty() {
        let mut layer: Vec<V> = frontier.iter().map(|&id| id.clone()).collect();
        layer.sort();
        layers.push(layer);

        if max_depth.is_some_and(|max| layers.len() > max as usize) {
            break;
        }

        let mut next = Vec::new();
        for current in frontier {
            for (to, _) in graph.require(current)?.edges() {
                if visited.insert(to) {
                    next.push(to);
                }
            }
        }
        frontier = next;
    }

    Ok(layers)
}

/// Path with the fewest edges from `start` to `target`, ignoring weights.
///
/// Returns `None` if no path exists. The path includes both endpoints.
pub fn fewest_hops_path<V: VertexKey>(
    graph: &Graph<V>,
    start: &V,
    target: &V,
) -> Result<Option<Vec<V>>> {
    let start = graph.require(start)?.id();
    graph.require(target)?;

    if start == target {
        return Ok(Some(vec![start.clone()]));
    }

    // BFS with parent tracking: node → parent. Start is its own parent.
    let mut parents: HashMap<&V, &V> = HashMap::new();
    let mut queue: VecDeque<&V> = VecDeque::new();
    parents.insert(start, start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for (to, _) in graph.require(current)?.edges() {
            if parents.contains_key(to) {
                continue;
            }
            parents.insert(to, current);
            if to == target {
                return Ok(Some(reconstruct(&parents, start, to)));
            }
            queue.push_back(to);
        }
    }

    Ok(None)
}

/// Walk parent pointers from `node` back to `start`.
fn reconstruct<V: VertexKey>(parents: &HashMap<&V, &V>, start: &V, node: &V) -> Vec<V> {
    let mut path = vec![node.clone()];
    let mut current = node;
    while current != start {
        current = parents[current];
        path.push(current.clone());
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use rstest::rstest;

    fn make_chain(n: u64) -> Graph {
        Graph::from_edges((0..n - 1).map(|i| (i, i + 1, 1))).unwrap()
    }

    fn make_star(center: u64, leaves: u64) -> Graph {
        Graph::from_edges((1..=leaves).map(|i| (center, center + i, 1))).unwrap()
    }

    fn make_cycle(n: u64) -> Graph {
        Graph::from_edges((0..n).map(|i| (i, (i + 1) % n, 1))).unwrap()
    }

    /// 0 → {1, 2}, 1 → 3, 2 → 3, 3 → 4, plus an isolated 9.
    fn make_diamond() -> Graph {
        let mut g = Graph::from_edges(vec![(0, 2, 1), (0, 1, 1), (1, 3, 1), (2, 3, 1), (3, 4, 1)])
            .unwrap();
        g.add_vertex(9).unwrap();
        g
    }

    #[test]
    fn test_dfs_chain() {
        let g = make_chain(5);
        assert_eq!(depth_first(&g, &0).unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(depth_first(&g, &3).unwrap(), vec![3, 4]);
    }

    #[test]
    fn test_dfs_preorder_sorted_neighbors() {
        let g = make_diamond();
        // 0 → 1 → 3 → 4, backtrack, then 2 (3 already visited)
        assert_eq!(depth_first(&g, &0).unwrap(), vec![0, 1, 3, 4, 2]);
    }

    #[test]
    fn test_dfs_skips_unreachable() {
        let g = make_diamond();
        assert!(!depth_first(&g, &0).unwrap().contains(&9));
        assert_eq!(depth_first(&g, &9).unwrap(), vec![9]);
    }

    #[test]
    fn test_dfs_cycle_no_infinite_loop() {
        let g = make_cycle(10);
        let order = depth_first(&g, &4).unwrap();
        assert_eq!(order.len(), 10);
        assert_eq!(order[0], 4);
        assert_eq!(order[9], 3);
    }

    #[test]
    fn test_dfs_self_loop() {
        let g = Graph::from_edges(vec![(0, 0, 1), (0, 1, 1)]).unwrap();
        assert_eq!(depth_first(&g, &0).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_dfs_root_not_in_graph() {
        let g = make_chain(3);
        assert_eq!(
            depth_first(&g, &99).unwrap_err(),
            GraphError::UnknownVertex("99".to_string())
        );
    }

    #[test]
    fn test_dfs_repeatable() {
        let g = make_diamond();
        let first = depth_first(&g, &0).unwrap();
        let second = depth_first(&g, &0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_dfs_deep_chain() {
        let g = make_chain(200_000);
        assert_eq!(depth_first(&g, &0).unwrap().len(), 200_000);
    }

    #[rstest]
    #[case(0, 4, true)]
    #[case(0, 0, true)]
    #[case(4, 4, true)]
    #[case(4, 0, false)]
    #[case(2, 1, false)]
    #[case(0, 9, false)]
    #[case(9, 0, false)]
    fn test_reachable(#[case] root: u64, #[case] target: u64, #[case] expected: bool) {
        let g = make_diamond();
        assert_eq!(reachable(&g, &root, &target).unwrap(), expected);
    }

    #[test]
    fn test_reachable_unknown_vertex() {
        let g = make_diamond();
        assert!(matches!(reachable(&g, &0, &42), Err(GraphError::UnknownVertex(_))));
        assert!(matches!(reachable(&g, &42, &0), Err(GraphError::UnknownVertex(_))));
    }

    #[test]
    fn test_reachable_cycle() {
        let g = make_cycle(6);
        assert!(reachable(&g, &5, &4).unwrap());
    }

    #[test]
    fn test_bfs_chain() {
        let g = make_chain(5);
        let order: Vec<u64> = breadth_first(&g, &0).unwrap().collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_bfs_layer_order() {
        let g = make_diamond();
        let order: Vec<u64> = breadth_first(&g, &0).unwrap().collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_bfs_star() {
        let g = make_star(0, 50);
        let order: Vec<u64> = breadth_first(&g, &0).unwrap().collect();
        assert_eq!(order.len(), 51);
        assert_eq!(order[0], 0);
        // Leaves have no outgoing edges
        assert_eq!(breadth_first(&g, &7).unwrap().count(), 1);
    }

    #[test]
    fn test_bfs_cycle_no_duplicates() {
        let g = make_cycle(10);
        let mut order: Vec<u64> = breadth_first(&g, &0).unwrap().collect();
        assert_eq!(order.len(), 10);
        order.sort();
        order.dedup();
        assert_eq!(order.len(), 10);
    }

    #[test]
    fn test_bfs_is_lazy() {
        let g = make_chain(1000);
        let mut bfs = breadth_first(&g, &0).unwrap();
        assert_eq!(bfs.next(), Some(0));
        assert_eq!(bfs.next(), Some(1));
        // A fresh call starts clean regardless of the first iterator's state
        let fresh: Vec<u64> = breadth_first(&g, &0).unwrap().take(3).collect();
        assert_eq!(fresh, vec![0, 1, 2]);
    }

    #[test]
    fn test_bfs_root_not_in_graph() {
        let g = make_chain(3);
        assert!(matches!(breadth_first(&g, &7), Err(GraphError::UnknownVertex(_))));
    }

    #[test]
    fn test_layers() {
        let g = make_diamond();
        let layers = breadth_first_layers(&g, &0, None).unwrap();
        assert_eq!(layers, vec![vec![0], vec![1, 2], vec![3], vec![4]]);
    }

    #[rstest]
    #[case(0, vec![vec![0]])]
    #[case(1, vec![vec![0], vec![1, 2]])]
    #[case(2, vec![vec![0], vec![1, 2], vec![3]])]
    #[case(10, vec![vec![0], vec![1, 2], vec![3], vec![4]])]
    fn test_layers_depth_limited(#[case] max_depth: u32, #[case] expected: Vec<Vec<u64>>) {
        let g = make_diamond();
        assert_eq!(breadth_first_layers(&g, &0, Some(max_depth)).unwrap(), expected);
    }

    #[test]
    fn test_fewest_hops_chain() {
        let g = make_chain(5);
        assert_eq!(fewest_hops_path(&g, &0, &4).unwrap(), Some(vec![0, 1, 2, 3, 4]));
    }

    #[test]
    fn test_fewest_hops_ignores_weights() {
        // Direct edge is heavy, detour is light: fewest hops still takes it
        let g = Graph::from_edges(vec![(0, 2, 100), (0, 1, 1), (1, 2, 1)]).unwrap();
        assert_eq!(fewest_hops_path(&g, &0, &2).unwrap(), Some(vec![0, 2]));
    }

    #[test]
    fn test_fewest_hops_self() {
        let g = make_chain(3);
        assert_eq!(fewest_hops_path(&g, &1, &1).unwrap(), Some(vec![1]));
    }

    #[test]
    fn test_fewest_hops_no_path() {
        let g = make_chain(3);
        assert_eq!(fewest_hops_path(&g, &2, &0).unwrap(), None);
    }

    #[test]
    fn test_fewest_hops_unknown_target() {
        let g = make_chain(3);
        assert!(matches!(
            fewest_hops_path(&g, &0, &5),
            Err(GraphError::UnknownVertex(_))
        ));
    }
}
