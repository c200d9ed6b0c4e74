use std::collections::HashMap;

use anyhow::ensure;
use serde::Serialize;
use wgraph_core::{
    breadth_first, depth_first, enumerate_permutations, factorial, fibonacci,
    find_anagram_indices, longest_unique_substring_len, shortest_paths, Distance, Graph,
    GraphError, VertexId,
};

const FIXTURE_VERTICES: [VertexId; 7] = [11, 22, 33, 44, 55, 66, 77];

/// Undirected links of the fixture; each becomes two directed edges.
const FIXTURE_LINKS: [(VertexId, VertexId, i64); 12] = [
    (11, 22, 5),
    (22, 33, 6),
    (11, 44, 3),
    (44, 55, 2),
    (11, 55, 6),
    (22, 55, 2),
    (22, 77, 3),
    (22, 66, 7),
    (55, 77, 9),
    (33, 77, 5),
    (77, 66, 1),
    (33, 66, 2),
];

pub fn fixture() -> Result<Graph, GraphError> {
    let mut graph = Graph::with_capacity(FIXTURE_VERTICES.len());
    for id in FIXTURE_VERTICES {
        graph.add_vertex(id)?;
    }
    for (a, b, w) in FIXTURE_LINKS {
        graph.add_undirected_edge(a, b, w)?;
    }
    Ok(graph)
}

#[derive(Debug, Serialize)]
struct Route {
    target: VertexId,
    distance: Option<Distance>,
    path: Option<Vec<VertexId>>,
}

#[derive(Debug, Serialize)]
struct DemoReport {
    source: VertexId,
    depth_first: Vec<VertexId>,
    breadth_first: Vec<VertexId>,
    routes: Vec<Route>,
}

fn demo_report(graph: &Graph, source: VertexId) -> Result<DemoReport, GraphError> {
    let sp = shortest_paths(graph, &source)?;
    let routes = sp
        .iter()
        .filter(|&(&id, _)| id != source)
        .map(|(&id, entry)| Route {
            target: id,
            distance: entry.distance,
            path: sp.path_to(&id).ok(),
        })
        .collect();

    Ok(DemoReport {
        source,
        depth_first: depth_first(graph, &source)?,
        breadth_first: breadth_first(graph, &source)?.collect(),
        routes,
    })
}

/// Print shortest paths from `source` to every other fixture vertex.
pub fn run_demo(source: VertexId, json: bool) -> anyhow::Result<()> {
    let graph = fixture()?;
    let report = demo_report(&graph, source)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("DFS from {}: {:?}", source, report.depth_first);
    println!("BFS from {}: {:?}", source, report.breadth_first);
    println!();
    for route in &report.routes {
        match (&route.path, route.distance) {
            (Some(path), Some(d)) => println!("{} --> {:?} d = {}", source, path, d),
            _ => println!("{} --> {} unreachable", source, route.target),
        }
    }
    Ok(())
}

/// Run the string and counting utilities over fixed sample inputs.
pub fn run_exercises() -> anyhow::Result<()> {
    let anagram_cases = [
        ("cbaebabacd", "abc"),
        ("cbaebaaacd", "aaa"),
        ("abaebabaab", "aab"),
        ("abab", "ab"),
        ("", ""),
    ];
    for (text, pattern) in anagram_cases {
        println!(
            "Anagrams of {:?} in {:?} @ {:?}",
            pattern,
            text,
            find_anagram_indices(text, pattern)
        );
    }

    println!();
    for input in ["ABCDEFGH", "AABB", "A", ""] {
        let result = enumerate_permutations(input);
        let expected = factorial(input.chars().count() as u32);
        ensure!(
            expected == Some(u128::from(result.generated)),
            "permutations of {input:?}: generated {}, expected {expected:?}",
            result.generated
        );
        println!(
            "Permutations of {:?}: {} generated, {} distinct",
            input, result.generated, result.distinct
        );
    }

    println!();
    let n = 10;
    let mut memo = HashMap::new();
    let memoized = fibonacci(n, Some(&mut memo));
    let naive = fibonacci(n, None);
    if let (Some(memoized), Some(naive)) = (memoized, naive) {
        println!(
            "fibo({}) = {}, recursed {} times (memoized)",
            n, memoized.value, memoized.calls
        );
        println!(
            "fibo({}) = {}, recursed {} times (naive)",
            n, naive.value, naive.calls
        );
    }

    println!();
    for text in ["", "abcabcbb", "bbbbb", "pwwkew"] {
        println!(
            "Longest substring of {:?} without repeats = {}",
            text,
            longest_unique_substring_len(text)
        );
    }
    Ok(())
}
