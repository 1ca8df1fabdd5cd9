// This file contains the path resolver: the logic that turns one read's ordered alignments into
// a walk of the original graph. Consecutive aligned nodes are joined by a bounded search over
// the graph's edges, preferring connections that agree with the strand each alignment reported.

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

use crate::alignment::Alignment;
use crate::edge::BidirectedEdge;
use crate::error::{RescafError, Result};
use crate::graph::BidirectedGraph;
use crate::path::BidirectedPath;


/// Maximum number of edges a connecting chain between two consecutively-aligned nodes may use.
/// Long reads align to most nodes they cross, so consecutive alignments sit close together in
/// the graph and a small bound keeps the search cheap.
pub const MAX_CONNECTING_EDGES: usize = 3;


enum ChainSearch {
    Found(Vec<BidirectedEdge>),
    NotFound,
    Ambiguous,
}


/// Resolves one read's alignments into a path over the graph. Unmapped records and alignments to
/// nodes the graph lacks are dropped first; if nothing survives, there is no path (Ok(None)).
/// When two consecutive aligned nodes cannot be connected, the path built so far is returned
/// rather than discarded, so a read crossing a broken region still contributes its good half.
pub fn find_read_path(graph: &BidirectedGraph, read_id: &str,
                      alignments: &[Alignment]) -> Result<Option<BidirectedPath>> {
    let mut usable: Vec<&Alignment> = alignments.iter()
        .filter(|a| !a.unmapped && graph.get_node(&a.node_id).is_some())
        .collect();
    usable.sort_by_key(|a| (a.query_start, a.query_end));  // stable, so ties keep file order
    if usable.is_empty() {
        return Ok(None);
    }
    let first_dir = usable[0].strand;
    let mut path = BidirectedPath::new(&usable[0].node_id);
    for a in &usable[1..] {
        if a.node_id == path.end_node() {
            continue;  // split alignments to the same node add no connection
        }
        let end_node = path.end_node().to_string();
        let end_dir = path.end_dir().unwrap_or(first_dir);
        match best_chain(graph, &end_node, end_dir, &a.node_id, a.strand) {
            ChainSearch::Found(chain) => {
                let mut exit_dir = end_dir;
                for edge in chain {
                    path.add_edge(edge, exit_dir)?;
                    exit_dir = path.end_dir().unwrap_or(exit_dir);
                }
            },
            ChainSearch::NotFound => {
                eprintln!("read {} has no connection from node {} to node {}, \
                           keeping the partial path", read_id, end_node, a.node_id);
                break;
            },
            ChainSearch::Ambiguous => {
                return Err(RescafError::AmbiguousPath { read_id: read_id.to_string() });
            },
        }
    }
    Ok(Some(path))
}


fn best_chain(graph: &BidirectedGraph, start: &str, start_dir: bool,
              target: &str, target_dir: bool) -> ChainSearch {
    // Picks one chain of edges from (start, start_dir) to the target node. Chains whose arrival
    // orientation agrees with the alignment's strand outrank all others; within that, shorter
    // beats longer and the edge-id spelling breaks any remaining tie, so the choice is
    // deterministic. A lone strand-disagreeing chain is still accepted (the graph knows the
    // true orientation better than one noisy alignment), but several equally-short disagreeing
    // chains with nothing better is a genuinely ambiguous read.
    let mut chains: Vec<(Vec<BidirectedEdge>, bool)> = Vec::new();
    let mut prefix = Vec::new();
    collect_chains(graph, start, start_dir, target, &mut prefix, &mut chains);

    let chain_key = |chain: &[BidirectedEdge]| {
        (chain.len(),
         chain.iter().map(|e| e.id()).collect::<Vec<_>>().join(","))
    };
    let matching = chains.iter()
        .filter(|(_, arrival_dir)| *arrival_dir == target_dir)
        .min_by_key(|(chain, _)| chain_key(chain));
    if let Some((chain, _)) = matching {
        return ChainSearch::Found(chain.clone());
    }
    let mismatching: Vec<&Vec<BidirectedEdge>> = chains.iter().map(|(c, _)| c).collect();
    let best_len = match mismatching.iter().map(|c| c.len()).min() {
        Some(len) => len,
        None => return ChainSearch::NotFound,
    };
    let mut at_best: Vec<&&Vec<BidirectedEdge>> =
        mismatching.iter().filter(|c| c.len() == best_len).collect();
    if at_best.len() > 1 {
        return ChainSearch::Ambiguous;
    }
    match at_best.pop() {
        Some(chain) => ChainSearch::Found((*chain).clone()),
        None => ChainSearch::NotFound,
    }
}


fn collect_chains(graph: &BidirectedGraph, cur: &str, cur_dir: bool, target: &str,
                  prefix: &mut Vec<BidirectedEdge>,
                  chains: &mut Vec<(Vec<BidirectedEdge>, bool)>) {
    // Depth-first enumeration of edge chains from (cur, cur_dir) to the target node, at most
    // MAX_CONNECTING_EDGES edges long. A chain ends at its first arrival at the target; nodes
    // may repeat within a chain (that is the point of repeat resolution).
    if prefix.len() >= MAX_CONNECTING_EDGES {
        return;
    }
    for edge in graph.edges_from(cur, cur_dir) {
        let (next, next_dir) = match edge.traverse(cur, cur_dir) {
            Some((next, next_dir)) => (next.to_string(), next_dir),
            None => continue,
        };
        prefix.push(edge.clone());
        if next == target {
            chains.push((prefix.clone(), next_dir));
        } else {
            collect_chains(graph, &next, next_dir, target, prefix, chains);
        }
        prefix.pop();
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::misc::strand;
    use crate::test_gfa::*;

    fn aln(node: &str, strand: bool, query_start: usize) -> Alignment {
        Alignment { read_id: "read".to_string(), node_id: node.to_string(), mapq: 60,
                    unmapped: false, strand, query_start, query_end: query_start + 100 }
    }

    #[test]
    fn test_full_chain() {
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        let alignments = vec![aln("1", strand::FORWARD, 0),
                              aln("2", strand::FORWARD, 4900),
                              aln("3", strand::FORWARD, 5700),
                              aln("4", strand::FORWARD, 6400)];
        let path = find_read_path(&graph, "read", &alignments).unwrap().unwrap();
        assert_eq!(path.spelling(), "1+2+3+4+");
    }

    #[test]
    fn test_gap_bridged_by_search() {
        // No alignments to the repeat nodes at all: the search still finds the chain through
        // them, and with two equally-good strand-agreeing routes the edge-id order decides.
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_2()).unwrap();
        let alignments = vec![aln("1", strand::FORWARD, 0), aln("4", strand::FORWARD, 5000)];
        let path = find_read_path(&graph, "read", &alignments).unwrap().unwrap();
        assert_eq!(path.spelling(), "1+2+4+");
    }

    #[test]
    fn test_middle_evidence_beats_tie_break() {
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_2()).unwrap();
        let alignments = vec![aln("1", strand::FORWARD, 0),
                              aln("3", strand::FORWARD, 4900),
                              aln("4", strand::FORWARD, 5400)];
        let path = find_read_path(&graph, "read", &alignments).unwrap().unwrap();
        assert_eq!(path.spelling(), "1+3+4+");
    }

    #[test]
    fn test_ambiguous_read() {
        // The read claims to arrive at node 4 reversed, but every route arrives forward: two
        // equally-short disagreeing chains and nothing better is unresolvable.
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_2()).unwrap();
        let alignments = vec![aln("1", strand::FORWARD, 0), aln("4", strand::REVERSE, 5000)];
        assert!(matches!(find_read_path(&graph, "read", &alignments),
                         Err(RescafError::AmbiguousPath { .. })));
    }

    #[test]
    fn test_lone_disagreeing_chain_accepted() {
        // In the linear graph only one route exists, so a strand disagreement at the far end is
        // overridden by the graph's orientation.
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        let alignments = vec![aln("1", strand::FORWARD, 0), aln("2", strand::REVERSE, 4900)];
        let path = find_read_path(&graph, "read", &alignments).unwrap().unwrap();
        assert_eq!(path.spelling(), "1+2+");
    }

    #[test]
    fn test_partial_path_on_disconnection() {
        // Node 4 is isolated, so the path stops where the evidence runs out.
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_3()).unwrap();
        let alignments = vec![aln("1", strand::FORWARD, 0),
                              aln("2", strand::FORWARD, 3900),
                              aln("4", strand::FORWARD, 4600)];
        let path = find_read_path(&graph, "read", &alignments).unwrap().unwrap();
        assert_eq!(path.spelling(), "1+2+");
    }

    #[test]
    fn test_reverse_strand_traversal() {
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_4()).unwrap();
        let alignments = vec![aln("1", strand::FORWARD, 0),
                              aln("2", strand::REVERSE, 4900),
                              aln("3", strand::FORWARD, 5500)];
        let path = find_read_path(&graph, "read", &alignments).unwrap().unwrap();
        assert_eq!(path.spelling(), "1+2-3+");
    }

    #[test]
    fn test_nothing_usable() {
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        assert!(find_read_path(&graph, "read", &[]).unwrap().is_none());

        let mut unmapped = aln("1", strand::FORWARD, 0);
        unmapped.unmapped = true;
        let alignments = vec![unmapped, aln("99", strand::FORWARD, 100)];
        assert!(find_read_path(&graph, "read", &alignments).unwrap().is_none());
    }

    #[test]
    fn test_split_alignments_to_one_node() {
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        let alignments = vec![aln("1", strand::FORWARD, 0),
                              aln("1", strand::FORWARD, 2000),
                              aln("2", strand::FORWARD, 4900)];
        let path = find_read_path(&graph, "read", &alignments).unwrap().unwrap();
        assert_eq!(path.spelling(), "1+2+");
    }
}
