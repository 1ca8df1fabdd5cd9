// This file contains the graph reducer: it applies one resolved path to the simplified graph,
// detaching repeat runs from their unique neighbours and collapsing each run into a single new
// edge between the two unique anchor nodes. The collapsed edge keeps the run it replaced as its
// provenance path, so the simplification stays auditable.

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

use crate::edge::{derive_id, BidirectedEdge};
use crate::error::Result;
use crate::graph::BidirectedGraph;
use crate::path::BidirectedPath;


/// Applies one resolved path to the simplified graph. Uniqueness is always judged on the
/// original graph, whose coverages and median never change during a run. Returns whether the
/// simplified graph was actually modified, so callers can count effective paths.
pub fn reduce(original: &BidirectedGraph, simplified: &mut BidirectedGraph,
              path: &BidirectedPath) -> Result<bool> {
    if path.edge_count() == 0 {
        return Ok(false);
    }
    let oriented = path.oriented_nodes();
    let mut to_remove: Vec<String> = Vec::new();
    let mut to_add: Vec<(String, bool, String, bool, BidirectedPath)> = Vec::new();

    // One walk along the path. An anchor is a unique node the walk has reached; edges walked
    // while an anchor is open get collapsed when the next anchor closes the run. Each collapsed
    // edge keeps only its own run as provenance.
    let mut anchor: Option<usize> = None;
    let mut pending: Vec<BidirectedEdge> = Vec::new();
    for i in 0..path.edge_count() {
        let cur_unique = original.is_unique_id(&oriented[i].0);
        let next_unique = original.is_unique_id(&oriented[i + 1].0);
        if anchor.is_none() {
            if !cur_unique {
                continue;  // a leading repeat run has no anchor to collapse onto
            }
            anchor = Some(i);
            pending.clear();
        }
        let edge = &path.edges()[i];
        pending.push(edge.clone());
        if cur_unique != next_unique {
            // a unique/repeat junction edge gets detached from the simplified graph
            to_remove.push(edge.id());
        }
        if next_unique {
            if let Some(anchor_idx) = anchor {
                // A direct unique-to-unique edge is kept as-is, so only runs with at least one
                // interior repeat node produce a collapsed edge.
                if pending.len() >= 2 {
                    let (start, start_dir) = &oriented[anchor_idx];
                    let (end, end_dir) = &oriented[i + 1];
                    let mut sub_path = BidirectedPath::new(start);
                    let mut exit_dir = *start_dir;
                    for e in &pending {
                        sub_path.add_edge(e.clone(), exit_dir)?;
                        exit_dir = sub_path.end_dir().unwrap_or(exit_dir);
                    }
                    to_add.push((start.clone(), *start_dir, end.clone(), !*end_dir, sub_path));
                }
            }
            anchor = Some(i + 1);
            pending.clear();
        }
    }

    let mut changed = false;
    for id in &to_remove {
        changed |= simplified.remove_edge(id);
    }
    for (node_a, dir_a, node_b, dir_b, sub_path) in to_add {
        let is_new = !simplified.has_edge(&derive_id(&node_a, dir_a, &node_b, dir_b));
        simplified.add_edge(&node_a, dir_a, &node_b, dir_b, Some(sub_path))?;
        changed |= is_new;
    }
    Ok(changed)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RescafError;
    use crate::path::parse_node_chain;
    use crate::test_gfa::*;

    fn graphs(gfa: Vec<String>) -> (BidirectedGraph, BidirectedGraph) {
        (BidirectedGraph::from_gfa_lines(&gfa).unwrap(),
         BidirectedGraph::from_gfa_lines(&gfa).unwrap())
    }

    fn path_for(graph: &BidirectedGraph, chain_str: &str) -> BidirectedPath {
        graph.path_from_chain(&parse_node_chain(chain_str).unwrap()).unwrap()
    }

    #[test]
    fn test_collapse_repeat_run() {
        let (original, mut simplified) = graphs(get_test_gfa_1());
        let path = path_for(&original, "1+,2+,3+,4+");
        assert!(reduce(&original, &mut simplified, &path).unwrap());

        // junction edges detached, repeat-repeat edge kept, run collapsed onto the anchors
        assert!(!simplified.has_edge("1+2-"));
        assert!(!simplified.has_edge("3+4-"));
        assert!(simplified.has_edge("2+3-"));
        let collapsed = simplified.get_edge("1+4-").unwrap();
        assert_eq!(collapsed.path.as_ref().unwrap().spelling(), "1+2+3+4+");

        // nodes always survive, even the now-detached repeats
        for id in ["1", "2", "3", "4"] {
            assert!(simplified.get_node(id).is_some());
        }
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let (original, mut simplified) = graphs(get_test_gfa_1());
        let path = path_for(&original, "1+,2+,3+,4+");
        assert!(reduce(&original, &mut simplified, &path).unwrap());
        assert!(!reduce(&original, &mut simplified, &path).unwrap());  // nothing left to change
        assert_eq!(simplified.edge_count(), 2);  // 2+3- and 1+4-
    }

    #[test]
    fn test_single_node_path_is_a_no_op() {
        let (original, mut simplified) = graphs(get_test_gfa_1());
        let before = simplified.edge_count();
        let path = BidirectedPath::new("1");
        assert!(!reduce(&original, &mut simplified, &path).unwrap());
        assert_eq!(simplified.edge_count(), before);
    }

    #[test]
    fn test_run_without_second_anchor() {
        // The path enters a repeat but never reaches another unique node: the junction edge is
        // still detached, but no collapsed edge can be made.
        let (original, mut simplified) = graphs(get_test_gfa_3());
        let path = path_for(&original, "1+,2+");
        assert!(reduce(&original, &mut simplified, &path).unwrap());
        assert!(!simplified.has_edge("1+2-"));
        assert!(simplified.has_edge("2+3-"));
        assert_eq!(simplified.edge_count(), 1);
    }

    #[test]
    fn test_leading_repeat_is_left_alone() {
        // A path confined to repeat nodes has no anchor, so the simplified graph is untouched.
        let (original, mut simplified) = graphs(get_test_gfa_1());
        let path = path_for(&original, "2+,3+");
        assert!(!reduce(&original, &mut simplified, &path).unwrap());
        assert_eq!(simplified.edge_count(), 3);
    }

    #[test]
    fn test_conflicting_runs_between_same_anchors() {
        // Two reads claiming different repeat copies between the same anchor pair would give one
        // collapsed edge two different provenance paths, which is rejected.
        let (original, mut simplified) = graphs(get_test_gfa_2());
        let path_a = path_for(&original, "1+,2+,4+");
        assert!(reduce(&original, &mut simplified, &path_a).unwrap());
        assert_eq!(simplified.get_edge("1+4-").unwrap()
                       .path.as_ref().unwrap().spelling(), "1+2+4+");

        let path_b = path_for(&original, "1+,3+,4+");
        assert!(matches!(reduce(&original, &mut simplified, &path_b),
                         Err(RescafError::DuplicateEdgeConflict { .. })));

        // the same run again is fine (idempotent)
        assert!(!reduce(&original, &mut simplified, &path_a).unwrap());
    }

    #[test]
    fn test_collapse_run_with_self_loop() {
        // A read looping the tandem repeat twice: the loop edge is interior to the run, so it
        // stays in the simplified graph and the provenance spells the double traversal.
        let (original, mut simplified) = graphs(get_test_gfa_5());
        let path = path_for(&original, "1+,2+,2+,3+");
        assert!(reduce(&original, &mut simplified, &path).unwrap());
        assert!(!simplified.has_edge("1+2-"));
        assert!(!simplified.has_edge("2+3-"));
        assert!(simplified.has_edge("2+2-"));
        let collapsed = simplified.get_edge("1+3-").unwrap();
        assert_eq!(collapsed.path.as_ref().unwrap().spelling(), "1+2+2+3+");
    }

    #[test]
    fn test_reverse_strand_run() {
        let (original, mut simplified) = graphs(get_test_gfa_4());
        let path = path_for(&original, "1+,2-,3+");
        assert!(reduce(&original, &mut simplified, &path).unwrap());
        assert!(!simplified.has_edge("1+2+"));
        assert!(!simplified.has_edge("2-3-"));
        let collapsed = simplified.get_edge("1+3-").unwrap();
        assert_eq!(collapsed.path.as_ref().unwrap().spelling(), "1+2-3+");
    }
}
