// This file defines the BidirectedGraph struct: the store for one graph instance's nodes and
// edges. Two instances exist during a run: the original graph (read-only after load, used for
// path resolution) and the simplified graph (progressively reduced). They are related only by
// shared node-id strings, never by shared references, so mutating one cannot alias the other.

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use fxhash::FxHashMap;

use crate::edge::{derive_id, BidirectedEdge};
use crate::error::{RescafError, Result};
use crate::misc::{format_float, load_file_lines, weighted_median_f64};
use crate::node::Node;
use crate::path::BidirectedPath;


pub const DEFAULT_UNIQUE_LOW: f64 = 0.5;
pub const DEFAULT_UNIQUE_HIGH: f64 = 1.5;


pub struct BidirectedGraph {
    pub nodes: FxHashMap<String, Node>,
    pub edges: FxHashMap<String, BidirectedEdge>,
    adjacency: FxHashMap<String, Vec<String>>,

    /// Length-weighted median coverage, the baseline for the single-copy band. Set at load time;
    /// node coverages are never mutated afterwards, so it cannot go stale.
    pub median_coverage: f64,
    pub unique_low: f64,
    pub unique_high: f64,
}

impl Default for BidirectedGraph {
    fn default() -> Self {
        BidirectedGraph { nodes: FxHashMap::default(), edges: FxHashMap::default(),
                          adjacency: FxHashMap::default(), median_coverage: 0.0,
                          unique_low: DEFAULT_UNIQUE_LOW, unique_high: DEFAULT_UNIQUE_HIGH }
    }
}

impl BidirectedGraph {
    pub fn from_gfa_file(gfa_filename: &Path) -> Result<Self> {
        let gfa_lines = load_file_lines(gfa_filename)?;
        Self::from_gfa_lines(&gfa_lines)
    }

    pub fn from_gfa_lines(gfa_lines: &[String]) -> Result<Self> {
        // Builds a graph from GFA text. Any structural problem (dangling link endpoint, duplicate
        // segment with conflicting attributes, missing depth) fails the whole load: the partially
        // built value is dropped here and never escapes.
        let mut graph = BidirectedGraph::default();
        let mut link_lines: Vec<(usize, &str)> = Vec::new();
        for (i, line) in gfa_lines.iter().enumerate() {
            let line_num = i + 1;
            match line.split('\t').next() {
                Some("S") => {
                    let node = Node::from_segment_line(line, line_num)?;
                    if let Some(existing) = graph.nodes.get(&node.id) {
                        if *existing != node {
                            return Err(RescafError::MalformedGraph {
                                line: line_num,
                                message: format!("duplicate segment {} with conflicting \
                                                  attributes", node.id) });
                        }
                    } else {
                        graph.nodes.insert(node.id.clone(), node);
                    }
                },
                Some("L") => link_lines.push((line_num, line)),
                _ => {}  // headers, paths and unknown line types are ignored
            }
        }
        for (line_num, line) in link_lines {
            graph.add_link_line(line, line_num)?;
        }
        graph.median_coverage = weighted_median_f64(
            &graph.nodes.values().map(|n| (n.coverage, n.length)).collect::<Vec<_>>());
        Ok(graph)
    }

    fn add_link_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        // Parses a GFA L line: L <a> <+/-> <b> <+/-> <overlap>. GFA orientation maps onto the
        // bidirected direction flags as: dir_a = (s1 == '+'), dir_b = (s2 == '-'). Mirror lines
        // (the same link written from the other side) collapse onto one edge.
        let parts: Vec<&str> = line.trim_end_matches('\n').split('\t').collect();
        if parts.len() < 5 {
            return Err(RescafError::MalformedGraph {
                line: line_num, message: "link line does not have enough parts".to_string() });
        }
        let (a, s1, b, s2) = (parts[1], parts[2], parts[3], parts[4]);
        if (s1 != "+" && s1 != "-") || (s2 != "+" && s2 != "-") {
            return Err(RescafError::MalformedGraph {
                line: line_num, message: "link line has an invalid orientation".to_string() });
        }
        for node_id in [a, b] {
            if !self.nodes.contains_key(node_id) {
                return Err(RescafError::MalformedGraph {
                    line: line_num,
                    message: format!("link refers to nonexistent node: {}", node_id) });
            }
        }
        let edge = BidirectedEdge::new(a, s1 == "+", b, s2 == "-");
        if !self.edges.contains_key(&edge.id()) {
            self.insert_edge(edge);
        }
        Ok(())
    }

    fn insert_edge(&mut self, edge: BidirectedEdge) -> String {
        let id = edge.id();
        self.adjacency.entry(edge.node_a.clone()).or_default().push(id.clone());
        if edge.node_b != edge.node_a {
            self.adjacency.entry(edge.node_b.clone()).or_default().push(id.clone());
        }
        self.edges.insert(id.clone(), edge);
        id
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_edge(&self, id: &str) -> Option<&BidirectedEdge> {
        self.edges.get(id)
    }

    pub fn has_edge(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    pub fn set_unique_band(&mut self, low: f64, high: f64) {
        self.unique_low = low;
        self.unique_high = high;
    }

    pub fn is_unique(&self, node: &Node) -> bool {
        // A node is unique (single-copy) when its coverage sits inside the band around the
        // graph's baseline coverage. Computed fresh on every call, nothing is cached.
        self.median_coverage > 0.0
            && node.coverage >= self.unique_low * self.median_coverage
            && node.coverage <= self.unique_high * self.median_coverage
    }

    pub fn is_unique_id(&self, id: &str) -> bool {
        self.get_node(id).map(|n| self.is_unique(n)).unwrap_or(false)
    }

    pub fn add_edge(&mut self, node_a: &str, dir_a: bool, node_b: &str, dir_b: bool,
                    path: Option<BidirectedPath>) -> Result<String> {
        // Creates the edge or returns the existing matching one (idempotent). An existing edge
        // with the same derived identity but different provenance is a data-consistency problem
        // and is rejected, leaving the existing edge untouched.
        for node_id in [node_a, node_b] {
            if !self.nodes.contains_key(node_id) {
                return Err(RescafError::MissingNode { node_id: node_id.to_string() });
            }
        }
        let id = derive_id(node_a, dir_a, node_b, dir_b);
        if let Some(existing) = self.edges.get(&id) {
            if existing.path == path {
                return Ok(id);
            }
            return Err(RescafError::DuplicateEdgeConflict { edge_id: id });
        }
        let mut edge = BidirectedEdge::new(node_a, dir_a, node_b, dir_b);
        edge.path = path;
        Ok(self.insert_edge(edge))
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        // Removes an edge by its derived identity. Removing an absent edge is a no-op (returns
        // false). Nodes are never removed, even when this leaves them isolated.
        match self.edges.remove(id) {
            Some(edge) => {
                for node_id in [&edge.node_a, &edge.node_b] {
                    if let Some(edge_ids) = self.adjacency.get_mut(node_id) {
                        edge_ids.retain(|e| e != id);
                    }
                }
                true
            },
            None => false,
        }
    }

    pub fn edges_from(&self, node_id: &str, orientation: bool) -> Vec<&BidirectedEdge> {
        // All edges usable to leave the given node when traversing it with the given orientation
        // (the edge's direction flag at that endpoint must match). Sorted by edge id so callers
        // iterate deterministically.
        let mut result: Vec<&BidirectedEdge> = Vec::new();
        if let Some(edge_ids) = self.adjacency.get(node_id) {
            for id in edge_ids {
                let edge = &self.edges[id];
                let usable = if edge.node_a == edge.node_b {
                    edge.dir_a == orientation || edge.dir_b == orientation
                } else if edge.node_a == node_id {
                    edge.dir_a == orientation
                } else {
                    edge.dir_b == orientation
                };
                if usable {
                    result.push(edge);
                }
            }
        }
        result.sort_by_key(|e| e.id());
        result
    }

    pub fn path_from_chain(&self, chain: &[(String, bool)]) -> Result<BidirectedPath> {
        // Converts an oriented node chain (e.g. parsed from "55+,24-") into a path over this
        // graph's edges. Every consecutive pair must be joined by an existing edge whose
        // direction flags agree with the chain's orientations.
        if chain.is_empty() {
            return Err(RescafError::InvalidPath("empty node chain".to_string()));
        }
        for (node_id, _) in chain {
            if !self.nodes.contains_key(node_id) {
                return Err(RescafError::MissingNode { node_id: node_id.clone() });
            }
        }
        let mut path = BidirectedPath::new(&chain[0].0);
        for pair in chain.windows(2) {
            let ((cur, cur_dir), (next, next_dir)) = (&pair[0], &pair[1]);
            let edge_id = derive_id(cur, *cur_dir, next, !*next_dir);
            let edge = self.get_edge(&edge_id).ok_or_else(|| RescafError::InvalidPath(
                format!("no edge joins {}{} to {}{}",
                        cur, if *cur_dir {'+'} else {'-'},
                        next, if *next_dir {'+'} else {'-'})))?;
            path.add_edge(edge.clone(), *cur_dir)?;
        }
        Ok(path)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn save_gfa(&self, gfa_filename: &Path) -> Result<()> {
        // Writes the graph back out as GFA. Node and edge lines are sorted by id so the output is
        // deterministic. Collapsed edges get a PT:Z: tag spelling out their original sub-path
        // (traceability only, it is not parsed back on load).
        let mut file = File::create(gfa_filename)?;
        writeln!(file, "H\tVN:Z:1.0")?;
        let mut node_ids: Vec<&String> = self.nodes.keys().collect();
        node_ids.sort();
        for id in node_ids {
            let node = &self.nodes[id];
            writeln!(file, "S\t{}\t*\tLN:i:{}\tDP:f:{}",
                     node.id, node.length, format_float(node.coverage))?;
        }
        let mut edge_ids: Vec<&String> = self.edges.keys().collect();
        edge_ids.sort();
        for id in edge_ids {
            let edge = &self.edges[id];
            let path_tag = match &edge.path {
                Some(path) => format!("\tPT:Z:{}", path.spelling()),
                None => String::new(),
            };
            writeln!(file, "L\t{}\t{}\t{}\t{}\t0M{}",
                     edge.node_a, if edge.dir_a {'+'} else {'-'},
                     edge.node_b, if edge.dir_b {'-'} else {'+'}, path_tag)?;
        }
        Ok(())
    }

    pub fn print_basic_graph_info(&self) {
        eprintln!("{} node{}, {} edge{}",
                  self.node_count(), match self.node_count() { 1 => "", _ => "s" },
                  self.edge_count(), match self.edge_count() { 1 => "", _ => "s" });
        eprintln!("median coverage: {}", format_float(self.median_coverage));
        eprintln!();
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::misc::strand;
    use crate::test_gfa::*;

    #[test]
    fn test_load_graph() {
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.median_coverage, 1.1);
        assert!(graph.has_edge("1+2-"));
        assert!(graph.has_edge("2+3-"));
        assert!(graph.has_edge("3+4-"));

        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_2()).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.median_coverage, 1.0);
    }

    #[test]
    fn test_mirror_link_lines_collapse() {
        let mut lines = get_test_gfa_1();
        lines.push("L\t2\t-\t1\t-\t0M".to_string());  // mirror of L 1 + 2 +
        let graph = BidirectedGraph::from_gfa_lines(&lines).unwrap();
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_malformed_graphs() {
        // dangling link endpoint
        let mut lines = get_test_gfa_1();
        lines.push("L\t1\t+\t99\t+\t0M".to_string());
        assert!(matches!(BidirectedGraph::from_gfa_lines(&lines),
                         Err(RescafError::MalformedGraph { .. })));

        // duplicate segment with conflicting attributes
        let mut lines = get_test_gfa_1();
        lines.push("S\t1\t*\tLN:i:123\tDP:f:9.0".to_string());
        assert!(matches!(BidirectedGraph::from_gfa_lines(&lines),
                         Err(RescafError::MalformedGraph { .. })));

        // duplicate segment with identical attributes is fine
        let mut lines = get_test_gfa_1();
        lines.push("S\t1\t*\tLN:i:5000\tDP:f:1.0".to_string());
        assert!(BidirectedGraph::from_gfa_lines(&lines).is_ok());

        // missing depth tag
        let lines = vec!["S\t1\t*\tLN:i:100".to_string()];
        assert!(matches!(BidirectedGraph::from_gfa_lines(&lines),
                         Err(RescafError::MalformedGraph { .. })));
    }

    #[test]
    fn test_get_node() {
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        assert_eq!(graph.get_node("1").unwrap().length, 5000);
        assert!(graph.get_node("99").is_none());  // absence is not an error
    }

    #[test]
    fn test_is_unique() {
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        assert!(graph.is_unique_id("1"));   // cov 1.0, inside [0.55, 1.65]
        assert!(graph.is_unique_id("4"));   // cov 1.1
        assert!(!graph.is_unique_id("2"));  // cov 2.6, repeat
        assert!(!graph.is_unique_id("3"));  // cov 2.4, repeat
        assert!(!graph.is_unique_id("99"));

        let mut graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        graph.set_unique_band(0.1, 3.0);
        assert!(graph.is_unique_id("2"));  // band is configurable
    }

    #[test]
    fn test_add_edge_idempotent() {
        let mut graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        let before = graph.edge_count();
        let id = graph.add_edge("1", strand::FORWARD, "2", strand::REVERSE, None).unwrap();
        assert_eq!(id, "1+2-");
        assert_eq!(graph.edge_count(), before);  // existing edge reused, not duplicated

        // the mirror orientation is the same edge too
        let id = graph.add_edge("2", strand::REVERSE, "1", strand::FORWARD, None).unwrap();
        assert_eq!(id, "1+2-");
        assert_eq!(graph.edge_count(), before);

        let id = graph.add_edge("1", strand::REVERSE, "4", strand::FORWARD, None).unwrap();
        assert_eq!(id, "1-4+");
        assert_eq!(graph.edge_count(), before + 1);
    }

    #[test]
    fn test_add_edge_conflicts() {
        let mut graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        let sub_path = graph.path_from_chain(
            &[("1".to_string(), true), ("2".to_string(), true)]).unwrap();
        assert!(matches!(
            graph.add_edge("1", strand::FORWARD, "2", strand::REVERSE, Some(sub_path)),
            Err(RescafError::DuplicateEdgeConflict { .. })));
        assert!(graph.get_edge("1+2-").unwrap().path.is_none());  // existing edge untouched

        assert!(matches!(graph.add_edge("1", strand::FORWARD, "99", strand::FORWARD, None),
                         Err(RescafError::MissingNode { .. })));
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        assert!(graph.remove_edge("1+2-"));
        assert_eq!(graph.edge_count(), 2);
        assert!(!graph.remove_edge("1+2-"));  // absent id is a no-op
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.get_node("1").is_some());  // nodes always survive edge removal
        assert!(graph.get_node("2").is_some());
        assert!(graph.edges_from("1", strand::FORWARD).is_empty());
    }

    #[test]
    fn test_edges_from() {
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_2()).unwrap();
        let out: Vec<String> = graph.edges_from("1", strand::FORWARD)
            .iter().map(|e| e.id()).collect();
        assert_eq!(out, vec!["1+2-", "1+3-"]);  // sorted by id
        assert!(graph.edges_from("1", strand::REVERSE).is_empty());
        let out: Vec<String> = graph.edges_from("4", strand::REVERSE)
            .iter().map(|e| e.id()).collect();
        assert_eq!(out, vec!["2+4-", "3+4-"]);
    }

    #[test]
    fn test_path_from_chain() {
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        let chain = crate::path::parse_node_chain("1+,2+,3+,4+").unwrap();
        let path = graph.path_from_chain(&chain).unwrap();
        assert_eq!(path.spelling(), "1+2+3+4+");
        assert_eq!(path.edge_count(), 3);

        let chain = crate::path::parse_node_chain("1+,3+").unwrap();
        assert!(matches!(graph.path_from_chain(&chain),
                         Err(RescafError::InvalidPath(_))));  // nodes are not adjacent

        let chain = crate::path::parse_node_chain("1+,99+").unwrap();
        assert!(matches!(graph.path_from_chain(&chain), Err(RescafError::MissingNode { .. })));
    }

    #[test]
    fn test_self_loops() {
        let graph = BidirectedGraph::from_gfa_lines(&get_test_gfa_5()).unwrap();
        assert!(graph.has_edge("2+2-"));
        let out: Vec<String> = graph.edges_from("2", strand::FORWARD)
            .iter().map(|e| e.id()).collect();
        assert_eq!(out, vec!["2+2-", "2+3-"]);
        let out: Vec<String> = graph.edges_from("2", strand::REVERSE)
            .iter().map(|e| e.id()).collect();
        assert_eq!(out, vec!["1+2-", "2+2-"]);

        // a tandem loop traversed on the reverse strand keeps its orientation
        let chain = crate::path::parse_node_chain("2-,2-").unwrap();
        assert_eq!(graph.path_from_chain(&chain).unwrap().spelling(), "2-2-");
        let chain = crate::path::parse_node_chain("2+,2+").unwrap();
        assert_eq!(graph.path_from_chain(&chain).unwrap().spelling(), "2+2+");
    }

    #[test]
    fn test_independent_instances() {
        // The original/simplified pair is two loads of the same file: same node ids, but
        // mutating one must leave the other alone.
        let original = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        let mut simplified = BidirectedGraph::from_gfa_lines(&get_test_gfa_1()).unwrap();
        for id in original.nodes.keys() {
            assert!(simplified.get_node(id).is_some());
        }
        simplified.remove_edge("1+2-");
        assert!(original.has_edge("1+2-"));
    }
}
