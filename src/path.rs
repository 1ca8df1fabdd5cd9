// This file defines the BidirectedPath struct: an ordered, direction-consistent walk of edges
// from a root node. Paths serve two roles: evidence paths (what one read's alignments imply
// about the original graph) and collapse paths (the provenance a reduced edge carries).

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

use std::fmt;

use crate::edge::BidirectedEdge;
use crate::error::{RescafError, Result};
use crate::misc::{sign_at_end, strand};


#[derive(Clone, Debug, PartialEq)]
pub struct BidirectedPath {
    root: String,
    edges: Vec<BidirectedEdge>,
    end_node: String,

    /// Traversal orientation at the root, None until the first edge is added (a single-node
    /// path has no orientation of its own).
    root_dir: Option<bool>,

    /// Traversal orientation at the end node, None until the first edge is added.
    end_dir: Option<bool>,
}

impl BidirectedPath {
    pub fn new(root: &str) -> Self {
        BidirectedPath { root: root.to_string(), edges: Vec::new(),
                         end_node: root.to_string(), root_dir: None, end_dir: None }
    }

    pub fn edges(&self) -> &[BidirectedEdge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn end_node(&self) -> &str {
        &self.end_node
    }

    pub fn end_dir(&self) -> Option<bool> {
        self.end_dir
    }

    pub fn add_edge(&mut self, edge: BidirectedEdge, exit_dir: bool) -> Result<()> {
        // Appends an edge to the path, leaving the current end node with the given orientation.
        // Beyond the first edge the exit orientation must match the orientation the path is
        // travelling with, otherwise the spelling would not be a real walk of the graph. The
        // traversal is resolved per endpoint, so a self-loop steps through whichever of its two
        // ends the walk actually exits.
        if !edge.touches(&self.end_node) {
            return Err(RescafError::InvalidPath(format!(
                "edge {} does not touch path end node {}", edge.id(), self.end_node)));
        }
        if let Some(end_dir) = self.end_dir {
            if exit_dir != end_dir {
                return Err(RescafError::InvalidPath(format!(
                    "path does not travel through node {} in that orientation", self.end_node)));
            }
        }
        let (next, next_dir) = match edge.traverse(&self.end_node, exit_dir) {
            Some((next, next_dir)) => (next.to_string(), next_dir),
            None => return Err(RescafError::InvalidPath(format!(
                "edge {} leaves the wrong side of node {}", edge.id(), self.end_node))),
        };
        if self.root_dir.is_none() {
            self.root_dir = Some(exit_dir);
        }
        self.end_node = next;
        self.end_dir = Some(next_dir);
        self.edges.push(edge);
        Ok(())
    }

    pub fn oriented_nodes(&self) -> Vec<(String, bool)> {
        // The ordered (node, orientation) pairs the path visits. A zero-edge path is reported as
        // its root on the forward strand.
        let mut cur_dir = match self.root_dir {
            Some(dir) => dir,
            None => return vec![(self.root.clone(), strand::FORWARD)],
        };
        let mut cur = self.root.clone();
        let mut nodes = vec![(cur.clone(), cur_dir)];
        for edge in &self.edges {
            match edge.traverse(&cur, cur_dir) {
                Some((next, next_dir)) => {
                    cur = next.to_string();
                    cur_dir = next_dir;
                    nodes.push((cur.clone(), cur_dir));
                },
                None => break,  // unreachable for a path built through add_edge
            }
        }
        nodes
    }

    pub fn spelling(&self) -> String {
        // Renders the path like "1+5-3+". A zero-edge path spells as just its root id.
        if self.edges.is_empty() {
            return self.root.clone();
        }
        self.oriented_nodes().iter()
            .map(|(id, dir)| sign_at_end(id, *dir))
            .collect::<Vec<_>>().join("")
    }
}

impl fmt::Display for BidirectedPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.spelling())
    }
}


pub fn parse_node_chain(chain_str: &str) -> Result<Vec<(String, bool)>> {
    // Parses a comma-delimited chain of oriented node ids, e.g. "55+,24-,3+".
    let mut chain = Vec::new();
    for piece in chain_str.split(',') {
        let piece = piece.trim();
        let dir = if piece.ends_with('+') { true } else if piece.ends_with('-') { false } else {
            return Err(RescafError::InvalidPath(format!(
                "node {} has no orientation marker", piece)));
        };
        let id = &piece[..piece.len() - 1];
        if id.is_empty() {
            return Err(RescafError::InvalidPath("chain contains an empty node id".to_string()));
        }
        chain.push((id.to_string(), dir));
    }
    Ok(chain)
}
