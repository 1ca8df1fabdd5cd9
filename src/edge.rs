// This file defines the BidirectedEdge struct: a junction between two nodes where each endpoint
// carries its own direction flag (true = the edge attaches to the end of that node's forward
// strand, i.e. the side you exit when traversing the node forward). An edge and its mirror are
// the same junction, so endpoints are stored in canonical order and the derived id is unique.

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

use crate::misc::sign_at_end;
use crate::path::BidirectedPath;


#[derive(Clone, Debug, PartialEq)]
pub struct BidirectedEdge {
    pub node_a: String,
    pub dir_a: bool,
    pub node_b: String,
    pub dir_b: bool,

    /// For collapsed edges, the original-graph sub-path this edge replaces. Plain pass-through
    /// edges carry None.
    pub path: Option<BidirectedPath>,
}

impl BidirectedEdge {
    pub fn new(node_a: &str, dir_a: bool, node_b: &str, dir_b: bool) -> Self {
        let ((node_a, dir_a), (node_b, dir_b)) = canonical_order(node_a, dir_a, node_b, dir_b);
        BidirectedEdge { node_a: node_a.to_string(), dir_a,
                         node_b: node_b.to_string(), dir_b, path: None }
    }

    pub fn id(&self) -> String {
        derive_id(&self.node_a, self.dir_a, &self.node_b, self.dir_b)
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.node_a == node_id || self.node_b == node_id
    }

    pub fn traverse(&self, node_id: &str, exit_dir: bool) -> Option<(&str, bool)> {
        // One step of a walk: leaving the given node with the given orientation, returns the
        // node the step arrives at and the traversal orientation on arrival. None if the edge
        // offers no such exit. Both endpoints are checked, so a self-loop resolves to the
        // endpoint the walk actually enters through.
        if self.node_a == node_id && self.dir_a == exit_dir {
            return Some((&self.node_b, !self.dir_b));
        }
        if self.node_b == node_id && self.dir_b == exit_dir {
            return Some((&self.node_a, !self.dir_a));
        }
        None
    }
}

impl fmt::Display for BidirectedEdge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}


pub fn derive_id(node_a: &str, dir_a: bool, node_b: &str, dir_b: bool) -> String {
    // Edge identity is derived from the two (node, direction) endpoint pairs, so an edge and its
    // mirror share one id and a graph can never hold both.
    let ((node_a, dir_a), (node_b, dir_b)) = canonical_order(node_a, dir_a, node_b, dir_b);
    format!("{}{}", sign_at_end(node_a, dir_a), sign_at_end(node_b, dir_b))
}


fn canonical_order<'a>(node_a: &'a str, dir_a: bool, node_b: &'a str, dir_b: bool)
        -> ((&'a str, bool), (&'a str, bool)) {
    if sign_at_end(node_b, dir_b) < sign_at_end(node_a, dir_a) {
        ((node_b, dir_b), (node_a, dir_a))
    } else {
        ((node_a, dir_a), (node_b, dir_b))
    }
}
