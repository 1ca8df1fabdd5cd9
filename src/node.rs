// This file defines the Node struct: one contig in the assembly graph. Nodes carry only what the
// repeat-resolution logic needs (id, length and coverage depth), and sequences stay in the
// input file. Uniqueness is not stored here: it is a function of coverage that the graph computes on
// demand, so it can never go stale.

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

use crate::error::{RescafError, Result};


#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub length: usize,
    pub coverage: f64,
}

impl Node {
    pub fn new(id: &str, length: usize, coverage: f64) -> Self {
        Node { id: id.to_string(), length, coverage }
    }

    pub fn from_segment_line(line: &str, line_num: usize) -> Result<Self> {
        // Parses a GFA S line: S <id> <seq|*> [LN:i:<len>] DP:f:<cov>. The length comes from the
        // sequence when present, from the LN tag otherwise.
        let parts: Vec<&str> = line.trim_end_matches('\n').split('\t').collect();
        if parts.len() < 3 {
            return Err(RescafError::MalformedGraph {
                line: line_num, message: "segment line does not have enough parts".to_string() });
        }
        let id = parts[1];
        if id.is_empty() {
            return Err(RescafError::MalformedGraph {
                line: line_num, message: "segment line has an empty id".to_string() });
        }
        let length = if parts[2] != "*" {
            parts[2].len()
        } else {
            parts.iter().find_map(|p| p.strip_prefix("LN:i:"))
                .and_then(|v| v.parse::<usize>().ok())
                .ok_or_else(|| RescafError::MalformedGraph {
                    line: line_num,
                    message: format!("segment {} has no sequence and no LN:i: tag", id) })?
        };
        let coverage = parts.iter().find_map(|p| p.strip_prefix("DP:f:"))
            .and_then(|v| v.parse::<f64>().ok())
            .ok_or_else(|| RescafError::MalformedGraph {
                line: line_num,
                message: format!("segment {} has no depth tag (e.g. DP:f:10.0)", id) })?;
        Ok(Node::new(id, length, coverage))
    }
}
