// This file defines Rescaf's error type. Graph loading errors are fatal for the load that
// produced them, while per-read errors (ambiguous evidence, conflicting collapsed edges) are
// recoverable: the pipeline skips the offending read group and carries on.

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

use thiserror::Error;


pub type Result<T> = std::result::Result<T, RescafError>;


#[derive(Error, Debug)]
pub enum RescafError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The graph file is structurally invalid. No partially-loaded graph is ever returned.
    #[error("malformed graph at line {line}: {message}")]
    MalformedGraph { line: usize, message: String },

    /// A referenced node id does not exist in the graph instance.
    #[error("node {node_id} is not present in the graph")]
    MissingNode { node_id: String },

    /// The alignment evidence for a read supports more than one equally-good path.
    #[error("ambiguous alignment evidence for read {read_id}")]
    AmbiguousPath { read_id: String },

    /// An edge with this derived identity already exists with materially different attributes.
    #[error("edge {edge_id} already exists with different attributes")]
    DuplicateEdgeConflict { edge_id: String },

    /// An edge was appended to a path that it cannot stitch onto.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("malformed path file at line {line}: {message}")]
    MalformedPathFile { line: usize, message: String },
}
