// This file defines the Alignment struct (one read-to-node alignment record) and the thin SAM
// text adapter that produces them. Record parsing sits at the boundary: the core only ever sees
// an ordered stream of Alignment values.

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

use std::path::Path;

use crate::misc::load_file_lines;
use crate::error::Result;


#[derive(Clone, Debug)]
pub struct Alignment {
    pub read_id: String,
    pub node_id: String,
    pub mapq: u8,
    pub unmapped: bool,

    /// true = the read aligns to the node's forward strand.
    pub strand: bool,

    /// Read coordinates of the aligned stretch (clips excluded), always in the read's own
    /// orientation so sorting by query_start gives the visiting order.
    pub query_start: usize,
    pub query_end: usize,
}

impl Alignment {
    pub fn from_sam_line(line: &str) -> Option<Self> {
        // Parses the eleven mandatory SAM columns. Returns None for lines that can't be parsed
        // (the caller logs and skips them).
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 11 {
            return None;
        }
        let read_id = parts[0].to_string();
        let flag: u16 = parts[1].parse().ok()?;
        let unmapped = flag & 0x4 != 0;
        let strand = flag & 0x10 == 0;
        let node_id = node_id_from_ref_name(parts[2]);
        parts[3].parse::<usize>().ok()?;  // POS must at least be numeric
        let mapq: u8 = parts[4].parse().ok()?;
        let (leading_clip, aligned, trailing_clip) = scan_cigar(parts[5])?;
        let query_start = if strand { leading_clip } else { trailing_clip };
        Some(Alignment {
            read_id, node_id, mapq, unmapped, strand,
            query_start, query_end: query_start + aligned,
        })
    }
}


fn scan_cigar(cigar: &str) -> Option<(usize, usize, usize)> {
    // Returns (leading clip, aligned query length, trailing clip). An absent CIGAR ("*",
    // unmapped records) yields zeros.
    if cigar == "*" {
        return Some((0, 0, 0));
    }
    let (mut leading_clip, mut aligned, mut trailing_clip) = (0, 0, 0);
    let mut num = 0;
    let mut seen_aligned = false;
    for c in cigar.chars() {
        if let Some(digit) = c.to_digit(10) {
            num = num * 10 + digit as usize;
            continue;
        }
        match c {
            'S' | 'H' => if seen_aligned { trailing_clip += num } else { leading_clip += num },
            'M' | '=' | 'X' | 'I' => { aligned += num; seen_aligned = true },
            'D' | 'N' | 'P' => { seen_aligned = true },
            _ => return None,
        }
        num = 0;
    }
    Some((leading_clip, aligned, trailing_clip))
}


pub fn node_id_from_ref_name(ref_name: &str) -> String {
    // SPAdes/fastg-style reference names ("NODE_55_length_1234_cov_2.5" or "EDGE_55_...") map to
    // the bare node id; anything else is used verbatim.
    for prefix in ["NODE_", "EDGE_"] {
        if let Some(rest) = ref_name.strip_prefix(prefix) {
            if let Some(id) = rest.split('_').next() {
                if !id.is_empty() {
                    return id.to_string();
                }
            }
        }
    }
    ref_name.to_string()
}


pub fn read_sam_file(sam_filename: &Path) -> Result<Vec<Alignment>> {
    // Loads all alignment records from a SAM file, preserving the file's order (the stream is
    // expected to be grouped by read, as the aligner emitted it).
    let mut alignments = Vec::new();
    for (i, line) in load_file_lines(sam_filename)?.iter().enumerate() {
        if line.starts_with('@') || line.trim().is_empty() {
            continue;
        }
        match Alignment::from_sam_line(line) {
            Some(alignment) => alignments.push(alignment),
            None => eprintln!("skipping unparseable SAM line {}", i + 1),
        }
    }
    Ok(alignments)
}
