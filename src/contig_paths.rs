// This file contains the code for the rescaf paths subcommand: instead of read alignments, the
// resolved paths come from an assembler's contig paths file (SPAdes-style .paths format), and
// each one is applied to the simplified graph the same way a read path would be.

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{RescafError, Result};
use crate::graph::BidirectedGraph;
use crate::log::{section_header, explanation};
use crate::misc::{check_if_file_exists, format_duration, load_file_lines, quit_with_error,
                  spinner};
use crate::path::parse_node_chain;
use crate::reducer::reduce;


pub fn paths(in_gfa: PathBuf, paths_file: PathBuf, out_gfa: PathBuf, low: f64, high: f64) {
    let start_time = Instant::now();
    check_settings(&in_gfa, &paths_file, low, high);
    starting_message();
    print_settings(&in_gfa, &paths_file, &out_gfa, low, high);
    let (original, mut simplified) = load_graphs(&in_gfa, low, high);
    apply_paths(&original, &mut simplified, &paths_file);
    save_result(&simplified, &out_gfa);
    finished_message(start_time, out_gfa);
}


fn check_settings(in_gfa: &PathBuf, paths_file: &PathBuf, low: f64, high: f64) {
    check_if_file_exists(in_gfa);
    check_if_file_exists(paths_file);
    if low < 0.0 {
        quit_with_error("--low cannot be negative");
    }
    if low >= high {
        quit_with_error("--low must be less than --high");
    }
}


fn starting_message() {
    section_header("Starting rescaf paths");
    explanation("This command resolves repeats in an assembly graph using the contig paths an \
                 assembler wrote alongside it. Each contig path is threaded through the graph \
                 and its repeat runs are collapsed, exactly as read paths are in rescaf \
                 resolve.");
}


fn print_settings(in_gfa: &Path, paths_file: &Path, out_gfa: &Path, low: f64, high: f64) {
    eprintln!("Settings:");
    eprintln!("  --in_gfa {}", in_gfa.display());
    eprintln!("  --paths {}", paths_file.display());
    eprintln!("  --out_gfa {}", out_gfa.display());
    eprintln!("  --low {}", low);
    eprintln!("  --high {}", high);
    eprintln!();
}


fn load_graphs(in_gfa: &Path, low: f64, high: f64) -> (BidirectedGraph, BidirectedGraph) {
    section_header("Loading assembly graph");
    explanation("The assembly graph is now loaded into memory, and the length-weighted median \
                 coverage defines which nodes count as single-copy.");
    let mut original = match BidirectedGraph::from_gfa_file(in_gfa) {
        Ok(graph) => graph,
        Err(e) => quit_with_error(&e.to_string()),
    };
    let mut simplified = match BidirectedGraph::from_gfa_file(in_gfa) {
        Ok(graph) => graph,
        Err(e) => quit_with_error(&e.to_string()),
    };
    original.set_unique_band(low, high);
    simplified.set_unique_band(low, high);
    original.print_basic_graph_info();
    (original, simplified)
}


fn apply_paths(original: &BidirectedGraph, simplified: &mut BidirectedGraph,
               paths_file: &Path) {
    section_header("Applying contig paths");
    explanation("Each contig path is now applied to the graph. Paths that cannot be threaded \
                 through the graph are reported and skipped.");
    let pb = spinner("applying paths...");
    let stats = match reduce_from_contig_paths(original, simplified, paths_file) {
        Ok(stats) => stats,
        Err(e) => quit_with_error(&e.to_string()),
    };
    pb.finish_and_clear();
    stats.print();
}


fn save_result(simplified: &BidirectedGraph, out_gfa: &Path) {
    section_header("Saving simplified graph");
    explanation("The simplified graph is now saved to file. Collapsed edges carry a PT tag \
                 spelling out the original path they replaced.");
    if let Err(e) = simplified.save_gfa(out_gfa) {
        quit_with_error(&e.to_string());
    }
    eprintln!("{} node{}, {} edge{} written", simplified.node_count(),
              match simplified.node_count() { 1 => "", _ => "s" }, simplified.edge_count(),
              match simplified.edge_count() { 1 => "", _ => "s" });
    eprintln!();
}


fn finished_message(start_time: Instant, out_gfa: PathBuf) {
    section_header("Finished!");
    eprintln!("Simplified graph: {}", out_gfa.display());
    eprintln!("Time to run: {}", format_duration(start_time.elapsed()));
    eprintln!();
}


#[derive(Default)]
pub struct ContigPathStats {
    pub fragment_count: usize,
    pub effective_count: usize,
    pub skipped_count: usize,
}

impl ContigPathStats {
    fn print(&self) {
        eprintln!("{} path fragment{} processed", self.fragment_count,
                  match self.fragment_count { 1 => "", _ => "s" });
        eprintln!("  {} changed the graph", self.effective_count);
        eprintln!("  {} skipped", self.skipped_count);
        eprintln!();
    }
}


/// Applies the paths in a SPAdes-style contig paths file to the simplified graph. The file
/// alternates contig name lines (starting with "NODE") and path lines. Each contig appears
/// twice, forward and reverse-complement, the latter under a name ending with a quote mark;
/// the reverse-complement entries describe the same walks, so they are skipped. A path line
/// can hold several semicolon-separated fragments (gaps in the contig's walk), each of which
/// is applied on its own. Bad fragments are reported and skipped, never aborting the run.
pub fn reduce_from_contig_paths(original: &BidirectedGraph, simplified: &mut BidirectedGraph,
                                paths_file: &Path) -> Result<ContigPathStats> {
    let mut stats = ContigPathStats::default();
    let mut skip_entry = false;
    for (i, line) in load_file_lines(paths_file)?.iter().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("NODE") {
            skip_entry = line.ends_with('\'');
            continue;
        }
        if skip_entry {
            continue;
        }
        for fragment in line.split(';') {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            stats.fragment_count += 1;
            match apply_fragment(original, simplified, fragment, i + 1) {
                Ok(true) => stats.effective_count += 1,
                Ok(false) => {},
                Err(e) => {
                    stats.skipped_count += 1;
                    eprintln!("{}", e);
                },
            }
        }
    }
    Ok(stats)
}


fn apply_fragment(original: &BidirectedGraph, simplified: &mut BidirectedGraph,
                  fragment: &str, line_num: usize) -> Result<bool> {
    let chain = parse_node_chain(fragment).map_err(|e| RescafError::MalformedPathFile {
        line: line_num, message: e.to_string() })?;
    let path = original.path_from_chain(&chain)?;
    reduce(original, simplified, &path)
}
