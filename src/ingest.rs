// This file contains the code for the rescaf resolve subcommand, along with the alignment
// ingestion pipeline it drives: alignments are grouped by read, each group is resolved into a
// path over the original graph and the path is applied to the simplified graph.

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::alignment::{read_sam_file, Alignment};
use crate::error::RescafError;
use crate::graph::BidirectedGraph;
use crate::log::{section_header, explanation};
use crate::misc::{check_if_file_exists, format_duration, quit_with_error, spinner};
use crate::reducer::reduce;
use crate::resolver::find_read_path;


pub fn resolve(in_gfa: PathBuf, sam: PathBuf, out_gfa: PathBuf,
               min_mapq: u8, low: f64, high: f64) {
    let start_time = Instant::now();
    check_settings(&in_gfa, &sam, low, high);
    starting_message();
    print_settings(&in_gfa, &sam, &out_gfa, min_mapq, low, high);
    let (original, mut simplified) = load_graphs(&in_gfa, low, high);
    let alignments = load_alignments(&sam);
    apply_reads(&original, &mut simplified, alignments, min_mapq);
    save_result(&simplified, &out_gfa);
    finished_message(start_time, out_gfa);
}


fn check_settings(in_gfa: &PathBuf, sam: &PathBuf, low: f64, high: f64) {
    check_if_file_exists(in_gfa);
    check_if_file_exists(sam);
    if low < 0.0 {
        quit_with_error("--low cannot be negative");
    }
    if low >= high {
        quit_with_error("--low must be less than --high");
    }
}


fn starting_message() {
    section_header("Starting rescaf resolve");
    explanation("This command uses long-read alignments to resolve repeats in an assembly \
                 graph. Each read's alignments are threaded into a path through the graph, and \
                 repeat runs between single-copy nodes are collapsed into edges that join those \
                 nodes directly.");
}


fn print_settings(in_gfa: &Path, sam: &Path, out_gfa: &Path, min_mapq: u8, low: f64, high: f64) {
    eprintln!("Settings:");
    eprintln!("  --in_gfa {}", in_gfa.display());
    eprintln!("  --sam {}", sam.display());
    eprintln!("  --out_gfa {}", out_gfa.display());
    eprintln!("  --min_mapq {}", min_mapq);
    eprintln!("  --low {}", low);
    eprintln!("  --high {}", high);
    eprintln!();
}


fn load_graphs(in_gfa: &Path, low: f64, high: f64) -> (BidirectedGraph, BidirectedGraph) {
    // Loads the input GFA twice: the original graph stays fixed and answers path and uniqueness
    // queries, while the simplified graph is the one that gets reduced and saved.
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


fn load_alignments(sam: &Path) -> Vec<Alignment> {
    section_header("Loading alignments");
    explanation("Long-read alignments are now loaded from the SAM file. Records stay in file \
                 order, so each read's alignments form one consecutive group.");
    let alignments = match read_sam_file(sam) {
        Ok(alignments) => alignments,
        Err(e) => quit_with_error(&e.to_string()),
    };
    eprintln!("{} alignment record{}", alignments.len(),
              match alignments.len() { 1 => "", _ => "s" });
    eprintln!();
    alignments
}


fn apply_reads(original: &BidirectedGraph, simplified: &mut BidirectedGraph,
               alignments: Vec<Alignment>, min_mapq: u8) {
    section_header("Resolving repeats");
    explanation("Each read is now resolved into a graph path and applied to the graph. Reads \
                 whose placement is ambiguous or that contradict an earlier read are reported \
                 and skipped.");
    let pb = spinner("applying reads...");
    let stats = resolve_and_reduce(original, simplified, alignments, min_mapq);
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
pub struct PipelineStats {
    pub read_count: usize,
    pub resolved_count: usize,
    pub effective_count: usize,
    pub ambiguous_count: usize,
    pub conflicting_count: usize,
}

impl PipelineStats {
    fn print(&self) {
        eprintln!("{} read{} processed", self.read_count,
                  match self.read_count { 1 => "", _ => "s" });
        eprintln!("  {} resolved into a path", self.resolved_count);
        eprintln!("  {} changed the graph", self.effective_count);
        eprintln!("  {} ambiguous", self.ambiguous_count);
        eprintln!("  {} conflicting", self.conflicting_count);
        eprintln!();
    }
}


/// Groups a stream of alignments by read id. Grouping is strictly consecutive (SAM files from
/// long-read aligners keep each read's records together), so this never buffers more than one
/// read's worth of alignments.
pub struct ReadGroups<I: Iterator<Item = Alignment>> {
    alignments: Peekable<I>,
}

pub fn group_by_read<I>(alignments: I) -> ReadGroups<I::IntoIter>
        where I: IntoIterator<Item = Alignment> {
    ReadGroups { alignments: alignments.into_iter().peekable() }
}

impl<I: Iterator<Item = Alignment>> Iterator for ReadGroups<I> {
    type Item = (String, Vec<Alignment>);

    fn next(&mut self) -> Option<Self::Item> {
        // The final group is produced like any other: running out of input closes the group
        // rather than dropping it.
        let first = self.alignments.next()?;
        let read_id = first.read_id.clone();
        let mut group = vec![first];
        while let Some(next) = self.alignments.peek() {
            if next.read_id != read_id {
                break;
            }
            group.extend(self.alignments.next());
        }
        Some((read_id, group))
    }
}


pub fn resolve_and_reduce(original: &BidirectedGraph, simplified: &mut BidirectedGraph,
                          alignments: Vec<Alignment>, min_mapq: u8) -> PipelineStats {
    // Runs the whole pipeline over an alignment stream. Problems are contained per read: an
    // ambiguous or conflicting read is counted and skipped, never aborting the run.
    let mut stats = PipelineStats::default();
    for (read_id, group) in group_by_read(alignments) {
        stats.read_count += 1;
        let group: Vec<Alignment> = group.into_iter()
            .filter(|a| !a.unmapped && a.mapq >= min_mapq).collect();
        match find_read_path(original, &read_id, &group) {
            Ok(Some(path)) => {
                match reduce(original, simplified, &path) {
                    Ok(true) => stats.effective_count += 1,
                    Ok(false) => {},
                    Err(RescafError::DuplicateEdgeConflict { edge_id }) => {
                        stats.conflicting_count += 1;
                        eprintln!("read {} contradicts collapsed edge {}", read_id, edge_id);
                    },
                    Err(e) => eprintln!("read {} could not be applied: {}", read_id, e),
                }
                stats.resolved_count += 1;
            },
            Ok(None) => {},
            Err(RescafError::AmbiguousPath { .. }) => {
                stats.ambiguous_count += 1;
                eprintln!("read {} has an ambiguous placement", read_id);
            },
            Err(e) => eprintln!("read {} could not be resolved: {}", read_id, e),
        }
    }
    stats
}
