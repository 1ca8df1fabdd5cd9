// This is the main file of Rescaf and where execution starts. It mainly handles the CLI and
// then calls into other files to run whichever subcommand the user chose.

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

use std::path::PathBuf;
use clap::{Parser, Subcommand, crate_version};

mod alignment;
mod contig_paths;
mod edge;
mod error;
mod graph;
mod ingest;
mod log;
mod misc;
mod node;
mod path;
mod reducer;
mod resolver;
mod test_gfa;


#[derive(Parser)]
#[clap(name = "Rescaf",
       version = concat!("v", crate_version!()),
       about = "a tool for resolving repeats in assembly graphs with long reads\n\
                Documenation: https://github.com/rrwick/Rescaf/wiki",
       before_help = concat!(r#"  _____                     __ "#, "\n",
                             r#" |  __ \                   / _|"#, "\n",
                             r#" | |__) |___  ___  ___ __ _| |_ "#, "\n",
                             r#" |  _  // _ \/ __|/ __/ _` |  _|"#, "\n",
                             r#" | | \ \  __/\__ \ (_| (_| | |  "#, "\n",
                             r#" |_|  \_\___||___/\___\__,_|_|  "#))]
#[command(author, version, long_about = None, disable_help_subcommand = true,
          propagate_version = true)]
#[clap(subcommand_required = true)]
#[clap(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {

    /// resolve repeats using long-read alignments
    Resolve {
        /// Input assembly graph in GFA format (required)
        #[clap(short = 'i', long = "in_gfa", required = true)]
        in_gfa: PathBuf,

        /// Long-read alignments to the graph's nodes in SAM format (required)
        #[clap(short = 's', long = "sam", required = true)]
        sam: PathBuf,

        /// Output GFA file for the simplified graph (required)
        #[clap(short = 'o', long = "out_gfa", required = true)]
        out_gfa: PathBuf,

        /// Ignore alignments with a mapping quality below this value
        #[clap(long = "min_mapq", default_value = "10")]
        min_mapq: u8,

        /// Lower bound of the single-copy coverage band (fraction of median coverage)
        #[clap(long = "low", default_value = "0.5")]
        low: f64,

        /// Upper bound of the single-copy coverage band (fraction of median coverage)
        #[clap(long = "high", default_value = "1.5")]
        high: f64,
    },

    /// resolve repeats using an assembler's contig paths
    Paths {
        /// Input assembly graph in GFA format (required)
        #[clap(short = 'i', long = "in_gfa", required = true)]
        in_gfa: PathBuf,

        /// Contig paths file from the assembler (required)
        #[clap(short = 'p', long = "paths", required = true)]
        paths: PathBuf,

        /// Output GFA file for the simplified graph (required)
        #[clap(short = 'o', long = "out_gfa", required = true)]
        out_gfa: PathBuf,

        /// Lower bound of the single-copy coverage band (fraction of median coverage)
        #[clap(long = "low", default_value = "0.5")]
        low: f64,

        /// Upper bound of the single-copy coverage band (fraction of median coverage)
        #[clap(long = "high", default_value = "1.5")]
        high: f64,
    },
}


fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Resolve { in_gfa, sam, out_gfa, min_mapq, low, high }) => {
            ingest::resolve(in_gfa, sam, out_gfa, min_mapq, low, high);
        },
        Some(Commands::Paths { in_gfa, paths, out_gfa, low, high }) => {
            contig_paths::paths(in_gfa, paths, out_gfa, low, high);
        },
        None => {}
    }
}
