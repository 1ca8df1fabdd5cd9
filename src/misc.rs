// This file contains miscellaneous functions used by various parts of Rescaf.

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

use indicatif::{ProgressBar, ProgressStyle};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{prelude::*, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;


pub mod strand {
    // This module lets me use strand::FORWARD for true and strand::REVERSE for false.
    pub const FORWARD: bool = true;
    pub const REVERSE: bool = false;
}


pub fn check_if_file_exists(filename: &PathBuf) {
    // Quits with an error if the given path is not an existing file.
    let path = Path::new(filename);
    if !path.exists() {
        quit_with_error(&format!("file does not exist: {}", path.display()));
    }
    if !path.is_file() {
        quit_with_error(&format!("{} is not a file", path.display()));
    }
}


#[cfg(not(test))]
pub fn quit_with_error(text: &str) -> ! {
    // For friendly error messages, this function normally just prints the error and quits.
    eprintln!();
    eprintln!("Error: {}", text);
    std::process::exit(1);
}
#[cfg(test)]
pub fn quit_with_error(text: &str) -> ! {
    // But when running unit tests, this function instead panics so I can catch it for the test.
    panic!("{}", text);
}


pub fn load_file_lines(filename: &Path) -> Result<Vec<String>> {
    // Loads a text file into a vector of lines. Works on both unzipped and gzipped files.
    let file = File::open(filename)?;
    let reader: Box<dyn Read> = if is_file_gzipped(filename)? { Box::new(GzDecoder::new(file)) }
                                                         else { Box::new(file) };
    let reader = BufReader::new(reader);
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    Ok(lines)
}


fn is_file_gzipped(filename: &Path) -> Result<bool> {
    // This function returns true if the file appears to be gzipped (based on the first two bytes)
    // and false if not. Files shorter than two bytes are not gzipped.
    let file = File::open(filename)?;
    let mut reader = BufReader::new(file);
    let mut buf = [0u8; 2];
    match reader.read_exact(&mut buf) {
        Ok(_) => Ok(buf[0] == 31 && buf[1] == 139),
        Err(_) => Ok(false),
    }
}


pub fn format_float(num: f64) -> String {
    // Formats a float with up to six decimal places but then drops trailing zeros.
    let mut formatted = format!("{:.6}", num);
    if !formatted.contains('.') { return formatted }
    while formatted.chars().last().unwrap() == '0' { formatted.pop(); }
    if formatted.chars().last().unwrap() == '.' { formatted.pop(); }
    formatted
}


pub fn weighted_median_f64(values_and_weights: &[(f64, usize)]) -> f64 {
    // Returns the weighted median: the smallest value at which the cumulative weight reaches half
    // the total weight. Used for the graph's baseline coverage, where node lengths are weights so
    // a swarm of short repeat nodes can't drag the baseline around.
    if values_and_weights.is_empty() { return 0.0; }
    let mut sorted_values = values_and_weights.to_vec();
    sorted_values.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let total: usize = sorted_values.iter().map(|(_, w)| w).sum();
    let mut cumulative = 0;
    for (value, weight) in &sorted_values {
        cumulative += weight;
        if cumulative * 2 >= total {
            return *value;
        }
    }
    sorted_values.last().unwrap().0
}


pub fn format_duration(duration: std::time::Duration) -> String {
    let microseconds = duration.as_micros() % 1000000;
    let seconds = duration.as_secs() % 60;
    let minutes = (duration.as_secs() / 60) % 60;
    let hours = (duration.as_secs() / 60) / 60;
    format!("{:02}:{:02}:{:02}.{:06}", hours, minutes, seconds, microseconds)
}


pub fn sign_at_end(id: &str, dir: bool) -> String {
    if dir {
        format!("{}+", id)
    } else {
        format!("{}-", id)
    }
}


pub fn spinner(message: &str) -> ProgressBar {
    if cfg!(test) {
        ProgressBar::hidden() // don't show a spinner during unit tests
    } else {
        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&vec!["⠋", "⠙", "⠚", "⠞", "⠖", "⠦", "⠴", "⠲", "⠳", "⠓"])  // dots3 from github.com/sindresorhus/cli-spinners
                .template("{spinner} {msg}").unwrap(),
        );
        pb.set_message(message.to_string().clone());
        pb
    }
}
