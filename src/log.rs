// This file contains functions for logging the program's progress to stderr.

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

use chrono::Local;
use colored::Colorize;


pub fn section_header(text: &str) {
    let now = Local::now();
    let date = now.format("%Y-%m-%d %H:%M:%S");
    let header = format!("{} - {}", date, text);
    eprintln!();
    eprintln!("{}", header.bold().bright_yellow().underline());
}


pub fn explanation(text: &str) {
    let terminal_width = match term_size::dimensions() {
        Some((width, _)) => width,
        None => 80,
    };
    let mut wrapped_text = String::new();
    for line in textwrap::wrap(text, terminal_width - 1) {
        wrapped_text.push_str(&line);
        wrapped_text.push('\n');
    }
    eprintln!("{}", wrapped_text.dimmed());
}
