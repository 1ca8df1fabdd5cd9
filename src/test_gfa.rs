// This file contains GFA fixtures used by unit tests in other files.

// Copyright 2025 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/Rescaf

// This file is part of Rescaf. Rescaf is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version. Rescaf is
// distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the
// implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
// Public License for more details. You should have received a copy of the GNU General Public
// License along with Rescaf. If not, see <http://www.gnu.org/licenses/>.

#![allow(dead_code)]


pub fn get_test_gfa_1() -> Vec<String> {
    // A linear chain with unique anchors at both ends and a two-node repeat run in the middle
    // (length-weighted median coverage is 1.1, so the single-copy band is 0.55-1.65):
    //   1(unique) -> 2(repeat) -> 3(repeat) -> 4(unique)
    vec!["H\tVN:Z:1.0",
         "S\t1\t*\tLN:i:5000\tDP:f:1.0",
         "S\t2\t*\tLN:i:800\tDP:f:2.6",
         "S\t3\t*\tLN:i:700\tDP:f:2.4",
         "S\t4\t*\tLN:i:6000\tDP:f:1.1",
         "L\t1\t+\t2\t+\t0M",
         "L\t2\t+\t3\t+\t0M",
         "L\t3\t+\t4\t+\t0M",
    ].iter().map(|s| s.to_string()).collect()
}


pub fn get_test_gfa_2() -> Vec<String> {
    // Two parallel single-repeat routes between the same unique anchors (median coverage 1.0):
    //   1(u) -> 2(repeat) -> 4(u)  and  1(u) -> 3(repeat) -> 4(u)
    vec!["H\tVN:Z:1.0",
         "S\t1\t*\tLN:i:5000\tDP:f:1.0",
         "S\t2\t*\tLN:i:500\tDP:f:2.5",
         "S\t3\t*\tLN:i:500\tDP:f:2.5",
         "S\t4\t*\tLN:i:5200\tDP:f:1.0",
         "L\t1\t+\t2\t+\t0M",
         "L\t2\t+\t4\t+\t0M",
         "L\t1\t+\t3\t+\t0M",
         "L\t3\t+\t4\t+\t0M",
    ].iter().map(|s| s.to_string()).collect()
}


pub fn get_test_gfa_3() -> Vec<String> {
    // A short chain plus a disconnected unique node (median coverage 1.0):
    //   1(u) -> 2(repeat) -> 3(u)      4(u, isolated)
    vec!["H\tVN:Z:1.0",
         "S\t1\t*\tLN:i:4000\tDP:f:1.0",
         "S\t2\t*\tLN:i:600\tDP:f:2.0",
         "S\t3\t*\tLN:i:4500\tDP:f:1.0",
         "S\t4\t*\tLN:i:3000\tDP:f:1.05",
         "L\t1\t+\t2\t+\t0M",
         "L\t2\t+\t3\t+\t0M",
    ].iter().map(|s| s.to_string()).collect()
}


pub fn get_test_gfa_4() -> Vec<String> {
    // A chain whose middle node is traversed on its reverse strand (median coverage 1.0):
    //   1+ -> 2- -> 3+
    vec!["H\tVN:Z:1.0",
         "S\t1\t*\tLN:i:5000\tDP:f:1.0",
         "S\t2\t*\tLN:i:700\tDP:f:2.2",
         "S\t3\t*\tLN:i:5100\tDP:f:1.0",
         "L\t1\t+\t2\t-\t0M",
         "L\t2\t-\t3\t+\t0M",
    ].iter().map(|s| s.to_string()).collect()
}


pub fn get_test_gfa_5() -> Vec<String> {
    // A tandem repeat with a self-loop between unique anchors (median coverage 1.0):
    //   1(u) -> 2(repeat, loops back onto itself) -> 3(u)
    vec!["H\tVN:Z:1.0",
         "S\t1\t*\tLN:i:5000\tDP:f:1.0",
         "S\t2\t*\tLN:i:600\tDP:f:3.0",
         "S\t3\t*\tLN:i:5100\tDP:f:1.0",
         "L\t1\t+\t2\t+\t0M",
         "L\t2\t+\t2\t+\t0M",
         "L\t2\t+\t3\t+\t0M",
    ].iter().map(|s| s.to_string()).collect()
}
