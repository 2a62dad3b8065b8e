// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: emit the 16 named camera placements for a scan as JSON
//!
//! The placements feed an external renderer that shares only the raw scan
//! with the analysis pipeline.
//!
//! Usage:
//!   plan-views <scan.obj> [--output PATH]

use room_scan::{camera, load_obj, RoomFrame, ScanError};
use std::env;
use std::fs;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let scan_path = &args[1];
    let mut output_path = String::from("camera_views.json");

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                output_path = args[i].clone();
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    println!("[1/2] Loading scan: {}", scan_path);
    let frame = load_frame(scan_path).unwrap_or_else(|e| {
        eprintln!("Error: Cannot load scan '{}': {}", scan_path, e);
        std::process::exit(1);
    });

    println!("[2/2] Writing {} placements: {}", 16, output_path);
    let views = camera::placements(&frame);
    let json = serde_json::to_string_pretty(&views).unwrap_or_else(|e| {
        eprintln!("Error: Cannot serialize placements: {}", e);
        std::process::exit(1);
    });
    if let Err(e) = fs::write(&output_path, json) {
        eprintln!("Error: Cannot write '{}': {}", output_path, e);
        std::process::exit(1);
    }
    println!("Done");
}

fn load_frame(path: &str) -> Result<RoomFrame, ScanError> {
    let cloud = load_obj(path)?;
    RoomFrame::from_cloud(&cloud).ok_or(ScanError::EmptyCloud)
}

fn print_usage() {
    println!("plan-views - camera placements for scan rendering");
    println!();
    println!("Usage:");
    println!("  plan-views <scan.obj> [--output PATH]");
}
