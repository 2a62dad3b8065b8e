// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: analyze a 3D room scan (OBJ) into a structured JSON report
//!
//! Usage:
//!   analyze-scan <scan.obj> [options]

use room_scan::{analyze_cloud, load_obj, HeuristicConfig, Measurements};
use std::env;
use std::fs;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let scan_path = &args[1];

    // Parse options
    let mut output_path = String::from("scan_analysis.json");
    let mut config = HeuristicConfig::default();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                output_path = args[i].clone();
            }
            "--shelf-height" => {
                i += 1;
                config.shelf_top_height = args[i].parse().expect("Invalid shelf height value");
            }
            "--baffle-offset" => {
                i += 1;
                config.baffle_offset = args[i].parse().expect("Invalid baffle offset value");
            }
            "--speaker-width" => {
                i += 1;
                config.speaker_width = args[i].parse().expect("Invalid speaker width value");
            }
            "--speaker-height" => {
                i += 1;
                config.speaker_height = args[i].parse().expect("Invalid speaker height value");
            }
            "--speaker-depth" => {
                i += 1;
                config.speaker_depth = args[i].parse().expect("Invalid speaker depth value");
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    println!("=== Room Scan Analyzer ===");
    println!();

    // Step 1: Load scan
    println!("[1/4] Loading scan: {}", scan_path);
    let cloud = load_obj(scan_path).unwrap_or_else(|e| {
        eprintln!("Error: Cannot load scan '{}': {}", scan_path, e);
        std::process::exit(1);
    });
    println!("  Vertices: {}", cloud.len());

    // Step 2: Analyze
    println!("[2/4] Analyzing regions and measurements...");
    let report = analyze_cloud(&cloud, &config).unwrap_or_else(|e| {
        eprintln!("Error: Analysis failed: {}", e);
        std::process::exit(1);
    });
    let populated = report.regions.iter().filter(|r| r.vertex_count > 0).count();
    println!("  Regions with points: {}/{}", populated, report.regions.len());

    // Step 3: Serialize
    println!("[3/4] Writing report: {}", output_path);
    let json = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        eprintln!("Error: Cannot serialize report: {}", e);
        std::process::exit(1);
    });
    if let Err(e) = fs::write(&output_path, json) {
        eprintln!("Error: Cannot write '{}': {}", output_path, e);
        std::process::exit(1);
    }

    // Step 4: Summary
    println!("[4/4] Done");
    println!();
    println!("=== Summary ===");
    let dims = &report.room.dimensions_mm;
    println!(
        "Room: {}mm x {}mm x {}mm",
        dims.width_x, dims.depth_z, dims.height_y
    );
    print_measurement_summary(&report.measurements);
}

fn print_measurement_summary(m: &Measurements) {
    if let Some(distance) = m.speaker_center_distance_mm {
        println!("Speaker center distance: {}mm", distance);
    }
    if let Some(spk) = &m.left_speaker {
        if let Some(from_wall) = spk.from_left_wall_mm {
            println!(
                "Left speaker: {}mm from left wall, tweeter at {}mm",
                from_wall, spk.tweeter_height_mm
            );
        }
    }
    if let Some(spk) = &m.right_speaker {
        if let Some(from_wall) = spk.from_right_wall_mm {
            println!(
                "Right speaker: {}mm from right wall, tweeter at {}mm",
                from_wall, spk.tweeter_height_mm
            );
        }
    }
    if let Some(shelf) = &m.left_shelf {
        println!("Left shelf: height {}mm", shelf.height_mm);
    }
    if let Some(rack) = &m.left_rack {
        println!("Left rack: depth {}mm from front wall", rack.depth_mm);
    }
    if let Some(lp) = &m.listening_point {
        println!(
            "Listening point: {}mm from front wall, ear height {}mm",
            lp.from_front_wall_mm, lp.ear_height_estimated_mm
        );
    }
}

fn print_usage() {
    println!("analyze-scan - room scan analysis");
    println!();
    println!("Usage:");
    println!("  analyze-scan <scan.obj> [options]");
    println!();
    println!("Options:");
    println!("  --output PATH           Output JSON path (default: scan_analysis.json)");
    println!("  --shelf-height M        Shelf top height above floor in meters (default: 0.6)");
    println!("  --baffle-offset M       Baffle distance from front wall in meters (default: 0.28)");
    println!("  --speaker-width M       Speaker cabinet width in meters (default: 0.38)");
    println!("  --speaker-height M      Speaker cabinet height in meters (default: 0.58)");
    println!("  --speaker-depth M       Speaker cabinet depth in meters (default: 0.27)");
}
