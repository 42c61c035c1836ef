// src/main.rs

use std::env;
use std::path::Path;
use std::process::ExitCode;

use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use BlackBox_Tuner::plot_functions::render_report_plots;
use BlackBox_Tuner::{analyze, crate_version, report_string};

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <input_file.csv> [weight] [size] [style] [--plots]");
    eprintln!("  size:   propeller size in mm (e.g. 65mm) or frame size in inches (e.g. 5\" or 5in)");
    eprintln!("  style:  freestyle (default), cinematic or racing");
    eprintln!("  --plots also write Gyro Spectrum, Step Response and Setpoint/Gyro SVG charts next to the input");
    eprintln!("  Log verbosity follows RUST_LOG (default: info). Logs go to stderr, the report to stdout.");
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the JSON report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Argument Parsing ---
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("BlackBox_Tuner");

    let mut render_plots = false;
    let mut positional: Vec<&str> = Vec::new();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--plots" => render_plots = true,
            "-h" | "--help" => {
                print_usage(program);
                return ExitCode::SUCCESS;
            }
            "-V" | "--version" => {
                println!("{program} {}", crate_version());
                return ExitCode::SUCCESS;
            }
            other => positional.push(other),
        }
    }

    let Some(&input_file) = positional.first() else {
        println!("{}", json!({ "error": "No file path provided" }));
        print_usage(program);
        return ExitCode::FAILURE;
    };
    let weight = positional.get(1).copied();
    let size = positional.get(2).copied();
    let style = positional.get(3).copied().unwrap_or("freestyle");

    let input_path = Path::new(input_file);
    let outcome = analyze(input_path, weight, size, style);

    match &outcome {
        Ok(result) if render_plots => {
            let root_name = input_path.file_stem().unwrap_or_default().to_string_lossy();
            let output_dir = input_path.parent().unwrap_or_else(|| Path::new("."));
            let written = render_report_plots(result, output_dir, &root_name);
            tracing::info!("Wrote {} chart(s).", written.len());
        }
        Ok(_) => {}
        Err(e) => tracing::error!("Analysis failed: {}", e),
    }

    println!("{}", report_string(&outcome));
    ExitCode::SUCCESS
}
