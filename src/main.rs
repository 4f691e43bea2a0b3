//! Page Latency Probe - Main CLI Application

use clap::Parser;
use page_latency_probe::{cli::Cli, error::AppError, App};
use std::{error::Error, process};

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    // Bad flag values are configuration errors: exit 1 rather than clap's 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };
    let use_color = cli.use_colors();

    let result = match App::new(cli) {
        Ok(app) => app.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("{}", e.format_for_console(use_color));

        if let Some(source) = e.source() {
            eprintln!("Caused by: {}", source);
        }

        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Pass the page with --url or set TARGET_URL");
            eprintln!("  - URLs must start with http:// or https://");
            eprintln!("  - Duration, threshold and pause must be positive numbers");
            eprintln!("  - Check your .env file format");
        }
        AppError::Io(_) => {
            eprintln!();
            eprintln!("Export troubleshooting:");
            eprintln!("  - Check that the output directory exists and is writable");
            eprintln!("  - Use --output to choose another path, or --no-export to skip the file");
        }
        AppError::Network(_) | AppError::Timeout(_) => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check your internet connection");
            eprintln!("  - Increase the transport timeout with --timeout");
        }
        _ => {}
    }
}
