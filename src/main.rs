// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Run one check of the sitemap and print the report
// 4. Exit with proper code (0 = all pages OK, 1 = failed pages, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker;   // src/checker/ - HTTP client and page checks
mod cli;       // src/cli.rs - command-line parsing
mod config;    // src/config.rs - settings and defaults
mod error;     // src/error.rs - error types
mod logging;   // src/logging.rs - tracing setup
mod pipeline;  // src/pipeline/ - producer, workers and consumer
mod process;   // src/process.rs - one complete run
mod progress;  // src/progress.rs - progress bar
mod report;    // src/report/ - table / CI / JSON output
mod source;    // src/source/ - sitemap download and parsing

use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use progress::Progress;

use anyhow::Result;

#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole chain: "Failed to download the sitemap: ..."
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every page answered 200
//   Ok(1) = some pages failed
//   Err   = the run could not be completed
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let config = cli.into_config();

    // Created before logging so log lines can be printed around the bar.
    // It is dropped (and cleared) before main prints any error.
    let progress = Progress::new(config.progress);
    logging::init_logging(verbose, progress.writer())?;

    let mut stdout = std::io::stdout();

    if process::run(&config, &progress, &mut stdout).await? {
        Ok(0)
    } else {
        Ok(1)
    }
}
