// src/progress.rs
// =============================================================================
// Progress feedback on stderr while a run is going.
//
// Two stages:
// 1. a spinner saying "Loading sitemap" while the sitemap downloads
// 2. a bar "Loading page N / total" that moves once per finished page
//
// indicatif hides the bar on its own when stderr is not a terminal.
//
// Log lines go to the same stderr, so the logger writes through
// ProgressWriter, which hides the bar while a line is printed and redraws
// it afterwards. Dropping a Progress clears the bar, so an error message is
// never printed under a half-drawn spinner.
// =============================================================================

use std::io::{self, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::fmt::MakeWriter;

pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Progress {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_message("Loading sitemap");
        bar.enable_steady_tick(Duration::from_millis(100));
        Progress { bar }
    }

    // Switches from the spinner to a bar of `total` pages
    pub fn start_pages(&self, total: usize) {
        let style = ProgressStyle::with_template(
            "Loading page {pos} / {len} [{bar:40.cyan/blue}] {elapsed}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");

        self.bar.set_style(style);
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// A writer for the logger that keeps the bar intact
    pub fn writer(&self) -> ProgressWriter {
        ProgressWriter {
            bar: self.bar.clone(),
        }
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Writes to stderr with the progress bar suspended
#[derive(Clone)]
pub struct ProgressWriter {
    bar: ProgressBar,
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bar.suspend(|| io::stderr().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // One suspend per log line, not one per partial write
        self.bar.suspend(|| io::stderr().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for ProgressWriter {
    type Writer = ProgressWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
