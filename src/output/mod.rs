//! Output formatting and display system
//!
//! The terminal is the rendering collaborator: a live line per sample
//! while the run is in progress, then the statistics block and a chart.

mod chart;
mod colored;
mod formatter;

pub use self::colored::{ColorScheme, ColoredFormatter};
pub use chart::TextChart;
pub use formatter::{FormattingOptions, OutputFormatter, PlainFormatter};

use crate::{
    error::AppError,
    models::{Sample, Series},
    sampler::{LiveUpdate, SampleObserver},
    types::RunState,
};
use std::io::{self, Write};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, show_elapsed: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            show_elapsed,
            verbose_mode: verbose,
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }
}

/// Sample observer that prints live lines as the run progresses
pub struct LiveDisplay<W: Write + Send> {
    formatter: Box<dyn OutputFormatter>,
    out: W,
    failures: usize,
}

impl<W: Write + Send> LiveDisplay<W> {
    pub fn new(formatter: Box<dyn OutputFormatter>, out: W) -> Self {
        Self {
            formatter,
            out,
            failures: 0,
        }
    }

    /// Failed attempts seen so far
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Write a line outside of the observer callbacks (banner, notices)
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, rendered: crate::error::Result<String>) {
        // Display problems must never stop sampling
        if let Ok(line) = rendered {
            let _ = self.write_line(&line);
        }
    }
}

impl<W: Write + Send> SampleObserver for LiveDisplay<W> {
    fn on_sample(&mut self, _sample: &Sample, update: &LiveUpdate) {
        let line = self.formatter.format_live_update(update);
        self.emit(line);
    }

    fn on_failure(&mut self, _error: &AppError) {
        self.failures += 1;
    }

    fn on_complete(&mut self, state: RunState, series: &Series) {
        let line = self.formatter.format_completion(state, series.len(), self.failures);
        self.emit(line);
    }
}
