//! Serialization of a series to CSV or a bordered text block
//!
//! Both formats render latencies with two decimals. CSV output can be read
//! back with [`parse_csv`].

use crate::{
    error::{AppError, Result},
    models::Sample,
    types::ExportFormat,
};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Header row of the CSV export
pub const CSV_HEADER: &str = "Timestamp,Load Time (Seconds)";

const TEXT_HEAD: &str = "------------Head-------------";
const TEXT_END: &str = "-----------The End-----------";

/// Render samples in the requested format
pub fn render(samples: &[Sample], format: ExportFormat) -> String {
    match format {
        ExportFormat::Csv => to_csv(samples),
        ExportFormat::Text => to_text(samples),
    }
}

/// `Timestamp,Load Time (Seconds)` header followed by one row per sample
pub fn to_csv(samples: &[Sample]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + samples.len() * 36);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for sample in samples {
        out.push_str(&format!("{},{:.2}\n", sample.timestamp_iso(), sample.latency_seconds()));
    }
    out
}

/// Bordered block with `timestamp<TAB>latency seconds` lines
pub fn to_text(samples: &[Sample]) -> String {
    let mut out = String::new();
    out.push_str("Timestamp and Loading Times:\n");
    out.push_str(TEXT_HEAD);
    out.push('\n');
    for sample in samples {
        out.push_str(&format!("{}\t{:.2} seconds\n", sample.timestamp_iso(), sample.latency_seconds()));
    }
    out.push_str(TEXT_END);
    out.push('\n');
    out
}

/// Read a CSV export back into samples
pub fn parse_csv(content: &str) -> Result<Vec<Sample>> {
    let mut lines = content.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim_end() == CSV_HEADER => {}
        Some((_, header)) => {
            return Err(AppError::parse(format!("Unexpected CSV header: '{}'", header)));
        }
        None => return Err(AppError::parse("CSV export is empty")),
    }

    let mut samples = Vec::new();
    for (index, line) in lines {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let (timestamp, latency) = line
            .rsplit_once(',')
            .ok_or_else(|| AppError::parse(format!("Line {}: expected 'timestamp,latency'", index + 1)))?;

        let timestamp = DateTime::parse_from_rfc3339(timestamp.trim())
            .map_err(|e| AppError::parse(format!("Line {}: invalid timestamp '{}': {}", index + 1, timestamp, e)))?
            .with_timezone(&Utc);
        let latency: f64 = latency
            .trim()
            .parse()
            .map_err(|e| AppError::parse(format!("Line {}: invalid latency '{}': {}", index + 1, latency, e)))?;

        samples.push(Sample::new(timestamp, latency));
    }

    Ok(samples)
}

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w-]").expect("static regex is valid"))
}

/// `LoadTimes_<sanitized url>_<minutes>min.<ext>`
pub fn generate_filename(url: &str, duration_minutes: f64, format: ExportFormat) -> String {
    let flattened = url.replace(['/', ':'], "_");
    let sanitized = unsafe_chars().replace_all(&flattened, "");
    format!("LoadTimes_{}_{}min.{}", sanitized, duration_minutes, format.extension())
}

/// Resolve the export path: explicit path wins, otherwise a generated name in the working directory
pub fn export_path(explicit: Option<&Path>, url: &str, duration_minutes: f64, format: ExportFormat) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(generate_filename(url, duration_minutes, format)))
}

/// Write an export to disk
pub fn write_export(path: &Path, samples: &[Sample], format: ExportFormat) -> Result<()> {
    std::fs::write(path, render(samples, format))
        .map_err(|e| AppError::io(format!("Failed to write export to {}: {}", path.display(), e)))
}
