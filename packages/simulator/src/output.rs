//! Output writers for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::metrics::{CsvSummaryRow, GameMetrics};
use crate::types::OutputFormat;

pub struct OutputWriter {
    format: OutputFormat,
    detail_writer: Option<Box<dyn Write + Send>>,
    csv_writer: Option<csv::Writer<BufWriter<File>>>,
    detail_path: Option<PathBuf>,
    csv_path: Option<PathBuf>,
    /// Buffered games for the `json` format, written on finish.
    pending: Vec<GameMetrics>,
}

fn open_truncated(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

impl OutputWriter {
    pub fn new(
        output_dir: &Path,
        format: OutputFormat,
        compress: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        std::fs::create_dir_all(output_dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");

        let extension = match format {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
        };
        let mut filename = format!("simulation_{timestamp}.{extension}");
        if compress {
            filename.push_str(".gz");
        }
        let detail_path = output_dir.join(filename);
        let file = open_truncated(&detail_path)?;
        let detail_writer: Box<dyn Write + Send> = if compress {
            Box::new(BufWriter::new(GzEncoder::new(file, Compression::default())))
        } else {
            Box::new(BufWriter::new(file))
        };

        // Always create CSV summary
        let csv_path = output_dir.join(format!("simulation_{timestamp}_summary.csv"));
        let csv_writer = csv::Writer::from_writer(BufWriter::new(open_truncated(&csv_path)?));

        Ok(Self {
            format,
            detail_writer: Some(detail_writer),
            csv_writer: Some(csv_writer),
            detail_path: Some(detail_path),
            csv_path: Some(csv_path),
            pending: Vec::new(),
        })
    }

    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), Box<dyn std::error::Error>> {
        match self.format {
            OutputFormat::Jsonl => {
                if let Some(ref mut writer) = self.detail_writer {
                    let json = serde_json::to_string(metrics)?;
                    writeln!(writer, "{json}")?;
                    writer.flush()?;
                }
            }
            OutputFormat::Json => self.pending.push(metrics.clone()),
        }

        // The header row comes from the first serialized record.
        if let Some(ref mut writer) = self.csv_writer {
            let row: CsvSummaryRow = metrics.into();
            writer.serialize(&row)?;
            writer.flush()?;
        }

        Ok(())
    }

    /// Flush everything and close the files.
    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(mut writer) = self.detail_writer.take() {
            if self.format == OutputFormat::Json {
                serde_json::to_writer_pretty(&mut writer, &self.pending)?;
                writeln!(writer)?;
            }
            writer.flush()?;
            // Dropping the writer finalizes a gzip stream.
            drop(writer);
        }
        if let Some(ref mut writer) = self.csv_writer {
            writer.flush()?;
        }
        Ok(())
    }

    pub fn output_paths(&self) -> (Option<&PathBuf>, Option<&PathBuf>) {
        (self.detail_path.as_ref(), self.csv_path.as_ref())
    }
}
