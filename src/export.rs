use std::fs::File;
use std::io::{self, Write};

use serde::Serialize;

use crate::record::CountryTypeRecord;

pub const CSV_HEADERS: [&str; 5] = ["country", "iso_alpha3", "top_type", "percentage", "source"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

pub fn detect_data_format(path: &str, fallback: DataFormat) -> DataFormat {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".json") {
        DataFormat::Json
    } else if lower.ends_with(".csv") {
        DataFormat::Csv
    } else {
        fallback
    }
}

pub fn default_output_path(format: DataFormat) -> &'static str {
    match format {
        DataFormat::Csv => "mbti_by_country.csv",
        DataFormat::Json => "mbti_by_country.json",
    }
}

#[derive(Debug, Clone, Serialize)]
struct ExportRecord {
    country: String,
    iso_alpha3: String,
    top_type: &'static str,
    percentage: Option<f64>,
    source: &'static str,
}

fn record_to_export(record: &CountryTypeRecord) -> ExportRecord {
    ExportRecord {
        country: record.country_name.clone(),
        iso_alpha3: record.country_code.clone().unwrap_or_default(),
        top_type: record.type_code.as_str(),
        percentage: record.percentage,
        source: record.source.label(),
    }
}

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> io::Result<Self> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(CSV_HEADERS)?;
        Ok(Self { writer })
    }

    pub fn write_row(&mut self, record: &CountryTypeRecord) -> io::Result<()> {
        let rec = record_to_export(record);
        self.writer.write_record([
            rec.country,
            rec.iso_alpha3,
            rec.top_type.to_string(),
            rec.percentage.map(|p| p.to_string()).unwrap_or_default(),
            rec.source.to_string(),
        ])?;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

pub struct JsonSink<W: Write> {
    writer: W,
    first: bool,
    closed: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(mut writer: W) -> io::Result<Self> {
        writer.write_all(b"[\n")?;
        Ok(Self {
            writer,
            first: true,
            closed: false,
        })
    }

    pub fn write_row(&mut self, record: &CountryTypeRecord) -> io::Result<()> {
        let rec = record_to_export(record);
        if !self.first {
            self.writer.write_all(b",\n")?;
        }
        self.first = false;
        serde_json::to_writer(&mut self.writer, &rec).map_err(io::Error::other)?;
        Ok(())
    }

    pub fn finalize(&mut self) -> io::Result<()> {
        if !self.closed {
            if self.first {
                self.writer.write_all(b"]\n")?;
            } else {
                self.writer.write_all(b"\n]\n")?;
            }
            self.closed = true;
        }
        self.writer.flush()
    }
}

impl<W: Write> Drop for JsonSink<W> {
    fn drop(&mut self) {
        let _ = self.finalize();
    }
}

pub enum OutputSink {
    Csv(CsvSink<File>),
    Json(JsonSink<File>),
}

impl OutputSink {
    pub fn create(output_path: &str, format: DataFormat) -> io::Result<Self> {
        let file = File::create(output_path)?;
        match format {
            DataFormat::Csv => Ok(OutputSink::Csv(CsvSink::new(file)?)),
            DataFormat::Json => Ok(OutputSink::Json(JsonSink::new(file)?)),
        }
    }

    pub fn write_row(&mut self, record: &CountryTypeRecord) -> io::Result<()> {
        match self {
            OutputSink::Csv(sink) => sink.write_row(record),
            OutputSink::Json(sink) => sink.write_row(record),
        }
    }

    pub fn finalize(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Csv(sink) => sink.flush(),
            OutputSink::Json(sink) => sink.finalize(),
        }
    }
}
