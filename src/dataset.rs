use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::dates;
use crate::error::DatasetError;

// Bundled at compile time so the binary works without any files next to it
const DEFAULT_DATASET_BYTES: &[u8] = include_bytes!("../data/hotel_bookings.json");

/// File picked up from the working directory when no `--data` path is given.
pub const DEFAULT_DATASET_FILE: &str = "hotel_bookings.json";

/// One reservation entry with arrival date and visitor counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub hotel_name: String,
    pub arrival_year: i32,
    pub arrival_month_name: String,
    pub arrival_day_of_month: u32,
    pub adults: u32,
    pub children: u32,
    pub babies: u32,
    pub country: String,
}

impl BookingRecord {
    /// Arrival date, `None` when the month name or day is malformed.
    pub fn arrival_date(&self) -> Option<NaiveDate> {
        dates::arrival_date(
            self.arrival_year,
            &self.arrival_month_name,
            self.arrival_day_of_month,
        )
    }

    pub fn total_visitors(&self) -> u64 {
        u64::from(self.adults) + u64::from(self.children) + u64::from(self.babies)
    }

    /// Children and babies together.
    pub fn young_visitors(&self) -> u64 {
        u64::from(self.children) + u64::from(self.babies)
    }
}

/// Row shape of the source data. Numbers arrive either as JSON numbers or as strings.
#[derive(Debug, Deserialize)]
struct RawBooking {
    #[serde(default)]
    hotel: String,
    arrival_date_year: Value,
    arrival_date_month: String,
    arrival_date_day_of_month: Value,
    adults: Value,
    children: Value,
    babies: Value,
    #[serde(default)]
    country: Option<String>,
}

fn as_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                    .map(|f| f as u32)
            })
        }
        _ => None,
    }
}

impl RawBooking {
    fn into_record(self) -> Option<BookingRecord> {
        let arrival_year = i32::try_from(as_count(&self.arrival_date_year)?).ok()?;
        Some(BookingRecord {
            hotel_name: self.hotel,
            arrival_year,
            arrival_month_name: self.arrival_date_month,
            arrival_day_of_month: as_count(&self.arrival_date_day_of_month)?,
            adults: as_count(&self.adults)?,
            children: as_count(&self.children)?,
            babies: as_count(&self.babies)?,
            country: self.country.unwrap_or_default(),
        })
    }
}

/// Earliest and latest valid arrival dates in a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl Coverage {
    pub fn days(&self) -> i64 {
        (self.latest - self.earliest).num_days()
    }

    /// `July/2015 to August/2015`
    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            dates::month_year_label(self.earliest),
            dates::month_year_label(self.latest)
        )
    }
}

/// The read-only record store. Records keep their load order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<BookingRecord>,
    skipped: usize,
}

impl Dataset {
    pub fn from_json(bytes: &[u8]) -> Result<Self, DatasetError> {
        // Rows are decoded one at a time so a single bad row cannot sink the file
        let rows: Vec<Value> = serde_json::from_slice(bytes)?;

        let mut records = Vec::with_capacity(rows.len());
        let mut skipped = 0;
        for (row, value) in rows.into_iter().enumerate() {
            let booking = serde_json::from_value::<RawBooking>(value)
                .ok()
                .and_then(RawBooking::into_record);
            match booking {
                Some(record) => records.push(record),
                None => {
                    skipped += 1;
                    warn!(
                        action = "skip",
                        component = "dataset",
                        row,
                        "Booking row has missing or non-numeric date or visitor fields"
                    );
                }
            }
        }

        Ok(Self { records, skipped })
    }

    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_json(DEFAULT_DATASET_BYTES)
    }

    pub fn from_records(records: Vec<BookingRecord>) -> Self {
        Self {
            records,
            skipped: 0,
        }
    }

    pub fn records(&self) -> &[BookingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows dropped at load time because a field was missing or could not be decoded.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn coverage(&self) -> Option<Coverage> {
        let mut dates = self.records.iter().filter_map(BookingRecord::arrival_date);
        let first = dates.next()?;
        let (earliest, latest) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Coverage { earliest, latest })
    }
}

/// Loads the dataset from `path`, else from [`DEFAULT_DATASET_FILE`] in the
/// working directory, else from the copy embedded in the binary.
pub fn load_dataset(path: Option<&Path>) -> Result<Dataset, DatasetError> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "dataset_loading",
        "Starting booking dataset loading"
    );

    let dataset = if let Some(path) = path {
        info!(action = "load", component = "dataset_file", file_path = ?path, "Loading dataset from specified file");
        if !path.exists() {
            return Err(DatasetError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Dataset::from_json(&fs::read(path)?)?
    } else {
        let default_file = Path::new(DEFAULT_DATASET_FILE);
        if default_file.exists() {
            info!(action = "load", component = "default_dataset_file", file_path = ?default_file, "Loading dataset from default file");
            Dataset::from_json(&fs::read(default_file)?)?
        } else {
            info!(
                action = "load",
                component = "embedded_dataset",
                "Using embedded default dataset"
            );
            Dataset::embedded()?
        }
    };

    let load_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "dataset_loading",
        record_count = dataset.len(),
        skipped = dataset.skipped(),
        duration_ms = load_time.as_millis(),
        "Loaded booking records"
    );
    Ok(dataset)
}

/// Writes the embedded dataset to `target`, refusing to overwrite.
pub fn init_default_dataset(target: &Path) -> Result<(), DatasetError> {
    if target.exists() {
        return Err(DatasetError::AlreadyExists {
            path: target.to_path_buf(),
        });
    }

    fs::write(target, DEFAULT_DATASET_BYTES)?;
    info!(action = "write", component = "dataset_init", file_path = ?target, "Wrote embedded dataset");
    Ok(())
}
