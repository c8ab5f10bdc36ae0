pub mod aggregate;
pub mod args;
pub mod dashboard;
pub mod dataset;
pub mod dates;
pub mod error;
pub mod stats;
pub mod utils;

pub use aggregate::{aggregate, DateRange};
pub use args::{Args, OutputFormat};
pub use dashboard::{Dashboard, DashboardView, FilterRequest};
pub use dataset::{init_default_dataset, load_dataset, BookingRecord, Coverage, Dataset};
pub use error::{DatasetError, RangeError};
pub use stats::{AggregationResult, Tally};
