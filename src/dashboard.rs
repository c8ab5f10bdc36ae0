use serde::Serialize;
use std::time::Instant;
use tracing::info;

use crate::aggregate::{aggregate, DateRange};
use crate::dataset::{Coverage, Dataset};
use crate::stats::{AggregationResult, Tally};
use crate::utils::format_number;

pub const INVALID_RANGE_MESSAGE: &str = "Select Valid Range of Dates";
pub const SELECT_DATES_HINT: &str = "Select Dates to show Data";

/// One "Filter Data" action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterRequest {
    pub range: DateRange,
}

/// What the dashboard currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    /// No filter has been applied yet.
    Idle,
    /// The last filter had a missing or non-increasing range.
    InvalidRange,
    Ready(AggregationResult),
}

impl DashboardView {
    /// Guidance text shown above the charts, if any.
    pub fn message(&self, coverage: Option<&Coverage>) -> Option<String> {
        match self {
            DashboardView::Idle => Some(match coverage {
                Some(coverage) => format!(
                    "Data Available: {} ({} days)",
                    coverage.label(),
                    format_number(coverage.days().unsigned_abs())
                ),
                None => "No data available".to_string(),
            }),
            DashboardView::InvalidRange => Some(INVALID_RANGE_MESSAGE.to_string()),
            DashboardView::Ready(_) => None,
        }
    }

    pub fn result(&self) -> Option<&AggregationResult> {
        match self {
            DashboardView::Ready(result) => Some(result),
            _ => None,
        }
    }
}

/// Holds the loaded records and the view produced by the most recent filter.
#[derive(Debug)]
pub struct Dashboard {
    dataset: Dataset,
    coverage: Option<Coverage>,
    view: DashboardView,
}

impl Dashboard {
    pub fn new(dataset: Dataset) -> Self {
        let coverage = dataset.coverage();
        Self {
            dataset,
            coverage,
            view: DashboardView::Idle,
        }
    }

    pub fn coverage(&self) -> Option<&Coverage> {
        self.coverage.as_ref()
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Replaces the current view with the outcome of `request`.
    pub fn filter(&mut self, request: FilterRequest) -> &DashboardView {
        let start_time = Instant::now();
        self.view = match aggregate(self.dataset.records(), &request.range) {
            Ok(result) => DashboardView::Ready(result),
            Err(e) => {
                info!(action = "reject", component = "dashboard", reason = %e, "Filter range rejected");
                DashboardView::InvalidRange
            }
        };
        info!(
            action = "complete",
            component = "dashboard",
            duration_ms = start_time.elapsed().as_millis(),
            "Filter applied"
        );
        &self.view
    }
}

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One bar character per entry, scaled to the largest value.
pub fn sparkline(tally: &Tally) -> String {
    let max = tally.values().max().unwrap_or(0);
    tally
        .values()
        .map(|value| {
            if max == 0 {
                SPARK_BARS[0]
            } else {
                let level = (value * (SPARK_BARS.len() as u64 - 1) + max / 2) / max;
                SPARK_BARS[level as usize]
            }
        })
        .collect()
}

/// Plain-text rendering of the current view. Empty mappings render nothing.
pub fn render_text(dashboard: &Dashboard, top: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str("--- Hotel Booking Dashboard ---\n");

    let view = dashboard.view();
    if let Some(message) = view.message(dashboard.coverage()) {
        out.push_str(&format!("\n{}\n{}\n", message, SELECT_DATES_HINT));
    }

    let Some(result) = view.result() else {
        return out;
    };

    if !result.adult_visitors_per_day.is_empty() {
        out.push_str(&format!(
            "\nAdult Visitor     {} ({} total)\n",
            sparkline(&result.adult_visitors_per_day),
            format_number(result.adult_visitors_per_day.total())
        ));
    }
    if !result.children_visitors_per_day.is_empty() {
        out.push_str(&format!(
            "Children Visitor  {} ({} total)\n",
            sparkline(&result.children_visitors_per_day),
            format_number(result.children_visitors_per_day.total())
        ));
    }

    if !result.visitors_per_day.is_empty() {
        out.push_str("\nVisitors per day:\n");
        for (day, count) in result.visitors_per_day.iter() {
            out.push_str(&format!("- {}: {}\n", day, format_number(count)));
        }
    }

    if !result.visitors_per_country.is_empty() {
        let ranked = result.visitors_per_country.ranked();
        let shown = top.unwrap_or(ranked.len()).min(ranked.len());
        out.push_str(&format!(
            "\nVisitors per country (top {} of {}):\n",
            shown,
            ranked.len()
        ));
        for (country, count) in ranked.into_iter().take(shown) {
            let label = if country.is_empty() { "(unknown)" } else { country };
            out.push_str(&format!("- {}: {}\n", label, format_number(count)));
        }
    }

    out
}

#[derive(Serialize)]
struct JsonView<'a> {
    status: &'static str,
    message: Option<String>,
    #[serde(flatten)]
    result: &'a AggregationResult,
}

/// JSON rendering of the current view. Non-ready views carry four empty mappings.
pub fn render_json(dashboard: &Dashboard) -> Result<String, serde_json::Error> {
    let empty = AggregationResult::default();
    let view = dashboard.view();
    let status = match view {
        DashboardView::Idle => "idle",
        DashboardView::InvalidRange => "invalid_range",
        DashboardView::Ready(_) => "ready",
    };
    serde_json::to_string_pretty(&JsonView {
        status,
        message: view.message(dashboard.coverage()),
        result: view.result().unwrap_or(&empty),
    })
}
