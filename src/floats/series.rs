//! Synthetic temperature series for the chart panel
//!
//! Floats only carry one reading, so the monthly series is fabricated from
//! the last temperature and the float's seasonal amplitude:
//! `temperature + seasonal_offset * sin(2π·m/12)` for month `m = 0..11`.

use serde::Serialize;

use super::types::FloatRecord;

/// Month labels for the x-axis
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Palette cycled through when building chart datasets
const PALETTE: [&str; 4] = ["#1e88e5", "#00acc1", "#43a047", "#fdd835"];

/// One point of a temperature series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemperaturePoint {
    pub month: String,
    pub temperature: f64,
}

/// Monthly temperature series for one float
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemperatureSeries {
    pub float_id: String,
    pub float_name: String,
    pub points: Vec<TemperaturePoint>,
}

impl TemperatureSeries {
    /// Build the synthetic series for a float
    pub fn for_float(float: &FloatRecord) -> Self {
        let points = MONTH_LABELS
            .iter()
            .enumerate()
            .map(|(m, label)| TemperaturePoint {
                month: label.to_string(),
                temperature: monthly_temperature(float, m),
            })
            .collect();

        Self {
            float_id: float.id.clone(),
            float_name: float.name.clone(),
            points,
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.temperature).collect()
    }

    pub fn min(&self) -> Option<f64> {
        self.points.iter().map(|p| p.temperature).reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.points.iter().map(|p| p.temperature).reduce(f64::max)
    }

    /// Render as CSV with a `month,temperature` header
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["month", "temperature"])?;
        for point in &self.points {
            let temperature = format!("{:.2}", point.temperature);
            writer.write_record([point.month.as_str(), temperature.as_str()])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn monthly_temperature(float: &FloatRecord, month: usize) -> f64 {
    let phase = 2.0 * std::f64::consts::PI * month as f64 / 12.0;
    round2(float.temperature + float.seasonal_offset * phase.sin())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Chart kind requested in free text
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Histogram,
}

impl ChartKind {
    /// Infer the chart kind from a request, defaulting to a bar chart
    pub fn detect(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("bar") || text.contains("column") {
            ChartKind::Bar
        } else if text.contains("line") || text.contains("trend") {
            ChartKind::Line
        } else if text.contains("pie") {
            ChartKind::Pie
        } else if text.contains("scatter") {
            ChartKind::Scatter
        } else if text.contains("histogram") || text.contains("distribution") {
            ChartKind::Histogram
        } else {
            ChartKind::Bar
        }
    }
}

/// Chart payload consumed by the temperature panel
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartData {
    pub kind: ChartKind,
    pub title: String,
    /// Labels for x-axis
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// Single dataset for chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub color: String,
}

impl ChartData {
    /// One dataset per float, x-axis by month
    pub fn monthly_temperatures(floats: &[FloatRecord], kind: ChartKind) -> Self {
        let datasets = floats
            .iter()
            .enumerate()
            .map(|(i, float)| ChartDataset {
                label: float.name.clone(),
                data: TemperatureSeries::for_float(float).values(),
                color: PALETTE[i % PALETTE.len()].to_string(),
            })
            .collect();

        Self {
            kind,
            title: "Monthly sea surface temperature (°C)".to_string(),
            labels: MONTH_LABELS.iter().map(|m| m.to_string()).collect(),
            datasets,
        }
    }
}
