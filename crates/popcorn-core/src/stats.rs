use popcorn_models::WatchedEntry;
use serde::Serialize;

/// Significant figures shown for the rating averages
pub const RATING_SIGNIFICANT_DIGITS: usize = 2;

/// Aggregate figures for the watched list
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    /// Mean runtime rounded up to whole minutes
    pub avg_runtime: u32,
}

impl WatchedSummary {
    pub fn imdb_rating_display(&self) -> String {
        format_significant(self.avg_imdb_rating, RATING_SIGNIFICANT_DIGITS)
    }

    pub fn user_rating_display(&self) -> String {
        format_significant(self.avg_user_rating, RATING_SIGNIFICANT_DIGITS)
    }

    pub fn runtime_display(&self) -> String {
        format!("{} min", self.avg_runtime)
    }
}

/// Count and means over the watched list. Unknown ratings and runtimes are
/// left out of their mean; an empty mean is 0.
pub fn summarize(entries: &[WatchedEntry]) -> WatchedSummary {
    let avg_runtime = mean(entries.iter().map(|e| e.runtime.map(f64::from)));

    WatchedSummary {
        count: entries.len(),
        avg_imdb_rating: mean(entries.iter().map(|e| e.imdb_rating)),
        avg_user_rating: mean(entries.iter().map(|e| Some(f64::from(e.user_rating)))),
        avg_runtime: avg_runtime.ceil() as u32,
    }
}

pub fn mean(values: impl IntoIterator<Item = Option<f64>>) -> f64 {
    let (sum, n) = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Round to `digits` significant figures, keeping trailing zeros
/// (`0` → `"0.0"`, `9.96` → `"10"`, `8.65` → `"8.7"`).
pub fn format_significant(value: f64, digits: usize) -> String {
    let digits = digits.max(1) as i32;
    if value == 0.0 || !value.is_finite() {
        return format!("{:.*}", (digits - 1) as usize, 0.0);
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = digits - 1 - magnitude;

    if decimals < 0 {
        let step = 10f64.powi(-decimals);
        return format!("{:.0}", (value / step).round() * step);
    }

    let formatted = format!("{:.*}", decimals as usize, value);
    // Rounding can carry into a new leading digit (9.96 → 10.0)
    let carried = formatted
        .parse::<f64>()
        .map(|rounded| rounded.abs() >= 10f64.powi(magnitude + 1))
        .unwrap_or(false);

    if carried && decimals > 0 {
        format!("{:.*}", (decimals - 1) as usize, value)
    } else {
        formatted
    }
}
