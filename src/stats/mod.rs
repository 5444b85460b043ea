//! Statistics engines.
//!
//! Every statistic is a pure function over a sequence of elements. Areas
//! cache the results and recompute them after insertions.

mod dimension;
mod line;
mod mode;
mod position;
mod text;

pub use dimension::DimensionStatistic;
pub use line::TextLineStatistic;
pub use mode::{key_value, mode_of, most_common_key, round_key, Frequencies};
pub use position::PositionStatistic;
pub use text::TextStatistic;

use serde::{Deserialize, Serialize};

/// Parameters shared by all statistics engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Number of decimal digits values are rounded to before counting
    pub precision: u32,
    /// A pitch value is significant when its frequency exceeds this
    pub min_support: usize,
}

impl StatisticsConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rounding precision.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Set the minimum support for significant pitch values.
    pub fn with_min_support(mut self, min_support: usize) -> Self {
        self.min_support = min_support;
        self
    }
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            precision: 1,
            min_support: 1,
        }
    }
}
