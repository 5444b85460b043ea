//! Width/height statistics.

use super::{Frequencies, StatisticsConfig};
use crate::model::Rect;

/// Most common and average extents of a set of elements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionStatistic {
    /// Most common rounded width
    pub most_common_width: f32,
    /// Most common rounded height
    pub most_common_height: f32,
    /// Average width
    pub average_width: f32,
    /// Average height
    pub average_height: f32,
    /// Number of elements the statistic was computed from
    pub samples: usize,
}

impl DimensionStatistic {
    /// Compute the statistic over element rectangles.
    pub fn compute<'a>(
        rects: impl IntoIterator<Item = &'a Rect>,
        config: &StatisticsConfig,
    ) -> Self {
        let mut widths = Frequencies::new(config.precision);
        let mut heights = Frequencies::new(config.precision);
        let mut width_sum = 0.0f64;
        let mut height_sum = 0.0f64;
        let mut samples = 0usize;

        for rect in rects {
            widths.add(rect.width());
            heights.add(rect.height());
            width_sum += rect.width() as f64;
            height_sum += rect.height() as f64;
            samples += 1;
        }

        if samples == 0 {
            return Self::default();
        }

        Self {
            most_common_width: widths.most_common().unwrap_or(0.0),
            most_common_height: heights.most_common().unwrap_or(0.0),
            average_width: (width_sum / samples as f64) as f32,
            average_height: (height_sum / samples as f64) as f32,
            samples,
        }
    }

    /// Whether the statistic was computed from no elements.
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_statistic() {
        let rects = [
            Rect::from_size(0.0, 0.0, 5.0, 7.0),
            Rect::from_size(5.0, 0.0, 5.0, 7.0),
            Rect::from_size(10.0, 0.0, 3.0, 9.0),
        ];
        let stat = DimensionStatistic::compute(&rects, &StatisticsConfig::default());
        assert_eq!(stat.most_common_width, 5.0);
        assert_eq!(stat.most_common_height, 7.0);
        assert!((stat.average_width - 13.0 / 3.0).abs() < 1e-4);
        assert_eq!(stat.samples, 3);
    }

    #[test]
    fn test_empty_dimension_statistic() {
        let stat = DimensionStatistic::compute(&[], &StatisticsConfig::default());
        assert!(stat.is_empty());
        assert_eq!(stat.most_common_width, 0.0);
    }
}
