//! Edge position statistics.

use super::{Frequencies, StatisticsConfig};
use crate::model::Rect;

/// Most common edge coordinates of a set of elements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionStatistic {
    /// Most common left edge
    pub most_common_min_x: Option<f32>,
    /// Most common right edge
    pub most_common_max_x: Option<f32>,
    /// Most common bottom edge
    pub most_common_min_y: Option<f32>,
    /// Most common top edge
    pub most_common_max_y: Option<f32>,
}

impl PositionStatistic {
    /// Compute the statistic over element rectangles.
    pub fn compute<'a>(
        rects: impl IntoIterator<Item = &'a Rect>,
        config: &StatisticsConfig,
    ) -> Self {
        let mut min_x = Frequencies::new(config.precision);
        let mut max_x = Frequencies::new(config.precision);
        let mut min_y = Frequencies::new(config.precision);
        let mut max_y = Frequencies::new(config.precision);

        for rect in rects {
            min_x.add(rect.min_x);
            max_x.add(rect.max_x);
            min_y.add(rect.min_y);
            max_y.add(rect.max_y);
        }

        Self {
            most_common_min_x: min_x.most_common(),
            most_common_max_x: max_x.most_common(),
            most_common_min_y: min_y.most_common(),
            most_common_max_y: max_y.most_common(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_statistic() {
        let rects = [
            Rect::new(72.0, 700.0, 540.0, 707.0),
            Rect::new(72.0, 688.0, 540.0, 695.0),
            Rect::new(90.0, 676.0, 400.0, 683.0),
        ];
        let stat = PositionStatistic::compute(&rects, &StatisticsConfig::default());
        assert_eq!(stat.most_common_min_x, Some(72.0));
        assert_eq!(stat.most_common_max_x, Some(540.0));
        // All bottom edges differ: the tie resolves to the largest.
        assert_eq!(stat.most_common_min_y, Some(700.0));
    }
}
