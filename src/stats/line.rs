//! Line pitch statistics.

use super::{Frequencies, StatisticsConfig};
use crate::model::Rect;

/// Pitch between consecutive text lines.
///
/// Only pairs where the second line lies below the first and overlaps it
/// horizontally are counted, so line sequences spanning columns or pages do
/// not contribute.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextLineStatistic {
    /// Most common distance between the bottom edges of consecutive lines
    pub most_common_line_pitch: Option<f32>,
    /// Smallest line pitch with enough support
    pub smallest_significant_line_pitch: Option<f32>,
    /// Most common distance between consecutive baselines
    pub most_common_baseline_pitch: Option<f32>,
    /// Smallest baseline pitch with enough support
    pub smallest_significant_baseline_pitch: Option<f32>,
    /// Number of counted line pairs
    pub samples: usize,
}

impl TextLineStatistic {
    /// Compute the statistic over `(line rect, baseline y)` pairs in reading order.
    pub fn compute(
        lines: impl IntoIterator<Item = (Rect, f32)>,
        config: &StatisticsConfig,
    ) -> Self {
        let mut line_pitches = Frequencies::new(config.precision);
        let mut baseline_pitches = Frequencies::new(config.precision);
        let mut prev: Option<(Rect, f32)> = None;

        for (rect, baseline) in lines {
            if let Some((prev_rect, prev_baseline)) = prev {
                if rect.min_y < prev_rect.min_y && rect.overlaps_horizontally(&prev_rect) {
                    line_pitches.add(prev_rect.min_y - rect.min_y);
                    baseline_pitches.add(prev_baseline - baseline);
                }
            }
            prev = Some((rect, baseline));
        }

        Self {
            most_common_line_pitch: line_pitches.most_common(),
            smallest_significant_line_pitch: line_pitches.smallest_significant(config.min_support),
            most_common_baseline_pitch: baseline_pitches.most_common(),
            smallest_significant_baseline_pitch: baseline_pitches
                .smallest_significant(config.min_support),
            samples: line_pitches.len(),
        }
    }

    /// The significant line pitch, if any pair was counted.
    pub fn line_pitch(&self) -> Option<f32> {
        self.smallest_significant_line_pitch
            .or(self.most_common_line_pitch)
    }

    /// The significant baseline pitch, if any pair was counted.
    pub fn baseline_pitch(&self) -> Option<f32> {
        self.smallest_significant_baseline_pitch
            .or(self.most_common_baseline_pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(y: f32) -> (Rect, f32) {
        (Rect::new(50.0, y, 300.0, y + 7.0), y)
    }

    #[test]
    fn test_regular_pitch() {
        let lines = [line(700.0), line(688.0), line(676.0), line(664.0)];
        let stat = TextLineStatistic::compute(lines, &StatisticsConfig::default());
        assert_eq!(stat.samples, 3);
        assert_eq!(stat.most_common_line_pitch, Some(12.0));
        assert_eq!(stat.line_pitch(), Some(12.0));
        assert_eq!(stat.baseline_pitch(), Some(12.0));
    }

    #[test]
    fn test_significant_pitch_ignores_noise() {
        // One tight pair (superscript line), three regular pairs, two wide pairs.
        let lines = [
            line(700.0),
            line(697.0),
            line(685.0),
            line(673.0),
            line(661.0),
            line(641.0),
            line(621.0),
        ];
        let stat = TextLineStatistic::compute(lines, &StatisticsConfig::default());
        assert_eq!(stat.most_common_line_pitch, Some(12.0));
        assert_eq!(stat.smallest_significant_line_pitch, Some(12.0));
    }

    #[test]
    fn test_column_jump_is_ignored() {
        let left = (Rect::new(50.0, 100.0, 280.0, 107.0), 100.0);
        let right = (Rect::new(320.0, 700.0, 550.0, 707.0), 700.0);
        let below = (Rect::new(320.0, 688.0, 550.0, 695.0), 688.0);
        let stat = TextLineStatistic::compute([left, right, below], &StatisticsConfig::default());
        assert_eq!(stat.samples, 1);
        assert_eq!(stat.line_pitch(), Some(12.0));
    }

    #[test]
    fn test_single_line_has_no_pitch() {
        let stat = TextLineStatistic::compute([line(700.0)], &StatisticsConfig::default());
        assert_eq!(stat.line_pitch(), None);
    }
}
