//! Recursive partitioning of an area along empty lanes.
//!
//! The cutter sweeps a probe across an area, merges consecutive valid probe
//! positions into lanes and splits the area at the lane centers. Vertical
//! lanes are tried before horizontal ones; the parts are cut again until no
//! rule-valid lane separates their contents.

use serde::{Deserialize, Serialize};

use crate::area::{Area, Axis};
use crate::error::{Error, Result};
use crate::model::Rect;

/// Order in which probe positions are visited and parts are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepDirection {
    /// Vertical lanes, leftmost part first
    LeftToRight,
    /// Vertical lanes, rightmost part first
    RightToLeft,
    /// Horizontal lanes, topmost part first
    TopToBottom,
    /// Horizontal lanes, bottommost part first
    BottomToTop,
}

impl SweepDirection {
    /// Axis of the lanes swept in this direction.
    pub fn axis(self) -> Axis {
        match self {
            SweepDirection::LeftToRight | SweepDirection::RightToLeft => Axis::Vertical,
            SweepDirection::TopToBottom | SweepDirection::BottomToTop => Axis::Horizontal,
        }
    }

    /// Whether parts are emitted from high to low coordinates (y grows upwards).
    fn is_descending(self) -> bool {
        matches!(self, SweepDirection::RightToLeft | SweepDirection::TopToBottom)
    }
}

/// How a rule wants lanes to be searched along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneSpec {
    /// Size of the probe swept across the area
    pub probe: f32,
    /// Lanes smaller than this are discarded
    pub min_size: f32,
    /// Sweep direction
    pub direction: SweepDirection,
}

impl LaneSpec {
    /// Create a lane specification whose probe equals the minimum size.
    pub fn new(size: f32, direction: SweepDirection) -> Self {
        Self {
            probe: size,
            min_size: size,
            direction,
        }
    }
}

/// An empty stretch along one axis of an area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    /// Lower coordinate
    pub start: f32,
    /// Upper coordinate
    pub end: f32,
}

impl Lane {
    /// Create a lane.
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Extent of the lane.
    pub fn size(&self) -> f32 {
        self.end - self.start
    }

    /// Center coordinate, where the area is cut.
    pub fn center(&self) -> f32 {
        (self.start + self.end) / 2.0
    }
}

/// Level-specific policy of the cutter.
pub trait CutRule: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Parameters for vertical lanes, or `None` to never cut vertically.
    fn vertical_lane(&self, area: &Area) -> Option<LaneSpec>;

    /// Parameters for horizontal lanes, or `None` to never cut horizontally.
    fn horizontal_lane(&self, area: &Area) -> Option<LaneSpec>;

    /// Whether `lane` (spanning the full cross extent of `area`) may separate
    /// the contents of `area`.
    fn is_valid_lane(&self, area: &Area, lane: &Rect, axis: Axis) -> bool;

    /// Filter the lanes found along `axis`.
    fn choose_lanes(&self, _area: &Area, _axis: Axis, lanes: Vec<Lane>) -> Vec<Lane> {
        lanes
    }
}

/// The recursive partitioner.
#[derive(Debug, Clone, Copy)]
pub struct Cutter {
    step: f32,
}

impl Default for Cutter {
    fn default() -> Self {
        Self { step: 0.5 }
    }
}

impl Cutter {
    /// Create a cutter sweeping in steps of `step` units.
    pub fn new(step: f32) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "lane step must be a finite positive number, got {}",
                step
            )));
        }
        Ok(Self { step })
    }

    /// Sweep step.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Cut `area` recursively and return the leaves in sweep order.
    ///
    /// An area that cannot be split is returned unchanged as the only leaf.
    pub fn cut(&self, area: Area, rule: &dyn CutRule) -> Vec<Area> {
        let mut leaves = Vec::new();
        self.cut_into(area, rule, &mut leaves);
        leaves
    }

    fn cut_into(&self, area: Area, rule: &dyn CutRule, leaves: &mut Vec<Area>) {
        let parts = self
            .split(&area, rule, Axis::Vertical)
            .or_else(|| self.split(&area, rule, Axis::Horizontal));

        match parts {
            Some(parts) => {
                for part in parts {
                    self.cut_into(part, rule, leaves);
                }
            }
            None => leaves.push(area),
        }
    }

    /// Split `area` once along `axis`, returning at least two non-empty parts.
    fn split(&self, area: &Area, rule: &dyn CutRule, axis: Axis) -> Option<Vec<Area>> {
        if area.len() < 2 {
            return None;
        }
        let spec = match axis {
            Axis::Vertical => rule.vertical_lane(area),
            Axis::Horizontal => rule.horizontal_lane(area),
        }?;
        if spec.direction.axis() != axis {
            log::warn!(
                "{}: sweep direction {:?} does not match {:?} lanes",
                rule.name(),
                spec.direction,
                axis
            );
            return None;
        }

        let lanes = self.find_lanes(area, rule, &spec);
        if lanes.is_empty() {
            return None;
        }

        let cuts: Vec<f32> = lanes.iter().map(Lane::center).collect();
        let mut parts = area.split(axis, &cuts);
        if parts.len() < 2 {
            return None;
        }
        if spec.direction.is_descending() {
            parts.reverse();
        }

        log::debug!(
            "{}: split {} elements into {} parts along {} {:?} lanes",
            rule.name(),
            area.len(),
            parts.len(),
            lanes.len(),
            axis
        );
        Some(parts)
    }

    /// Find the rule-valid lanes of `area` described by `spec`, in ascending
    /// coordinate order.
    pub fn find_lanes(&self, area: &Area, rule: &dyn CutRule, spec: &LaneSpec) -> Vec<Lane> {
        let Some(bounds) = area.rect() else {
            return Vec::new();
        };
        let axis = spec.direction.axis();
        let (lo, hi) = axis.range(&bounds);
        let probe = spec.probe.max(self.step);
        if hi - lo < probe {
            return Vec::new();
        }

        let positions = ((hi - lo - probe) / self.step).floor() as usize;
        let mut lanes = Vec::new();
        let mut run: Option<(f32, f32)> = None;

        for i in 0..=positions {
            let start = lo + i as f32 * self.step;
            let end = start + probe;
            let probe_rect = axis.lane_rect(&bounds, start, end);
            if rule.is_valid_lane(area, &probe_rect, axis) {
                run = Some(match run {
                    Some((first, _)) => (first, end),
                    None => (start, end),
                });
            } else if let Some((first, last)) = run.take() {
                lanes.push(Lane::new(first, last));
            }
        }
        if let Some((first, last)) = run {
            lanes.push(Lane::new(first, last));
        }

        let lanes: Vec<Lane> = lanes
            .into_iter()
            .filter(|lane| lane.size() >= spec.min_size)
            .filter(|lane| {
                let rect = axis.lane_rect(&bounds, lane.start, lane.end);
                rule.is_valid_lane(area, &rect, axis)
            })
            .collect();

        rule.choose_lanes(area, axis, lanes)
    }
}
