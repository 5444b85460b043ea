//! Spatially indexed element container with cached statistics.
//!
//! An [`Area`] keeps one spatial index per element kind plus a generic index
//! over all elements and one over text-bearing elements. Statistics are
//! computed lazily and cached until the next insertion.

mod element;
mod index;

pub use element::{AreaElement, Element, ElementKind, HasRect};
pub use index::{AnyIndex, IndexKind, RTreeIndex, ScanIndex, SpatialIndex, SpatialPredicate};

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::model::{Character, Figure, Paragraph, Point, Rect, Shape, TextBlock, TextLine, Word};
use crate::stats::{
    DimensionStatistic, PositionStatistic, StatisticsConfig, TextLineStatistic, TextStatistic,
};

/// Orientation of a lane, and the axis an area is split along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Vertical lanes; cuts are x positions
    Vertical,
    /// Horizontal lanes; cuts are y positions
    Horizontal,
}

impl Axis {
    /// Coordinate of a point along the cut direction.
    pub fn coordinate(self, point: &Point) -> f32 {
        match self {
            Axis::Vertical => point.x,
            Axis::Horizontal => point.y,
        }
    }

    /// Extent of a rectangle along the cut direction.
    pub fn range(self, rect: &Rect) -> (f32, f32) {
        match self {
            Axis::Vertical => (rect.min_x, rect.max_x),
            Axis::Horizontal => (rect.min_y, rect.max_y),
        }
    }

    /// Extent of a rectangle across the cut direction.
    pub fn cross_range(self, rect: &Rect) -> (f32, f32) {
        match self {
            Axis::Vertical => (rect.min_y, rect.max_y),
            Axis::Horizontal => (rect.min_x, rect.max_x),
        }
    }

    /// Rectangle covering `[start, end]` along this axis and the full cross
    /// extent of `bounds`.
    pub fn lane_rect(self, bounds: &Rect, start: f32, end: f32) -> Rect {
        match self {
            Axis::Vertical => Rect::new(start, bounds.min_y, end, bounds.max_y),
            Axis::Horizontal => Rect::new(bounds.min_x, start, bounds.max_x, end),
        }
    }
}

/// Configuration shared by an area and the areas derived from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    /// Statistics parameters
    pub statistics: StatisticsConfig,
    /// Spatial index implementation
    pub index: IndexKind,
}

impl AreaConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the statistics parameters.
    pub fn with_statistics(mut self, statistics: StatisticsConfig) -> Self {
        self.statistics = statistics;
        self
    }

    /// Set the spatial index implementation.
    pub fn with_index(mut self, index: IndexKind) -> Self {
        self.index = index;
        self
    }
}

/// Elements of one kind with their spatial index.
#[derive(Debug)]
pub struct Layer<T> {
    items: Vec<Arc<T>>,
    index: AnyIndex,
}

impl<T> Clone for Layer<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T> Layer<T> {
    fn new(kind: IndexKind) -> Self {
        Self {
            items: Vec::new(),
            index: kind.create(),
        }
    }

    fn push(&mut self, item: Arc<T>, rect: Rect) -> usize {
        let slot = self.items.len();
        self.index.insert(slot, rect);
        self.items.push(item);
        slot
    }

    /// Elements in insertion order.
    pub fn items(&self) -> &[Arc<T>] {
        &self.items
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the layer is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn query(&self, predicate: SpatialPredicate, rect: &Rect) -> Vec<Arc<T>> {
        self.index
            .query(predicate, rect)
            .into_iter()
            .map(|slot| Arc::clone(&self.items[slot]))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
struct StatisticsCache {
    dimension: OnceLock<DimensionStatistic>,
    text: OnceLock<TextStatistic>,
    text_line: OnceLock<TextLineStatistic>,
    position: OnceLock<PositionStatistic>,
}

/// A spatially indexed set of page elements.
#[derive(Debug, Clone)]
pub struct Area {
    config: AreaConfig,
    characters: Layer<Character>,
    words: Layer<Word>,
    lines: Layer<TextLine>,
    blocks: Layer<TextBlock>,
    paragraphs: Layer<Paragraph>,
    figures: Layer<Figure>,
    shapes: Layer<Shape>,
    entries: Vec<(ElementKind, usize)>,
    elements: AnyIndex,
    text_entries: Vec<(ElementKind, usize)>,
    text_elements: AnyIndex,
    bounds: Option<Rect>,
    cache: StatisticsCache,
}

impl Default for Area {
    fn default() -> Self {
        Self::new(AreaConfig::default())
    }
}

impl Area {
    /// Create an empty area.
    pub fn new(config: AreaConfig) -> Self {
        let kind = config.index;
        Self {
            config,
            characters: Layer::new(kind),
            words: Layer::new(kind),
            lines: Layer::new(kind),
            blocks: Layer::new(kind),
            paragraphs: Layer::new(kind),
            figures: Layer::new(kind),
            shapes: Layer::new(kind),
            entries: Vec::new(),
            elements: kind.create(),
            text_entries: Vec::new(),
            text_elements: kind.create(),
            bounds: None,
            cache: StatisticsCache::default(),
        }
    }

    /// Configuration of the area.
    pub fn config(&self) -> &AreaConfig {
        &self.config
    }

    /// Insert an element.
    ///
    /// Elements with non-finite coordinates or a non-positive extent are
    /// rejected and `false` is returned. Constituents of composite elements
    /// are not inserted implicitly.
    pub fn insert(&mut self, element: impl Into<Element>) -> bool {
        let element = element.into();
        let rect = element.rect();
        if !rect.is_well_formed() {
            log::warn!("Rejecting {} with degenerate rect {:?}", element.kind(), rect);
            return false;
        }

        let kind = element.kind();
        let slot = match element {
            Element::Character(e) => self.characters.push(e, rect),
            Element::Word(e) => self.words.push(e, rect),
            Element::Line(e) => self.lines.push(e, rect),
            Element::Block(e) => self.blocks.push(e, rect),
            Element::Paragraph(e) => self.paragraphs.push(e, rect),
            Element::Figure(e) => self.figures.push(e, rect),
            Element::Shape(e) => self.shapes.push(e, rect),
        };

        self.elements.insert(self.entries.len(), rect);
        self.entries.push((kind, slot));
        if kind.is_text() {
            self.text_elements.insert(self.text_entries.len(), rect);
            self.text_entries.push((kind, slot));
        }

        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.union(&rect),
            None => rect,
        });
        self.cache = StatisticsCache::default();
        true
    }

    /// Insert several elements, returning how many were accepted.
    pub fn extend<E: Into<Element>>(&mut self, elements: impl IntoIterator<Item = E>) -> usize {
        elements
            .into_iter()
            .map(|element| self.insert(element))
            .filter(|accepted| *accepted)
            .count()
    }

    /// Tight bounding box of all elements, `None` for an empty area.
    pub fn rect(&self) -> Option<Rect> {
        self.bounds
    }

    /// Total number of elements across all kinds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the area holds no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of elements of one type.
    pub fn count<T: AreaElement>(&self) -> usize {
        T::layer(self).len()
    }

    /// All elements of one type in insertion order.
    pub fn all<T: AreaElement>(&self) -> &[Arc<T>] {
        T::layer(self).items()
    }

    /// Characters in insertion order.
    pub fn characters(&self) -> &[Arc<Character>] {
        self.characters.items()
    }

    /// Words in insertion order.
    pub fn words(&self) -> &[Arc<Word>] {
        self.words.items()
    }

    /// Text lines in insertion order.
    pub fn lines(&self) -> &[Arc<TextLine>] {
        self.lines.items()
    }

    /// Text blocks in insertion order.
    pub fn blocks(&self) -> &[Arc<TextBlock>] {
        self.blocks.items()
    }

    /// Paragraphs in insertion order.
    pub fn paragraphs(&self) -> &[Arc<Paragraph>] {
        self.paragraphs.items()
    }

    /// Figures in insertion order.
    pub fn figures(&self) -> &[Arc<Figure>] {
        self.figures.items()
    }

    /// Shapes in insertion order.
    pub fn shapes(&self) -> &[Arc<Shape>] {
        self.shapes.items()
    }

    /// Elements of one type matching `predicate`, in insertion order.
    pub fn query<T: AreaElement>(&self, predicate: SpatialPredicate, rect: &Rect) -> Vec<Arc<T>> {
        T::layer(self).query(predicate, rect)
    }

    /// Whether any element of one type matches `predicate`.
    pub fn any<T: AreaElement>(&self, predicate: SpatialPredicate, rect: &Rect) -> bool {
        !T::layer(self).index.query(predicate, rect).is_empty()
    }

    /// Elements of every kind matching `predicate`, in insertion order.
    pub fn query_elements(&self, predicate: SpatialPredicate, rect: &Rect) -> Vec<Element> {
        self.elements
            .query(predicate, rect)
            .into_iter()
            .map(|id| self.resolve(self.entries[id]))
            .collect()
    }

    /// Text-bearing elements matching `predicate`, in insertion order.
    pub fn query_text_elements(&self, predicate: SpatialPredicate, rect: &Rect) -> Vec<Element> {
        self.text_elements
            .query(predicate, rect)
            .into_iter()
            .map(|id| self.resolve(self.text_entries[id]))
            .collect()
    }

    fn resolve(&self, (kind, slot): (ElementKind, usize)) -> Element {
        match kind {
            ElementKind::Character => Element::Character(Arc::clone(&self.characters.items[slot])),
            ElementKind::Word => Element::Word(Arc::clone(&self.words.items[slot])),
            ElementKind::Line => Element::Line(Arc::clone(&self.lines.items[slot])),
            ElementKind::Block => Element::Block(Arc::clone(&self.blocks.items[slot])),
            ElementKind::Paragraph => Element::Paragraph(Arc::clone(&self.paragraphs.items[slot])),
            ElementKind::Figure => Element::Figure(Arc::clone(&self.figures.items[slot])),
            ElementKind::Shape => Element::Shape(Arc::clone(&self.shapes.items[slot])),
        }
    }

    /// Width/height statistic of the characters, or of the figures and
    /// shapes when the area holds no characters.
    pub fn dimension_statistic(&self) -> &DimensionStatistic {
        self.cache.dimension.get_or_init(|| {
            let config = &self.config.statistics;
            if !self.characters.is_empty() {
                DimensionStatistic::compute(self.characters.items.iter().map(|c| &c.rect), config)
            } else {
                let figures = self.figures.items.iter().map(|f| &f.rect);
                let shapes = self.shapes.items.iter().map(|s| &s.rect);
                DimensionStatistic::compute(figures.chain(shapes), config)
            }
        })
    }

    /// Font and color statistic of the characters.
    pub fn text_statistic(&self) -> &TextStatistic {
        self.cache.text.get_or_init(|| {
            TextStatistic::compute(
                self.characters.items.iter().map(|c| c.as_ref()),
                &self.config.statistics,
            )
        })
    }

    /// Pitch statistic of the text lines in insertion order.
    pub fn text_line_statistic(&self) -> &TextLineStatistic {
        self.cache.text_line.get_or_init(|| {
            TextLineStatistic::compute(
                self.lines
                    .items
                    .iter()
                    .map(|line| (line.rect(), line.baseline().y())),
                &self.config.statistics,
            )
        })
    }

    /// Edge statistic of the lines, or of the characters when there are none.
    pub fn position_statistic(&self) -> &PositionStatistic {
        self.cache.position.get_or_init(|| {
            let config = &self.config.statistics;
            if !self.lines.is_empty() {
                let rects: Vec<Rect> = self.lines.items.iter().map(|l| l.rect()).collect();
                PositionStatistic::compute(&rects, config)
            } else {
                PositionStatistic::compute(self.characters.items.iter().map(|c| &c.rect), config)
            }
        })
    }

    /// Partition the elements at `cuts` along `axis`.
    ///
    /// Each element goes to the part containing its center. Parts are
    /// returned in ascending coordinate order; empty parts are dropped.
    pub fn split(&self, axis: Axis, cuts: &[f32]) -> Vec<Area> {
        let mut cuts = cuts.to_vec();
        cuts.sort_by(f32::total_cmp);

        let mut parts: Vec<Area> = (0..=cuts.len()).map(|_| Area::new(self.config)).collect();
        self.distribute::<Character>(&mut parts, axis, &cuts);
        self.distribute::<Word>(&mut parts, axis, &cuts);
        self.distribute::<TextLine>(&mut parts, axis, &cuts);
        self.distribute::<TextBlock>(&mut parts, axis, &cuts);
        self.distribute::<Paragraph>(&mut parts, axis, &cuts);
        self.distribute::<Figure>(&mut parts, axis, &cuts);
        self.distribute::<Shape>(&mut parts, axis, &cuts);

        parts.retain(|part| !part.is_empty());
        parts
    }

    fn distribute<T: AreaElement>(&self, parts: &mut [Area], axis: Axis, cuts: &[f32]) {
        for item in T::layer(self).items() {
            let center = axis.coordinate(&item.rect().center());
            let part = cuts.partition_point(|cut| *cut < center);
            parts[part].insert(T::into_element(Arc::clone(item)));
        }
    }
}
