//! Element kinds stored in an [`Area`](super::Area).

use std::fmt;
use std::sync::Arc;

use super::{Area, Layer};
use crate::model::{Character, Figure, Paragraph, Rect, Shape, TextBlock, TextLine, Word};

/// Anything with a bounding rectangle.
pub trait HasRect {
    /// Bounding rectangle in user space.
    fn rect(&self) -> Rect;
}

/// Kind tag of an area element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    /// A single glyph
    Character,
    /// A word
    Word,
    /// A text line
    Line,
    /// A text block
    Block,
    /// A paragraph
    Paragraph,
    /// An image or other figure
    Figure,
    /// A vector shape
    Shape,
}

impl ElementKind {
    /// Whether elements of this kind carry text.
    pub fn is_text(self) -> bool {
        !matches!(self, ElementKind::Figure | ElementKind::Shape)
    }

    /// Lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Character => "character",
            ElementKind::Word => "word",
            ElementKind::Line => "line",
            ElementKind::Block => "block",
            ElementKind::Paragraph => "paragraph",
            ElementKind::Figure => "figure",
            ElementKind::Shape => "shape",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shared handle to an element of any kind.
#[derive(Debug, Clone)]
pub enum Element {
    /// A character
    Character(Arc<Character>),
    /// A word
    Word(Arc<Word>),
    /// A text line
    Line(Arc<TextLine>),
    /// A text block
    Block(Arc<TextBlock>),
    /// A paragraph
    Paragraph(Arc<Paragraph>),
    /// A figure
    Figure(Arc<Figure>),
    /// A shape
    Shape(Arc<Shape>),
}

impl Element {
    /// Kind tag of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Character(_) => ElementKind::Character,
            Element::Word(_) => ElementKind::Word,
            Element::Line(_) => ElementKind::Line,
            Element::Block(_) => ElementKind::Block,
            Element::Paragraph(_) => ElementKind::Paragraph,
            Element::Figure(_) => ElementKind::Figure,
            Element::Shape(_) => ElementKind::Shape,
        }
    }
}

impl HasRect for Element {
    fn rect(&self) -> Rect {
        match self {
            Element::Character(e) => e.rect(),
            Element::Word(e) => e.rect(),
            Element::Line(e) => e.rect(),
            Element::Block(e) => e.rect(),
            Element::Paragraph(e) => e.rect(),
            Element::Figure(e) => e.rect(),
            Element::Shape(e) => e.rect(),
        }
    }
}

/// An element type with its own layer inside an [`Area`].
pub trait AreaElement: HasRect + Sized {
    /// Kind tag of the type.
    const KIND: ElementKind;

    /// The layer holding elements of this type.
    fn layer(area: &Area) -> &Layer<Self>;

    /// Wrap a shared element into an [`Element`].
    fn into_element(item: Arc<Self>) -> Element;
}

macro_rules! area_element {
    ($ty:ty, $variant:ident, $field:ident) => {
        impl AreaElement for $ty {
            const KIND: ElementKind = ElementKind::$variant;

            fn layer(area: &Area) -> &Layer<Self> {
                &area.$field
            }

            fn into_element(item: Arc<Self>) -> Element {
                Element::$variant(item)
            }
        }

        impl From<Arc<$ty>> for Element {
            fn from(item: Arc<$ty>) -> Self {
                Element::$variant(item)
            }
        }

        impl From<$ty> for Element {
            fn from(item: $ty) -> Self {
                Element::$variant(Arc::new(item))
            }
        }
    };
}

area_element!(Character, Character, characters);
area_element!(Word, Word, words);
area_element!(TextLine, Line, lines);
area_element!(TextBlock, Block, blocks);
area_element!(Paragraph, Paragraph, paragraphs);
area_element!(Figure, Figure, figures);
area_element!(Shape, Shape, shapes);

impl HasRect for Character {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl HasRect for Figure {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl HasRect for Shape {
    fn rect(&self) -> Rect {
        self.rect
    }
}
