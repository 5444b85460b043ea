//! Text elements: characters, words and lines.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{FontFace, Line, Rect};
use crate::area::{Area, AreaConfig, HasRect};
use crate::stats::{Frequencies, StatisticsConfig, TextStatistic};

/// Letters whose glyphs rise above the meanline.
const ASCENDERS: &str = "bdfhiklt";

/// Glyphs reaching below the baseline.
const DESCENDERS: &str = "gjpqy()[]{}|/,;@$";

/// Quote marks sit near the ascender line.
const QUOTES: &str = "'\"\u{2018}\u{2019}\u{201C}\u{201D}`";

/// Letters whose top edge is the meanline.
const MEANLINE_LETTERS: &str = "acemnorsuvwxz";

/// Glyphs used as hyphens at the end of a word.
const HYPHENS: &[&str] = &["-", "\u{2010}", "\u{2011}", "\u{00AD}"];

/// A character smaller than the line's font size by more than this may be a script.
const SCRIPT_SIZE_TOLERANCE: f32 = 0.5;

/// Minimum vertical shift from the baseline for a script character.
const SCRIPT_SHIFT_TOLERANCE: f32 = 1.0;

/// A positioned glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unicode text of the glyph (usually a single char)
    pub text: String,
    /// Bounding box
    pub rect: Rect,
    /// Font identifier
    pub font_id: u32,
    /// Font size in points
    pub font_size: f32,
    /// Color identifier
    #[serde(default)]
    pub color_id: u32,
    /// Rotation in degrees
    #[serde(default)]
    pub orientation: f32,
    /// Extraction order number
    #[serde(default)]
    pub order: u32,
}

impl Character {
    /// Create a character.
    pub fn new(text: impl Into<String>, rect: Rect, font_id: u32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            rect,
            font_id,
            font_size,
            color_id: 0,
            orientation: 0.0,
            order: 0,
        }
    }

    /// Set the color id.
    pub fn with_color(mut self, color_id: u32) -> Self {
        self.color_id = color_id;
        self
    }

    /// Set the extraction order number.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Set the orientation in degrees.
    pub fn with_orientation(mut self, orientation: f32) -> Self {
        self.orientation = orientation;
        self
    }

    /// Font face of the character.
    pub fn face(&self) -> FontFace {
        FontFace::new(self.font_id, self.font_size)
    }

    fn first(&self) -> Option<char> {
        self.text.chars().next()
    }

    /// Whether the character is whitespace only.
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }

    /// Whether the character is a punctuation mark.
    pub fn is_punctuation(&self) -> bool {
        self.first().is_some_and(is_punctuation_char)
    }

    /// Whether the glyph rises above the meanline (tall letters,
    /// capitals, digits, quotes).
    pub fn is_ascender(&self) -> bool {
        self.first().is_some_and(|c| {
            ASCENDERS.contains(c) || QUOTES.contains(c) || c.is_uppercase() || c.is_ascii_digit()
        })
    }

    /// Whether the glyph reaches below the baseline.
    pub fn is_descender(&self) -> bool {
        self.first().is_some_and(|c| DESCENDERS.contains(c))
    }

    /// Whether the bottom edge of the glyph sits on the baseline.
    pub fn is_baseline_reference(&self) -> bool {
        self.first().is_some_and(|c| {
            MEANLINE_LETTERS.contains(c)
                || ASCENDERS.contains(c)
                || c.is_uppercase()
                || c.is_ascii_digit()
        })
    }

    /// Whether the top edge of the glyph sits on the meanline.
    pub fn is_meanline_reference(&self) -> bool {
        self.first().is_some_and(|c| MEANLINE_LETTERS.contains(c))
    }
}

fn is_punctuation_char(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{2010}'..='\u{2027}'
                | '\u{00A1}'
                | '\u{00AB}'
                | '\u{00BB}'
                | '\u{00BF}'
                | '\u{3001}'
                | '\u{3002}'
        )
}

/// Vertical placement of a character within its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    /// On the baseline
    #[default]
    Normal,
    /// Raised, smaller character
    Superscript,
    /// Lowered, smaller character
    Subscript,
}

/// Options controlling how element text is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Include sub- and superscript characters
    pub include_scripts: bool,
    /// Include punctuation characters
    pub include_punctuation: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            include_scripts: true,
            include_punctuation: true,
        }
    }
}

impl TextOptions {
    /// Create options that include everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop sub- and superscript characters.
    pub fn without_scripts(mut self) -> Self {
        self.include_scripts = false;
        self
    }

    /// Drop punctuation characters.
    pub fn without_punctuation(mut self) -> Self {
        self.include_punctuation = false;
        self
    }
}

/// A word: characters in extraction order.
#[derive(Debug, Clone)]
pub struct Word {
    characters: Vec<Arc<Character>>,
    scripts: Vec<Script>,
    rect: Rect,
    statistic: TextStatistic,
}

impl Word {
    /// Create a word with all characters on the baseline.
    pub fn new(characters: Vec<Arc<Character>>) -> Self {
        Self::with_scripts(characters, &StatisticsConfig::default(), |_| Script::Normal)
    }

    /// Create a word, assigning each character its script with `script_of`.
    pub fn with_scripts(
        mut characters: Vec<Arc<Character>>,
        config: &StatisticsConfig,
        script_of: impl Fn(&Character) -> Script,
    ) -> Self {
        characters.sort_by_key(|c| c.order);
        let scripts = characters.iter().map(|c| script_of(c.as_ref())).collect();
        let rect = Rect::bounding(characters.iter().map(|c| &c.rect)).unwrap_or_default();
        let statistic = TextStatistic::compute(characters.iter().map(|c| c.as_ref()), config);
        Self {
            characters,
            scripts,
            rect,
            statistic,
        }
    }

    /// Characters in extraction order.
    pub fn characters(&self) -> &[Arc<Character>] {
        &self.characters
    }

    /// Script of each character, parallel to [`characters`](Self::characters).
    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    /// Smallest extraction order number of the word.
    pub fn order(&self) -> u32 {
        self.characters.first().map(|c| c.order).unwrap_or(0)
    }

    /// Text of the word.
    pub fn text(&self, options: &TextOptions) -> String {
        self.characters
            .iter()
            .zip(&self.scripts)
            .filter(|(_, script)| options.include_scripts || **script == Script::Normal)
            .filter(|(c, _)| options.include_punctuation || !c.is_punctuation())
            .map(|(c, _)| c.text.as_str())
            .collect()
    }

    /// Whether the word ends with a hyphen.
    pub fn is_hyphenated(&self) -> bool {
        self.characters.len() > 1
            && self
                .characters
                .last()
                .is_some_and(|c| HYPHENS.contains(&c.text.as_str()))
    }

    /// Whether the word contains a sub- or superscript character.
    pub fn has_script(&self) -> bool {
        self.scripts.iter().any(|s| *s != Script::Normal)
    }

    /// Whether the word contains a punctuation character.
    pub fn has_punctuation(&self) -> bool {
        self.characters.iter().any(|c| c.is_punctuation())
    }

    /// Most common font face of the word.
    pub fn font_face(&self) -> Option<FontFace> {
        self.statistic.most_common_face
    }

    /// Font and color statistic of the word.
    pub fn statistic(&self) -> &TextStatistic {
        &self.statistic
    }
}

impl HasRect for Word {
    fn rect(&self) -> Rect {
        self.rect
    }
}

/// A line of text: words ordered by extraction order, plus the baseline and
/// meanline estimated from reference characters.
#[derive(Debug, Clone)]
pub struct TextLine {
    area: Area,
    baseline: Line,
    meanline: Line,
}

impl TextLine {
    /// Build a line from groups of characters, one group per word.
    ///
    /// The area holds the words and their characters.
    pub fn new(groups: Vec<Vec<Arc<Character>>>, config: &AreaConfig) -> Self {
        let precision = config.statistics.precision;
        let chars: Vec<&Arc<Character>> = groups.iter().flatten().collect();

        let baseline_y = reference_mode(
            chars.iter().filter(|c| c.is_baseline_reference()).map(|c| c.rect.min_y),
            chars.iter().map(|c| c.rect.min_y),
            precision,
        );
        let meanline_y = reference_mode(
            chars.iter().filter(|c| c.is_meanline_reference()).map(|c| c.rect.max_y),
            chars.iter().map(|c| c.rect.max_y),
            precision,
        );
        let line_size = Frequencies::from_values(chars.iter().map(|c| c.font_size), precision)
            .most_common()
            .unwrap_or(0.0);

        let script_of = |c: &Character| {
            if c.font_size >= line_size - SCRIPT_SIZE_TOLERANCE {
                Script::Normal
            } else if c.rect.min_y > baseline_y + SCRIPT_SHIFT_TOLERANCE {
                Script::Superscript
            } else if c.rect.min_y < baseline_y - SCRIPT_SHIFT_TOLERANCE {
                Script::Subscript
            } else {
                Script::Normal
            }
        };

        let mut words: Vec<Word> = groups
            .into_iter()
            .filter(|g| !g.is_empty())
            .map(|g| Word::with_scripts(g, &config.statistics, &script_of))
            .collect();
        words.sort_by_key(|w| w.order());

        let mut area = Area::new(*config);
        let mut characters = Vec::new();
        for word in words {
            characters.extend(word.characters().iter().cloned());
            area.insert(word);
        }
        area.extend(characters);

        let rect = area.rect().unwrap_or_default();
        Self {
            baseline: Line::horizontal(rect.min_x, rect.max_x, baseline_y),
            meanline: Line::horizontal(rect.min_x, rect.max_x, meanline_y),
            area,
        }
    }

    /// Area holding the words and characters of the line.
    pub fn area(&self) -> &Area {
        &self.area
    }

    /// Words in extraction order.
    pub fn words(&self) -> &[Arc<Word>] {
        self.area.words()
    }

    /// Characters in word order.
    pub fn characters(&self) -> &[Arc<Character>] {
        self.area.characters()
    }

    /// First word of the line.
    pub fn first_word(&self) -> Option<&Arc<Word>> {
        self.words().first()
    }

    /// Last word of the line.
    pub fn last_word(&self) -> Option<&Arc<Word>> {
        self.words().last()
    }

    /// Estimated baseline.
    pub fn baseline(&self) -> Line {
        self.baseline
    }

    /// Estimated meanline.
    pub fn meanline(&self) -> Line {
        self.meanline
    }

    /// Most common font face of the line.
    pub fn font_face(&self) -> Option<FontFace> {
        self.area.text_statistic().most_common_face
    }

    /// Most common font size of the line.
    pub fn font_size(&self) -> f32 {
        self.area.text_statistic().most_common_font_size
    }

    /// Text of the line, words separated by single spaces.
    pub fn text(&self, options: &TextOptions) -> String {
        self.words()
            .iter()
            .map(|w| w.text(options))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the last word of the line ends with a hyphen.
    pub fn is_hyphenated(&self) -> bool {
        self.last_word().is_some_and(|w| w.is_hyphenated())
    }
}

impl HasRect for TextLine {
    fn rect(&self) -> Rect {
        self.area.rect().unwrap_or_default()
    }
}

fn reference_mode(
    references: impl Iterator<Item = f32>,
    all: impl Iterator<Item = f32>,
    precision: u32,
) -> f32 {
    Frequencies::from_values(references, precision)
        .most_common()
        .or_else(|| Frequencies::from_values(all, precision).most_common())
        .unwrap_or(0.0)
}

/// Join line texts into running text, merging hyphenated line ends.
pub(crate) fn join_lines<'a>(
    lines: impl IntoIterator<Item = &'a Arc<TextLine>>,
    options: &TextOptions,
) -> String {
    let mut text = String::new();
    let mut hyphenated = false;
    for line in lines {
        let line_text = line.text(options);
        if line_text.is_empty() {
            continue;
        }
        if hyphenated {
            // Drop the trailing hyphen and glue the word halves.
            text.pop();
        } else if !text.is_empty() {
            text.push(' ');
        }
        hyphenated = line.is_hyphenated() && text_ends_with_hyphen(&line_text);
        text.push_str(&line_text);
    }
    text
}

fn text_ends_with_hyphen(text: &str) -> bool {
    HYPHENS.iter().any(|h| text.ends_with(h))
}
