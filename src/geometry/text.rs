//! Text measurement capability and text container sizing.
//!
//! Real glyph metrics belong to the rendering surface, so the engine only
//! consumes [`TextMetrics`]. [`MonospaceMetrics`] is a fixed-advance
//! estimator for headless use and tests.

use crate::types::Size;

use super::defaults;

/// Size constraints for the box a title is laid out in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    /// Widest unbreakable run (a single word, or the whole title)
    pub min_width: f64,
    /// Height of one rendered line
    pub min_height: f64,
    /// Area of the title laid out on a single line
    pub min_area: f64,
}

impl ContainerSize {
    /// Zero or non-finite constraints fall back to 1; `min_area` defaults to
    /// `min_width * min_height`.
    pub fn new(min_width: f64, min_height: f64, min_area: f64) -> Self {
        let min_width = positive_or(min_width, 1.0);
        let min_height = positive_or(min_height, 1.0);
        let min_area = positive_or(min_area, min_width * min_height);
        ContainerSize {
            min_width,
            min_height,
            min_area,
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}

/// Measures rendered text.
pub trait TextMetrics {
    /// Width and height of `text` rendered on one line.
    fn measure(&self, text: &str) -> Size;

    fn width(&self, text: &str) -> f64 {
        self.measure(text).width
    }

    /// Container constraints for a title: a multi-word title may wrap, so
    /// its minimum width is its widest word.
    fn container_size(&self, text: &str) -> ContainerSize {
        let size = self.measure(text);
        let words: Vec<&str> = text.split_whitespace().collect();
        let width = if words.len() > 1 {
            words.iter().map(|word| self.width(word)).fold(0.0, f64::max)
        } else {
            size.width
        };
        ContainerSize::new(width, size.height, size.width * size.height)
    }
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn measure(&self, text: &str) -> Size {
        (**self).measure(text)
    }
}

/// Fixed advance per character, fixed line height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub char_width: f64,
    pub line_height: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        MonospaceMetrics {
            char_width: defaults::CHAR_WIDTH,
            line_height: defaults::LINE_HEIGHT,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str) -> Size {
        let chars = text.chars().count();
        Size::new(chars as f64 * self.char_width, self.line_height)
    }
}
