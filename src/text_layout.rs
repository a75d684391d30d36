//! Text layout and measurement
//!
//! This module provides the layout substitute the auto-fit loop needs
//! outside a browser: word-based line breaking into a fixed content width
//! and block height measurement from the current fit settings.
//!
//! Widths come from real TTF glyph advances when a font is available and
//! fall back to the 0.6 × font-size per-character approximation otherwise.

use crate::autofit::FitSettings;
use crate::error::{RenderError, RenderResult};
use ttf_parser::Face;

/// Text width measurement, from glyph advances or an approximation
pub struct TextMeasurer {
    font_data: Option<Vec<u8>>,
}

impl TextMeasurer {
    /// Approximate measurement without font metrics
    pub fn approximate() -> Self {
        Self { font_data: None }
    }

    /// Measurement backed by a TTF/OTF font
    pub fn from_font_data(data: Vec<u8>) -> RenderResult<Self> {
        Face::parse(&data, 0)
            .map_err(|e| RenderError::FontError(format!("Invalid font file: {}", e)))?;
        Ok(Self { font_data: Some(data) })
    }

    /// Measure the advance width of `text` at `font_size`
    pub fn text_width(&self, text: &str, font_size: f64) -> f64 {
        if let Some(face) = self.face() {
            let scale = font_size / face.units_per_em() as f64;
            return text
                .chars()
                .map(|ch| {
                    face.glyph_index(ch)
                        .and_then(|gid| face.glyph_hor_advance(gid))
                        .map(|adv| adv as f64 * scale)
                        // Missing glyph: assume half an em
                        .unwrap_or(font_size * 0.5)
                })
                .sum();
        }
        text.chars().count() as f64 * font_size * 0.6
    }

    /// Width of a word separator at `font_size`
    pub fn space_width(&self, font_size: f64) -> f64 {
        if let Some(face) = self.face() {
            if let Some(adv) = face
                .glyph_index(' ')
                .and_then(|gid| face.glyph_hor_advance(gid))
            {
                return adv as f64 * font_size / face.units_per_em() as f64;
            }
        }
        font_size * 0.3
    }

    fn face(&self) -> Option<Face<'_>> {
        // Data was validated at construction
        self.font_data.as_deref().and_then(|d| Face::parse(d, 0).ok())
    }
}

/// Vertical font metrics scaled to a font size
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    pub ascent: f64,
    pub descent: f64,
    pub line_gap: f64,
}

impl FontMetrics {
    /// Approximate metrics for when no font file is available
    pub fn approximate(font_size: f64) -> Self {
        Self {
            ascent: font_size * 0.8,
            descent: font_size * 0.2,
            line_gap: font_size * 0.05,
        }
    }

    /// Extract metrics from a TTF font, scaled to `font_size`
    pub fn from_ttf(font_data: &[u8], font_size: f64) -> RenderResult<Self> {
        let face = Face::parse(font_data, 0)
            .map_err(|e| RenderError::FontError(format!("Failed to parse TTF font: {}", e)))?;

        let scale = font_size / face.units_per_em() as f64;
        Ok(Self {
            ascent: face.ascender() as f64 * scale,
            // descender is usually negative
            descent: (face.descender() as f64).abs() * scale,
            line_gap: face.line_gap() as f64 * scale,
        })
    }
}

/// Line breaker for wrapping paragraph text into a fixed width
pub struct LineBreaker {
    max_width: f64,
}

impl LineBreaker {
    pub fn new(max_width: f64) -> Self {
        Self { max_width }
    }

    /// Break a paragraph into lines using word-based breaking.
    ///
    /// A word longer than the full width gets a line of its own rather than
    /// being split. Always returns at least one line.
    pub fn break_paragraph(
        &self,
        text: &str,
        font_size: f64,
        measurer: &TextMeasurer,
    ) -> Vec<String> {
        let space_width = measurer.space_width(font_size);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in text.split_whitespace() {
            let word_width = measurer.text_width(word, font_size);
            let needed = if current.is_empty() {
                word_width
            } else {
                current_width + space_width + word_width
            };

            if needed <= self.max_width || current.is_empty() {
                if !current.is_empty() {
                    current.push(' ');
                    current_width += space_width;
                }
                current.push_str(word);
                current_width += word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }

        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Measure the rendered height of a block of paragraphs at the given
/// settings. This is the measure function handed to the auto-fit loop.
pub fn measure_block_height(
    paragraphs: &[String],
    width: f64,
    settings: &FitSettings,
    measurer: &TextMeasurer,
) -> f64 {
    let breaker = LineBreaker::new(width);
    let line_height = settings.font_size * settings.line_height;
    let mut total = 0.0;

    for (i, paragraph) in paragraphs.iter().enumerate() {
        if i > 0 {
            total += settings.paragraph_spacing;
        }
        let lines = breaker.break_paragraph(paragraph, settings.font_size, measurer);
        total += lines.len() as f64 * line_height;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_short_text() {
        let measurer = TextMeasurer::approximate();
        let breaker = LineBreaker::new(1000.0);
        let lines = breaker.break_paragraph("hello world", 16.0, &measurer);
        assert_eq!(lines, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_break_wraps_words() {
        let measurer = TextMeasurer::approximate();
        // Each 5-char word is 48px at 16px; two words plus a space exceed 100px.
        let breaker = LineBreaker::new(100.0);
        let lines = breaker.break_paragraph("aaaaa bbbbb ccccc", 16.0, &measurer);
        assert_eq!(
            lines,
            vec!["aaaaa".to_string(), "bbbbb".to_string(), "ccccc".to_string()]
        );
    }

    #[test]
    fn test_break_oversized_word() {
        let measurer = TextMeasurer::approximate();
        let breaker = LineBreaker::new(10.0);
        let lines = breaker.break_paragraph("supercalifragilistic", 16.0, &measurer);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_break_empty_paragraph() {
        let measurer = TextMeasurer::approximate();
        let breaker = LineBreaker::new(100.0);
        let lines = breaker.break_paragraph("", 16.0, &measurer);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn test_height_monotone_in_font_size() {
        let measurer = TextMeasurer::approximate();
        let paragraphs = vec![
            "some reasonably long paragraph of letter text for the template".to_string(),
            "and a second paragraph to bring paragraph spacing into play".to_string(),
        ];
        let mut settings = FitSettings::default();
        let mut last = f64::INFINITY;
        while settings.font_size >= 10.0 {
            let h = measure_block_height(&paragraphs, 300.0, &settings, &measurer);
            assert!(h <= last);
            last = h;
            settings.font_size -= 0.5;
        }
    }

    #[test]
    fn test_paragraph_spacing_between_only() {
        let measurer = TextMeasurer::approximate();
        let settings = FitSettings::default();
        let one = measure_block_height(&["a".to_string()], 500.0, &settings, &measurer);
        let two = measure_block_height(&["a".to_string(), "a".to_string()], 500.0, &settings, &measurer);
        let line_height = settings.font_size * settings.line_height;
        assert!((two - (2.0 * line_height + settings.paragraph_spacing)).abs() < 1e-9);
        assert!((one - line_height).abs() < 1e-9);
    }
}
