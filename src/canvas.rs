//! High-level canvas wrapper over pdf-writer content streams
//!
//! Tracks graphics state (colors, font, encoding) so drawing code reads
//! like a canvas API instead of raw content-stream operators.

use pdf_writer::{Content, Name, Str};

use crate::fonts::{encode_text, TextEncoding};
use crate::types::Color;

/// Canvas state for graphics operations
#[derive(Clone)]
pub struct CanvasState {
    pub fill_color: Color,
    pub font_name: Name<'static>,
    pub font_size: f64,
    pub encoding: TextEncoding,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            fill_color: Color::black(),
            // Base font; must be registered in the page resources
            font_name: Name(b"F1"),
            font_size: 12.0,
            encoding: TextEncoding::WinAnsi,
        }
    }
}

/// Stateful canvas over a pdf-writer Content stream
pub struct PdfCanvas {
    content: Content,
    state: CanvasState,
    state_stack: Vec<CanvasState>,
}

impl PdfCanvas {
    pub fn new() -> Self {
        Self {
            content: Content::new(),
            state: CanvasState::default(),
            state_stack: Vec::new(),
        }
    }

    /// Finalize into content stream bytes
    pub fn finish(self) -> Vec<u8> {
        self.content.finish()
    }

    // ===== State management =====

    pub fn save_state(&mut self) {
        self.state_stack.push(self.state.clone());
        self.content.save_state();
    }

    pub fn restore_state(&mut self) {
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
            self.content.restore_state();
        }
    }

    // ===== Colors =====

    pub fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
        self.content
            .set_fill_rgb(color.r as f32, color.g as f32, color.b as f32);
    }

    // ===== Text =====

    /// Select a registered font, its size, and the encoding that produces
    /// its text bytes.
    pub fn set_font(&mut self, font_name: Name<'static>, size: f64, encoding: TextEncoding) {
        self.state.font_name = font_name;
        self.state.font_size = size;
        self.state.encoding = encoding;
    }

    /// Draw a string with its baseline at (x, y)
    pub fn draw_string(&mut self, x: f64, y: f64, text: &str) {
        let bytes = encode_text(&self.state.encoding, text);
        self.content.begin_text();
        self.content
            .set_font(self.state.font_name, self.state.font_size as f32);
        self.content.next_line(x as f32, y as f32);
        self.content.show(Str(&bytes));
        self.content.end_text();
    }

    // ===== Images =====

    /// Draw a registered image XObject scaled into the given box.
    /// (x, y) is the bottom-left corner.
    pub fn draw_image(&mut self, image_name: Name<'static>, x: f64, y: f64, width: f64, height: f64) {
        self.content.save_state();
        // Unit image scaled by the transform matrix
        self.content
            .transform([width as f32, 0.0, 0.0, height as f32, x as f32, y as f32]);
        self.content.x_object(image_name);
        self.content.restore_state();
    }
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}
