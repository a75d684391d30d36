//! Type definitions for letter rendering

use serde::{Deserialize, Serialize};

/// A4 page size in CSS pixels (96 dpi), matching the print templates
pub const A4_WIDTH_PX: f64 = 793.7;
pub const A4_HEIGHT_PX: f64 = 1122.5;

/// Conversion factor from CSS pixels (1/96 in) to PDF points (1/72 in)
pub const PX_TO_PT: f64 = 0.75;

/// Size with width and height
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn a4() -> Self {
        Self::new(A4_WIDTH_PX, A4_HEIGHT_PX)
    }
}

/// Text fill color
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

/// Page template for letters: the content box sits between the configurable
/// top and bottom letterhead margins, with fixed side margins.
///
/// All values are CSS pixels to match the payloads coming from the host
/// application; conversion to PDF points happens at draw time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageTemplate {
    #[serde(default = "Size::a4")]
    pub size: Size,
    /// Distance from the page top to the content box (letterhead header area)
    #[serde(default = "default_content_top")]
    pub content_top: f64,
    /// Distance from the page bottom to the content box (letterhead footer area)
    #[serde(default = "default_content_bottom")]
    pub content_bottom: f64,
    #[serde(default = "default_side_margin")]
    pub side_margin: f64,
    /// Optional letterhead background image (PNG or JPEG)
    #[serde(default)]
    pub letterhead_path: Option<String>,
}

fn default_content_top() -> f64 {
    150.0
}

fn default_content_bottom() -> f64 {
    100.0
}

fn default_side_margin() -> f64 {
    50.0
}

impl Default for PageTemplate {
    fn default() -> Self {
        Self {
            size: Size::a4(),
            content_top: default_content_top(),
            content_bottom: default_content_bottom(),
            side_margin: default_side_margin(),
            letterhead_path: None,
        }
    }
}

impl PageTemplate {
    /// Width of the content box in pixels
    pub fn content_width(&self) -> f64 {
        (self.size.width - 2.0 * self.side_margin).max(0.0)
    }

    /// Height budget for the content box in pixels
    pub fn content_height(&self) -> f64 {
        (self.size.height - self.content_top - self.content_bottom).max(0.0)
    }
}

/// Promissory note payload
///
/// Field names follow the host application's JSON payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromissoryNote {
    pub note_number: String,
    pub debtor_name: String,
    pub debtor_id_number: String,
    #[serde(default)]
    pub debtor_address: Option<String>,
    pub amount: f64,
    pub creation_date: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub creation_place: Option<String>,
    pub beneficiary_name: String,
    #[serde(default)]
    pub beneficiary_commercial_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_box() {
        let page = PageTemplate::default();
        assert!((page.content_width() - (A4_WIDTH_PX - 100.0)).abs() < 1e-9);
        assert!((page.content_height() - (A4_HEIGHT_PX - 250.0)).abs() < 1e-9);
    }

    #[test]
    fn test_note_deserialize_defaults() {
        let note: PromissoryNote = serde_json::from_str(
            r#"{
                "note_number": "PN-001",
                "debtor_name": "محمد",
                "debtor_id_number": "1234567890",
                "amount": 5300.0,
                "creation_date": "2024-05-01",
                "beneficiary_name": "شركة الاختبار"
            }"#,
        )
        .unwrap();
        assert!(note.due_date.is_none());
        assert_eq!(note.amount, 5300.0);
    }
}
