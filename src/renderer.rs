//! Letter and promissory-note PDF rendering
//!
//! Renders normalized letter content onto a page template: the letterhead
//! image is stretched behind the page, the content is auto-fitted to the
//! box between the template's top and bottom margins, and the fitted,
//! line-broken paragraphs are drawn top-down.
//!
//! All template geometry and fit settings are in CSS pixels (matching the
//! host application's payloads); conversion to PDF points happens here.

use log::{debug, warn};
use pdf_writer::{Name, Pdf, Rect as PdfRect, Ref};

use crate::autofit::{fit_to_height, FitPlan, FitSettings};
use crate::canvas::PdfCanvas;
use crate::error::RenderResult;
use crate::fonts;
use crate::image_utils::{self, LetterheadImage};
use crate::json_helpers;
use crate::text_layout::{measure_block_height, FontMetrics, LineBreaker, TextMeasurer};
use crate::text_utils::html_to_paragraphs;
use crate::types::{Color, PageTemplate, PromissoryNote, PX_TO_PT};
use crate::words::{amount_to_words, Locale};

const BASE_FONT_NAME: Name<'static> = Name(b"F1");
const EMBEDDED_FONT_NAME: Name<'static> = Name(b"F2");

/// Renders letters and promissory notes to PDF bytes
pub struct LetterRenderer {
    page: PageTemplate,
    font_data: Option<Vec<u8>>,
    measurer: TextMeasurer,
    letterhead: Option<LetterheadImage>,
}

impl LetterRenderer {
    /// Create a renderer for a page template, loading its letterhead if set
    pub fn new(page: PageTemplate) -> RenderResult<Self> {
        let letterhead = match &page.letterhead_path {
            Some(path) => Some(image_utils::load_letterhead(path)?),
            None => None,
        };
        Ok(Self {
            page,
            font_data: None,
            measurer: TextMeasurer::approximate(),
            letterhead,
        })
    }

    /// Use an embedded TTF for text rendering and measurement
    pub fn with_font_file(self, path: &str) -> RenderResult<Self> {
        let data = fonts::load_font_file(path)?;
        self.with_font_data(data)
    }

    /// Use embedded TTF bytes for text rendering and measurement
    pub fn with_font_data(mut self, data: Vec<u8>) -> RenderResult<Self> {
        self.measurer = TextMeasurer::from_font_data(data.clone())?;
        self.font_data = Some(data);
        Ok(self)
    }

    /// Use raw image bytes as the letterhead background
    pub fn with_letterhead_bytes(mut self, data: Vec<u8>) -> RenderResult<Self> {
        self.letterhead = Some(image_utils::load_letterhead_bytes(data)?);
        Ok(self)
    }

    /// Render an HTML letter body to a single-page PDF
    pub fn render_letter(&self, html: &str) -> RenderResult<Vec<u8>> {
        let paragraphs = html_to_paragraphs(html);
        self.render_paragraphs(&self.page, &paragraphs)
    }

    /// Render a letter from a JSON payload: `content` plus optional
    /// `top_margin` / `bottom_margin` overrides from the company settings.
    pub fn render_letter_json(&self, payload: &serde_json::Value) -> RenderResult<Vec<u8>> {
        let content = json_helpers::get_str(payload, "content")?;
        let mut page = self.page.clone();
        page.content_top = json_helpers::get_f64_or(payload, "top_margin", page.content_top);
        page.content_bottom =
            json_helpers::get_f64_or(payload, "bottom_margin", page.content_bottom);

        let paragraphs = html_to_paragraphs(content);
        self.render_paragraphs(&page, &paragraphs)
    }

    /// Render a promissory note to a single-page PDF.
    ///
    /// The amount is rendered both numerically and in Arabic words.
    pub fn render_promissory_note(&self, note: &PromissoryNote) -> RenderResult<Vec<u8>> {
        let paragraphs = note_paragraphs(note)?;
        self.render_paragraphs(&self.page, &paragraphs)
    }

    fn render_paragraphs(
        &self,
        page: &PageTemplate,
        paragraphs: &[String],
    ) -> RenderResult<Vec<u8>> {
        let content_width = page.content_width();
        let content_height = page.content_height();

        let fit = fit_to_height(
            FitSettings::default(),
            &FitPlan::print(),
            content_height,
            |s| measure_block_height(paragraphs, content_width, s, &self.measurer),
        );
        debug!(
            "letter fit: font {:.1}px, line height {:.2}, spacing {:.0}px after {} steps (fits: {})",
            fit.settings.font_size,
            fit.settings.line_height,
            fit.settings.paragraph_spacing,
            fit.steps_taken,
            fit.fits
        );
        if !fit.fits {
            warn!("letter content overflows the template even at minimum density");
        }

        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let content_id = Ref::new(4);
        let base_font_id = Ref::new(5);
        let mut next_ref_id = 6;

        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        let base_encoding = fonts::add_base_font(&mut pdf, base_font_id);

        let embedded = match &self.font_data {
            Some(data) => {
                let font_id = Ref::new(next_ref_id);
                next_ref_id += 1;
                let encoding = fonts::add_truetype_font(&mut pdf, data, font_id, &mut next_ref_id)?;
                Some((font_id, encoding))
            }
            None => None,
        };

        let letterhead_entry = match &self.letterhead {
            Some(img) => {
                let image_id = Ref::new(next_ref_id);
                next_ref_id += 1;
                let name =
                    image_utils::add_letterhead_to_pdf(&mut pdf, img, image_id, &mut next_ref_id)?;
                Some((image_id, name))
            }
            None => None,
        };

        let page_w_pt = page.size.width * PX_TO_PT;
        let page_h_pt = page.size.height * PX_TO_PT;

        {
            let mut page_writer = pdf.page(page_id);
            page_writer.media_box(PdfRect::new(0.0, 0.0, page_w_pt as f32, page_h_pt as f32));
            page_writer.parent(page_tree_id);
            page_writer.contents(content_id);

            let mut resources = page_writer.resources();
            {
                let mut fonts_dict = resources.fonts();
                fonts_dict.pair(BASE_FONT_NAME, base_font_id);
                if let Some((font_id, _)) = &embedded {
                    fonts_dict.pair(EMBEDDED_FONT_NAME, *font_id);
                }
            }
            if let Some((image_id, name)) = &letterhead_entry {
                resources.x_objects().pair(*name, *image_id);
            }
        }

        let mut canvas = PdfCanvas::new();

        // Letterhead underlay, stretched over the full page
        if let Some((_, name)) = &letterhead_entry {
            canvas.draw_image(*name, 0.0, 0.0, page_w_pt, page_h_pt);
        }

        let settings = fit.settings;
        let (font_name, encoding) = match &embedded {
            Some((_, encoding)) => (EMBEDDED_FONT_NAME, encoding.clone()),
            None => (BASE_FONT_NAME, base_encoding),
        };
        canvas.set_font(font_name, settings.font_size * PX_TO_PT, encoding);
        canvas.set_fill_color(Color::black());

        let metrics = match &self.font_data {
            Some(data) => FontMetrics::from_ttf(data, settings.font_size)?,
            None => FontMetrics::approximate(settings.font_size),
        };

        let breaker = LineBreaker::new(content_width);
        let line_height_px = settings.font_size * settings.line_height;
        let half_leading = (line_height_px - (metrics.ascent + metrics.descent)) / 2.0;

        // Cursor measured in px from the page top
        let mut cursor_y = page.content_top;
        for (i, paragraph) in paragraphs.iter().enumerate() {
            if i > 0 {
                cursor_y += settings.paragraph_spacing;
            }
            // TODO: shape Arabic runs before drawing; glyphs are currently
            // taken from the cmap without joining forms.
            let rtl = is_rtl(paragraph);
            for line in breaker.break_paragraph(paragraph, settings.font_size, &self.measurer) {
                let baseline_px = cursor_y + half_leading + metrics.ascent;
                let y_pt = (page.size.height - baseline_px) * PX_TO_PT;
                let x_pt = if rtl {
                    let line_width = self.measurer.text_width(&line, settings.font_size);
                    (page.size.width - page.side_margin - line_width) * PX_TO_PT
                } else {
                    page.side_margin * PX_TO_PT
                };
                canvas.draw_string(x_pt, y_pt, &line);
                cursor_y += line_height_px;
            }
        }

        pdf.stream(content_id, &canvas.finish());
        Ok(pdf.finish())
    }
}

/// Build the promissory-note body paragraphs, with the amount spelled out
/// in Arabic words next to its numeric form.
pub fn note_paragraphs(note: &PromissoryNote) -> RenderResult<Vec<String>> {
    let amount_words = amount_to_words(note.amount, Locale::Arabic)?;
    let dots = "..................";

    Ok(vec![
        format!("سند لأمر رقم: {}", note.note_number),
        format!(
            "تاريخ الإنشاء: {} م، مكان الإنشاء: المدينة {}، المملكة العربية السعودية",
            note.creation_date,
            note.creation_place.as_deref().unwrap_or(dots)
        ),
        format!(
            "أتعهد أنا الموقع أدناه بأن أدفع بموجب هذا السند بدون قيد أو شرط لأمر / {} سجل تجاري رقم: {} مبلغ وقدره: {} ريال لا غير ({} ريال)",
            note.beneficiary_name,
            note.beneficiary_commercial_number.as_deref().unwrap_or(dots),
            format_amount(note.amount),
            amount_words
        ),
        format!(
            "تاريخ الاستحقاق: {} هذا السند واجب الدفع بدون تعلل بموجب قرار مجلس الوزراء الموقر رقم 692 وتاريخ 26/09/1383 هـ والمتوج بالمرسوم الملكي رقم 37 بتاريخ 11/10/1383 هـ من نظام الأوراق التجارية.",
            note.due_date.as_deref().unwrap_or("لدى الاطلاع")
        ),
        "* بموجب هذا السند يسقط المدين كافة حقوق التقديم والمطالبة والاحتجاج والإخطار بالامتناع عن الوفاء والمتعلقة بهذا السند.".to_string(),
        format!(
            "اسم المحرر: {} رقم الهوية: {}",
            note.debtor_name, note.debtor_id_number
        ),
        format!(
            "العنوان: {}",
            note.debtor_address.as_deref().unwrap_or(dots)
        ),
    ])
}

/// Format an amount numerically with thousands separators and two decimals
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let int_part = cents / 100;
    let frac_part = cents % 100;

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, frac_part)
}

// First strong character decides paragraph direction
fn is_rtl(text: &str) -> bool {
    for ch in text.chars() {
        let cp = ch as u32;
        if (0x0600..=0x06FF).contains(&cp) || (0x0750..=0x077F).contains(&cp) {
            return true;
        }
        if ch.is_ascii_alphabetic() {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_note() -> PromissoryNote {
        PromissoryNote {
            note_number: "PN-042".to_string(),
            debtor_name: "محمد أحمد".to_string(),
            debtor_id_number: "1234567890".to_string(),
            debtor_address: None,
            amount: 5325.0,
            creation_date: "2024-05-01".to_string(),
            due_date: None,
            creation_place: Some("الرياض".to_string()),
            beneficiary_name: "شركة الاختبار".to_string(),
            beneficiary_commercial_number: Some("7001234567".to_string()),
        }
    }

    #[test]
    fn test_note_paragraphs_spell_amount() {
        let paragraphs = note_paragraphs(&sample_note()).unwrap();
        let body = &paragraphs[2];
        assert!(body.contains("5,325.00"));
        assert!(body.contains("خمسة آلاف وثلاثمائة وخمسة وعشرون"));
        assert!(body.contains("ريال لا غير"));
    }

    #[test]
    fn test_note_due_date_fallback() {
        let paragraphs = note_paragraphs(&sample_note()).unwrap();
        assert!(paragraphs[3].contains("لدى الاطلاع"));
    }

    #[test]
    fn test_note_invalid_amount_is_loud() {
        let mut note = sample_note();
        note.amount = -10.0;
        assert!(note_paragraphs(&note).is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(5325.0), "5,325.00");
        assert_eq!(format_amount(1234567.5), "1,234,567.50");
        assert_eq!(format_amount(0.0), "0.00");
    }

    #[test]
    fn test_render_letter_produces_pdf() {
        let renderer = LetterRenderer::new(PageTemplate::default()).unwrap();
        let pdf = renderer
            .render_letter("<p>Dear Sir,</p><p>This letter confirms the agreed amount.</p>")
            .unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_letter_json_requires_content() {
        let renderer = LetterRenderer::new(PageTemplate::default()).unwrap();
        assert!(renderer.render_letter_json(&json!({})).is_err());
        let pdf = renderer
            .render_letter_json(&json!({
                "content": "<p>body text</p>",
                "top_margin": 200.0,
                "bottom_margin": 120.0
            }))
            .unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_note_produces_pdf() {
        let renderer = LetterRenderer::new(PageTemplate::default()).unwrap();
        let pdf = renderer.render_promissory_note(&sample_note()).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_rtl_detection() {
        assert!(is_rtl("أتعهد أنا الموقع"));
        assert!(!is_rtl("Dear Sir"));
        assert!(!is_rtl("* 123"));
    }
}
