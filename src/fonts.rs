//! Font utilities for letter rendering
//!
//! Embeds a TrueType font as a Type0/CIDFontType2 structure (Identity-H,
//! CID = glyph id) with descriptor, per-glyph widths and a ToUnicode CMap,
//! and builds the unicode→glyph map used to encode text at draw time.
//! Arabic letter bodies need an embedded font; a WinAnsi Helvetica base
//! font serves as the fallback when none is supplied.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::rc::Rc;

use log::debug;
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Name, Pdf, Rect, Ref, Str};
use ttf_parser::Face;

use crate::error::{RenderError, RenderResult};

/// Unicode code point → glyph id, for Identity-H text encoding
pub type CidMap = HashMap<u32, u16>;

/// How text bytes are produced for a registered font
#[derive(Clone)]
pub enum TextEncoding {
    /// Single-byte WinAnsi, for the built-in base font
    WinAnsi,
    /// Two-byte glyph ids, for embedded Type0 fonts
    Identity(Rc<CidMap>),
}

const CMAP_NAME: Name = Name(b"Custom");
const SYSTEM_INFO: SystemInfo = SystemInfo {
    registry: Str(b"Adobe"),
    ordering: Str(b"Identity"),
    supplement: 0,
};

/// Load a TTF/OTF font from a file path and validate it
pub fn load_font_file(path: &str) -> RenderResult<Vec<u8>> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        return Err(RenderError::FontError(format!("Font file not found: {}", path)));
    }

    let mut file = File::open(path_obj)?;
    let mut font_data = Vec::new();
    file.read_to_end(&mut font_data)?;

    Face::parse(&font_data, 0)
        .map_err(|e| RenderError::FontError(format!("Invalid font file {}: {}", path, e)))?;

    Ok(font_data)
}

/// Register the built-in WinAnsi Helvetica base font
pub fn add_base_font(pdf: &mut Pdf, font_id: Ref) -> TextEncoding {
    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    TextEncoding::WinAnsi
}

/// Embed a TrueType font in the PDF as a Type0 font with Identity-H
/// encoding and return the encoding used to produce its text bytes.
///
/// `font_id` becomes the Type0 font object; descriptor, CIDFont, font file
/// and ToUnicode streams are allocated from `next_ref_id`.
pub fn add_truetype_font(
    pdf: &mut Pdf,
    font_data: &[u8],
    font_id: Ref,
    next_ref_id: &mut i32,
) -> RenderResult<TextEncoding> {
    let face = Face::parse(font_data, 0)
        .map_err(|e| RenderError::FontError(format!("Invalid font file: {}", e)))?;

    let units_per_em = face.units_per_em() as f32;
    // PDF font metrics are expressed in a 1000-unit em
    let scale = 1000.0 / units_per_em;

    let font_family = face
        .names()
        .into_iter()
        .find(|name| name.name_id == ttf_parser::name_id::FAMILY)
        .and_then(|name| name.to_string())
        .unwrap_or_else(|| format!("Font{}", font_id.get()));
    let base_font = font_family.replace(' ', "#20");

    let descriptor_id = Ref::new(*next_ref_id);
    *next_ref_id += 1;
    let cid_font_id = Ref::new(*next_ref_id);
    *next_ref_id += 1;
    let font_file_id = Ref::new(*next_ref_id);
    *next_ref_id += 1;
    let to_unicode_id = Ref::new(*next_ref_id);
    *next_ref_id += 1;

    // Unicode → glyph map from the font's cmap subtables; doubles as the
    // draw-time encoder and the ToUnicode source.
    let mut cid_map = CidMap::new();
    if let Some(cmap) = face.tables().cmap {
        for subtable in cmap.subtables {
            if !subtable.is_unicode() {
                continue;
            }
            subtable.codepoints(|cp| {
                if let Some(gid) = subtable.glyph_index(cp) {
                    cid_map.entry(cp).or_insert(gid.0);
                }
            });
        }
    }
    if cid_map.is_empty() {
        return Err(RenderError::FontError(format!(
            "Font '{}' has no usable unicode cmap",
            font_family
        )));
    }

    // Per-glyph advance widths, indexed by glyph id
    let glyph_count = face.number_of_glyphs();
    let mut widths = vec![0.0f32; glyph_count as usize];
    for gid in 0..glyph_count {
        if let Some(adv) = face.glyph_hor_advance(ttf_parser::GlyphId(gid)) {
            widths[gid as usize] = adv as f32 * scale;
        }
    }

    let bbox = face.global_bounding_box();
    let ascent = face.ascender() as f32 * scale;
    let descent = face.descender() as f32 * scale;
    let cap_height = face
        .capital_height()
        .map(|h| h as f32 * scale)
        .unwrap_or(ascent);

    pdf.type0_font(font_id)
        .base_font(Name(base_font.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_id)
        .to_unicode(to_unicode_id);

    pdf.cid_font(cid_font_id)
        .subtype(CidFontType::Type2)
        .base_font(Name(base_font.as_bytes()))
        .system_info(SYSTEM_INFO)
        .font_descriptor(descriptor_id)
        .default_width(0.0)
        .cid_to_gid_map_predefined(Name(b"Identity"))
        .widths()
        .consecutive(0, widths.iter().copied());

    pdf.font_descriptor(descriptor_id)
        .name(Name(base_font.as_bytes()))
        .flags(FontFlags::NON_SYMBOLIC)
        .bbox(Rect::new(
            bbox.x_min as f32 * scale,
            bbox.y_min as f32 * scale,
            bbox.x_max as f32 * scale,
            bbox.y_max as f32 * scale,
        ))
        .italic_angle(0.0)
        .ascent(ascent)
        .descent(descent)
        .cap_height(cap_height)
        .stem_v(80.0)
        .font_file2(font_file_id);

    pdf.stream(font_file_id, font_data)
        .pair(Name(b"Length1"), font_data.len() as i32);

    let mut cmap = UnicodeCmap::new(CMAP_NAME, SYSTEM_INFO);
    for (&cp, &gid) in &cid_map {
        if let Some(ch) = char::from_u32(cp) {
            cmap.pair(gid, ch);
        }
    }
    pdf.cmap(to_unicode_id, &cmap.finish());

    debug!(
        "embedded font '{}': {} glyphs, {} mapped code points",
        font_family,
        glyph_count,
        cid_map.len()
    );

    Ok(TextEncoding::Identity(Rc::new(cid_map)))
}

/// Encode text into the byte form a font's show operator expects
pub fn encode_text(encoding: &TextEncoding, text: &str) -> Vec<u8> {
    match encoding {
        TextEncoding::WinAnsi => unicode_to_winansi(text),
        TextEncoding::Identity(map) => {
            let mut bytes = Vec::with_capacity(text.len() * 2);
            for ch in text.chars() {
                // .notdef for anything outside the font's cmap
                let gid = map.get(&(ch as u32)).copied().unwrap_or(0);
                bytes.extend_from_slice(&gid.to_be_bytes());
            }
            bytes
        }
    }
}

/// Convert a Unicode string to WinAnsiEncoding bytes for the base font.
///
/// ASCII and Latin-1 map directly; the Windows-1252 specials in 0x80-0x9F
/// are handled explicitly; everything else becomes '?'.
pub fn unicode_to_winansi(text: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let byte = match ch {
            ch if (ch as u32) <= 0x7F => ch as u8,
            ch if (0xA0..=0xFF).contains(&(ch as u32)) => ch as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        };
        result.push(byte);
    }
    result
}
