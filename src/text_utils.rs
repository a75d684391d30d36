//! HTML content normalization
//!
//! Letter bodies arrive as small HTML blobs produced by the template editor
//! (`<p>`, `<div>`, `<br>`, inline markup, a handful of entities). The
//! renderer works on plain paragraphs, so this module reduces that markup
//! subset to a paragraph list. It is deliberately not an HTML parser.

/// Split an HTML blob into plain-text paragraphs.
///
/// Paragraph-level closers (`</p>`, `</div>`) and `<br>` become paragraph
/// breaks, remaining tags are stripped, entities are decoded, and blank
/// paragraphs are dropped.
pub fn html_to_paragraphs(html: &str) -> Vec<String> {
    let text = strip_tags(html);
    text.split('\n')
        .map(|p| decode_entities(p.trim()))
        .filter(|p| !p.is_empty())
        .collect()
}

/// Strip HTML tags, turning paragraph-level breaks into newlines
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut chars = html.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '<' {
            out.push(ch);
            continue;
        }

        let mut tag = String::new();
        for t in chars.by_ref() {
            if t == '>' {
                break;
            }
            tag.push(t);
        }

        let name: String = tag
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let closing = tag.starts_with('/');

        if name == "br" || (closing && (name == "p" || name == "div")) {
            out.push('\n');
        }
    }
    out
}

/// Decode the entity subset the letter generator emits
pub fn decode_entities(text: &str) -> String {
    // &amp; must be decoded last so "&amp;lt;" stays "&lt;"
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
