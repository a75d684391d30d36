//! Amount-in-words conversion for legal/financial documents
//!
//! Promissory notes and receipts render amounts both numerically and
//! spelled out. Only the integer portion of an amount is spoken; currency
//! suffixes are appended by callers.
//!
//! The Arabic path keeps the four-table band structure used by the note
//! templates (ones, tens, hundreds, thousands-words joined with "و"), which
//! caps it at four digits. The English path chunks into base-1000 groups
//! with scale words. Out-of-range and invalid amounts fail loudly instead
//! of producing a degraded string.

use crate::error::{RenderError, RenderResult};

/// Target locale for the spoken-word rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    Arabic,
    English,
}

const ARABIC_MAX: u64 = 9_999;
const ENGLISH_MAX: u64 = 999_999_999_999;

const ONES_AR: [&str; 10] = [
    "", "واحد", "اثنان", "ثلاثة", "أربعة", "خمسة", "ستة", "سبعة", "ثمانية", "تسعة",
];
const TENS_AR: [&str; 10] = [
    "", "عشرة", "عشرون", "ثلاثون", "أربعون", "خمسون", "ستون", "سبعون", "ثمانون", "تسعون",
];
const HUNDREDS_AR: [&str; 10] = [
    "", "مائة", "مائتان", "ثلاثمائة", "أربعمائة", "خمسمائة", "ستمائة", "سبعمائة",
    "ثمانمائة", "تسعمائة",
];
const THOUSANDS_AR: [&str; 10] = [
    "", "ألف", "ألفان", "ثلاثة آلاف", "أربعة آلاف", "خمسة آلاف", "ستة آلاف", "سبعة آلاف",
    "ثمانية آلاف", "تسعة آلاف",
];

const ONES_EN: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
    "Eighteen", "Nineteen",
];
const TENS_EN: [&str; 10] = [
    "", "Ten", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];
const SCALES_EN: [&str; 4] = ["", "Thousand", "Million", "Billion"];

/// Convert a non-negative amount into its spoken-word representation.
///
/// The fractional part is floored away. Negative, NaN or infinite input
/// returns `RenderError::InvalidAmount`; amounts beyond the locale's table
/// range return `RenderError::AmountOutOfRange`.
pub fn amount_to_words(amount: f64, locale: Locale) -> RenderResult<String> {
    if !amount.is_finite() {
        return Err(RenderError::InvalidAmount(format!(
            "amount must be finite, got {amount}"
        )));
    }
    if amount < 0.0 {
        return Err(RenderError::InvalidAmount(format!(
            "amount must be non-negative, got {amount}"
        )));
    }

    let value = amount.floor() as u64;
    match locale {
        Locale::Arabic => arabic_words(value),
        Locale::English => english_words(value),
    }
}

fn arabic_words(value: u64) -> RenderResult<String> {
    if value > ARABIC_MAX {
        return Err(RenderError::AmountOutOfRange {
            amount: value,
            max: ARABIC_MAX,
        });
    }
    // Zero keeps the template fallback: the amount line is left blank.
    if value == 0 {
        return Ok(String::new());
    }
    Ok(arabic_band(value))
}

// Recursive band decomposition over the four lookup tables.
fn arabic_band(value: u64) -> String {
    let n = value as usize;
    if n < 10 {
        return ONES_AR[n].to_string();
    }
    if n < 100 {
        let t = n / 10;
        let o = n % 10;
        if o == 0 {
            return TENS_AR[t].to_string();
        }
        return format!("{} و{}", ONES_AR[o], TENS_AR[t]);
    }
    if n < 1_000 {
        let h = n / 100;
        let r = n % 100;
        if r == 0 {
            return HUNDREDS_AR[h].to_string();
        }
        return format!("{} و{}", HUNDREDS_AR[h], arabic_band(r as u64));
    }
    let th = n / 1_000;
    let r = n % 1_000;
    if r == 0 {
        return THOUSANDS_AR[th].to_string();
    }
    format!("{} و{}", THOUSANDS_AR[th], arabic_band(r as u64))
}

fn english_words(value: u64) -> RenderResult<String> {
    if value > ENGLISH_MAX {
        return Err(RenderError::AmountOutOfRange {
            amount: value,
            max: ENGLISH_MAX,
        });
    }
    if value == 0 {
        return Ok("Zero".to_string());
    }

    // Chunk into base-1000 groups, least significant first.
    let mut chunks: Vec<u64> = Vec::new();
    let mut rest = value;
    while rest > 0 {
        chunks.push(rest % 1_000);
        rest /= 1_000;
    }

    let mut parts: Vec<String> = Vec::new();
    for (i, &chunk) in chunks.iter().enumerate().rev() {
        if chunk == 0 {
            continue;
        }
        let mut part = english_chunk(chunk);
        if !SCALES_EN[i].is_empty() {
            part.push(' ');
            part.push_str(SCALES_EN[i]);
        }
        parts.push(part);
    }

    Ok(parts.join(" "))
}

// Render a group in [1, 999].
fn english_chunk(chunk: u64) -> String {
    let n = chunk as usize;
    let mut words: Vec<&str> = Vec::new();

    let h = n / 100;
    let r = n % 100;
    if h > 0 {
        words.push(ONES_EN[h]);
        words.push("Hundred");
    }
    if r >= 20 {
        words.push(TENS_EN[r / 10]);
        if r % 10 > 0 {
            words.push(ONES_EN[r % 10]);
        }
    } else if r > 0 {
        words.push(ONES_EN[r]);
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_zero() {
        assert_eq!(amount_to_words(0.0, Locale::English).unwrap(), "Zero");
    }

    #[test]
    fn test_english_basic() {
        assert_eq!(amount_to_words(15.0, Locale::English).unwrap(), "Fifteen");
        assert_eq!(amount_to_words(100.0, Locale::English).unwrap(), "One Hundred");
        assert_eq!(
            amount_to_words(1234.0, Locale::English).unwrap(),
            "One Thousand Two Hundred Thirty Four"
        );
    }

    #[test]
    fn test_english_scales() {
        assert_eq!(
            amount_to_words(1_000_000.0, Locale::English).unwrap(),
            "One Million"
        );
        assert_eq!(
            amount_to_words(2_000_015.0, Locale::English).unwrap(),
            "Two Million Fifteen"
        );
        assert_eq!(
            amount_to_words(1_000_000_000.0, Locale::English).unwrap(),
            "One Billion"
        );
    }

    #[test]
    fn test_english_out_of_range() {
        assert!(matches!(
            amount_to_words(1.0e12, Locale::English),
            Err(RenderError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_arabic_basic() {
        assert_eq!(amount_to_words(3.0, Locale::Arabic).unwrap(), "ثلاثة");
        assert_eq!(amount_to_words(100.0, Locale::Arabic).unwrap(), "مائة");
        assert_eq!(amount_to_words(25.0, Locale::Arabic).unwrap(), "خمسة وعشرون");
        assert_eq!(amount_to_words(20.0, Locale::Arabic).unwrap(), "عشرون");
    }

    #[test]
    fn test_arabic_compound() {
        assert_eq!(
            amount_to_words(1500.0, Locale::Arabic).unwrap(),
            "ألف وخمسمائة"
        );
        assert_eq!(
            amount_to_words(5325.0, Locale::Arabic).unwrap(),
            "خمسة آلاف وثلاثمائة وخمسة وعشرون"
        );
        assert_eq!(
            amount_to_words(9999.0, Locale::Arabic).unwrap(),
            "تسعة آلاف وتسعمائة وتسعة وتسعون"
        );
    }

    #[test]
    fn test_arabic_zero_is_blank() {
        assert_eq!(amount_to_words(0.0, Locale::Arabic).unwrap(), "");
    }

    #[test]
    fn test_arabic_out_of_range() {
        assert!(matches!(
            amount_to_words(10_000.0, Locale::Arabic),
            Err(RenderError::AmountOutOfRange { max: 9_999, .. })
        ));
    }

    #[test]
    fn test_invalid_amounts() {
        assert!(matches!(
            amount_to_words(-1.0, Locale::English),
            Err(RenderError::InvalidAmount(_))
        ));
        assert!(matches!(
            amount_to_words(f64::NAN, Locale::Arabic),
            Err(RenderError::InvalidAmount(_))
        ));
        assert!(matches!(
            amount_to_words(f64::INFINITY, Locale::English),
            Err(RenderError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_fraction_is_floored() {
        assert_eq!(
            amount_to_words(1234.99, Locale::English).unwrap(),
            amount_to_words(1234.0, Locale::English).unwrap()
        );
    }

    #[test]
    fn test_idempotent() {
        let a = amount_to_words(5325.0, Locale::Arabic).unwrap();
        let b = amount_to_words(5325.0, Locale::Arabic).unwrap();
        assert_eq!(a, b);
    }
}
