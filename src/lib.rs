//! Letter renderer
//!
//! Rendering backend for generated business letters and promissory notes:
//! amount-in-words conversion (Arabic/English), auto-fit text layout for
//! fixed-size letterhead templates, and single-page PDF output using
//! pdf-writer.

pub mod autofit;
pub mod canvas;
mod error;
pub mod fonts;
pub mod image_utils;
pub mod json_helpers;
pub mod renderer;
pub mod text_layout;
pub mod text_utils;
pub mod types;
pub mod words;

pub use autofit::{fit_to_height, FitAxis, FitPlan, FitResult, FitSettings, FitStep};
pub use error::{RenderError, RenderResult};
pub use renderer::{format_amount, note_paragraphs, LetterRenderer};
pub use types::{PageTemplate, PromissoryNote};
pub use words::{amount_to_words, Locale};
