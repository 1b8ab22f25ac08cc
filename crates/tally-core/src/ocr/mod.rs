//! OCR collaborator interface.
//!
//! Invoice extraction only needs a transcript; the engine that produces it is
//! injected through [`OcrEngine`]. The `native` feature adds an ONNX-backed
//! engine.

#[cfg(feature = "native")]
mod onnx_engine;

#[cfg(feature = "native")]
pub use onnx_engine::OnnxOcrEngine;

use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Trait for OCR engines.
pub trait OcrEngine {
    /// Recognize the text of an encoded image.
    ///
    /// `languages` are hints such as `"kor"` or `"eng"`; engines that are
    /// bound to a single model may ignore them.
    fn recognize(&self, image: &[u8], languages: &[String]) -> Result<String, OcrError>;
}

impl<T: OcrEngine + ?Sized> OcrEngine for &T {
    fn recognize(&self, image: &[u8], languages: &[String]) -> Result<String, OcrError> {
        (**self).recognize(image, languages)
    }
}

/// An engine that returns a transcript recognized ahead of time.
///
/// Used when OCR ran elsewhere and only its text was kept.
#[derive(Debug, Clone, Default)]
pub struct PrerecognizedText {
    text: String,
}

impl PrerecognizedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrEngine for PrerecognizedText {
    fn recognize(&self, _image: &[u8], _languages: &[String]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// A recognized text box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Axis-aligned bounds (min_x, min_y, max_x, max_y).
    pub rect: (f32, f32, f32, f32),

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

/// Sort boxes top-to-bottom, left-to-right and join them into a transcript.
///
/// Boxes whose tops fall into the same 20px band form one line, joined with
/// spaces, so a table row reads as a single line.
pub fn join_reading_order(mut boxes: Vec<TextBox>) -> String {
    let band = |b: &TextBox| (b.rect.1 / 20.0) as i32;

    boxes.sort_by(|a, b| {
        band(a)
            .cmp(&band(b))
            .then(a.rect.0.partial_cmp(&b.rect.0).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<String> = Vec::new();
    let mut current_band = None;

    for text_box in &boxes {
        let row = band(text_box);
        if current_band == Some(row) {
            if let Some(line) = lines.last_mut() {
                line.push(' ');
                line.push_str(&text_box.text);
                continue;
            }
        }
        lines.push(text_box.text.clone());
        current_band = Some(row);
    }

    lines.join("\n")
}
