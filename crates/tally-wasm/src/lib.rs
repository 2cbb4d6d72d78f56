//! WASM bindings for receipt text extraction.
//!
//! Results cross the boundary in the same shape as the core JSON:
//! `{ money: { value, currency, display }, date, category }`, with `null`
//! for undetected fields and `-1` for no category.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use tally_core::{ExtractionResult, Lexicon, ReceiptExtractor};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn text_of(input: &JsValue) -> Option<String> {
    input.as_string()
}

/// Extract amount, date and category from OCR text using the built-in
/// lexicon. Anything but a string yields the empty result.
#[wasm_bindgen]
pub fn extract(input: JsValue) -> Result<JsValue, JsValue> {
    let result = match text_of(&input) {
        Some(text) => ReceiptExtractor::builtin().extract(&text),
        None => ExtractionResult::empty(),
    };
    to_js(&result)
}

/// Names of the built-in categories, in index order.
#[wasm_bindgen]
pub fn category_names() -> js_sys::Array {
    Lexicon::builtin()
        .categories
        .iter()
        .map(|c| JsValue::from_str(&c.name))
        .collect()
}

/// Receipt scanner class for browser use.
#[wasm_bindgen]
pub struct ReceiptScanner {
    extractor: ReceiptExtractor,
}

#[wasm_bindgen]
impl ReceiptScanner {
    /// Create a scanner. Pass a lexicon object to replace the built-in one.
    #[wasm_bindgen(constructor)]
    pub fn new(lexicon: Option<JsValue>) -> Result<ReceiptScanner, JsValue> {
        let lexicon = match lexicon {
            Some(value) if !value.is_undefined() && !value.is_null() => {
                serde_wasm_bindgen::from_value::<Lexicon>(value)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            _ => Lexicon::builtin(),
        };

        let extractor =
            ReceiptExtractor::new(lexicon).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { extractor })
    }

    /// Extract fields from text. Anything but a string yields the empty result.
    #[wasm_bindgen]
    pub fn extract(&self, input: JsValue) -> Result<JsValue, JsValue> {
        let result = match text_of(&input) {
            Some(text) => self.extractor.extract(&text),
            None => ExtractionResult::empty(),
        };
        to_js(&result)
    }

    /// Extract fields from an array of recognised lines.
    #[wasm_bindgen]
    pub fn extract_lines(&self, lines: Vec<String>) -> Result<JsValue, JsValue> {
        to_js(&self.extractor.extract_lines(&lines))
    }

    /// Name of a category index, if it exists.
    #[wasm_bindgen]
    pub fn category_name(&self, index: i32) -> Option<String> {
        let index = usize::try_from(index).ok()?;
        self.extractor
            .lexicon()
            .category(index)
            .map(|c| c.name.clone())
    }

    /// Extract and split the total using the category's VAT rate.
    /// Returns `null` when no total, category, or rate is known.
    #[wasm_bindgen]
    pub fn estimate_vat(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.extractor.extract(text);

        #[derive(Serialize)]
        struct VatSplit {
            rate: f64,
            net: f64,
            vat: f64,
            gross: f64,
        }

        let split = self.extractor.estimate_vat(&result).map(|e| VatSplit {
            rate: to_f64(&e.rate),
            net: to_f64(&e.net),
            vat: to_f64(&e.vat),
            gross: to_f64(&e.gross),
        });
        to_js(&split)
    }
}

fn to_f64(value: &impl ToString) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}
