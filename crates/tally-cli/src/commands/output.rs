//! Rendering extraction results as JSON, CSV, or text.

use serde::Serialize;

use tally_core::{ExtractionResult, ReceiptExtractor, VatEstimate};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// One extraction result plus the lexicon details a reader needs.
pub struct Report<'a> {
    pub result: &'a ExtractionResult,
    pub category_name: Option<&'a str>,
    pub vat: Option<VatEstimate>,
}

#[derive(Serialize)]
struct AnnotatedResult<'a> {
    #[serde(flatten)]
    result: &'a ExtractionResult,
    category_name: Option<&'a str>,
    vat: Option<&'a VatEstimate>,
}

impl<'a> Report<'a> {
    pub fn new(extractor: &'a ReceiptExtractor, result: &'a ExtractionResult, show_vat: bool) -> Self {
        Self {
            result,
            category_name: extractor.category_of(result).map(|c| c.name.as_str()),
            vat: if show_vat {
                extractor.estimate_vat(result)
            } else {
                None
            },
        }
    }

    /// Render in the given format. JSON stays in the bare result shape
    /// unless VAT annotation was requested.
    pub fn render(&self, format: OutputFormat, pretty: bool, show_vat: bool) -> anyhow::Result<String> {
        match format {
            OutputFormat::Json if show_vat => to_json(
                &AnnotatedResult {
                    result: self.result,
                    category_name: self.category_name,
                    vat: self.vat.as_ref(),
                },
                pretty,
            ),
            OutputFormat::Json => to_json(self.result, pretty),
            OutputFormat::Csv => self.to_csv(show_vat),
            OutputFormat::Text => Ok(self.to_text()),
        }
    }

    fn to_csv(&self, show_vat: bool) -> anyhow::Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        let mut header = vec!["amount", "display", "date", "category", "category_name"];
        if show_vat {
            header.extend(["vat_rate", "net", "vat"]);
        }
        wtr.write_record(&header)?;

        let mut record = vec![
            self.result.money.value.map(|v| v.to_string()).unwrap_or_default(),
            self.result.money.display.clone().unwrap_or_default(),
            self.result.date_string().unwrap_or_default(),
            self.result.category_code().to_string(),
            self.category_name.unwrap_or_default().to_string(),
        ];
        if show_vat {
            match &self.vat {
                Some(vat) => record.extend([vat.rate.to_string(), vat.net.to_string(), vat.vat.to_string()]),
                None => record.extend([String::new(), String::new(), String::new()]),
            }
        }
        wtr.write_record(&record)?;

        let data = String::from_utf8(wtr.into_inner()?)?;
        Ok(data)
    }

    fn to_text(&self) -> String {
        let mut output = String::new();

        match (&self.result.money.display, self.result.money.value) {
            (Some(display), _) => output.push_str(&format!("Amount:   {}\n", display)),
            (None, Some(value)) => output.push_str(&format!("Amount:   {}\n", value)),
            (None, None) => output.push_str("Amount:   not detected\n"),
        }

        let date = self.result.date_string();
        output.push_str(&format!(
            "Date:     {}\n",
            date.as_deref().unwrap_or("not detected")
        ));

        output.push_str(&format!(
            "Category: {}\n",
            self.category_name.unwrap_or("not detected")
        ));

        if let Some(vat) = &self.vat {
            output.push_str(&format!("\nVAT @ {}%:\n", vat.rate));
            output.push_str(&format!("  Net:   {}\n", vat.net));
            output.push_str(&format!("  VAT:   {}\n", vat.vat));
            output.push_str(&format!("  Gross: {}\n", vat.gross));
        }

        output
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> anyhow::Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::Money;

    fn fuel_result() -> ExtractionResult {
        ExtractionResult {
            money: Money::new(60.0, "£60.00"),
            date: NaiveDate::from_ymd_opt(2024, 4, 12),
            category: Some(0),
        }
    }

    #[test]
    fn test_json_keeps_result_shape() {
        let extractor = ReceiptExtractor::builtin();
        let result = fuel_result();
        let report = Report::new(&extractor, &result, false);

        let json: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json, false, false).unwrap()).unwrap();
        assert_eq!(json["money"]["value"], 60.0);
        assert_eq!(json["date"], "2024-04-12");
        assert_eq!(json["category"], 0);
        assert!(json.get("vat").is_none());
    }

    #[test]
    fn test_json_with_vat() {
        let extractor = ReceiptExtractor::builtin();
        let result = fuel_result();
        let report = Report::new(&extractor, &result, true);

        let json: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json, true, true).unwrap()).unwrap();
        assert_eq!(json["category_name"], "Fuel");
        assert_eq!(json["money"]["display"], "£60.00");
        assert!(json["vat"].is_object());
    }

    #[test]
    fn test_csv_for_empty_result() {
        let extractor = ReceiptExtractor::builtin();
        let result = ExtractionResult::empty();
        let csv = Report::new(&extractor, &result, false)
            .render(OutputFormat::Csv, false, false)
            .unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("amount,display,date,category,category_name"));
        assert_eq!(lines.next(), Some(",,,-1,"));
    }

    #[test]
    fn test_text_summary() {
        let extractor = ReceiptExtractor::builtin();
        let result = fuel_result();
        let text = Report::new(&extractor, &result, true).to_text();

        assert!(text.contains("Amount:   £60.00"));
        assert!(text.contains("Date:     2024-04-12"));
        assert!(text.contains("Category: Fuel"));
        assert!(text.contains("Net:   50"));
    }
}
