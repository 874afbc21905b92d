//! Presentation text for the result and error panels, shared by the terminal
//! form and the headless runner.

use crate::error::ClientError;
use crate::submission::View;
use crate::types::PredictionResult;

pub const FRAUD_HEADLINE: &str = "FRAUD DETECTED";
pub const LEGIT_HEADLINE: &str = "LEGITIMATE TRANSACTION";

/// Probability in [0, 1] as a percentage with two decimals, e.g. `87.00%`.
pub fn format_percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Everything the result panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub fraud: bool,
    pub headline: &'static str,
    pub label: String,
    pub fraud_percent: String,
    pub not_fraud_percent: String,
    /// Server-side note carried alongside a successful prediction.
    pub note: Option<String>,
}

impl From<&PredictionResult> for ResultSummary {
    fn from(r: &PredictionResult) -> Self {
        Self {
            fraud: r.fraud,
            headline: if r.fraud { FRAUD_HEADLINE } else { LEGIT_HEADLINE },
            label: r.prediction_label.clone(),
            fraud_percent: format_percent(r.probability_fraud),
            not_fraud_percent: format_percent(r.probability_not_fraud),
            note: r.error.clone().filter(|n| !n.is_empty()),
        }
    }
}

impl ResultSummary {
    /// (label, value) rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Prediction", self.label.clone()),
            ("Fraud probability", self.fraud_percent.clone()),
            ("Not-fraud probability", self.not_fraud_percent.clone()),
        ];
        if let Some(note) = &self.note {
            rows.push(("Note", note.clone()));
        }
        rows
    }
}

/// Plain-text rendering of whichever panel is active; `None` when only the
/// form is shown.
pub fn render_text(view: View<'_>) -> Option<String> {
    match view {
        View::Form => None,
        View::Error(e) => Some(render_error(e)),
        View::Result(r) => {
            let summary = ResultSummary::from(r);
            let mut out = format!("{}\n", summary.headline);
            for (label, value) in summary.rows() {
                out.push_str(&format!("  {:<22}{}\n", label, value));
            }
            Some(out)
        }
    }
}

fn render_error(e: &ClientError) -> String {
    match e {
        ClientError::Validation { fields } => {
            let names: Vec<&str> = fields.iter().map(|f| f.label()).collect();
            format!("Error: {}\n  Check: {}\n", e, names.join(", "))
        }
        _ => format!("Error: {}\n", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;

    fn result(fraud: bool, p: f64) -> PredictionResult {
        PredictionResult {
            fraud,
            prediction_label: if fraud { "Fraud Detected" } else { "Not Fraud" }.into(),
            probability_fraud: p,
            probability_not_fraud: 1.0 - p,
            error: None,
        }
    }

    #[test]
    fn percentages_use_two_decimals() {
        assert_eq!(format_percent(0.87), "87.00%");
        assert_eq!(format_percent(0.13), "13.00%");
        assert_eq!(format_percent(1.0), "100.00%");
        assert_eq!(format_percent(0.0), "0.00%");
    }

    #[test]
    fn fraud_result_summary() {
        let r = PredictionResult {
            fraud: true,
            prediction_label: "Fraud Detected".into(),
            probability_fraud: 0.87,
            probability_not_fraud: 0.13,
            error: None,
        };
        let s = ResultSummary::from(&r);
        assert_eq!(s.headline, FRAUD_HEADLINE);
        assert_eq!(s.label, "Fraud Detected");
        assert_eq!(s.fraud_percent, "87.00%");
        assert_eq!(s.not_fraud_percent, "13.00%");

        let text = render_text(View::Result(&r)).unwrap();
        assert!(text.starts_with(FRAUD_HEADLINE));
        assert!(text.contains("87.00%"));
        assert!(text.contains("13.00%"));
    }

    #[test]
    fn legit_result_uses_legit_headline() {
        let s = ResultSummary::from(&result(false, 0.1));
        assert_eq!(s.headline, LEGIT_HEADLINE);
        assert_eq!(s.rows().len(), 3);
    }

    #[test]
    fn server_note_adds_a_row() {
        let mut r = result(false, 0.4);
        r.error = Some("model fallback used".into());
        let rows = ResultSummary::from(&r).rows();
        assert_eq!(rows.last().unwrap(), &("Note", "model fallback used".to_string()));
    }

    #[test]
    fn form_only_renders_nothing() {
        assert!(render_text(View::Form).is_none());
    }

    #[test]
    fn validation_error_names_fields() {
        let e = ClientError::Validation {
            fields: vec![FormField::AmountPaid],
        };
        let text = render_text(View::Error(&e)).unwrap();
        assert!(text.contains("Numeric values cannot be negative"));
        assert!(text.contains("Amount Paid"));
    }
}
