//! Server-side rendering of the classifier page
//!
//! One page: sidebar with model context, the input form and, after a
//! submission, the result block (or an inline error).

use std::fmt::Write;
use wqc_common::artifacts::ModelMetadata;
use wqc_common::inputs::{spec_for, InputSpec, WINE_TYPE_CHOICES};
use wqc_common::predict::{BAD_BELOW, GOOD_FROM};
use wqc_common::{FeatureName, Prediction, QualityClass, RawInputs};

/// Result of a form submission
#[derive(Debug, Clone)]
pub enum Outcome {
    Success(Prediction),
    Failure(String),
}

/// Form columns: caption and the inputs shown under it
const COLUMNS: [(&str, &[FeatureName]); 3] = [
    (
        "Acidity and Chlorides",
        &[
            FeatureName::FixedAcidity,
            FeatureName::VolatileAcidity,
            FeatureName::CitricAcid,
            FeatureName::Chlorides,
        ],
    ),
    (
        "Sugars and Dioxides",
        &[
            FeatureName::ResidualSugar,
            FeatureName::FreeSulfurDioxide,
            FeatureName::TotalSulfurDioxide,
            FeatureName::Density,
        ],
    ),
    (
        "Final Composition",
        &[
            FeatureName::Ph,
            FeatureName::Sulphates,
            FeatureName::Alcohol,
        ],
    ),
];

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; display: flex; color: #262730; }
aside { width: 300px; min-height: 100vh; background: #f0f2f6; padding: 24px; box-sizing: border-box; }
main { flex: 1; padding: 24px 48px; }
.columns { display: flex; gap: 32px; }
.column { flex: 1; }
.caption { color: #808495; font-size: 0.9em; }
label { display: block; margin-top: 12px; }
input[type=range] { width: 100%; }
output { font-weight: bold; }
button { margin-top: 16px; padding: 8px 16px; background: #ff4b4b; color: white; border: none; border-radius: 6px; cursor: pointer; }
.verdict { padding: 12px 16px; border-radius: 6px; margin: 12px 0; }
.verdict.bad { background: #ffe3e3; }
.verdict.regular { background: #fff6d6; }
.verdict.good { background: #dff5e3; }
.summary { padding: 20px; border-radius: 10px; text-align: center; color: white; box-shadow: 0 4px 8px 0 rgba(0,0,0,0.2); }
.summary h1 { color: white; margin: 0; }
.summary p { margin: 0; }
.error { background: #ffe3e3; color: #7d1f1f; padding: 12px 16px; border-radius: 6px; }
"#;

/// Escape text for HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn css_class(class: QualityClass) -> &'static str {
    match class {
        QualityClass::Bad => "bad",
        QualityClass::Regular => "regular",
        QualityClass::Good => "good",
    }
}

fn sidebar(metadata: Option<&ModelMetadata>) -> String {
    let mut html = String::new();
    html.push_str("<aside>\n<h2>Project Context</h2>\n");
    html.push_str(
        "<p>Predicts the quality of a wine sample (white or red) from its \
         physico-chemical composition.</p>\n",
    );

    html.push_str("<h3>Model</h3>\n");
    match metadata {
        Some(meta) => {
            let _ = writeln!(html, "<p><strong>{}</strong></p>", escape_html(&meta.name));
            html.push_str("<ul>\n");
            if let Some(target) = &meta.target {
                let _ = writeln!(html, "<li>Target: {}</li>", escape_html(target));
            }
            if let Some(accuracy) = meta.accuracy {
                let _ = writeln!(html, "<li>Accuracy: {:.0}%</li>", accuracy * 100.0);
            }
            if let Some(f1) = meta.f1_weighted {
                let _ = writeln!(html, "<li>Weighted F1: {:.2}</li>", f1);
            }
            html.push_str("</ul>\n");
        }
        None => html.push_str("<p>No model description available.</p>\n"),
    }

    html.push_str("<h3>Class Definitions</h3>\n<ul>\n");
    for class in QualityClass::ALL.iter().rev() {
        let _ = writeln!(
            html,
            "<li><strong>{}:</strong> {}</li>",
            class.label(),
            class.description()
        );
    }
    html.push_str("</ul>\n</aside>\n");
    html
}

fn slider(spec: &InputSpec, value: f64) -> String {
    let shown = spec.format(value);
    format!(
        "<label for=\"{key}\">{label}</label>\n\
         <input type=\"range\" id=\"{key}\" name=\"{key}\" min=\"{min}\" max=\"{max}\" \
         step=\"{step}\" value=\"{shown}\" \
         oninput=\"this.nextElementSibling.value = Number(this.value).toFixed({decimals})\">\n\
         <output>{shown}</output>\n",
        key = spec.key,
        label = escape_html(&spec.display_label()),
        min = spec.min,
        max = spec.max,
        step = spec.step,
        shown = shown,
        decimals = spec.decimals,
    )
}

fn form(inputs: &RawInputs) -> String {
    let mut html = String::new();
    html.push_str("<form method=\"post\" action=\"/predict\">\n");
    html.push_str("<h3>Parameter Input</h3>\n<div class=\"columns\">\n");

    for (i, (caption, features)) in COLUMNS.iter().enumerate() {
        html.push_str("<div class=\"column\">\n");
        let _ = writeln!(html, "<div class=\"caption\">{}</div>", caption);
        for feature in features.iter() {
            if let Some(spec) = spec_for(*feature) {
                html.push_str(&slider(spec, inputs.value(*feature)));
            }
        }
        // Wine type sits under the last column
        if i == COLUMNS.len() - 1 {
            html.push_str("<fieldset>\n<legend>Wine Type</legend>\n");
            for choice in WINE_TYPE_CHOICES {
                let checked = if choice == inputs.wine_type { " checked" } else { "" };
                let _ = writeln!(
                    html,
                    "<label><input type=\"radio\" name=\"wine_type\" value=\"{0}\"{1}> {0}</label>",
                    choice.label(),
                    checked
                );
            }
            html.push_str("</fieldset>\n");
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n<hr>\n");
    html.push_str("<button type=\"submit\">Predict Wine Quality</button>\n</form>\n");
    html
}

/// Result block for one outcome
pub fn result_block(outcome: &Outcome) -> String {
    let mut html = String::new();
    html.push_str("<section id=\"result\">\n<h2 style=\"text-align: center;\">Prediction Result</h2>\n<hr>\n");

    match outcome {
        Outcome::Success(prediction) => {
            let class = prediction.class;
            let _ = writeln!(
                html,
                "<div class=\"verdict {}\">Classification: {} ({})</div>",
                css_class(class),
                class.label(),
                class.description()
            );
            let _ = writeln!(
                html,
                "<div class=\"summary\" style=\"background-color: {};\">\n\
                 <h1>{}</h1>\n<p>{}</p>\n</div>",
                class.color_hex(),
                class.stars(),
                class.message()
            );
            html.push_str("<hr>\n");
            let _ = writeln!(
                html,
                "<p><strong>Continuous prediction value:</strong> <code>{}</code> \
                 (Regular range: {:.2} to {:.2})</p>",
                prediction.score_display(),
                BAD_BELOW,
                GOOD_FROM - 0.01
            );
        }
        Outcome::Failure(message) => {
            let _ = writeln!(
                html,
                "<div class=\"error\">Prediction failed: {}</div>",
                escape_html(message)
            );
        }
    }

    html.push_str("</section>\n");
    html
}

/// Full page with the form pre-filled from `inputs`
pub fn page(inputs: &RawInputs, outcome: Option<&Outcome>, metadata: Option<&ModelMetadata>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Wine Quality Classifier</title>\n");
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n");

    html.push_str(&sidebar(metadata));

    html.push_str("<main>\n<h1>🍷 Wine Quality Classifier</h1>\n<hr>\n");
    html.push_str("<h2>Physico-Chemical Parameters</h2>\n");
    html.push_str(
        "<p>Enter the 11 measurements of the sample to predict its quality \
         (Bad, Regular, Good).</p>\n",
    );
    html.push_str(&form(inputs));

    if let Some(outcome) = outcome {
        html.push_str(&result_block(outcome));
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}
