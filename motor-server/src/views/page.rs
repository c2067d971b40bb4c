//! Form page rendering
//!
//! One page: sidebar of input controls, main panel with the echoed input
//! row, the verdict and explanatory text.

use motor_core::features::{ControlKind, CONTROLS};
use motor_core::{ObservationRecord, Prediction};

use super::escape;

pub const TITLE: &str = "Electric Motor Failure Prediction";

const INTRO: &str = "This application uses a machine learning model to predict possible \
failures in electric motors. Enter the motor's operating parameters in the sidebar to get a \
prediction.";

const FOOTER: &str = "The prediction is based on the operating data provided and on the \
trained machine learning model. For a more accurate prediction, enter real, up-to-date data \
from the motor.";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; display: flex; background: #f5f5f5; color: #262730; }
aside { width: 320px; min-height: 100vh; padding: 1.5em; background: #f0f2f6; box-sizing: border-box; }
main { flex: 1; padding: 2em 3em; }
label { display: block; font-size: 0.9em; margin-top: 1em; }
.control { display: flex; align-items: center; gap: 0.5em; }
.control input[type=range] { flex: 1; }
output { min-width: 4em; text-align: right; font-variant-numeric: tabular-nums; }
table { border-collapse: collapse; background: white; font-size: 0.85em; display: block; overflow-x: auto; }
th, td { border: 1px solid #ddd; padding: 0.4em 0.6em; text-align: right; }
.verdict { padding: 1em; border-radius: 6px; margin: 1em 0; }
.verdict.warning { background: #ffe3e3; color: #7d0000; }
.verdict.success { background: #ddf4e4; color: #0b5d1e; }
"#;

fn render_controls(record: &ObservationRecord, out: &mut String) {
    for control in CONTROLS.iter() {
        let value = record.get(control.field).unwrap_or(control.default);
        let field = control.field;
        let label = escape(control.label);

        let html = match control.kind {
            ControlKind::Slider => format!(
                r#"<label for="{field}">{label}</label>
<div class="control"><input type="range" id="{field}" name="{field}" min="{min}" max="{max}" step="{step}" value="{value}" oninput="this.nextElementSibling.value=this.value" onchange="this.form.submit()"><output>{value}</output></div>
"#,
                min = control.min,
                max = control.max,
                step = control.step,
            ),
            ControlKind::Integer => format!(
                r#"<label for="{field}">{label}</label>
<div class="control"><input type="number" id="{field}" name="{field}" min="{min}" step="1" value="{value}" onchange="this.form.submit()"></div>
"#,
                min = control.min,
            ),
        };
        out.push_str(&html);
    }
}

fn render_input_table(record: &ObservationRecord, out: &mut String) {
    let fields = record.fields();

    out.push_str("<table><thead><tr>");
    for (name, _) in &fields {
        out.push_str(&format!("<th>{}</th>", escape(name)));
    }
    out.push_str("</tr></thead><tbody><tr>");
    for (_, value) in &fields {
        out.push_str(&format!("<td>{value}</td>"));
    }
    out.push_str("</tr></tbody></table>\n");
}

/// Full form page for one observation and its prediction
pub fn render(record: &ObservationRecord, prediction: &Prediction) -> String {
    let mut controls = String::new();
    render_controls(record, &mut controls);

    let mut table = String::new();
    render_input_table(record, &mut table);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{TITLE}</title>
<style>{STYLE}</style>
</head>
<body>
<aside>
<h2>Input Data</h2>
<form method="get" action="/">
{controls}<noscript><button type="submit">Predict</button></noscript>
</form>
</aside>
<main>
<h1>{TITLE}</h1>
<p>{INTRO}</p>
<h3>Provided Input Data:</h3>
{table}<h3>Prediction Result:</h3>
<div class="verdict {style}" data-label="{label}">{message}</div>
<p>{FOOTER}</p>
</main>
</body>
</html>
"#,
        style = prediction.verdict.style(),
        label = prediction.label,
        message = escape(prediction.verdict.message()),
    )
}

/// Error page shown when no prediction can be produced
pub fn render_error(status: u16, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{TITLE} - Error</title>
<style>{STYLE}</style>
</head>
<body>
<main>
<h1>{TITLE}</h1>
<div class="verdict warning" data-status="{status}">Error {status}: {message}</div>
</main>
</body>
</html>
"#,
        message = escape(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use motor_core::{FeatureVector, Verdict};

    fn prediction(label: i64) -> Prediction {
        let record = ObservationRecord::default();
        Prediction {
            label,
            verdict: Verdict::from_label(label),
            features: FeatureVector::assemble(&record),
            inference_time_us: 3,
        }
    }

    #[test]
    fn test_render_warning() {
        let html = render(&ObservationRecord::default(), &prediction(1));

        assert!(html.contains(r#"class="verdict warning""#));
        assert!(html.contains("Possible failure detected"));
        assert!(!html.contains("operating normally"));
    }

    #[test]
    fn test_render_success() {
        let html = render(&ObservationRecord::default(), &prediction(0));

        assert!(html.contains(r#"class="verdict success""#));
        assert!(html.contains("operating normally"));
    }

    #[test]
    fn test_render_controls_and_echo() {
        let html = render(&ObservationRecord::default(), &prediction(0));

        assert_eq!(html.matches(r#"type="range""#).count(), 12);
        assert_eq!(html.matches(r#"type="number""#).count(), 1);
        assert!(html.contains(r#"name="motor_speed" min="0" max="4000" step="0.1" value="3200""#));
        assert!(html.contains(r#"name="timestamp" min="1" step="1" value="1633017601""#));
        assert!(html.contains("<th>pm_rate</th><th>timestamp</th>"));
        assert!(html.contains("<td>1633017601</td>"));
    }

    #[test]
    fn test_render_controls_in_table_order() {
        let mut html = String::new();
        render_controls(&ObservationRecord::default(), &mut html);
        assert_eq!(html.matches("<label for=").count(), CONTROLS.len());
        assert!(html.starts_with(r#"<label for="ambient">"#));

        let mut table = String::new();
        render_input_table(&ObservationRecord::default(), &mut table);
        assert!(table.starts_with("<table><thead><tr><th>ambient</th>"));
        assert!(table.ends_with("</tr></tbody></table>\n"));
    }

    #[test]
    fn test_render_error() {
        let html = render_error(500, "Model artifacts could not be loaded");
        assert!(html.contains("Error 500: Model artifacts could not be loaded"));
    }
}
