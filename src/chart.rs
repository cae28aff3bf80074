//! Plotly figure construction and standalone HTML rendering.
//!
//! Figures are plain `serde_json::Value` documents in Plotly's
//! `{data, layout}` schema, so any Plotly front end can display them.

use serde_json::{json, Value};

use crate::error::Result;
use crate::series::{
    TimeSeries, ACTUAL, ACTUAL_CHANGE, INFECTED, PREDICTED, PREDICTED_CHANGE,
};

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
pub const TEMPLATE: &str = "plotly_dark";

/// Display range of the confirmed-cases axis.
pub const CONFIRMED_RANGE: [f64; 2] = [0.0, 6000.0];
/// Display range of the new-cases-per-day axis.
pub const NEW_CASES_RANGE: [f64; 2] = [0.0, 1000.0];

fn bar(x: &[String], y: &[f64], name: &str, secondary: bool) -> Value {
    let axis = if secondary { "y2" } else { "y" };
    json!({
        "type": "bar",
        "x": x,
        "y": y,
        "name": name,
        "opacity": 0.5,
        "yaxis": axis,
    })
}

fn line(x: &[String], y: &[f64], name: &str) -> Value {
    json!({
        "type": "scatter",
        "mode": "lines",
        "x": x,
        "y": y,
        "name": name,
        "yaxis": "y",
    })
}

fn markers(x: &[String], y: &[f64], name: &str, size: u32) -> Value {
    json!({
        "type": "scatter",
        "mode": "markers",
        "x": x,
        "y": y,
        "name": name,
        "marker": { "size": size },
        "yaxis": "y",
    })
}

/// Calibration chart: cumulative cases on the primary axis, daily changes
/// as bars on the secondary axis.
///
/// Adds the change columns if the series does not carry them yet.
pub fn calibration_figure(result: &TimeSeries, country: &str) -> Result<Value> {
    let series = if result.has_column(ACTUAL_CHANGE) && result.has_column(PREDICTED_CHANGE) {
        result.clone()
    } else {
        result.clone().with_calibration_changes()?
    };
    let days = series.labels();

    let data = vec![
        bar(
            &days,
            &series.column(PREDICTED_CHANGE)?,
            "Predicted Change",
            true,
        ),
        bar(&days, &series.column(ACTUAL_CHANGE)?, "Actual Change", true),
        line(&days, &series.column(PREDICTED)?, "Calibration"),
        markers(&days, &series.column(ACTUAL)?, "Actual", 8),
    ];

    Ok(json!({
        "data": data,
        "layout": {
            "title": { "text": format!("Prediction of confirmed cases for {}", country) },
            "template": TEMPLATE,
            "height": 900,
            "xaxis": { "title": { "text": "Date" } },
            "yaxis": {
                "title": { "text": "Total confirmed cases" },
                "range": CONFIRMED_RANGE,
            },
            "yaxis2": {
                "title": { "text": "New cases per day" },
                "range": NEW_CASES_RANGE,
                "overlaying": "y",
                "side": "right",
            },
        },
    }))
}

/// SIR against logistic forecast of the infected (`I`) column.
///
/// Uses the SIR series' dates for the x-axis.
pub fn infected_figure(sir: &TimeSeries, logistic: &TimeSeries, country: &str) -> Result<Value> {
    let days = sir.labels();
    let data = vec![
        line(&days, &sir.column(INFECTED)?, "SIR"),
        line(&days, &logistic.column(INFECTED)?, "Logistic"),
    ];

    Ok(json!({
        "data": data,
        "layout": {
            "title": { "text": format!("COVID19 infected prediction in {}", country) },
            "template": TEMPLATE,
            "height": 600,
        },
    }))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Self-contained dashboard page showing one figure under a heading.
pub fn render_html(heading: &str, figure: &Value) -> Result<String> {
    // `</` inside the inline script would end it early.
    let figure_json = serde_json::to_string(figure)?.replace("</", "<\\/");
    let heading = escape_html(heading);

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{heading}</title>
<script src="{cdn}"></script>
<style>body {{ background: #222; color: #fff; font-family: sans-serif; }}</style>
</head>
<body>
<div>
<h1>{heading}</h1>
<div id="example-graph"></div>
</div>
<script>
var figure = {figure_json};
Plotly.newPlot("example-graph", figure.data, figure.layout);
</script>
</body>
</html>
"#,
        heading = heading,
        cdn = PLOTLY_CDN,
        figure_json = figure_json,
    ))
}
