use anyhow::Context;
use crosswind_summary_model::{load_results, BenchmarkResults, SystemOutcome};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// The chart is never shorter than this many pixels.
pub const MIN_CHART_HEIGHT: usize = 800;

/// Pixels allowed per scenario row once there are enough scenarios to exceed [MIN_CHART_HEIGHT].
const SCENARIO_ROW_HEIGHT: usize = 30;

pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Render a stored results file as an interactive HTML bar chart.
///
/// The chart is written next to the results file, with the same name and an `.html` extension.
/// Returns the path of the written chart.
pub fn generate_chart(results_path: &Path) -> anyhow::Result<PathBuf> {
    let results = load_results(results_path)?;

    let stem = results_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = format!("API Benchmark Results ({stem})");

    let figure = build_figure(&results, &title);
    let html = render_html(&title, &figure)?;

    let chart_path = results_path.with_extension("html");
    std::fs::write(&chart_path, html)
        .with_context(|| format!("Failed to write chart to {}", chart_path.display()))?;
    log::info!(
        "Wrote chart for {} scenario(s) to {}",
        results.len(),
        chart_path.display()
    );

    Ok(chart_path)
}

/// Build a plotly figure with one horizontal bar trace per system, grouped by scenario.
///
/// Systems are ordered by name. A system without statistics in a scenario gets a zero-length bar
/// and its status as hover text.
pub fn build_figure(results: &BenchmarkResults, title: &str) -> Value {
    let scenarios = results.keys().collect::<Vec<_>>();
    let systems = results
        .values()
        .flat_map(|scenario| scenario.keys())
        .collect::<BTreeSet<_>>();

    let traces = systems
        .into_iter()
        .map(|system| {
            let (means, hover_texts): (Vec<f64>, Vec<String>) = results
                .values()
                .map(|scenario| bar(system, scenario.get(system)))
                .unzip();

            json!({
                "type": "bar",
                "orientation": "h",
                "name": system.to_uppercase(),
                "y": scenarios,
                "x": means,
                "hoverinfo": "text",
                "hovertext": hover_texts,
            })
        })
        .collect::<Vec<_>>();

    json!({
        "data": traces,
        "layout": {
            "title": {"text": title},
            "xaxis": {"title": {"text": "Mean Latency (Seconds)"}},
            "yaxis": {"title": {"text": "Scenario"}, "autorange": "reversed"},
            "barmode": "group",
            "height": MIN_CHART_HEIGHT.max(scenarios.len() * SCENARIO_ROW_HEIGHT),
            "margin": {"l": 10, "r": 10, "t": 40, "b": 20},
            "legend": {"x": 1, "y": 1},
        },
    })
}

fn bar(system: &str, outcome: Option<&SystemOutcome>) -> (f64, String) {
    let name = system.to_uppercase();
    match outcome {
        Some(SystemOutcome::Measured(stats)) => (
            stats.mean,
            format!(
                "<b>{name}</b><br>Mean: {:.4}s<br>P99:  {:.4}s<br>Min:  {:.4}s<br>Max:  {:.4}s",
                stats.mean, stats.p99, stats.min, stats.max
            ),
        ),
        Some(SystemOutcome::Skipped) => (0.0, format!("<b>{name}</b><br>Status: SKIPPED")),
        Some(SystemOutcome::Failed { error }) => {
            (0.0, format!("<b>{name}</b><br>Status: {error}"))
        }
        None => (0.0, format!("<b>{name}</b><br>Status: N/A")),
    }
}

fn render_html(title: &str, figure: &Value) -> anyhow::Result<String> {
    // Keep a `</script>` inside any label from ending the script block.
    let figure = serde_json::to_string(figure)
        .context("Failed to serialize chart")?
        .replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>{title}</title>
<script src="{PLOTLY_CDN_URL}" charset="utf-8"></script>
</head>
<body>
<div id="chart"></div>
<script>
const figure = {figure};
Plotly.newPlot("chart", figure.data, figure.layout, {{"responsive": true}});
</script>
</body>
</html>
"#,
        title = escape_html(title),
    ))
}

fn escape_html(text: &str) -> String {
    text.chars()
        .fold(String::with_capacity(text.len()), |mut escaped, c| {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                _ => escaped.push(c),
            }
            escaped
        })
}
