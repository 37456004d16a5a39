//! Chart and page rendering for shooting summaries.
//!
//! Bars are drawn with [`plotters`] into an in-memory SVG string, which is
//! then embedded in a single HTML document. All captions come from
//! [`ChartSpec`] and [`PageSpec`] so the pipeline stays free of text.

use plotters::prelude::*;
use thiserror::Error;

use crate::analyzers::types::SummaryRow;

/// Errors that can occur while drawing the chart.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),
}

type Result<T> = core::result::Result<T, RenderError>;

/// Text and size of the bar chart.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            title: "Michael Jordan's Average FG% by Game Difficulty".to_string(),
            x_label: "Game Difficulty (Point Differential)".to_string(),
            y_label: "Average Field Goal Percentage".to_string(),
            width: 900,
            height: 500,
        }
    }
}

/// Headings and caption around the chart.
#[derive(Debug, Clone)]
pub struct PageSpec {
    pub heading: String,
    pub description: String,
    pub subheading: String,
    pub chart: ChartSpec,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            heading: "Michael Jordan's Field Goal Percentage by Game Difficulty".to_string(),
            description: "This app shows how Michael Jordan's field goal percentage varied \
                          based on the difficulty of the game."
                .to_string(),
            subheading: "Average Field Goal Percentage by Game Difficulty".to_string(),
            chart: ChartSpec::default(),
        }
    }
}

/// Draws the summary as a vertical bar chart and returns the SVG markup.
///
/// Categories keep the order of `rows`, which the pipeline emits in axis
/// order. The value axis is fixed to 0-100%.
pub fn render_bar_chart(rows: &[SummaryRow], spec: &ChartSpec) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (spec.width, spec.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| RenderError::DrawingArea(e.to_string()))?;

        let slots = rows.len().max(1) as u32;
        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d((0u32..slots).into_segmented(), 0f64..1f64)
            .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

        let x_formatter = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => rows
                .get(*i as usize)
                .map(|r| r.bucket.label().to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };
        let y_formatter = |v: &f64| format!("{:.0}%", v * 100.0);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(rows.len().max(1))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .draw()
            .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

        chart
            .draw_series(rows.iter().enumerate().map(|(i, row)| {
                let i = i as u32;
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0.0),
                        (SegmentValue::Exact(i + 1), row.mean_shooting_pct),
                    ],
                    BLUE.mix(0.7).filled(),
                );
                bar.set_margin(0, 0, 8, 8);
                bar
            }))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        chart
            .draw_series(rows.iter().enumerate().map(|(i, row)| {
                Text::new(
                    format!("{:.1}%", row.mean_shooting_pct * 100.0),
                    (SegmentValue::CenterOf(i as u32), row.mean_shooting_pct + 0.02),
                    ("sans-serif", 14).into_font(),
                )
            }))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        root.present()
            .map_err(|e| RenderError::Drawing(e.to_string()))?;
    }
    Ok(svg)
}

/// Renders a complete HTML document with headings, caption and chart.
pub fn render_page(rows: &[SummaryRow], spec: &PageSpec) -> Result<String> {
    let chart = render_bar_chart(rows, &spec.chart)?;

    Ok(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n\
         <body>\n\
         <h1>{heading}</h1>\n\
         <p>{description}</p>\n\
         <h2>{subheading}</h2>\n\
         <div id=\"chart\">\n{chart}\n</div>\n\
         </body>\n\
         </html>\n",
        title = escape_html(&spec.heading),
        heading = escape_html(&spec.heading),
        description = escape_html(&spec.description),
        subheading = escape_html(&spec.subheading),
        chart = chart,
    ))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Bucket;

    fn sample_rows() -> Vec<SummaryRow> {
        vec![
            SummaryRow {
                bucket: Bucket::Loss,
                mean_shooting_pct: 0.4,
                games: 1,
            },
            SummaryRow {
                bucket: Bucket::CloseWin,
                mean_shooting_pct: 0.55,
                games: 2,
            },
        ]
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Jordan's <b>"), "Jordan&#39;s &lt;b&gt;");
        assert_eq!(escape_html("a & \"b\""), "a &amp; &quot;b&quot;");
    }

    #[test]
    fn test_bar_chart_is_svg_with_labels_in_order() {
        let svg = render_bar_chart(&sample_rows(), &ChartSpec::default()).unwrap();

        assert!(svg.contains("<svg"));
        let loss = svg.find("Loss").expect("Loss label");
        let close_win = svg.find("Close Win").expect("Close Win label");
        assert!(loss < close_win);
        assert!(svg.contains("55.0%"));
    }

    #[test]
    fn test_bar_chart_empty_rows() {
        let svg = render_bar_chart(&[], &ChartSpec::default()).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_page_contains_headings_and_chart() {
        let spec = PageSpec::default();
        let html = render_page(&sample_rows(), &spec).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Michael Jordan&#39;s Field Goal Percentage"));
        assert!(html.contains("<h2>Average Field Goal Percentage by Game Difficulty</h2>"));
        assert!(html.contains("<svg"));
    }
}
