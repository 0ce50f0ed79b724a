//! SVG line chart for time or categorical series.
//!
//! Points are spaced evenly along the x axis in the order given; the value
//! scale runs from 0 to the series maximum.

use leptos::prelude::*;

use super::ChartPoint;

const VIEW_WIDTH: f64 = 640.0;
const VIEW_HEIGHT: f64 = 240.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 8.0;
const MARGIN_TOP: f64 = 8.0;
const MARGIN_BOTTOM: f64 = 24.0;

const PLOT_WIDTH: f64 = VIEW_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
const PLOT_HEIGHT: f64 = VIEW_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

fn max_y(points: &[ChartPoint]) -> f64 {
    let max = points.iter().fold(0.0_f64, |acc, p| acc.max(p.y));
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

/// Plot-space vertex coordinates for the polyline
pub fn line_vertices(points: &[ChartPoint], plot_width: f64, plot_height: f64) -> Vec<(f64, f64)> {
    if points.is_empty() {
        return Vec::new();
    }

    let max = max_y(points);
    let step = if points.len() > 1 {
        plot_width / (points.len() - 1) as f64
    } else {
        0.0
    };
    // A single point sits in the middle of the plot
    let offset = if points.len() > 1 { 0.0 } else { plot_width / 2.0 };

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = offset + i as f64 * step;
            let y = plot_height - (point.y.max(0.0) / max) * plot_height;
            (x, y)
        })
        .collect()
}

#[component]
pub fn LineChart(
    /// Series to draw, already in x order
    #[prop(into)]
    points: Signal<Vec<ChartPoint>>,
    /// Stroke color
    #[prop(default = "#04f")]
    color: &'static str,
) -> impl IntoView {
    let view_box = format!("0 0 {} {}", VIEW_WIDTH, VIEW_HEIGHT);

    let polyline = move || {
        let pts = points.get();
        let vertices = line_vertices(&pts, PLOT_WIDTH, PLOT_HEIGHT);
        if vertices.is_empty() {
            return None;
        }
        let path: String = vertices
            .iter()
            .map(|(x, y)| format!("{:.2},{:.2}", MARGIN_LEFT + x, MARGIN_TOP + y))
            .collect::<Vec<_>>()
            .join(" ");
        Some(view! {
            <polyline
                points=path
                fill="none"
                stroke=color
                stroke-width="2"
            />
        })
    };

    let edge_labels = move || {
        let pts = points.get();
        let first = pts.first().map(|p| p.x.clone())?;
        let last = pts.last().map(|p| p.x.clone())?;
        Some(view! {
            <text
                class="chart__label"
                x=format!("{:.2}", MARGIN_LEFT)
                y=format!("{:.2}", VIEW_HEIGHT - 6.0)
                text-anchor="start"
            >
                {first}
            </text>
            <text
                class="chart__label"
                x=format!("{:.2}", MARGIN_LEFT + PLOT_WIDTH)
                y=format!("{:.2}", VIEW_HEIGHT - 6.0)
                text-anchor="end"
            >
                {last}
            </text>
        })
    };

    let scale_label = move || {
        let pts = points.get();
        if pts.is_empty() {
            return None;
        }
        Some(view! {
            <text
                class="chart__label"
                x=format!("{:.2}", MARGIN_LEFT - 4.0)
                y=format!("{:.2}", MARGIN_TOP + 10.0)
                text-anchor="end"
            >
                {format!("{:.0}", max_y(&pts))}
            </text>
        })
    };

    view! {
        <div class="chart chart--line">
            <svg viewBox=view_box>
                <line
                    class="chart__axis"
                    x1=format!("{:.2}", MARGIN_LEFT)
                    y1=format!("{:.2}", MARGIN_TOP)
                    x2=format!("{:.2}", MARGIN_LEFT)
                    y2=format!("{:.2}", MARGIN_TOP + PLOT_HEIGHT)
                />
                <line
                    class="chart__axis"
                    x1=format!("{:.2}", MARGIN_LEFT)
                    y1=format!("{:.2}", MARGIN_TOP + PLOT_HEIGHT)
                    x2=format!("{:.2}", MARGIN_LEFT + PLOT_WIDTH)
                    y2=format!("{:.2}", MARGIN_TOP + PLOT_HEIGHT)
                />
                {polyline}
                {edge_labels}
                {scale_label}
            </svg>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: &str, y: f64) -> ChartPoint {
        ChartPoint::new(x, y)
    }

    #[test]
    fn test_vertices_spread_evenly() {
        let points = vec![point("2015-01", 10.0), point("2015-02", 20.0), point("2015-03", 5.0)];
        let vertices = line_vertices(&points, 200.0, 100.0);

        assert_eq!(vertices.len(), 3);
        assert!((vertices[0].0 - 0.0).abs() < 1e-9);
        assert!((vertices[1].0 - 100.0).abs() < 1e-9);
        assert!((vertices[2].0 - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_scale_runs_to_series_max() {
        let points = vec![point("a", 10.0), point("b", 20.0)];
        let vertices = line_vertices(&points, 200.0, 100.0);

        // 20 is the max: touches the top; 10 sits halfway
        assert!((vertices[1].1 - 0.0).abs() < 1e-9);
        assert!((vertices[0].1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_centers() {
        let points = vec![point("only", 5.0)];
        let vertices = line_vertices(&points, 200.0, 100.0);
        assert_eq!(vertices.len(), 1);
        assert!((vertices[0].0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_series() {
        assert!(line_vertices(&[], 200.0, 100.0).is_empty());
    }
}
