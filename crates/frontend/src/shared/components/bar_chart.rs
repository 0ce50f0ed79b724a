//! SVG bar chart.
//!
//! The x axis is categorical: every distinct `x` value gets one slot in
//! first-appearance order. A slot holding exactly one point is drawn as a
//! solid bar; a slot holding several points (an ungrouped series) is drawn
//! as that many thin strips, so feeding raw per-record data produces lines
//! where a pre-aggregated series produces solid bars.

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

/// Fraction of a slot occupied by its marks
const SLOT_FILL: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Distinct x values in first-appearance order
fn slots(points: &[ChartPoint]) -> Vec<String> {
    let mut slots: Vec<String> = Vec::new();
    for point in points {
        if !slots.contains(&point.x) {
            slots.push(point.x.clone());
        }
    }
    slots
}

fn max_y(points: &[ChartPoint]) -> f64 {
    let max = points.iter().fold(0.0_f64, |acc, p| acc.max(p.y));
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

/// Plot-space rectangles for the given points.
///
/// Negative values clamp to zero height; the value scale runs from 0 to the
/// series maximum.
pub fn bar_layout(points: &[ChartPoint], plot_width: f64, plot_height: f64) -> Vec<BarRect> {
    let slot_names = slots(points);
    if slot_names.is_empty() {
        return Vec::new();
    }

    let slot_width = plot_width / slot_names.len() as f64;
    let max = max_y(points);

    let mut per_slot_total = vec![0usize; slot_names.len()];
    for point in points {
        let slot = slot_names.iter().position(|s| *s == point.x).unwrap();
        per_slot_total[slot] += 1;
    }

    let mut per_slot_seen = vec![0usize; slot_names.len()];
    let mut rects = Vec::with_capacity(points.len());

    for point in points {
        let slot = slot_names.iter().position(|s| *s == point.x).unwrap();
        let strips = per_slot_total[slot] as f64;
        let strip_index = per_slot_seen[slot] as f64;
        per_slot_seen[slot] += 1;

        let band = slot_width * SLOT_FILL;
        let width = band / strips;
        let slot_start = slot as f64 * slot_width + slot_width * (1.0 - SLOT_FILL) / 2.0;
        let height = (point.y.max(0.0) / max) * plot_height;

        rects.push(BarRect {
            x: slot_start + strip_index * width,
            y: plot_height - height,
            width,
            height,
        });
    }

    rects
}

/// Label and center x coordinate for every slot
pub fn slot_labels(points: &[ChartPoint], plot_width: f64) -> Vec<(String, f64)> {
    let slot_names = slots(points);
    if slot_names.is_empty() {
        return Vec::new();
    }
    let slot_width = plot_width / slot_names.len() as f64;
    slot_names
        .into_iter()
        .enumerate()
        .map(|(i, name)| (name, (i as f64 + 0.5) * slot_width))
        .collect()
}

#[component]
pub fn BarChart(
    /// Series to draw; duplicate x values stay separate marks
    #[prop(into)]
    points: Signal<Vec<ChartPoint>>,
    /// Bar fill color
    #[prop(default = "#04f")]
    color: &'static str,
) -> impl IntoView {
    let view_box = format!("0 0 {} {}", VIEW_WIDTH, VIEW_HEIGHT);

    let bars = move || {
        let pts = points.get();
        bar_layout(&pts, PLOT_WIDTH, PLOT_HEIGHT)
            .into_iter()
            .map(|rect| {
                view! {
                    <rect
                        x=format!("{:.2}", MARGIN_LEFT + rect.x)
                        y=format!("{:.2}", MARGIN_TOP + rect.y)
                        width=format!("{:.2}", rect.width)
                        height=format!("{:.2}", rect.height)
                        fill=color
                    />
                }
            })
            .collect_view()
    };

    let labels = move || {
        let pts = points.get();
        slot_labels(&pts, PLOT_WIDTH)
            .into_iter()
            .map(|(name, center)| {
                view! {
                    <text
                        class="chart__label"
                        x=format!("{:.2}", MARGIN_LEFT + center)
                        y=format!("{:.2}", VIEW_HEIGHT - 6.0)
                        text-anchor="middle"
                    >
                        {name}
                    </text>
                }
            })
            .collect_view()
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
        <div class="chart chart--bar">
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
                {bars}
                {labels}
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
    fn test_unique_keys_give_solid_bars() {
        let points = vec![point("A", 10.0), point("B", 20.0)];
        let rects = bar_layout(&points, 200.0, 100.0);

        assert_eq!(rects.len(), 2);
        // Each slot is 100 wide, the bar takes 80% of it
        assert!((rects[0].width - 80.0).abs() < 1e-9);
        assert!((rects[1].width - 80.0).abs() < 1e-9);
        // The series maximum spans the full plot height
        assert!((rects[1].height - 100.0).abs() < 1e-9);
        assert!((rects[0].height - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_keys_split_into_strips() {
        // Raw ungrouped series: three records of one category
        let points = vec![point("A", 10.0), point("A", 20.0), point("A", 5.0)];
        let rects = bar_layout(&points, 100.0, 100.0);

        assert_eq!(rects.len(), 3);
        for rect in &rects {
            assert!((rect.width - 80.0 / 3.0).abs() < 1e-9);
        }
        // Strips are laid side by side, not stacked
        assert!(rects[0].x < rects[1].x);
        assert!(rects[1].x < rects[2].x);
    }

    #[test]
    fn test_negative_values_clamp_to_zero_height() {
        let points = vec![point("A", -5.0), point("B", 10.0)];
        let rects = bar_layout(&points, 200.0, 100.0);
        assert_eq!(rects[0].height, 0.0);
    }

    #[test]
    fn test_empty_series() {
        assert!(bar_layout(&[], 200.0, 100.0).is_empty());
        assert!(slot_labels(&[], 200.0).is_empty());
    }

    #[test]
    fn test_slot_labels_first_appearance_order() {
        let points = vec![point("B", 1.0), point("A", 1.0), point("B", 2.0)];
        let labels = slot_labels(&points, 200.0);

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].0, "B");
        assert_eq!(labels[1].0, "A");
        assert!((labels[0].1 - 50.0).abs() < 1e-9);
        assert!((labels[1].1 - 150.0).abs() < 1e-9);
    }
}
