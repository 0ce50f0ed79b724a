use contracts::dashboards::d100_sales_overview::dto::DeltaDirection;
use leptos::prelude::*;

use crate::shared::format::{format_currency, format_percent, format_signed_percent};

/// How a metric value is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricFormat {
    Currency,
    Percent,
}

fn format_value(value: f64, format: MetricFormat) -> String {
    match format {
        MetricFormat::Currency => format_currency(value),
        MetricFormat::Percent => format_percent(value),
    }
}

#[component]
pub fn MetricCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Primary numeric value (None = not loaded yet)
    #[prop(into)]
    value: Signal<Option<f64>>,
    /// How to format the value
    format: MetricFormat,
    /// Optional delta vs the baseline, with its highlight direction
    #[prop(into, optional)]
    delta: Signal<Option<(f64, DeltaDirection)>>,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(v) => format_value(v, format),
        None => "—".to_string(),
    };

    let delta_view = move || {
        delta.get().map(|(delta_value, direction)| {
            let (arrow, cls) = match direction {
                DeltaDirection::Normal => ("\u{2191}", "metric-card__delta metric-card__delta--normal"),
                DeltaDirection::Inverse => ("\u{2193}", "metric-card__delta metric-card__delta--inverse"),
            };
            let text = format!("{} {}", arrow, format_signed_percent(delta_value));
            view! { <span class=cls>{text}</span> }
        })
    };

    view! {
        <div class="metric-card">
            <div class="metric-card__label">{label}</div>
            <div class="metric-card__value">
                {formatted}
                {delta_view}
            </div>
        </div>
    }
}
