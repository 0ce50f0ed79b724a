use contracts::dashboards::d100_sales_overview::dto::{
    AggregateRow, CategorySalesPoint, DailySalesRow, MetricsResponse, MonthlySalesRow,
};
use contracts::projections::p100_sales_records::dto::SalesRecordDto;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use thaw::{Checkbox, CheckboxGroup, Select};

use crate::dashboards::d100_sales_overview::api;
use crate::shared::components::bar_chart::BarChart;
use crate::shared::components::line_chart::LineChart;
use crate::shared::components::metric_card::{MetricCard, MetricFormat};
use crate::shared::components::ChartPoint;
use crate::shared::format::{format_currency, format_percent};
use crate::shared::page_frame::PageFrame;

/// Rows shown in the raw dataset preview table
const PREVIEW_ROWS: usize = 50;

/// Sales overview dashboard: one category selector, one dependent
/// sub-category multi-select, metrics with a baseline delta, and the
/// bar/line charts over the filtered and whole-dataset aggregates.
#[component]
pub fn SalesOverviewDashboard() -> impl IntoView {
    // Selection state
    let (categories, set_categories) = signal(Vec::<String>::new());
    let selected_category = RwSignal::new(String::new());
    let (sub_category_options, set_sub_category_options) = signal(Vec::<String>::new());
    let selected_sub_categories: RwSignal<HashSet<String>> = RwSignal::new(HashSet::new());

    // Whole-dataset state, loaded once on mount
    let (all_records, set_all_records) = signal(Vec::<SalesRecordDto>::new());
    let (by_category, set_by_category) = signal(Vec::<AggregateRow>::new());
    let (category_detail, set_category_detail) = signal(Vec::<CategorySalesPoint>::new());
    let (monthly_sales, set_monthly_sales) = signal(Vec::<MonthlySalesRow>::new());

    // Selection-dependent state
    let (filtered_records, set_filtered_records) = signal(Vec::<SalesRecordDto>::new());
    let (metrics, set_metrics) = signal(None::<MetricsResponse>);
    let (by_sub_category, set_by_sub_category) = signal(Vec::<AggregateRow>::new());
    let (daily_sales, set_daily_sales) = signal(Vec::<DailySalesRow>::new());

    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    // Load selector options and the whole-dataset views on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match api::get_categories().await {
                Ok(options) => {
                    let first = options.first().cloned();
                    set_categories.set(options);
                    // Default to the first option once; the <option> list must
                    // exist before the value is applied
                    if let Some(first) = first {
                        if selected_category.get_untracked().is_empty() {
                            selected_category.set(first);
                        }
                    }
                }
                Err(e) => {
                    log!("Failed to load categories: {}", e);
                    set_error.set(Some(e));
                }
            }

            match api::get_all_records().await {
                Ok(records) => set_all_records.set(records),
                Err(e) => log!("Failed to load records: {}", e),
            }
            match api::get_by_category().await {
                Ok(rows) => set_by_category.set(rows),
                Err(e) => log!("Failed to load category sums: {}", e),
            }
            match api::get_category_sales_detail().await {
                Ok(points) => set_category_detail.set(points),
                Err(e) => log!("Failed to load category detail series: {}", e),
            }
            match api::get_monthly_sales().await {
                Ok(rows) => set_monthly_sales.set(rows),
                Err(e) => log!("Failed to load monthly sales: {}", e),
            }
        });
    });

    // The sub-category option set depends on the chosen category: reload it
    // and drop stale picks whenever the category changes
    Effect::new(move |_| {
        let category = selected_category.get();
        if category.is_empty() {
            return;
        }

        selected_sub_categories.set(HashSet::new());

        spawn_local(async move {
            match api::get_sub_categories(&category).await {
                Ok(options) => set_sub_category_options.set(options),
                Err(e) => {
                    log!("Failed to load sub-categories: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    });

    // Everything derived from the filtered view reloads on selection change
    Effect::new(move |_| {
        let category = selected_category.get();
        let sub_categories = selected_sub_categories.get();
        if category.is_empty() {
            return;
        }

        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::get_filtered_records(&category, &sub_categories).await {
                Ok(records) => set_filtered_records.set(records),
                Err(e) => set_error.set(Some(e)),
            }
            match api::get_metrics(&category, &sub_categories).await {
                Ok(response) => set_metrics.set(Some(response)),
                Err(e) => set_error.set(Some(e)),
            }
            match api::get_by_sub_category(&category, &sub_categories).await {
                Ok(rows) => set_by_sub_category.set(rows),
                Err(e) => set_error.set(Some(e)),
            }

            // The daily series is only rendered for an explicit sub-category
            // selection; skip the request otherwise
            if sub_categories.is_empty() {
                set_daily_sales.set(Vec::new());
            } else {
                match api::get_daily_sales(&category, &sub_categories).await {
                    Ok(rows) => set_daily_sales.set(rows),
                    Err(e) => set_error.set(Some(e)),
                }
            }

            set_loading.set(false);
        });
    });

    // Chart series
    let sub_category_points = Signal::derive(move || {
        by_sub_category
            .get()
            .into_iter()
            .map(|row| ChartPoint::new(row.key, row.sales))
            .collect::<Vec<_>>()
    });
    let category_detail_points = Signal::derive(move || {
        category_detail
            .get()
            .into_iter()
            .map(|point| ChartPoint::new(point.category, point.sales))
            .collect::<Vec<_>>()
    });
    let category_sum_points = Signal::derive(move || {
        by_category
            .get()
            .into_iter()
            .map(|row| ChartPoint::new(row.key, row.sales))
            .collect::<Vec<_>>()
    });
    let monthly_points = Signal::derive(move || {
        monthly_sales
            .get()
            .into_iter()
            .map(|row| ChartPoint::new(row.month, row.sales))
            .collect::<Vec<_>>()
    });
    let daily_points = Signal::derive(move || {
        daily_sales
            .get()
            .into_iter()
            .map(|row| ChartPoint::new(row.date.format("%Y-%m-%d").to_string(), row.sales))
            .collect::<Vec<_>>()
    });

    // Metric card inputs
    let selection_sales =
        Signal::derive(move || metrics.get().map(|m| m.selection.total_sales));
    let selection_profit =
        Signal::derive(move || metrics.get().map(|m| m.selection.total_profit));
    let selection_margin =
        Signal::derive(move || metrics.get().map(|m| m.selection.profit_margin));
    let margin_delta = Signal::derive(move || {
        metrics
            .get()
            .map(|m| (m.margin_delta, m.delta_direction))
    });
    let selection_is_empty =
        Signal::derive(move || matches!(metrics.get(), Some(m) if m.selection.record_count == 0));

    let record_table = |records: Vec<SalesRecordDto>| {
        view! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Category"</th>
                        <th>"Sub-Category"</th>
                        <th>"Order Date"</th>
                        <th class="data-table__num">"Sales"</th>
                        <th class="data-table__num">"Profit"</th>
                    </tr>
                </thead>
                <tbody>
                    {records
                        .into_iter()
                        .map(|r| {
                            view! {
                                <tr>
                                    <td>{r.category}</td>
                                    <td>{r.sub_category}</td>
                                    <td>{r.order_date.format("%Y-%m-%d").to_string()}</td>
                                    <td class="data-table__num">{format_currency(r.sales)}</td>
                                    <td class="data-table__num">{format_currency(r.profit)}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
    };

    let aggregate_table = |rows: Vec<AggregateRow>, key_header: &'static str| {
        view! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{key_header}</th>
                        <th class="data-table__num">"Sales"</th>
                        <th class="data-table__num">"Profit"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|row| {
                            view! {
                                <tr>
                                    <td>{row.key}</td>
                                    <td class="data-table__num">{format_currency(row.sales)}</td>
                                    <td class="data-table__num">{format_currency(row.profit)}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
    };

    view! {
        <PageFrame page_id="d100_sales_overview--dashboard" category="dashboard">
            <div class="page__header">
                <h2 class="page__title">"Superstore Sales"</h2>
            </div>

            {move || error.get().map(|msg| view! {
                <div class="alert alert--error">
                    <strong>"Error: "</strong>
                    {msg}
                </div>
            })}

            <section class="dashboard-section">
                <h3>"Input Data"</h3>
                {move || {
                    let records = all_records.get();
                    let total = records.len();
                    let preview: Vec<_> = records.into_iter().take(PREVIEW_ROWS).collect();
                    let shown = preview.len();
                    view! {
                        {record_table(preview)}
                        <div class="dashboard-section__note">
                            {format!("Showing {} of {} records", shown, total)}
                        </div>
                    }
                }}
            </section>

            <section class="dashboard-section">
                <h3>"Selection"</h3>
                <div class="selection-panel">
                    <div class="selection-panel__field">
                        <label>"Select a Category:"</label>
                        <Select value=selected_category>
                            {move || categories.get().into_iter().map(|category| {
                                view! {
                                    <option value=category.clone()>{category.clone()}</option>
                                }
                            }).collect_view()}
                        </Select>
                    </div>

                    <div class="selection-panel__field">
                        <label>"Select Sub-Categories:"</label>
                        <CheckboxGroup value=selected_sub_categories>
                            <div class="selection-panel__options">
                                {move || sub_category_options.get().into_iter().map(|sub| {
                                    view! {
                                        <Checkbox value=sub.clone() label=sub.clone() />
                                    }
                                }).collect_view()}
                            </div>
                        </CheckboxGroup>
                    </div>
                </div>

                {move || {
                    if loading.get() {
                        Some(view! {
                            <div class="dashboard-section__note">"Loading…"</div>
                        })
                    } else {
                        None
                    }
                }}

                {move || record_table(filtered_records.get())}
            </section>

            <section class="dashboard-section">
                <h3>"Metrics for the Selection"</h3>
                {move || {
                    if selection_is_empty.get() {
                        Some(view! {
                            <div class="alert alert--info">
                                "No rows match the current selection; totals are zero."
                            </div>
                        })
                    } else {
                        None
                    }
                }}
                <div class="metric-row">
                    <MetricCard
                        label="Total Sales"
                        value=selection_sales
                        format=MetricFormat::Currency
                    />
                    <MetricCard
                        label="Total Profit"
                        value=selection_profit
                        format=MetricFormat::Currency
                    />
                    <MetricCard
                        label="Overall Profit Margin"
                        value=selection_margin
                        format=MetricFormat::Percent
                    />
                </div>

                // Same numbers again, margin now annotated against the
                // whole-dataset baseline
                <div class="metric-row">
                    <MetricCard
                        label="Total Sales"
                        value=selection_sales
                        format=MetricFormat::Currency
                    />
                    <MetricCard
                        label="Total Profit"
                        value=selection_profit
                        format=MetricFormat::Currency
                    />
                    <MetricCard
                        label="Overall Profit Margin"
                        value=selection_margin
                        format=MetricFormat::Percent
                        delta=margin_delta
                    />
                </div>
                {move || metrics.get().map(|m| view! {
                    <div class="dashboard-section__note">
                        {format!(
                            "Baseline across all products: {} sales, {} profit, {} margin",
                            format_currency(m.baseline.total_sales),
                            format_currency(m.baseline.total_profit),
                            format_percent(m.baseline.profit_margin),
                        )}
                    </div>
                })}
            </section>

            <section class="dashboard-section">
                <h3>"Sales by Sub-Category (selection)"</h3>
                <BarChart points=sub_category_points />
            </section>

            <section class="dashboard-section">
                <h3>"Sales by Category, record by record"</h3>
                // Ungrouped series: every record is its own mark, so each
                // category shows thin strips instead of one solid bar
                <BarChart points=category_detail_points />
            </section>

            <section class="dashboard-section">
                <h3>"Sales by Category, aggregated"</h3>
                {move || aggregate_table(by_category.get(), "Category")}
                <BarChart points=category_sum_points />
            </section>

            <section class="dashboard-section">
                <h3>"Sales by Month"</h3>
                {move || {
                    let rows = monthly_sales.get();
                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Month"</th>
                                    <th class="data-table__num">"Sales"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {rows.into_iter().map(|row| view! {
                                    <tr>
                                        <td>{row.month}</td>
                                        <td class="data-table__num">{format_currency(row.sales)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }
                }}
                <LineChart points=monthly_points />
            </section>

            {move || {
                if selected_sub_categories.get().is_empty() {
                    None
                } else {
                    Some(view! {
                        <section class="dashboard-section">
                            <h3>"Daily Sales for the Selection"</h3>
                            <LineChart points=daily_points />
                        </section>
                    })
                }
            }}

            <section class="dashboard-section">
                <h3>"Sales by Month"</h3>
                <LineChart points=monthly_points />
            </section>
        </PageFrame>
    }
}
