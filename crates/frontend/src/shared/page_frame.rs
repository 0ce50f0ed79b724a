//! PageFrame — standard root wrapper for every page.
//!
//! Guarantees two metadata attributes on the root DOM element:
//!   - `id`                  — `"{entity}--{category}"`, e.g. `"d100_sales_overview--dashboard"`
//!   - `data-page-category`  — the page category string

use leptos::prelude::*;

/// Root wrapper that sets standard metadata on every page.
#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`.
    page_id: &'static str,
    /// Page category, e.g. "dashboard".
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let base_class = match category {
        "dashboard" => "page page--dashboard",
        _ => "page",
    };

    view! {
        <div
            id=page_id
            class=base_class
            data-page-category=category
        >
            {children()}
        </div>
    }
}
