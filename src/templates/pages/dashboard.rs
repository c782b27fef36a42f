use crate::charts::ChartSpec;
use crate::domain::{FilterSelection, ListingRecord, ListingTable, PipelineError};
use crate::templates::{chart_card, desktop_layout, filter_sidebar, NavPage};
use chrono::{DateTime, Utc};
use maud::{html, Markup};

/// Everything an Overview or Explore page needs for one request.
pub struct DashboardVm<'a> {
    pub page: NavPage,
    pub table: &'a ListingTable,
    pub selection: &'a FilterSelection,
    pub matched: usize,
    pub charts: Vec<ChartSpec>,
    /// First rows of the filtered view, when the raw table was requested.
    pub preview: Option<Vec<&'a ListingRecord>>,
    pub export_href: String,
    pub raw_href: String,
    /// Where the table was read from.
    pub source: &'a str,
    pub loaded_at: DateTime<Utc>,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    let heading = match vm.page {
        NavPage::Explore => "Explore more about the Airbnb data",
        _ => "Overview",
    };

    desktop_layout(
        heading,
        vm.page,
        Some(filter_sidebar(vm.page.href(), vm.table, vm.selection)),
        html! {
            h1 { (heading) }
            p class="summary" {
                strong { (vm.matched) } " of " (vm.table.len()) " listings match the current filters. "
                a href=(vm.export_href) { "Download as XLSX" }
                @if vm.page == NavPage::Overview && vm.preview.is_none() {
                    " · " a href=(vm.raw_href) { "Click to view Dataframe" }
                }
            }

            @if let Some(rows) = &vm.preview {
                (listing_preview(rows))
            }

            div class="chart-grid" {
                @for chart in &vm.charts {
                    (chart_card(chart))
                }
            }

            footer {
                "Data loaded from " (vm.source) " at "
                (vm.loaded_at.format("%Y-%m-%d %H:%M UTC").to_string())
            }
        },
    )
}

fn listing_preview(rows: &[&ListingRecord]) -> Markup {
    html! {
        section class="card" {
            h3 { "Listings" }
            table class="listing-table" {
                thead {
                    tr {
                        th { "id" } th { "name" } th { "country" } th { "property_type" }
                        th { "room_type" } th { "price" } th { "cleaning_fee" }
                        th { "bedrooms" } th { "bathrooms" } th { "availability_365" }
                        th { "number_of_reviews" } th { "review_scores_rating" } th { "picture_url" }
                    }
                }
                tbody {
                    @for r in rows {
                        tr {
                            td { a href=(r.listing_url) { (r.id) } }
                            td { (r.name) }
                            td { (r.country) }
                            td { (r.property_type) }
                            td { (r.room_type) }
                            td { (r.price) }
                            td { (r.cleaning_fee.to_string()) }
                            td { (r.bedrooms) }
                            td { (r.bathrooms.to_string()) }
                            td { (r.availability_365) }
                            td { (r.number_of_reviews) }
                            td {
                                @match r.review_scores_rating {
                                    Some(rating) => { (rating) }
                                    None => { "n/a" }
                                }
                            }
                            td {
                                @if !r.picture_url.is_empty() {
                                    a href=(r.picture_url) { "picture" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Shown instead of charts when the listing table could not be built.
pub fn unavailable_page(page: NavPage, err: &PipelineError) -> Markup {
    desktop_layout(
        "Data unavailable",
        page,
        None,
        html! {
            h1 { "No data to show" }
            section class="card error-state" {
                p { "The listing table could not be built, so there is nothing to chart." }
                p { code { (err.to_string()) } }
            }
        },
    )
}
