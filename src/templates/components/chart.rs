use crate::charts::ChartSpec;
use maud::{html, Markup};

/// A chart card: the Plotly mount point plus the underlying table.
pub fn chart_card(chart: &ChartSpec) -> Markup {
    html! {
        section class="card chart-card" {
            h3 { (chart.title) }
            @if chart.is_empty() {
                p class="empty-state" { "No listings match the current filters." }
            } @else {
                div class="chart" id=(chart.id) data-figure=(chart.to_plotly().to_string()) {}
                details {
                    summary { "Data" }
                    (chart_table(chart))
                }
            }
        }
    }
}

pub fn chart_table(chart: &ChartSpec) -> Markup {
    html! {
        table class="chart-table" {
            thead {
                tr {
                    @for col in &chart.columns {
                        th { (*col) }
                    }
                }
            }
            tbody {
                @for row in &chart.rows {
                    tr {
                        @for cell in row {
                            td { (cell.to_string()) }
                        }
                    }
                }
            }
        }
    }
}
