use crate::charts::{ChartKind, ChartSpec};
use crate::domain::aggregate::{aggregate, top_n, GroupKey, Metric};
use crate::domain::ListingRecord;

const TOP_N: usize = 10;

/// Listing counts: top property types, top hosts, room-type split, per-country totals.
pub fn overview_charts(rows: &[&ListingRecord]) -> Vec<ChartSpec> {
    let top_types = top_n(aggregate(rows, GroupKey::PropertyType, Metric::Count), TOP_N);
    let top_hosts = top_n(aggregate(rows, GroupKey::HostName, Metric::Count), TOP_N);
    let rooms = aggregate(rows, GroupKey::RoomType, Metric::Count);
    let countries = aggregate(rows, GroupKey::Country, Metric::Count);

    vec![
        ChartSpec::from_groups(
            "top-property-types",
            ChartKind::HorizontalBar,
            "Top 10 Property Types",
            [GroupKey::PropertyType.column(), "Listings"],
            &top_types,
        ),
        ChartSpec::from_groups(
            "top-hosts",
            ChartKind::HorizontalBar,
            "Top 10 Hosts with Highest number of Listings",
            [GroupKey::HostName.column(), "Listings"],
            &top_hosts,
        ),
        ChartSpec::from_groups(
            "room-type-share",
            ChartKind::Pie,
            "Total Listings in each Room_types",
            [GroupKey::RoomType.column(), "counts"],
            &rooms,
        ),
        ChartSpec::from_groups(
            "listings-by-country",
            ChartKind::Choropleth,
            "Total Listings in each Country",
            [GroupKey::Country.column(), "Total_Listings"],
            &countries,
        ),
    ]
}
