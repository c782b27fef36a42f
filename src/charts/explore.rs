use crate::charts::{Cell, ChartKind, ChartSpec};
use crate::domain::aggregate::{
    aggregate, distribution, sort_by_value, GroupKey, Metric, MetricField,
};
use crate::domain::ListingRecord;

/// Price and availability breakdowns by room type and by country.
pub fn explore_charts(rows: &[&ListingRecord]) -> Vec<ChartSpec> {
    let price_by_room = sort_by_value(aggregate(
        rows,
        GroupKey::RoomType,
        Metric::Mean(MetricField::Price),
    ));
    let availability_by_room = distribution(rows, GroupKey::RoomType, MetricField::Availability365);
    let price_by_country = aggregate(rows, GroupKey::Country, Metric::Mean(MetricField::Price));
    let availability_by_country = aggregate(
        rows,
        GroupKey::Country,
        Metric::Mean(MetricField::Availability365),
    );

    let mut avg_availability = ChartSpec::from_groups(
        "avg-availability-by-country",
        ChartKind::ScatterGeo,
        "Avg Availability in each Country",
        [GroupKey::Country.column(), MetricField::Availability365.column()],
        &availability_by_country,
    );
    // Whole days.
    for row in &mut avg_availability.rows {
        if let Some(Cell::Number(n)) = row.get_mut(1) {
            *n = n.trunc();
        }
    }

    vec![
        ChartSpec::from_groups(
            "avg-price-by-room-type",
            ChartKind::VerticalBar,
            "Avg Price in each Room type",
            [GroupKey::RoomType.column(), MetricField::Price.column()],
            &price_by_room,
        ),
        ChartSpec::from_box_summaries(
            "availability-by-room-type",
            "Availability by Room_type",
            GroupKey::RoomType.column(),
            &availability_by_room,
        ),
        ChartSpec::from_groups(
            "avg-price-by-country",
            ChartKind::ScatterGeo,
            "Avg Price in each Country",
            [GroupKey::Country.column(), MetricField::Price.column()],
            &price_by_country,
        ),
        avg_availability,
    ]
}
