// src/domain/aggregate.rs

use crate::domain::listing::ListingRecord;
use std::collections::BTreeMap;

/// Categorical columns rows can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Country,
    PropertyType,
    RoomType,
    HostName,
}

impl GroupKey {
    pub fn value<'a>(&self, record: &'a ListingRecord) -> &'a str {
        match self {
            GroupKey::Country => &record.country,
            GroupKey::PropertyType => &record.property_type,
            GroupKey::RoomType => &record.room_type,
            GroupKey::HostName => &record.host_name,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            GroupKey::Country => "country",
            GroupKey::PropertyType => "property_type",
            GroupKey::RoomType => "room_type",
            GroupKey::HostName => "host_name",
        }
    }
}

/// Numeric columns a mean or distribution can be taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    Price,
    Availability365,
}

impl MetricField {
    pub fn value(&self, record: &ListingRecord) -> f64 {
        match self {
            MetricField::Price => record.price as f64,
            MetricField::Availability365 => record.availability_365 as f64,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            MetricField::Price => "price",
            MetricField::Availability365 => "availability_365",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Count,
    Mean(MetricField),
}

/// One aggregated group.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: String,
    pub value: f64,
}

/// Groups `rows` by exact key equality. Output is ordered by ascending key.
pub fn aggregate(rows: &[&ListingRecord], key: GroupKey, metric: Metric) -> Vec<Group> {
    let mut acc: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for row in rows {
        let contribution = match metric {
            Metric::Count => 1.0,
            Metric::Mean(field) => field.value(row),
        };
        let entry = acc.entry(key.value(row)).or_insert((0.0, 0));
        entry.0 += contribution;
        entry.1 += 1;
    }

    acc.into_iter()
        .map(|(k, (sum, n))| Group {
            key: k.to_string(),
            value: match metric {
                Metric::Count => n as f64,
                Metric::Mean(_) => sum / n as f64,
            },
        })
        .collect()
}

/// Largest `n` groups by value, ties broken by ascending key.
pub fn top_n(mut groups: Vec<Group>, n: usize) -> Vec<Group> {
    groups.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.key.cmp(&b.key)));
    groups.truncate(n);
    groups
}

/// Ascending by value, ties broken by ascending key.
pub fn sort_by_value(mut groups: Vec<Group>) -> Vec<Group> {
    groups.sort_by(|a, b| a.value.total_cmp(&b.value).then_with(|| a.key.cmp(&b.key)));
    groups
}

/// Five-number summary of one group, as a box plot draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub key: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Per-group distribution of `field`, ordered by ascending key.
pub fn distribution(rows: &[&ListingRecord], key: GroupKey, field: MetricField) -> Vec<BoxSummary> {
    let mut values: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in rows {
        values.entry(key.value(row)).or_default().push(field.value(row));
    }

    values
        .into_iter()
        .filter_map(|(k, mut vs)| {
            vs.sort_by(f64::total_cmp);
            Some(BoxSummary {
                key: k.to_string(),
                min: *vs.first()?,
                q1: quantile(&vs, 0.25),
                median: quantile(&vs, 0.5),
                q3: quantile(&vs, 0.75),
                max: *vs.last()?,
            })
        })
        .collect()
}

// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::fixtures::listing;

    #[test]
    fn counts_per_group_in_key_order() {
        let data = vec![
            listing("1", "Spain", "house", "Private room", 40),
            listing("2", "Brazil", "apartment", "Entire home/apt", 120),
            listing("3", "Spain", "apartment", "Private room", 80),
        ];
        let rows: Vec<_> = data.iter().collect();

        let groups = aggregate(&rows, GroupKey::Country, Metric::Count);
        assert_eq!(
            groups,
            vec![
                Group { key: "Brazil".into(), value: 1.0 },
                Group { key: "Spain".into(), value: 2.0 },
            ]
        );
    }

    #[test]
    fn mean_per_group() {
        let data = vec![
            listing("1", "Spain", "house", "Private room", 40),
            listing("2", "Spain", "house", "Private room", 81),
            listing("3", "Brazil", "house", "Entire home/apt", 200),
        ];
        let rows: Vec<_> = data.iter().collect();

        let groups = aggregate(&rows, GroupKey::RoomType, Metric::Mean(MetricField::Price));
        assert_eq!(groups[0], Group { key: "Entire home/apt".into(), value: 200.0 });
        assert_eq!(groups[1], Group { key: "Private room".into(), value: 60.5 });
    }

    #[test]
    fn mean_of_availability_per_country() {
        let data: Vec<_> = [("Spain", 100), ("Spain", 201), ("Brazil", 0)]
            .iter()
            .enumerate()
            .map(|(i, (country, days))| {
                let mut l = listing(&i.to_string(), country, "house", "Private room", 40);
                l.availability_365 = *days;
                l
            })
            .collect();
        let rows: Vec<_> = data.iter().collect();

        let groups = aggregate(&rows, GroupKey::Country, Metric::Mean(MetricField::Availability365));
        assert_eq!(
            groups,
            vec![
                Group { key: "Brazil".into(), value: 0.0 },
                Group { key: "Spain".into(), value: 150.5 },
            ]
        );
    }

    #[test]
    fn top_n_breaks_ties_by_ascending_key() {
        let groups = vec![
            Group { key: "loft".into(), value: 2.0 },
            Group { key: "apartment".into(), value: 5.0 },
            Group { key: "house".into(), value: 2.0 },
            Group { key: "cabin".into(), value: 1.0 },
        ];

        let top = top_n(groups, 3);
        let keys: Vec<_> = top.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["apartment", "house", "loft"]);
    }

    #[test]
    fn empty_rows_aggregate_to_nothing() {
        assert!(aggregate(&[], GroupKey::Country, Metric::Count).is_empty());
        assert!(distribution(&[], GroupKey::Country, MetricField::Price).is_empty());
    }

    #[test]
    fn distribution_interpolates_quartiles() {
        let data: Vec<_> = [10, 20, 30, 40, 50]
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let mut l = listing(&i.to_string(), "Spain", "house", "Private room", 1);
                l.availability_365 = *a;
                l
            })
            .collect();
        let rows: Vec<_> = data.iter().collect();

        let summary = &distribution(&rows, GroupKey::RoomType, MetricField::Availability365)[0];
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.q1, 20.0);
        assert_eq!(summary.median, 30.0);
        assert_eq!(summary.q3, 40.0);
        assert_eq!(summary.max, 50.0);
    }
}
