// src/domain/listing.rs

use std::collections::BTreeSet;
use std::fmt;

pub const NOT_SPECIFIED: &str = "Not Specified";
pub const UNKNOWN: &str = "Unknown";

/// A cleaning fee is either a whole amount or explicitly not specified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningFee {
    Amount(i64),
    NotSpecified,
}

impl CleaningFee {
    pub fn amount(&self) -> Option<i64> {
        match self {
            CleaningFee::Amount(n) => Some(*n),
            CleaningFee::NotSpecified => None,
        }
    }
}

impl fmt::Display for CleaningFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleaningFee::Amount(n) => write!(f, "{n}"),
            CleaningFee::NotSpecified => f.write_str(NOT_SPECIFIED),
        }
    }
}

/// One property listing after normalization. Every numeric column is populated.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    pub id: String,
    pub listing_url: String,
    pub name: String,

    // Categorical
    pub country: String,
    pub property_type: String,
    pub room_type: String,
    pub bed_type: String,
    pub cancellation_policy: String,
    pub host_name: String,

    // Stay rules and capacity
    pub minimum_nights: i64,
    pub maximum_nights: i64,
    pub accommodates: i64,
    pub bedrooms: i64,
    pub beds: i64,
    pub bathrooms: f64,
    pub guests_included: i64,

    // Money
    pub price: i64,
    pub cleaning_fee: CleaningFee,
    pub extra_people: i64,

    pub availability_365: i64,
    pub number_of_reviews: i64,

    /// Display only; listings without reviews carry no score.
    pub review_scores_rating: Option<i64>,
    pub picture_url: String,
}

/// Categorical columns offered as sidebar filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Country,
    PropertyType,
    RoomType,
}

impl Facet {
    pub fn value<'a>(&self, record: &'a ListingRecord) -> &'a str {
        match self {
            Facet::Country => &record.country,
            Facet::PropertyType => &record.property_type,
            Facet::RoomType => &record.room_type,
        }
    }

    /// Query-string parameter carrying this facet's selection.
    pub fn param(&self) -> &'static str {
        match self {
            Facet::Country => "country",
            Facet::PropertyType => "property_type",
            Facet::RoomType => "room_type",
        }
    }
}

/// The normalized table for one dashboard session. Never mutated after construction;
/// filtering derives borrowed views.
#[derive(Debug, Clone, Default)]
pub struct ListingTable {
    rows: Vec<ListingRecord>,
}

impl ListingTable {
    pub fn new(rows: Vec<ListingRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ListingRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Sorted distinct values of a facet over the whole table, independent of any filter.
    pub fn distinct(&self, facet: Facet) -> BTreeSet<String> {
        self.rows
            .iter()
            .map(|r| facet.value(r).to_string())
            .collect()
    }

    /// `(min, max)` price over the whole table.
    pub fn price_bounds(&self) -> Option<(i64, i64)> {
        let min = self.rows.iter().map(|r| r.price).min()?;
        let max = self.rows.iter().map(|r| r.price).max()?;
        Some((min, max))
    }

    pub fn filtered<'a, F>(&'a self, predicate: F) -> Vec<&'a ListingRecord>
    where
        F: Fn(&ListingRecord) -> bool,
    {
        self.rows.iter().filter(|&r| predicate(r)).collect()
    }
}
