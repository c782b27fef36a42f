// src/domain/filter.rs

use crate::domain::listing::{Facet, ListingRecord, ListingTable};
use std::collections::BTreeSet;

/// The sidebar state: selected facet values plus an inclusive price range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub countries: BTreeSet<String>,
    pub property_types: BTreeSet<String>,
    pub room_types: BTreeSet<String>,
    pub price_min: i64,
    pub price_max: i64,
}

impl FilterSelection {
    /// Everything selected and the full price range; what the sidebar shows on first load.
    pub fn everything(table: &ListingTable) -> Self {
        let (price_min, price_max) = table.price_bounds().unwrap_or((0, 0));
        Self {
            countries: table.distinct(Facet::Country),
            property_types: table.distinct(Facet::PropertyType),
            room_types: table.distinct(Facet::RoomType),
            price_min,
            price_max,
        }
    }

    pub fn selected(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Country => &self.countries,
            Facet::PropertyType => &self.property_types,
            Facet::RoomType => &self.room_types,
        }
    }

    pub fn predicate(&self) -> ListingPredicate<'_> {
        build(
            &self.countries,
            &self.property_types,
            &self.room_types,
            self.price_min,
            self.price_max,
        )
    }
}

/// Conjunction of facet membership and an inclusive price range.
///
/// An empty facet set matches nothing.
#[derive(Debug, Clone, Copy)]
pub struct ListingPredicate<'a> {
    countries: &'a BTreeSet<String>,
    property_types: &'a BTreeSet<String>,
    room_types: &'a BTreeSet<String>,
    price_min: i64,
    price_max: i64,
}

pub fn build<'a>(
    countries: &'a BTreeSet<String>,
    property_types: &'a BTreeSet<String>,
    room_types: &'a BTreeSet<String>,
    price_min: i64,
    price_max: i64,
) -> ListingPredicate<'a> {
    ListingPredicate {
        countries,
        property_types,
        room_types,
        price_min,
        price_max,
    }
}

impl ListingPredicate<'_> {
    pub fn matches(&self, record: &ListingRecord) -> bool {
        self.countries.contains(&record.country)
            && self.property_types.contains(&record.property_type)
            && self.room_types.contains(&record.room_type)
            && (self.price_min..=self.price_max).contains(&record.price)
    }

    pub fn apply<'t>(&self, table: &'t ListingTable) -> Vec<&'t ListingRecord> {
        table.filtered(|r| self.matches(r))
    }
}
