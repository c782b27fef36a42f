// src/domain/normalize.rs

use crate::domain::listing::{CleaningFee, ListingRecord, UNKNOWN};
use crate::domain::PipelineError;
use crate::source::RawRecord;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, warn};

/// Turns fetched documents into typed listing rows, one row per document.
///
/// Only the first document is probed for `availability.availability_365`; if it lacks
/// the key nothing is normalized. Later documents without it fall back to 0.
pub fn normalize(raw_records: &[RawRecord]) -> Result<Vec<ListingRecord>, PipelineError> {
    probe_availability(raw_records.first())?;

    let mut missing_availability = 0usize;
    let mut rows = Vec::with_capacity(raw_records.len());

    for raw in raw_records {
        if lookup(raw, "availability.availability_365").is_none() {
            missing_availability += 1;
        }
        rows.push(normalize_record(raw)?);
    }

    if missing_availability > 0 {
        warn!(
            missing = missing_availability,
            "documents without availability_365 defaulted to 0"
        );
    }
    debug!(rows = rows.len(), "normalized listing table");

    Ok(rows)
}

fn probe_availability(first: Option<&RawRecord>) -> Result<(), PipelineError> {
    let missing = || PipelineError::SchemaMismatch("availability_365 missing".into());

    let availability = first
        .and_then(|r| r.get("availability"))
        .and_then(Value::as_object)
        .ok_or_else(missing)?;

    debug!(?availability, "structure of the availability object");

    if availability.contains_key("availability_365") {
        Ok(())
    } else {
        Err(missing())
    }
}

/// Normalizes a single document. Absent numeric fields become 0; present but
/// unparseable ones are a `ParseFailure`.
pub fn normalize_record(raw: &RawRecord) -> Result<ListingRecord, PipelineError> {
    let id = listing_id(raw)?;
    let id_ref = id.as_str();

    let int = |field: &'static str| -> Result<i64, PipelineError> {
        match lookup(raw, field) {
            None => Ok(0),
            Some(v) => decimal_to_int(v).ok_or_else(|| PipelineError::parse(id_ref, field, v)),
        }
    };
    let float_then_int = |field: &'static str| -> Result<i64, PipelineError> {
        match lookup(raw, field) {
            None => Ok(0),
            Some(v) => float_to_int(v).ok_or_else(|| PipelineError::parse(id_ref, field, v)),
        }
    };

    let bathrooms = match lookup(raw, "bathrooms") {
        None => 0.0,
        Some(v) => to_float(v).ok_or_else(|| PipelineError::parse(id_ref, "bathrooms", v))?,
    };

    let cleaning_fee = match lookup(raw, "cleaning_fee") {
        None => CleaningFee::NotSpecified,
        Some(v) => CleaningFee::Amount(
            decimal_to_int(v).ok_or_else(|| PipelineError::parse(id_ref, "cleaning_fee", v))?,
        ),
    };

    let review_scores_rating = match lookup(raw, "review_scores.review_scores_rating") {
        None => None,
        Some(v) => Some(
            decimal_to_int(v)
                .ok_or_else(|| PipelineError::parse(id_ref, "review_scores_rating", v))?,
        ),
    };

    let property_type = text(raw, "property_type")
        .unwrap_or_else(|| UNKNOWN.to_string())
        .to_lowercase();

    Ok(ListingRecord {
        listing_url: text(raw, "listing_url").unwrap_or_default(),
        name: text(raw, "name").unwrap_or_default(),
        country: country(raw),
        property_type,
        room_type: text_or_unknown(raw, "room_type"),
        bed_type: text_or_unknown(raw, "bed_type"),
        cancellation_policy: text_or_unknown(raw, "cancellation_policy"),
        host_name: text_or_unknown(raw, "host.host_name"),
        minimum_nights: int("minimum_nights")?,
        maximum_nights: int("maximum_nights")?,
        accommodates: int("accommodates")?,
        bedrooms: int("bedrooms")?,
        beds: int("beds")?,
        bathrooms,
        guests_included: int("guests_included")?,
        price: float_then_int("price")?,
        cleaning_fee,
        extra_people: float_then_int("extra_people")?,
        availability_365: int("availability.availability_365")?,
        number_of_reviews: int("number_of_reviews")?,
        review_scores_rating,
        picture_url: text(raw, "images.picture_url").unwrap_or_default(),
        id,
    })
}

fn listing_id(raw: &RawRecord) -> Result<String, PipelineError> {
    let value = lookup(raw, "_id")
        .ok_or_else(|| PipelineError::parse("<unknown>", "_id", "<missing>"))?;

    match value {
        Value::Object(map) => map
            .get("$oid")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| PipelineError::parse("<unknown>", "_id", value)),
        other => scalar_text(other).ok_or_else(|| PipelineError::parse("<unknown>", "_id", other)),
    }
}

/// `address.country`, or "Unknown" when the address or its country is missing or blank.
fn country(raw: &RawRecord) -> String {
    lookup(raw, "address.country")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Follows a dotted path through nested objects. JSON `null` counts as absent.
fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(raw, |node, key| node.get(key))
        .filter(|v| !v.is_null())
}

fn text(raw: &Value, path: &str) -> Option<String> {
    lookup(raw, path).and_then(scalar_text)
}

fn text_or_unknown(raw: &Value, path: &str) -> String {
    text(raw, path)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Textual form of a numeric value: plain JSON numbers, numeric strings, and the
/// extended-JSON wrappers Mongo exports emit.
fn numeric_text(v: &Value) -> Option<String> {
    match v {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.trim().to_string()),
        Value::Object(map) => ["$numberDecimal", "$numberDouble", "$numberInt", "$numberLong"]
            .iter()
            .find_map(|k| map.get(*k))
            .and_then(|inner| match inner {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
        _ => None,
    }
}

/// Parses through a decimal and truncates toward zero.
fn decimal_to_int(v: &Value) -> Option<i64> {
    let text = numeric_text(v)?;
    let decimal = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()?;
    decimal.trunc().to_i64()
}

fn to_float(v: &Value) -> Option<f64> {
    let parsed: f64 = numeric_text(v)?.parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// Parses as floating point, then truncates toward zero.
fn float_to_int(v: &Value) -> Option<i64> {
    let truncated = to_float(v)?.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}
