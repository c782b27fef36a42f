use serde_json::{Map, Value};

/// The fields requested from the document store, Mongo-style (`field: 1`).
///
/// Dotted entries select a nested sub-field and keep the nesting in the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<String>,
}

impl Projection {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// The fixed field list the dashboard works from.
    pub fn listing_fields() -> Self {
        Self::new([
            "_id",
            "listing_url",
            "name",
            "property_type",
            "room_type",
            "bed_type",
            "minimum_nights",
            "maximum_nights",
            "cancellation_policy",
            "accommodates",
            "bedrooms",
            "beds",
            "number_of_reviews",
            "bathrooms",
            "price",
            "cleaning_fee",
            "extra_people",
            "guests_included",
            "address",
            "country",
            "images.picture_url",
            "review_scores.review_scores_rating",
            "availability",
            "host.host_name",
        ])
    }

    /// `{ "field": 1, ... }` as sent to a Mongo-compatible endpoint.
    pub fn to_document(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.clone(), Value::from(1)))
            .collect();
        Value::Object(map)
    }

    /// Keep only the projected fields of `doc`. Non-object documents project to `{}`.
    pub fn apply(&self, doc: &Value) -> Value {
        let mut out = Map::new();
        for field in &self.fields {
            let path: Vec<&str> = field.split('.').collect();
            if let Some(value) = path.iter().try_fold(doc, |node, key| node.get(*key)) {
                insert_path(&mut out, &path, value.clone());
            }
        }
        Value::Object(out)
    }
}

fn insert_path(out: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [last] => {
            out.insert(last.to_string(), value);
        }
        [head, rest @ ..] => {
            let child = out
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child) = child {
                insert_path(child, rest, value);
            }
        }
    }
}
