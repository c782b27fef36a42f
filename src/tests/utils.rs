use crate::domain::{normalize, ListingTable};
use crate::session::Session;
use astra::{Body, Response};
use serde_json::{json, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A unique path under the system temp dir, removed (with any SQLite journal) on drop.
pub struct TempPath(PathBuf);

impl TempPath {
    pub fn new(prefix: &str, ext: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let name = format!("{prefix}_{}_{nanos}_{n}.{ext}", std::process::id());
        TempPath(std::env::temp_dir().join(name))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
        let mut journal = self.0.clone().into_os_string();
        journal.push("-journal");
        let _ = std::fs::remove_file(journal);
    }
}

fn doc(id: &str, country: Option<&str>, property_type: &str, room_type: &str, price: &str) -> Value {
    let mut d = json!({
        "_id": id,
        "listing_url": format!("https://www.airbnb.com/rooms/{id}"),
        "name": format!("Listing {id}"),
        "property_type": property_type,
        "room_type": room_type,
        "bed_type": "Real Bed",
        "minimum_nights": "2",
        "maximum_nights": "1125",
        "cancellation_policy": "flexible",
        "accommodates": 2,
        "bedrooms": 1,
        "beds": 1,
        "number_of_reviews": 4,
        "bathrooms": { "$numberDecimal": "1.0" },
        "price": { "$numberDecimal": price },
        "extra_people": { "$numberDecimal": "0.00" },
        "guests_included": { "$numberDecimal": "1" },
        "availability": { "availability_365": 120 },
        "review_scores": { "review_scores_rating": 94 },
        "images": { "picture_url": format!("https://a0.muscache.com/im/pictures/{id}.jpg") },
        "host": { "host_name": format!("Host {}", &id[..1]) }
    });
    if let Some(country) = country {
        d["address"] = json!({ "country": country });
    }
    d
}

/// Six raw documents covering several countries, types and price points.
pub fn sample_documents() -> Vec<Value> {
    vec![
        doc("10006546", Some("Portugal"), "House", "Entire home/apt", "80.00"),
        doc("10009999", Some("Brazil"), "Apartment", "Entire home/apt", "119.00"),
        doc("10021707", Some("United States"), "Apartment", "Private room", "40.00"),
        doc("10038496", Some("Brazil"), "Apartment", "Private room", "25.90"),
        doc("10047964", Some("Spain"), "Loft", "Shared room", "30.00"),
        doc("10051164", None, "Bed and breakfast", "Private room", "250.00"),
    ]
}

pub fn sample_table() -> ListingTable {
    ListingTable::new(normalize(&sample_documents()).expect("sample documents normalize"))
}

pub fn sample_session() -> Session {
    Session::from_table(sample_table())
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn get(uri: &str) -> astra::Request {
    http::Request::builder()
        .method(http::Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn temp_path_is_removed_on_drop() {
    let file = TempPath::new("cleanup", "json");
    std::fs::write(file.path(), "[]").unwrap();
    let path = file.path().to_path_buf();
    assert!(path.exists());

    drop(file);
    assert!(!path.exists());
}
