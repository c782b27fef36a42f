use crate::domain::PipelineError;
use crate::errors::ServerError;
use crate::router::handle;
use crate::session::Session;
use crate::tests::utils::{body_string, get, sample_session};

#[test]
fn overview_defaults_to_every_listing() {
    let session = sample_session();

    let resp = handle(get("/overview"), &session).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<strong>6</strong> of 6 listings"));
    assert!(body.contains("Top 10 Property Types"));
    assert!(body.contains("Top 10 Hosts with Highest number of Listings"));
    assert!(body.contains("Total Listings in each Room_types"));
    assert!(body.contains("Total Listings in each Country"));
    assert!(body.contains("Data loaded from in-memory at "));
    // The listing without an address is grouped under "Unknown".
    assert!(body.contains("<option value=\"Unknown\" selected>Unknown</option>"));
}

#[test]
fn overview_filters_by_country_and_price() {
    let session = sample_session();

    let resp = handle(
        get("/overview?applied=1&country=Brazil&property_type=apartment\
             &room_type=Entire+home%2Fapt&room_type=Private+room&price_min=20&price_max=100"),
        &session,
    )
    .expect("Handler failed");

    let body = body_string(resp);
    // 119 is above the range; 25 (from "25.90") is inside it.
    assert!(body.contains("<strong>1</strong> of 6 listings"));
}

#[test]
fn deselecting_every_country_renders_empty_charts() {
    let session = sample_session();

    let resp = handle(get("/explore?applied=1&property_type=house"), &session)
        .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<strong>0</strong> of 6 listings"));
    assert!(body.contains("No listings match the current filters."));
    assert!(!body.contains("class=\"chart\""));
}

#[test]
fn explore_renders_price_and_availability_charts() {
    let session = sample_session();

    let body = body_string(handle(get("/explore"), &session).expect("Handler failed"));

    assert!(body.contains("Avg Price in each Room type"));
    assert!(body.contains("Availability by Room_type"));
    assert!(body.contains("Avg Price in each Country"));
    assert!(body.contains("Avg Availability in each Country"));
    assert!(body.contains("class=\"chart\""));
}

#[test]
fn raw_view_lists_first_rows() {
    let session = sample_session();

    let body = body_string(handle(get("/overview?raw=1"), &session).expect("Handler failed"));

    assert!(body.contains("listing-table"));
    assert!(body.contains("10006546"));
    assert!(body.contains("<th>review_scores_rating</th>"));
    assert!(body.contains("<td>94</td>"));
    assert!(body.contains("<td>4</td>"));
    assert!(body.contains("href=\"https://a0.muscache.com/im/pictures/10006546.jpg\""));
    // Only the first five rows are shown.
    assert!(!body.contains(">10051164<"));
}

#[test]
fn malformed_price_is_rejected() {
    let session = sample_session();

    assert!(matches!(
        handle(get("/overview?price_max=lots"), &session),
        Err(ServerError::BadRequest(_))
    ));
}

#[test]
fn failed_load_shows_explicit_error_state() {
    let session = Session::from_error(PipelineError::SchemaMismatch(
        "availability_365 missing".into(),
    ));

    let resp = handle(get("/overview"), &session).expect("Handler failed");
    assert_eq!(resp.status(), 503);

    let body = body_string(resp);
    assert!(body.contains("No data to show"));
    assert!(body.contains("availability_365 missing"));
}
