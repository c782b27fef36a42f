use crate::router::handle;
use crate::tests::utils::{body_string, get, sample_session};

#[test]
fn home_page_loads_successfully() {
    let session = sample_session();

    let resp = handle(get("/"), &session).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Airbnb Data Visualization"));
    assert!(body.contains("href=\"/overview\""));
    assert!(body.contains("href=\"/explore\""));
}

#[test]
fn unknown_path_is_not_found() {
    let session = sample_session();

    assert!(matches!(
        handle(get("/admin"), &session),
        Err(crate::errors::ServerError::NotFound)
    ));
}

#[test]
fn linked_stylesheet_is_served() {
    let session = sample_session();

    let page = body_string(handle(get("/"), &session).expect("Failed to handle request"));
    assert!(page.contains("href=\"/static/main.css\""));

    let resp = handle(get("/static/main.css"), &session).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "text/css; charset=utf-8"
    );
    assert!(body_string(resp).contains(".topbar"));
}
