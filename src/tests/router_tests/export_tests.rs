use crate::domain::PipelineError;
use crate::errors::ServerError;
use crate::router::handle;
use crate::session::Session;
use crate::tests::utils::{get, sample_session};

#[test]
fn export_returns_workbook_attachment() {
    let session = sample_session();

    let resp = handle(get("/export?country=Brazil"), &session).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let headers = resp.headers();
    assert_eq!(
        headers.get("Content-Type").unwrap().to_str().unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = headers.get("Content-Disposition").unwrap().to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"airbnb_listings_"));
    assert!(disposition.ends_with(".xlsx\""));
}

#[test]
fn export_without_data_is_unavailable() {
    let session = Session::from_error(PipelineError::SourceUnavailable("timeout".into()));

    assert!(matches!(
        handle(get("/export"), &session),
        Err(ServerError::Unavailable(_))
    ));
}
