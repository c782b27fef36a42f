use crate::charts::{explore_charts, overview_charts};
use crate::domain::{Facet, FilterSelection, ListingTable};
use crate::errors::ServerError;
use crate::responses::{css_response, html_response, html_response_with_status, ResultResp, MAIN_CSS};
use crate::session::Session;
use crate::spreadsheets::export_listings_xlsx;
use crate::templates::pages::{self, DashboardVm};
use crate::templates::NavPage;
use astra::Request;
use chrono::Utc;
use std::collections::BTreeSet;
use tracing::debug;

const PREVIEW_ROWS: usize = 5;

type QueryParams = Vec<(String, String)>;

pub fn handle(req: Request, session: &Session) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let params = parse_query(&req);

    debug!(method, path, params = params.len(), "request");

    match (method, path) {
        ("GET", "/") => html_response(pages::home_page()),
        ("GET", "/overview") => dashboard(NavPage::Overview, &params, session),
        ("GET", "/explore") => dashboard(NavPage::Explore, &params, session),
        ("GET", "/export") => export(&params, session),
        ("GET", "/static/main.css") => css_response(MAIN_CSS),
        _ => Err(ServerError::NotFound),
    }
}

fn dashboard(page: NavPage, params: &QueryParams, session: &Session) -> ResultResp {
    let table = match session.table() {
        Ok(table) => table,
        Err(err) => return html_response_with_status(503, pages::unavailable_page(page, err)),
    };

    let selection = selection_from_query(params, table)?;
    let rows = selection.predicate().apply(table);

    let charts = match page {
        NavPage::Explore => explore_charts(&rows),
        _ => overview_charts(&rows),
    };

    let preview = (page == NavPage::Overview && single(params, "raw") == Some("1"))
        .then(|| rows.iter().take(PREVIEW_ROWS).copied().collect());

    let query = selection_query(&selection);
    let vm = DashboardVm {
        page,
        table,
        selection: &selection,
        matched: rows.len(),
        charts,
        preview,
        export_href: format!("/export?{query}"),
        raw_href: format!("{}?{query}&raw=1", page.href()),
        source: session.source(),
        loaded_at: session.loaded_at(),
    };

    html_response(pages::dashboard_page(&vm))
}

fn export(params: &QueryParams, session: &Session) -> ResultResp {
    let table = session.table().map_err(|e| ServerError::from(e.clone()))?;
    let selection = selection_from_query(params, table)?;
    let rows = selection.predicate().apply(table);

    let filename = format!("airbnb_listings_{}.xlsx", Utc::now().format("%Y%m%d"));
    export_listings_xlsx(&rows, &filename)
}

/// Decoded `key=value` pairs in order; repeated keys are kept.
fn parse_query(req: &Request) -> QueryParams {
    req.uri()
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

fn single<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Sidebar state from the query string.
///
/// Without `applied=1` an absent facet means every value and an absent price bound means
/// the table's bound. With it, an absent facet is an empty selection.
fn selection_from_query(
    params: &QueryParams,
    table: &ListingTable,
) -> Result<FilterSelection, ServerError> {
    let defaults = FilterSelection::everything(table);
    let applied = single(params, "applied") == Some("1");

    let facet = |facet: Facet| -> BTreeSet<String> {
        let name = facet.param();
        let chosen: BTreeSet<String> = params
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
            .collect();

        if chosen.is_empty() && !applied {
            defaults.selected(facet).clone()
        } else {
            chosen
        }
    };

    Ok(FilterSelection {
        countries: facet(Facet::Country),
        property_types: facet(Facet::PropertyType),
        room_types: facet(Facet::RoomType),
        price_min: price_param(params, "price_min", defaults.price_min)?,
        price_max: price_param(params, "price_max", defaults.price_max)?,
    })
}

fn price_param(params: &QueryParams, key: &str, default: i64) -> Result<i64, ServerError> {
    match single(params, key).map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ServerError::BadRequest(format!("{key} must be a whole number, got {raw:?}"))),
    }
}

/// Canonical query string for a selection, always carrying `applied=1`.
fn selection_query(selection: &FilterSelection) -> String {
    let mut out = url::form_urlencoded::Serializer::new(String::new());
    out.append_pair("applied", "1");
    for facet in [Facet::Country, Facet::PropertyType, Facet::RoomType] {
        for value in selection.selected(facet) {
            out.append_pair(facet.param(), value);
        }
    }
    out.append_pair("price_min", &selection.price_min.to_string());
    out.append_pair("price_max", &selection.price_max.to_string());
    out.finish()
}
