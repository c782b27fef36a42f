use crate::domain::listing::NOT_SPECIFIED;
use crate::domain::ListingRecord;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

const HEADERS: [&str; 23] = [
    "id",
    "name",
    "listing_url",
    "country",
    "property_type",
    "room_type",
    "bed_type",
    "cancellation_policy",
    "host_name",
    "minimum_nights",
    "maximum_nights",
    "accommodates",
    "bedrooms",
    "beds",
    "bathrooms",
    "guests_included",
    "price",
    "cleaning_fee",
    "extra_people",
    "availability_365",
    "number_of_reviews",
    "review_scores_rating",
    "picture_url",
];

fn xlsx_err(what: &str) -> impl Fn(XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

/// Build the workbook for a filtered listing view.
pub fn listings_workbook(listings: &[&ListingRecord]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("listings").map_err(xlsx_err("sheet name"))?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(xlsx_err(header))?;
    }

    for (i, listing) in listings.iter().enumerate() {
        write_row(worksheet, (i + 1) as u32, listing)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

fn write_row(ws: &mut Worksheet, r: u32, l: &ListingRecord) -> Result<(), ServerError> {
    let texts = [
        &l.id,
        &l.name,
        &l.listing_url,
        &l.country,
        &l.property_type,
        &l.room_type,
        &l.bed_type,
        &l.cancellation_policy,
        &l.host_name,
    ];
    for (col, value) in texts.iter().enumerate() {
        ws.write_string(r, col as u16, value.as_str())
            .map_err(xlsx_err(HEADERS[col]))?;
    }

    let numbers = [
        l.minimum_nights as f64,
        l.maximum_nights as f64,
        l.accommodates as f64,
        l.bedrooms as f64,
        l.beds as f64,
        l.bathrooms,
        l.guests_included as f64,
        l.price as f64,
    ];
    let offset = texts.len();
    for (i, value) in numbers.iter().enumerate() {
        ws.write_number(r, (offset + i) as u16, *value)
            .map_err(xlsx_err(HEADERS[offset + i]))?;
    }

    let fee_col = (offset + numbers.len()) as u16;
    let fee = match l.cleaning_fee.amount() {
        Some(n) => ws.write_number(r, fee_col, n as f64),
        None => ws.write_string(r, fee_col, NOT_SPECIFIED),
    };
    fee.map_err(xlsx_err("cleaning_fee"))?;

    ws.write_number(r, fee_col + 1, l.extra_people as f64)
        .map_err(xlsx_err("extra_people"))?;
    ws.write_number(r, fee_col + 2, l.availability_365 as f64)
        .map_err(xlsx_err("availability_365"))?;
    ws.write_number(r, fee_col + 3, l.number_of_reviews as f64)
        .map_err(xlsx_err("number_of_reviews"))?;

    // Unrated listings leave the cell blank.
    if let Some(rating) = l.review_scores_rating {
        ws.write_number(r, fee_col + 4, rating as f64)
            .map_err(xlsx_err("review_scores_rating"))?;
    }
    ws.write_string(r, fee_col + 5, &l.picture_url)
        .map_err(xlsx_err("picture_url"))?;

    Ok(())
}

pub fn export_listings_xlsx(listings: &[&ListingRecord], filename: &str) -> ResultResp {
    let buffer = listings_workbook(listings)?;
    xlsx_response(buffer, filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::fixtures::listing;

    #[test]
    fn workbook_is_a_zip_container() {
        let data = vec![listing("1", "Spain", "house", "Private room", 80)];
        let rows: Vec<_> = data.iter().collect();

        let bytes = listings_workbook(&rows).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn row_columns_line_up_with_headers() {
        let mut rated = listing("1", "Spain", "house", "Private room", 80);
        rated.review_scores_rating = Some(93);
        rated.number_of_reviews = 12;
        rated.picture_url = "https://a0.muscache.com/im/pictures/1.jpg".into();
        let unrated = listing("2", "Spain", "house", "Private room", 60);
        let rows = vec![&rated, &unrated];

        assert_eq!(HEADERS[20], "number_of_reviews");
        assert_eq!(HEADERS[21], "review_scores_rating");
        assert_eq!(HEADERS[22], "picture_url");
        assert!(listings_workbook(&rows).unwrap().starts_with(b"PK"));
    }

    #[test]
    fn empty_view_still_exports_headers() {
        assert!(listings_workbook(&[]).unwrap().len() > 0);
    }
}
