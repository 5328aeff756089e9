use std::collections::HashMap;
use std::str::FromStr;

use csv::StringRecord;
use rust_decimal::Decimal;

use crate::{ImporterError, Result};

const REQUIRED_HEADERS: &[&str] = &["name", "cnic", "phone", "ticketprice", "category", "game"];

/// One player row of an import file, with names not yet resolved to ids.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRow {
    /// 1-based data row number, header excluded.
    pub row: usize,
    pub name: String,
    pub cnic: String,
    pub phone: String,
    pub email: Option<String>,
    pub ticket_price: Decimal,
    pub category: String,
    pub game: String,
}

/// Parse a `name,cnic,phone,email,ticketPrice,category,game` CSV payload.
///
/// Headers match case-insensitively and in any order; `email` may be absent.
/// The whole payload is rejected on the first malformed row, so callers can
/// parse before touching the database.
pub fn parse_players(bytes: &[u8]) -> Result<Vec<PlayerRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let header_map = map_headers(&headers)?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(parse_row(idx + 1, &record, &header_map)?);
    }

    Ok(rows)
}

fn map_headers(headers: &StringRecord) -> Result<HashMap<String, usize>> {
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, h)| (h.trim_start_matches('\u{feff}').trim().to_lowercase(), idx))
        .collect();

    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|h| !header_map.contains_key(*h))
        .collect();

    if !missing.is_empty() {
        return Err(ImporterError::ParseError(format!(
            "Missing required headers: {}",
            missing.join(", ")
        )));
    }

    Ok(header_map)
}

fn parse_row(
    row: usize,
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<PlayerRow> {
    let field = |name: &str| -> Option<String> {
        header_map
            .get(name)
            .and_then(|&idx| record.get(idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let required = |name: &str| -> Result<String> {
        field(name).ok_or_else(|| {
            ImporterError::ParseError(format!("row {row}: {name} is missing or empty"))
        })
    };

    let price = required("ticketprice")?;
    let ticket_price = Decimal::from_str(&price).map_err(|_| {
        ImporterError::ParseError(format!("row {row}: ticketPrice '{price}' is not a number"))
    })?;
    if ticket_price.is_sign_negative() {
        return Err(ImporterError::ParseError(format!(
            "row {row}: ticketPrice '{price}' is negative"
        )));
    }

    Ok(PlayerRow {
        row,
        name: required("name")?,
        cnic: required("cnic")?,
        phone: required("phone")?,
        email: field("email"),
        ticket_price,
        category: required("category")?,
        game: required("game")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_rows_in_order() {
        let csv = "name,cnic,phone,email,ticketPrice,category,game\n\
                   Ali,12345,0300,ali@example.com,500,Chess,Indoor Games\n\
                   Sara,67890,0311,,250.50,Cricket,Tape Ball\n";

        let rows = parse_players(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ali");
        assert_eq!(rows[0].email.as_deref(), Some("ali@example.com"));
        assert_eq!(rows[0].ticket_price, Decimal::from(500));
        assert_eq!(rows[1].row, 2);
        assert_eq!(rows[1].email, None);
        assert_eq!(rows[1].ticket_price, Decimal::from_str("250.50").unwrap());
    }

    #[test]
    fn test_headers_are_case_insensitive_and_reorderable() {
        let csv = " Game , CATEGORY,TicketPrice,Phone,CNIC,Name\n\
                   Indoor Games, Chess ,100,0300,12345,Ali\n";

        let rows = parse_players(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].category, "Chess");
        assert_eq!(rows[0].game, "Indoor Games");
        assert_eq!(rows[0].email, None);
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let csv = "\u{feff}name,cnic,phone,ticketPrice,category,game\nAli,1,2,3,Chess,Indoor\n";

        assert_eq!(parse_players(csv.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let csv = "name,cnic,phone,category,game\nAli,12345,0300,Chess,Indoor Games\n";

        let err = parse_players(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("ticketprice"));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let csv = "name,cnic,phone,ticketPrice,category,game\n\
                   Ali,12345,0300,100,Chess,Indoor Games\n\
                   Sara,,0311,100,Chess,Indoor Games\n";

        let err = parse_players(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImporterError::ParseError(ref m) if m.contains("row 2") && m.contains("cnic")));
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        let csv = "name,cnic,phone,ticketPrice,category,game\nAli,12345,0300,free,Chess,Indoor\n";

        assert!(matches!(
            parse_players(csv.as_bytes()),
            Err(ImporterError::ParseError(_))
        ));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let csv = "name,cnic,phone,ticketPrice,category,game\nAli,12345,0300,-1,Chess,Indoor\n";

        assert!(parse_players(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let csv = "name,cnic,phone,ticketPrice,category,game\n";

        assert!(parse_players(csv.as_bytes()).unwrap().is_empty());
    }
}
