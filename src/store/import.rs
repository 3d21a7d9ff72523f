use std::io::Read;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::debug;

use crate::error::{Result, WellbeingError};

use super::entities::UsageRecord;

const COLUMNS: [&str; 4] = ["date", "app", "minutes", "category"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column positions of a csv file, columns can come in any order as long as all of them exist.
struct Layout {
    date: usize,
    app: usize,
    minutes: usize,
    category: usize,
}

impl Layout {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|v| v.trim() == name)
                .ok_or_else(|| WellbeingError::InvalidRecord {
                    row: 0,
                    field: name.into(),
                    reason: format!("missing column, expected columns {}", COLUMNS.join(",")),
                })
        };
        Ok(Self {
            date: position("date")?,
            app: position("app")?,
            minutes: position("minutes")?,
            category: position("category")?,
        })
    }
}

/// Reads a whole csv batch with `date,app,minutes,category` columns. The first malformed row
/// fails the whole batch, so either every row is imported or none.
pub fn read_csv(reader: impl Read) -> Result<Vec<UsageRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers().map_err(|e| csv_error(0, e))?.clone();
    let layout = Layout::from_headers(&headers)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row_number = index + 1;
        let row = row.map_err(|e| csv_error(row_number, e))?;
        records.push(parse_row(row_number, &layout, &row)?);
    }
    debug!("Parsed {} records from csv", records.len());
    Ok(records)
}

fn parse_row(row_number: usize, layout: &Layout, row: &StringRecord) -> Result<UsageRecord> {
    let invalid = |field: &str, reason: String| WellbeingError::InvalidRecord {
        row: row_number,
        field: field.into(),
        reason,
    };
    let field = |index: usize| row.get(index).unwrap_or_default();

    let date = NaiveDate::parse_from_str(field(layout.date), DATE_FORMAT)
        .map_err(|e| invalid("date", format!("`{}` is not a YYYY-MM-DD date: {e}", field(layout.date))))?;
    let app = field(layout.app);
    if app.is_empty() {
        return Err(invalid("app", "app name can't be empty".into()));
    }
    let minutes = field(layout.minutes).parse::<u32>().map_err(|e| {
        invalid(
            "minutes",
            format!("`{}` is not a non-negative whole number: {e}", field(layout.minutes)),
        )
    })?;

    Ok(UsageRecord::new(date, app, minutes, field(layout.category)))
}

fn csv_error(row: usize, error: csv::Error) -> WellbeingError {
    WellbeingError::InvalidRecord {
        row,
        field: "row".into(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{error::WellbeingError, store::entities::UsageRecord};

    use super::read_csv;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_read_valid_batch() {
        let data = "date,app,minutes,category\n\
                    2024-01-01,Slack,45,Communication\n\
                    2024-01-02, Figma ,120,Productivity\n";

        let records = read_csv(data.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                UsageRecord::new(date(1), "Slack", 45, "Communication"),
                UsageRecord::new(date(2), "Figma", 120, "Productivity"),
            ]
        );
    }

    #[test]
    fn test_columns_in_any_order() {
        let data = "app,category,date,minutes\nSlack,Communication,2024-01-03,5\n";

        let records = read_csv(data.as_bytes()).unwrap();

        assert_eq!(records, vec![UsageRecord::new(date(3), "Slack", 5, "Communication")]);
    }

    #[test]
    fn test_header_only_is_empty_batch() {
        assert!(read_csv("date,app,minutes,category\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_bad_minutes_names_row_and_field() {
        let data = "date,app,minutes,category\n\
                    2024-01-01,Slack,45,Communication\n\
                    2024-01-02,Figma,a lot,Productivity\n";

        let result = read_csv(data.as_bytes());

        assert!(matches!(
            result,
            Err(WellbeingError::InvalidRecord { row: 2, ref field, .. }) if field == "minutes"
        ));
    }

    #[test]
    fn test_negative_minutes_rejected() {
        let data = "date,app,minutes,category\n2024-01-01,Slack,-5,Communication\n";

        let result = read_csv(data.as_bytes());

        assert!(matches!(
            result,
            Err(WellbeingError::InvalidRecord { row: 1, ref field, .. }) if field == "minutes"
        ));
    }

    #[test]
    fn test_bad_date_rejected() {
        let data = "date,app,minutes,category\n01/02/2024,Slack,5,Communication\n";

        let result = read_csv(data.as_bytes());

        assert!(matches!(
            result,
            Err(WellbeingError::InvalidRecord { row: 1, ref field, .. }) if field == "date"
        ));
    }

    #[test]
    fn test_missing_column_rejected() {
        let data = "date,app,category\n2024-01-01,Slack,Communication\n";

        let result = read_csv(data.as_bytes());

        assert!(matches!(
            result,
            Err(WellbeingError::InvalidRecord { row: 0, ref field, .. }) if field == "minutes"
        ));
    }
}
