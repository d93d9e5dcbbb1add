use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::model::{SaleRecord, SalesDataset};

/// Date format of the source file, e.g. `04-Jan-22`.
const DATE_FORMAT: &str = "%d-%b-%y";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A failed dataset load. Any bad row fails the whole load; the dataset
/// never materializes partially.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    Unsupported(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("row {row}: date '{value}' does not match the dd-Mon-yy format")]
    DateParse { row: usize, value: String },
    #[error("row {row}: amount '{value}' is not a valid currency value")]
    AmountParse { row: usize, value: String },
    #[error("row {row}: boxes shipped '{value}' is not a non-negative integer")]
    BoxesParse { row: usize, value: String },
    #[error("row {row}: boxes shipped is zero, price per box is undefined")]
    ZeroBoxes { row: usize },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sales dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the `Sales Person`, `Country`, `Product`,
///   `Date`, `Amount`, `Boxes Shipped` columns
/// * `.json` – records-oriented array of objects with the same keys
pub fn load_file(path: &Path) -> Result<SalesDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(LoadError::Unsupported(other.to_string())),
    }
}

fn load_csv(path: &Path) -> Result<SalesDataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file)
}

fn load_json(path: &Path) -> Result<SalesDataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_json(&text)
}

// ---------------------------------------------------------------------------
// Raw row → SaleRecord
// ---------------------------------------------------------------------------

/// One row as it appears in the source, before cleaning.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Sales Person")]
    sales_person: String,
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Boxes Shipped")]
    boxes_shipped: u32,
}

/// Clean and coerce a raw row, computing the derived columns.
fn coerce(row: usize, raw: RawRecord) -> Result<SaleRecord, LoadError> {
    let date = parse_date(row, &raw.date)?;
    let amount = parse_amount(row, &raw.amount)?;

    if raw.boxes_shipped == 0 {
        return Err(LoadError::ZeroBoxes { row });
    }
    let price_per_box = round2(amount / f64::from(raw.boxes_shipped));

    Ok(SaleRecord {
        sales_person: raw.sales_person.trim().to_string(),
        country: raw.country.trim().to_string(),
        product: raw.product.trim().to_string(),
        month: date.format("%B").to_string(),
        date,
        amount,
        boxes_shipped: raw.boxes_shipped,
        price_per_box,
    })
}

fn parse_date(row: usize, raw: &str) -> Result<NaiveDate, LoadError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| LoadError::DateParse {
        row,
        value: raw.to_string(),
    })
}

/// Strip `$` and thousands separators, then parse as a non-negative decimal.
fn parse_amount(row: usize, raw: &str) -> Result<f64, LoadError> {
    let err = || LoadError::AmountParse {
        row,
        value: raw.to_string(),
    };

    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let amount: f64 = cleaned.trim().parse().map_err(|_| err())?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(err());
    }
    Ok(amount)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Parse CSV sales data from any reader. Column order is free; the required
/// columns are located by header name.
pub fn read_csv<R: Read>(input: R) -> Result<SalesDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();

    let column = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(LoadError::MissingColumn(name))
    };

    let person_idx = column("Sales Person")?;
    let country_idx = column("Country")?;
    let product_idx = column("Product")?;
    let date_idx = column("Date")?;
    let amount_idx = column("Amount")?;
    let boxes_idx = column("Boxes Shipped")?;

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("").to_string();

        let boxes_raw = field(boxes_idx);
        let boxes_shipped: u32 = boxes_raw.trim().parse().map_err(|_| LoadError::BoxesParse {
            row,
            value: boxes_raw.clone(),
        })?;

        let raw = RawRecord {
            sales_person: field(person_idx),
            country: field(country_idx),
            product: field(product_idx),
            date: field(date_idx),
            amount: field(amount_idx),
            boxes_shipped,
        };
        records.push(coerce(row, raw)?);
    }

    Ok(SalesDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Parse records-oriented JSON (the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Sales Person": "Van Tuxwell",
///     "Country": "UK",
///     "Product": "Milk Bars",
///     "Date": "04-Jan-22",
///     "Amount": "$1,234.50",
///     "Boxes Shipped": 180
///   },
///   ...
/// ]
/// ```
pub fn read_json(text: &str) -> Result<SalesDataset, LoadError> {
    let raw_records: Vec<RawRecord> = serde_json::from_str(text)?;

    let records = raw_records
        .into_iter()
        .enumerate()
        .map(|(row, raw)| coerce(row, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SalesDataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_fixture() -> String {
        let mut out = String::from("Sales Person,Country,Product,Date,Amount,Boxes Shipped\n");
        out.push_str("Van Tuxwell,UK,Milk Bars,04-Jan-22,\"$5,320\",180\n");
        out.push_str("Gigi Bohling,India,85% Dark Bars,01-Aug-22,$7.32,94\n");
        out.push_str("Jan Morforth,Australia,Mint Chip Choco,17-Mar-22,\"$1,234.50\",50\n");
        out
    }

    #[test]
    fn loads_and_cleans_csv() {
        let ds = read_csv(csv_fixture().as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);

        let first = &ds.records[0];
        assert_eq!(first.sales_person, "Van Tuxwell");
        assert_eq!(first.amount, 5320.0);
        assert_eq!(first.month, "January");
        assert_eq!(first.boxes_shipped, 180);
        assert_eq!(first.price_per_box, 29.56);

        let last = &ds.records[2];
        assert_eq!(last.amount, 1234.50);
        assert_eq!(last.month, "March");
        assert_eq!(last.price_per_box, 24.69);
    }

    #[test]
    fn currency_coercion() {
        assert_eq!(parse_amount(0, "$1,234.50").unwrap(), 1234.50);
        assert_eq!(parse_amount(0, " $5,320 ").unwrap(), 5320.0);
        assert_eq!(parse_amount(0, "12.5").unwrap(), 12.5);
    }

    #[test]
    fn bad_amounts_are_rejected() {
        assert!(matches!(
            parse_amount(3, "chocolate"),
            Err(LoadError::AmountParse { row: 3, .. })
        ));
        assert!(matches!(
            parse_amount(0, "-$10.00"),
            Err(LoadError::AmountParse { .. })
        ));
        assert!(matches!(
            parse_amount(0, "$"),
            Err(LoadError::AmountParse { .. })
        ));
    }

    #[test]
    fn date_parsing() {
        let date = parse_date(0, "04-Jan-22").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2022, 1, 4).unwrap());
        assert_eq!(date.format("%B").to_string(), "January");

        assert!(matches!(
            parse_date(1, "2022-01-04"),
            Err(LoadError::DateParse { row: 1, .. })
        ));
    }

    #[test]
    fn missing_column_fails_load() {
        let csv = "Sales Person,Country,Date,Amount,Boxes Shipped\n";
        assert!(matches!(
            read_csv(csv.as_bytes()),
            Err(LoadError::MissingColumn("Product"))
        ));
    }

    #[test]
    fn zero_boxes_is_an_error() {
        let mut csv = String::from("Sales Person,Country,Product,Date,Amount,Boxes Shipped\n");
        csv.push_str("Van Tuxwell,UK,Milk Bars,04-Jan-22,$100,0\n");
        assert!(matches!(
            read_csv(csv.as_bytes()),
            Err(LoadError::ZeroBoxes { row: 0 })
        ));
    }

    #[test]
    fn any_bad_row_fails_the_whole_load() {
        let mut csv = String::from("Sales Person,Country,Product,Date,Amount,Boxes Shipped\n");
        csv.push_str("Van Tuxwell,UK,Milk Bars,04-Jan-22,$100,10\n");
        csv.push_str("Gigi Bohling,India,White Choc,not-a-date,$50,5\n");
        assert!(matches!(
            read_csv(csv.as_bytes()),
            Err(LoadError::DateParse { row: 1, .. })
        ));
    }

    #[test]
    fn price_per_box_is_rounded_to_cents() {
        let mut csv = String::from("Sales Person,Country,Product,Date,Amount,Boxes Shipped\n");
        csv.push_str("Van Tuxwell,UK,Milk Bars,04-Jan-22,$100,3\n");
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.records[0].price_per_box, 33.33);
    }

    #[test]
    fn loads_records_oriented_json() {
        let json = r#"[
            {
                "Sales Person": "Van Tuxwell",
                "Country": "UK",
                "Product": "Milk Bars",
                "Date": "04-Jan-22",
                "Amount": "$5,320",
                "Boxes Shipped": 180
            }
        ]"#;
        let ds = read_json(json).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].amount, 5320.0);
        assert_eq!(ds.records[0].month, "January");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("sales.parquet")).unwrap_err();
        assert!(matches!(err, LoadError::Unsupported(ext) if ext == "parquet"));
    }
}
