use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Dimension – the categorical columns a user can filter on
// ---------------------------------------------------------------------------

/// A filterable categorical column of the sales table.
///
/// The set of dimensions is a fixed, enumerated configuration rather than
/// something discovered from the file at runtime; the loader still validates
/// that the matching columns exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    SalesPerson,
    Country,
    Product,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::SalesPerson,
        Dimension::Country,
        Dimension::Product,
    ];

    /// Column header as it appears in the source file and the UI.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::SalesPerson => "Sales Person",
            Dimension::Country => "Country",
            Dimension::Product => "Product",
        }
    }

    /// The record's value for this dimension.
    pub fn value_of(self, record: &SaleRecord) -> &str {
        match self {
            Dimension::SalesPerson => &record.sales_person,
            Dimension::Country => &record.country,
            Dimension::Product => &record.product,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SaleRecord – one row of the sales table
// ---------------------------------------------------------------------------

/// A single sale transaction. Created once by the loader, immutable after.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub sales_person: String,
    pub country: String,
    pub product: String,
    pub date: NaiveDate,
    /// Full month name derived from `date`, e.g. "January".
    pub month: String,
    /// Cleaned currency amount. Non-negative.
    pub amount: f64,
    pub boxes_shipped: u32,
    /// `amount / boxes_shipped`, rounded to 2 decimal places.
    pub price_per_box: f64,
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed per-dimension value sets.
/// Loaded once per session and read-only afterwards.
#[derive(Debug, Clone)]
pub struct SalesDataset {
    /// All records, in source-file order.
    pub records: Vec<SaleRecord>,
    /// For each dimension the sorted set of distinct values.
    pub unique_values: BTreeMap<Dimension, BTreeSet<String>>,
}

impl SalesDataset {
    /// Build the per-dimension value index from the loaded records.
    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        let mut unique_values: BTreeMap<Dimension, BTreeSet<String>> = BTreeMap::new();

        for dim in Dimension::ALL {
            let values = records
                .iter()
                .map(|r| dim.value_of(r).to_string())
                .collect();
            unique_values.insert(dim, values);
        }

        SalesDataset {
            records,
            unique_values,
        }
    }

    /// Distinct values present for a dimension, sorted.
    pub fn available_values(&self, dim: Dimension) -> &BTreeSet<String> {
        // `from_records` inserts every dimension, so the entry always exists.
        &self.unique_values[&dim]
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(person: &str, country: &str, product: &str, amount: f64) -> SaleRecord {
        let date = NaiveDate::from_ymd_opt(2022, 1, 4).unwrap();
        SaleRecord {
            sales_person: person.to_string(),
            country: country.to_string(),
            product: product.to_string(),
            date,
            month: "January".to_string(),
            amount,
            boxes_shipped: 10,
            price_per_box: (amount / 10.0 * 100.0).round() / 100.0,
        }
    }

    #[test]
    fn unique_values_are_sorted_and_deduplicated() {
        let ds = SalesDataset::from_records(vec![
            record("Van", "UK", "Milk Bars", 100.0),
            record("Gigi", "India", "Milk Bars", 50.0),
            record("Van", "UK", "White Choc", 30.0),
        ]);

        let people: Vec<&String> = ds.available_values(Dimension::SalesPerson).iter().collect();
        assert_eq!(people, ["Gigi", "Van"]);

        let products: Vec<&String> = ds.available_values(Dimension::Product).iter().collect();
        assert_eq!(products, ["Milk Bars", "White Choc"]);
    }

    #[test]
    fn empty_dataset_has_empty_value_sets() {
        let ds = SalesDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        for dim in Dimension::ALL {
            assert!(ds.available_values(dim).is_empty());
        }
    }
}
