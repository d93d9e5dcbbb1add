use std::collections::{BTreeSet, HashMap};

use super::model::{SaleRecord, SalesDataset};

// ---------------------------------------------------------------------------
// Aggregation over a filtered view
// ---------------------------------------------------------------------------
//
// A "view" is the index vector produced by `filter::filtered_indices`.
// Every function here is pure and total: an empty view yields zero counts,
// zero sums and empty sequences rather than an error.

/// Calendar ordering of month names, as produced by the loader.
pub const MONTH_ORDER: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Number of records in the view.
pub fn transaction_count(view: &[usize]) -> usize {
    view.len()
}

/// Sum of `amount` over the view.
pub fn total_revenue(dataset: &SalesDataset, view: &[usize]) -> f64 {
    records(dataset, view).map(|r| r.amount).sum()
}

/// Sum of `boxes_shipped` over the view.
pub fn total_boxes(dataset: &SalesDataset, view: &[usize]) -> u64 {
    records(dataset, view)
        .map(|r| u64::from(r.boxes_shipped))
        .sum()
}

/// Count of distinct products in the view.
pub fn distinct_product_count(dataset: &SalesDataset, view: &[usize]) -> usize {
    records(dataset, view)
        .map(|r| r.product.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Top `k` products by summed revenue, descending. Ties keep the order the
/// products were first encountered in the view.
pub fn top_products_by_revenue(
    dataset: &SalesDataset,
    view: &[usize],
    k: usize,
) -> Vec<(String, f64)> {
    let mut groups = sum_amount_by(dataset, view, |r| r.product.as_str());
    sort_descending(&mut groups);
    groups.truncate(k);
    groups
}

/// Number of records per country, sorted descending by count.
pub fn count_by_country(dataset: &SalesDataset, view: &[usize]) -> Vec<(String, usize)> {
    let mut groups: Vec<(String, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for record in records(dataset, view) {
        match slots.get(record.country.as_str()) {
            Some(&slot) => groups[slot].1 += 1,
            None => {
                slots.insert(&record.country, groups.len());
                groups.push((record.country.clone(), 1));
            }
        }
    }

    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups
}

/// Summed revenue per country, sorted descending.
pub fn revenue_by_country(dataset: &SalesDataset, view: &[usize]) -> Vec<(String, f64)> {
    let mut groups = sum_amount_by(dataset, view, |r| r.country.as_str());
    sort_descending(&mut groups);
    groups
}

/// Summed revenue per sales person, sorted descending.
pub fn revenue_by_sales_person(dataset: &SalesDataset, view: &[usize]) -> Vec<(String, f64)> {
    let mut groups = sum_amount_by(dataset, view, |r| r.sales_person.as_str());
    sort_descending(&mut groups);
    groups
}

/// Summed revenue per month, in the caller-supplied calendar order.
/// Months with no matching records report 0 so the trend axis stays stable.
pub fn monthly_revenue(
    dataset: &SalesDataset,
    view: &[usize],
    month_order: &[&str],
) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for record in records(dataset, view) {
        *totals.entry(record.month.as_str()).or_default() += record.amount;
    }

    month_order
        .iter()
        .map(|&month| (month.to_string(), totals.get(month).copied().unwrap_or(0.0)))
        .collect()
}

// -- helpers --

fn records<'a>(
    dataset: &'a SalesDataset,
    view: &'a [usize],
) -> impl Iterator<Item = &'a SaleRecord> + 'a {
    view.iter().map(|&i| &dataset.records[i])
}

/// Group by a key and sum `amount`, keeping first-encountered group order.
fn sum_amount_by<'a, F>(dataset: &'a SalesDataset, view: &[usize], key: F) -> Vec<(String, f64)>
where
    F: Fn(&'a SaleRecord) -> &'a str,
{
    let mut groups: Vec<(String, f64)> = Vec::new();
    let mut slots: HashMap<&'a str, usize> = HashMap::new();

    for &i in view {
        let record = &dataset.records[i];
        let k = key(record);
        match slots.get(k) {
            Some(&slot) => groups[slot].1 += record.amount,
            None => {
                slots.insert(k, groups.len());
                groups.push((k.to_string(), record.amount));
            }
        }
    }

    groups
}

/// Stable descending sort, so equal totals keep first-encountered order.
fn sort_descending(groups: &mut [(String, f64)]) {
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
}
