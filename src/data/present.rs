use super::aggregate;
use super::model::SalesDataset;

// ---------------------------------------------------------------------------
// Chart-ready shapes handed to the rendering layer
// ---------------------------------------------------------------------------

/// One labelled value of a chart series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesEntry {
    pub label: String,
    pub value: f64,
}

impl SeriesEntry {
    fn new(label: String, value: f64) -> Self {
        SeriesEntry { label, value }
    }
}

/// The four headline metrics shown above the charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub transactions: usize,
    pub total_revenue: f64,
    pub total_boxes: u64,
    pub distinct_products: usize,
}

/// What the dashboard displays, as explicit configuration.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// How many products the top-products chart shows.
    pub top_k: usize,
    /// Months of the revenue trend, in display order.
    pub months: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            top_k: 5,
            months: aggregate::MONTH_ORDER.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Everything one render cycle needs, derived from the current view.
/// Recomputed from scratch on every interaction, never cached across them.
#[derive(Debug, Clone)]
pub struct DashboardFrame {
    pub metrics: Metrics,
    pub top_products: Vec<SeriesEntry>,
    pub country_counts: Vec<SeriesEntry>,
    pub country_revenue: Vec<SeriesEntry>,
    pub sales_person_revenue: Vec<SeriesEntry>,
    pub monthly_revenue: Vec<SeriesEntry>,
}

/// Shape the aggregates of a view into chart series. Pure adapter: the
/// ordering produced by the aggregation layer is preserved as-is.
pub fn build_frame(dataset: &SalesDataset, view: &[usize], config: &ChartConfig) -> DashboardFrame {
    let metrics = Metrics {
        transactions: aggregate::transaction_count(view),
        total_revenue: aggregate::total_revenue(dataset, view),
        total_boxes: aggregate::total_boxes(dataset, view),
        distinct_products: aggregate::distinct_product_count(dataset, view),
    };

    let months: Vec<&str> = config.months.iter().map(|m| m.as_str()).collect();

    DashboardFrame {
        metrics,
        top_products: series(aggregate::top_products_by_revenue(
            dataset,
            view,
            config.top_k,
        )),
        country_counts: series_usize(aggregate::count_by_country(dataset, view)),
        country_revenue: series(aggregate::revenue_by_country(dataset, view)),
        sales_person_revenue: series(aggregate::revenue_by_sales_person(dataset, view)),
        monthly_revenue: series(aggregate::monthly_revenue(dataset, view, &months)),
    }
}

fn series(pairs: Vec<(String, f64)>) -> Vec<SeriesEntry> {
    pairs
        .into_iter()
        .map(|(label, value)| SeriesEntry::new(label, value))
        .collect()
}

fn series_usize(pairs: Vec<(String, usize)>) -> Vec<SeriesEntry> {
    pairs
        .into_iter()
        .map(|(label, count)| SeriesEntry::new(label, count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SaleRecord;
    use chrono::NaiveDate;

    fn record(product: &str, month: &str, amount: f64) -> SaleRecord {
        SaleRecord {
            sales_person: "Van".to_string(),
            country: "UK".to_string(),
            product: product.to_string(),
            date: NaiveDate::from_ymd_opt(2022, 1, 4).unwrap(),
            month: month.to_string(),
            amount,
            boxes_shipped: 10,
            price_per_box: (amount / 10.0 * 100.0).round() / 100.0,
        }
    }

    #[test]
    fn frame_preserves_aggregation_order() {
        let ds = SalesDataset::from_records(vec![
            record("A", "January", 100.0),
            record("B", "February", 50.0),
            record("A", "March", 30.0),
        ]);
        let view: Vec<usize> = (0..ds.len()).collect();
        let config = ChartConfig {
            top_k: 2,
            months: ["January", "February", "March"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
        };

        let frame = build_frame(&ds, &view, &config);

        assert_eq!(frame.metrics.transactions, 3);
        assert_eq!(frame.metrics.total_revenue, 180.0);
        assert_eq!(frame.metrics.distinct_products, 2);

        let top: Vec<(&str, f64)> = frame
            .top_products
            .iter()
            .map(|e| (e.label.as_str(), e.value))
            .collect();
        assert_eq!(top, [("A", 130.0), ("B", 50.0)]);

        let months: Vec<&str> = frame
            .monthly_revenue
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(months, ["January", "February", "March"]);
    }

    #[test]
    fn empty_view_builds_an_empty_frame() {
        let ds = SalesDataset::from_records(Vec::new());
        let frame = build_frame(&ds, &[], &ChartConfig::default());

        assert_eq!(frame.metrics.transactions, 0);
        assert_eq!(frame.metrics.total_revenue, 0.0);
        assert_eq!(frame.metrics.total_boxes, 0);
        assert_eq!(frame.metrics.distinct_products, 0);
        assert!(frame.top_products.is_empty());
        assert!(frame.country_counts.is_empty());
        // Configured months are still present, each reporting zero revenue.
        assert_eq!(frame.monthly_revenue.len(), 12);
        assert!(frame.monthly_revenue.iter().all(|e| e.value == 0.0));
    }
}
