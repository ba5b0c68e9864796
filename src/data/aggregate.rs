use std::collections::BTreeMap;

use super::filter::FilterSelection;
use super::model::{SalesDataset, SalesRow};

/// Headline figures over the filtered rows.
///
/// On an empty selection both averages are `0.0` rather than undefined.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kpis {
    /// Sum of `total`, truncated.
    pub total_sales: i64,
    /// Mean rating, one decimal.
    pub average_rating: f64,
    /// Mean `total`, two decimals.
    pub average_sale_per_transaction: f64,
    pub transactions: usize,
}

impl Kpis {
    fn from_rows<'a>(rows: impl Iterator<Item = &'a SalesRow>) -> Self {
        let (mut count, mut total, mut rating) = (0usize, 0.0f64, 0.0f64);
        for row in rows {
            count += 1;
            total += row.total;
            rating += row.rating;
        }
        if count == 0 {
            return Kpis::default();
        }
        Kpis {
            total_sales: total.trunc() as i64,
            average_rating: round_to(rating / count as f64, 1),
            average_sale_per_transaction: round_to(total / count as f64, 2),
            transactions: count,
        }
    }

    /// Whole stars shown beside the rating; halves round to even.
    pub fn stars(&self) -> usize {
        self.average_rating.round_ties_even().max(0.0) as usize
    }
}

/// Round to `decimals` places, exact halves to even.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Grouped sums that drive the two bar charts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregations {
    /// Sales per product line, ascending by sum, ties by name.
    pub by_product_line: Vec<(String, f64)>,
    /// Sales per hour of day, ascending by hour; only hours with data.
    pub by_hour: Vec<(u8, f64)>,
}

impl Aggregations {
    fn from_rows<'a>(rows: impl Iterator<Item = &'a SalesRow>) -> Self {
        let mut products: BTreeMap<&str, f64> = BTreeMap::new();
        let mut hours: BTreeMap<u8, f64> = BTreeMap::new();
        for row in rows {
            *products.entry(&row.product_line).or_default() += row.total;
            *hours.entry(row.hour).or_default() += row.total;
        }

        let mut by_product_line: Vec<(String, f64)> = products
            .into_iter()
            .map(|(name, sum)| (name.to_string(), sum))
            .collect();
        // Stable sort keeps the name order of the map for equal sums.
        by_product_line.sort_by(|a, b| a.1.total_cmp(&b.1));

        Aggregations {
            by_product_line,
            by_hour: hours.into_iter().collect(),
        }
    }
}

/// Everything one render pass needs for a given selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardView {
    /// Indices into the dataset of rows passing the selection.
    pub rows: Vec<usize>,
    pub kpis: Kpis,
    pub aggregations: Aggregations,
}

impl DashboardView {
    #[cfg(test)]
    pub fn filtered_rows<'a>(&'a self, dataset: &'a SalesDataset) -> impl Iterator<Item = &'a SalesRow> + 'a {
        self.rows.iter().map(move |&i| &dataset.rows()[i])
    }
}

/// Filter the dataset and compute KPIs and chart aggregations.
///
/// Pure: the dataset is only read and equal inputs give equal outputs.
pub fn apply(dataset: &SalesDataset, selection: &FilterSelection) -> DashboardView {
    let rows = selection.filtered_indices(dataset);
    let selected = || rows.iter().map(|&i| &dataset.rows()[i]);

    let kpis = Kpis::from_rows(selected());
    let aggregations = Aggregations::from_rows(selected());
    DashboardView {
        rows,
        kpis,
        aggregations,
    }
}
