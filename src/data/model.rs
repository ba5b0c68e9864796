use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Dimension – a filterable categorical column
// ---------------------------------------------------------------------------

/// The three categorical columns the dashboard filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    City,
    CustomerType,
    Gender,
}

impl Dimension {
    /// All dimensions in the order the filter panel shows them.
    pub const ALL: [Dimension; 3] = [Dimension::City, Dimension::CustomerType, Dimension::Gender];

    /// Header text of the column in the source sheet.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::City => "City",
            Dimension::CustomerType => "Customer_type",
            Dimension::Gender => "Gender",
        }
    }

    /// Human-readable label for the filter widget.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::City => "City",
            Dimension::CustomerType => "Customer Type",
            Dimension::Gender => "Gender",
        }
    }

    /// Read this dimension's value from a row.
    pub fn value_of(self, row: &SalesRow) -> &str {
        match self {
            Dimension::City => &row.city,
            Dimension::CustomerType => &row.customer_type,
            Dimension::Gender => &row.gender,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SalesRow – one transaction
// ---------------------------------------------------------------------------

/// A single sales transaction (one data row of the source sheet).
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRow {
    pub city: String,
    pub customer_type: String,
    pub gender: String,
    pub product_line: String,
    /// Gross amount of the invoice, tax included.
    pub total: f64,
    /// Customer rating, 1.0 – 10.0.
    pub rating: f64,
    /// Time of day as written in the source, `HH:MM:SS`.
    pub time: String,
    /// Hour component of `time`, derived at load.
    pub hour: u8,
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built; shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesDataset {
    rows: Vec<SalesRow>,
    /// Distinct values per dimension, in first-seen order.
    distinct: BTreeMap<Dimension, Vec<String>>,
}

impl SalesDataset {
    /// Build the dataset and its per-dimension value index.
    pub fn from_rows(rows: Vec<SalesRow>) -> Self {
        let mut distinct: BTreeMap<Dimension, Vec<String>> =
            Dimension::ALL.iter().map(|d| (*d, Vec::new())).collect();

        for row in &rows {
            for dim in Dimension::ALL {
                let value = dim.value_of(row);
                let seen = distinct.entry(dim).or_default();
                if !seen.iter().any(|v| v == value) {
                    seen.push(value.to_string());
                }
            }
        }

        SalesDataset { rows, distinct }
    }

    pub fn rows(&self) -> &[SalesRow] {
        &self.rows
    }

    /// Distinct observed values of a dimension.
    pub fn distinct_values(&self, dim: Dimension) -> &[String] {
        self.distinct.get(&dim).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn row(
        city: &str,
        customer_type: &str,
        gender: &str,
        product_line: &str,
        total: f64,
        rating: f64,
        time: &str,
    ) -> SalesRow {
        let hour = time
            .split(':')
            .next()
            .and_then(|h| h.parse().ok())
            .unwrap_or(0);
        SalesRow {
            city: city.into(),
            customer_type: customer_type.into(),
            gender: gender.into(),
            product_line: product_line.into(),
            total,
            rating,
            time: time.into(),
            hour,
        }
    }

    /// A small mixed dataset used across the engine and state tests.
    pub(crate) fn sample_dataset() -> SalesDataset {
        SalesDataset::from_rows(vec![
            row("Yangon", "Member", "Female", "Health and beauty", 50.0, 8.0, "13:45:00"),
            row("Mandalay", "Normal", "Male", "Sports and travel", 30.0, 6.0, "10:20:00"),
            row("Naypyitaw", "Member", "Male", "Health and beauty", 120.5, 9.5, "13:05:00"),
            row("Yangon", "Normal", "Male", "Food and beverages", 75.25, 4.0, "19:30:00"),
            row("Mandalay", "Member", "Female", "Food and beverages", 10.75, 7.0, "10:59:59"),
        ])
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let ds = sample_dataset();
        assert_eq!(
            ds.distinct_values(Dimension::City),
            ["Yangon", "Mandalay", "Naypyitaw"]
        );
        assert_eq!(ds.distinct_values(Dimension::CustomerType), ["Member", "Normal"]);
        assert_eq!(ds.distinct_values(Dimension::Gender), ["Female", "Male"]);
    }

    #[test]
    fn empty_dataset_has_no_values() {
        let ds = SalesDataset::from_rows(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.distinct_values(Dimension::Gender).is_empty());
    }

    #[test]
    fn dimension_reads_matching_field() {
        let r = row("Yangon", "Member", "Female", "Health and beauty", 1.0, 5.0, "09:00:00");
        assert_eq!(Dimension::City.value_of(&r), "Yangon");
        assert_eq!(Dimension::CustomerType.value_of(&r), "Member");
        assert_eq!(Dimension::Gender.value_of(&r), "Female");
        assert_eq!(Dimension::CustomerType.column(), "Customer_type");
    }
}
