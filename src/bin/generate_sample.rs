use std::path::PathBuf;

use anyhow::{Context, Result};

const HEADER: [&str; 17] = [
    "Invoice ID",
    "Branch",
    "City",
    "Customer_type",
    "Gender",
    "Product line",
    "Unit price",
    "Quantity",
    "Tax 5%",
    "Total",
    "Date",
    "Time",
    "Payment",
    "cogs",
    "gross margin percentage",
    "gross income",
    "Rating",
];

const BRANCHES: [(&str, &str); 3] = [("A", "Yangon"), ("B", "Mandalay"), ("C", "Naypyitaw")];
const CUSTOMER_TYPES: [&str; 2] = ["Member", "Normal"];
const GENDERS: [&str; 2] = ["Female", "Male"];
const PRODUCT_LINES: [&str; 6] = [
    "Electronic accessories",
    "Fashion accessories",
    "Food and beverages",
    "Health and beauty",
    "Home and lifestyle",
    "Sports and travel",
];
const PAYMENTS: [&str; 3] = ["Cash", "Credit card", "Ewallet"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.next_u64() as usize % items.len()]
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("supermarkt_sales.csv"));
    let rows = 1000;
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;

    // Banner rows mirror the workbook: title block above the table, column A empty.
    writer.write_record(["", "Supermarket Sales"])?;
    writer.write_record(["", "Synthetic sample, Q1 2019"])?;
    writer.write_record([""])?;

    let mut header = vec![""];
    header.extend(HEADER);
    writer.write_record(&header)?;

    for _ in 0..rows {
        let (branch, city) = BRANCHES[rng.range(0, 2) as usize];
        let unit_price = 10.0 + (rng.next_f64() * 90.0 * 100.0).round() / 100.0;
        let quantity = rng.range(1, 10);
        let cogs = unit_price * quantity as f64;
        let tax = cogs * 0.05;
        let total = cogs + tax;
        let rating = 4.0 + (rng.next_f64() * 60.0).round() / 10.0;

        let record = [
            String::new(),
            format!(
                "{:03}-{:02}-{:04}",
                rng.range(100, 899),
                rng.range(10, 99),
                rng.range(1000, 9999)
            ),
            branch.to_string(),
            city.to_string(),
            rng.pick(&CUSTOMER_TYPES).to_string(),
            rng.pick(&GENDERS).to_string(),
            rng.pick(&PRODUCT_LINES).to_string(),
            format!("{unit_price:.2}"),
            quantity.to_string(),
            format!("{tax:.4}"),
            format!("{total:.4}"),
            format!("{}/{}/2019", rng.range(1, 3), rng.range(1, 28)),
            format!("{:02}:{:02}:00", rng.range(10, 20), rng.range(0, 59)),
            rng.pick(&PAYMENTS).to_string(),
            format!("{cogs:.2}"),
            "4.761904762".to_string(),
            format!("{tax:.4}"),
            format!("{rating:.1}"),
        ];
        writer.write_record(&record)?;
    }
    writer.flush()?;

    log::info!("Wrote {rows} sales rows to {}", output.display());
    println!("Wrote {rows} sales rows to {}", output.display());
    Ok(())
}
