use crate::data::aggregate::Kpis;

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn total_sales_text(kpis: &Kpis) -> String {
    format!("US $ {}", group_thousands(kpis.total_sales))
}

pub fn rating_text(kpis: &Kpis) -> String {
    format!("{:.1} {}", kpis.average_rating, "⭐".repeat(kpis.stars()))
}

pub fn average_sale_text(kpis: &Kpis) -> String {
    format!("US $ {:.2}", kpis.average_sale_per_transaction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(322_966), "322,966");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }

    #[test]
    fn kpi_panels() {
        let kpis = Kpis {
            total_sales: 322_966,
            average_rating: 7.0,
            average_sale_per_transaction: 322.97,
            transactions: 1000,
        };
        assert_eq!(total_sales_text(&kpis), "US $ 322,966");
        assert_eq!(rating_text(&kpis), "7.0 ⭐⭐⭐⭐⭐⭐⭐");
        assert_eq!(average_sale_text(&kpis), "US $ 322.97");
    }

    #[test]
    fn empty_selection_panels() {
        let kpis = Kpis::default();
        assert_eq!(total_sales_text(&kpis), "US $ 0");
        assert_eq!(rating_text(&kpis), "0.0 ");
        assert_eq!(average_sale_text(&kpis), "US $ 0.00");
    }
}
