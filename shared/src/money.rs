use serde::{Deserialize, Serialize};

/// How prices are presented on the page.
///
/// `Usd` mirrors `Intl.NumberFormat('en-US', {currency: 'USD'})`; `Peso` is the
/// booking form's literal `₱` prefix with two decimals and no grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyStyle {
    Usd,
    #[default]
    Peso,
}

impl CurrencyStyle {
    pub fn symbol(self) -> &'static str {
        match self {
            CurrencyStyle::Usd => "$",
            CurrencyStyle::Peso => "₱",
        }
    }

    pub fn format(self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let fixed = format!("{:.2}", amount.abs());
        let body = match self {
            CurrencyStyle::Usd => group_thousands(&fixed),
            CurrencyStyle::Peso => fixed,
        };
        format!("{}{}{}", sign, self.symbol(), body)
    }

    /// Read an amount back out of page text such as `₱1,250.00`.
    ///
    /// Returns `None` when no number can be recovered.
    pub fn parse(self, text: &str) -> Option<f64> {
        let cleaned: String = text
            .trim()
            .trim_start_matches(self.symbol())
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

fn group_thousands(fixed: &str) -> String {
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed, ""));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if fraction.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, fraction)
    }
}
