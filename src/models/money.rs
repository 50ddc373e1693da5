//! Fixed-point money amounts.

use serde::{Deserialize, Serialize};

/// Supported reporting currencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    #[default]
    Usd,
    Gbp,
    Eur,
}

impl CurrencyCode {
    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "$",
            CurrencyCode::Gbp => "£",
            CurrencyCode::Eur => "€",
        }
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(CurrencyCode::Usd),
            "GBP" => Ok(CurrencyCode::Gbp),
            "EUR" => Ok(CurrencyCode::Eur),
            other => Err(format!("Unsupported currency: {}", other)),
        }
    }
}

/// A money amount stored as signed cents in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money {
    pub cents: i64,
    pub currency: CurrencyCode,
}

impl Money {
    pub fn zero(currency: CurrencyCode) -> Self {
        Self { cents: 0, currency }
    }

    /// From a major-unit amount (e.g. dollars), rounding half away from zero.
    pub fn from_major(amount: f64, currency: CurrencyCode) -> Self {
        Self {
            cents: (amount * 100.0).round() as i64,
            currency,
        }
    }

    pub fn as_major(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Scale by a factor, rounding back to cents.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            cents: (self.cents as f64 * factor).round() as i64,
            currency: self.currency,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money {
            cents: self.cents + rhs.cents,
            currency: self.currency,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.cents += rhs.cents;
    }
}

/// Group a digit string with thousands separators.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl std::fmt::Display for Money {
    /// en_US style: `$1,234.56`, negatives as `-$12.34`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        let major = group_thousands(&(abs / 100).to_string());
        write!(f, "{}{}{}.{:02}", sign, self.currency.symbol(), major, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_rounds_to_cents() {
        assert_eq!(Money::from_major(72.004, CurrencyCode::Usd).cents, 7200);
        assert_eq!(Money::from_major(72.005, CurrencyCode::Usd).cents, 7201);
        assert_eq!(Money::from_major(-0.005, CurrencyCode::Usd).cents, -1);
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(Money::from_major(0.0, CurrencyCode::Usd).to_string(), "$0.00");
        assert_eq!(Money::from_major(72.0, CurrencyCode::Usd).to_string(), "$72.00");
        assert_eq!(
            Money::from_major(1234.56, CurrencyCode::Usd).to_string(),
            "$1,234.56"
        );
        assert_eq!(
            Money::from_major(1_234_567.89, CurrencyCode::Usd).to_string(),
            "$1,234,567.89"
        );
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Money::from_major(-12.34, CurrencyCode::Usd).to_string(), "-$12.34");
    }

    #[test]
    fn test_display_other_currencies() {
        assert_eq!(Money::from_major(5.0, CurrencyCode::Gbp).to_string(), "£5.00");
        assert_eq!(Money::from_major(5.0, CurrencyCode::Eur).to_string(), "€5.00");
    }

    #[test]
    fn test_add_and_scale() {
        let a = Money::from_major(10.0, CurrencyCode::Usd);
        let b = Money::from_major(2.5, CurrencyCode::Usd);
        assert_eq!((a + b).to_string(), "$12.50");
        assert_eq!(a.scale(50.0).to_string(), "$500.00");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert_eq!("GBP".parse::<CurrencyCode>().unwrap(), CurrencyCode::Gbp);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
