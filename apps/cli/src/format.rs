//! pt-BR display formatting.

use storefront_core::Money;

/// Formats money as `R$ 1.234,56`.
pub fn brl(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let reais = amount.reais().abs();
    let centavos = amount.cents_part();

    format!("{sign}R$ {},{centavos:02}", group_thousands(reais))
}

/// Formats a distance as `198 km` or `12,5 km`.
pub fn km(distance_km: f64) -> String {
    if distance_km.fract() == 0.0 {
        format!("{distance_km:.0} km")
    } else {
        format!("{distance_km:.1} km").replace('.', ",")
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brl() {
        assert_eq!(brl(Money::from_cents(0)), "R$ 0,00");
        assert_eq!(brl(Money::from_cents(5)), "R$ 0,05");
        assert_eq!(brl(Money::from_cents(15_000)), "R$ 150,00");
        assert_eq!(brl(Money::from_cents(123_456)), "R$ 1.234,56");
        assert_eq!(brl(Money::from_cents(3_000_000)), "R$ 30.000,00");
        assert_eq!(brl(Money::from_cents(6_064_500)), "R$ 60.645,00");
        assert_eq!(brl(Money::from_cents(123_456_789)), "R$ 1.234.567,89");
        assert_eq!(brl(Money::from_cents(-550)), "-R$ 5,50");
    }

    #[test]
    fn test_km() {
        assert_eq!(km(198.0), "198 km");
        assert_eq!(km(12.5), "12,5 km");
        assert_eq!(km(800.0), "800 km");
    }
}
