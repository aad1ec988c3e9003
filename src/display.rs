// src/display.rs
//
// Display-boundary formatting shared by the UI adapters: amounts as
// "1,234.56 MAD", dates as dd/MM/yyyy, times as HH:mm.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a monetary amount for display: two fraction digits (rounded
/// half-up), thousands grouping, `MAD` suffix. This is the only place
/// amounts are rounded; storage and intermediate arithmetic keep full
/// precision.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), format!("{:0<2}", frac_part)),
        None => (text, "00".to_string()),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }

    format!(
        "{}{}.{} MAD",
        if negative { "-" } else { "" },
        grouped,
        frac_part
    )
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amounts_are_grouped_and_suffixed() {
        assert_eq!(format_amount(dec!(10000)), "10,000.00 MAD");
        assert_eq!(format_amount(dec!(792.75)), "792.75 MAD");
        assert_eq!(format_amount(dec!(1234567.8)), "1,234,567.80 MAD");
        assert_eq!(format_amount(dec!(0)), "0.00 MAD");
    }

    #[test]
    fn amounts_round_half_up_at_two_digits() {
        assert_eq!(format_amount(dec!(1545.8625)), "1,545.86 MAD");
        assert_eq!(format_amount(dec!(0.005)), "0.01 MAD");
        assert_eq!(format_amount(dec!(2.675)), "2.68 MAD");
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        assert_eq!(format_amount(dec!(-1234.5)), "-1,234.50 MAD");
        assert_eq!(format_amount(dec!(-0.001)), "0.00 MAD");
    }

    #[test]
    fn dates_and_times_use_the_boundary_formats() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(format_date(date), "03/06/2024");

        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(format_time(time), "09:05");
    }
}
