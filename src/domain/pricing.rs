//! Order pricing: line totals, flat shipping, flat tax.
//!
//! All arithmetic stays in `Decimal`. Shipping and tax are hardcoded
//! constants, not configurable per order, region or category.

use rust_decimal::Decimal;

/// Flat shipping cost, 5.99.
pub fn flat_shipping_cost() -> Decimal {
    Decimal::new(599, 2)
}

/// Flat tax rate, 10% of the item total.
pub fn tax_rate() -> Decimal {
    Decimal::new(10, 2)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    /// Sum of unit price x quantity across all lines; excludes shipping
    /// and tax.
    pub total_amount: Decimal,
    pub shipping_cost: Decimal,
    pub tax_amount: Decimal,
}

pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Computes order totals from (unit price, quantity) pairs.
pub fn totals_for<I>(lines: I) -> Totals
where
    I: IntoIterator<Item = (Decimal, i32)>,
{
    let total_amount = lines
        .into_iter()
        .fold(Decimal::ZERO, |acc, (price, qty)| acc + line_total(price, qty));
    Totals {
        total_amount,
        shipping_cost: flat_shipping_cost(),
        tax_amount: total_amount * tax_rate(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_match_worked_example() {
        // (29.99 x 2) + (89.99 x 1) = 149.97; tax is 10% of that.
        let totals = totals_for(vec![
            (Decimal::new(2999, 2), 2),
            (Decimal::new(8999, 2), 1),
        ]);
        assert_eq!(totals.total_amount, Decimal::new(14997, 2));
        assert_eq!(totals.shipping_cost, Decimal::new(599, 2));
        assert_eq!(totals.tax_amount, Decimal::new(14997, 3));
    }

    #[test]
    fn empty_order_totals_are_zero_but_shipping_is_flat() {
        let totals = totals_for(vec![]);
        assert_eq!(totals.total_amount, Decimal::ZERO);
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.shipping_cost, flat_shipping_cost());
    }

    #[test]
    fn line_total_is_exact_decimal() {
        // 0.10 x 3 must be exactly 0.30, no float drift.
        assert_eq!(line_total(Decimal::new(10, 2), 3), Decimal::new(30, 2));
    }
}
