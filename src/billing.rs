//! # Wait Times and Bills
//!
//! Pure calculations over order lines. Nothing here touches actor state:
//! the table actor calls in, then decides what to store.
//!
//! Preparation scales per batch of four of the same dish, rounded up, so a
//! line of `quantity` items whose dish takes `prep` minutes contributes
//! `ceil(quantity * prep / 4)` minutes:
//!
//! | quantity | prep | wait |
//! |----------|------|------|
//! | 4        | 5    | 5    |
//! | 5        | 5    | 7    |
//! | 1        | 15   | 4    |

use crate::menu::MenuCatalog;
use crate::model::{FoodKind, OrderId, OrderLine, TableNumber};
use crate::table_actor::TableError;
use rust_decimal::Decimal;
use std::fmt::Display;

const BATCH_SIZE: u64 = 4;

/// Width of the rule printed above and below bill lines.
const RULE_WIDTH: usize = 30;

/// Minutes one line adds to the wait.
///
/// Widened to `u64`, so the product of two `u32` values always fits.
pub fn line_wait_minutes(quantity: u32, prep_minutes: u32) -> u64 {
    (u64::from(quantity) * u64::from(prep_minutes)).div_ceil(BATCH_SIZE)
}

/// Estimated wait, in minutes, for a set of lines. Saturates instead of wrapping.
pub fn wait_minutes(menu: &MenuCatalog, lines: &[OrderLine]) -> Result<u64, TableError> {
    lines.iter().try_fold(0, |total: u64, line| -> Result<u64, TableError> {
        let item = menu.lookup(line.kind)?;
        Ok(total.saturating_add(line_wait_minutes(line.quantity, item.prep_minutes)))
    })
}

/// What the operator does about the tip when closing a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TipChoice {
    NoTip,
    Amount(Decimal),
}

impl TipChoice {
    /// Tip amount, refusing negatives.
    pub fn amount(self) -> Result<Decimal, TableError> {
        match self {
            TipChoice::NoTip => Ok(Decimal::ZERO),
            TipChoice::Amount(amount) if amount.is_sign_negative() && !amount.is_zero() => {
                Err(TableError::InvalidTipAmount(amount))
            }
            TipChoice::Amount(amount) => Ok(amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillLine {
    pub kind: FoodKind,
    pub quantity: u32,
    pub subtotal: Decimal,
}

impl Display for BillLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{}: {:.2} Rs", self.kind, self.quantity, self.subtotal)
    }
}

/// A priced order.
///
/// `total` is the sum of line subtotals only. The tip is carried beside it
/// and persisted with the history record, but never folded into `total`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub table: TableNumber,
    pub lines: Vec<BillLine>,
    pub total: Decimal,
    pub tip: Decimal,
    /// Set once the bill has been closed and recorded.
    pub order_id: Option<OrderId>,
}

impl Bill {
    /// Prices `lines` against the catalog. The tip starts at zero.
    pub fn price(
        menu: &MenuCatalog,
        table: TableNumber,
        lines: &[OrderLine],
    ) -> Result<Self, TableError> {
        let lines = lines
            .iter()
            .map(|line| -> Result<BillLine, TableError> {
                let item = menu.lookup(line.kind)?;
                Ok(BillLine {
                    kind: line.kind,
                    quantity: line.quantity,
                    subtotal: item.price * Decimal::from(line.quantity),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let total = lines.iter().map(|line| line.subtotal).sum();
        Ok(Self {
            table,
            lines,
            total,
            tip: Decimal::ZERO,
            order_id: None,
        })
    }

    /// The printable lines the operator reads out, header to total.
    pub fn printable_lines(&self) -> Vec<String> {
        let rule = "-".repeat(RULE_WIDTH);
        let mut out = Vec::with_capacity(self.lines.len() + 4);
        out.push(format!("Bill for Table {}:", self.table));
        out.push(rule.clone());
        out.extend(self.lines.iter().map(BillLine::to_string));
        out.push(rule);
        out.push(format!("Total: {:.2} Rs", self.total));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MenuItem, MAX_QUANTITY};

    fn line(kind: FoodKind, quantity: u32) -> OrderLine {
        OrderLine::new(kind, quantity).unwrap()
    }

    #[test]
    fn test_wait_scales_per_batch_of_four() {
        assert_eq!(line_wait_minutes(4, 5), 5);
        assert_eq!(line_wait_minutes(5, 5), 7);
        assert_eq!(line_wait_minutes(1, 5), 2);
        assert_eq!(line_wait_minutes(8, 3), 6);
    }

    #[test]
    fn test_wait_for_extreme_inputs_does_not_wrap() {
        assert_eq!(line_wait_minutes(1_000_000_000, 5), 1_250_000_000);
        assert_eq!(
            line_wait_minutes(u32::MAX, u32::MAX),
            (u64::from(u32::MAX) * u64::from(u32::MAX)).div_ceil(4)
        );

        let menu = MenuCatalog::new(vec![MenuItem::new(FoodKind::Tea, Decimal::ONE, u32::MAX)])
            .unwrap();
        let lines = vec![line(FoodKind::Tea, MAX_QUANTITY); 4];
        let one = line_wait_minutes(MAX_QUANTITY, u32::MAX);
        assert_eq!(wait_minutes(&menu, &lines).unwrap(), one * 4);
    }

    #[test]
    fn test_wait_sums_lines_with_menu_prep_times() {
        let menu = MenuCatalog::standard();
        let lines = [line(FoodKind::Coffee, 5), line(FoodKind::Burger, 1)];
        // ceil(5 * 5 / 4) + ceil(1 * 15 / 4)
        assert_eq!(wait_minutes(&menu, &lines).unwrap(), 7 + 4);
        assert_eq!(wait_minutes(&menu, &[]).unwrap(), 0);
    }

    #[test]
    fn test_bill_total_excludes_tip() {
        let menu = MenuCatalog::standard();
        let lines = [line(FoodKind::Coffee, 2), line(FoodKind::Cake, 1)];
        let bill = Bill::price(&menu, TableNumber(3), &lines).unwrap();
        assert_eq!(bill.total, Decimal::new(19000, 2));
        assert_eq!(bill.tip, Decimal::ZERO);
        assert_eq!(
            bill.printable_lines(),
            vec![
                "Bill for Table 3:".to_string(),
                "-".repeat(30),
                "Coffee x2: 40.00 Rs".to_string(),
                "Cake x1: 150.00 Rs".to_string(),
                "-".repeat(30),
                "Total: 190.00 Rs".to_string(),
            ]
        );
    }

    #[test]
    fn test_tip_choice_validation() {
        assert_eq!(TipChoice::NoTip.amount().unwrap(), Decimal::ZERO);
        assert_eq!(
            TipChoice::Amount(Decimal::new(25, 0)).amount().unwrap(),
            Decimal::new(25, 0)
        );
        assert!(matches!(
            TipChoice::Amount(Decimal::new(-5, 1)).amount(),
            Err(TableError::InvalidTipAmount(_))
        ));
    }
}
