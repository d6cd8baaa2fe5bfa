use crate::catalog::Catalog;
use crate::domain::*;
use crate::logging::{log_clamp, log_rejection, log_success};
use log::info;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::collections::HashMap;

pub mod errors;
pub mod stamp;

pub use errors::LedgerError;
pub use stamp::{FixedStamps, RandomStamps, StampSource};

pub const MAX_QUANTITY: u8 = 10;
pub const TAX_RATE: Decimal = dec!(0.05);

// ==================================================
// QUANTITY SELECTION
// ==================================================

/// Item id -> quantity. Zero quantities are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantitySelection {
    quantities: HashMap<String, u8>,
}

impl QuantitySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item_id: &str) -> u8 {
        self.quantities.get(item_id).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }
}

pub fn clamp_quantity(requested: i64) -> u8 {
    // clamp keeps the value within u8 range
    requested.clamp(0, i64::from(MAX_QUANTITY)) as u8
}

pub fn set_quantity(
    selection: &QuantitySelection,
    catalog: &Catalog,
    item_id: &str,
    requested: i64,
) -> Result<QuantitySelection, LedgerError> {
    if !catalog.contains(item_id) {
        log_rejection(&format!("quantity for unknown item '{}'", item_id));
        return Err(LedgerError::UnknownItem(item_id.to_string()));
    }

    let quantity = clamp_quantity(requested);
    if i64::from(quantity) != requested {
        log_clamp(item_id, requested, quantity);
    }

    let mut next = selection.clone();
    if quantity == 0 {
        next.quantities.remove(item_id);
    } else {
        next.quantities.insert(item_id.to_string(), quantity);
    }

    Ok(next)
}

// ==================================================
// DERIVATION
// ==================================================

/// Bill lines in catalog order, not selection order.
pub fn derive_bill_lines(selection: &QuantitySelection, catalog: &Catalog) -> Vec<BillLine> {
    catalog
        .items()
        .iter()
        .filter_map(|item| match selection.get(&item.id) {
            0 => None,
            quantity => Some(BillLine {
                item: item.clone(),
                quantity,
            }),
        })
        .collect()
}

pub fn compute_subtotal(lines: &[BillLine]) -> Amount {
    lines.iter().map(BillLine::line_total).sum()
}

/// 5% of the subtotal, rounded half away from zero to a whole unit.
pub fn compute_tax(subtotal: Amount) -> Amount {
    (Decimal::from(subtotal) * TAX_RATE)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        // tax never exceeds the subtotal, so it always fits
        .unwrap_or_default()
}

pub fn compute_grand_total(subtotal: Amount, tax: Amount) -> Amount {
    subtotal + tax
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Amount,
    pub tax: Amount,
    pub grand_total: Amount,
}

impl Totals {
    pub fn of(lines: &[BillLine]) -> Self {
        let subtotal = compute_subtotal(lines);
        let tax = compute_tax(subtotal);
        Self {
            subtotal,
            tax,
            grand_total: compute_grand_total(subtotal, tax),
        }
    }
}

pub fn classify_payment_method(code: &str) -> Result<PaymentDisplay, LedgerError> {
    let method: PaymentMethod = code.parse()?;
    Ok(method.display())
}

// ==================================================
// LEDGER STATE
// ==================================================

/// One checkout in progress. Transitions return a new state and leave `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    pub selection: QuantitySelection,
    pub payment_method: PaymentMethod,
    pub phase: Phase,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            selection: QuantitySelection::new(),
            payment_method: PaymentMethod::default(),
            phase: Phase::Composing,
        }
    }
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_quantity(
        &self,
        catalog: &Catalog,
        item_id: &str,
        requested: i64,
    ) -> Result<Self, LedgerError> {
        Ok(Self {
            selection: set_quantity(&self.selection, catalog, item_id, requested)?,
            ..self.clone()
        })
    }

    pub fn adjust_quantity(
        &self,
        catalog: &Catalog,
        item_id: &str,
        delta: i64,
    ) -> Result<Self, LedgerError> {
        let current = i64::from(self.selection.get(item_id));
        self.set_quantity(catalog, item_id, current.saturating_add(delta))
    }

    pub fn select_payment(&self, code: &str) -> Result<Self, LedgerError> {
        let payment_method = code.parse::<PaymentMethod>().map_err(|e| {
            log_rejection(&e.to_string());
            e
        })?;

        Ok(Self {
            payment_method,
            ..self.clone()
        })
    }

    pub fn bill_lines(&self, catalog: &Catalog) -> Vec<BillLine> {
        derive_bill_lines(&self.selection, catalog)
    }

    /// Live totals of the current selection; a generated bill keeps its own.
    pub fn totals(&self, catalog: &Catalog) -> Totals {
        Totals::of(&self.bill_lines(catalog))
    }

    /// Freezes the current selection into an `Order`. Later edits to the selection do not
    /// reach the snapshot; generating again replaces it.
    pub fn generate_bill(
        &self,
        catalog: &Catalog,
        stamps: &mut dyn StampSource,
    ) -> Result<Self, LedgerError> {
        let lines = self.bill_lines(catalog);
        if lines.is_empty() {
            log_rejection("bill requested with no items selected");
            return Err(LedgerError::EmptyOrder);
        }

        let totals = Totals::of(&lines);
        let order = Order {
            lines,
            subtotal: totals.subtotal,
            tax: totals.tax,
            grand_total: totals.grand_total,
            payment_method: self.payment_method,
            stamp: stamps.next_stamp(),
        };

        log_success(&format!(
            "Bill #{} generated: {} item(s), total {} via {}",
            order.stamp.number,
            order.item_count(),
            order.grand_total,
            order.payment_method
        ));

        Ok(Self {
            phase: Phase::Generated(order),
            ..self.clone()
        })
    }

    pub fn reset_order(&self) -> Self {
        info!("🆕 New order started");
        Self::default()
    }

    pub fn generated_order(&self) -> Option<&Order> {
        self.phase.order()
    }
}
