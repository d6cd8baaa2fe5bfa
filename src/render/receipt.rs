use super::{centered, format_amount, row, rule};
use crate::config::Config;
use crate::domain::time::receipt_timestamp;
use crate::domain::{BillLine, Order, PaymentMethod};
use crate::ledger::Totals;

/// Full receipt for a generated order. Only reads the snapshot, so it prints the same
/// text no matter what happened to the selection afterwards.
pub fn render_receipt(order: &Order, config: &Config) -> String {
    let symbol = config.receipt.currency_symbol.as_str();
    let money = |amount| format_amount(symbol, amount);
    let mut out = Vec::new();

    out.push(rule('='));
    out.push(centered(&format!("🍔 {}", config.store.name)));
    out.push(centered(&config.store.tagline));
    out.push(rule('='));

    out.push("✔ Order Confirmed!".to_string());
    if config.receipt.show_stamp {
        out.push(format!("  Order #: {}", order.stamp.number));
        out.push(format!("  {}", receipt_timestamp(&order.stamp.placed_at)));
    }
    out.push(rule('-'));

    out.push("Your Order".to_string());
    for line in &order.lines {
        out.push(row(&format!("  {}", line.item.name), &money(line.line_total())));
        out.push(format!("    {} × {}", money(line.item.unit_price), line.quantity));
    }
    out.push(rule('-'));

    out.push(row("  Subtotal:", &money(order.subtotal)));
    out.push(row("  Tax (5%):", &money(order.tax)));
    out.push(rule('-'));
    out.push(row("  Total:", &money(order.grand_total)));
    out.push(rule('-'));

    let payment = order.payment_method.display();
    out.push(row("  Payment Method:", payment.label));
    out.push(rule('-'));

    out.push(centered(&config.store.location));
    out.push(centered(&format!("Thank you for choosing {}!", config.store.name)));
    out.push(centered(&format!("🍟 {} 🍟", config.store.tagline)));
    out.push(rule('='));

    out.join("\n")
}

/// Compact summary of a list of bill lines, used for the live order view.
pub fn render_summary(
    lines: &[BillLine],
    totals: &Totals,
    payment_method: PaymentMethod,
    config: &Config,
) -> String {
    let symbol = config.receipt.currency_symbol.as_str();
    let money = |amount| format_amount(symbol, amount);
    let mut out = Vec::new();

    out.push("🧾 Your Bill Summary".to_string());
    out.push(rule('-'));

    if lines.is_empty() {
        out.push("  (no items selected)".to_string());
    }
    for line in lines {
        out.push(row(
            &format!("  {} x {}", line.item.name, line.quantity),
            &money(line.line_total()),
        ));
    }
    out.push(rule('-'));

    out.push(row("  Subtotal:", &money(totals.subtotal)));
    out.push(row("  Tax (5%):", &money(totals.tax)));
    out.push(row("  Total Amount:", &money(totals.grand_total)));

    let payment = payment_method.display();
    out.push(row(
        "  Payment Method:",
        &format!("{} {}", payment.icon.glyph(), payment.label),
    ));

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::ledger::{FixedStamps, LedgerState};
    use chrono::{Local, TimeZone};

    fn generated() -> (Catalog, LedgerState) {
        let catalog = Catalog::builtin();
        let mut stamps =
            FixedStamps::new(4242, Local.with_ymd_and_hms(2024, 3, 7, 18, 5, 9).unwrap());
        let state = LedgerState::new()
            .set_quantity(&catalog, "fries", 2)
            .unwrap()
            .set_quantity(&catalog, "coke", 1)
            .unwrap()
            .select_payment("card")
            .unwrap()
            .generate_bill(&catalog, &mut stamps)
            .unwrap();
        (catalog, state)
    }

    #[test]
    fn test_receipt_contents() {
        let (_, state) = generated();
        let text = render_receipt(state.generated_order().unwrap(), &Config::default());

        assert!(text.contains("Order #: 4242"));
        assert!(text.contains("07/03/2024, 18:05:09"));
        assert!(text.contains("French Fries"));
        assert!(text.contains("₹80 × 2"));
        assert!(text.contains("₹160"));
        assert!(text.contains("Tax (5%):"));
        assert!(text.contains("₹220"));
        assert!(text.contains("₹11"));
        assert!(text.contains("₹231"));
        assert!(text.contains("Card Payment"));
        assert!(text.contains("McDonald's Downtown"));
    }

    #[test]
    fn test_receipt_lines_in_catalog_order() {
        let (_, state) = generated();
        let text = render_receipt(state.generated_order().unwrap(), &Config::default());
        let fries = text.find("French Fries").unwrap();
        let coke = text.find("Coca Cola").unwrap();
        assert!(fries < coke);
    }

    #[test]
    fn test_receipt_stable_after_edits() {
        let (catalog, state) = generated();
        let config = Config::default();
        let before = render_receipt(state.generated_order().unwrap(), &config);

        let edited = state.set_quantity(&catalog, "mcflurry", 5).unwrap();
        let after = render_receipt(edited.generated_order().unwrap(), &config);
        assert_eq!(before, after);
    }

    #[test]
    fn test_receipt_without_stamp() {
        let (_, state) = generated();
        let mut config = Config::default();
        config.receipt.show_stamp = false;
        config.receipt.currency_symbol = "Rs ".to_string();

        let text = render_receipt(state.generated_order().unwrap(), &config);
        assert!(!text.contains("Order #"));
        assert!(text.contains("Rs 231"));
    }

    #[test]
    fn test_summary_matches_receipt_totals() {
        let (catalog, state) = generated();
        let lines = state.bill_lines(&catalog);
        let totals = state.totals(&catalog);
        let text = render_summary(&lines, &totals, state.payment_method, &Config::default());

        assert!(text.contains("French Fries x 2"));
        assert!(text.contains("₹11"));
        assert!(text.contains("₹231"));
        assert!(text.contains("💳 Card Payment"));
    }

    #[test]
    fn test_summary_empty() {
        let text = render_summary(
            &[],
            &Totals::of(&[]),
            PaymentMethod::Cash,
            &Config::default(),
        );
        assert!(text.contains("(no items selected)"));
        assert!(text.contains("₹0"));
    }
}
