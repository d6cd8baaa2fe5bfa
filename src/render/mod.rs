use crate::domain::Amount;

pub mod menu;
pub mod receipt;

pub use menu::render_menu;
pub use receipt::{render_receipt, render_summary};

pub const WIDTH: usize = 42;

/// Currency prefix, whole units, no decimals: `₹231`.
pub fn format_amount(symbol: &str, amount: Amount) -> String {
    format!("{}{}", symbol, amount)
}

/// Label left, value right, padded to `WIDTH` characters.
pub(crate) fn row(label: &str, value: &str) -> String {
    let used = label.chars().count() + value.chars().count();
    let pad = WIDTH.saturating_sub(used).max(1);
    format!("{}{}{}", label, " ".repeat(pad), value)
}

pub(crate) fn centered(text: &str) -> String {
    format!("{:^width$}", text, width = WIDTH)
        .trim_end()
        .to_string()
}

pub(crate) fn rule(ch: char) -> String {
    ch.to_string().repeat(WIDTH)
}
