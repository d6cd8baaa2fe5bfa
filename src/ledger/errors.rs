use std::fmt;

/// Every variant is recoverable: the caller reports it and keeps its previous state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    EmptyOrder,
    InvalidPaymentMethod(String),
    UnknownItem(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::EmptyOrder => write!(f, "Please select at least one item!"),
            LedgerError::InvalidPaymentMethod(code) => {
                write!(f, "Invalid payment method '{}' (expected cash, card or upi)", code)
            }
            LedgerError::UnknownItem(id) => write!(f, "Unknown menu item: {}", id),
        }
    }
}

impl std::error::Error for LedgerError {}
