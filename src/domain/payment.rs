use serde::{Deserialize, Serialize};

use crate::ledger::errors::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IconKind {
    Banknote,
    CreditCard,
    Smartphone,
}

impl IconKind {
    pub fn glyph(&self) -> &'static str {
        match self {
            IconKind::Banknote => "💵",
            IconKind::CreditCard => "💳",
            IconKind::Smartphone => "📱",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentDisplay {
    pub label: &'static str,
    pub icon: IconKind,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
        }
    }

    pub fn display(&self) -> PaymentDisplay {
        match self {
            PaymentMethod::Cash => PaymentDisplay {
                label: "Cash Payment",
                icon: IconKind::Banknote,
            },
            PaymentMethod::Card => PaymentDisplay {
                label: "Card Payment",
                icon: IconKind::CreditCard,
            },
            PaymentMethod::Upi => PaymentDisplay {
                label: "UPI Payment",
                icon: IconKind::Smartphone,
            },
        }
    }
}

/// Codes are matched trimmed and case-insensitively. Unknown codes are an error, never cash.
impl std::str::FromStr for PaymentMethod {
    type Err = LedgerError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            _ => Err(LedgerError::InvalidPaymentMethod(code.to_string())),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
