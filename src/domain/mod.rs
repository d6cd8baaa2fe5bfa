use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub mod payment;
pub mod time;

pub use payment::{IconKind, PaymentDisplay, PaymentMethod};

/// Amounts are whole units of the single store currency.
pub type Amount = u64;

// ==================================================
// MENU
// ==================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Beverage,
    Dessert,
}

impl Category {
    pub fn title(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Beverage => "Beverages",
            Category::Dessert => "Desserts",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "beverage" | "beverages" | "drink" | "drinks" => Ok(Category::Beverage),
            "dessert" | "desserts" => Ok(Category::Dessert),
            other => Err(format!("unknown category '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub unit_price: Amount,
    pub description: String,
    pub category: Option<Category>,
    pub is_popular: bool,
}

impl MenuItem {
    pub fn new(
        id: &str,
        name: &str,
        unit_price: Amount,
        description: &str,
        category: Option<Category>,
        is_popular: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            unit_price,
            description: description.to_string(),
            category,
            is_popular,
        }
    }
}

// ==================================================
// BILL
// ==================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillLine {
    pub item: MenuItem,
    pub quantity: u8,
}

impl BillLine {
    pub fn line_total(&self) -> Amount {
        self.item.unit_price * Amount::from(self.quantity)
    }
}

/// Cosmetic receipt header fields. Never part of any total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStamp {
    pub number: u32,
    pub placed_at: DateTime<Local>,
}

/// A bill frozen at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub lines: Vec<BillLine>,
    pub subtotal: Amount,
    pub tax: Amount,
    pub grand_total: Amount,
    pub payment_method: PaymentMethod,
    pub stamp: OrderStamp,
}

impl Order {
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| u32::from(l.quantity)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Composing,
    Generated(Order),
}

impl Phase {
    pub fn is_generated(&self) -> bool {
        matches!(self, Phase::Generated(_))
    }

    pub fn order(&self) -> Option<&Order> {
        match self {
            Phase::Generated(order) => Some(order),
            Phase::Composing => None,
        }
    }
}
