use crate::domain::{Amount, Category, MenuItem};
use crate::ledger::MAX_QUANTITY;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateId(String),
    NonPositivePrice(String),
    PriceTooLarge(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateId(id) => write!(f, "Duplicate menu item id: {}", id),
            CatalogError::NonPositivePrice(id) => {
                write!(f, "Menu item {} must have a positive price", id)
            }
            CatalogError::PriceTooLarge(id) => {
                write!(f, "Menu item {} is priced too high to bill", id)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Ordered, read-only menu. Order of `items` is display and billing order.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            items: vec![
                MenuItem::new(
                    "big-mac",
                    "Big Mac",
                    180,
                    "Two all-beef patties, special sauce, lettuce, cheese",
                    Some(Category::Food),
                    true,
                ),
                MenuItem::new(
                    "fries",
                    "French Fries",
                    80,
                    "Golden crispy fries with a pinch of salt",
                    Some(Category::Food),
                    true,
                ),
                MenuItem::new(
                    "mcchicken",
                    "McChicken",
                    150,
                    "Crispy chicken patty with fresh lettuce and mayo",
                    Some(Category::Food),
                    false,
                ),
                MenuItem::new(
                    "coke",
                    "Coca Cola",
                    60,
                    "Ice-cold refreshing Coca Cola",
                    Some(Category::Beverage),
                    false,
                ),
                MenuItem::new(
                    "mcflurry",
                    "McFlurry",
                    120,
                    "Creamy vanilla ice cream with chocolate chunks",
                    Some(Category::Dessert),
                    false,
                ),
            ],
        }
    }

    /// Highest unit price for which a bill with every item at the maximum quantity, plus
    /// tax, still fits in `Amount`.
    pub fn max_unit_price(item_count: usize) -> Amount {
        let lines = (item_count.max(1) as Amount).saturating_mul(Amount::from(MAX_QUANTITY));
        // halving leaves room for the 5% tax and its rounding
        Amount::MAX / lines / 2
    }

    pub fn from_items(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let max_price = Self::max_unit_price(items.len());

        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
            if item.unit_price == 0 {
                return Err(CatalogError::NonPositivePrice(item.id.clone()));
            }
            if item.unit_price > max_price {
                return Err(CatalogError::PriceTooLarge(item.id.clone()));
            }
        }

        Ok(Self { items })
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn by_category(&self, category: Category) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| item.category == Some(category))
            .collect()
    }

    pub fn popular(&self) -> Vec<&MenuItem> {
        self.items.iter().filter(|item| item.is_popular).collect()
    }

    /// Groups items by category, groups ordered by first appearance.
    pub fn partition_by_category(&self) -> Vec<(Option<Category>, Vec<&MenuItem>)> {
        let mut groups: Vec<(Option<Category>, Vec<&MenuItem>)> = Vec::new();

        for item in &self.items {
            match groups.iter_mut().find(|(c, _)| *c == item.category) {
                Some((_, members)) => members.push(item),
                None => groups.push((item.category, vec![item])),
            }
        }

        groups
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
