use crate::domain::Category;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/* =======================
CLI ARGS
======================= */

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "billing.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the menu, grouped by category
    Menu {
        /// Only show one category (food, beverage, dessert)
        #[arg(long)]
        category: Option<Category>,
    },

    /// Generate a bill in one go, e.g. `bill --item fries=2 --item coke=1 --pay card`
    Bill {
        /// Item and quantity as <id>=<qty>; repeatable
        #[arg(short, long = "item", value_parser = parse_item_arg, required = true)]
        items: Vec<(String, i64)>,

        /// Payment method: cash, card or upi
        #[arg(short, long, default_value = "cash")]
        pay: String,

        /// Print the generated order as JSON instead of a receipt
        #[arg(long)]
        json: bool,
    },

    /// Interactive order entry (default)
    Interactive,
}

pub fn parse_item_arg(raw: &str) -> Result<(String, i64), String> {
    let (id, qty) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <id>=<qty>, got '{}'", raw))?;

    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing item id in '{}'", raw));
    }

    let qty = qty
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid quantity in '{}': {}", raw, e))?;

    Ok((id.to_string(), qty))
}

/* =======================
MAIN CONFIG
======================= */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub receipt: ReceiptConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/* =======================
STORE CONFIG
======================= */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub name: String,
    pub tagline: String,
    pub location: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "McDonald's".to_string(),
            tagline: "I'm Lovin' It!".to_string(),
            location: "McDonald's Downtown".to_string(),
        }
    }
}

/* =======================
RECEIPT CONFIG
======================= */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    pub currency_symbol: String,

    // order number + timestamp header
    pub show_stamp: bool,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            show_stamp: true,
        }
    }
}

/* =======================
SESSION CONFIG
======================= */

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Pause before a generated bill is shown. 0 disables it.
    pub bill_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            receipt: ReceiptConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/* =======================
LOAD / CREATE CONFIG
======================= */

impl Config {
    pub fn load(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            let cfg = Config::default();
            let content = serde_json::to_string_pretty(&cfg)?;
            std::fs::write(path, content)?;
            Ok(cfg)
        }
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(ms) = Self::bill_delay_ms() {
            self.session.bill_delay_ms = ms;
        }
        if let Some(symbol) = Self::currency_symbol() {
            self.receipt.currency_symbol = symbol;
        }
        self
    }
}

// ==================================================
// ENVIRONMENT HELPERS
// ==================================================

impl Config {
    /// BILL_DELAY_MS, ignored when unparsable
    pub fn bill_delay_ms() -> Option<u64> {
        env::var("BILL_DELAY_MS").ok().and_then(|v| v.parse().ok())
    }

    pub fn currency_symbol() -> Option<String> {
        env::var("CURRENCY_SYMBOL")
            .ok()
            .filter(|v| !v.trim().is_empty())
    }
}
