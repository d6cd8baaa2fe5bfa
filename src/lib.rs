pub mod catalog;
pub mod config;
pub mod domain;
pub mod ledger;
pub mod logging;
pub mod render;
pub mod session;
