use log::{info, warn};

pub fn init() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    // tests and repeated callers may have installed a logger already
    let _ = env_logger::try_init();
}

pub fn log_rejection(reason: &str) {
    warn!("❌ Rejected: {}", reason);
}

pub fn log_clamp(item_id: &str, requested: i64, applied: u8) {
    warn!(
        "⚠️ Quantity {} for {} out of range, using {}",
        requested, item_id, applied
    );
}

pub fn log_success(msg: &str) {
    info!("✅ {}", msg);
}
