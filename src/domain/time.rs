use chrono::{DateTime, Local};

pub fn receipt_timestamp(at: &DateTime<Local>) -> String {
    at.format("%d/%m/%Y, %H:%M:%S").to_string()
}
