use crate::domain::OrderStamp;
use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const ORDER_NUMBER_MIN: u32 = 1000;
pub const ORDER_NUMBER_MAX: u32 = 10999;

/// Supplies the cosmetic order number and timestamp printed on a receipt.
pub trait StampSource {
    fn next_stamp(&mut self) -> OrderStamp;
}

pub struct RandomStamps {
    rng: StdRng,
}

impl RandomStamps {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for RandomStamps {
    fn default() -> Self {
        Self::new()
    }
}

impl StampSource for RandomStamps {
    fn next_stamp(&mut self) -> OrderStamp {
        OrderStamp {
            number: self.rng.random_range(ORDER_NUMBER_MIN..=ORDER_NUMBER_MAX),
            placed_at: Local::now(),
        }
    }
}

/// Deterministic stamps: fixed time, order numbers counting up from `next_number`.
pub struct FixedStamps {
    pub next_number: u32,
    pub placed_at: DateTime<Local>,
}

impl FixedStamps {
    pub fn new(first_number: u32, placed_at: DateTime<Local>) -> Self {
        Self {
            next_number: first_number,
            placed_at,
        }
    }
}

impl StampSource for FixedStamps {
    fn next_stamp(&mut self) -> OrderStamp {
        let stamp = OrderStamp {
            number: self.next_number,
            placed_at: self.placed_at,
        };
        self.next_number += 1;
        stamp
    }
}
