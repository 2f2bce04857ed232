use std::time::Duration;

use rand::Rng;

/// Amount charged when the request does not specify one.
pub const DEFAULT_PAYMENT_AMOUNT: f64 = 100.00;

/// Result of a simulated payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentOutcome {
    /// 70% of attempts.
    Approved,
    /// 10% of attempts.
    InvalidData,
    /// 10% of attempts.
    Declined,
    /// 5% of attempts.
    GatewayTimeout,
    /// 5% of attempts.
    InternalError,
}

impl PaymentOutcome {
    /// Maps a roll in `0..100` to an outcome.
    ///
    /// Rolls of 100 or more are treated as the last bucket.
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..70 => Self::Approved,
            70..80 => Self::InvalidData,
            80..90 => Self::Declined,
            90..95 => Self::GatewayTimeout,
            _ => Self::InternalError,
        }
    }

    /// HTTP status code for this outcome.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Approved => 200,
            Self::InvalidData => 400,
            Self::Declined => 402,
            Self::GatewayTimeout => 503,
            Self::InternalError => 500,
        }
    }

    /// Human readable reason for the outcome.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Approved => "Payment processed",
            Self::InvalidData => "Invalid payment data",
            Self::Declined => "Payment declined by issuer",
            Self::GatewayTimeout => "Payment gateway timeout",
            Self::InternalError => "Internal payment error",
        }
    }
}

/// Draws a payment outcome from a uniform roll in `0..100`.
pub fn draw_payment_outcome<R: Rng>(rng: &mut R) -> PaymentOutcome {
    PaymentOutcome::from_roll(rng.random_range(0..100))
}

/// Draws the simulated processing delay, in `[50ms, 500ms)`.
pub fn draw_payment_delay<R: Rng>(rng: &mut R) -> Duration {
    Duration::from_millis(rng.random_range(50..500))
}

/// Builds a transaction id from a Unix timestamp in milliseconds.
pub fn transaction_id(epoch_millis: i64) -> String {
    format!("TXN-{}", epoch_millis)
}
