//! Pseudo-random outcome generation for the failure-simulation endpoints.
//!
//! Every draw takes the generator as a parameter so that callers decide where
//! randomness comes from: a thread-local generator in production, a seeded
//! `StdRng` in tests.

mod demo;
mod health;
mod payment;

pub use demo::{
    cpu_burn, draw_random_sleep, draw_random_status, greeting, DEFAULT_GREETING_NAME,
    IO_TASK_DELAY, RANDOM_STATUS_CODES,
};
pub use health::{draw_gateway_health, GatewayHealth, GatewayStatus};
pub use payment::{
    draw_payment_delay, draw_payment_outcome, transaction_id, PaymentOutcome,
    DEFAULT_PAYMENT_AMOUNT,
};
