use std::hint::black_box;
use std::time::Duration;

use rand::Rng;

/// Name used by the greeting when none is supplied.
pub const DEFAULT_GREETING_NAME: &str = "World";

/// Fixed delay of the simulated I/O task.
pub const IO_TASK_DELAY: Duration = Duration::from_secs(1);

/// Candidate statuses for the random status endpoint. 200 appears twice, so it
/// is drawn twice as often as the others.
pub const RANDOM_STATUS_CODES: [u16; 5] = [200, 200, 300, 400, 500];

/// Upper bound (exclusive) of the random sleep, in milliseconds.
const RANDOM_SLEEP_MAX_MS: u64 = 2_000;

/// Builds the greeting returned by the root endpoint.
pub fn greeting(name: Option<&str>) -> String {
    format!("Hello {}!!", name.unwrap_or(DEFAULT_GREETING_NAME))
}

/// Draws a status code uniformly from [`RANDOM_STATUS_CODES`].
pub fn draw_random_status<R: Rng>(rng: &mut R) -> u16 {
    RANDOM_STATUS_CODES[rng.random_range(0..RANDOM_STATUS_CODES.len())]
}

/// Draws a sleep duration in `[0, 2s)`.
pub fn draw_random_sleep<R: Rng>(rng: &mut R) -> Duration {
    Duration::from_millis(rng.random_range(0..RANDOM_SLEEP_MAX_MS))
}

/// Small CPU-bound loop. Returns the sum of cubes of `0..100`.
pub fn cpu_burn() -> u64 {
    (0..100u64).fold(0, |acc, i| acc + black_box(i * i * i))
}
