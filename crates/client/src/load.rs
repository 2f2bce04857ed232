//! Traffic generator.
//!
//! Runs a fixed number of virtual users against the service for a fixed
//! duration and summarizes what came back. Each virtual user loops over the
//! scenario's requests and pauses between iterations.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use clap::ValueEnum;
use rand::Rng;
use reqwest::Method;
use serde::Serialize;
use tokio::task::JoinSet;

use crate::client::PeanutsClient;
use crate::error::{ClientError, Result};

/// Latency the 95th percentile must stay under.
pub const P95_THRESHOLD: Duration = Duration::from_millis(2_000);

/// Error rate that must not be reached.
pub const ERROR_RATE_THRESHOLD: f64 = 0.5;

/// What each virtual user does per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Every demo endpoint once, then a payment.
    #[default]
    Mixed,
    /// Payments only.
    Payments,
}

impl Scenario {
    /// Pause between iterations when none is given.
    pub fn default_pause(self) -> Duration {
        match self {
            Scenario::Mixed => Duration::from_millis(500),
            Scenario::Payments => Duration::from_millis(100),
        }
    }

    /// Requests issued in one iteration. Payment amounts are drawn in `[0, 1000)`.
    fn requests<R: Rng>(self, rng: &mut R) -> Vec<(Method, String)> {
        let payment = (
            Method::POST,
            format!("/payment?amount={}", rng.random_range(0..1000)),
        );

        match self {
            Scenario::Mixed => vec![
                (Method::GET, "/".to_string()),
                (Method::GET, "/io_task".to_string()),
                (Method::GET, "/cpu_task".to_string()),
                (Method::GET, "/random_sleep".to_string()),
                (Method::GET, "/random_status".to_string()),
                (Method::GET, "/chain".to_string()),
                payment,
            ],
            Scenario::Payments => vec![payment],
        }
    }

    /// Whether a response status counts against the error rate.
    ///
    /// The mixed scenario treats anything outside 2xx/3xx as an error. The
    /// payments scenario expects declines, so only server errors count.
    pub fn is_error(self, status: u16) -> bool {
        match self {
            Scenario::Mixed => !(200..400).contains(&status),
            Scenario::Payments => status >= 500,
        }
    }
}

/// Parameters of a load run.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub vus: usize,
    pub duration: Duration,
    pub scenario: Scenario,
    pub pause: Duration,
}

/// One finished request. `status` is `None` when the request never got a response.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub path: String,
    pub status: Option<u16>,
    pub latency: Duration,
}

impl Sample {
    fn is_payment(&self) -> bool {
        self.path.starts_with("/payment")
    }
}

/// Summary of a load run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub scenario: Scenario,
    pub total_requests: usize,
    pub transport_errors: usize,
    pub status_counts: BTreeMap<u16, usize>,
    pub error_rate: f64,
    pub payment_success: usize,
    pub payment_failure: usize,
    pub p95_latency_ms: u64,
    pub p95_within_threshold: bool,
    pub error_rate_within_threshold: bool,
}

impl LoadReport {
    /// Aggregates samples into a report.
    pub fn from_samples(scenario: Scenario, samples: &[Sample]) -> Self {
        let mut status_counts = BTreeMap::new();
        let mut transport_errors = 0;
        let mut errors = 0;
        let mut payment_success = 0;
        let mut payment_failure = 0;

        for sample in samples {
            let failed = match sample.status {
                Some(status) => {
                    *status_counts.entry(status).or_insert(0) += 1;
                    scenario.is_error(status)
                }
                None => {
                    transport_errors += 1;
                    true
                }
            };

            if failed {
                errors += 1;
            }

            if sample.is_payment() {
                match sample.status {
                    Some(status) if (200..400).contains(&status) => payment_success += 1,
                    _ => payment_failure += 1,
                }
            }
        }

        let error_rate = if samples.is_empty() {
            0.0
        } else {
            errors as f64 / samples.len() as f64
        };

        let mut latencies: Vec<Duration> = samples.iter().map(|s| s.latency).collect();
        let p95 = percentile(&mut latencies, 95.0).unwrap_or_default();

        Self {
            scenario,
            total_requests: samples.len(),
            transport_errors,
            status_counts,
            error_rate,
            payment_success,
            payment_failure,
            p95_latency_ms: p95.as_millis() as u64,
            p95_within_threshold: p95 < P95_THRESHOLD,
            error_rate_within_threshold: error_rate < ERROR_RATE_THRESHOLD,
        }
    }

    /// Whether every threshold held.
    pub fn passed(&self) -> bool {
        self.p95_within_threshold && self.error_rate_within_threshold
    }
}

/// Nearest-rank percentile. Sorts `values` in place.
pub fn percentile(values: &mut [Duration], pct: f64) -> Option<Duration> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let rank = ((pct / 100.0) * values.len() as f64).ceil() as usize;
    let index = rank.clamp(1, values.len()) - 1;
    Some(values[index])
}

/// Runs the scenario with `options.vus` concurrent virtual users until
/// `options.duration` has elapsed, then reports.
///
/// Requests already in flight when the time is up are allowed to finish.
pub async fn run_load(client: &PeanutsClient, options: &LoadOptions) -> Result<LoadReport> {
    if options.vus == 0 {
        return Err(ClientError::InvalidInput(
            "at least one virtual user is required".to_string(),
        ));
    }

    let deadline = Instant::now()
        .checked_add(options.duration)
        .ok_or_else(|| ClientError::InvalidInput("duration is too long".to_string()))?;
    let mut users = JoinSet::new();

    for _ in 0..options.vus {
        let client = client.clone();
        let scenario = options.scenario;
        let pause = options.pause;
        users.spawn(async move { virtual_user(client, scenario, pause, deadline).await });
    }

    let mut samples = Vec::new();
    while let Some(result) = users.join_next().await {
        let user_samples = result
            .map_err(|e| ClientError::InvalidResponse(format!("virtual user failed: {e}")))?;
        samples.extend(user_samples);
    }

    Ok(LoadReport::from_samples(options.scenario, &samples))
}

async fn virtual_user(
    client: PeanutsClient,
    scenario: Scenario,
    pause: Duration,
    deadline: Instant,
) -> Vec<Sample> {
    let mut samples = Vec::new();

    while Instant::now() < deadline {
        let requests = scenario.requests(&mut rand::rng());

        for (method, path) in requests {
            let started = Instant::now();
            let sample = match client.probe(method, &path).await {
                Ok((status, latency)) => Sample {
                    path,
                    status: Some(status),
                    latency,
                },
                Err(_) => Sample {
                    path,
                    status: None,
                    latency: started.elapsed(),
                },
            };
            samples.push(sample);
        }

        tokio::time::sleep(pause).await;
    }

    samples
}
