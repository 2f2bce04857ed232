//! Load CLI command.

use std::time::Duration;

use clap::Parser;

use crate::load::{LoadOptions, Scenario};

/// Traffic generation options.
#[derive(Debug, Parser)]
pub struct LoadCommand {
    /// Number of concurrent virtual users.
    #[arg(long, default_value_t = 5)]
    pub vus: usize,

    /// How long to run, e.g. `30s`, `2m`, `500ms`.
    #[arg(long, default_value = "30s")]
    pub duration: humantime::Duration,

    /// Which requests each virtual user sends.
    #[arg(long, value_enum, default_value_t = Scenario::Mixed)]
    pub scenario: Scenario,

    /// Pause between iterations in milliseconds (default depends on scenario).
    #[arg(long)]
    pub pause_ms: Option<u64>,
}

impl LoadCommand {
    pub fn options(&self) -> LoadOptions {
        LoadOptions {
            vus: self.vus,
            duration: self.duration.into(),
            scenario: self.scenario,
            pause: self
                .pause_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| self.scenario.default_pause()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_units() {
        let parse = |raw: &str| {
            LoadCommand::try_parse_from(["load", "--duration", raw])
                .map(|command| command.options().duration)
        };

        assert_eq!(parse("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse("1h 30m").unwrap(), Duration::from_secs(5400));
    }

    #[test]
    fn test_duration_rejects_garbage() {
        for raw in ["fast", "10parsecs", ""] {
            assert!(
                LoadCommand::try_parse_from(["load", "--duration", raw]).is_err(),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn test_duration_overflow_is_an_error() {
        for raw in ["9999999999999999999h", "9999999999999999999m"] {
            assert!(
                LoadCommand::try_parse_from(["load", "--duration", raw]).is_err(),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn test_default_pause_follows_scenario() {
        let command = LoadCommand::try_parse_from(["load", "--scenario", "payments"]).unwrap();
        let options = command.options();

        assert_eq!(options.vus, 5);
        assert_eq!(options.duration, Duration::from_secs(30));
        assert_eq!(options.pause, Duration::from_millis(100));
    }

    #[test]
    fn test_explicit_pause() {
        let command = LoadCommand::try_parse_from(["load", "--pause-ms", "0"]).unwrap();
        assert_eq!(command.options().pause, Duration::ZERO);
        assert_eq!(command.options().scenario, Scenario::Mixed);
    }
}
