use std::path::Path;

use clap::Parser;

use crate::data::filter::AvailabilityPolicy;
use crate::data::loader::DEFAULT_SOURCE;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "event-finder",
    version,
    about = "Browse and filter event listings",
    long_about = "Event Finder loads a list of events and lets you narrow it down by category, keyword, city and month.\n\nExamples:\n  event-finder\n  event-finder events.csv\n  event-finder https://example.com/lookups.json --availability highlight\n\nLogging is controlled with RUST_LOG (e.g. RUST_LOG=debug)."
)]
pub struct Args {
    /// Event list to open at startup: a .json or .csv file, or an http(s) URL.
    /// Defaults to lookups.json in the working directory when present.
    pub source: Option<String>,

    /// How filter options that would match nothing are shown.
    #[arg(long, value_enum, default_value_t = AvailabilityPolicy::Disable)]
    pub availability: AvailabilityPolicy,
}

impl Args {
    /// The source to load at startup, if any.
    pub fn startup_source(&self) -> Option<String> {
        match &self.source {
            Some(source) => Some(source.clone()),
            None if Path::new(DEFAULT_SOURCE).exists() => Some(DEFAULT_SOURCE.to_string()),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["event-finder"]).unwrap();
        assert!(args.source.is_none());
        assert_eq!(args.availability, AvailabilityPolicy::Disable);
    }

    #[test]
    fn test_source_and_policy() {
        let args = Args::try_parse_from([
            "event-finder",
            "events.csv",
            "--availability",
            "highlight",
        ])
        .unwrap();
        assert_eq!(args.startup_source().as_deref(), Some("events.csv"));
        assert_eq!(args.availability, AvailabilityPolicy::Highlight);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(Args::try_parse_from(["event-finder", "--availability", "hide"]).is_err());
    }
}
