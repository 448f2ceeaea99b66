use std::path::PathBuf;

use clap::Parser;

use crate::services::render_service::DEFAULT_OUTPUT;
use crate::utils::TimeScale;

#[derive(Debug, Parser)]
#[command(
    name = "neo-today",
    version,
    about = "Plot today's near-Earth object close approaches from NASA NeoWs"
)]
pub struct CliArgs {
    /// NASA API key (https://api.nasa.gov)
    #[arg(env = "NASA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Where to write the HTML chart
    #[arg(long, short, env = "NEO_OUTPUT", value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Time scale for close-approach times
    #[arg(long, env = "NEO_TIME_SCALE", value_enum, default_value_t = TimeScale::Utc)]
    pub time_scale: TimeScale,

    /// HTTP timeout for the feed request
    #[arg(long, env = "NEO_TIMEOUT_SECS", value_name = "SECONDS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Override the feed endpoint
    #[arg(long, env = "NEO_FEED_URL", value_name = "URL")]
    pub feed_url: Option<String>,

    /// Write the chart without opening it in a browser
    #[arg(long)]
    pub no_open: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_key_and_flags() {
        let args = CliArgs::try_parse_from([
            "neo-today",
            "MY_KEY",
            "--output",
            "out.html",
            "--time-scale",
            "tdb",
            "--timeout-secs",
            "5",
            "--no-open",
        ])
        .unwrap();

        assert_eq!(args.api_key.as_deref(), Some("MY_KEY"));
        assert_eq!(args.output, PathBuf::from("out.html"));
        assert_eq!(args.time_scale, TimeScale::Tdb);
        assert_eq!(args.timeout_secs, 5);
        assert!(args.no_open);
        assert!(!args.verbose);
    }

    #[test]
    fn test_browser_opens_by_default() {
        let args = CliArgs::try_parse_from(["neo-today", "KEY"]).unwrap();
        assert!(!args.no_open);
    }

    #[test]
    fn test_rejects_unknown_time_scale() {
        assert!(CliArgs::try_parse_from(["neo-today", "KEY", "--time-scale", "gps"]).is_err());
    }
}
