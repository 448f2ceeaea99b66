use std::path::PathBuf;
use std::time::Duration;

use crate::api::neows::NeoWsClient;
use crate::cli::CliArgs;
use crate::services::render_service::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::utils::{NeoError, TimeScale};

/// Validated settings for one run
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub feed_url: String,
    pub timeout: Duration,
    pub time_scale: TimeScale,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub open: bool,
}

impl AppConfig {
    pub fn from_args(args: &CliArgs) -> Result<Self, NeoError> {
        let api_key = args
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                NeoError::Config("an API key is required (argument or NASA_API_KEY)".to_string())
            })?
            .to_string();

        if args.timeout_secs == 0 {
            return Err(NeoError::Config("timeout must be at least one second".to_string()));
        }

        let feed_url = args
            .feed_url
            .clone()
            .unwrap_or_else(|| NeoWsClient::DEFAULT_FEED_URL.to_string());

        Ok(Self {
            api_key,
            feed_url,
            timeout: Duration::from_secs(args.timeout_secs),
            time_scale: args.time_scale,
            output: args.output.clone(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            open: !args.no_open,
        })
    }

    pub fn client(&self) -> Result<NeoWsClient, NeoError> {
        NeoWsClient::with_base_url(self.api_key.clone(), self.feed_url.clone(), self.timeout)
            .map_err(NeoError::from)
    }
}
