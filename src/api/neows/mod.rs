pub mod client;
pub mod models;
#[cfg(test)]
pub mod test_support;

pub use client::NeoWsClient;
pub use models::{ApiError, FeedResponse, NeoObject};
