//! Client sync integration tests

mod api_test;
#[cfg(feature = "ssr")]
mod round_trip_test;

use topicvote::egui_app::{ApiClient, Config};
use topicvote::shared::AppConfig;

/// API client pointed at `base_url`
pub fn api_for(base_url: &str) -> ApiClient {
    let builder = AppConfig::builder().server_url(base_url.to_string());
    ApiClient::new(Config::with_builder(builder).expect("valid test URL"))
}
