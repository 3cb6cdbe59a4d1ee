//! Current weather tool.
//!
//! Looks up the current conditions for a coordinate pair and hands the
//! provider's document back unmodified.

use std::sync::Arc;

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, warn};

use crate::domains::tools::{ToolDescriptor, ToolHandler, ToolOutcome};

use super::common::{UNAVAILABLE_MESSAGE, UPSTREAM_TIMEOUT, UpstreamQuery};
use super::fetcher::WeatherFetcher;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the current weather lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CurrentWeatherParams {
    /// Latitude of the location.
    #[schemars(description = "Latitude of the location (-90 to 90)")]
    pub latitude: f64,

    /// Longitude of the location.
    #[schemars(description = "Longitude of the location (-180 to 180)")]
    pub longitude: f64,
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Current Weather Tool implementation.
pub struct CurrentWeatherTool {
    descriptor: ToolDescriptor,
    api_base: String,
    fetcher: Arc<dyn WeatherFetcher>,
}

impl CurrentWeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_current_weather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get current weather for a location. \
         Returns the provider's current conditions (temperature, apparent temperature, \
         precipitation, rain, showers, snowfall, cloud cover, wind speed, direction and gusts, \
         pressure, humidity and weather code) for the given latitude and longitude.";

    pub fn new(api_base: impl Into<String>, fetcher: Arc<dyn WeatherFetcher>) -> Self {
        Self {
            descriptor: ToolDescriptor::for_params::<CurrentWeatherParams>(
                Self::NAME,
                Self::DESCRIPTION,
            ),
            api_base: api_base.into(),
            fetcher,
        }
    }

    /// Look up the current weather at a coordinate pair.
    pub async fn handle(&self, latitude: f64, longitude: f64) -> ToolOutcome {
        info!(
            "Current weather requested for latitude={}, longitude={}",
            latitude, longitude
        );

        let query = match UpstreamQuery::new(latitude, longitude) {
            Ok(query) => query,
            Err(e) => {
                warn!("Rejected coordinates: {}", e);
                return ToolOutcome::failure(e.to_string());
            }
        };

        let url = query.forecast_url(&self.api_base);
        match self.fetcher.fetch(&url, UPSTREAM_TIMEOUT).await {
            Some(document) => ToolOutcome::Success(document),
            None => ToolOutcome::failure(UNAVAILABLE_MESSAGE),
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for CurrentWeatherTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, arguments: JsonObject) -> ToolOutcome {
        let params: CurrentWeatherParams =
            match serde_json::from_value(serde_json::Value::Object(arguments)) {
                Ok(params) => params,
                Err(e) => {
                    warn!("Invalid current weather arguments: {}", e);
                    return ToolOutcome::failure(format!("Invalid arguments: {}", e));
                }
            };

        self.handle(params.latitude, params.longitude).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domains::tools::ParamType;
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Fetcher stub that records every URL and replies with a fixed answer.
    pub(crate) struct RecordingFetcher {
        reply: Option<Value>,
        calls: Mutex<Vec<(String, Duration)>>,
    }

    impl RecordingFetcher {
        pub(crate) fn replying(reply: Option<Value>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn calls(&self) -> Vec<(String, Duration)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl WeatherFetcher for RecordingFetcher {
        async fn fetch(&self, url: &str, timeout: Duration) -> Option<Value> {
            self.calls.lock().unwrap().push((url.to_string(), timeout));
            self.reply.clone()
        }
    }

    fn sample_document() -> Value {
        json!({
            "latitude": 47.6,
            "longitude": -122.3,
            "current_units": {"temperature_2m": "°C"},
            "current": {"temperature_2m": 11.2, "weather_code": 3, "is_day": 1}
        })
    }

    fn tool_with(fetcher: Arc<RecordingFetcher>) -> CurrentWeatherTool {
        CurrentWeatherTool::new("https://api.open-meteo.com/v1", fetcher)
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_descriptor_declares_two_required_numbers() {
        let tool = tool_with(RecordingFetcher::replying(None));
        let descriptor = tool.descriptor();
        assert_eq!(descriptor.name(), "get_current_weather");

        let params = descriptor.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "latitude");
        assert_eq!(params[1].name, "longitude");
        assert!(params.iter().all(|p| p.required && p.kind == ParamType::Number));
    }

    #[tokio::test]
    async fn test_document_passes_through_unchanged() {
        let fetcher = RecordingFetcher::replying(Some(sample_document()));
        let tool = tool_with(fetcher.clone());

        let outcome = tool.handle(47.6, -122.3).await;
        assert_eq!(outcome, ToolOutcome::Success(sample_document()));

        let calls = fetcher.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.starts_with(
            "https://api.open-meteo.com/v1/forecast?latitude=47.6&longitude=-122.3&current="
        ));
        assert_eq!(calls[0].1, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_no_data_yields_stable_message() {
        let fetcher = RecordingFetcher::replying(None);
        let tool = tool_with(fetcher.clone());

        let outcome = tool.handle(51.5, -0.12).await;
        assert_eq!(
            outcome,
            ToolOutcome::Failure(
                "Unable to fetch current weather data for this location.".to_string()
            )
        );
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_never_reaches_upstream() {
        let fetcher = RecordingFetcher::replying(Some(sample_document()));
        let tool = tool_with(fetcher.clone());

        for (lat, lon) in [(200.0, 0.0), (-90.1, 0.0), (0.0, 180.5), (f64::NAN, 1.0)] {
            let outcome = tool.handle(lat, lon).await;
            assert!(!outcome.is_success(), "({}, {}) should be rejected", lat, lon);
        }
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_execute_rejects_non_numeric_arguments() {
        let fetcher = RecordingFetcher::replying(Some(sample_document()));
        let tool = tool_with(fetcher.clone());

        let outcome = tool
            .execute(args(json!({"latitude": "north", "longitude": 2.0})))
            .await;
        match outcome {
            ToolOutcome::Failure(message) => assert!(message.starts_with("Invalid arguments")),
            other => panic!("unexpected outcome: {:?}", other),
        }

        let outcome = tool.execute(args(json!({"latitude": 1.0}))).await;
        assert!(!outcome.is_success());
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_execute_accepts_integer_coordinates() {
        let fetcher = RecordingFetcher::replying(Some(sample_document()));
        let tool = tool_with(fetcher.clone());

        let outcome = tool
            .execute(args(json!({"latitude": 48, "longitude": 2})))
            .await;
        assert!(outcome.is_success());
        assert!(fetcher.calls()[0].0.contains("latitude=48.0&longitude=2.0"));
    }
}
