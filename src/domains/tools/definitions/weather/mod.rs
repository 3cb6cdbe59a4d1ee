//! Weather tools module.
//!
//! - `current`: current conditions for a coordinate pair
//! - `fetcher`: upstream HTTP fetcher that collapses failures into "no data"
//! - `common`: provider constants, coordinate validation and URL construction

pub mod common;
pub mod current;
pub mod fetcher;

pub use common::UpstreamQuery;
pub use current::{CurrentWeatherParams, CurrentWeatherTool};
pub use fetcher::{HttpFetcher, WeatherFetcher};
