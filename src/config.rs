use crate::serde_helpers::{deserialize_option_date, serialize_option_date};
use crate::Error;
use chrono::{Local, NaiveDate};

/// Settings of the agency customization
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// First date to look for service from, today when absent
    #[serde(
        deserialize_with = "deserialize_option_date",
        serialize_with = "serialize_option_date"
    )]
    pub reference_date: Option<NaiveDate>,
    /// Number of days of service kept from the first day with service
    pub service_window_days: i64,
    /// When false, every calendar and trip is kept
    pub filter_useless_services: bool,
    /// Drops the taxi routes, whose short name starts with `T`
    pub exclude_taxi_routes: bool,
    /// Left pads the route short names with spaces up to this width
    pub route_short_name_width: Option<usize>,
    /// When false, the stops are published without their code
    pub stop_codes: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            reference_date: None,
            service_window_days: 7,
            filter_useless_services: true,
            exclude_taxi_routes: false,
            route_short_name_width: None,
            stop_codes: true,
        }
    }
}

impl ToolsConfig {
    pub fn from_json(json: &str) -> Result<ToolsConfig, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
