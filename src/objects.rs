use crate::serde_helpers::*;
use chrono::{Datelike, NaiveDate, Weekday};
use rgb::RGB8;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// Objects that have an identifier implement this trait
pub trait Id {
    fn id(&self) -> &str;
}

#[derive(Derivative, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[derivative(Default)]
pub enum RouteType {
    Tramway,
    Subway,
    Rail,
    #[derivative(Default)]
    Bus,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
    // Any other value than 0..7 is invalid in the GTFS
    // However, some bad files might have other values
    Other(u16),
}

impl RouteType {
    pub fn value(&self) -> u16 {
        match self {
            RouteType::Tramway => 0,
            RouteType::Subway => 1,
            RouteType::Rail => 2,
            RouteType::Bus => 3,
            RouteType::Ferry => 4,
            RouteType::CableCar => 5,
            RouteType::Gondola => 6,
            RouteType::Funicular => 7,
            RouteType::Other(i) => *i,
        }
    }
}

impl From<u16> for RouteType {
    fn from(i: u16) -> Self {
        match i {
            0 => RouteType::Tramway,
            1 => RouteType::Subway,
            2 => RouteType::Rail,
            3 => RouteType::Bus,
            4 => RouteType::Ferry,
            5 => RouteType::CableCar,
            6 => RouteType::Gondola,
            7 => RouteType::Funicular,
            _ => RouteType::Other(i),
        }
    }
}

impl<'de> Deserialize<'de> for RouteType {
    fn deserialize<D>(deserializer: D) -> Result<RouteType, D::Error>
    where
        D: Deserializer<'de>,
    {
        u16::deserialize(deserializer).map(RouteType::from)
    }
}

impl Serialize for RouteType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.value())
    }
}

/// Direction of a trip, used as the headsign id of the cleaned trip
#[derive(Derivative, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derivative(Default)]
pub enum DirectionType {
    #[derivative(Default)]
    Outbound,
    Inbound,
}

impl DirectionType {
    pub fn headsign_id(&self) -> u8 {
        match self {
            DirectionType::Outbound => 0,
            DirectionType::Inbound => 1,
        }
    }
}

impl<'de> Deserialize<'de> for DirectionType {
    fn deserialize<D>(deserializer: D) -> Result<DirectionType, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            0 => Ok(DirectionType::Outbound),
            1 => Ok(DirectionType::Inbound),
            i => Err(de::Error::custom(format!(
                "Invalid direction_id `{i}`, expected 0 or 1"
            ))),
        }
    }
}

impl Serialize for DirectionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.headsign_id())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Calendar {
    #[serde(rename = "service_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_bool")]
    pub monday: bool,
    #[serde(deserialize_with = "deserialize_bool")]
    pub tuesday: bool,
    #[serde(deserialize_with = "deserialize_bool")]
    pub wednesday: bool,
    #[serde(deserialize_with = "deserialize_bool")]
    pub thursday: bool,
    #[serde(deserialize_with = "deserialize_bool")]
    pub friday: bool,
    #[serde(deserialize_with = "deserialize_bool")]
    pub saturday: bool,
    #[serde(deserialize_with = "deserialize_bool")]
    pub sunday: bool,
    #[serde(
        deserialize_with = "deserialize_date",
        serialize_with = "serialize_date"
    )]
    pub start_date: NaiveDate,
    #[serde(
        deserialize_with = "deserialize_date",
        serialize_with = "serialize_date"
    )]
    pub end_date: NaiveDate,
}

impl Id for Calendar {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}—{}", self.start_date, self.end_date)
    }
}

impl Calendar {
    pub fn valid_weekday(&self, date: NaiveDate) -> bool {
        match date.weekday() {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Is the calendar running on `date`, ignoring any exception
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date && self.valid_weekday(date)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Exception {
    #[serde(rename = "1")]
    Added,
    #[serde(rename = "2")]
    Deleted,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CalendarDate {
    pub service_id: String,
    #[serde(
        deserialize_with = "deserialize_date",
        serialize_with = "serialize_date"
    )]
    pub date: NaiveDate,
    pub exception_type: Exception,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Stop {
    #[serde(rename = "stop_id")]
    pub id: String,
    #[serde(rename = "stop_code", default)]
    pub code: Option<String>,
    #[serde(rename = "stop_name")]
    pub name: String,
}

impl Id for Stop {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Route {
    #[serde(rename = "route_id")]
    pub id: String,
    #[serde(rename = "route_short_name", default)]
    pub short_name: String,
    #[serde(rename = "route_long_name", default)]
    pub long_name: String,
    pub route_type: RouteType,
    #[serde(default)]
    pub agency_id: Option<String>,
    #[serde(
        rename = "route_color",
        deserialize_with = "deserialize_option_color",
        default
    )]
    pub color: Option<RGB8>,
}

impl Id for Route {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.long_name.is_empty() {
            write!(f, "{}", self.long_name)
        } else {
            write!(f, "{}", self.short_name)
        }
    }
}

/// A trip as handed over by the GTFS reader
///
/// `stop_ids` is the ordered stop sequence of the trip; it does not come
/// from trips.txt and must be filled from the stop times.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Trip {
    #[serde(rename = "trip_id")]
    pub id: String,
    pub route_id: String,
    pub service_id: String,
    #[serde(rename = "trip_headsign", default)]
    pub headsign: Option<String>,
    #[serde(default)]
    pub direction_id: Option<DirectionType>,
    #[serde(skip)]
    pub stop_ids: Vec<String>,
}

impl Id for Trip {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "route id: {}, service id: {}",
            self.route_id, self.service_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            "Long route name",
            format!(
                "{}",
                Route {
                    long_name: "Long route name".to_owned(),
                    ..Route::default()
                }
            )
        );
        assert_eq!(
            "T21",
            format!(
                "{}",
                Route {
                    short_name: "T21".to_owned(),
                    ..Route::default()
                }
            )
        );
        assert_eq!(
            "route id: 5, service id: S1",
            format!(
                "{}",
                Trip {
                    route_id: "5".to_owned(),
                    service_id: "S1".to_owned(),
                    ..Trip::default()
                }
            )
        );
    }

    #[test]
    fn route_type_values() {
        assert_eq!(RouteType::Bus, RouteType::default());
        assert_eq!(RouteType::Bus, RouteType::from(3));
        assert_eq!(RouteType::Other(42), RouteType::from(42));
        assert_eq!(715, RouteType::Other(715).value());
    }

    #[test]
    fn valid_weekday() {
        let calendar = Calendar {
            id: "S1".to_owned(),
            monday: true,
            tuesday: false,
            wednesday: false,
            thursday: false,
            friday: false,
            saturday: true,
            sunday: false,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };
        // 2024-01-01 is a monday
        assert!(calendar.runs_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(!calendar.runs_on(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
        assert!(calendar.runs_on(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()));
        assert!(!calendar.runs_on(NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()));
    }
}
