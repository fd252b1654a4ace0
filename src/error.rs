use thiserror::Error;

/// An error that can occur when cleaning or filtering GTFS data.
#[derive(Error, Debug)]
pub enum Error {
    #[error("The id {0} is not known")]
    ReferenceError(String),
    #[error("'{0}' is not a valid route id")]
    InvalidRouteId(String),
    #[error("Unexpected trips to merge on route {route_id}: '{headsign}' & '{other}'")]
    UnexpectedMerge {
        route_id: u32,
        headsign: String,
        other: String,
    },
    #[error("trip {trip_id} of route {route_id} matches no known direction")]
    UnmatchedTripStops { route_id: u32, trip_id: String },
    #[error("routes {route_id} and {other_route_id} both map to route id {numeric_id}")]
    DuplicateRouteId {
        numeric_id: u32,
        route_id: String,
        other_route_id: String,
    },
    #[error("{0} days is not a valid service window")]
    InvalidServiceWindow(i64),
    #[error("'{0}' is not a valid color")]
    InvalidColor(String),
    #[error("impossible to read configuration")]
    Config(#[from] serde_json::Error),
}
