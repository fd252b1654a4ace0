use crate::agency::AgencyTools;
use crate::feed::Feed;
use crate::objects::{DirectionType, Route, Trip};
use crate::serde_helpers::format_color;
use crate::Error;
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanRoute {
    pub id: u32,
    pub short_name: String,
    pub long_name: String,
    /// `RRGGBB`, the agency color when the route has none
    pub color: Option<String>,
}

/// One direction of a route with its display headsign
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanTrip {
    pub route_id: u32,
    pub direction: DirectionType,
    pub headsign: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanStop {
    pub id: String,
    pub code: Option<String>,
    pub name: String,
}

/// The labels produced for the downstream application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanedFeed {
    pub routes: Vec<CleanRoute>,
    pub trips: Vec<CleanTrip>,
    pub stops: Vec<CleanStop>,
    pub service_ids: BTreeSet<String>,
}

impl CleanedFeed {
    pub fn headsign(&self, route_id: u32, direction: DirectionType) -> Option<&str> {
        self.trips
            .iter()
            .find(|t| t.route_id == route_id && t.direction == direction)
            .map(|t| t.headsign.as_str())
    }

    pub fn route(&self, route_id: u32) -> Option<&CleanRoute> {
        self.routes.iter().find(|r| r.id == route_id)
    }

    pub fn stop(&self, stop_id: &str) -> Option<&CleanStop> {
        self.stops.iter().find(|s| s.id == stop_id)
    }
}

/// Applies the agency hooks to every record of the feed
pub fn process_feed<T: AgencyTools + ?Sized>(tools: &T, feed: &Feed) -> Result<CleanedFeed, Error> {
    let now = Instant::now();
    log::info!("Generating labels...");
    feed.print_stats();
    if tools.excluding_all() {
        log::warn!("no useful service, excluding all");
        return Ok(CleanedFeed::default());
    }
    let agency_color = tools.agency_rgb()?;

    let mut routes: BTreeMap<u32, &Route> = BTreeMap::new();
    let mut route_ids: HashMap<&str, u32> = HashMap::new();
    for route in feed.routes.values() {
        if tools.exclude_route(route) {
            log::debug!("excluding route {}", route.id);
            continue;
        }
        let route_id = tools.route_id(route)?;
        if let Some(other) = routes.insert(route_id, route) {
            let (first, second) = if other.id < route.id {
                (other, route)
            } else {
                (route, other)
            };
            return Err(Error::DuplicateRouteId {
                numeric_id: route_id,
                route_id: first.id.clone(),
                other_route_id: second.id.clone(),
            });
        }
        route_ids.insert(route.id.as_str(), route_id);
    }

    let mut kept_trips: Vec<&Trip> = Vec::new();
    let mut headsigns: BTreeMap<(u32, DirectionType), Vec<String>> = BTreeMap::new();
    // trip ids are sorted so that merges always happen in the same order
    for trip in feed.trips.values().sorted_by(|a, b| a.id.cmp(&b.id)) {
        if tools.exclude_trip(trip) {
            continue;
        }
        let route = feed.get_route(&trip.route_id)?;
        let route_id = match route_ids.get(route.id.as_str()) {
            Some(route_id) => *route_id,
            None => continue,
        };
        kept_trips.push(trip);
        if let Some((direction, headsign)) = tools.trip_headsign(route_id, trip)? {
            let seen = headsigns.entry((route_id, direction)).or_default();
            if !seen.contains(&headsign) {
                seen.push(headsign);
            }
        }
    }

    let mut trips = Vec::with_capacity(headsigns.len());
    for ((route_id, direction), seen) in headsigns {
        if let Some(headsign) = tools.merge_headsigns(route_id, &seen)? {
            trips.push(CleanTrip {
                route_id,
                direction,
                headsign,
            });
        }
    }

    let routes = routes
        .into_iter()
        .map(|(id, route)| CleanRoute {
            id,
            short_name: tools.route_short_name(route),
            long_name: tools.route_long_name(route),
            color: route.color.or(agency_color).as_ref().map(format_color),
        })
        .collect();

    let stops = feed
        .stop_ids_of_trips(kept_trips.iter().copied())
        .into_iter()
        .map(|stop_id| {
            let stop = feed.get_stop(stop_id)?;
            Ok(CleanStop {
                id: stop.id.clone(),
                code: tools.stop_code(stop),
                name: tools.clean_stop_name(&stop.name),
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let service_ids = feed
        .calendar
        .values()
        .filter(|c| !tools.exclude_calendar(c))
        .map(|c| c.id.clone())
        .chain(
            feed.calendar_dates
                .values()
                .flatten()
                .filter(|cd| !tools.exclude_calendar_date(cd))
                .map(|cd| cd.service_id.clone()),
        )
        .collect();

    let cleaned = CleanedFeed {
        routes,
        trips,
        stops,
        service_ids,
    };
    log::info!(
        "Generating labels... DONE in {} ms ({} routes, {} directions, {} stops).",
        now.elapsed().as_millis(),
        cleaned.routes.len(),
        cleaned.trips.len(),
        cleaned.stops.len()
    );
    Ok(cleaned)
}
