use crate::clean;
use crate::headsign::HeadsignMerger;
use crate::objects::{Calendar, CalendarDate, DirectionType, Route, RouteType, Stop, Trip};
use crate::route_trip_spec::RouteTripSpec;
use crate::serde_helpers::parse_color;
use crate::service;
use crate::Error;
use rgb::RGB8;
use std::collections::HashSet;

/// Offset of the numeric ids given to the `T<n>` (taxi) routes
pub const TAXI_ROUTE_ID_OFFSET: u32 = 800;

/// Customization hooks of an agency
///
/// Every hook has a default behavior; an agency only overrides what its feed
/// needs.
pub trait AgencyTools {
    /// `RRGGBB` color of the agency
    fn agency_color(&self) -> Option<&str> {
        None
    }

    fn agency_rgb(&self) -> Result<Option<RGB8>, Error> {
        self.agency_color().map(parse_color).transpose()
    }

    /// Only the routes of this type are kept, all of them when `None`
    fn agency_route_type(&self) -> Option<RouteType> {
        None
    }

    /// The service ids to keep, every service when `None`
    fn service_ids(&self) -> Option<&HashSet<String>> {
        None
    }

    fn excluding_all(&self) -> bool {
        self.service_ids().map_or(false, HashSet::is_empty)
    }

    fn exclude_calendar(&self, calendar: &Calendar) -> bool {
        self.service_ids()
            .map_or(false, |ids| service::exclude_useless_calendar(calendar, ids))
    }

    fn exclude_calendar_date(&self, calendar_date: &CalendarDate) -> bool {
        self.service_ids().map_or(false, |ids| {
            service::exclude_useless_calendar_date(calendar_date, ids)
        })
    }

    fn exclude_trip(&self, trip: &Trip) -> bool {
        self.service_ids()
            .map_or(false, |ids| service::exclude_useless_trip(trip, ids))
    }

    /// Taxi routes are only dropped when this returns true
    fn exclude_taxi_routes(&self) -> bool {
        false
    }

    fn exclude_route(&self, route: &Route) -> bool {
        let other_type = self
            .agency_route_type()
            .map_or(false, |route_type| route.route_type != route_type);
        other_type || (self.exclude_taxi_routes() && is_taxi_route(route))
    }

    /// Numeric id of a route, `T<n>` routes are numbered from [TAXI_ROUTE_ID_OFFSET]
    fn route_id(&self, route: &Route) -> Result<u32, Error> {
        let invalid = || Error::InvalidRouteId(route.id.clone());
        let id = route.id.trim();
        match id.strip_prefix(|c: char| c == 'T' || c == 't') {
            Some(taxi) => taxi
                .parse::<u32>()
                .map(|n| TAXI_ROUTE_ID_OFFSET + n)
                .map_err(|_| invalid()),
            None => id.parse::<u32>().map_err(|_| invalid()),
        }
    }

    /// Width the route short names are left padded to
    fn route_short_name_width(&self) -> Option<usize> {
        None
    }

    fn route_short_name(&self, route: &Route) -> String {
        let short_name = route.short_name.trim();
        match self.route_short_name_width() {
            Some(width) => format!("{:>width$}", short_name, width = width),
            None => short_name.to_owned(),
        }
    }

    fn route_long_name(&self, route: &Route) -> String {
        clean::clean_label_fr(&route.long_name)
    }

    fn publish_stop_codes(&self) -> bool {
        true
    }

    fn stop_code(&self, stop: &Stop) -> Option<String> {
        if !self.publish_stop_codes() {
            return None;
        }
        stop.code.clone().filter(|c| !c.trim().is_empty())
    }

    fn clean_trip_headsign(&self, headsign: &str) -> String {
        clean::clean_label_fr(headsign)
    }

    fn clean_stop_name(&self, name: &str) -> String {
        clean::clean_label_fr(name)
    }

    /// Routes whose directions are fixed instead of read from the feed
    fn route_trip_spec(&self, _route_id: u32) -> Option<&RouteTripSpec> {
        None
    }

    /// Direction and cleaned headsign of a trip
    ///
    /// `None` when the trip has nothing to display.
    fn trip_headsign(
        &self,
        route_id: u32,
        trip: &Trip,
    ) -> Result<Option<(DirectionType, String)>, Error> {
        if let Some(spec) = self.route_trip_spec(route_id) {
            let direction = spec
                .direction_of(&trip.stop_ids)
                .ok_or_else(|| Error::UnmatchedTripStops {
                    route_id,
                    trip_id: trip.id.clone(),
                })?;
            return Ok(Some((direction, spec.headsign(direction).to_owned())));
        }
        let headsign = trip
            .headsign
            .as_deref()
            .map(|h| self.clean_trip_headsign(h))
            .filter(|h| !h.is_empty());
        Ok(headsign.map(|h| (trip.direction_id.unwrap_or_default(), h)))
    }

    /// The merge table of the agency, only identical headsigns merge without one
    fn headsign_merger(&self) -> Option<&HeadsignMerger> {
        None
    }

    /// Merges two different headsigns found for the same route direction
    fn merge_headsign(&self, route_id: u32, headsign: &str, other: &str) -> Result<String, Error> {
        match self.headsign_merger() {
            Some(merger) => merger.merge(route_id, headsign, other),
            None => HeadsignMerger::default().merge(route_id, headsign, other),
        }
    }

    /// Folds all the headsigns of a route direction into one
    fn merge_headsigns(&self, route_id: u32, headsigns: &[String]) -> Result<Option<String>, Error> {
        let headsigns = headsigns.iter().map(String::as_str);
        match self.headsign_merger() {
            Some(merger) => merger.merge_all(route_id, headsigns),
            None => HeadsignMerger::default().merge_all(route_id, headsigns),
        }
    }
}

/// Taxi routes have a `T<n>` short name
pub fn is_taxi_route(route: &Route) -> bool {
    route.short_name.trim_start().starts_with('T')
}

/// Agency without any customization
#[derive(Debug, Default)]
pub struct DefaultAgencyTools;

impl AgencyTools for DefaultAgencyTools {}
