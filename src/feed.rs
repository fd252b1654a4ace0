use crate::{objects::*, Error};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// The GTFS records handed over by the reader, indexed by id
///
/// Reading the GTFS archive itself is left to the caller.
#[derive(Default, Debug)]
pub struct Feed {
    pub calendar: HashMap<String, Calendar>,
    pub calendar_dates: HashMap<String, Vec<CalendarDate>>,
    pub stops: HashMap<String, Stop>,
    pub routes: HashMap<String, Route>,
    pub trips: HashMap<String, Trip>,
}

impl Feed {
    pub fn from_records(
        routes: Vec<Route>,
        trips: Vec<Trip>,
        stops: Vec<Stop>,
        calendars: Vec<Calendar>,
        calendar_dates: Vec<CalendarDate>,
    ) -> Feed {
        Feed {
            calendar: to_map(calendars),
            calendar_dates: to_calendar_dates(calendar_dates),
            stops: to_map(stops),
            routes: to_map(routes),
            trips: to_map(trips),
        }
    }

    pub fn print_stats(&self) {
        log::info!("GTFS data:");
        log::info!("  Stops: {}", self.stops.len());
        log::info!("  Routes: {}", self.routes.len());
        log::info!("  Trips: {}", self.trips.len());
        log::info!("  Calendars: {}", self.calendar.len());
        log::info!("  Calendar dates: {}", self.calendar_dates.len());
    }

    /// Does the service run on `date`, exceptions included
    pub fn is_active(&self, service_id: &str, date: NaiveDate) -> bool {
        let exception = self
            .calendar_dates
            .get(service_id)
            .iter()
            .flat_map(|e| e.iter())
            .find(|cd| cd.date == date)
            .map(|cd| cd.exception_type);
        match exception {
            Some(Exception::Added) => true,
            Some(Exception::Deleted) => false,
            None => self
                .calendar
                .get(service_id)
                .map_or(false, |c| c.runs_on(date)),
        }
    }

    /// All the service ids known by the calendars and the calendar dates
    pub fn service_ids(&self) -> BTreeSet<&str> {
        self.calendar
            .keys()
            .chain(self.calendar_dates.keys())
            .map(String::as_str)
            .collect()
    }

    /// The last date on which any service can run
    pub fn last_service_date(&self) -> Option<NaiveDate> {
        let calendar_end = self.calendar.values().map(|c| c.end_date);
        let added_dates = self
            .calendar_dates
            .values()
            .flatten()
            .filter(|cd| cd.exception_type == Exception::Added)
            .map(|cd| cd.date);
        calendar_end.chain(added_dates).max()
    }

    /// The ids of the stops served by the given trips
    pub fn stop_ids_of_trips<'a>(
        &self,
        trips: impl IntoIterator<Item = &'a Trip>,
    ) -> BTreeSet<&'a str> {
        trips
            .into_iter()
            .flat_map(|t| t.stop_ids.iter().map(String::as_str))
            .collect()
    }

    pub fn get_stop<'a>(&'a self, id: &str) -> Result<&'a Stop, Error> {
        self.stops
            .get(id)
            .ok_or_else(|| Error::ReferenceError(id.to_owned()))
    }

    pub fn get_trip<'a>(&'a self, id: &str) -> Result<&'a Trip, Error> {
        self.trips
            .get(id)
            .ok_or_else(|| Error::ReferenceError(id.to_owned()))
    }

    pub fn get_route<'a>(&'a self, id: &str) -> Result<&'a Route, Error> {
        self.routes
            .get(id)
            .ok_or_else(|| Error::ReferenceError(id.to_owned()))
    }

    pub fn get_calendar<'a>(&'a self, id: &str) -> Result<&'a Calendar, Error> {
        self.calendar
            .get(id)
            .ok_or_else(|| Error::ReferenceError(id.to_owned()))
    }
}

fn to_map<O: Id>(elements: impl IntoIterator<Item = O>) -> HashMap<String, O> {
    elements
        .into_iter()
        .map(|e| (e.id().to_owned(), e))
        .collect()
}

fn to_calendar_dates(cd: Vec<CalendarDate>) -> HashMap<String, Vec<CalendarDate>> {
    let mut res = HashMap::default();
    for c in cd {
        let cal = res.entry(c.service_id.to_owned()).or_insert_with(Vec::new);
        cal.push(c);
    }
    res
}
