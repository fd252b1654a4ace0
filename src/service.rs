//! Selection of the service ids worth keeping
//!
//! Only the services running during a short window starting at the first
//! day with service are kept; calendars, calendar dates and trips of other
//! services are excluded.

use crate::feed::Feed;
use crate::objects::{Calendar, CalendarDate, Trip};
use crate::Error;
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Half-open range of dates `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ServiceWindow {
    /// `days` must be at least 1 and keep the end inside the supported date range
    pub fn new(start: NaiveDate, days: i64) -> Result<Self, Error> {
        let invalid = || Error::InvalidServiceWindow(days);
        if days < 1 {
            return Err(invalid());
        }
        let end = Duration::try_days(days)
            .and_then(|d| start.checked_add_signed(d))
            .ok_or_else(invalid)?;
        Ok(ServiceWindow { start, end })
    }

    /// The window starting at the first day with service on or after `reference_date`
    ///
    /// The window never extends past the last service date of the feed.
    /// `None` when no service runs on or after `reference_date`.
    pub fn find(
        feed: &Feed,
        reference_date: NaiveDate,
        days: i64,
    ) -> Result<Option<ServiceWindow>, Error> {
        let window = ServiceWindow::new(reference_date, days)?;
        let last = match feed.last_service_date() {
            Some(last) => last,
            None => return Ok(None),
        };
        let service_ids = feed.service_ids();
        let start = reference_date
            .iter_days()
            .take_while(|d| *d <= last)
            .find(|d| service_ids.iter().any(|id| feed.is_active(id, *d)));
        Ok(start.map(|start| {
            let after_last = last.succ_opt().unwrap_or(last);
            let end = start
                .checked_add_signed(window.end - window.start)
                .map_or(after_last, |end| end.min(after_last));
            ServiceWindow { start, end }
        }))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d < self.end)
    }
}

/// The service ids running at least once during the window
pub fn useful_service_ids(feed: &Feed, window: &ServiceWindow) -> HashSet<String> {
    let ids: HashSet<String> = feed
        .service_ids()
        .into_iter()
        .filter(|id| window.dates().any(|d| feed.is_active(id, d)))
        .map(str::to_owned)
        .collect();
    log::debug!(
        "{} useful service ids between {} and {}",
        ids.len(),
        window.start,
        window.end
    );
    ids
}

/// Computes the useful service ids of a feed, an empty set when nothing runs
pub fn extract_useful_service_ids(
    feed: &Feed,
    reference_date: NaiveDate,
    days: i64,
) -> Result<HashSet<String>, Error> {
    match ServiceWindow::find(feed, reference_date, days)? {
        Some(window) => Ok(useful_service_ids(feed, &window)),
        None => {
            log::warn!("no service on or after {}, excluding all", reference_date);
            Ok(HashSet::new())
        }
    }
}

pub fn exclude_useless_calendar(calendar: &Calendar, service_ids: &HashSet<String>) -> bool {
    !service_ids.contains(&calendar.id)
}

pub fn exclude_useless_calendar_date(
    calendar_date: &CalendarDate,
    service_ids: &HashSet<String>,
) -> bool {
    !service_ids.contains(&calendar_date.service_id)
}

pub fn exclude_useless_trip(trip: &Trip, service_ids: &HashSet<String>) -> bool {
    !service_ids.contains(&trip.service_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Exception;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar(id: &str, week: bool, weekend: bool, start: NaiveDate, end: NaiveDate) -> Calendar {
        Calendar {
            id: id.to_owned(),
            monday: week,
            tuesday: week,
            wednesday: week,
            thursday: week,
            friday: week,
            saturday: weekend,
            sunday: weekend,
            start_date: start,
            end_date: end,
        }
    }

    // 2024-03-04 is a monday
    fn feed() -> Feed {
        Feed::from_records(
            vec![],
            vec![],
            vec![],
            vec![
                calendar("winter_week", true, false, date(2024, 1, 1), date(2024, 3, 10)),
                calendar("spring_week", true, false, date(2024, 3, 11), date(2024, 6, 30)),
                calendar("weekend", false, true, date(2024, 1, 1), date(2024, 6, 30)),
            ],
            vec![CalendarDate {
                service_id: "special".to_owned(),
                date: date(2024, 3, 20),
                exception_type: Exception::Added,
            }],
        )
    }

    #[test]
    fn window_starts_on_first_day_with_service() {
        let window = ServiceWindow::find(&feed(), date(2024, 3, 4), 7)
            .unwrap()
            .unwrap();
        assert_eq!(date(2024, 3, 4), window.start);
        assert_eq!(date(2024, 3, 11), window.end);
        assert_eq!(7, window.dates().count());

        let none = Feed::from_records(
            vec![],
            vec![],
            vec![],
            vec![calendar("w", true, false, date(2024, 1, 1), date(2024, 1, 5))],
            vec![],
        );
        // 2024-01-06 is a saturday, the calendar only runs on week days
        assert_eq!(None, ServiceWindow::find(&none, date(2024, 1, 6), 7).unwrap());
        // cut the day after the last service date
        assert_eq!(
            Some(ServiceWindow {
                start: date(2024, 1, 1),
                end: date(2024, 1, 6),
            }),
            ServiceWindow::find(&none, date(2023, 12, 1), 7).unwrap()
        );
    }

    #[test]
    fn window_sizes() {
        assert!(matches!(
            ServiceWindow::new(date(2024, 3, 4), 0),
            Err(Error::InvalidServiceWindow(0))
        ));
        assert!(matches!(
            ServiceWindow::new(date(2024, 3, 4), 100_000_000),
            Err(Error::InvalidServiceWindow(100_000_000))
        ));
        assert!(matches!(
            ServiceWindow::new(date(2024, 3, 4), i64::MAX),
            Err(Error::InvalidServiceWindow(_))
        ));
        let window = ServiceWindow::find(&feed(), date(2024, 3, 4), 1_000_000)
            .unwrap()
            .unwrap();
        assert_eq!(date(2024, 7, 1), window.end);
        assert_eq!(119, window.dates().count());
    }

    #[test]
    fn useful_ids() {
        let feed = feed();
        let window = ServiceWindow::new(date(2024, 3, 4), 7).unwrap();
        let ids = useful_service_ids(&feed, &window);
        assert_eq!(
            vec!["weekend", "winter_week"],
            itertools::sorted(ids.iter().map(String::as_str)).collect::<Vec<_>>()
        );

        let window = ServiceWindow::new(date(2024, 3, 18), 7).unwrap();
        let ids = useful_service_ids(&feed, &window);
        assert!(ids.contains("special"));
        assert!(ids.contains("spring_week"));
        assert!(!ids.contains("winter_week"));
    }

    #[test]
    fn nothing_left() {
        assert!(extract_useful_service_ids(&feed(), date(2025, 1, 1), 7)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn exclusions() {
        let ids: HashSet<String> = vec!["weekend".to_owned()].into_iter().collect();
        let feed = feed();
        assert!(!exclude_useless_calendar(&feed.calendar["weekend"], &ids));
        assert!(exclude_useless_calendar(&feed.calendar["winter_week"], &ids));
        assert!(exclude_useless_calendar_date(&feed.calendar_dates["special"][0], &ids));
        let trip = Trip {
            id: "t".to_owned(),
            service_id: "weekend".to_owned(),
            ..Trip::default()
        };
        assert!(!exclude_useless_trip(&trip, &ids));
    }
}
