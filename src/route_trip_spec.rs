//! Fixed directions for the routes whose `trip_headsign` cannot be trusted
//!
//! Each direction is described by its headsign and by an ordered list of key
//! stops. A trip belongs to the direction whose first key stop it serves
//! before its last key stop.

use crate::objects::DirectionType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripDirection {
    pub headsign: String,
    pub stop_ids: Vec<String>,
}

impl TripDirection {
    pub fn new(headsign: &str, stop_ids: &[&str]) -> Self {
        TripDirection {
            headsign: headsign.to_owned(),
            stop_ids: stop_ids.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    fn is_served_by(&self, trip_stop_ids: &[String]) -> bool {
        let (first, last) = match (self.stop_ids.first(), self.stop_ids.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return false,
        };
        let first_idx = trip_stop_ids.iter().position(|s| s == first);
        let last_idx = trip_stop_ids.iter().rposition(|s| s == last);
        matches!((first_idx, last_idx), (Some(f), Some(l)) if f < l)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTripSpec {
    pub route_id: u32,
    pub outbound: TripDirection,
    pub inbound: TripDirection,
}

impl RouteTripSpec {
    pub fn direction(&self, direction: DirectionType) -> &TripDirection {
        match direction {
            DirectionType::Outbound => &self.outbound,
            DirectionType::Inbound => &self.inbound,
        }
    }

    pub fn headsign(&self, direction: DirectionType) -> &str {
        &self.direction(direction).headsign
    }

    /// The direction of a trip given its ordered stops
    pub fn direction_of(&self, trip_stop_ids: &[String]) -> Option<DirectionType> {
        [DirectionType::Outbound, DirectionType::Inbound]
            .into_iter()
            .find(|d| self.direction(*d).is_served_by(trip_stop_ids))
    }

    /// The routes of the Longueuil RTL bus network with a wrong `trip_headsign`
    pub fn rtl() -> Vec<RouteTripSpec> {
        vec![
            RouteTripSpec {
                route_id: 77,
                outbound: TripDirection::new(
                    "Parc Ind. Brossard",
                    &[
                        "3199", // Thurber et De Gentilly est #CEGEP
                        "1165", // ++
                        "3213", // Isabelle et av. Illinois #PARC_IND
                    ],
                ),
                inbound: TripDirection::new(
                    "CÉGEP Édouard-Montpetit",
                    &[
                        "3213", // Isabelle et av. Illinois #PARC_IND
                        "3502", // boul. Taschereau et av. Auteuil
                        "3199", // Thurber et De Gentilly est #CEGEP
                    ],
                ),
            },
            RouteTripSpec {
                route_id: 170,
                outbound: TripDirection::new(
                    "Jacques-Cartier",
                    &[
                        "3289", // Cartier et METRO PAPINEAU
                        "1865", // ++
                        "3894", // Maréchal et Montarville
                    ],
                ),
                inbound: TripDirection::new(
                    "Métro Papineau",
                    &[
                        "3894", // Maréchal et Montarville
                        "1904", // boul. Jacques-Cartier ouest et de Lyon
                        "3949", // ==
                        "1920", // !=
                        "1921", // !=
                        "5087", // !=
                        "3285", // != av. De Lorimier et Sainte-Catherine est
                        "3287", // ==
                        "3289", // Cartier et METRO PAPINEAU
                    ],
                ),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| (*s).to_owned()).collect()
    }

    fn route(route_id: u32) -> RouteTripSpec {
        RouteTripSpec::rtl()
            .into_iter()
            .find(|s| s.route_id == route_id)
            .unwrap()
    }

    #[test]
    fn directions_from_stops() {
        let spec = route(77);
        assert_eq!(
            Some(DirectionType::Outbound),
            spec.direction_of(&stops(&["3199", "2000", "1165", "3213"]))
        );
        assert_eq!(
            Some(DirectionType::Inbound),
            spec.direction_of(&stops(&["3213", "3502", "3199"]))
        );
        assert_eq!(None, spec.direction_of(&stops(&["3199", "1165"])));
        assert_eq!(None, spec.direction_of(&[]));
    }

    #[test]
    fn loop_trip_takes_first_matching_direction() {
        let spec = route(170);
        // both ends of both directions are the same two stops
        assert_eq!(
            Some(DirectionType::Outbound),
            spec.direction_of(&stops(&["3289", "1865", "3894", "1904", "3289"]))
        );
        assert_eq!("Métro Papineau", spec.headsign(DirectionType::Inbound));
    }
}
