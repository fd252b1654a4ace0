//! Customization of the Réseau de transport de Longueuil (RTL) bus feed
//!
//! Feed: <http://www.rtl-longueuil.qc.ca/transit/latestfeed/RTL.zip>

use crate::agency::AgencyTools;
use crate::clean::{self, clean_words, clean_words_replacement};
use crate::config::ToolsConfig;
use crate::feed::Feed;
use crate::headsign::HeadsignMerger;
use crate::objects::{Route, RouteType};
use crate::route_trip_spec::RouteTripSpec;
use crate::service;
use crate::Error;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

pub const AGENCY_COLOR: &str = "A32638";

const INDUSTRIEL_SHORT: &str = "Ind.";
const CENTRE_VILLE_SHORT: &str = "Ctr-Ville";
const RTL_SHORT: &str = "R.T.L.";

lazy_static! {
    static ref CLEAN_TAXI: Regex = Regex::new(r"(?i)(taxi)\s*-\s*").unwrap();
    static ref CIVIQUE: Regex = Regex::new(r"(?i)((^|\W)(civique (\d+))(\W|$))").unwrap();
    static ref CENTRE_VILLE: Regex = clean_words(&["centre-ville"]).unwrap();
    static ref TERMINUS: Regex = clean_words(&["terminus"]).unwrap();
    static ref SECTEUR: Regex = clean_words(&["secteur", "secteurs"]).unwrap();
    static ref INDUSTRIEL: Regex = clean_words(&["industriel", "industriels"]).unwrap();
    static ref RTL_LONG: Regex = Regex::new(r"(?i)(du reseau de transport de longueuil)").unwrap();
    static ref CENTRE_VILLE_REPLACEMENT: String = clean_words_replacement(CENTRE_VILLE_SHORT);
    // terminus and secteur are dropped
    static ref DROP_WORD_REPLACEMENT: String = clean_words_replacement("");
    static ref INDUSTRIEL_REPLACEMENT: String = clean_words_replacement(INDUSTRIEL_SHORT);
}

const CIVIQUE_REPLACEMENT: &str = "${2}#${4}${5}";

#[derive(Debug)]
pub struct RtlBusAgencyTools {
    service_ids: Option<HashSet<String>>,
    config: ToolsConfig,
    merger: HeadsignMerger,
    route_trip_specs: HashMap<u32, RouteTripSpec>,
}

impl Default for RtlBusAgencyTools {
    fn default() -> Self {
        RtlBusAgencyTools {
            service_ids: None,
            config: ToolsConfig::default(),
            merger: HeadsignMerger::rtl(),
            route_trip_specs: RouteTripSpec::rtl()
                .into_iter()
                .map(|s| (s.route_id, s))
                .collect(),
        }
    }
}

impl RtlBusAgencyTools {
    /// Tools keeping only the trips and calendars of the given services
    pub fn with_service_ids(service_ids: HashSet<String>) -> Self {
        RtlBusAgencyTools {
            service_ids: Some(service_ids),
            ..Self::default()
        }
    }

    /// Tools configured by `config`, keeping only the services useful around
    /// its reference date
    pub fn for_feed(feed: &Feed, config: &ToolsConfig) -> Result<Self, Error> {
        let service_ids = if config.filter_useless_services {
            Some(service::extract_useful_service_ids(
                feed,
                config.reference_date(),
                config.service_window_days,
            )?)
        } else {
            None
        };
        Ok(RtlBusAgencyTools {
            service_ids,
            config: config.clone(),
            ..Self::default()
        })
    }
}

impl AgencyTools for RtlBusAgencyTools {
    fn agency_color(&self) -> Option<&str> {
        Some(AGENCY_COLOR)
    }

    fn agency_route_type(&self) -> Option<RouteType> {
        Some(RouteType::Bus)
    }

    fn service_ids(&self) -> Option<&HashSet<String>> {
        self.service_ids.as_ref()
    }

    fn exclude_taxi_routes(&self) -> bool {
        self.config.exclude_taxi_routes
    }

    fn route_short_name_width(&self) -> Option<usize> {
        self.config.route_short_name_width
    }

    fn publish_stop_codes(&self) -> bool {
        self.config.stop_codes
    }

    fn route_long_name(&self, route: &Route) -> String {
        let long_name = CLEAN_TAXI.replace_all(&route.long_name, "Taxi ");
        clean::clean_label_fr(&long_name)
    }

    fn clean_trip_headsign(&self, headsign: &str) -> String {
        let headsign = clean::clean_slashes(headsign);
        let headsign = clean::clean_space_chars(&headsign);
        let headsign = CENTRE_VILLE.replace_all(&headsign, CENTRE_VILLE_REPLACEMENT.as_str());
        let headsign = CIVIQUE.replace_all(&headsign, CIVIQUE_REPLACEMENT);
        let headsign = TERMINUS.replace_all(&headsign, DROP_WORD_REPLACEMENT.as_str());
        let headsign = SECTEUR.replace_all(&headsign, DROP_WORD_REPLACEMENT.as_str());
        let headsign = INDUSTRIEL.replace_all(&headsign, INDUSTRIEL_REPLACEMENT.as_str());
        let headsign = clean::clean_space_runs(&headsign);
        let headsign = clean::clean_street_types_fr_ca(&headsign);
        clean::clean_label_fr(&headsign)
    }

    fn clean_stop_name(&self, name: &str) -> String {
        let name = clean::lower_case_upper_case_words(name);
        let name = clean::clean_et(&name);
        let name = RTL_LONG.replace_all(&name, RTL_SHORT);
        let name = CIVIQUE.replace_all(&name, CIVIQUE_REPLACEMENT);
        let name = clean::clean_street_types_fr_ca(&name);
        clean::clean_label_fr(&name)
    }

    fn route_trip_spec(&self, route_id: u32) -> Option<&RouteTripSpec> {
        self.route_trip_specs.get(&route_id)
    }

    fn headsign_merger(&self) -> Option<&HeadsignMerger> {
        Some(&self.merger)
    }
}
