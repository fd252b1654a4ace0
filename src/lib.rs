/*! Cleans the labels of the [Réseau de transport de Longueuil](http://www.rtl-longueuil.qc.ca) (RTL) bus GTFS feed.

The crate takes the records of an already read GTFS feed and produces the
route names, trip headsigns and stop names shown to riders:
* labels are rewritten by ordered regular expression rules (French street types, saints, articles…),
* the different headsigns found for a route direction are merged into one,
* calendars and trips of services that do not run soon are dropped.

```
use longueuil_rtl_bus::{process_feed, Feed, RtlBusAgencyTools};

let feed = Feed::default();
let cleaned = process_feed(&RtlBusAgencyTools::default(), &feed).unwrap();
assert!(cleaned.routes.is_empty());
```

The hooks of [AgencyTools] all have a default behavior, see [DefaultAgencyTools].
*/
#[macro_use]
extern crate derivative;
#[macro_use]
extern crate serde_derive;

pub mod agency;
pub mod clean;
pub mod config;
mod error;
mod feed;
pub mod headsign;
pub mod objects;
pub mod process;
pub mod route_trip_spec;
pub mod rtl;
mod serde_helpers;
pub mod service;


pub use agency::{AgencyTools, DefaultAgencyTools};
pub use config::ToolsConfig;
pub use error::Error;
pub use feed::Feed;
pub use headsign::HeadsignMerger;
pub use objects::*;
pub use process::{process_feed, CleanRoute, CleanStop, CleanTrip, CleanedFeed};
pub use route_trip_spec::{RouteTripSpec, TripDirection};
pub use rtl::RtlBusAgencyTools;
pub use service::ServiceWindow;
