//! Merging of the headsigns observed for a single route direction
//!
//! The feed sometimes gives several headsigns to the trips of one direction
//! (short turns, wrong values). They are collapsed into one display string
//! with a lookup table of known pairs.

use crate::Error;

/// Two headsigns that can share a direction, and the headsign to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRule {
    /// `None` applies the rule to every route
    pub route_id: Option<u32>,
    pub headsigns: [&'static str; 2],
    pub merged: &'static str,
}

impl MergeRule {
    pub const fn any_route(headsigns: [&'static str; 2], merged: &'static str) -> Self {
        MergeRule {
            route_id: None,
            headsigns,
            merged,
        }
    }

    pub const fn route(route_id: u32, headsigns: [&'static str; 2], merged: &'static str) -> Self {
        MergeRule {
            route_id: Some(route_id),
            headsigns,
            merged,
        }
    }

    fn covers(&self, headsign: &str, other: &str) -> bool {
        [headsign, other]
            .iter()
            .all(|h| self.headsigns.iter().any(|known| known == h))
    }
}

const CENTRE_VILLE: &str = "Ctr-Ville";
const PANAMA: &str = "Panama";
const LONGUEUIL: &str = "Longueuil";
const COUSINEAU: &str = "Cousineau";
const GAETAN_BOUCHER: &str = "Gaétan-Boucher";

const RTL_RULES: &[MergeRule] = &[
    MergeRule::any_route([PANAMA, CENTRE_VILLE], CENTRE_VILLE),
    MergeRule::route(5, [GAETAN_BOUCHER, "M St-Hubert"], "M St-Hubert"),
    MergeRule::route(25, [LONGUEUIL, "Parcs Ind."], "Parcs Ind."),
    MergeRule::route(30, [CENTRE_VILLE, "P-V Brossard"], "P-V Brossard"),
    MergeRule::route(33, [CENTRE_VILLE, "M-N-O Brossard"], "M-N-O Brossard"),
    MergeRule::route(37, [CENTRE_VILLE, "Simard"], "Simard"),
    MergeRule::route(59, [CENTRE_VILLE, "Gareau"], "Gareau"),
    MergeRule::route(82, [LONGUEUIL, "Marie-Victorin"], "Marie-Victorin"),
    MergeRule::route(106, [LONGUEUIL, "B Brossard"], "B Brossard"),
    MergeRule::route(142, [COUSINEAU, "Pacific"], "Pacific"),
    MergeRule::route(142, [COUSINEAU, CENTRE_VILLE], CENTRE_VILLE),
    // T21
    MergeRule::route(821, ["Grande Allée", "Armand-Frappier"], "Armand-Frappier"),
    // T22
    MergeRule::route(
        822,
        [GAETAN_BOUCHER, "Parc Ind. G-Leclerc"],
        "Parc Ind. G-Leclerc",
    ),
];

/// Lookup table of the [MergeRule]s of an agency
#[derive(Debug, Clone, Default)]
pub struct HeadsignMerger {
    rules: Vec<MergeRule>,
}

impl HeadsignMerger {
    pub fn new(rules: Vec<MergeRule>) -> Self {
        HeadsignMerger { rules }
    }

    /// The table of the Longueuil RTL bus network
    pub fn rtl() -> Self {
        Self::new(RTL_RULES.to_vec())
    }

    /// Merges two headsigns of the same route direction
    ///
    /// Rules for every route are tried first, then the route's own rules, in
    /// table order.
    pub fn merge(&self, route_id: u32, headsign: &str, other: &str) -> Result<String, Error> {
        if headsign == other {
            return Ok(headsign.to_owned());
        }
        self.rules
            .iter()
            .filter(|r| r.route_id.is_none())
            .chain(self.rules.iter().filter(|r| r.route_id == Some(route_id)))
            .find(|r| r.covers(headsign, other))
            .map(|r| {
                log::debug!(
                    "route {}: merged '{}' & '{}' into '{}'",
                    route_id,
                    headsign,
                    other,
                    r.merged
                );
                r.merged.to_owned()
            })
            .ok_or_else(|| Error::UnexpectedMerge {
                route_id,
                headsign: headsign.to_owned(),
                other: other.to_owned(),
            })
    }

    /// Folds all the headsigns of a direction into one
    pub fn merge_all<'a>(
        &self,
        route_id: u32,
        headsigns: impl IntoIterator<Item = &'a str>,
    ) -> Result<Option<String>, Error> {
        let mut merged: Option<String> = None;
        for headsign in headsigns {
            merged = Some(match merged {
                None => headsign.to_owned(),
                Some(m) => self.merge(route_id, &m, headsign)?,
            });
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_rule() {
        let merger = HeadsignMerger::rtl();
        assert_eq!("Ctr-Ville", merger.merge(1, "Panama", "Ctr-Ville").unwrap());
        assert_eq!("Ctr-Ville", merger.merge(44, "Ctr-Ville", "Panama").unwrap());
    }

    #[test]
    fn route_rules() {
        let merger = HeadsignMerger::rtl();
        assert_eq!(
            "M St-Hubert",
            merger.merge(5, "Gaétan-Boucher", "M St-Hubert").unwrap()
        );
        assert_eq!("Simard", merger.merge(37, "Simard", "Ctr-Ville").unwrap());
        assert_eq!("Pacific", merger.merge(142, "Cousineau", "Pacific").unwrap());
        assert_eq!(
            "Ctr-Ville",
            merger.merge(142, "Cousineau", "Ctr-Ville").unwrap()
        );
        assert_eq!(
            "Parc Ind. G-Leclerc",
            merger
                .merge(822, "Gaétan-Boucher", "Parc Ind. G-Leclerc")
                .unwrap()
        );
    }

    #[test]
    fn rules_are_scoped_to_their_route() {
        let merger = HeadsignMerger::rtl();
        match merger.merge(38, "Simard", "Ctr-Ville") {
            Err(Error::UnexpectedMerge {
                route_id,
                headsign,
                other,
            }) => {
                assert_eq!(38, route_id);
                assert_eq!("Simard", headsign);
                assert_eq!("Ctr-Ville", other);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn identical_headsigns() {
        let merger = HeadsignMerger::default();
        assert_eq!("Gareau", merger.merge(59, "Gareau", "Gareau").unwrap());
    }

    #[test]
    fn merge_all() {
        let merger = HeadsignMerger::rtl();
        assert_eq!(
            Some("Pacific".to_owned()),
            merger
                .merge_all(142, vec!["Cousineau", "Pacific", "Pacific"])
                .unwrap()
        );
        assert_eq!(None, merger.merge_all(142, vec![]).unwrap());
        assert!(merger
            .merge_all(142, vec!["Pacific", "Ctr-Ville"])
            .is_err());
    }
}
