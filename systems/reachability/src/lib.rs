#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure reachability system that relaxes the location link graph.
//!
//! Starting from the root location, the system computes a best-known
//! `(depth, weight)` record for every location reachable over the cyclic
//! link graph. The output feeds presentation code ("how far from home")
//! only; the encounter pool pipeline never reads it, and the two systems
//! stay structurally independent on purpose.

use std::collections::VecDeque;

use wildgrove_core::{Location, LocationDistance, LocationLink};

/// Dense per-location traversal records produced by the relaxation.
///
/// Locations the relaxation never reached have no record, so callers can
/// distinguish "unreached" from "reached at some depth". The terminal
/// location is not part of the link graph; [`compute`] assigns it one hop
/// beyond the deepest computed location.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistanceMap {
    records: [Option<LocationDistance>; Location::COUNT],
}

impl DistanceMap {
    /// Creates an empty map with no location computed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: [None; Location::COUNT],
        }
    }

    /// Best-known record for a location, if the relaxation reached it.
    #[must_use]
    pub const fn get(&self, location: Location) -> Option<LocationDistance> {
        self.records[location.index()]
    }

    /// Whether the relaxation reached the location.
    #[must_use]
    pub const fn is_computed(&self, location: Location) -> bool {
        self.records[location.index()].is_some()
    }

    /// Iterates over every computed `(location, record)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (Location, LocationDistance)> + '_ {
        Location::ALL
            .iter()
            .filter_map(|location| self.records[location.index()].map(|record| (*location, record)))
    }

    fn install(&mut self, location: Location, record: LocationDistance) {
        self.records[location.index()] = Some(record);
    }

    /// Applies the relaxation rule to a single candidate edge.
    ///
    /// Precedence, in order: install when the target has no record yet;
    /// overwrite when the link weight is strictly smaller than the stored
    /// weight; overwrite when the weights are equal and the candidate depth
    /// is strictly smaller than the stored depth. Every overwrite
    /// lexicographically decreases `(weight, depth)`, which is what makes
    /// the relaxation terminate on cyclic graphs.
    fn improve(&mut self, target: Location, candidate_depth: u32, link_weight: u32) -> bool {
        let better = match self.records[target.index()] {
            None => true,
            Some(existing) => {
                link_weight < existing.weight()
                    || (link_weight == existing.weight() && candidate_depth < existing.depth())
            }
        };

        if better {
            self.install(target, LocationDistance::new(candidate_depth, link_weight));
        }
        better
    }
}

/// Relaxes the link graph from the given root until no record improves.
///
/// The root starts at `(0, 1)`. A worklist queue re-examines only the
/// locations whose record changed, so fixpoint is reached without bounded
/// recursion even though the graph is cyclic. After fixpoint the terminal
/// location is assigned `(1 + max depth over all computed locations, 1)`.
#[must_use]
pub fn compute(links: &[LocationLink], root: Location) -> DistanceMap {
    let mut map = DistanceMap::new();
    map.install(root, LocationDistance::new(0, 1));

    let mut queue = VecDeque::new();
    let mut queued = [false; Location::COUNT];
    queue.push_back(root);
    queued[root.index()] = true;

    while let Some(location) = queue.pop_front() {
        queued[location.index()] = false;

        let Some(record) = map.get(location) else {
            continue;
        };
        let candidate_depth = record.depth() + 1;

        for link in links.iter().filter(|link| link.from() == location) {
            if map.improve(link.to(), candidate_depth, link.weight()) && !queued[link.to().index()]
            {
                queue.push_back(link.to());
                queued[link.to().index()] = true;
            }
        }
    }

    let deepest = map.iter().map(|(_, record)| record.depth()).max().unwrap_or(0);
    map.install(Location::TERMINAL, LocationDistance::new(deepest + 1, 1));

    map
}

/// Runs one full relaxation pass over every link and reports how many
/// records improved.
///
/// After [`compute`] has reached fixpoint this always returns zero, which
/// is the idempotence property the tests pin down.
pub fn relax_pass(map: &mut DistanceMap, links: &[LocationLink]) -> usize {
    let mut improved = 0;
    for link in links {
        let Some(record) = map.get(link.from()) else {
            continue;
        };
        if map.improve(link.to(), record.depth() + 1, link.weight()) {
            improved += 1;
        }
    }
    improved
}
