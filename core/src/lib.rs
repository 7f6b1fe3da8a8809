#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core vocabulary shared across the Wildgrove encounter compiler.
//!
//! This crate defines the content-table records that authors declare
//! (habitat memberships, evolution edges, trainer rosters, the location
//! link graph) and the result types the compiler produces (resolved pool
//! entries and location distances). The compiler itself lives in the
//! `world` crate and its pure systems; everything here is plain data that
//! is constructed once and then read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Themed encounter node in the world's reachability graph.
///
/// The set is closed: content tables may only reference these variants, so
/// dense per-location storage indexed by [`Location::index`] is always
/// fully defined. [`Location::ROOT`] is where every expedition starts and
/// [`Location::TERMINAL`] is the final confrontation node, which never
/// participates in the regular link graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    /// Starting settlement every run departs from.
    Homestead,
    /// Open grassland immediately beyond the homestead.
    Meadow,
    /// Dense brush bordering the meadow.
    Thicket,
    /// Slow river bend with reed banks.
    Riverbank,
    /// Stagnant wetland fed by the river.
    Marsh,
    /// Tidal coastline at the river mouth.
    Shoreline,
    /// Old-growth forest interior.
    Deepwood,
    /// Limestone cave network.
    Cavern,
    /// Abandoned open-pit quarry.
    Quarry,
    /// Windswept upland plateau.
    Highlands,
    /// Shifting sand dunes past the coast.
    Dunes,
    /// Permanent ice field above the highlands.
    Glacier,
    /// Collapsed pre-settlement ruins.
    Ruins,
    /// Active volcanic rim.
    Caldera,
    /// Sunken burial hollow.
    Hollow,
    /// Tear in the world where the final encounter waits.
    Rift,
}

impl Location {
    /// Location every expedition departs from.
    pub const ROOT: Location = Location::Homestead;

    /// Final node; never part of the regular link graph.
    pub const TERMINAL: Location = Location::Rift;

    /// Number of locations in the closed set.
    pub const COUNT: usize = 16;

    /// Every location in declaration order.
    pub const ALL: [Location; Location::COUNT] = [
        Location::Homestead,
        Location::Meadow,
        Location::Thicket,
        Location::Riverbank,
        Location::Marsh,
        Location::Shoreline,
        Location::Deepwood,
        Location::Cavern,
        Location::Quarry,
        Location::Highlands,
        Location::Dunes,
        Location::Glacier,
        Location::Ruins,
        Location::Caldera,
        Location::Hollow,
        Location::Rift,
    ];

    /// Dense index of the location, matching [`Location::ALL`] order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Rarity and role classification of an encounter slot.
///
/// The nine values are ordered from the most common wild encounter to the
/// rarest boss encounter. The four `Boss*` tiers gate scripted fights and
/// receive a level discount during threshold resolution so evolved forms
/// appear earlier there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// Baseline wild encounter.
    Common,
    /// Less frequent wild encounter.
    Uncommon,
    /// Rare wild encounter.
    Rare,
    /// Very rare wild encounter.
    SuperRare,
    /// Rarest wild encounter.
    UltraRare,
    /// Baseline boss encounter.
    Boss,
    /// Rare boss encounter.
    BossRare,
    /// Very rare boss encounter.
    BossSuperRare,
    /// Rarest boss encounter.
    BossUltraRare,
}

impl Tier {
    /// Number of tiers.
    pub const COUNT: usize = 9;

    /// Every tier in ascending rarity order.
    pub const ALL: [Tier; Tier::COUNT] = [
        Tier::Common,
        Tier::Uncommon,
        Tier::Rare,
        Tier::SuperRare,
        Tier::UltraRare,
        Tier::Boss,
        Tier::BossRare,
        Tier::BossSuperRare,
        Tier::BossUltraRare,
    ];

    /// Dense index of the tier, matching [`Tier::ALL`] order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the tier gates a boss encounter slot.
    #[must_use]
    pub const fn is_boss(self) -> bool {
        matches!(
            self,
            Tier::Boss | Tier::BossRare | Tier::BossSuperRare | Tier::BossUltraRare
        )
    }
}

/// Day-segment gate on when an encounter slot is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimePeriod {
    /// First light.
    Dawn,
    /// Full daylight.
    Day,
    /// Fading light.
    Dusk,
    /// Darkness.
    Night,
    /// Wildcard bucket active in every segment.
    All,
}

impl TimePeriod {
    /// Number of time periods, wildcard included.
    pub const COUNT: usize = 5;

    /// Every period in declaration order, wildcard last.
    pub const ALL_PERIODS: [TimePeriod; TimePeriod::COUNT] = [
        TimePeriod::Dawn,
        TimePeriod::Day,
        TimePeriod::Dusk,
        TimePeriod::Night,
        TimePeriod::All,
    ];

    /// Dense index of the period, matching [`TimePeriod::ALL_PERIODS`] order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Unique identifier assigned to a creature species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatureId(u16);

impl CreatureId {
    /// Creates a new creature identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Unique identifier assigned to a trainer archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrainerId(u16);

impl TrainerId {
    /// Creates a new trainer identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Directed edge in the location reachability graph.
///
/// The weight is the rarity of taking this path: higher means a less
/// likely route. Links without an authored weight default to 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationLink {
    from: Location,
    to: Location,
    weight: u32,
}

impl LocationLink {
    /// Creates a link with the default weight of 1.
    #[must_use]
    pub const fn new(from: Location, to: Location) -> Self {
        Self {
            from,
            to,
            weight: 1,
        }
    }

    /// Creates a link carrying an explicit route weight.
    #[must_use]
    pub const fn weighted(from: Location, to: Location, weight: u32) -> Self {
        Self { from, to, weight }
    }

    /// Source location of the link.
    #[must_use]
    pub const fn from(&self) -> Location {
        self.from
    }

    /// Destination location of the link.
    #[must_use]
    pub const fn to(&self) -> Location {
        self.to
    }

    /// Route rarity weight carried by the link.
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.weight
    }
}

/// Best-known traversal record for a location.
///
/// `depth` is the minimum hop count found under the weight tie-break rule
/// used by the reachability relaxation; `weight` is the route rarity of
/// the link that produced that depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationDistance {
    depth: u32,
    weight: u32,
}

impl LocationDistance {
    /// Creates a distance record from a hop depth and route weight.
    #[must_use]
    pub const fn new(depth: u32, weight: u32) -> Self {
        Self { depth, weight }
    }

    /// Hop count from the root location.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Route rarity weight of the best-known path.
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.weight
    }
}

/// One declared habitat membership of a creature.
///
/// An empty period list is the authoring shorthand for the full-day
/// wildcard: the compiler expands it to [`TimePeriod::All`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitatSpot {
    location: Location,
    tier: Tier,
    periods: Vec<TimePeriod>,
}

impl HabitatSpot {
    /// Creates a membership active during the full-day wildcard.
    #[must_use]
    pub const fn new(location: Location, tier: Tier) -> Self {
        Self {
            location,
            tier,
            periods: Vec::new(),
        }
    }

    /// Creates a membership restricted to the given day segments.
    #[must_use]
    pub fn with_periods(location: Location, tier: Tier, periods: Vec<TimePeriod>) -> Self {
        Self {
            location,
            tier,
            periods,
        }
    }

    /// Location of the membership.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Rarity tier of the membership.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Declared day segments; empty means the full-day wildcard.
    #[must_use]
    pub fn periods(&self) -> &[TimePeriod] {
        &self.periods
    }
}

/// All declared habitat memberships of one creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreaturePlacement {
    creature: CreatureId,
    spots: Vec<HabitatSpot>,
}

impl CreaturePlacement {
    /// Creates a placement record for a creature.
    #[must_use]
    pub fn new(creature: CreatureId, spots: Vec<HabitatSpot>) -> Self {
        Self { creature, spots }
    }

    /// Creature the record belongs to.
    #[must_use]
    pub const fn creature(&self) -> CreatureId {
        self.creature
    }

    /// Declared habitat memberships in authoring order.
    #[must_use]
    pub fn spots(&self) -> &[HabitatSpot] {
        &self.spots
    }
}

/// Evolution relationship between two creatures.
///
/// `wild_delay` is a 0–4 ordinal tuning multiplier; each step pushes the
/// wild availability of the evolved form back by a configurable number of
/// levels beyond the nominal evolution requirement. A creature may carry
/// several edges (branching lines).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvolutionEdge {
    from: CreatureId,
    to: CreatureId,
    level: u32,
    wild_delay: u32,
}

impl EvolutionEdge {
    /// Creates an evolution edge with no wild delay.
    #[must_use]
    pub const fn new(from: CreatureId, to: CreatureId, level: u32) -> Self {
        Self {
            from,
            to,
            level,
            wild_delay: 0,
        }
    }

    /// Creates an evolution edge carrying an explicit wild delay ordinal.
    #[must_use]
    pub const fn delayed(from: CreatureId, to: CreatureId, level: u32, wild_delay: u32) -> Self {
        Self {
            from,
            to,
            level,
            wild_delay,
        }
    }

    /// Creature the edge evolves from.
    #[must_use]
    pub const fn from(&self) -> CreatureId {
        self.from
    }

    /// Creature the edge evolves into.
    #[must_use]
    pub const fn to(&self) -> CreatureId {
        self.to
    }

    /// Nominal level requirement of the evolution.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Wild-availability delay ordinal (0–4).
    #[must_use]
    pub const fn wild_delay(&self) -> u32 {
        self.wild_delay
    }
}

/// All declared roster memberships of one trainer archetype.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerPlacement {
    trainer: TrainerId,
    spots: Vec<(Location, Tier)>,
}

impl TrainerPlacement {
    /// Creates a roster record for a trainer archetype.
    #[must_use]
    pub fn new(trainer: TrainerId, spots: Vec<(Location, Tier)>) -> Self {
        Self { trainer, spots }
    }

    /// Trainer archetype the record belongs to.
    #[must_use]
    pub const fn trainer(&self) -> TrainerId {
        self.trainer
    }

    /// Declared roster cells in authoring order.
    #[must_use]
    pub fn spots(&self) -> &[(Location, Tier)] {
        &self.spots
    }
}

/// Final form of one encounter slot after threshold resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedPoolEntry {
    /// Slot holding a single creature with no level gate.
    Single(CreatureId),
    /// Slot holding an evolution line, keyed by the minimum level at which
    /// each listed form becomes available. Keys are strictly increasing by
    /// construction of the map; forms sharing a threshold share a bucket.
    /// Thresholds can be negative after the boss-tier discount.
    Staged(BTreeMap<i32, Vec<CreatureId>>),
}

impl ResolvedPoolEntry {
    /// Creatures the slot can produce, ignoring level gates.
    #[must_use]
    pub fn members(&self) -> Vec<CreatureId> {
        match self {
            ResolvedPoolEntry::Single(creature) => vec![*creature],
            ResolvedPoolEntry::Staged(stages) => {
                stages.values().flat_map(|forms| forms.iter().copied()).collect()
            }
        }
    }
}

/// The raw content tables consumed read-only by one compiler run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTables {
    links: Vec<LocationLink>,
    placements: Vec<CreaturePlacement>,
    evolutions: Vec<EvolutionEdge>,
    trainers: Vec<TrainerPlacement>,
}

impl ContentTables {
    /// Bundles the four authored tables into one compiler input.
    #[must_use]
    pub fn new(
        links: Vec<LocationLink>,
        placements: Vec<CreaturePlacement>,
        evolutions: Vec<EvolutionEdge>,
        trainers: Vec<TrainerPlacement>,
    ) -> Self {
        Self {
            links,
            placements,
            evolutions,
            trainers,
        }
    }

    /// Location link graph.
    #[must_use]
    pub fn links(&self) -> &[LocationLink] {
        &self.links
    }

    /// Creature habitat declarations.
    #[must_use]
    pub fn placements(&self) -> &[CreaturePlacement] {
        &self.placements
    }

    /// Evolution edges.
    #[must_use]
    pub fn evolutions(&self) -> &[EvolutionEdge] {
        &self.evolutions
    }

    /// Trainer roster declarations.
    #[must_use]
    pub fn trainers(&self) -> &[TrainerPlacement] {
        &self.trainers
    }
}

/// Content-authoring defects detected while compiling the tables.
///
/// None of these are recoverable at runtime: the tables ship with the
/// game, so any variant here aborts the boot-time build before gameplay
/// can observe a half-constructed lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ContentError {
    /// An evolution edge names a source creature with no placement record.
    #[error("evolution edge {from:?} -> {to:?} names an undeclared source creature")]
    UnknownEvolutionSource {
        /// Source creature of the offending edge.
        from: CreatureId,
        /// Target creature of the offending edge.
        to: CreatureId,
    },
    /// An evolution edge names a target creature with no placement record.
    #[error("evolution edge {from:?} -> {to:?} names an undeclared target creature")]
    UnknownEvolutionTarget {
        /// Source creature of the offending edge.
        from: CreatureId,
        /// Target creature of the offending edge.
        to: CreatureId,
    },
    /// A location link touches the terminal location on either end.
    #[error("location link {from:?} -> {to:?} touches the terminal location")]
    TerminalLink {
        /// Source location of the offending link.
        from: Location,
        /// Destination location of the offending link.
        to: Location,
    },
    /// A creature appears in more than one placement record.
    #[error("creature {creature:?} is declared by more than one placement record")]
    DuplicatePlacement {
        /// Creature declared twice.
        creature: CreatureId,
    },
    /// A non-terminal location is unreachable from the root.
    #[error("location {location:?} is unreachable from the root")]
    UnreachableLocation {
        /// Location the relaxation never reached.
        location: Location,
    },
    /// A grouped evolved form has no evolution edge targeting it.
    #[error("creature {creature:?} sits above a pool group's base but has no prevolution edge")]
    MissingPrevolution {
        /// Evolved form missing its edge.
        creature: CreatureId,
    },
    /// A pool group's first member is itself an evolved form of the group.
    #[error("creature {creature:?} leads a pool group but evolves from another member")]
    MisplacedGroupBase {
        /// Offending group leader.
        creature: CreatureId,
    },
}

#[cfg(test)]
mod tests {
    use super::{
        CreatureId, HabitatSpot, Location, LocationDistance, LocationLink, ResolvedPoolEntry,
        Tier, TimePeriod, TrainerId,
    };
    use serde::{de::DeserializeOwned, Serialize};
    use std::collections::BTreeMap;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn location_indices_match_declaration_order() {
        for (expected, location) in Location::ALL.iter().enumerate() {
            assert_eq!(location.index(), expected);
        }
        assert_eq!(Location::ROOT.index(), 0);
        assert_eq!(Location::TERMINAL.index(), Location::COUNT - 1);
    }

    #[test]
    fn boss_tiers_are_exactly_the_last_four() {
        let bosses: Vec<_> = Tier::ALL.iter().filter(|tier| tier.is_boss()).collect();
        assert_eq!(
            bosses,
            [
                &Tier::Boss,
                &Tier::BossRare,
                &Tier::BossSuperRare,
                &Tier::BossUltraRare
            ]
        );
    }

    #[test]
    fn link_weight_defaults_to_one() {
        let link = LocationLink::new(Location::Meadow, Location::Thicket);
        assert_eq!(link.weight(), 1);
        let weighted = LocationLink::weighted(Location::Meadow, Location::Thicket, 3);
        assert_eq!(weighted.weight(), 3);
    }

    #[test]
    fn habitat_spot_defaults_to_wildcard_periods() {
        let spot = HabitatSpot::new(Location::Meadow, Tier::Common);
        assert!(spot.periods().is_empty(), "wildcard is the empty subset");
        let dawn = HabitatSpot::with_periods(Location::Meadow, Tier::Common, vec![TimePeriod::Dawn]);
        assert_eq!(dawn.periods(), [TimePeriod::Dawn]);
    }

    #[test]
    fn staged_entry_lists_every_member() {
        let mut stages = BTreeMap::new();
        let _ = stages.insert(1, vec![CreatureId::new(1)]);
        let _ = stages.insert(16, vec![CreatureId::new(2), CreatureId::new(3)]);
        let entry = ResolvedPoolEntry::Staged(stages);
        assert_eq!(
            entry.members(),
            [CreatureId::new(1), CreatureId::new(2), CreatureId::new(3)]
        );
    }

    #[test]
    fn creature_id_round_trips_through_bincode() {
        assert_round_trip(&CreatureId::new(42));
    }

    #[test]
    fn trainer_id_round_trips_through_bincode() {
        assert_round_trip(&TrainerId::new(7));
    }

    #[test]
    fn location_distance_round_trips_through_bincode() {
        assert_round_trip(&LocationDistance::new(4, 2));
    }

    #[test]
    fn resolved_entry_round_trips_through_bincode() {
        let mut stages = BTreeMap::new();
        let _ = stages.insert(1, vec![CreatureId::new(9)]);
        let _ = stages.insert(26, vec![CreatureId::new(10)]);
        assert_round_trip(&ResolvedPoolEntry::Staged(stages));
    }
}
