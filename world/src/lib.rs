#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative compiled encounter state for Wildgrove.
//!
//! [`build`] is a pure function from the authored content tables to an
//! owned, immutable [`World`]: it validates the tables, runs the pool
//! pipeline (lattice init, species assembly, threshold resolution,
//! availability scan, trainer assembly) and independently relaxes the
//! location link graph. It runs exactly once during session start,
//! performs no I/O, and either completes the whole lattice or fails; no
//! partially constructed state ever escapes. Consumers read the result
//! through the [`query`] module, optionally via the process-wide
//! [`session`] storage.

use std::collections::{BTreeMap, BTreeSet};

use wildgrove_core::{ContentError, ContentTables, CreatureId, HabitatSpot, Location, TimePeriod};
use wildgrove_system_encounter_compiler::{
    assemble_species, assemble_trainers, resolve_thresholds, scan_availability, DraftLattice,
    EncounterLattice, EvolutionLineage, LevelGateTuning, TrainerLattice,
};
use wildgrove_system_reachability::{compute, DistanceMap};

/// Finished lookup structures produced by one compiler run.
///
/// All fields are private and immutable after construction; the [`query`]
/// module is the only read surface. The spawn roller consumes the pools
/// and the uncatchable set, presentation code consumes the distance map,
/// and dex-style UI consumes the per-creature habitat index.
#[derive(Clone, Debug)]
pub struct World {
    pools: EncounterLattice,
    trainers: TrainerLattice,
    distances: DistanceMap,
    uncatchable: BTreeSet<CreatureId>,
    habitats: BTreeMap<CreatureId, Vec<HabitatSpot>>,
}

/// Compiles the content tables with the default level-gate tuning.
pub fn build(tables: &ContentTables) -> Result<World, ContentError> {
    build_with_tuning(tables, &LevelGateTuning::default())
}

/// Compiles the content tables with an explicit level-gate tuning profile.
///
/// The pipeline order is fixed: validation, link-graph relaxation, lattice
/// allocation, species assembly, threshold resolution, availability scan,
/// trainer assembly. Any content defect aborts before a `World` exists.
pub fn build_with_tuning(
    tables: &ContentTables,
    tuning: &LevelGateTuning,
) -> Result<World, ContentError> {
    validate(tables)?;

    let distances = compute(tables.links(), Location::ROOT);
    for location in Location::ALL {
        if !distances.is_computed(location) {
            return Err(ContentError::UnreachableLocation { location });
        }
    }

    let lineage = EvolutionLineage::from_edges(tables.evolutions());
    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, tables.placements(), &lineage);
    let pools = resolve_thresholds(draft, tables.evolutions(), tuning)?;

    let uncatchable = scan_availability(tables.placements(), tables.evolutions());

    let mut trainers = TrainerLattice::new();
    assemble_trainers(&mut trainers, tables.trainers());

    let mut habitats = BTreeMap::new();
    for placement in tables.placements() {
        let normalized = placement
            .spots()
            .iter()
            .map(|spot| {
                let periods = if spot.periods().is_empty() {
                    vec![TimePeriod::All]
                } else {
                    spot.periods().to_vec()
                };
                HabitatSpot::with_periods(spot.location(), spot.tier(), periods)
            })
            .collect();
        let _ = habitats.insert(placement.creature(), normalized);
    }

    Ok(World {
        pools,
        trainers,
        distances,
        uncatchable,
        habitats,
    })
}

/// Rejects content-authoring defects before any structure is built.
fn validate(tables: &ContentTables) -> Result<(), ContentError> {
    let mut declared = BTreeSet::new();
    for placement in tables.placements() {
        if !declared.insert(placement.creature()) {
            return Err(ContentError::DuplicatePlacement {
                creature: placement.creature(),
            });
        }
    }

    for link in tables.links() {
        if link.from() == Location::TERMINAL || link.to() == Location::TERMINAL {
            return Err(ContentError::TerminalLink {
                from: link.from(),
                to: link.to(),
            });
        }
    }

    for edge in tables.evolutions() {
        if !declared.contains(&edge.from()) {
            return Err(ContentError::UnknownEvolutionSource {
                from: edge.from(),
                to: edge.to(),
            });
        }
        if !declared.contains(&edge.to()) {
            return Err(ContentError::UnknownEvolutionTarget {
                from: edge.from(),
                to: edge.to(),
            });
        }
    }

    Ok(())
}

/// Read-only queries over a finished [`World`].
pub mod query {
    use std::collections::BTreeSet;

    use wildgrove_core::{
        CreatureId, HabitatSpot, Location, LocationDistance, ResolvedPoolEntry, Tier, TimePeriod,
        TrainerId,
    };

    use crate::World;

    /// Resolved encounter pool of a lattice cell; empty when nothing was
    /// declared there, never undefined.
    #[must_use]
    pub fn pool(
        world: &World,
        location: Location,
        tier: Tier,
        period: TimePeriod,
    ) -> &[ResolvedPoolEntry] {
        world.pools.pool(location, tier, period)
    }

    /// Trainer roster of a lattice cell.
    #[must_use]
    pub fn trainers(
        world: &World,
        location: Location,
        tier: Tier,
        period: TimePeriod,
    ) -> &[TrainerId] {
        world.trainers.trainers(location, tier, period)
    }

    /// Best-known traversal record of a location, for presentation only.
    #[must_use]
    pub fn distance(world: &World, location: Location) -> Option<LocationDistance> {
        world.distances.get(location)
    }

    /// Creatures the spawn roller must never produce, anywhere.
    #[must_use]
    pub fn uncatchable(world: &World) -> &BTreeSet<CreatureId> {
        &world.uncatchable
    }

    /// Whether a declared creature is obtainable somewhere.
    #[must_use]
    pub fn is_catchable(world: &World, creature: CreatureId) -> bool {
        !world.uncatchable.contains(&creature)
    }

    /// Declared habitat memberships of a creature with period wildcards
    /// normalized; empty for unknown creatures.
    #[must_use]
    pub fn habitats(world: &World, creature: CreatureId) -> &[HabitatSpot] {
        world.habitats.get(&creature).map_or(&[], Vec::as_slice)
    }
}

/// Process-wide storage for the single compiled [`World`].
///
/// The world is installed once during session start and lives until the
/// process exits; there is no teardown and no mutation after
/// installation. A second install attempt is rejected.
pub mod session {
    use std::sync::OnceLock;

    use crate::World;

    static SESSION: OnceLock<World> = OnceLock::new();

    /// Installs the compiled world; returns `false` if one is already
    /// installed.
    pub fn install(world: World) -> bool {
        SESSION.set(world).is_ok()
    }

    /// The installed world, if session start has completed.
    #[must_use]
    pub fn get() -> Option<&'static World> {
        SESSION.get()
    }
}
