#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Hand-authored content tables for the Wildgrove bestiary.
//!
//! Everything in this crate is declarative: the location link graph, the
//! creature habitat declarations, the evolution lines, and the trainer
//! rosters. The `world` crate compiles these tables once at session start;
//! the content-validation tests that guard them live in this crate's test
//! suite so authoring mistakes fail the build, not a play session.

use wildgrove_core::{
    ContentTables, CreatureId, CreaturePlacement, EvolutionEdge, HabitatSpot, Location,
    LocationLink, Tier, TimePeriod, TrainerId, TrainerPlacement,
};

/// Grass-line base form found in the starting meadow.
pub const SPROUTLING: CreatureId = CreatureId::new(1);
/// Grass-line middle form.
pub const VERDAPAW: CreatureId = CreatureId::new(2);
/// Grass-line final form.
pub const BLOOMBEAST: CreatureId = CreatureId::new(3);
/// Fire-line base form from the caldera rim.
pub const CINDERCUB: CreatureId = CreatureId::new(4);
/// Fire-line middle form.
pub const ASHMANE: CreatureId = CreatureId::new(5);
/// Fire-line final form.
pub const PYRELORD: CreatureId = CreatureId::new(6);
/// River-line base form.
pub const DRIPFIN: CreatureId = CreatureId::new(7);
/// River-line final form.
pub const TORRENTCLAW: CreatureId = CreatureId::new(8);
/// Highland wind-line base form.
pub const GUSTLING: CreatureId = CreatureId::new(9);
/// Highland wind-line final form.
pub const GALEHAWK: CreatureId = CreatureId::new(10);
/// Stone-line base form.
pub const PEBBLIT: CreatureId = CreatureId::new(11);
/// Stone-line final form.
pub const CRAGMAW: CreatureId = CreatureId::new(12);
/// Grave-line base form; evolves by charm rather than level.
pub const MIREWISP: CreatureId = CreatureId::new(13);
/// Grave-line final form.
pub const BANSHADE: CreatureId = CreatureId::new(14);
/// Ice-line base form.
pub const FROSTKIT: CreatureId = CreatureId::new(15);
/// Ice-line final form.
pub const RIMECLAW: CreatureId = CreatureId::new(16);
/// Solitary dune sprinter with no evolution line.
pub const DUNERUNNER: CreatureId = CreatureId::new(17);
/// Fungus-line base form.
pub const SPORELING: CreatureId = CreatureId::new(18);
/// Fungus-line final form.
pub const MYCOLOSSUS: CreatureId = CreatureId::new(19);
/// Tide-line base form with a branching evolution.
pub const TIDEPUP: CreatureId = CreatureId::new(20);
/// Tide-line branch favoring the shallows.
pub const BRINEWOLF: CreatureId = CreatureId::new(21);
/// Tide-line branch favoring the open water.
pub const SQUALLFIN: CreatureId = CreatureId::new(22);
/// Guardian of the rift; only encountered at the terminal node.
pub const RIFTWYRM: CreatureId = CreatureId::new(23);
/// Unplaced spark that matures into [`ASHMANE`]; obtainable only by
/// evolving one.
pub const EMBERMOTE: CreatureId = CreatureId::new(24);
/// Deliberately unobtainable remnant kept for save compatibility.
pub const VOIDMOTE: CreatureId = CreatureId::new(25);

/// Patrols the routes around the homestead.
pub const RANGER: TrainerId = TrainerId::new(1);
/// Gathers in the meadow and the deepwood.
pub const HERBALIST: TrainerId = TrainerId::new(2);
/// Works the cavern and the quarry.
pub const SPELUNKER: TrainerId = TrainerId::new(3);
/// Keeps to the water's edge.
pub const TIDECALLER: TrainerId = TrainerId::new(4);
/// Watches over the burial hollow.
pub const GRAVEKEEPER: TrainerId = TrainerId::new(5);
/// Boss archetype guarding the cold heights.
pub const FROSTWARDEN: TrainerId = TrainerId::new(6);

/// Bundles every authored table into one compiler input.
#[must_use]
pub fn tables() -> ContentTables {
    ContentTables::new(links(), placements(), evolutions(), trainer_rosters())
}

/// Directed link graph between locations; weights mark unlikely routes.
#[must_use]
pub fn links() -> Vec<LocationLink> {
    vec![
        LocationLink::new(Location::Homestead, Location::Meadow),
        LocationLink::new(Location::Meadow, Location::Thicket),
        LocationLink::new(Location::Meadow, Location::Riverbank),
        LocationLink::new(Location::Thicket, Location::Deepwood),
        LocationLink::new(Location::Thicket, Location::Cavern),
        LocationLink::new(Location::Riverbank, Location::Marsh),
        LocationLink::new(Location::Riverbank, Location::Shoreline),
        LocationLink::new(Location::Marsh, Location::Hollow),
        LocationLink::new(Location::Marsh, Location::Thicket),
        LocationLink::new(Location::Shoreline, Location::Dunes),
        LocationLink::weighted(Location::Shoreline, Location::Glacier, 2),
        LocationLink::new(Location::Deepwood, Location::Meadow),
        LocationLink::new(Location::Cavern, Location::Quarry),
        LocationLink::new(Location::Cavern, Location::Shoreline),
        LocationLink::new(Location::Quarry, Location::Highlands),
        LocationLink::weighted(Location::Quarry, Location::Dunes, 2),
        LocationLink::new(Location::Highlands, Location::Caldera),
        LocationLink::weighted(Location::Highlands, Location::Glacier, 3),
        LocationLink::new(Location::Dunes, Location::Ruins),
        LocationLink::new(Location::Glacier, Location::Riverbank),
        LocationLink::new(Location::Ruins, Location::Deepwood),
        LocationLink::new(Location::Caldera, Location::Glacier),
        LocationLink::weighted(Location::Hollow, Location::Ruins, 2),
        LocationLink::new(Location::Hollow, Location::Cavern),
    ]
}

/// Habitat declarations for every creature, obtainable or not.
#[must_use]
pub fn placements() -> Vec<CreaturePlacement> {
    vec![
        CreaturePlacement::new(
            SPROUTLING,
            vec![HabitatSpot::with_periods(
                Location::Meadow,
                Tier::Common,
                vec![TimePeriod::Dawn, TimePeriod::Day],
            )],
        ),
        CreaturePlacement::new(
            VERDAPAW,
            vec![
                HabitatSpot::with_periods(
                    Location::Meadow,
                    Tier::Common,
                    vec![TimePeriod::Dawn, TimePeriod::Day],
                ),
                HabitatSpot::new(Location::Thicket, Tier::Uncommon),
            ],
        ),
        CreaturePlacement::new(
            BLOOMBEAST,
            vec![
                HabitatSpot::new(Location::Thicket, Tier::Rare),
                HabitatSpot::new(Location::Meadow, Tier::BossRare),
            ],
        ),
        CreaturePlacement::new(
            CINDERCUB,
            vec![HabitatSpot::new(Location::Caldera, Tier::Rare)],
        ),
        CreaturePlacement::new(
            ASHMANE,
            vec![HabitatSpot::new(Location::Caldera, Tier::Rare)],
        ),
        CreaturePlacement::new(
            PYRELORD,
            vec![
                HabitatSpot::new(Location::Caldera, Tier::Rare),
                HabitatSpot::new(Location::Caldera, Tier::BossRare),
            ],
        ),
        CreaturePlacement::new(
            DRIPFIN,
            vec![
                HabitatSpot::new(Location::Riverbank, Tier::Common),
                HabitatSpot::with_periods(
                    Location::Marsh,
                    Tier::Common,
                    vec![TimePeriod::Dusk, TimePeriod::Night],
                ),
                HabitatSpot::new(Location::Riverbank, Tier::Boss),
            ],
        ),
        CreaturePlacement::new(
            TORRENTCLAW,
            vec![
                HabitatSpot::new(Location::Riverbank, Tier::Uncommon),
                HabitatSpot::new(Location::Riverbank, Tier::Boss),
            ],
        ),
        CreaturePlacement::new(
            GUSTLING,
            vec![HabitatSpot::new(Location::Highlands, Tier::Common)],
        ),
        CreaturePlacement::new(
            GALEHAWK,
            vec![
                HabitatSpot::new(Location::Highlands, Tier::Uncommon),
                HabitatSpot::new(Location::Highlands, Tier::Boss),
            ],
        ),
        CreaturePlacement::new(
            PEBBLIT,
            vec![
                HabitatSpot::new(Location::Quarry, Tier::Common),
                HabitatSpot::new(Location::Cavern, Tier::Uncommon),
            ],
        ),
        CreaturePlacement::new(
            CRAGMAW,
            vec![
                HabitatSpot::new(Location::Quarry, Tier::Uncommon),
                HabitatSpot::new(Location::Quarry, Tier::Boss),
            ],
        ),
        CreaturePlacement::new(
            MIREWISP,
            vec![
                HabitatSpot::with_periods(
                    Location::Hollow,
                    Tier::Common,
                    vec![TimePeriod::Night],
                ),
                HabitatSpot::with_periods(Location::Marsh, Tier::Uncommon, vec![TimePeriod::Night]),
            ],
        ),
        CreaturePlacement::new(
            BANSHADE,
            vec![
                HabitatSpot::with_periods(Location::Hollow, Tier::Common, vec![TimePeriod::Night]),
                HabitatSpot::new(Location::Hollow, Tier::BossRare),
            ],
        ),
        CreaturePlacement::new(
            FROSTKIT,
            vec![HabitatSpot::new(Location::Glacier, Tier::Common)],
        ),
        CreaturePlacement::new(
            RIMECLAW,
            vec![
                HabitatSpot::new(Location::Glacier, Tier::Rare),
                HabitatSpot::new(Location::Glacier, Tier::Boss),
            ],
        ),
        CreaturePlacement::new(
            DUNERUNNER,
            vec![
                HabitatSpot::new(Location::Dunes, Tier::Common),
                HabitatSpot::new(Location::Dunes, Tier::Boss),
            ],
        ),
        CreaturePlacement::new(
            SPORELING,
            vec![HabitatSpot::with_periods(
                Location::Deepwood,
                Tier::Common,
                vec![TimePeriod::Dawn, TimePeriod::Dusk],
            )],
        ),
        CreaturePlacement::new(
            MYCOLOSSUS,
            vec![
                HabitatSpot::new(Location::Deepwood, Tier::Rare),
                HabitatSpot::new(Location::Deepwood, Tier::Boss),
            ],
        ),
        CreaturePlacement::new(
            TIDEPUP,
            vec![HabitatSpot::new(Location::Shoreline, Tier::Common)],
        ),
        CreaturePlacement::new(
            BRINEWOLF,
            vec![
                HabitatSpot::new(Location::Shoreline, Tier::Uncommon),
                HabitatSpot::new(Location::Shoreline, Tier::Boss),
            ],
        ),
        CreaturePlacement::new(
            SQUALLFIN,
            vec![
                HabitatSpot::new(Location::Shoreline, Tier::Rare),
                HabitatSpot::new(Location::Shoreline, Tier::BossRare),
            ],
        ),
        CreaturePlacement::new(
            RIFTWYRM,
            vec![HabitatSpot::new(Location::Rift, Tier::BossUltraRare)],
        ),
        CreaturePlacement::new(EMBERMOTE, Vec::new()),
        CreaturePlacement::new(VOIDMOTE, Vec::new()),
    ]
}

/// Evolution lines, including the branching tide line.
#[must_use]
pub fn evolutions() -> Vec<EvolutionEdge> {
    vec![
        EvolutionEdge::new(SPROUTLING, VERDAPAW, 16),
        EvolutionEdge::new(VERDAPAW, BLOOMBEAST, 32),
        EvolutionEdge::new(CINDERCUB, ASHMANE, 18),
        EvolutionEdge::new(ASHMANE, PYRELORD, 36),
        EvolutionEdge::new(DRIPFIN, TORRENTCLAW, 16),
        EvolutionEdge::new(GUSTLING, GALEHAWK, 20),
        EvolutionEdge::new(PEBBLIT, CRAGMAW, 25),
        // Charm evolution: nominal level 1 plus a long wild delay.
        EvolutionEdge::delayed(MIREWISP, BANSHADE, 1, 3),
        EvolutionEdge::new(FROSTKIT, RIMECLAW, 30),
        EvolutionEdge::new(SPORELING, MYCOLOSSUS, 14),
        EvolutionEdge::new(TIDEPUP, BRINEWOLF, 26),
        EvolutionEdge::delayed(TIDEPUP, SQUALLFIN, 26, 1),
        EvolutionEdge::delayed(EMBERMOTE, ASHMANE, 1, 2),
    ]
}

/// Trainer archetype rosters.
#[must_use]
pub fn trainer_rosters() -> Vec<TrainerPlacement> {
    vec![
        TrainerPlacement::new(
            RANGER,
            vec![
                (Location::Meadow, Tier::Common),
                (Location::Thicket, Tier::Common),
            ],
        ),
        TrainerPlacement::new(
            HERBALIST,
            vec![
                (Location::Meadow, Tier::Uncommon),
                (Location::Deepwood, Tier::Common),
            ],
        ),
        TrainerPlacement::new(
            SPELUNKER,
            vec![
                (Location::Cavern, Tier::Common),
                (Location::Quarry, Tier::Common),
            ],
        ),
        TrainerPlacement::new(
            TIDECALLER,
            vec![
                (Location::Shoreline, Tier::Common),
                (Location::Riverbank, Tier::Uncommon),
            ],
        ),
        TrainerPlacement::new(GRAVEKEEPER, vec![(Location::Hollow, Tier::Common)]),
        TrainerPlacement::new(
            FROSTWARDEN,
            vec![
                (Location::Glacier, Tier::Boss),
                (Location::Highlands, Tier::Boss),
            ],
        ),
    ]
}
