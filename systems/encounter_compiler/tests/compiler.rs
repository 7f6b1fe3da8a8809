use std::collections::BTreeMap;

use wildgrove_core::{
    ContentError, CreatureId, CreaturePlacement, EvolutionEdge, HabitatSpot, Location,
    ResolvedPoolEntry, Tier, TimePeriod, TrainerId, TrainerPlacement,
};
use wildgrove_system_encounter_compiler::{
    assemble_species, assemble_trainers, resolve_thresholds, scan_availability, DraftLattice,
    EvolutionLineage, LevelGateTuning, TrainerLattice,
};

const BASE: CreatureId = CreatureId::new(1);
const MIDDLE: CreatureId = CreatureId::new(2);
const FINAL: CreatureId = CreatureId::new(3);
const LONER: CreatureId = CreatureId::new(4);
const OTHER: CreatureId = CreatureId::new(5);

fn chain_edges() -> Vec<EvolutionEdge> {
    vec![
        EvolutionEdge::new(BASE, MIDDLE, 16),
        EvolutionEdge::new(MIDDLE, FINAL, 36),
    ]
}

fn placement(creature: CreatureId, spots: Vec<HabitatSpot>) -> CreaturePlacement {
    CreaturePlacement::new(creature, spots)
}

fn staged(entry: &ResolvedPoolEntry) -> &BTreeMap<i32, Vec<CreatureId>> {
    match entry {
        ResolvedPoolEntry::Staged(stages) => stages,
        other => panic!("expected a staged entry, got {other:?}"),
    }
}

#[test]
fn every_cell_exists_even_when_empty() {
    let lattice = DraftLattice::new();
    let trainers = TrainerLattice::new();
    for location in Location::ALL {
        for tier in Tier::ALL {
            for period in TimePeriod::ALL_PERIODS {
                assert!(lattice.groups(location, tier, period).is_empty());
                assert!(trainers.trainers(location, tier, period).is_empty());
            }
        }
    }
}

#[test]
fn base_and_middle_share_a_group_while_final_stays_apart() {
    // Base and middle form declared in the same dawn cell,
    // the final form only elsewhere.
    let edges = chain_edges();
    let lineage = EvolutionLineage::from_edges(&edges);
    let placements = vec![
        placement(
            BASE,
            vec![HabitatSpot::with_periods(
                Location::Meadow,
                Tier::Common,
                vec![TimePeriod::Dawn],
            )],
        ),
        placement(
            MIDDLE,
            vec![HabitatSpot::with_periods(
                Location::Meadow,
                Tier::Common,
                vec![TimePeriod::Dawn],
            )],
        ),
        placement(FINAL, vec![HabitatSpot::new(Location::Deepwood, Tier::Rare)]),
    ];

    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, &placements, &lineage);

    assert_eq!(
        draft.groups(Location::Meadow, Tier::Common, TimePeriod::Dawn),
        [vec![BASE, MIDDLE]]
    );
    assert_eq!(
        draft.groups(Location::Deepwood, Tier::Rare, TimePeriod::All),
        [vec![FINAL]]
    );

    let lattice = resolve_thresholds(draft, &edges, &LevelGateTuning::default())
        .expect("content is well formed");

    let pool = lattice.pool(Location::Meadow, Tier::Common, TimePeriod::Dawn);
    assert_eq!(pool.len(), 1);
    let stages = staged(&pool[0]);
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[&1], [BASE], "level 1 is exactly the base form");
    assert_eq!(stages[&16], [MIDDLE]);

    assert_eq!(
        lattice.pool(Location::Deepwood, Tier::Rare, TimePeriod::All),
        [ResolvedPoolEntry::Single(FINAL)]
    );
}

#[test]
fn unrelated_creatures_never_merge() {
    let lineage = EvolutionLineage::from_edges(&[]);
    let placements = vec![
        placement(LONER, vec![HabitatSpot::new(Location::Dunes, Tier::Common)]),
        placement(OTHER, vec![HabitatSpot::new(Location::Dunes, Tier::Common)]),
    ];

    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, &placements, &lineage);

    assert_eq!(
        draft.groups(Location::Dunes, Tier::Common, TimePeriod::All),
        [vec![LONER], vec![OTHER]]
    );
}

#[test]
fn boss_threshold_is_ten_below_the_wild_threshold() {
    // The same pair declared in a common cell and a boss cell.
    let edges = vec![EvolutionEdge::new(BASE, MIDDLE, 30)];
    let lineage = EvolutionLineage::from_edges(&edges);
    let spots = |tier| vec![HabitatSpot::new(Location::Caldera, tier)];
    let placements = vec![
        placement(BASE, [spots(Tier::Common), spots(Tier::Boss)].concat()),
        placement(MIDDLE, [spots(Tier::Common), spots(Tier::Boss)].concat()),
    ];

    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, &placements, &lineage);
    let lattice = resolve_thresholds(draft, &edges, &LevelGateTuning::default())
        .expect("content is well formed");

    let common = staged(&lattice.pool(Location::Caldera, Tier::Common, TimePeriod::All)[0]);
    let boss = staged(&lattice.pool(Location::Caldera, Tier::Boss, TimePeriod::All)[0]);
    let common_key = *common.keys().max().expect("two stages");
    let boss_key = *boss.keys().max().expect("two stages");
    assert_eq!(common_key, 30);
    assert_eq!(boss_key, common_key - 10, "boss pools unlock 10 levels early");
}

#[test]
fn out_of_order_insertion_still_yields_ancestor_first_groups() {
    // The descendant lands in the cell before its base form does, skipping
    // the middle stage entirely. The lineage closure still merges them.
    let edges = chain_edges();
    let lineage = EvolutionLineage::from_edges(&edges);
    let placements = vec![
        placement(FINAL, vec![HabitatSpot::new(Location::Ruins, Tier::Rare)]),
        placement(BASE, vec![HabitatSpot::new(Location::Ruins, Tier::Rare)]),
    ];

    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, &placements, &lineage);

    assert_eq!(
        draft.groups(Location::Ruins, Tier::Rare, TimePeriod::All),
        [vec![BASE, FINAL]]
    );
}

#[test]
fn level_one_evolutions_and_wild_delay_shift_the_threshold() {
    // A stone-style level 1 evolution with wild delay 3 resolves to
    // 1 - 1 + 3 * 10 = 30.
    let edges = vec![EvolutionEdge::delayed(BASE, MIDDLE, 1, 3)];
    let lineage = EvolutionLineage::from_edges(&edges);
    let placements = vec![
        placement(BASE, vec![HabitatSpot::new(Location::Hollow, Tier::Uncommon)]),
        placement(MIDDLE, vec![HabitatSpot::new(Location::Hollow, Tier::Uncommon)]),
    ];

    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, &placements, &lineage);
    let lattice = resolve_thresholds(draft, &edges, &LevelGateTuning::default())
        .expect("content is well formed");

    let stages = staged(&lattice.pool(Location::Hollow, Tier::Uncommon, TimePeriod::All)[0]);
    assert_eq!(stages[&30], [MIDDLE]);
}

#[test]
fn custom_tuning_replaces_the_default_constants() {
    let edges = vec![EvolutionEdge::delayed(BASE, MIDDLE, 20, 2)];
    let lineage = EvolutionLineage::from_edges(&edges);
    let placements = vec![
        placement(BASE, vec![HabitatSpot::new(Location::Quarry, Tier::Boss)]),
        placement(MIDDLE, vec![HabitatSpot::new(Location::Quarry, Tier::Boss)]),
    ];

    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, &placements, &lineage);
    let tuning = LevelGateTuning::new(5, 3);
    let lattice = resolve_thresholds(draft, &edges, &tuning).expect("content is well formed");

    let stages = staged(&lattice.pool(Location::Quarry, Tier::Boss, TimePeriod::All)[0]);
    assert_eq!(stages[&27], [MIDDLE], "20 + 2 * 5 - 3");
}

#[test]
fn forms_sharing_a_threshold_share_a_bucket() {
    // Branch siblings evolving at the same level with the same delay.
    let left = CreatureId::new(21);
    let right = CreatureId::new(22);
    let edges = vec![
        EvolutionEdge::new(BASE, left, 26),
        EvolutionEdge::new(BASE, right, 26),
    ];
    let lineage = EvolutionLineage::from_edges(&edges);
    let spot = || vec![HabitatSpot::new(Location::Shoreline, Tier::Uncommon)];
    let placements = vec![
        placement(BASE, spot()),
        placement(left, spot()),
        placement(right, spot()),
    ];

    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, &placements, &lineage);
    let lattice = resolve_thresholds(draft, &edges, &LevelGateTuning::default())
        .expect("content is well formed");

    let pool = lattice.pool(Location::Shoreline, Tier::Uncommon, TimePeriod::All);
    assert_eq!(pool.len(), 1, "the whole branching line shares one slot");
    let stages = staged(&pool[0]);
    assert_eq!(stages[&1], [BASE]);
    // The later sibling splices in right after the shared base, so it
    // precedes the earlier one inside the merged bucket.
    assert_eq!(stages[&26], [right, left], "equal thresholds merge");
}

#[test]
fn empty_period_subset_expands_to_the_wildcard_cell_only() {
    let lineage = EvolutionLineage::from_edges(&[]);
    let placements = vec![placement(
        LONER,
        vec![HabitatSpot::new(Location::Meadow, Tier::Common)],
    )];

    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, &placements, &lineage);

    assert_eq!(
        draft.groups(Location::Meadow, Tier::Common, TimePeriod::All),
        [vec![LONER]]
    );
    for period in [
        TimePeriod::Dawn,
        TimePeriod::Day,
        TimePeriod::Dusk,
        TimePeriod::Night,
    ] {
        assert!(draft.groups(Location::Meadow, Tier::Common, period).is_empty());
    }
}

#[test]
fn unplaced_creature_with_no_escape_is_uncatchable_exactly_once() {
    let edges = chain_edges();
    let placements = vec![
        placement(BASE, vec![]),
        placement(MIDDLE, vec![]),
        placement(FINAL, vec![]),
        placement(LONER, vec![HabitatSpot::new(Location::Dunes, Tier::Common)]),
    ];

    let uncatchable = scan_availability(&placements, &edges);
    assert_eq!(uncatchable.len(), 3);
    assert!(uncatchable.contains(&BASE));
    assert!(!uncatchable.contains(&LONER));
}

#[test]
fn terminal_only_placement_counts_as_unplaced() {
    let placements = vec![placement(
        LONER,
        vec![HabitatSpot::new(Location::TERMINAL, Tier::BossUltraRare)],
    )];

    let uncatchable = scan_availability(&placements, &[]);
    assert!(uncatchable.contains(&LONER));
}

#[test]
fn direct_evolution_target_with_a_real_spot_is_an_escape() {
    let edges = vec![EvolutionEdge::new(BASE, MIDDLE, 16)];
    let placements = vec![
        placement(BASE, vec![]),
        placement(MIDDLE, vec![HabitatSpot::new(Location::Thicket, Tier::Rare)]),
    ];

    let uncatchable = scan_availability(&placements, &edges);
    assert!(
        uncatchable.is_empty(),
        "a placed direct target keeps the base obtainable"
    );
}

#[test]
fn availability_check_stays_one_hop_deep() {
    // Observed shipped behavior: only the final stage of a three-stage
    // chain is placed, so the base is flagged even though the line can be
    // reached through the middle stage's own escape.
    let edges = chain_edges();
    let placements = vec![
        placement(BASE, vec![]),
        placement(MIDDLE, vec![]),
        placement(FINAL, vec![HabitatSpot::new(Location::Caldera, Tier::Boss)]),
    ];

    let uncatchable = scan_availability(&placements, &edges);
    assert!(
        uncatchable.contains(&BASE),
        "the base's direct target is unplaced, so the grandchild is ignored"
    );
    assert!(
        !uncatchable.contains(&MIDDLE),
        "the middle stage escapes through its placed direct target"
    );
}

#[test]
fn member_edge_decides_the_threshold_over_an_outside_edge() {
    // MIDDLE is reachable both from the grouped BASE and from an
    // unrelated outsider; an edge list declaring the outsider's edge
    // first must not change the group's threshold.
    let edges = vec![
        EvolutionEdge::delayed(OTHER, MIDDLE, 1, 4),
        EvolutionEdge::new(BASE, MIDDLE, 30),
    ];
    let lineage = EvolutionLineage::from_edges(&edges);
    let placements = vec![
        placement(BASE, vec![HabitatSpot::new(Location::Marsh, Tier::Common)]),
        placement(MIDDLE, vec![HabitatSpot::new(Location::Marsh, Tier::Common)]),
    ];

    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, &placements, &lineage);
    let lattice = resolve_thresholds(draft, &edges, &LevelGateTuning::default())
        .expect("content is well formed");

    let stages = staged(&lattice.pool(Location::Marsh, Tier::Common, TimePeriod::All)[0]);
    assert_eq!(
        stages[&30],
        [MIDDLE],
        "the edge from inside the group wins regardless of declaration order"
    );
    assert!(stages.get(&40).is_none(), "the outsider's delayed edge is ignored");
}

#[test]
fn gap_groups_fall_back_to_any_prevolution_edge() {
    // Only the base and the final stage are placed; the group skips the
    // middle stage, so the final form's threshold comes from the
    // full-table lookup.
    let edges = chain_edges();
    let lineage = EvolutionLineage::from_edges(&edges);
    let placements = vec![
        placement(BASE, vec![HabitatSpot::new(Location::Ruins, Tier::Rare)]),
        placement(FINAL, vec![HabitatSpot::new(Location::Ruins, Tier::Rare)]),
    ];

    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, &placements, &lineage);
    let lattice = resolve_thresholds(draft, &edges, &LevelGateTuning::default())
        .expect("content is well formed");

    let stages = staged(&lattice.pool(Location::Ruins, Tier::Rare, TimePeriod::All)[0]);
    assert_eq!(stages[&1], [BASE]);
    assert_eq!(stages[&36], [FINAL], "threshold from the middle stage's edge");
}

#[test]
fn grouped_form_without_a_prevolution_edge_is_rejected() {
    // Assemble against the full chain, then resolve against a pruned
    // table that lost MIDDLE's prevolution edge entirely.
    let lineage = EvolutionLineage::from_edges(&chain_edges());
    let placements = vec![
        placement(BASE, vec![HabitatSpot::new(Location::Cavern, Tier::Common)]),
        placement(MIDDLE, vec![HabitatSpot::new(Location::Cavern, Tier::Common)]),
    ];

    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, &placements, &lineage);

    let pruned = vec![EvolutionEdge::new(MIDDLE, FINAL, 36)];
    assert_eq!(
        resolve_thresholds(draft, &pruned, &LevelGateTuning::default())
            .expect_err("the grouped form has no prevolution edge"),
        ContentError::MissingPrevolution { creature: MIDDLE }
    );
}

#[test]
fn group_leader_evolving_from_a_member_is_rejected() {
    // Assembly always splices an ancestor before its descendants, so a
    // misplaced leader cannot arise when thresholds are resolved against
    // the same table the groups were assembled from. It surfaces only
    // when the two tables disagree, as with this reversed edge.
    let lineage = EvolutionLineage::from_edges(&[EvolutionEdge::new(BASE, MIDDLE, 16)]);
    let placements = vec![
        placement(BASE, vec![HabitatSpot::new(Location::Cavern, Tier::Common)]),
        placement(MIDDLE, vec![HabitatSpot::new(Location::Cavern, Tier::Common)]),
    ];

    let mut draft = DraftLattice::new();
    assemble_species(&mut draft, &placements, &lineage);

    let reversed = vec![EvolutionEdge::new(MIDDLE, BASE, 16)];
    assert_eq!(
        resolve_thresholds(draft, &reversed, &LevelGateTuning::default())
            .expect_err("the leader evolves from another member"),
        ContentError::MisplacedGroupBase { creature: BASE }
    );
}

#[test]
fn trainer_assembly_appends_without_merging() {
    let ranger = TrainerId::new(1);
    let warden = TrainerId::new(2);
    let mut lattice = TrainerLattice::new();
    assemble_trainers(
        &mut lattice,
        &[
            TrainerPlacement::new(ranger, vec![(Location::Meadow, Tier::Common)]),
            TrainerPlacement::new(warden, vec![(Location::Meadow, Tier::Common)]),
            TrainerPlacement::new(ranger, vec![(Location::Meadow, Tier::Common)]),
        ],
    );

    assert_eq!(
        lattice.trainers(Location::Meadow, Tier::Common, TimePeriod::All),
        [ranger, warden, ranger],
        "declarations are independent appends"
    );
}
