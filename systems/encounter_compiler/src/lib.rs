#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that compiles creature and trainer declarations into the
//! encounter pool lattice.
//!
//! The pipeline runs in a fixed order: the draft lattice allocates every
//! (location, tier, period) cell up front, species assembly splices each
//! declared creature into its cells while merging evolution lines into
//! shared groups, threshold resolution turns the groups into level-gated
//! entries, and the availability scan collects the creatures no cell can
//! ever produce. Trainer assembly is an independent plain append over the
//! same lattice shape. Nothing here performs I/O or consults randomness.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use wildgrove_core::{
    ContentError, CreatureId, CreaturePlacement, EvolutionEdge, Location, ResolvedPoolEntry,
    Tier, TimePeriod, TrainerId, TrainerPlacement,
};

const CELL_COUNT: usize = Location::COUNT * Tier::COUNT * TimePeriod::COUNT;

const fn cell_index(location: Location, tier: Tier, period: TimePeriod) -> usize {
    (location.index() * Tier::COUNT + tier.index()) * TimePeriod::COUNT + period.index()
}

const fn tier_of_cell(index: usize) -> Tier {
    Tier::ALL[(index / TimePeriod::COUNT) % Tier::COUNT]
}

/// Tuning knobs applied while synthesising level thresholds.
///
/// Both values reproduce balance constants carried over from the authored
/// content: each wild-delay ordinal defers an evolved form by
/// `wild_delay_step` effective levels, and boss-tier slots unlock evolved
/// forms `boss_level_discount` levels early so boss fights stay harder at
/// a given nominal progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelGateTuning {
    wild_delay_step: i32,
    boss_level_discount: i32,
}

impl LevelGateTuning {
    /// Creates a tuning profile with explicit step and discount values.
    #[must_use]
    pub const fn new(wild_delay_step: i32, boss_level_discount: i32) -> Self {
        Self {
            wild_delay_step,
            boss_level_discount,
        }
    }

    /// Effective levels added per wild-delay ordinal.
    #[must_use]
    pub const fn wild_delay_step(&self) -> i32 {
        self.wild_delay_step
    }

    /// Effective levels subtracted from thresholds in boss-tier cells.
    #[must_use]
    pub const fn boss_level_discount(&self) -> i32 {
        self.boss_level_discount
    }
}

impl Default for LevelGateTuning {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

/// Transitive ancestor/descendant relation over the evolution edges.
///
/// Precomputed once per build so group merging is correct regardless of
/// the order creatures are inserted into a cell: a late-arriving base form
/// still recognises an already-placed distant descendant.
#[derive(Clone, Debug, Default)]
pub struct EvolutionLineage {
    descendants: HashMap<CreatureId, HashSet<CreatureId>>,
}

impl EvolutionLineage {
    /// Builds the closure from the declared evolution edges.
    #[must_use]
    pub fn from_edges(edges: &[EvolutionEdge]) -> Self {
        let mut direct: HashMap<CreatureId, Vec<CreatureId>> = HashMap::new();
        for edge in edges {
            direct.entry(edge.from()).or_default().push(edge.to());
        }

        let mut descendants: HashMap<CreatureId, HashSet<CreatureId>> = HashMap::new();
        for &ancestor in direct.keys() {
            let mut reached = HashSet::new();
            let mut pending: Vec<CreatureId> = direct[&ancestor].clone();
            while let Some(current) = pending.pop() {
                if !reached.insert(current) {
                    continue;
                }
                if let Some(next) = direct.get(&current) {
                    pending.extend(next.iter().copied());
                }
            }
            let _ = descendants.insert(ancestor, reached);
        }

        Self { descendants }
    }

    /// Whether `ancestor` eventually evolves into `descendant`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: CreatureId, descendant: CreatureId) -> bool {
        self.descendants
            .get(&ancestor)
            .is_some_and(|line| line.contains(&descendant))
    }

    /// Whether the two creatures belong to the same evolution line.
    #[must_use]
    pub fn related(&self, a: CreatureId, b: CreatureId) -> bool {
        self.is_ancestor(a, b) || self.is_ancestor(b, a)
    }
}

/// Encounter lattice during assembly: every cell holds a list of ordered
/// evolution-line groups.
///
/// Construction densely allocates all (location, tier, period) cells, so
/// downstream code never observes an undefined cell; an empty list is the
/// only representation of "no content".
#[derive(Clone, Debug)]
pub struct DraftLattice {
    cells: Vec<Vec<Vec<CreatureId>>>,
}

impl DraftLattice {
    /// Allocates the full lattice with every cell empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![Vec::new(); CELL_COUNT],
        }
    }

    /// Groups currently assembled into a cell, ancestor-first within each
    /// group.
    #[must_use]
    pub fn groups(&self, location: Location, tier: Tier, period: TimePeriod) -> &[Vec<CreatureId>] {
        &self.cells[cell_index(location, tier, period)]
    }

    fn cell_mut(
        &mut self,
        location: Location,
        tier: Tier,
        period: TimePeriod,
    ) -> &mut Vec<Vec<CreatureId>> {
        &mut self.cells[cell_index(location, tier, period)]
    }
}

impl Default for DraftLattice {
    fn default() -> Self {
        Self::new()
    }
}

/// Trainer roster lattice over the same (location, tier, period) shape.
///
/// Declarations carry no day segment, so every appended archetype lands in
/// the wildcard period; the other period cells exist (empty) to uphold the
/// no-undefined-cell guarantee.
#[derive(Clone, Debug)]
pub struct TrainerLattice {
    cells: Vec<Vec<TrainerId>>,
}

impl TrainerLattice {
    /// Allocates the full lattice with every roster empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![Vec::new(); CELL_COUNT],
        }
    }

    /// Trainer archetypes assembled into a cell, in declaration order.
    #[must_use]
    pub fn trainers(&self, location: Location, tier: Tier, period: TimePeriod) -> &[TrainerId] {
        &self.cells[cell_index(location, tier, period)]
    }
}

impl Default for TrainerLattice {
    fn default() -> Self {
        Self::new()
    }
}

/// Finished encounter lattice: every cell holds resolved pool entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterLattice {
    cells: Vec<Vec<ResolvedPoolEntry>>,
}

impl EncounterLattice {
    /// Resolved entries of a cell; empty when nothing was declared there.
    #[must_use]
    pub fn pool(&self, location: Location, tier: Tier, period: TimePeriod) -> &[ResolvedPoolEntry] {
        &self.cells[cell_index(location, tier, period)]
    }
}

/// Inserts every declared creature into its lattice cells, merging
/// evolution lines into shared groups.
///
/// A spot with an empty period subset expands to the wildcard cell only.
/// Within a cell the first group containing a relative of the incoming
/// creature wins; the creature is spliced immediately before its first
/// descendant in that group, or otherwise immediately after its last
/// ancestor, keeping every group ordered ancestor-first. Unrelated
/// creatures start fresh single-member groups.
pub fn assemble_species(
    lattice: &mut DraftLattice,
    placements: &[CreaturePlacement],
    lineage: &EvolutionLineage,
) {
    for placement in placements {
        for spot in placement.spots() {
            let declared = spot.periods();
            let periods: &[TimePeriod] = if declared.is_empty() {
                &[TimePeriod::All]
            } else {
                declared
            };

            for period in periods {
                splice_into_cell(
                    lattice.cell_mut(spot.location(), spot.tier(), *period),
                    placement.creature(),
                    lineage,
                );
            }
        }
    }
}

fn splice_into_cell(
    groups: &mut Vec<Vec<CreatureId>>,
    creature: CreatureId,
    lineage: &EvolutionLineage,
) {
    for group in groups.iter_mut() {
        let mut slot = None;
        for (index, member) in group.iter().enumerate() {
            if lineage.is_ancestor(*member, creature) {
                slot = Some(index + 1);
            } else if lineage.is_ancestor(creature, *member) {
                slot = Some(index);
                break;
            }
        }
        if let Some(at) = slot {
            group.insert(at, creature);
            return;
        }
    }
    groups.push(vec![creature]);
}

/// Converts every assembled group into its resolved pool entry.
///
/// Single-member groups collapse to a bare creature. Larger groups become
/// a level-keyed map: level 1 holds the base form, and each evolved form S
/// lands in the bucket keyed by
/// `level - (1 if level == 1) + wild_delay * step - (discount in boss
/// tiers)`, where the level and delay come from the evolution edge whose
/// target is S and whose source is another group member, falling back to
/// any edge targeting S when the group skips the intermediate stage.
/// Forms sharing a threshold share a bucket, so the key set stays
/// strictly increasing.
pub fn resolve_thresholds(
    draft: DraftLattice,
    edges: &[EvolutionEdge],
    tuning: &LevelGateTuning,
) -> Result<EncounterLattice, ContentError> {
    let mut cells = Vec::with_capacity(draft.cells.len());

    for (index, groups) in draft.cells.into_iter().enumerate() {
        let tier = tier_of_cell(index);
        let mut resolved = Vec::with_capacity(groups.len());
        for group in groups {
            resolved.push(resolve_group(&group, tier, edges, tuning)?);
        }
        cells.push(resolved);
    }

    Ok(EncounterLattice { cells })
}

fn resolve_group(
    group: &[CreatureId],
    tier: Tier,
    edges: &[EvolutionEdge],
    tuning: &LevelGateTuning,
) -> Result<ResolvedPoolEntry, ContentError> {
    let base = group[0];
    if group.len() == 1 {
        return Ok(ResolvedPoolEntry::Single(base));
    }

    // Assembly keeps groups ancestor-first; a leader that itself evolves
    // from another member means the content (or the merge) is corrupt.
    if edges
        .iter()
        .any(|edge| edge.to() == base && group.contains(&edge.from()))
    {
        return Err(ContentError::MisplacedGroupBase { creature: base });
    }

    let mut stages = BTreeMap::new();
    let _ = stages.insert(1, vec![base]);

    for &form in &group[1..] {
        // With convergent lines a form can carry several prevolution
        // edges; the one coming from inside the group decides the
        // threshold. The full-table fallback covers groups whose merge
        // skipped the intermediate stage.
        let edge = edges
            .iter()
            .find(|edge| edge.to() == form && group.contains(&edge.from()))
            .or_else(|| edges.iter().find(|edge| edge.to() == form))
            .ok_or(ContentError::MissingPrevolution { creature: form })?;

        let level = edge.level() as i32;
        let threshold = level - i32::from(level == 1)
            + edge.wild_delay() as i32 * tuning.wild_delay_step
            - if tier.is_boss() {
                tuning.boss_level_discount
            } else {
                0
            };

        stages.entry(threshold).or_insert_with(Vec::new).push(form);
    }

    Ok(ResolvedPoolEntry::Staged(stages))
}

/// Collects every creature no lattice cell can produce.
///
/// A creature is uncatchable when its own spot list is empty or
/// terminal-only and none of its direct evolution targets has a real spot
/// either. The check is deliberately one hop deep: an escape through a
/// grandchild's placement is not considered, matching the shipped
/// behavior the balance tables were authored against.
#[must_use]
pub fn scan_availability(
    placements: &[CreaturePlacement],
    edges: &[EvolutionEdge],
) -> BTreeSet<CreatureId> {
    let mut uncatchable = BTreeSet::new();

    for placement in placements {
        if has_real_spot(placement) {
            continue;
        }

        let escapes = edges
            .iter()
            .filter(|edge| edge.from() == placement.creature())
            .any(|edge| {
                placements
                    .iter()
                    .find(|candidate| candidate.creature() == edge.to())
                    .is_some_and(|candidate| has_real_spot(candidate))
            });

        if !escapes {
            let _ = uncatchable.insert(placement.creature());
        }
    }

    uncatchable
}

fn has_real_spot(placement: &CreaturePlacement) -> bool {
    placement
        .spots()
        .iter()
        .any(|spot| spot.location() != Location::TERMINAL)
}

/// Appends every declared trainer archetype to its roster cell.
///
/// No merging and no ordering semantics beyond declaration order.
pub fn assemble_trainers(lattice: &mut TrainerLattice, trainers: &[TrainerPlacement]) {
    for trainer in trainers {
        for &(location, tier) in trainer.spots() {
            lattice.cells[cell_index(location, tier, TimePeriod::All)].push(trainer.trainer());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{cell_index, tier_of_cell, EvolutionLineage, CELL_COUNT};
    use wildgrove_core::{CreatureId, EvolutionEdge, Location, Tier, TimePeriod};

    #[test]
    fn cell_indices_are_dense_and_unique() {
        let mut seen = vec![false; CELL_COUNT];
        for location in Location::ALL {
            for tier in Tier::ALL {
                for period in TimePeriod::ALL_PERIODS {
                    let index = cell_index(location, tier, period);
                    assert!(!seen[index], "index collision at {index}");
                    seen[index] = true;
                }
            }
        }
        assert!(seen.iter().all(|cell| *cell), "every index is covered");
    }

    #[test]
    fn cell_index_recovers_its_tier() {
        for location in Location::ALL {
            for tier in Tier::ALL {
                for period in TimePeriod::ALL_PERIODS {
                    assert_eq!(tier_of_cell(cell_index(location, tier, period)), tier);
                }
            }
        }
    }

    #[test]
    fn lineage_closure_spans_whole_chains() {
        let base = CreatureId::new(1);
        let middle = CreatureId::new(2);
        let last = CreatureId::new(3);
        let lineage = EvolutionLineage::from_edges(&[
            EvolutionEdge::new(base, middle, 16),
            EvolutionEdge::new(middle, last, 32),
        ]);

        assert!(lineage.is_ancestor(base, middle));
        assert!(lineage.is_ancestor(base, last), "closure is transitive");
        assert!(!lineage.is_ancestor(last, base));
        assert!(lineage.related(last, base));
        assert!(!lineage.related(base, CreatureId::new(99)));
    }

    #[test]
    fn lineage_closure_covers_branches() {
        let base = CreatureId::new(1);
        let left = CreatureId::new(2);
        let right = CreatureId::new(3);
        let lineage = EvolutionLineage::from_edges(&[
            EvolutionEdge::new(base, left, 26),
            EvolutionEdge::delayed(base, right, 26, 1),
        ]);

        assert!(lineage.is_ancestor(base, left));
        assert!(lineage.is_ancestor(base, right));
        assert!(
            !lineage.related(left, right),
            "branch siblings are not each other's ancestors"
        );
    }
}
