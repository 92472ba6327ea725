//! Encounter table resolution.
//!
//! A query names a scope, an optional scope instance, a level, and a biome.
//! The resolver tries four progressively relaxed filters against the store,
//! stops at the first that returns anything, takes the lowest-id table from
//! that candidate set, and rolls one of its entries with [`pick`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encounter::{EncounterEntry, EncounterTable, Scope, normalize_biome};
use crate::error::{CoreError, CoreResult};
use crate::random::RandomSource;
use crate::weighted::pick;

/// Read access to stored encounter tables.
///
/// Implementations must return fresh data on every call; the resolver never
/// caches between calls.
pub trait EncounterStore {
    /// All tables matching the filter. `scope_id == None` means any
    /// instance; `biome` is compared case-insensitively and `""` only matches
    /// wildcard tables.
    fn fetch_tables(
        &self,
        scope: Scope,
        scope_id: Option<i64>,
        level: u32,
        biome: &str,
    ) -> CoreResult<Vec<EncounterTable>>;

    /// All entries of a table, in insertion order.
    fn fetch_entries(&self, table_id: i64) -> CoreResult<Vec<EncounterEntry>>;
}

/// What the caller is looking for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterQuery {
    /// Encounter context.
    pub scope: Scope,
    /// Specific scope instance (dungeon id), if known.
    pub scope_id: Option<i64>,
    /// Dungeon level or danger level.
    pub level: u32,
    /// Terrain tag; normalized to lowercase without surrounding whitespace.
    pub biome: String,
}

impl EncounterQuery {
    /// A level-1 query with no instance and the wildcard biome.
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            scope_id: None,
            level: 1,
            biome: String::new(),
        }
    }

    /// Restrict to a scope instance.
    pub fn with_scope_id(mut self, scope_id: Option<i64>) -> Self {
        self.scope_id = scope_id;
        self
    }

    /// Set the level.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Set the biome.
    pub fn with_biome(mut self, biome: &str) -> Self {
        self.biome = normalize_biome(biome);
        self
    }

    /// The four filters to try, in priority order.
    pub fn cascade(&self) -> [CascadeFilter; 4] {
        [
            CascadeFilter {
                step: CascadeStep::Exact,
                scope_id: self.scope_id,
                biome: self.biome.clone(),
            },
            CascadeFilter {
                step: CascadeStep::AnyBiome,
                scope_id: self.scope_id,
                biome: String::new(),
            },
            CascadeFilter {
                step: CascadeStep::AnyInstance,
                scope_id: None,
                biome: self.biome.clone(),
            },
            CascadeFilter {
                step: CascadeStep::AnyInstanceAnyBiome,
                scope_id: None,
                biome: String::new(),
            },
        ]
    }
}

/// Which relaxation produced the chosen table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeStep {
    /// Scope instance and biome both matched.
    Exact,
    /// Scope instance matched; wildcard-biome table.
    AnyBiome,
    /// Any scope instance; biome matched.
    AnyInstance,
    /// Any scope instance; wildcard-biome table.
    AnyInstanceAnyBiome,
}

impl std::fmt::Display for CascadeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::AnyBiome => write!(f, "any biome"),
            Self::AnyInstance => write!(f, "any instance"),
            Self::AnyInstanceAnyBiome => write!(f, "any instance, any biome"),
        }
    }
}

/// One filter of the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeFilter {
    /// Which step this is.
    pub step: CascadeStep,
    /// Instance filter (`None` = any).
    pub scope_id: Option<i64>,
    /// Biome filter (`""` = wildcard tables only).
    pub biome: String,
}

/// A rolled encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterRoll {
    /// The table that was rolled on.
    pub table: EncounterTable,
    /// The picked entry.
    pub entry: EncounterEntry,
    /// Which cascade step matched the table.
    pub matched: CascadeStep,
}

/// Find the table a query resolves to.
///
/// Candidates from different cascade steps are never merged. Within the
/// winning step the lowest id wins.
pub fn resolve_table<S>(
    store: &S,
    query: &EncounterQuery,
) -> CoreResult<(EncounterTable, CascadeStep)>
where
    S: EncounterStore + ?Sized,
{
    if query.level == 0 {
        return Err(CoreError::InvalidArgument(
            "level must be at least 1".to_string(),
        ));
    }
    let biome = normalize_biome(&query.biome);

    for filter in query.cascade() {
        let candidates = store.fetch_tables(
            query.scope,
            filter.scope_id,
            query.level,
            &normalize_biome(&filter.biome),
        )?;
        debug!(
            step = %filter.step,
            scope = %query.scope,
            scope_id = ?filter.scope_id,
            level = query.level,
            biome = %filter.biome,
            candidates = candidates.len(),
            "encounter cascade step"
        );
        if let Some(table) = candidates.into_iter().min_by_key(|t| t.id) {
            return Ok((table, filter.step));
        }
    }

    Err(CoreError::NotFound {
        scope: query.scope,
        scope_id: query.scope_id,
        level: query.level,
        biome,
    })
}

/// Resolve a table for `query` and roll one of its entries.
pub fn resolve_encounter<S, R>(
    store: &S,
    query: &EncounterQuery,
    rng: &mut R,
) -> CoreResult<EncounterRoll>
where
    S: EncounterStore + ?Sized,
    R: RandomSource + ?Sized,
{
    let (table, matched) = resolve_table(store, query)?;
    let entries = store.fetch_entries(table.id)?;
    if entries.is_empty() {
        return Err(CoreError::EmptyTable { table_id: table.id });
    }
    let entry = pick(&entries, rng)?.clone();
    debug!(table_id = table.id, entry = %entry.entry.label, %matched, "encounter rolled");

    Ok(EncounterRoll {
        table,
        entry,
        matched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::NewEncounterTable;
    use crate::memory::MemoryStore;
    use crate::random::ScriptedRolls;
    use crate::weighted::WeightedEntry;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn add(store: &mut MemoryStore, table_id: i64, label: &str, weight: u32) {
        store
            .add_entry(table_id, WeightedEntry::new(label, weight).unwrap())
            .unwrap();
    }

    fn dungeon_five() -> (MemoryStore, i64) {
        let mut store = MemoryStore::new();
        let table = store
            .create_table(NewEncounterTable::new(Scope::Dungeon, "Dungeon 5 L1").with_scope_id(5))
            .unwrap();
        add(&mut store, table.id, "Goblins", 3);
        add(&mut store, table.id, "Skeletons", 3);
        add(&mut store, table.id, "Rats", 2);
        (store, table.id)
    }

    #[test]
    fn swamp_query_falls_through_to_wildcard_biome() {
        let (store, table_id) = dungeon_five();
        let query = EncounterQuery::new(Scope::Dungeon)
            .with_scope_id(Some(5))
            .with_biome("swamp");
        let mut rng = StdRng::seed_from_u64(42);
        let roll = resolve_encounter(&store, &query, &mut rng).unwrap();
        assert_eq!(roll.table.id, table_id);
        assert_eq!(roll.matched, CascadeStep::AnyBiome);
        assert!(["Goblins", "Skeletons", "Rats"].contains(&roll.entry.entry.label.as_str()));
    }

    #[test]
    fn step_two_beats_steps_three_and_four() {
        let mut store = MemoryStore::new();
        // Matches step 3 (any instance, exact biome).
        store
            .create_table(
                NewEncounterTable::new(Scope::Dungeon, "Generic swamp").with_biome("swamp"),
            )
            .unwrap();
        // Matches step 4 (any instance, any biome).
        store
            .create_table(NewEncounterTable::new(Scope::Dungeon, "Generic"))
            .unwrap();
        // Matches step 2 (instance 5, any biome), created last.
        let wanted = store
            .create_table(NewEncounterTable::new(Scope::Dungeon, "Dungeon 5").with_scope_id(5))
            .unwrap();
        add(&mut store, wanted.id, "Kobolds", 1);

        let query = EncounterQuery::new(Scope::Dungeon)
            .with_scope_id(Some(5))
            .with_biome("swamp");
        let (table, step) = resolve_table(&store, &query).unwrap();
        assert_eq!(table.id, wanted.id);
        assert_eq!(step, CascadeStep::AnyBiome);
    }

    #[test]
    fn exact_match_wins_first() {
        let (mut store, _) = dungeon_five();
        let exact = store
            .create_table(
                NewEncounterTable::new(Scope::Dungeon, "Dungeon 5 swamp")
                    .with_scope_id(5)
                    .with_biome("Swamp"),
            )
            .unwrap();
        let query = EncounterQuery::new(Scope::Dungeon)
            .with_scope_id(Some(5))
            .with_biome("SWAMP");
        let (table, step) = resolve_table(&store, &query).unwrap();
        assert_eq!(table.id, exact.id);
        assert_eq!(step, CascadeStep::Exact);
    }

    #[test]
    fn unknown_instance_falls_back_to_any_instance() {
        let (store, table_id) = dungeon_five();
        let query = EncounterQuery::new(Scope::Dungeon).with_scope_id(Some(99));
        let (table, step) = resolve_table(&store, &query).unwrap();
        assert_eq!(table.id, table_id);
        // With the wildcard biome, steps three and four ask the same thing.
        assert_eq!(step, CascadeStep::AnyInstance);
    }

    #[test]
    fn lowest_id_wins_among_candidates() {
        let mut store = MemoryStore::new();
        let first = store
            .create_table(
                NewEncounterTable::new(Scope::Wilderness, "Forest A").with_biome("forest"),
            )
            .unwrap();
        store
            .create_table(
                NewEncounterTable::new(Scope::Wilderness, "Forest B").with_biome("forest"),
            )
            .unwrap();
        let query = EncounterQuery::new(Scope::Wilderness).with_biome("forest");
        let (table, _) = resolve_table(&store, &query).unwrap();
        assert_eq!(table.id, first.id);
    }

    #[test]
    fn nothing_matching_is_not_found() {
        let (store, _) = dungeon_five();
        let query = EncounterQuery::new(Scope::Town).with_level(3).with_biome("Urban");
        let mut rng = StdRng::seed_from_u64(0);
        let err = resolve_encounter(&store, &query, &mut rng).unwrap_err();
        match &err {
            CoreError::NotFound {
                scope,
                scope_id,
                level,
                biome,
            } => {
                assert_eq!(*scope, Scope::Town);
                assert_eq!(*scope_id, None);
                assert_eq!(*level, 3);
                assert_eq!(biome, "urban");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(err.is_recoverable());
    }

    #[test]
    fn level_must_match() {
        let (store, _) = dungeon_five();
        let query = EncounterQuery::new(Scope::Dungeon).with_scope_id(Some(5)).with_level(2);
        assert!(matches!(
            resolve_table(&store, &query),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn empty_table_is_reported() {
        let mut store = MemoryStore::new();
        let table = store
            .create_table(NewEncounterTable::new(Scope::Town, "Quiet town"))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let err =
            resolve_encounter(&store, &EncounterQuery::new(Scope::Town), &mut rng).unwrap_err();
        assert!(matches!(err, CoreError::EmptyTable { table_id } if table_id == table.id));
        assert!(err.is_recoverable());
    }

    #[test]
    fn level_zero_is_invalid() {
        let (store, _) = dungeon_five();
        let query = EncounterQuery::new(Scope::Dungeon).with_level(0);
        assert!(matches!(
            resolve_table(&store, &query),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn same_seed_same_encounter() {
        let (store, _) = dungeon_five();
        let query = EncounterQuery::new(Scope::Dungeon).with_scope_id(Some(5));
        for seed in 0..20 {
            let mut rng1 = StdRng::seed_from_u64(seed);
            let mut rng2 = StdRng::seed_from_u64(seed);
            let a = resolve_encounter(&store, &query, &mut rng1).unwrap();
            let b = resolve_encounter(&store, &query, &mut rng2).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn scripted_roll_picks_exact_entry() {
        let (store, _) = dungeon_five();
        let query = EncounterQuery::new(Scope::Dungeon).with_scope_id(Some(5));
        // Goblins 1-3, Skeletons 4-6, Rats 7-8.
        let mut rolls = ScriptedRolls::new(&[7]);
        let roll = resolve_encounter(&store, &query, &mut rolls).unwrap();
        assert_eq!(roll.entry.entry.label, "Rats");
        assert_eq!(roll.matched, CascadeStep::Exact);
    }

    #[test]
    fn cascade_order_is_fixed() {
        let query = EncounterQuery::new(Scope::Dungeon)
            .with_scope_id(Some(2))
            .with_biome(" Hills ");
        let steps: Vec<(CascadeStep, Option<i64>, String)> = query
            .cascade()
            .into_iter()
            .map(|f| (f.step, f.scope_id, f.biome))
            .collect();
        assert_eq!(
            steps,
            vec![
                (CascadeStep::Exact, Some(2), "hills".to_string()),
                (CascadeStep::AnyBiome, Some(2), String::new()),
                (CascadeStep::AnyInstance, None, "hills".to_string()),
                (CascadeStep::AnyInstanceAnyBiome, None, String::new()),
            ]
        );
    }
}
