use serde_json::{Value, json};
use tracing::info;

use ose_core::{CoreError, EncounterQuery, Scope, resolve_encounter};

use super::{Context, to_json};

pub fn run(
    ctx: &mut Context,
    scope: Scope,
    scope_id: Option<i64>,
    level: u32,
    biome: &str,
) -> Result<Value, String> {
    let db = ctx.open_db()?;
    let query = EncounterQuery::new(scope)
        .with_scope_id(scope_id)
        .with_level(level)
        .with_biome(biome);

    match resolve_encounter(&db, &query, &mut ctx.rng) {
        Ok(roll) => Ok(json!({
            "ok": true,
            "matched": to_json(&roll.matched)?,
            "table": to_json(&roll.table)?,
            "encounter": to_json(&roll.entry)?,
        })),
        Err(CoreError::NotFound {
            scope,
            scope_id,
            level,
            biome,
        }) => {
            info!(%scope, ?scope_id, level, %biome, "no encounter table matched");
            Ok(json!({
                "ok": false,
                "error": "no matching encounter table",
                "scope": scope,
                "scope_id": scope_id,
                "level": level,
                "biome": biome,
            }))
        }
        Err(CoreError::EmptyTable { table_id }) => Ok(json!({
            "ok": false,
            "error": "encounter table has no entries",
            "table_id": table_id,
        })),
        Err(e) => Err(e.to_string()),
    }
}
