use serde_json::{Value, json};

use ose_core::{NewEncounterTable, Scope, WeightedEntry};

use super::{Context, ok_with, parse_object, to_json};

pub fn create(
    ctx: &Context,
    scope: Scope,
    name: &str,
    scope_id: Option<i64>,
    level: u32,
    biome: &str,
    meta: Option<&str>,
) -> Result<Value, String> {
    let meta = parse_object(meta, "meta")?;
    let mut new = NewEncounterTable::new(scope, name)
        .with_level(level)
        .with_biome(biome)
        .with_meta(meta);
    if let Some(id) = scope_id {
        new = new.with_scope_id(id);
    }

    let db = ctx.open_db()?;
    let table = db.create_table(new).map_err(|e| e.to_string())?;
    ok_with(&table)
}

pub fn add(
    ctx: &Context,
    table_id: i64,
    label: &str,
    weight: u32,
    data: Option<&str>,
) -> Result<Value, String> {
    let payload = parse_object(data, "data")?;
    let entry = WeightedEntry::with_payload(label, weight, payload).map_err(|e| e.to_string())?;

    let db = ctx.open_db()?;
    let entry = db.add_entry(table_id, entry).map_err(|e| e.to_string())?;
    ok_with(&entry)
}

pub fn list(ctx: &Context, scope: Option<Scope>, scope_id: Option<i64>) -> Result<Value, String> {
    let db = ctx.open_db()?;
    let tables = db.list_tables(scope, scope_id).map_err(|e| e.to_string())?;
    Ok(json!({ "tables": to_json(&tables)? }))
}

pub fn entries(ctx: &Context, table_id: i64) -> Result<Value, String> {
    let db = ctx.open_db()?;
    let entries = db.list_entries(table_id).map_err(|e| e.to_string())?;
    Ok(json!({ "table_id": table_id, "entries": to_json(&entries)? }))
}

pub fn seed(ctx: &Context, dungeon_id: i64, level: u32) -> Result<Value, String> {
    let db = ctx.open_db()?;
    let (table, entries) = db
        .seed_basic_dungeon_table(dungeon_id, level)
        .map_err(|e| e.to_string())?;
    Ok(json!({
        "ok": true,
        "table": to_json(&table)?,
        "entries": to_json(&entries)?,
    }))
}
