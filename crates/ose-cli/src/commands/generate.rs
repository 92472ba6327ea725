use serde_json::Value;

use ose_solo::TreasureKind;
use ose_solo::stocking::{dungeon_room, hex_feature};
use ose_solo::treasure::roll_treasure;

use super::{Context, to_json};

pub fn treasure(ctx: &mut Context, kind: &str, hd: u32, level: u32) -> Result<Value, String> {
    let kind = kind.parse::<TreasureKind>().map_err(|e| e.to_string())?;
    let treasure = roll_treasure(kind, hd, level, &mut ctx.rng).map_err(|e| e.to_string())?;
    to_json(&treasure)
}

pub fn room(ctx: &mut Context) -> Result<Value, String> {
    let room = dungeon_room(&mut ctx.rng).map_err(|e| e.to_string())?;
    to_json(&room)
}

pub fn hex(ctx: &mut Context) -> Result<Value, String> {
    let hex = hex_feature(&mut ctx.rng).map_err(|e| e.to_string())?;
    to_json(&hex)
}
