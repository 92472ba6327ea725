use serde_json::Value;

use ose_mechanics::checks::{
    encounter_distance, loyalty_check, morale_check, surprise_check, wandering_check,
};
use ose_mechanics::{Chase, DiceExpr, Environment, pursuit_evasion, roll_reaction, weather_roll};

use super::{Context, to_json};

pub fn roll(ctx: &mut Context, expr: &str) -> Result<Value, String> {
    let parsed = DiceExpr::parse(expr).map_err(|e| e.to_string())?;
    to_json(&parsed.roll(&mut ctx.rng))
}

pub fn reaction(ctx: &mut Context, modifier: i32) -> Result<Value, String> {
    to_json(&roll_reaction(modifier, &mut ctx.rng))
}

pub fn morale(ctx: &mut Context, morale: i32, modifier: i32) -> Result<Value, String> {
    to_json(&morale_check(morale, modifier, &mut ctx.rng))
}

pub fn loyalty(ctx: &mut Context, loyalty: i32, modifier: i32) -> Result<Value, String> {
    to_json(&loyalty_check(loyalty, modifier, &mut ctx.rng))
}

pub fn surprise(ctx: &mut Context, chance: u32, die: u32) -> Result<Value, String> {
    to_json(&surprise_check(chance, die, &mut ctx.rng))
}

pub fn wander(ctx: &mut Context, chance: u32, d8: bool) -> Result<Value, String> {
    to_json(&wandering_check(chance, d8, &mut ctx.rng))
}

pub fn distance(ctx: &mut Context, environment: &str) -> Result<Value, String> {
    to_json(&encounter_distance(Environment::parse(environment), &mut ctx.rng))
}

pub fn pursuit(ctx: &mut Context, chase: &Chase) -> Result<Value, String> {
    to_json(&pursuit_evasion(chase, &mut ctx.rng))
}

pub fn weather(ctx: &mut Context, region: &str, season: &str) -> Result<Value, String> {
    to_json(&weather_roll(region, season, &mut ctx.rng))
}
