use serde_json::{Value, json};

use ose_solo::oracle::{ask as ask_oracle, generate_event};
use ose_solo::{ChaosFactor, Likelihood};

use super::{Context, ok_with, to_json};

pub fn ask(
    ctx: &mut Context,
    question: &str,
    likelihood: &str,
    chaos: Option<u32>,
) -> Result<Value, String> {
    let likelihood = likelihood
        .parse::<Likelihood>()
        .map_err(|e| e.to_string())?;
    let chaos = match chaos {
        Some(value) => ChaosFactor::new(value),
        None => {
            let db = ctx.open_db()?;
            ChaosFactor::new(db.chaos().map_err(|e| e.to_string())?)
        }
    };

    let result = ask_oracle(likelihood, chaos, &mut ctx.rng).map_err(|e| e.to_string())?;
    let mut out = to_json(&result)?;
    if let Value::Object(map) = &mut out {
        map.insert("question".to_string(), json!(question));
    }
    Ok(out)
}

pub fn event(ctx: &mut Context) -> Result<Value, String> {
    let event = generate_event(&mut ctx.rng).map_err(|e| e.to_string())?;
    to_json(&event)
}

pub fn chaos(ctx: &Context, value: Option<u32>) -> Result<Value, String> {
    let db = ctx.open_db()?;
    let chaos = match value {
        Some(v) => db.set_chaos(v).map_err(|e| e.to_string())?,
        None => db.chaos().map_err(|e| e.to_string())?,
    };
    ok_with(&json!({ "chaos": chaos }))
}
