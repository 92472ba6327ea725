pub mod dice;
pub mod encounter;
pub mod generate;
pub mod oracle;
pub mod tables;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use ose_storage::CampaignDb;

use crate::config::Settings;

/// Shared state for one command: settings and the seeded RNG.
pub struct Context {
    pub settings: Settings,
    pub rng: StdRng,
}

impl Context {
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        debug!(seed, "rng seeded");
        Self {
            settings,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Open the campaign database, creating it on first use.
    pub fn open_db(&self) -> Result<CampaignDb, String> {
        CampaignDb::open(&self.settings.database).map_err(|e| {
            format!(
                "failed to open database {}: {e}",
                self.settings.database.display()
            )
        })
    }
}

/// Serialize a result for output.
pub fn to_json<T: Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| format!("failed to encode output: {e}"))
}

/// `{"ok": true}` merged with the fields of `value`.
pub fn ok_with<T: Serialize>(value: &T) -> Result<Value, String> {
    let mut out = Map::new();
    out.insert("ok".to_string(), Value::Bool(true));
    match to_json(value)? {
        Value::Object(fields) => out.extend(fields),
        other => {
            out.insert("result".to_string(), other);
        }
    }
    Ok(Value::Object(out))
}

/// Parse an optional JSON object argument.
pub fn parse_object(raw: Option<&str>, what: &str) -> Result<Map<String, Value>, String> {
    match raw {
        None => Ok(Map::new()),
        Some(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(format!("{what} must be a JSON object")),
            Err(e) => Err(format!("{what} is not valid JSON: {e}")),
        },
    }
}

/// Pretty-print a JSON document.
pub fn render(value: &Value) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("failed to encode output: {e}"))
}
