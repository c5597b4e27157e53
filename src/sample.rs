//! Sample records printed by the comparison slides

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::errors::{Result, TalkError};

/// A bird, as a plain record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bird {
    pub name: String,
    pub genus: String,
    pub species: String,
    pub flight: bool,
    pub wingspan: u32,
    pub habitats: Vec<String>,
}

impl Bird {
    /// Look up a field by name, the way a dynamic attribute access would
    pub fn attribute(&self, name: &str) -> Result<Value> {
        let value = serde_json::to_value(self)?;
        value
            .get(name)
            .cloned()
            .ok_or_else(|| TalkError::MissingAttribute {
                record: "Bird",
                attribute: Arc::new(name.to_string()),
            })
    }
}

/// A person from the song the talk is named after
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Performer {
    pub name: String,
    pub occupation: String,
    pub song: String,
    pub daydreams: Vec<String>,
    pub rich: bool,
}

pub fn goose() -> Bird {
    Bird {
        name: "Canada Goose".to_string(),
        genus: "Branta".to_string(),
        species: "B. canadensis".to_string(),
        flight: true,
        wingspan: 60,
        habitats: habitats(),
    }
}

pub fn tevye() -> Performer {
    Performer {
        name: "Tevye".to_string(),
        occupation: "dairyman".to_string(),
        song: "If I Were a Rich Man".to_string(),
        daydreams: vec![
            "a big house with rooms by the dozen".to_string(),
            "a yard full of chicks and turkeys and geese".to_string(),
            "a seat by the eastern wall".to_string(),
            "time to sit and discuss the holy books".to_string(),
        ],
        rich: false,
    }
}

fn habitats() -> Vec<String> {
    ["lakes", "ponds", "bays", "marshes", "fields"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// The goose as an ordered key/value record
pub fn goose_map() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("genus".to_string(), json!("branta"));
    map.insert("species".to_string(), json!("b. canadensis"));
    map.insert("flight".to_string(), json!(true));
    map.insert("average wingspan (inches)".to_string(), json!(60));
    map.insert("habitats".to_string(), json!(habitats()));
    map
}

/// The goose map plus an unknown weight, serialized compactly
pub fn goose_json() -> String {
    let mut map = goose_map();
    map.insert("weight".to_string(), Value::Null);
    Value::Object(map).to_string()
}
