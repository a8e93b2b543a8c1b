use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A live match as reported by the remote API. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub teams: Option<Teams>,
    #[serde(default)]
    pub sources: Option<Vec<Source>>,
}

/// The `teams` object. Keys other than `home` and `away` are not kept, but
/// they still make the object non-empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Teams {
    pub home: Option<Team>,
    pub away: Option<Team>,
    keys: usize,
}

impl Teams {
    pub fn is_empty(&self) -> bool {
        self.keys == 0
    }
}

impl From<Map<String, Value>> for Teams {
    fn from(object: Map<String, Value>) -> Self {
        Self {
            home: team(object.get("home")),
            away: team(object.get("away")),
            keys: object.len(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub name: Option<String>,
}

// A team that is not an object, or a name that is not a string, counts as missing.
fn team(value: Option<&Value>) -> Option<Team> {
    let object = value?.as_object()?;

    Some(Team {
        name: object.get("name").and_then(Value::as_str).map(str::to_string),
    })
}

/// Upstream provider plus the provider's identifier for the match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Source {
    #[serde(default, deserialize_with = "ident")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "ident")]
    pub id: Option<String>,
}

/// One playable stream for a match, as returned by the per-match endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecord {
    #[serde(default, deserialize_with = "ident")]
    pub id: Option<String>,
    #[serde(default)]
    pub stream_no: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub hd: Option<bool>,
    #[serde(default)]
    pub embed_url: Option<String>,
    #[serde(default, deserialize_with = "ident")]
    pub source: Option<String>,
}

impl fmt::Display for StreamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} [{}] hd={} {}",
            self.stream_no.unwrap_or_default(),
            self.language.as_deref().unwrap_or("?"),
            self.hd.unwrap_or_default(),
            self.embed_url.as_deref().unwrap_or("-"),
        )
    }
}

// Identifiers show up as strings or bare numbers depending on the provider.
fn ident<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
