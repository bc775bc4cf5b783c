//! Turning loosely-typed documents into complete `DesignState`s.
//!
//! The input may come from local storage, a URL hash, an example, or an
//! older version of the app. Whatever arrives, [`normalize`] returns a
//! complete document and never fails.

use std::collections::BTreeMap;

use serde_json::Value;

use super::model::{ButtonConfig, DEFAULT_REMOTE_ID, DesignOptions, DesignState, TapEntry, TapKind};
use crate::errors::DesignError;
use crate::log::debug;
use crate::remote::RemoteTemplate;

/// Normalize `raw` against the known remote templates.
pub fn normalize(raw: &Value, remotes: &[RemoteTemplate]) -> DesignState {
    let ids: Vec<&str> = remotes.iter().map(|r| r.id.as_str()).collect();
    normalize_with_ids(raw, &ids)
}

/// Normalize `raw` when only the remote ids are at hand
pub fn normalize_with_ids(raw: &Value, known_ids: &[&str]) -> DesignState {
    let empty = serde_json::Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    DesignState {
        remote_id: select_remote(obj.get("remoteId"), known_ids),
        taps_enabled: taps_enabled(obj.get("tapsEnabled")),
        button_configs: button_configs(obj.get("buttonConfigs")),
        options: DesignOptions::merged(obj.get("options")),
    }
}

/// Parse host JSON text and normalize it.
///
/// Only text that is not JSON at all is an error; any JSON value normalizes.
pub fn normalize_json(text: &str, remotes: &[RemoteTemplate]) -> Result<DesignState, DesignError> {
    let raw: Value = serde_json::from_str(text)?;
    Ok(normalize(&raw, remotes))
}

fn select_remote(raw: Option<&Value>, known_ids: &[&str]) -> String {
    let requested = raw.and_then(Value::as_str);
    if let Some(id) = requested
        && known_ids.contains(&id)
    {
        return id.to_string();
    }
    let fallback = known_ids.first().copied().unwrap_or(DEFAULT_REMOTE_ID);
    debug!(?requested, fallback, "unknown remote, using fallback");
    fallback.to_string()
}

/// A non-empty array is kept verbatim; anything else becomes `[single]`.
fn taps_enabled(raw: Option<&Value>) -> Vec<TapEntry> {
    let entries = match raw {
        Some(Value::Array(items)) => tap_entries(items),
        _ => Vec::new(),
    };
    taps_enabled_or_single(entries)
}

pub(crate) fn tap_entries(items: &[Value]) -> Vec<TapEntry> {
    items
        .iter()
        .map(|item| match item.as_str().and_then(TapKind::from_name) {
            Some(kind) => TapEntry::Kind(kind),
            None => TapEntry::Other(item.clone()),
        })
        .collect()
}

pub(crate) fn taps_enabled_or_single(entries: Vec<TapEntry>) -> Vec<TapEntry> {
    if entries.is_empty() {
        vec![TapEntry::Kind(TapKind::Single)]
    } else {
        entries
    }
}

fn button_configs(raw: Option<&Value>) -> BTreeMap<String, ButtonConfig> {
    let Some(Value::Object(map)) = raw else {
        return BTreeMap::new();
    };
    map.iter()
        .filter_map(|(id, v)| Some((id.clone(), ButtonConfig::from_value(v)?)))
        .collect()
}
