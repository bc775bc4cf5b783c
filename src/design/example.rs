//! Example designs shipped with remote templates.
//!
//! Two shapes exist in the wild. A user example wraps a previously exported
//! document under `state`; a preset declares icons, strikes and colors per
//! button. [`Example::from_value`] decides which one it is once, at parse
//! time, and [`build_from_example`] turns either into a `DesignState`.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::model::{
    ButtonConfig, DesignOptions, DesignState, TapEntry, TapMap, lenient_string, tap_map_from_value,
};
use super::normalize::{normalize_with_ids, tap_entries, taps_enabled_or_single};
use crate::errors::{DesignError, json_kind};

/// A declarative preset
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresetExample {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_taps")]
    pub taps_enabled: Vec<TapEntry>,
    #[serde(deserialize_with = "tap_maps_by_button")]
    pub button_icons: BTreeMap<String, TapMap<String>>,
    #[serde(deserialize_with = "tap_maps_by_button")]
    pub button_strike: BTreeMap<String, TapMap<bool>>,
    #[serde(deserialize_with = "tap_maps_by_button")]
    pub button_icon_colors: BTreeMap<String, TapMap<String>>,
    #[serde(deserialize_with = "strings_by_button")]
    pub button_fill: BTreeMap<String, String>,
    #[serde(deserialize_with = "lenient_object")]
    pub options: Option<Map<String, Value>>,
}

/// A previously exported document
#[derive(Clone, Debug, PartialEq)]
pub struct UserExample {
    pub id: Option<String>,
    pub name: Option<String>,
    pub state: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Example {
    Preset(PresetExample),
    User(UserExample),
}

impl Example {
    /// Classify and parse a raw example object
    pub fn from_value(value: &Value) -> Result<Self, DesignError> {
        let Value::Object(obj) = value else {
            return Err(DesignError::NotAnObject { found: json_kind(value) });
        };
        let label = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_owned);
        match obj.get("state") {
            Some(state) => Ok(Example::User(UserExample {
                id: label("id"),
                name: label("name"),
                state: state.clone(),
            })),
            None => Ok(Example::Preset(PresetExample::deserialize(value)?)),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Example::Preset(p) => p.name.as_deref(),
            Example::User(u) => u.name.as_deref(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Example::Preset(p) => p.id.as_deref(),
            Example::User(u) => u.id.as_deref(),
        }
    }
}

impl<'de> Deserialize<'de> for Example {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Example::from_value(&value).map_err(D::Error::custom)
    }
}

/// Build a complete design for `remote_id` from an example.
pub fn build_from_example(remote_id: &str, example: &Example) -> DesignState {
    match example {
        Example::User(user) => build_from_user(remote_id, user),
        Example::Preset(preset) => build_from_preset(remote_id, preset),
    }
}

fn build_from_user(remote_id: &str, user: &UserExample) -> DesignState {
    let mut merged = user.state.as_object().cloned().unwrap_or_default();
    merged.insert("remoteId".to_string(), Value::String(remote_id.to_string()));
    normalize_with_ids(&Value::Object(merged), &[remote_id])
}

fn build_from_preset(remote_id: &str, preset: &PresetExample) -> DesignState {
    let taps_enabled = taps_enabled_or_single(preset.taps_enabled.clone());
    let mut button_configs: BTreeMap<String, ButtonConfig> = BTreeMap::new();

    for (id, icons) in &preset.button_icons {
        let config = ButtonConfig {
            icons: icons.clone(),
            strike: preset.button_strike.get(id).cloned().unwrap_or_default(),
            icon_colors: preset.button_icon_colors.get(id).cloned().unwrap_or_default(),
            button_fill: preset.button_fill.get(id).cloned(),
            ..ButtonConfig::default()
        };
        button_configs.insert(id.clone(), config);
    }

    // Strike, color and fill may be set on buttons without icons. Only fill
    // gaps here so nothing from the icons pass is overwritten.
    for (id, strike) in &preset.button_strike {
        let config = button_configs.entry(id.clone()).or_default();
        for (tap, on) in strike {
            config.strike.entry(*tap).or_insert(*on);
        }
    }
    for (id, colors) in &preset.button_icon_colors {
        let config = button_configs.entry(id.clone()).or_default();
        for (tap, color) in colors {
            config.icon_colors.entry(*tap).or_insert_with(|| color.clone());
        }
    }
    for (id, fill) in &preset.button_fill {
        let config = button_configs.entry(id.clone()).or_default();
        config.button_fill.get_or_insert_with(|| fill.clone());
    }

    let specified = |key: &str| preset.options.as_ref().is_some_and(|o| o.contains_key(key));
    let mut options = match &preset.options {
        Some(map) => DesignOptions::default().merge_from(map),
        None => DesignOptions::default(),
    };
    if !specified("showTapMarkersAlways") {
        options.show_tap_markers_always = true;
    }
    if !specified("showTapDividers") {
        options.show_tap_dividers = taps_enabled.len() > 1;
    }

    DesignState {
        remote_id: remote_id.to_string(),
        taps_enabled,
        button_configs,
        options,
    }
}

// ============================================================================
// Lenient readers for preset fields
// ============================================================================

fn tap_maps_by_button<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, TapMap<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(map) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .iter()
        .filter(|(_, v)| v.is_object())
        .map(|(id, v)| (id.clone(), tap_map_from_value(v)))
        .collect())
}

fn strings_by_button<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(map) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(id, v)| match v {
            Value::String(s) => Some((id, s)),
            _ => None,
        })
        .collect())
}

fn lenient_taps<'de, D>(deserializer: D) -> Result<Vec<TapEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => tap_entries(&items),
        _ => Vec::new(),
    })
}

fn lenient_object<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => Some(map),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::model::{MarkerFill, TapKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn preset(value: Value) -> Example {
        let example = Example::from_value(&value).unwrap();
        assert!(matches!(example, Example::Preset(_)));
        example
    }

    #[test]
    fn classifies_by_state_field() {
        let user = Example::from_value(&json!({"name": "Mine", "state": {}})).unwrap();
        assert!(matches!(user, Example::User(_)));
        assert_eq!(user.name(), Some("Mine"));
        let p = Example::from_value(&json!({"id": "p1", "buttonIcons": {}})).unwrap();
        assert!(matches!(p, Example::Preset(_)));
        assert_eq!(p.id(), Some("p1"));
    }

    #[test]
    fn rejects_non_objects() {
        assert!(matches!(
            Example::from_value(&json!([1])),
            Err(DesignError::NotAnObject { found: "an array" })
        ));
    }

    #[test]
    fn multi_tap_preset_turns_on_dividers() {
        let example = preset(json!({
            "tapsEnabled": ["single", "double"],
            "buttonIcons": {"on": {"single": "mdi:power"}}
        }));
        let state = build_from_example("hue-dimmer-v2", &example);
        assert!(state.options.show_tap_dividers);
        assert!(state.options.show_tap_markers_always);
        assert_eq!(state.remote_id, "hue-dimmer-v2");
    }

    #[test]
    fn single_tap_preset_has_no_dividers() {
        let example = preset(json!({"buttonIcons": {"on": {"single": "mdi:power"}}}));
        let state = build_from_example("r", &example);
        assert!(!state.options.show_tap_dividers);
        assert_eq!(state.enabled_taps(), vec![TapKind::Single]);
    }

    #[test]
    fn explicit_options_win() {
        let example = preset(json!({
            "tapsEnabled": ["single", "long"],
            "buttonIcons": {},
            "options": {"showTapDividers": false, "showTapMarkersAlways": false, "tapMarkerFill": "filled"}
        }));
        let state = build_from_example("r", &example);
        assert!(!state.options.show_tap_dividers);
        assert!(!state.options.show_tap_markers_always);
        assert_eq!(state.options.tap_marker_fill, MarkerFill::Filled);
    }

    #[test]
    fn strike_and_color_without_icons_are_merged() {
        let example = preset(json!({
            "buttonIcons": {"on": {"single": "mdi:power"}},
            "buttonStrike": {"on": {"single": true}, "off": {"long": true}},
            "buttonIconColors": {"dim": {"double": "#ff0000"}},
            "buttonFill": {"off": "#222222", "on": "#ffffff"}
        }));
        let state = build_from_example("r", &example);

        let on = state.button("on").unwrap();
        assert_eq!(on.icon(TapKind::Single), Some("mdi:power"));
        assert!(on.is_struck(TapKind::Single));
        assert_eq!(on.fill(), Some("#ffffff"));

        let off = state.button("off").unwrap();
        assert!(off.icons.is_empty());
        assert!(off.is_struck(TapKind::Long));
        assert_eq!(off.fill(), Some("#222222"));

        let dim = state.button("dim").unwrap();
        assert!(dim.icons.is_empty());
        assert_eq!(dim.icon_color(TapKind::Double), Some("#ff0000"));
    }

    #[test]
    fn user_example_keeps_target_remote() {
        let example = Example::from_value(&json!({
            "state": {
                "remoteId": "some-other-remote",
                "tapsEnabled": ["double"],
                "buttonConfigs": {"on": {"icons": {"double": "mdi:power"}}},
                "options": {"labelCount": 4}
            }
        }))
        .unwrap();
        let state = build_from_example("tap-dial", &example);
        assert_eq!(state.remote_id, "tap-dial");
        assert_eq!(state.enabled_taps(), vec![TapKind::Double]);
        assert_eq!(state.options.label_count, 4);
        assert_eq!(state.button("on").unwrap().icon(TapKind::Double), Some("mdi:power"));
    }

    #[test]
    fn user_example_is_idempotent() {
        let example = Example::from_value(&json!({"state": {"tapsEnabled": ["long"]}})).unwrap();
        let first = build_from_example("tap-dial", &example);
        let again = build_from_example(
            "tap-dial",
            &Example::User(UserExample { id: None, name: None, state: first.to_json_value() }),
        );
        assert_eq!(first, again);
    }

    #[test]
    fn deserializes_through_serde() {
        let examples: Vec<Example> =
            serde_json::from_value(json!([{"state": {}}, {"buttonIcons": {"a": {"long": "phu:x"}}}])).unwrap();
        assert_eq!(examples.len(), 2);
        assert!(serde_json::from_value::<Vec<Example>>(json!([5])).is_err());
    }
}
