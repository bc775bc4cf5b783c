//! The persisted design document.
//!
//! These types serialize to the JSON shape hosts store in the URL hash and
//! local storage. Deserialization is deliberately lenient: fields with the
//! wrong type are dropped rather than rejected, so a damaged document still
//! loads.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::clamp::{clamp, clamp_count};
use crate::layout::SheetSize;

/// Remote used when the host supplies no templates at all
pub const DEFAULT_REMOTE_ID: &str = "hue-dimmer-v2";

/// A tap gesture. The declaration order is the column order on a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TapKind {
    Single,
    Double,
    Long,
}

impl TapKind {
    pub const ALL: [TapKind; 3] = [TapKind::Single, TapKind::Double, TapKind::Long];

    pub fn as_str(self) -> &'static str {
        match self {
            TapKind::Single => "single",
            TapKind::Double => "double",
            TapKind::Long => "long",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "single" => Some(TapKind::Single),
            "double" => Some(TapKind::Double),
            "long" => Some(TapKind::Long),
            _ => None,
        }
    }
}

/// One entry of `tapsEnabled`.
///
/// Unknown entries are carried through untouched so that a document written
/// by a newer host survives a round trip; the renderer ignores them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TapEntry {
    Kind(TapKind),
    Other(Value),
}

impl From<TapKind> for TapEntry {
    fn from(kind: TapKind) -> Self {
        TapEntry::Kind(kind)
    }
}

/// Per-tap values keyed in column order
pub type TapMap<T> = BTreeMap<TapKind, T>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrikeStyle {
    #[default]
    Diagonal,
    Straight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerFill {
    #[default]
    Outline,
    Filled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColorMode {
    Black,
    #[default]
    Icon,
}

// ============================================================================
// Lenient field readers
// ============================================================================

/// Read a `{tap: value}` object, keeping only recognised taps with values
/// of the right type.
pub(crate) fn tap_map_from_value<T: DeserializeOwned>(value: &Value) -> TapMap<T> {
    let Value::Object(map) = value else {
        return TapMap::new();
    };
    map.iter()
        .filter_map(|(key, v)| {
            let tap = TapKind::from_name(key)?;
            let parsed = T::deserialize(v).ok()?;
            Some((tap, parsed))
        })
        .collect()
}

pub(crate) fn lenient_tap_map<'de, D, T>(deserializer: D) -> Result<TapMap<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(tap_map_from_value(&value))
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn non_empty(s: &str) -> bool {
    !s.trim().is_empty()
}

// ============================================================================
// ButtonConfig
// ============================================================================

/// Content assigned to one physical button
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonConfig {
    /// Namespaced icon references such as `mdi:power`
    #[serde(default, deserialize_with = "lenient_tap_map")]
    pub icons: TapMap<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "lenient_tap_map")]
    pub texts: TapMap<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "lenient_tap_map")]
    pub strike: TapMap<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "lenient_tap_map")]
    pub strike_style: TapMap<StrikeStyle>,
    /// Per-tap content color overrides
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "lenient_tap_map")]
    pub icon_colors: TapMap<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_string")]
    pub button_fill: Option<String>,
}

impl ButtonConfig {
    /// Parse one entry of `buttonConfigs`; anything but an object is dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        ButtonConfig::deserialize(value).ok()
    }

    pub fn icon(&self, tap: TapKind) -> Option<&str> {
        self.icons.get(&tap).map(String::as_str).filter(|s| non_empty(s))
    }

    pub fn text(&self, tap: TapKind) -> Option<&str> {
        self.texts.get(&tap).map(String::as_str).filter(|s| non_empty(s))
    }

    /// True when the tap carries an icon or text
    pub fn has_content(&self, tap: TapKind) -> bool {
        self.icon(tap).is_some() || self.text(tap).is_some()
    }

    pub fn is_struck(&self, tap: TapKind) -> bool {
        self.strike.get(&tap).copied().unwrap_or(false)
    }

    pub fn strike_style(&self, tap: TapKind) -> StrikeStyle {
        self.strike_style.get(&tap).copied().unwrap_or_default()
    }

    pub fn icon_color(&self, tap: TapKind) -> Option<&str> {
        self.icon_colors.get(&tap).map(String::as_str).filter(|s| non_empty(s))
    }

    pub fn fill(&self) -> Option<&str> {
        self.button_fill.as_deref().filter(|s| non_empty(s))
    }

    /// Set the tap's icon. A blank icon counts as removal for strikes.
    pub fn set_icon(&mut self, tap: TapKind, icon: impl Into<String>) {
        self.icons.insert(tap, icon.into());
        self.drop_orphan_strike(tap);
    }

    pub fn set_text(&mut self, tap: TapKind, text: impl Into<String>) {
        self.texts.insert(tap, text.into());
        self.drop_orphan_strike(tap);
    }

    /// Remove the tap's icon. A strike left without content is removed too.
    pub fn clear_icon(&mut self, tap: TapKind) {
        self.icons.remove(&tap);
        self.drop_orphan_strike(tap);
    }

    /// Remove the tap's text. A strike left without content is removed too.
    pub fn clear_text(&mut self, tap: TapKind) {
        self.texts.remove(&tap);
        self.drop_orphan_strike(tap);
    }

    pub fn set_strike(&mut self, tap: TapKind, on: bool) {
        if on {
            self.strike.insert(tap, true);
        } else {
            self.strike.remove(&tap);
        }
    }

    pub fn set_strike_style(&mut self, tap: TapKind, style: StrikeStyle) {
        self.strike_style.insert(tap, style);
    }

    pub fn set_icon_color(&mut self, tap: TapKind, color: Option<String>) {
        match color {
            Some(c) => self.icon_colors.insert(tap, c),
            None => self.icon_colors.remove(&tap),
        };
    }

    pub fn set_fill(&mut self, fill: Option<String>) {
        self.button_fill = fill;
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
            && self.texts.is_empty()
            && self.strike.is_empty()
            && self.strike_style.is_empty()
            && self.icon_colors.is_empty()
            && self.button_fill.is_none()
    }

    fn drop_orphan_strike(&mut self, tap: TapKind) {
        if !self.has_content(tap) {
            self.strike.remove(&tap);
            self.strike_style.remove(&tap);
        }
    }
}

// ============================================================================
// DesignOptions
// ============================================================================

/// Rendering options. Every numeric field is clamped on load.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignOptions {
    pub show_tap_markers_always: bool,
    pub show_tap_dividers: bool,
    pub show_remote_outline: bool,
    pub show_button_outlines: bool,
    pub show_cutouts: bool,
    pub show_guides: bool,
    pub show_scale_bar: bool,
    pub auto_icon_sizing: bool,
    pub fixed_icon_mm: f64,
    pub label_outline_stroke_mm: f64,
    pub label_width_mm: f64,
    pub label_height_mm: f64,
    pub label_corner_mm: f64,
    pub label_count: u32,
    pub sheet_margin_x_mm: f64,
    pub sheet_margin_y_mm: f64,
    pub sheet_gap_mm: f64,
    pub tap_marker_fill: MarkerFill,
    pub tap_marker_color_mode: MarkerColorMode,
    pub sheet_size: SheetSize,
    pub icon_color: String,
    pub label_outline_color: String,
}

impl Default for DesignOptions {
    fn default() -> Self {
        Self {
            show_tap_markers_always: false,
            show_tap_dividers: false,
            show_remote_outline: true,
            show_button_outlines: true,
            show_cutouts: true,
            show_guides: false,
            show_scale_bar: false,
            auto_icon_sizing: true,
            fixed_icon_mm: 8.0,
            label_outline_stroke_mm: 0.2,
            label_width_mm: 40.0,
            label_height_mm: 30.0,
            label_corner_mm: 2.0,
            label_count: 6,
            sheet_margin_x_mm: 8.0,
            sheet_margin_y_mm: 8.0,
            sheet_gap_mm: 3.0,
            tap_marker_fill: MarkerFill::Outline,
            tap_marker_color_mode: MarkerColorMode::Icon,
            sheet_size: SheetSize::A4,
            icon_color: "#000000".to_string(),
            label_outline_color: "#000000".to_string(),
        }
    }
}

impl DesignOptions {
    /// Layer a raw `options` object over the defaults, field by field.
    ///
    /// Unknown keys are ignored, missing or mistyped keys keep their default,
    /// and numbers are clamped into their domain.
    pub fn merged(raw: Option<&Value>) -> Self {
        let defaults = DesignOptions::default();
        match raw {
            Some(Value::Object(map)) => defaults.merge_from(map),
            _ => defaults,
        }
    }

    /// Layer `map` over `self`
    pub fn merge_from(self, map: &Map<String, Value>) -> Self {
        let flag = |key: &str, current: bool| map.get(key).and_then(Value::as_bool).unwrap_or(current);
        let length = |key: &str, current: f64, min: f64| clamp(&map.get(key), current, Some(min), None);
        let color = |key: &str, current: String| {
            map.get(key)
                .and_then(Value::as_str)
                .filter(|s| non_empty(s))
                .map(str::to_owned)
                .unwrap_or(current)
        };
        let choice = |key: &str| map.get(key).and_then(Value::as_str);

        DesignOptions {
            show_tap_markers_always: flag("showTapMarkersAlways", self.show_tap_markers_always),
            show_tap_dividers: flag("showTapDividers", self.show_tap_dividers),
            show_remote_outline: flag("showRemoteOutline", self.show_remote_outline),
            show_button_outlines: flag("showButtonOutlines", self.show_button_outlines),
            show_cutouts: flag("showCutouts", self.show_cutouts),
            show_guides: flag("showGuides", self.show_guides),
            show_scale_bar: flag("showScaleBar", self.show_scale_bar),
            auto_icon_sizing: flag("autoIconSizing", self.auto_icon_sizing),
            fixed_icon_mm: length("fixedIconMm", self.fixed_icon_mm, 1.0),
            label_outline_stroke_mm: length("labelOutlineStrokeMm", self.label_outline_stroke_mm, 0.0),
            label_width_mm: length("labelWidthMm", self.label_width_mm, 1.0),
            label_height_mm: length("labelHeightMm", self.label_height_mm, 1.0),
            label_corner_mm: length("labelCornerMm", self.label_corner_mm, 0.0),
            label_count: clamp_count(&map.get("labelCount"), f64::from(self.label_count), Some(1.0)) as u32,
            sheet_margin_x_mm: length("sheetMarginXMm", self.sheet_margin_x_mm, 0.0),
            sheet_margin_y_mm: length("sheetMarginYMm", self.sheet_margin_y_mm, 0.0),
            sheet_gap_mm: length("sheetGapMm", self.sheet_gap_mm, 0.0),
            tap_marker_fill: match choice("tapMarkerFill") {
                Some("filled") => MarkerFill::Filled,
                Some("outline") => MarkerFill::Outline,
                _ => self.tap_marker_fill,
            },
            tap_marker_color_mode: match choice("tapMarkerColorMode") {
                Some("black") => MarkerColorMode::Black,
                Some("icon") => MarkerColorMode::Icon,
                _ => self.tap_marker_color_mode,
            },
            sheet_size: choice("sheetSize")
                .and_then(SheetSize::from_name)
                .unwrap_or(self.sheet_size),
            icon_color: color("iconColor", self.icon_color),
            label_outline_color: color("labelOutlineColor", self.label_outline_color),
        }
    }
}

impl From<Value> for DesignOptions {
    fn from(value: Value) -> Self {
        DesignOptions::merged(Some(&value))
    }
}

impl<'de> Deserialize<'de> for DesignOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(DesignOptions::from)
    }
}

// ============================================================================
// DesignState
// ============================================================================

/// The complete editable document
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignState {
    pub remote_id: String,
    pub taps_enabled: Vec<TapEntry>,
    pub button_configs: BTreeMap<String, ButtonConfig>,
    pub options: DesignOptions,
}

impl Default for DesignState {
    fn default() -> Self {
        DesignState {
            remote_id: DEFAULT_REMOTE_ID.to_string(),
            taps_enabled: vec![TapEntry::Kind(TapKind::Single)],
            button_configs: BTreeMap::new(),
            options: DesignOptions::default(),
        }
    }
}

impl DesignState {
    /// A default document for the given remote
    pub fn for_remote(remote_id: impl Into<String>) -> Self {
        DesignState {
            remote_id: remote_id.into(),
            ..DesignState::default()
        }
    }

    /// Enabled taps in column order, ignoring unknown entries and duplicates
    pub fn enabled_taps(&self) -> Vec<TapKind> {
        TapKind::ALL
            .into_iter()
            .filter(|kind| self.is_tap_enabled(*kind))
            .collect()
    }

    pub fn is_tap_enabled(&self, kind: TapKind) -> bool {
        self.taps_enabled.iter().any(|e| *e == TapEntry::Kind(kind))
    }

    pub fn button(&self, id: &str) -> Option<&ButtonConfig> {
        self.button_configs.get(id)
    }

    /// The button's config, created empty if absent
    pub fn button_mut(&mut self, id: &str) -> &mut ButtonConfig {
        self.button_configs.entry(id.to_string()).or_default()
    }

    /// Taps of `button_id` that will be drawn: enabled and carrying content
    pub fn content_taps(&self, button_id: &str) -> Vec<TapKind> {
        let Some(config) = self.button(button_id) else {
            return Vec::new();
        };
        self.enabled_taps()
            .into_iter()
            .filter(|tap| config.has_content(*tap))
            .collect()
    }

    pub fn to_json_value(&self) -> Value {
        // Map keys are strings or unit variants, so this cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn to_json_string(&self) -> String {
        self.to_json_value().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tap_order_is_column_order() {
        let mut taps = vec![TapKind::Long, TapKind::Single, TapKind::Double];
        taps.sort();
        assert_eq!(taps, TapKind::ALL.to_vec());
    }

    #[test]
    fn tap_entries_keep_unknown_values() {
        let entries: Vec<TapEntry> = serde_json::from_value(json!(["double", "triple", 3])).unwrap();
        assert_eq!(entries[0], TapEntry::Kind(TapKind::Double));
        assert_eq!(entries[1], TapEntry::Other(json!("triple")));
        assert_eq!(entries[2], TapEntry::Other(json!(3)));
        assert_eq!(serde_json::to_value(&entries).unwrap(), json!(["double", "triple", 3]));
    }

    #[test]
    fn button_config_lenient_parse() {
        let cfg = ButtonConfig::from_value(&json!({
            "icons": {"single": "mdi:power", "double": 5, "triple": "mdi:x"},
            "strike": {"single": true, "long": "yes"},
            "strikeStyle": {"single": "straight", "double": "wavy"},
            "iconColors": "red",
            "buttonFill": 12,
            "unknown": true
        }))
        .unwrap();
        assert_eq!(cfg.icons.len(), 1);
        assert_eq!(cfg.icon(TapKind::Single), Some("mdi:power"));
        assert!(cfg.is_struck(TapKind::Single));
        assert!(!cfg.is_struck(TapKind::Long));
        assert_eq!(cfg.strike_style(TapKind::Single), StrikeStyle::Straight);
        assert_eq!(cfg.strike_style(TapKind::Double), StrikeStyle::Diagonal);
        assert!(cfg.icon_colors.is_empty());
        assert_eq!(cfg.button_fill, None);
    }

    #[test]
    fn button_config_requires_object() {
        assert!(ButtonConfig::from_value(&json!("mdi:power")).is_none());
        assert!(ButtonConfig::from_value(&json!({})).is_some());
    }

    #[test]
    fn empty_strings_are_not_content() {
        let mut cfg = ButtonConfig::default();
        cfg.set_icon(TapKind::Single, "");
        cfg.set_text(TapKind::Double, "  ");
        assert!(!cfg.has_content(TapKind::Single));
        assert!(!cfg.has_content(TapKind::Double));
    }

    #[test]
    fn clearing_icon_clears_strike() {
        let mut cfg = ButtonConfig::default();
        cfg.set_icon(TapKind::Single, "mdi:power");
        cfg.set_strike(TapKind::Single, true);
        cfg.set_strike_style(TapKind::Single, StrikeStyle::Straight);
        cfg.clear_icon(TapKind::Single);
        assert!(!cfg.strike.contains_key(&TapKind::Single));
        assert!(!cfg.strike_style.contains_key(&TapKind::Single));
    }

    #[test]
    fn clearing_icon_keeps_strike_while_text_remains() {
        let mut cfg = ButtonConfig::default();
        cfg.set_icon(TapKind::Long, "mdi:power");
        cfg.set_text(TapKind::Long, "OFF");
        cfg.set_strike(TapKind::Long, true);
        cfg.clear_icon(TapKind::Long);
        assert!(cfg.is_struck(TapKind::Long));
        cfg.clear_text(TapKind::Long);
        assert!(!cfg.is_struck(TapKind::Long));
        assert!(cfg.is_empty());
    }

    #[test]
    fn blanking_content_clears_strike() {
        let mut cfg = ButtonConfig::default();
        cfg.set_icon(TapKind::Single, "mdi:power");
        cfg.set_strike(TapKind::Single, true);
        cfg.set_strike_style(TapKind::Single, StrikeStyle::Straight);
        cfg.set_icon(TapKind::Single, "");
        assert!(!cfg.has_content(TapKind::Single));
        assert!(!cfg.is_struck(TapKind::Single));
        assert_eq!(cfg.strike_style(TapKind::Single), StrikeStyle::default());

        cfg.set_text(TapKind::Double, "Off");
        cfg.set_strike(TapKind::Double, true);
        cfg.set_text(TapKind::Double, "   ");
        assert!(!cfg.is_struck(TapKind::Double));

        // Replacing content with other content keeps the strike.
        cfg.set_icon(TapKind::Long, "mdi:power");
        cfg.set_strike(TapKind::Long, true);
        cfg.set_icon(TapKind::Long, "mdi:lightbulb");
        assert!(cfg.is_struck(TapKind::Long));
    }

    #[test]
    fn options_merge_clamps_and_ignores_unknown() {
        let opts = DesignOptions::merged(Some(&json!({
            "fixedIconMm": 0,
            "labelOutlineStrokeMm": -1,
            "labelWidthMm": "55",
            "labelCount": 3.8,
            "sheetGapMm": null,
            "tapMarkerFill": "filled",
            "tapMarkerColorMode": "purple",
            "sheetSize": "Letter",
            "iconColor": "",
            "showGuides": "true",
            "bogus": 1
        })));
        assert_eq!(opts.fixed_icon_mm, 1.0);
        assert_eq!(opts.label_outline_stroke_mm, 0.0);
        assert_eq!(opts.label_width_mm, 55.0);
        assert_eq!(opts.label_count, 3);
        assert_eq!(opts.sheet_gap_mm, 3.0);
        assert_eq!(opts.tap_marker_fill, MarkerFill::Filled);
        assert_eq!(opts.tap_marker_color_mode, MarkerColorMode::Icon);
        assert_eq!(opts.sheet_size, SheetSize::Letter);
        assert_eq!(opts.icon_color, "#000000");
        assert!(!opts.show_guides);
    }

    #[test]
    fn label_count_has_floor_of_one() {
        let opts = DesignOptions::merged(Some(&json!({"labelCount": 0})));
        assert_eq!(opts.label_count, 1);
    }

    #[test]
    fn options_serialize_camel_case() {
        let v = serde_json::to_value(DesignOptions::default()).unwrap();
        assert_eq!(v["sheetMarginXMm"], json!(8.0));
        assert_eq!(v["tapMarkerColorMode"], json!("icon"));
        assert_eq!(v["sheetSize"], json!("A4"));
        assert_eq!(v["labelCount"], json!(6));
    }

    #[test]
    fn enabled_taps_ignores_unknown_and_duplicates() {
        let state = DesignState {
            taps_enabled: vec![
                TapEntry::Kind(TapKind::Long),
                TapEntry::Other(json!("triple")),
                TapEntry::Kind(TapKind::Single),
                TapEntry::Kind(TapKind::Long),
            ],
            ..DesignState::default()
        };
        assert_eq!(state.enabled_taps(), vec![TapKind::Single, TapKind::Long]);
    }

    #[test]
    fn content_taps_for_missing_button_is_empty() {
        assert!(DesignState::default().content_taps("nope").is_empty());
    }

    #[test]
    fn state_serializes_document_shape() {
        let mut state = DesignState::for_remote("tap-dial");
        state.button_mut("on").set_icon(TapKind::Single, "mdi:power");
        let v = state.to_json_value();
        assert_eq!(v["remoteId"], json!("tap-dial"));
        assert_eq!(v["tapsEnabled"], json!(["single"]));
        assert_eq!(v["buttonConfigs"], json!({"on": {"icons": {"single": "mdi:power"}}}));
    }
}
