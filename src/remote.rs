//! Remote templates: the physical geometry of one remote-control model.
//!
//! Templates are static data supplied by the host. The core reads the remote
//! id for matching and the button rectangles for geometry; everything else is
//! decoration for whole-remote previews.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::design::example::Example;
use crate::errors::{DesignError, json_kind};
use crate::log::debug;
use crate::types::{CornerRadii, Rect};

/// One physical button on a remote, in millimetres from the remote's top-left
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ButtonDef {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Uniform corner radius
    #[serde(default, rename = "rMm")]
    pub r_mm: Option<f64>,
    /// Per-corner radii; a bare number is read as a uniform radius
    #[serde(default, deserialize_with = "radius_value")]
    pub r: Option<CornerOverrides>,
}

/// Per-corner radius overrides. Corners left out fall back to `rMm`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct CornerOverrides {
    pub tl: Option<f64>,
    pub tr: Option<f64>,
    pub br: Option<f64>,
    pub bl: Option<f64>,
}

impl CornerOverrides {
    pub fn resolve(&self, base: f64) -> CornerRadii {
        CornerRadii {
            tl: self.tl.unwrap_or(base),
            tr: self.tr.unwrap_or(base),
            br: self.br.unwrap_or(base),
            bl: self.bl.unwrap_or(base),
        }
    }
}

impl From<CornerRadii> for CornerOverrides {
    fn from(r: CornerRadii) -> Self {
        CornerOverrides {
            tl: Some(r.tl),
            tr: Some(r.tr),
            br: Some(r.br),
            bl: Some(r.bl),
        }
    }
}

impl ButtonDef {
    pub fn new(id: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        ButtonDef {
            id: id.into(),
            x,
            y,
            w,
            h,
            r_mm: None,
            r: None,
        }
    }

    pub fn with_radius(mut self, r_mm: f64) -> Self {
        self.r_mm = Some(r_mm);
        self
    }

    pub fn with_corners(mut self, r: impl Into<CornerOverrides>) -> Self {
        self.r = Some(r.into());
        self
    }

    /// Position and size on the remote
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Resolved corner radii: each listed corner overrides the uniform
    /// radius, which defaults to 0. No radius exceeds half the smaller side.
    pub fn corner_radii(&self) -> CornerRadii {
        let base = self.r_mm.unwrap_or(0.0);
        let requested = match self.r {
            Some(corners) => corners.resolve(base),
            None => CornerRadii::uniform(base),
        };
        requested.clamped(self.rect().max_corner_radius())
    }
}

fn radius_value<'de, D>(deserializer: D) -> Result<Option<CornerOverrides>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RadiusValue {
        Uniform(f64),
        Corners(CornerOverrides),
    }

    Ok(match Option::<RadiusValue>::deserialize(deserializer)? {
        Some(RadiusValue::Uniform(r)) => Some(CornerRadii::uniform(r).into()),
        Some(RadiusValue::Corners(c)) => Some(c),
        None => None,
    })
}

/// Preview-only decoration: holes, sensors, logos
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Cutout {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        #[serde(default)]
        r: f64,
    },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub width_mm: f64,
    pub height_mm: f64,
    #[serde(default)]
    pub corner_mm: f64,
    #[serde(default)]
    pub buttons: Vec<ButtonDef>,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub cutouts: Vec<Cutout>,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub examples: Vec<Example>,
}

impl RemoteTemplate {
    pub fn new(id: impl Into<String>, width_mm: f64, height_mm: f64) -> Self {
        let id = id.into();
        RemoteTemplate {
            name: id.clone(),
            id,
            width_mm,
            height_mm,
            corner_mm: 0.0,
            buttons: Vec::new(),
            cutouts: Vec::new(),
            examples: Vec::new(),
        }
    }

    pub fn with_button(mut self, button: ButtonDef) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn button(&self, id: &str) -> Option<&ButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Look up an example by its id or, failing that, its display name
    pub fn example(&self, key: &str) -> Option<&Example> {
        self.examples
            .iter()
            .find(|e| e.id() == Some(key))
            .or_else(|| self.examples.iter().find(|e| e.name() == Some(key)))
    }
}

/// Decoration lists drop entries they cannot read instead of failing the
/// whole template.
fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(_err) => {
                debug!(error = %_err, "skipping unreadable template entry");
                None
            }
        })
        .collect())
}

/// The set of remote templates known to the host
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RemoteCatalog {
    pub remotes: Vec<RemoteTemplate>,
}

impl RemoteCatalog {
    pub fn new(remotes: Vec<RemoteTemplate>) -> Self {
        RemoteCatalog { remotes }
    }

    /// Parse a catalog from JSON: an array of templates, an object with a
    /// `remotes` array, or a single template object.
    pub fn from_json(text: &str) -> Result<Self, DesignError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DesignError> {
        let remotes = match value {
            Value::Array(_) => serde_json::from_value(value)?,
            Value::Object(mut obj) => match obj.remove("remotes") {
                Some(list) => serde_json::from_value(list)?,
                None => vec![serde_json::from_value(Value::Object(obj))?],
            },
            other => {
                return Err(DesignError::NotAnObject {
                    found: json_kind(&other),
                });
            }
        };
        Ok(RemoteCatalog { remotes })
    }

    pub fn get(&self, id: &str) -> Option<&RemoteTemplate> {
        self.remotes.iter().find(|r| r.id == id)
    }

    /// The fallback remote for unknown ids
    pub fn first(&self) -> Option<&RemoteTemplate> {
        self.remotes.first()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.remotes.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn as_slice(&self) -> &[RemoteTemplate] {
        &self.remotes
    }
}
