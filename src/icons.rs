//! Icon references and the glyph catalog seam.
//!
//! An icon reference is a namespaced string such as `mdi:lightbulb`. The
//! family comes from the prefix; glyph data comes from a [`GlyphCatalog`]
//! owned by the host and passed into every render call.

use std::collections::HashMap;

use crate::errors::CatalogError;
use crate::log::debug;

/// Icon family, taken from the reference's namespace prefix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconFamily {
    Mdi,
    Hue,
    Phu,
    Unknown,
}

impl IconFamily {
    pub const KNOWN: [IconFamily; 3] = [IconFamily::Mdi, IconFamily::Hue, IconFamily::Phu];

    pub fn prefix(self) -> Option<&'static str> {
        match self {
            IconFamily::Mdi => Some("mdi"),
            IconFamily::Hue => Some("hue"),
            IconFamily::Phu => Some("phu"),
            IconFamily::Unknown => None,
        }
    }
}

/// Resolve the family of `icon_ref` from its prefix
pub fn resolve_family(icon_ref: &str) -> IconFamily {
    split_ref(icon_ref).0
}

/// Split `icon_ref` into its family and bare name.
///
/// References without a known prefix resolve to [`IconFamily::Unknown`] and
/// keep the whole string as the name.
pub fn split_ref(icon_ref: &str) -> (IconFamily, &str) {
    let icon_ref = icon_ref.trim();
    for family in IconFamily::KNOWN {
        if let Some(prefix) = family.prefix()
            && let Some(name) = icon_ref.strip_prefix(prefix).and_then(|rest| rest.strip_prefix(':'))
        {
            return (family, name);
        }
    }
    (IconFamily::Unknown, icon_ref)
}

/// Path data of one glyph in its own coordinate space
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub path_data: String,
    /// `[min_x, min_y, width, height]`
    pub view_box: [f64; 4],
}

impl Glyph {
    pub fn new(path_data: impl Into<String>, view_box: [f64; 4]) -> Self {
        Glyph {
            path_data: path_data.into(),
            view_box,
        }
    }

    /// Material Design Icons draw on a 24×24 grid
    pub fn square24(path_data: impl Into<String>) -> Self {
        Glyph::new(path_data, [0.0, 0.0, 24.0, 24.0])
    }

    pub fn width(&self) -> f64 {
        self.view_box[2]
    }

    pub fn height(&self) -> f64 {
        self.view_box[3]
    }

    /// A glyph with an empty or degenerate view box cannot be scaled
    pub fn is_drawable(&self) -> bool {
        !self.path_data.trim().is_empty()
            && self.width().is_finite()
            && self.height().is_finite()
            && self.width() > 0.0
            && self.height() > 0.0
    }
}

/// Name → glyph lookup, loaded once by the host.
///
/// Lookups must be synchronous and side-effect free. Before the catalog is
/// loaded every icon is reported as not renderable.
pub trait GlyphCatalog {
    fn load(&mut self) -> Result<(), CatalogError> {
        Ok(())
    }

    fn is_loaded(&self) -> bool;

    fn lookup(&self, family: IconFamily, name: &str) -> Option<&Glyph>;
}

/// In-memory catalog filled by the host
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    glyphs: HashMap<(IconFamily, String), Glyph>,
    loaded: bool,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StaticCatalog::insert`]
    pub fn with_glyph(mut self, icon_ref: &str, glyph: Glyph) -> Self {
        self.insert(icon_ref, glyph);
        self
    }

    /// Register a glyph under a full reference such as `hue:bulb-group`
    pub fn insert(&mut self, icon_ref: &str, glyph: Glyph) {
        let (family, name) = split_ref(icon_ref);
        self.glyphs.insert((family, name.to_string()), glyph);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphCatalog for StaticCatalog {
    fn load(&mut self) -> Result<(), CatalogError> {
        if self.glyphs.is_empty() {
            debug!("loading an empty glyph catalog");
        }
        self.loaded = true;
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn lookup(&self, family: IconFamily, name: &str) -> Option<&Glyph> {
        self.glyphs.get(&(family, name.to_string()))
    }
}

/// Which icon families may be drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FamilyFlags {
    pub mdi: bool,
    pub hue: bool,
    pub phu: bool,
}

impl Default for FamilyFlags {
    fn default() -> Self {
        FamilyFlags {
            mdi: cfg!(feature = "mdi"),
            hue: cfg!(feature = "hue"),
            phu: cfg!(feature = "phu"),
        }
    }
}

impl FamilyFlags {
    pub const ALL: FamilyFlags = FamilyFlags {
        mdi: true,
        hue: true,
        phu: true,
    };

    pub fn is_enabled(&self, family: IconFamily) -> bool {
        match family {
            IconFamily::Mdi => self.mdi,
            IconFamily::Hue => self.hue,
            IconFamily::Phu => self.phu,
            IconFamily::Unknown => false,
        }
    }
}

/// Answers "can this icon be drawn?" against a catalog and family flags
pub struct IconResolver<'a, C: GlyphCatalog + ?Sized> {
    catalog: &'a C,
    flags: FamilyFlags,
}

impl<'a, C: GlyphCatalog + ?Sized> IconResolver<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        IconResolver {
            catalog,
            flags: FamilyFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: FamilyFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn flags(&self) -> FamilyFlags {
        self.flags
    }

    /// The glyph for `icon_ref`, if its family is enabled and the loaded
    /// catalog has a drawable entry for its bare name
    pub fn glyph(&self, icon_ref: &str) -> Option<&'a Glyph> {
        let (family, name) = split_ref(icon_ref);
        if !self.flags.is_enabled(family) {
            debug!(icon_ref, ?family, "icon family disabled or unknown");
            return None;
        }
        if !self.catalog.is_loaded() {
            debug!(icon_ref, "glyph catalog not loaded yet");
            return None;
        }
        let glyph = self.catalog.lookup(family, name).filter(|g| g.is_drawable());
        if glyph.is_none() {
            debug!(icon_ref, "icon not in catalog");
        }
        glyph
    }

    pub fn is_renderable(&self, icon_ref: &str) -> bool {
        self.glyph(icon_ref).is_some()
    }
}

impl<C: GlyphCatalog + ?Sized> Clone for IconResolver<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: GlyphCatalog + ?Sized> Copy for IconResolver<'_, C> {}
