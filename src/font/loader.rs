//! Loading font data from files, memory and the installed system fonts.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use log::{debug, info, warn};
use resvg::usvg::fontdb;
use ttf_parser::{Face, name_id};

use super::{FontDescriptor, FontSource};
use crate::config::Config;
use crate::error::{Error, Result};

// ============================================================================
// FontHandle
// ============================================================================

/// One face inside a font file or collection.
#[derive(Clone)]
pub struct FaceBlob {
    data: Arc<[u8]>,
    index: u32,
}

impl FaceBlob {
    pub fn new(data: impl Into<Arc<[u8]>>, index: u32) -> Self {
        Self {
            data: data.into(),
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Index of the face inside a collection, `0` for single fonts.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Parses the face. Cheap; ttf-parser only reads table headers.
    pub fn parse(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, self.index).ok()
    }
}

/// A loaded font, shared between all users of one icon font.
#[derive(Clone)]
pub struct FontHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    family: String,
    faces: Vec<FaceBlob>,
}

impl FontHandle {
    /// Builds a handle from already loaded faces. `faces` may be empty for
    /// engines that resolve glyphs without font data.
    pub fn new(family: impl Into<String>, faces: Vec<FaceBlob>) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                family: family.into(),
                faces,
            }),
        }
    }

    pub fn family(&self) -> &str {
        &self.inner.family
    }

    pub fn faces(&self) -> &[FaceBlob] {
        &self.inner.faces
    }

    /// The face used for drawing and format detection.
    pub fn primary(&self) -> Option<&FaceBlob> {
        self.inner.faces.first()
    }

    /// Whether both handles refer to the same loaded font.
    pub fn same_font(&self, other: &FontHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("family", &self.inner.family)
            .field("faces", &self.inner.faces.len())
            .finish()
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Loads the font described by `descriptor`, logging the outcome.
///
/// `identity` names the font in log messages.
pub(crate) fn load(identity: &str, descriptor: &FontDescriptor) -> Option<FontHandle> {
    let loaded = match descriptor.source {
        FontSource::System => load_system_font(descriptor.family),
        FontSource::File(file_name) => load_font_file(&Config::current().resolve(file_name)),
        FontSource::Embedded(data) => font_from_bytes(Path::new("<embedded>"), Arc::from(data)),
        FontSource::Loader(loader) => loader()
            .ok_or_else(|| Error::font_parse("<loader>", "loader provided no font")),
    };

    match loaded {
        Ok(handle) => {
            if handle.family() != descriptor.family {
                info!(
                    target: "fonticons",
                    "{identity} declares family \"{}\" but the font provides \"{}\"",
                    descriptor.family,
                    handle.family()
                );
            }
            debug!(target: "fonticons", "{identity} is available as {handle:?}");
            Some(handle)
        }
        Err(err) => {
            warn!(target: "fonticons", "Cannot load font {identity}: {err}");
            None
        }
    }
}

/// Loads an application font file, logging failures instead of returning them.
pub fn load_application_font(identity: &str, path: &Path) -> Option<FontHandle> {
    match load_font_file(path) {
        Ok(handle) => Some(handle),
        Err(err) => {
            warn!(target: "fonticons", "Cannot load font {identity}: {err}");
            None
        }
    }
}

/// Reads a font file or collection from disk.
pub fn load_font_file(path: &Path) -> Result<FontHandle> {
    if !path.exists() {
        return Err(Error::FontNotFound {
            path: path.to_path_buf(),
        });
    }

    let data = std::fs::read(path)?;
    font_from_bytes(path, Arc::from(data))
}

/// Parses every face of a font file or collection held in memory.
///
/// `origin` only appears in error messages.
pub fn font_from_bytes(origin: &Path, data: Arc<[u8]>) -> Result<FontHandle> {
    let count = ttf_parser::fonts_in_collection(&data).unwrap_or(1);

    let mut faces = Vec::new();
    let mut first_error = None;
    for index in 0..count {
        match Face::parse(&data, index) {
            Ok(_) => faces.push(FaceBlob {
                data: data.clone(),
                index,
            }),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    let Some(primary) = faces.first() else {
        let reason = first_error.map_or_else(|| "no faces".to_owned(), |err| err.to_string());
        return Err(Error::font_parse(origin, reason));
    };

    let family = families_of(primary)
        .into_iter()
        .next()
        .ok_or_else(|| Error::font_parse(origin, "font has no family name"))?;

    Ok(FontHandle::new(family, faces))
}

/// Family names declared in the name table of `face`.
pub fn families_of(face: &FaceBlob) -> Vec<String> {
    let Some(parsed) = face.parse() else {
        return Vec::new();
    };

    let mut families: Vec<String> = parsed
        .names()
        .into_iter()
        .filter(|name| name.name_id == name_id::FAMILY && name.is_unicode())
        .filter_map(|name| name.to_string())
        .collect();
    families.dedup();
    families
}

pub(crate) fn system_fonts() -> &'static fontdb::Database {
    static DATABASE: OnceLock<fontdb::Database> = OnceLock::new();
    DATABASE.get_or_init(|| {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        debug!(target: "fonticons", "Loaded {} system font faces", db.len());
        db
    })
}

/// Whether an installed font provides `family`.
pub fn has_system_family(family: &str) -> bool {
    system_fonts()
        .faces()
        .any(|face| face.families.iter().any(|(name, _)| name == family))
}

/// Looks up an installed font by family name.
pub fn load_system_font(family: &str) -> Result<FontHandle> {
    let db = system_fonts();
    let families = [fontdb::Family::Name(family)];
    let id = db
        .query(&fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        })
        .filter(|_| has_system_family(family))
        .ok_or_else(|| Error::SystemFontMissing {
            family: family.to_owned(),
        })?;

    let face = db
        .with_face_data(id, |data, index| FaceBlob::new(data, index))
        .ok_or_else(|| Error::SystemFontMissing {
            family: family.to_owned(),
        })?;

    Ok(FontHandle::new(family, vec![face]))
}

// ============================================================================
// Text Resources
// ============================================================================

/// Reads a UTF-8 text file, dropping a leading byte order mark.
///
/// Returns an empty string and logs a warning if the file cannot be read.
pub fn read_text(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            let text: &str = &text;
            text.strip_prefix('\u{feff}').unwrap_or(text).to_owned()
        }
        Err(err) => {
            warn!(target: "fonticons", "Cannot read \"{}\": {err}", path.display());
            String::new()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
