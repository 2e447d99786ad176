//! Conversion of icon font metadata into [`icon_font!`](crate::icon_font)
//! declarations.
//!
//! Three metadata formats are understood:
//!
//! * Font Awesome `icons.json`, filtered by license and style
//! * IcoMoon `selection.json`
//! * `.codepoints` files as shipped with Material Symbols
//!
//! Each converter produces a list of [`IconEntry`] values, which
//! [`render_declaration`] turns into Rust source.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Entries
// ============================================================================

/// Value of an icon entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IconValue {
    Codepoint(u32),
    /// Another name of the entry with this key.
    Alias(String),
}

/// One icon read from a metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconEntry {
    /// Enum key, see [`make_enum_key`].
    pub name: String,

    /// `None` if the icon is not available in the requested style.
    pub value: Option<IconValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl IconEntry {
    pub fn codepoint(name: impl Into<String>, codepoint: u32, comment: Option<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(IconValue::Codepoint(codepoint)),
            comment,
        }
    }

    pub fn alias(name: impl Into<String>, target: impl Into<String>, comment: Option<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(IconValue::Alias(target.into())),
            comment,
        }
    }

    pub fn unsupported(name: impl Into<String>, comment: Option<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            comment,
        }
    }
}

/// Converts an icon name into a CamelCase enum key.
///
/// The name is split at spaces, tabs, underscores and dashes. Keys that
/// would start with a digit get a leading underscore.
///
/// ```
/// use fonticons::metadata::make_enum_key;
///
/// assert_eq!(make_enum_key("arrow-up").unwrap(), "ArrowUp");
/// assert_eq!(make_enum_key("10k").unwrap(), "_10k");
/// ```
pub fn make_enum_key(name: &str) -> Result<String> {
    let mut key = String::with_capacity(name.len());

    for part in name.split([' ', '\t', '_', '-']) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            key.extend(first.to_uppercase());
            key.extend(chars.flat_map(char::to_lowercase));
        }
    }

    match key.chars().next() {
        None => Err(Error::metadata(format!("cannot make an enum key from {name:?}"))),
        Some(first) if first.is_ascii_digit() => Ok(format!("_{key}")),
        Some(_) => Ok(key),
    }
}

/// Renames repeated names to `NameAlt`, `NameAlt1`, `NameAlt2`, ...
///
/// The first occurrence keeps its name. New names never clash with names
/// already in the list.
pub fn deduplicate_icons(mut icons: Vec<IconEntry>) -> Vec<IconEntry> {
    let mut taken: HashSet<String> = icons.iter().map(|icon| icon.name.clone()).collect();
    let mut seen = HashSet::new();

    for icon in &mut icons {
        if seen.insert(icon.name.clone()) {
            continue;
        }

        let mut candidate = format!("{}Alt", icon.name);
        let mut counter = 1;
        while taken.contains(&candidate) {
            candidate = format!("{}Alt{counter}", icon.name);
            counter += 1;
        }

        taken.insert(candidate.clone());
        seen.insert(candidate.clone());
        icon.name = candidate;
    }

    icons
}

fn parse_hex(value: &str) -> Result<u32> {
    let digits = value.trim_start_matches("0x");
    u32::from_str_radix(digits, 16)
        .map_err(|err| Error::metadata(format!("invalid codepoint {value:?}: {err}")))
}

// ============================================================================
// Converters
// ============================================================================

#[derive(Deserialize)]
struct FontAwesomeIcon {
    unicode: String,
    #[serde(default)]
    free: Vec<String>,
    #[serde(default)]
    styles: Vec<String>,
    #[serde(default)]
    aliases: FontAwesomeAliases,
}

#[derive(Default, Deserialize)]
struct FontAwesomeAliases {
    #[serde(default)]
    names: Vec<String>,
}

/// Converts Font Awesome metadata.
///
/// `license` is `"free"` to check the free styles of each icon, anything
/// else checks all styles. Icons without `style` are kept as unsupported
/// entries. Entries are ordered by icon name.
pub fn convert_font_awesome(json: &str, license: &str, style: &str) -> Result<Vec<IconEntry>> {
    let icons: BTreeMap<String, FontAwesomeIcon> = serde_json::from_str(json)?;
    let mut entries = Vec::with_capacity(icons.len());

    for (name, info) in icons {
        let styles = if license == "free" { &info.free } else { &info.styles };
        let key = make_enum_key(&name)?;
        let comment = format!("supported styles: {}", styles.join(", "));

        if !styles.iter().any(|supported| supported == style) {
            entries.push(IconEntry::unsupported(key, Some(comment)));
            continue;
        }

        entries.push(IconEntry::codepoint(&key, parse_hex(&info.unicode)?, Some(comment.clone())));
        for alias in &info.aliases.names {
            entries.push(IconEntry::alias(make_enum_key(alias)?, &key, Some(comment.clone())));
        }
    }

    Ok(entries)
}

#[derive(Deserialize)]
struct IcoMoonSelection {
    #[serde(rename = "IcoMoonType", default)]
    kind: Option<String>,
    #[serde(default)]
    icons: Vec<IcoMoonIcon>,
}

#[derive(Deserialize)]
struct IcoMoonIcon {
    #[serde(default)]
    icon: IcoMoonGlyph,
    properties: IcoMoonProperties,
}

#[derive(Default, Deserialize)]
struct IcoMoonGlyph {
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Deserialize)]
struct IcoMoonProperties {
    name: String,
    code: u32,
}

/// Converts an IcoMoon selection. Tags become comments.
pub fn convert_icomoon_selection(json: &str) -> Result<Vec<IconEntry>> {
    let selection: IcoMoonSelection = serde_json::from_str(json)?;
    if selection.kind.as_deref() != Some("selection") {
        return Err(Error::metadata("unsupported IcoMoon file type"));
    }

    selection
        .icons
        .into_iter()
        .map(|icon| -> Result<IconEntry> {
            let comment = (!icon.icon.tags.is_empty())
                .then(|| format!("tags: {}", icon.icon.tags.join(", ")));
            Ok(IconEntry::codepoint(
                make_enum_key(&icon.properties.name)?,
                icon.properties.code,
                comment,
            ))
        })
        .collect()
}

/// Converts a codepoints file with one `name hexcode` pair per line.
pub fn convert_codepoints(text: &str) -> Result<Vec<IconEntry>> {
    let mut entries = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (None, _, _) => continue,
            (Some(name), Some(codepoint), None) => {
                entries.push(IconEntry::codepoint(make_enum_key(name)?, parse_hex(codepoint)?, None));
            }
            _ => {
                return Err(Error::metadata(format!(
                    "line {}: expected a name and a codepoint",
                    number + 1
                )));
            }
        }
    }

    Ok(entries)
}

/// Metadata file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataFormat {
    FontAwesome,
    IcoMoon,
    Codepoints,
}

impl MetadataFormat {
    /// Guesses the format from a file name.
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name == "selection.json" {
            Some(Self::IcoMoon)
        } else if name.ends_with(".json") {
            Some(Self::FontAwesome)
        } else if name.ends_with(".codepoints") {
            Some(Self::Codepoints)
        } else {
            None
        }
    }
}

/// Reads and converts the metadata file at `path`, with deduplicated names.
///
/// Font Awesome files need a `(license, style)` filter.
pub fn convert_file(path: &Path, filter: Option<(&str, &str)>) -> Result<Vec<IconEntry>> {
    let format = MetadataFormat::detect(path).ok_or_else(|| {
        Error::metadata(format!("unsupported file name \"{}\"", path.display()))
    })?;
    let text = std::fs::read_to_string(path)?;

    let entries = match format {
        MetadataFormat::IcoMoon => convert_icomoon_selection(&text)?,
        MetadataFormat::Codepoints => convert_codepoints(&text)?,
        MetadataFormat::FontAwesome => {
            let (license, style) = filter.ok_or_else(|| {
                Error::metadata("Font Awesome metadata needs a license and a style")
            })?;
            convert_font_awesome(&text, license, style)?
        }
    };

    Ok(deduplicate_icons(entries))
}

// ============================================================================
// Declaration
// ============================================================================

/// Font metadata for a generated declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub enum_name: String,
    pub tag: u32,
    pub font_name: String,
    pub family: String,
    /// Font file relative to the resource directory. `None` declares a
    /// system font.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// Renders an `icon_font!` invocation for `icons`.
///
/// Codepoints already used by an earlier entry become aliases of that
/// entry, since enum discriminants must be unique.
pub fn render_declaration(declaration: &Declaration, icons: &[IconEntry]) -> Result<String> {
    let mut symbols = Vec::new();
    let mut aliases = Vec::new();
    let mut keys_by_codepoint: HashMap<u32, &str> = HashMap::new();

    for icon in icons {
        match &icon.value {
            Some(IconValue::Codepoint(codepoint)) => match keys_by_codepoint.get(codepoint) {
                Some(&key) => aliases.push((icon.name.as_str(), key.to_owned())),
                None => {
                    keys_by_codepoint.insert(*codepoint, &icon.name);
                    symbols.push((icon, Some(format!("{codepoint:#x},"))));
                }
            },
            Some(IconValue::Alias(target)) => aliases.push((icon.name.as_str(), target.clone())),
            None => symbols.push((icon, None)),
        }
    }

    if keys_by_codepoint.is_empty() {
        return Err(Error::metadata("no supported icons"));
    }

    let mut out = String::new();
    write_declaration(&mut out, declaration, &symbols, &aliases)
        .map_err(|_| Error::metadata("cannot format declaration"))?;
    Ok(out)
}

/// Symbols in declaration order with their formatted codepoint, `None` for
/// unsupported entries.
type SymbolLines<'a> = [(&'a IconEntry, Option<String>)];

fn write_declaration<W: fmt::Write>(
    out: &mut W,
    declaration: &Declaration,
    symbols: &SymbolLines<'_>,
    aliases: &[(&str, String)],
) -> fmt::Result {
    let name_width = symbols.iter().map(|(icon, _)| icon.name.len()).max().unwrap_or(0);
    let value_width = symbols
        .iter()
        .filter_map(|(_, value)| value.as_ref().map(String::len))
        .max()
        .unwrap_or(0);

    writeln!(out, "icon_font! {{")?;
    writeln!(out, "    pub enum {} {{", declaration.enum_name)?;
    writeln!(out, "        tag: {},", declaration.tag)?;
    writeln!(out, "        name: {:?},", declaration.font_name)?;
    writeln!(out, "        family: {:?},", declaration.family)?;
    match &declaration.file {
        Some(file) => writeln!(out, "        source: FontSource::File({file:?}),")?,
        None => writeln!(out, "        source: FontSource::System,")?,
    }
    match &declaration.license {
        Some(license) => writeln!(out, "        license: Some({license:?}),")?,
        None => writeln!(out, "        license: None,")?,
    }

    writeln!(out, "        symbols {{")?;
    for (icon, value) in symbols {
        let name = &icon.name;
        let comment = icon.comment.as_deref().filter(|comment| !comment.is_empty());
        match (value, comment) {
            (Some(value), Some(comment)) => writeln!(
                out,
                "            {name:<name_width$} = {value:<value_width$} // {comment}"
            )?,
            (Some(value), None) => writeln!(out, "            {name:<name_width$} = {value}")?,
            (None, Some(comment)) => writeln!(
                out,
                "            // {name:<name_width$} - <unsupported> {comment}"
            )?,
            (None, None) => writeln!(out, "            // {name:<name_width$} - <unsupported>")?,
        }
    }
    writeln!(out, "        }}")?;

    if !aliases.is_empty() {
        let alias_width = aliases.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        writeln!(out, "        aliases {{")?;
        for (name, target) in aliases {
            writeln!(out, "            {name:<alias_width$} = {target},")?;
        }
        writeln!(out, "        }}")?;
    }

    writeln!(out, "    }}")?;
    writeln!(out, "}}")
}

// ============================================================================
// Tests
// ============================================================================
