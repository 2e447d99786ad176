//! Icon font declarations and metadata.
//!
//! Every icon font is described by a Rust enum whose discriminants are the
//! codepoints of its symbols. The [`icon_font!`](crate::icon_font) macro
//! declares such an enum together with its [`FontDescriptor`], which makes
//! the enum a [`SymbolEnum`]. The enum type itself is the identity of the
//! font: two [`FontInfo`] values are equal exactly when they were created
//! from the same enum type.
//!
//! Font data is built lazily on first access and lives for the rest of the
//! process. The first call to [`FontInfo::of`] also registers the font in the
//! process-wide [`FontRegistry`](registry::FontRegistry), so that a
//! [`FontTag`] read back from storage can be turned into a font again.

pub mod loader;
pub mod registry;

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Once, OnceLock};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::symbol::Symbol;
use crate::tag::FontTag;

pub use loader::{FaceBlob, FontHandle};
pub use registry::{FontCatalog, FontRegistry};

// ============================================================================
// Font Description
// ============================================================================

/// How a font is made available to the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontType {
    /// Null or unusable font.
    #[default]
    Invalid,
    /// Font shipped with the application and loaded from a file or memory.
    Application,
    /// Font installed on the system and looked up by family name.
    System,
}

/// Where the font data of an icon font comes from.
#[derive(Clone, Copy)]
pub enum FontSource {
    /// Installed font, looked up by [`FontDescriptor::family`].
    System,
    /// Font file, relative names resolved against [`Config::resource_dir`].
    File(&'static str),
    /// Font data compiled into the binary.
    Embedded(&'static [u8]),
    /// Caller-provided loader.
    Loader(fn() -> Option<FontHandle>),
}

impl FontSource {
    /// The font type implied by this source.
    pub const fn font_type(&self) -> FontType {
        match self {
            Self::System => FontType::System,
            Self::File(_) | Self::Embedded(_) | Self::Loader(_) => FontType::Application,
        }
    }
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => f.write_str("System"),
            Self::File(name) => f.debug_tuple("File").field(name).finish(),
            Self::Embedded(data) => write!(f, "Embedded({} bytes)", data.len()),
            Self::Loader(_) => f.write_str("Loader"),
        }
    }
}

/// Static metadata of one icon font.
#[derive(Debug, Clone, Copy)]
pub struct FontDescriptor {
    /// Compact identity, see [`FontTag::make`].
    pub tag: FontTag,
    /// Human readable font name, used for sorting and diagnostics.
    pub name: &'static str,
    /// Font family name.
    pub family: &'static str,
    pub source: FontSource,
    /// License file name, resolved like [`FontSource::File`].
    pub license: Option<&'static str>,
}

/// A symbol enumeration of one icon font.
///
/// Implemented by [`icon_font!`](crate::icon_font); implementing it by hand
/// is possible but the macro keeps the symbol table and the enum in sync.
pub trait SymbolEnum: Copy + Send + Sync + 'static {
    /// Metadata of the font this enum belongs to.
    const DESCRIPTOR: FontDescriptor;

    /// Symbol names and codepoints in declaration order.
    const SYMBOLS: &'static [(&'static str, u32)];

    /// The codepoint of this symbol.
    fn unicode(self) -> u32;

    #[doc(hidden)]
    fn font_data() -> &'static FontData;

    /// The font this enum belongs to.
    fn font_info() -> FontInfo {
        FontInfo::of::<Self>()
    }

    /// This value as a [`Symbol`].
    fn symbol(self) -> Symbol {
        Symbol::new(Self::font_info(), self.unicode())
    }
}

// ============================================================================
// FontData
// ============================================================================

/// Process-lifetime state of one font. Built once per [`SymbolEnum`] type.
#[doc(hidden)]
pub struct FontData {
    type_id: TypeId,
    type_name: &'static str,
    descriptor: FontDescriptor,
    symbols: &'static [(&'static str, u32)],
    registered: Once,
    handle: OnceLock<Option<FontHandle>>,
    reverse_index: OnceLock<HashMap<u32, usize>>,
    license_text: OnceLock<String>,
}

impl FontData {
    pub fn new<S: SymbolEnum>() -> Self {
        let type_name = std::any::type_name::<S>();
        let type_name = type_name.rsplit("::").next().unwrap_or(type_name);

        Self {
            type_id: TypeId::of::<S>(),
            type_name,
            descriptor: S::DESCRIPTOR,
            symbols: S::SYMBOLS,
            registered: Once::new(),
            handle: OnceLock::new(),
            reverse_index: OnceLock::new(),
            license_text: OnceLock::new(),
        }
    }

    fn reverse_index(&self) -> &HashMap<u32, usize> {
        self.reverse_index.get_or_init(|| {
            let mut index = HashMap::with_capacity(self.symbols.len());
            for (i, &(_, unicode)) in self.symbols.iter().enumerate() {
                index.entry(unicode).or_insert(i);
            }
            index
        })
    }
}

// ============================================================================
// FontInfo
// ============================================================================

/// Handle to the metadata of one icon font, or the null font.
///
/// Cheap to copy. Equality compares the identity of the declaring enum type.
#[derive(Clone, Copy, Default)]
pub struct FontInfo {
    d: Option<&'static FontData>,
}

impl FontInfo {
    /// The null font.
    pub const fn null() -> Self {
        Self { d: None }
    }

    /// The font declared by `S`, registering it on first use.
    pub fn of<S: SymbolEnum>() -> Self {
        let data = S::font_data();
        let info = Self { d: Some(data) };
        debug_assert!(info.is_valid(), "{} declares an invalid font", data.type_name);

        data.registered.call_once(|| {
            FontRegistry::global().register_font(info);
        });

        info
    }

    /// Same as [`FontInfo::of`] without touching the global registry.
    #[cfg(test)]
    pub(crate) fn detached<S: SymbolEnum>() -> Self {
        Self {
            d: Some(S::font_data()),
        }
    }

    /// Looks up a registered font by tag. Returns the null font if unknown.
    pub fn from_tag(tag: FontTag) -> Self {
        FontRegistry::global().from_tag(tag)
    }

    /// All registered fonts, ordered by font name and then by tag.
    pub fn known_fonts() -> Vec<FontInfo> {
        FontRegistry::global().known_fonts()
    }

    /// Registers `font` in the global registry. See [`FontCatalog::register_font`].
    pub fn register_font(font: FontInfo) -> bool {
        FontRegistry::global().register_font(font)
    }

    pub fn is_null(&self) -> bool {
        self.d.is_none()
    }

    /// Non-null and carrying a valid tag.
    pub fn is_valid(&self) -> bool {
        self.d.is_some_and(|d| d.descriptor.tag.is_valid())
    }

    /// Whether the font data can actually be loaded.
    pub fn is_available(&self) -> bool {
        match self.font_type() {
            FontType::Invalid => false,
            FontType::Application | FontType::System => self.font().is_some(),
        }
    }

    pub fn font_type(&self) -> FontType {
        match self.d {
            Some(d) if d.descriptor.tag.is_valid() => d.descriptor.source.font_type(),
            _ => FontType::Invalid,
        }
    }

    /// Process-local identity of the declaring enum type; 0 for the null font.
    pub(crate) fn identity(&self) -> usize {
        self.d.map_or(0, |d| std::ptr::from_ref(d) as usize)
    }

    pub fn tag(&self) -> FontTag {
        self.d.map(|d| d.descriptor.tag).unwrap_or_default()
    }

    /// Name of the declaring enum type.
    pub fn type_name(&self) -> &'static str {
        self.d.map(|d| d.type_name).unwrap_or_default()
    }

    pub fn font_name(&self) -> &'static str {
        self.d.map(|d| d.descriptor.name).unwrap_or_default()
    }

    pub fn font_family(&self) -> &'static str {
        self.d.map(|d| d.descriptor.family).unwrap_or_default()
    }

    pub fn source(&self) -> Option<FontSource> {
        self.d.map(|d| d.descriptor.source)
    }

    pub fn license_file_name(&self) -> Option<&'static str> {
        self.d.and_then(|d| d.descriptor.license)
    }

    /// The license text, read once on first access. Empty if unavailable.
    pub fn license_text(&self) -> &str {
        let Some(d) = self.d else {
            return "";
        };

        d.license_text.get_or_init(|| match d.descriptor.license {
            Some(file_name) => loader::read_text(&Config::current().resolve(file_name)),
            None => String::new(),
        })
    }

    /// The loaded font, or `None` if it cannot be loaded.
    ///
    /// Loading happens once; failures are logged once and remembered.
    pub fn font(&self) -> Option<FontHandle> {
        let d = self.d?;
        d.handle
            .get_or_init(|| loader::load(d.type_name, &d.descriptor))
            .clone()
    }

    pub fn symbol_count(&self) -> usize {
        self.d.map_or(0, |d| d.symbols.len())
    }

    /// The symbol at `index` in declaration order, or the null symbol.
    pub fn symbol(&self, index: usize) -> Symbol {
        match self.unicode(index) {
            Some(unicode) => Symbol::new(*self, unicode),
            None => Symbol::default(),
        }
    }

    /// All symbols in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.symbol_count()).map(|index| self.symbol(index))
    }

    /// Index of the first symbol with codepoint `unicode`.
    pub fn index_of(&self, unicode: u32) -> Option<usize> {
        self.d?.reverse_index().get(&unicode).copied()
    }

    pub fn unicode(&self, index: usize) -> Option<u32> {
        self.d?.symbols.get(index).map(|&(_, unicode)| unicode)
    }

    /// Enum key of the symbol at `index`.
    pub fn key(&self, index: usize) -> Option<&'static str> {
        self.d?.symbols.get(index).map(|&(key, _)| key)
    }

    pub fn name(&self, index: usize) -> String {
        self.key(index).map(str::to_owned).unwrap_or_default()
    }
}

impl PartialEq for FontInfo {
    fn eq(&self, other: &Self) -> bool {
        match (self.d, other.d) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => std::ptr::eq(lhs, rhs) || lhs.type_id == rhs.type_id,
            _ => false,
        }
    }
}

impl Eq for FontInfo {}

impl Hash for FontInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.d.map(|d| d.type_id).hash(state);
    }
}

impl fmt::Debug for FontInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(
                f,
                "(family={:?}, type={:?}, license={:?})",
                self.font_family(),
                self.font_type(),
                self.license_file_name().unwrap_or_default()
            )
        } else {
            f.write_str("(invalid font)")
        }
    }
}

// ============================================================================
// Declaration Macro
// ============================================================================

/// Declares an icon font as a symbol enum.
///
/// ```
/// use fonticons::{icon_font, FontSource, SymbolEnum};
///
/// icon_font! {
///     /// Glyphs of the "Acme Icons" font.
///     pub enum AcmeIcons {
///         tag: 90,
///         name: "Acme Icons",
///         family: "Acme Icons",
///         source: FontSource::File("fonts/AcmeIcons.ttf"),
///         license: Some("fonts/AcmeIcons-LICENSE.txt"),
///         symbols {
///             Add = 0xE710,
///             Delete = 0xE74D,
///         }
///         aliases {
///             Plus = Add,
///         }
///     }
/// }
///
/// assert_eq!(AcmeIcons::Plus, AcmeIcons::Add);
/// assert_eq!(AcmeIcons::Delete.unicode(), 0xE74D);
/// assert_eq!(AcmeIcons::font_info().name(1), "Delete");
/// ```
#[macro_export]
macro_rules! icon_font {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            tag: $tag:expr,
            name: $font_name:expr,
            family: $family:expr,
            source: $source:expr,
            license: $license:expr,
            symbols {
                $( $(#[$symbol_meta:meta])* $key:ident = $code:expr ),* $(,)?
            }
            $( aliases {
                $( $alias:ident = $target:ident ),* $(,)?
            } )?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        $vis enum $name {
            $( $(#[$symbol_meta])* $key = $code, )*
        }

        #[allow(non_upper_case_globals)]
        impl $name {
            $($( pub const $alias: Self = Self::$target; )*)?
        }

        impl $crate::SymbolEnum for $name {
            const DESCRIPTOR: $crate::FontDescriptor = $crate::FontDescriptor {
                tag: $crate::FontTag::make($tag),
                name: $font_name,
                family: $family,
                source: $source,
                license: $license,
            };

            const SYMBOLS: &'static [(&'static str, u32)] = &[
                $( (stringify!($key), $name::$key as u32), )*
            ];

            fn unicode(self) -> u32 {
                self as u32
            }

            fn font_data() -> &'static $crate::font::FontData {
                static DATA: ::std::sync::OnceLock<$crate::font::FontData> =
                    ::std::sync::OnceLock::new();
                DATA.get_or_init($crate::font::FontData::new::<$name>)
            }
        }

        impl ::std::convert::From<$name> for $crate::Symbol {
            fn from(symbol: $name) -> Self {
                $crate::SymbolEnum::symbol(symbol)
            }
        }

        impl ::std::convert::From<$name> for $crate::Icon {
            fn from(symbol: $name) -> Self {
                $crate::Icon::new(symbol)
            }
        }

        impl ::std::convert::From<$name> for $crate::ModalIcon {
            fn from(symbol: $name) -> Self {
                $crate::ModalIcon::from($crate::Icon::new(symbol))
            }
        }

        impl $crate::IconChange for $name {
            fn apply(self, icon: $crate::Icon) -> $crate::Icon {
                $crate::IconChange::apply($crate::SymbolEnum::symbol(self), icon)
            }
        }

        impl<T: $crate::IconChange> ::std::ops::BitOr<T> for $name {
            type Output = $crate::Icon;

            fn bitor(self, change: T) -> $crate::Icon {
                $crate::Icon::new(self) | change
            }
        }

        impl<T: ::std::convert::Into<$crate::Icon>> ::std::ops::BitXor<T> for $name {
            type Output = $crate::ModalIcon;

            fn bitxor(self, off: T) -> $crate::ModalIcon {
                $crate::ModalIcon::new(self, off)
            }
        }
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MissingIcons, OtherIcons, TestIcons};

    #[test]
    fn null_font() {
        let font = FontInfo::null();
        assert!(font.is_null());
        assert!(!font.is_valid());
        assert!(!font.is_available());
        assert_eq!(font.font_type(), FontType::Invalid);
        assert_eq!(font.tag(), FontTag::INVALID);
        assert_eq!(font.symbol_count(), 0);
        assert_eq!(font.index_of(0xE710), None);
        assert!(font.symbol(0).is_null());
        assert!(font.font().is_none());
        assert_eq!(font.license_text(), "");
        assert_eq!(format!("{font:?}"), "(invalid font)");
        assert_eq!(font, FontInfo::default());
    }

    #[test]
    fn declared_font_metadata() {
        let font = TestIcons::font_info();
        assert!(!font.is_null());
        assert!(font.is_valid());
        assert_eq!(font.tag(), FontTag::make(120));
        assert_eq!(font.font_type(), FontType::Application);
        assert_eq!(font.type_name(), "TestIcons");
        assert_eq!(font.font_name(), "Test Icons");
        assert_eq!(font.font_family(), "Test Icons");
        assert_eq!(font.symbol_count(), TestIcons::SYMBOLS.len());
    }

    #[test]
    fn identity_is_the_enum_type() {
        assert_eq!(TestIcons::font_info(), FontInfo::of::<TestIcons>());
        assert_ne!(TestIcons::font_info(), OtherIcons::font_info());
        assert_ne!(TestIcons::font_info(), FontInfo::null());

        assert_eq!(TestIcons::font_info().identity(), FontInfo::of::<TestIcons>().identity());
        assert_ne!(TestIcons::font_info().identity(), OtherIcons::font_info().identity());
        assert_eq!(FontInfo::null().identity(), 0);
    }

    #[test]
    fn symbol_table_lookups() {
        let font = TestIcons::font_info();

        assert_eq!(font.key(0), Some("Add"));
        assert_eq!(font.unicode(0), Some(0xE710));
        assert_eq!(font.name(1), "Remove");
        assert_eq!(font.index_of(0xE738), Some(1));
        assert_eq!(font.index_of(0x41), None);
        assert_eq!(font.key(999), None);
        assert_eq!(font.name(999), "");

        let names: Vec<_> = font.symbols().map(|symbol| symbol.name()).collect();
        assert_eq!(names, ["Add", "Remove", "SolidStar", "AddFriend"]);
    }

    #[test]
    fn aliases_share_codepoints() {
        assert_eq!(TestIcons::Plus, TestIcons::Add);
        assert_eq!(TestIcons::Plus.unicode(), 0xE710);
        assert_eq!(TestIcons::font_info().index_of(TestIcons::Plus.unicode()), Some(0));
    }

    #[test]
    fn reverse_index_is_built_once() {
        let data = TestIcons::font_data();
        let first = data.reverse_index() as *const _;
        let second = data.reverse_index() as *const _;
        assert_eq!(first, second);
    }

    #[test]
    fn loader_backed_font_is_available() {
        let font = TestIcons::font_info();
        assert!(font.is_available());

        let handle = font.font().unwrap();
        assert_eq!(handle.family(), "Test Icons");
        assert!(handle.same_font(&font.font().unwrap()));
    }

    #[test]
    fn missing_font_degrades() {
        let font = MissingIcons::font_info();
        assert!(font.is_valid());
        assert_eq!(font.font_type(), FontType::Application);
        assert!(!font.is_available());
        assert!(font.font().is_none());
        assert_eq!(font.license_text(), "");
        assert_eq!(font.license_file_name(), Some("does/not/exist-LICENSE.txt"));
    }

    #[test]
    fn debug_output() {
        let font = TestIcons::font_info();
        assert_eq!(
            format!("{font:?}"),
            "(family=\"Test Icons\", type=Application, license=\"\")"
        );
    }
}
