//! A single glyph of an icon font.

use std::fmt;

use crate::font::{FontHandle, FontInfo};
use crate::tag::{SYMBOL_FIELD, SymbolTag};

/// A glyph identified by its font and codepoint.
///
/// The default symbol is the null symbol. Equality is structural on the font
/// identity and the codepoint.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Symbol {
    font: FontInfo,
    unicode: u32,
}

impl Symbol {
    pub const fn new(font: FontInfo, unicode: u32) -> Self {
        Self { font, unicode }
    }

    /// Rebuilds a symbol from a stored tag. Unknown fonts give the null symbol.
    pub fn from_tag(tag: SymbolTag) -> Self {
        let font = FontInfo::from_tag(tag.font());
        if font.is_null() {
            Self::default()
        } else {
            Self::new(font, tag.unicode())
        }
    }

    pub fn unicode(&self) -> u32 {
        self.unicode
    }

    pub fn font_info(&self) -> FontInfo {
        self.font
    }

    pub fn is_null(&self) -> bool {
        self.font.is_null()
    }

    /// The loaded font, if available.
    pub fn font(&self) -> Option<FontHandle> {
        self.font.font()
    }

    /// Compact identity for storage; see [`SymbolTag`].
    pub fn tag(&self) -> SymbolTag {
        SymbolTag::from_value(self.font.tag().value() | (self.unicode & SYMBOL_FIELD.mask()))
    }

    /// Position of this symbol in the font's symbol table.
    pub fn index(&self) -> Option<usize> {
        self.font.index_of(self.unicode)
    }

    /// The enum key of this symbol, e.g. `"AddFriend"`.
    pub fn key(&self) -> Option<&'static str> {
        self.index().and_then(|index| self.font.key(index))
    }

    /// Like [`Symbol::key`], empty for unknown codepoints.
    pub fn name(&self) -> String {
        self.key().map(str::to_owned).unwrap_or_default()
    }

    pub fn to_char(&self) -> Option<char> {
        char::from_u32(self.unicode)
    }

    /// The text that draws this symbol.
    pub fn text(&self) -> String {
        self.to_char().map(String::from).unwrap_or_default()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(name={:?}, unicode={:#x}, font={:?})",
            self.name(),
            self.unicode,
            self.font
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SymbolEnum;
    use crate::tag::FontTag;
    use crate::testing::{OtherIcons, TestIcons};

    #[test]
    fn null_symbols_are_equal() {
        assert_eq!(Symbol::default(), Symbol::default());
        assert!(Symbol::default().is_null());
        assert_eq!(Symbol::default().tag(), SymbolTag::default());
        assert_eq!(Symbol::default().name(), "");
    }

    #[test]
    fn font_symbols_are_never_null() {
        let symbol = Symbol::from(TestIcons::Add);
        assert!(!symbol.is_null());
        assert_ne!(symbol, Symbol::default());
    }

    #[test]
    fn equality_is_font_and_codepoint() {
        assert_eq!(Symbol::from(TestIcons::Add), TestIcons::Add.symbol());
        assert_ne!(Symbol::from(TestIcons::Add), Symbol::from(TestIcons::Remove));
        // Same codepoint in a different font.
        assert_ne!(Symbol::from(TestIcons::Add), Symbol::from(OtherIcons::Add));
    }

    #[test]
    fn names_and_text() {
        let symbol = Symbol::from(TestIcons::AddFriend);
        assert_eq!(symbol.index(), Some(3));
        assert_eq!(symbol.key(), Some("AddFriend"));
        assert_eq!(symbol.name(), "AddFriend");
        assert_eq!(symbol.to_char(), Some('\u{E8FA}'));
        assert_eq!(symbol.text(), "\u{E8FA}");

        let unknown = Symbol::new(TestIcons::font_info(), 0x41);
        assert_eq!(unknown.index(), None);
        assert_eq!(unknown.name(), "");
    }

    #[test]
    fn tag_round_trip_through_registry() {
        let symbol = Symbol::from(TestIcons::SolidStar);
        let tag = symbol.tag();
        assert!(tag.is_valid());
        assert_eq!(tag.font(), FontTag::make(120));
        assert_eq!(tag.unicode(), 0xE735);

        assert_eq!(Symbol::from_tag(SymbolTag::from_value(tag.value())), symbol);
    }

    #[test]
    fn unknown_tag_gives_null_symbol() {
        let tag = SymbolTag::make(FontTag::make(126), 0x41);
        assert!(Symbol::from_tag(tag).is_null());
    }

    #[test]
    fn debug_output() {
        let symbol = Symbol::from(TestIcons::Add);
        assert_eq!(
            format!("{symbol:?}"),
            "(name=\"Add\", unicode=0xe710, font=(family=\"Test Icons\", type=Application, license=\"\"))"
        );
    }
}
