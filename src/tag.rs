//! Compact integer identities for fonts and symbols.
//!
//! A [`FontTag`] stores a font index in bits `24..=30`; a [`SymbolTag`]
//! stores the owning font tag in those same bits and a codepoint in the low
//! 24 bits. Both are plain `u32` values, so a symbol can be stored in a model
//! role, written to a settings file or passed across a process boundary and
//! later rebuilt without a live reference to the font registry.
//!
//! ```
//! use fonticons::{FontTag, SymbolTag};
//!
//! const FONT: FontTag = FontTag::make(7);
//! const SYMBOL: SymbolTag = SymbolTag::make(FONT, 0xE710);
//!
//! let raw = SYMBOL.value();
//! let restored = SymbolTag::from_value(raw);
//! assert_eq!(restored.font().index(), 7);
//! assert_eq!(restored.unicode(), 0xE710);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// TagField
// ============================================================================

/// Describes one bit field of a tagged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagField {
    /// Position of the lowest bit of the field.
    pub shift: u32,
    /// Number of bits in the field.
    pub width: u32,
    /// Smallest index accepted by [`TagField::compose`].
    pub minimum: u32,
    /// Largest index accepted by [`TagField::compose`].
    pub maximum: u32,
}

impl TagField {
    /// Bit mask covering this field.
    pub const fn mask(&self) -> u32 {
        ((1u32 << self.width) - 1) << self.shift
    }

    /// Places `index` into this field and merges the bits of `others`.
    ///
    /// Panics if `index` is outside `minimum..=maximum` or if `others`
    /// already occupies bits of this field. Inside a `const` item both
    /// checks turn into compile errors.
    pub const fn compose(&self, index: u32, others: u32) -> u32 {
        assert!(
            index >= self.minimum && index <= self.maximum,
            "tag index out of range"
        );
        assert!(others & self.mask() == 0, "tag fields overlap");
        (index << self.shift) | others
    }

    /// Reads the index stored in this field.
    pub const fn extract(&self, value: u32) -> u32 {
        (value & self.mask()) >> self.shift
    }
}

/// Field holding the font index of [`FontTag`] and [`SymbolTag`].
pub const FONT_FIELD: TagField = TagField {
    shift: 24,
    width: 7,
    minimum: 1,
    maximum: 127,
};

/// Field holding the codepoint of a [`SymbolTag`].
pub const SYMBOL_FIELD: TagField = TagField {
    shift: 0,
    width: 24,
    minimum: 1,
    maximum: 0xFF_FFFF,
};

const _: () = assert!(FONT_FIELD.mask() & SYMBOL_FIELD.mask() == 0);

// ============================================================================
// FontTag
// ============================================================================

/// Compact identity of a registered icon font. `0` is invalid.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontTag(u32);

impl FontTag {
    /// The reserved invalid tag.
    pub const INVALID: Self = Self(0);

    /// Builds the tag for font `index`, which must be in `1..=127`.
    pub const fn make(index: u32) -> Self {
        Self(FONT_FIELD.compose(index, 0))
    }

    /// Rebuilds a tag from its raw value without validation.
    pub const fn from_value(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// The font index stored in this tag.
    pub const fn index(self) -> u32 {
        FONT_FIELD.extract(self.0)
    }

    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for FontTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FontTag({})", self.index())
    }
}

// ============================================================================
// SymbolTag
// ============================================================================

/// Compact identity of one symbol: a [`FontTag`] plus a codepoint.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTag(u32);

impl SymbolTag {
    /// Composes a symbol tag. This is pure bit arithmetic, no lookup.
    pub const fn make(font: FontTag, unicode: u32) -> Self {
        Self(SYMBOL_FIELD.compose(unicode, font.value()))
    }

    /// Rebuilds a tag from its raw value without validation.
    ///
    /// This is the path for integers coming back from serialized UI state.
    pub const fn from_value(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// The owning font.
    pub const fn font(self) -> FontTag {
        FontTag::from_value(self.0 & FONT_FIELD.mask())
    }

    /// The codepoint stored in the low bits.
    pub const fn unicode(self) -> u32 {
        SYMBOL_FIELD.extract(self.0)
    }

    /// A symbol tag is valid exactly when its font tag is valid.
    pub const fn is_valid(self) -> bool {
        self.font().is_valid()
    }
}

impl fmt::Debug for SymbolTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolTag({}, {:#x})", self.font().index(), self.unicode())
    }
}

impl From<SymbolTag> for u32 {
    fn from(tag: SymbolTag) -> Self {
        tag.value()
    }
}

impl From<FontTag> for u32 {
    fn from(tag: FontTag) -> Self {
        tag.value()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_tag_layout() {
        let tag = FontTag::make(1);
        assert_eq!(tag.value(), 0x0100_0000);
        assert_eq!(tag.index(), 1);
        assert!(tag.is_valid());

        let tag = FontTag::make(127);
        assert_eq!(tag.value(), 0x7F00_0000);
        assert_eq!(tag.index(), 127);

        assert!(!FontTag::default().is_valid());
        assert_eq!(FontTag::default(), FontTag::INVALID);
    }

    #[test]
    fn symbol_tag_round_trip() {
        for font_index in [1, 2, 63, 64, 127] {
            for unicode in [1, 0x41, 0xE710, 0xF_FFFD, 0xFF_FFFF] {
                let tag = SymbolTag::make(FontTag::make(font_index), unicode);
                assert_eq!(tag.font().index(), font_index);
                assert_eq!(tag.unicode(), unicode);

                let restored = SymbolTag::from_value(tag.value());
                assert_eq!(restored, tag);
                assert_eq!(restored.font(), FontTag::make(font_index));
            }
        }
    }

    #[test]
    fn symbol_validity_follows_font() {
        let valid = SymbolTag::make(FontTag::make(3), 0x20);
        assert!(valid.is_valid());
        assert_eq!(valid.font().is_valid(), valid.is_valid());

        let orphan = SymbolTag::from_value(0x20);
        assert!(!orphan.is_valid());
        assert_eq!(orphan.font().is_valid(), orphan.is_valid());

        let zero = SymbolTag::default();
        assert!(!zero.is_valid());
        assert_eq!(zero.unicode(), 0);
    }

    #[test]
    fn const_construction() {
        const FONT: FontTag = FontTag::make(42);
        const SYMBOL: SymbolTag = SymbolTag::make(FONT, 0xF0152);
        assert_eq!(SYMBOL.font(), FONT);
        assert_eq!(SYMBOL.unicode(), 0xF0152);
    }

    #[test]
    #[should_panic(expected = "tag index out of range")]
    fn font_index_zero_rejected() {
        let _ = FontTag::make(0);
    }

    #[test]
    #[should_panic(expected = "tag index out of range")]
    fn font_index_too_large_rejected() {
        let _ = FontTag::make(128);
    }

    #[test]
    #[should_panic(expected = "tag index out of range")]
    fn codepoint_too_large_rejected() {
        let _ = SymbolTag::make(FontTag::make(1), 0x100_0000);
    }

    #[test]
    #[should_panic(expected = "tag fields overlap")]
    fn overlapping_fields_rejected() {
        let _ = FONT_FIELD.compose(1, FontTag::make(2).value());
    }

    #[test]
    fn serializes_as_plain_integer() {
        let tag = SymbolTag::make(FontTag::make(2), 0x41);
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, (0x0200_0041u32).to_string());

        let restored: SymbolTag = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, tag);
    }
}
