//! Icon values: a symbol with an optional color and transform.
//!
//! Icons are immutable values built with `|`. Each change replaces exactly
//! one field and keeps the other two:
//!
//! ```
//! use fonticons::{icon_font, Color, FontSource, Icon, Transform};
//!
//! icon_font! {
//!     pub enum Glyphs {
//!         tag: 91,
//!         name: "Glyphs",
//!         family: "Glyphs",
//!         source: FontSource::System,
//!         license: None,
//!         symbols { Star = 0xE735, Heart = 0xEB51 }
//!     }
//! }
//!
//! let red = Color::new(255, 0, 0, 255);
//! let icon = Glyphs::Star | red | Transform::HorizontalFlip;
//! let other = icon.clone() | Glyphs::Heart;
//!
//! assert_eq!(other.color(), Some(red));
//! assert_eq!(other.transform_kind(), Transform::HorizontalFlip);
//!
//! let toggle = Glyphs::Star ^ Glyphs::Heart;
//! assert_eq!(toggle.name(), "Star^Heart");
//! ```

use std::fmt;
use std::ops::{BitOr, BitOrAssign, BitXor};
use std::sync::Arc;

use crate::options::IconState;
use crate::render::{FontIconEngine, IconRenderer};
use crate::symbol::Symbol;
use crate::transform::{IconTransform, Matrix3, Transform};

/// An 8-bit sRGB color with alpha.
pub type Color = ::palette::Srgba<u8>;

// ============================================================================
// Icon
// ============================================================================

/// A symbol with an optional color and a transform.
///
/// Equality compares the three fields. A missing color means "resolve from
/// the palette when drawing".
#[derive(Clone, Default, PartialEq)]
pub struct Icon {
    symbol: Symbol,
    color: Option<Color>,
    transform: IconTransform,
}

impl Icon {
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn from_parts(
        symbol: impl Into<Symbol>,
        color: Option<Color>,
        transform: impl Into<IconTransform>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            color,
            transform: transform.into(),
        }
    }

    /// Copy of this icon with another symbol.
    pub fn with_symbol(&self, symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            ..self.clone()
        }
    }

    /// Copy of this icon with another color.
    pub fn with_color(&self, color: impl Into<Option<Color>>) -> Self {
        Self {
            color: color.into(),
            ..self.clone()
        }
    }

    /// Copy of this icon with a canonical transform.
    pub fn with_transform(&self, kind: Transform) -> Self {
        Self {
            transform: IconTransform::from_kind(kind),
            ..self.clone()
        }
    }

    /// Copy of this icon with a transform matrix, canonicalized.
    pub fn with_matrix(&self, matrix: &Matrix3) -> Self {
        Self {
            transform: IconTransform::from_matrix(matrix),
            ..self.clone()
        }
    }

    /// Like [`Icon::with_matrix`], sharing `matrix` when it is not canonical.
    pub fn with_shared_matrix(&self, matrix: Arc<Matrix3>) -> Self {
        Self {
            transform: IconTransform::from_shared(matrix),
            ..self.clone()
        }
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn transform(&self) -> &IconTransform {
        &self.transform
    }

    pub fn transform_kind(&self) -> Transform {
        self.transform.kind()
    }

    pub fn matrix(&self) -> &Matrix3 {
        self.transform.matrix()
    }

    /// The fields that define this icon, in key order.
    pub fn fields(&self) -> (&Symbol, &Option<Color>, &IconTransform) {
        (&self.symbol, &self.color, &self.transform)
    }

    /// Null if no field is set.
    pub fn is_null(&self) -> bool {
        self.symbol.is_null() && self.color.is_none() && self.transform.is_none()
    }

    /// Name of the symbol.
    pub fn name(&self) -> String {
        self.symbol.name()
    }

    /// Wraps this icon for a host icon abstraction.
    pub fn to_image(&self, renderer: &Arc<IconRenderer>) -> FontIconEngine {
        FontIconEngine::new(ModalIcon::from(self.clone()), renderer.clone())
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(symbol={:?}, color={:?}, transform={:?})",
            self.symbol, self.color, self.transform
        )
    }
}

impl From<Symbol> for Icon {
    fn from(symbol: Symbol) -> Self {
        Self::new(symbol)
    }
}

// ============================================================================
// IconChange
// ============================================================================

/// A change to one field of an [`Icon`], applied with `|` or `|=`.
pub trait IconChange {
    fn apply(self, icon: Icon) -> Icon;
}

impl IconChange for Symbol {
    fn apply(self, mut icon: Icon) -> Icon {
        icon.symbol = self;
        icon
    }
}

impl IconChange for Color {
    fn apply(self, mut icon: Icon) -> Icon {
        icon.color = Some(self);
        icon
    }
}

/// Opaque colors, e.g. `palette::named::RED`.
impl IconChange for ::palette::Srgb<u8> {
    fn apply(self, icon: Icon) -> Icon {
        Color::new(self.red, self.green, self.blue, u8::MAX).apply(icon)
    }
}

/// `None` clears the color.
impl IconChange for Option<Color> {
    fn apply(self, mut icon: Icon) -> Icon {
        icon.color = self;
        icon
    }
}

impl IconChange for Transform {
    fn apply(self, mut icon: Icon) -> Icon {
        icon.transform = IconTransform::from_kind(self);
        icon
    }
}

impl IconChange for Matrix3 {
    fn apply(self, mut icon: Icon) -> Icon {
        icon.transform = IconTransform::from_matrix(&self);
        icon
    }
}

impl IconChange for Arc<Matrix3> {
    fn apply(self, mut icon: Icon) -> Icon {
        icon.transform = IconTransform::from_shared(self);
        icon
    }
}

impl<T: IconChange> BitOr<T> for Icon {
    type Output = Icon;

    fn bitor(self, change: T) -> Icon {
        change.apply(self)
    }
}

impl<T: IconChange> BitOrAssign<T> for Icon {
    fn bitor_assign(&mut self, change: T) {
        *self = change.apply(std::mem::take(self));
    }
}

impl<T: IconChange> BitOr<T> for Symbol {
    type Output = Icon;

    fn bitor(self, change: T) -> Icon {
        change.apply(Icon::new(self))
    }
}

impl<T: Into<Icon>> BitXor<T> for Icon {
    type Output = ModalIcon;

    fn bitxor(self, off: T) -> ModalIcon {
        ModalIcon::new(self, off)
    }
}

impl<T: Into<Icon>> BitXor<T> for Symbol {
    type Output = ModalIcon;

    fn bitxor(self, off: T) -> ModalIcon {
        ModalIcon::new(self, off)
    }
}

// ============================================================================
// ModalIcon
// ============================================================================

/// Two icons selected by an [`IconState`].
#[derive(Clone, Default, PartialEq)]
pub struct ModalIcon {
    pub on: Icon,
    pub off: Icon,
}

impl ModalIcon {
    pub fn new(on: impl Into<Icon>, off: impl Into<Icon>) -> Self {
        Self {
            on: on.into(),
            off: off.into(),
        }
    }

    /// The icon shown in `state`.
    pub fn select(&self, state: IconState) -> &Icon {
        match state {
            IconState::On => &self.on,
            IconState::Off => &self.off,
        }
    }

    pub fn is_null(&self) -> bool {
        self.on.is_null() && self.off.is_null()
    }

    /// The name of the `on` icon, or `on^off` when the two differ.
    pub fn name(&self) -> String {
        if self.on == self.off {
            self.on.name()
        } else {
            format!("{}^{}", self.on.name(), self.off.name())
        }
    }

    /// Wraps this icon for a host icon abstraction.
    pub fn to_image(&self, renderer: &Arc<IconRenderer>) -> FontIconEngine {
        FontIconEngine::new(self.clone(), renderer.clone())
    }
}

impl From<Icon> for ModalIcon {
    fn from(icon: Icon) -> Self {
        Self {
            on: icon.clone(),
            off: icon,
        }
    }
}

impl From<Symbol> for ModalIcon {
    fn from(symbol: Symbol) -> Self {
        Self::from(Icon::new(symbol))
    }
}

impl fmt::Debug for ModalIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.on == self.off {
            write!(f, "{:?}", self.on)
        } else {
            write!(f, "(on={:?}, off={:?})", self.on, self.off)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestIcons;

    const RED: Color = Color::new(255, 0, 0, 255);

    #[test]
    fn null_icon() {
        let icon = Icon::default();
        assert!(icon.is_null());
        assert_eq!(icon, Icon::default());
        assert_eq!(icon.transform_kind(), Transform::None);
        assert_eq!(icon.matrix(), &Matrix3::IDENTITY);

        assert!(!(icon.clone() | RED).is_null());
        assert!(!(icon | Transform::Rotate90).is_null());
    }

    #[test]
    fn preserves_fields_while_changing_one() {
        let mut icon = Icon::from_parts(TestIcons::Add, None, Transform::VerticalFlip);
        assert_eq!(icon.symbol(), Symbol::from(TestIcons::Add));
        assert_eq!(icon.transform_kind(), Transform::VerticalFlip);

        icon |= Transform::HorizontalFlip;
        assert_eq!(icon.symbol(), Symbol::from(TestIcons::Add));
        assert_eq!(icon.color(), None);
        assert_eq!(icon.transform_kind(), Transform::HorizontalFlip);

        icon |= RED;
        assert_eq!(icon.symbol(), Symbol::from(TestIcons::Add));
        assert_eq!(icon.color(), Some(RED));
        assert_eq!(icon.transform_kind(), Transform::HorizontalFlip);

        icon |= TestIcons::Remove;
        assert_eq!(icon.symbol(), Symbol::from(TestIcons::Remove));
        assert_eq!(icon.color(), Some(RED));
        assert_eq!(icon.transform_kind(), Transform::HorizontalFlip);
    }

    #[test]
    fn modifying_constructors() {
        let base = TestIcons::Add | RED | Transform::Rotate90;

        let moved = base.with_symbol(TestIcons::SolidStar);
        assert_eq!(moved.color(), Some(RED));
        assert_eq!(moved.transform_kind(), Transform::Rotate90);

        let uncolored = base.with_color(None);
        assert_eq!(uncolored.color(), None);
        assert_eq!(uncolored.symbol(), base.symbol());

        let tilted = base.with_matrix(&Matrix3::IDENTITY.rotate(30.0));
        assert_eq!(tilted.transform_kind(), Transform::Matrix);
        assert_eq!(tilted.color(), Some(RED));

        let flipped = base.with_matrix(&Matrix3::from_scale(-1.0, 1.0));
        assert_eq!(flipped.transform_kind(), Transform::HorizontalFlip);
        assert_eq!(flipped, base.with_transform(Transform::HorizontalFlip));
    }

    #[test]
    fn shared_matrices_alias() {
        let matrix = Arc::new(Matrix3::IDENTITY.rotate(45.0));
        let a = Icon::new(TestIcons::Add) | matrix.clone();
        let b = a.with_color(RED);

        match (a.transform(), b.transform()) {
            (IconTransform::Matrix(lhs), IconTransform::Matrix(rhs)) => {
                assert!(Arc::ptr_eq(lhs, &matrix));
                assert!(Arc::ptr_eq(rhs, &matrix));
            }
            other => panic!("expected shared matrices, got {other:?}"),
        }
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(TestIcons::Add | RED, TestIcons::Add | RED);
        assert_ne!(TestIcons::Add | RED, Icon::new(TestIcons::Add));
        assert_ne!(
            TestIcons::Add | Transform::Rotate90,
            TestIcons::Add | Transform::Rotate270
        );
        assert_eq!(
            TestIcons::Add | Matrix3::IDENTITY.rotate(90.0),
            TestIcons::Add | Transform::Rotate90
        );
        assert_eq!(
            Icon::new(TestIcons::Add) | ::palette::named::RED,
            Icon::new(TestIcons::Add) | RED
        );
    }

    #[test]
    fn modal_icons() {
        let toggle = TestIcons::Add ^ TestIcons::Remove;
        assert_eq!(toggle.select(IconState::On).symbol(), Symbol::from(TestIcons::Add));
        assert_eq!(toggle.select(IconState::Off).symbol(), Symbol::from(TestIcons::Remove));
        assert_eq!(toggle.name(), "Add^Remove");
        assert!(!toggle.is_null());

        let single = ModalIcon::from(Icon::new(TestIcons::Add));
        assert_eq!(single.name(), "Add");
        assert_eq!(single.on, single.off);

        let colored = (TestIcons::Add | RED) ^ TestIcons::Add;
        assert_eq!(colored.off.color(), None);

        assert!(ModalIcon::default().is_null());
    }

    #[test]
    fn debug_output() {
        let icon = TestIcons::Add | Transform::Rotate90;
        let text = format!("{icon:?}");
        assert!(text.starts_with("(symbol=(name=\"Add\""));
        assert!(text.ends_with("color=None, transform=Rotate90)"));
    }
}
