//! Content keys for rendered pixmaps.
//!
//! A key is a string built by encoding every field that influences a
//! rendered pixmap. Each field kind has one encoding:
//!
//! | Kind | Encoding |
//! |---|---|
//! | unsigned integers, enum ordinals | base 36, lowercase |
//! | signed integers | base 36 with a leading `-` when negative |
//! | floats | shortest round-trip decimal (`-0` written as `0`) |
//! | colors | packed `0xAARRGGBB` in base 36 |
//! | absent values | `-` |
//! | composites | `(` members joined by `/` `)` |
//!
//! Fonts are keyed by tag and by the identity of their declaring enum, so
//! keys are only meaningful within one process.
//!
//! No leaf encoding contains `/`, `(` or `)`, so composites stay
//! unambiguous, and `-` on its own never encodes a value.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use crate::font::{FontInfo, FontType};
use crate::icon::{Color, Icon, ModalIcon};
use crate::options::{IconMode, IconState};
use crate::palette::{ColorGroup, ColorRole};
use crate::symbol::Symbol;
use crate::transform::{IconTransform, Matrix3, Transform};

const ABSENT: char = '-';
const OPEN: char = '(';
const SEPARATOR: char = '/';
const CLOSE: char = ')';

// ============================================================================
// CacheKey
// ============================================================================

/// An encoded pixmap key. The empty key means "do not cache".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Encodes any key field.
    pub fn of<T: KeyField + ?Sized>(field: &T) -> Self {
        let mut out = String::new();
        field.write_key(&mut out);
        Self(out)
    }

    /// Key of an icon's defining fields; empty for null icons.
    pub fn for_icon(icon: &ModalIcon) -> Self {
        if icon.is_null() {
            Self::default()
        } else {
            Self::of(icon)
        }
    }

    /// Key of a pixmap of `icon` at `size` device pixels; empty for null icons.
    pub fn for_pixmap(icon: &ModalIcon, mode: IconMode, state: IconState, size: u32) -> Self {
        if icon.is_null() {
            Self::default()
        } else {
            Self::of(&(icon, mode, state, size))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// KeyField
// ============================================================================

/// A value that can be part of a [`CacheKey`].
pub trait KeyField {
    fn write_key(&self, out: &mut String);
}

fn write_base36(out: &mut String, mut value: u64) {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut buffer = [0u8; 13];
    let mut start = buffer.len();
    loop {
        start -= 1;
        buffer[start] = DIGITS[(value % 36) as usize];
        value /= 36;
        if value == 0 {
            break;
        }
    }

    for &digit in &buffer[start..] {
        out.push(digit as char);
    }
}

fn write_signed36(out: &mut String, value: i64) {
    if value < 0 {
        out.push('-');
    }
    write_base36(out, value.unsigned_abs());
}

/// Writes the members of a composite key field.
struct Composite<'a> {
    out: &'a mut String,
    empty: bool,
}

impl<'a> Composite<'a> {
    fn begin(out: &'a mut String) -> Self {
        out.push(OPEN);
        Self { out, empty: true }
    }

    fn field<T: KeyField + ?Sized>(&mut self, value: &T) -> &mut Self {
        if !self.empty {
            self.out.push(SEPARATOR);
        }
        self.empty = false;
        value.write_key(self.out);
        self
    }

    fn end(self) {
        self.out.push(CLOSE);
    }
}

macro_rules! unsigned_key {
    ($($ty:ty),*) => {
        $(impl KeyField for $ty {
            fn write_key(&self, out: &mut String) {
                write_base36(out, *self as u64);
            }
        })*
    };
}

macro_rules! signed_key {
    ($($ty:ty),*) => {
        $(impl KeyField for $ty {
            fn write_key(&self, out: &mut String) {
                write_signed36(out, *self as i64);
            }
        })*
    };
}

macro_rules! float_key {
    ($($ty:ty),*) => {
        $(impl KeyField for $ty {
            fn write_key(&self, out: &mut String) {
                let value = if *self == 0.0 { 0.0 } else { *self };
                let _ = write!(out, "{value}");
            }
        })*
    };
}

macro_rules! ordinal_key {
    ($($ty:ty),*) => {
        $(impl KeyField for $ty {
            fn write_key(&self, out: &mut String) {
                write_base36(out, *self as u64);
            }
        })*
    };
}

macro_rules! tuple_key {
    ($($name:ident),+) => {
        impl<$($name: KeyField),+> KeyField for ($($name,)+) {
            #[allow(non_snake_case)]
            fn write_key(&self, out: &mut String) {
                let ($($name,)+) = self;
                let mut composite = Composite::begin(out);
                $( composite.field($name); )+
                composite.end();
            }
        }
    };
}

unsigned_key!(u8, u16, u32, u64, usize);
signed_key!(i8, i16, i32, i64, isize);
float_key!(f32, f64);
ordinal_key!(IconMode, IconState, Transform, ColorGroup, ColorRole, FontType);

tuple_key!(A);
tuple_key!(A, B);
tuple_key!(A, B, C);
tuple_key!(A, B, C, D);
tuple_key!(A, B, C, D, E);
tuple_key!(A, B, C, D, E, F);

impl KeyField for bool {
    fn write_key(&self, out: &mut String) {
        out.push(if *self { '1' } else { '0' });
    }
}

impl KeyField for char {
    fn write_key(&self, out: &mut String) {
        write_base36(out, *self as u64);
    }
}

impl<T: KeyField + ?Sized> KeyField for &T {
    fn write_key(&self, out: &mut String) {
        (**self).write_key(out);
    }
}

impl<T: KeyField + ?Sized> KeyField for Arc<T> {
    fn write_key(&self, out: &mut String) {
        (**self).write_key(out);
    }
}

impl<T: KeyField> KeyField for Option<T> {
    fn write_key(&self, out: &mut String) {
        match self {
            Some(value) => value.write_key(out),
            None => out.push(ABSENT),
        }
    }
}

impl<T: KeyField> KeyField for [T] {
    fn write_key(&self, out: &mut String) {
        let mut composite = Composite::begin(out);
        for value in self {
            composite.field(value);
        }
        composite.end();
    }
}

impl KeyField for Color {
    fn write_key(&self, out: &mut String) {
        let argb = u32::from_be_bytes([self.alpha, self.red, self.green, self.blue]);
        write_base36(out, argb as u64);
    }
}

impl KeyField for FontInfo {
    fn write_key(&self, out: &mut String) {
        if self.is_null() {
            out.push(ABSENT);
        } else {
            (self.tag().value(), self.identity()).write_key(out);
        }
    }
}

impl KeyField for Symbol {
    fn write_key(&self, out: &mut String) {
        (self.font_info(), self.unicode()).write_key(out);
    }
}

impl KeyField for Matrix3 {
    fn write_key(&self, out: &mut String) {
        self.coefficients()[..].write_key(out);
    }
}

impl KeyField for IconTransform {
    fn write_key(&self, out: &mut String) {
        match self {
            Self::Matrix(matrix) => matrix.write_key(out),
            _ if self.is_none() => out.push(ABSENT),
            _ => self.kind().write_key(out),
        }
    }
}

impl KeyField for Icon {
    fn write_key(&self, out: &mut String) {
        self.fields().write_key(out);
    }
}

impl KeyField for ModalIcon {
    fn write_key(&self, out: &mut String) {
        (&self.on, &self.off).write_key(out);
    }
}

// ============================================================================
// Tests
// ============================================================================
