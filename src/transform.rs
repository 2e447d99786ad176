//! Geometric transforms of icons.
//!
//! [`Matrix3`] is a projective 3×3 matrix applied to row vectors
//! (`p' = p · M`), so `a * b` applies `a` first. Icons do not store matrices
//! directly: [`IconTransform::from_matrix`] recognises the flips and quarter
//! turns that make up almost all real uses and stores those as a
//! [`Transform`] tag backed by a shared static matrix. Everything else is
//! kept as a reference-counted matrix.
//!
//! ```
//! use fonticons::{IconTransform, Matrix3, Transform};
//!
//! let turned = IconTransform::from_matrix(&Matrix3::IDENTITY.rotate(90.0));
//! assert_eq!(turned.kind(), Transform::Rotate90);
//!
//! let tilted = IconTransform::from_matrix(&Matrix3::IDENTITY.rotate(22.5));
//! assert_eq!(tilted.kind(), Transform::Matrix);
//! ```

use std::fmt;
use std::ops::Mul;
use std::sync::Arc;

use resvg::tiny_skia;
use serde::{Deserialize, Serialize};

use crate::pixmap::RectF;

/// Distance of the projection plane used by [`Matrix3::rotate_about`].
const INV_DIST_TO_PLANE: f64 = 1.0 / 1024.0;

fn fuzzy_is_null(value: f64) -> bool {
    value.abs() <= 1e-12
}

// ============================================================================
// Matrix3
// ============================================================================

/// Classification of a matrix by the most complex operation it performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatrixKind {
    None,
    Translate,
    Scale,
    Rotate,
    Shear,
    Project,
}

/// Rotation axis for [`Matrix3::rotate_about`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A 3×3 transform matrix. `m31`/`m32` hold the translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Matrix3 {
    pub m11: f64,
    pub m12: f64,
    pub m13: f64,
    pub m21: f64,
    pub m22: f64,
    pub m23: f64,
    pub m31: f64,
    pub m32: f64,
    pub m33: f64,
}

impl Matrix3 {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);

    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m11: f64,
        m12: f64,
        m13: f64,
        m21: f64,
        m22: f64,
        m23: f64,
        m31: f64,
        m32: f64,
        m33: f64,
    ) -> Self {
        Self {
            m11,
            m12,
            m13,
            m21,
            m22,
            m23,
            m31,
            m32,
            m33,
        }
    }

    /// An affine matrix from its six 2D coefficients.
    pub const fn from_affine(m11: f64, m12: f64, m21: f64, m22: f64, dx: f64, dy: f64) -> Self {
        Self::new(m11, m12, 0.0, m21, m22, 0.0, dx, dy, 1.0)
    }

    pub const fn from_scale(sx: f64, sy: f64) -> Self {
        Self::from_affine(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    pub const fn from_translate(dx: f64, dy: f64) -> Self {
        Self::from_affine(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    /// The coefficients in row order.
    pub const fn coefficients(&self) -> [f64; 9] {
        [
            self.m11, self.m12, self.m13, self.m21, self.m22, self.m23, self.m31, self.m32,
            self.m33,
        ]
    }

    /// Prepends a rotation about the Z axis by `degrees`.
    pub fn rotate(self, degrees: f64) -> Self {
        self.rotate_about(degrees, Axis::Z)
    }

    /// Prepends a rotation by `degrees`.
    ///
    /// Multiples of 90° produce exact coefficients. X and Y rotations are
    /// perspective projections and always produce [`MatrixKind::Project`].
    pub fn rotate_about(self, degrees: f64, axis: Axis) -> Self {
        let (sin, cos) = exact_sin_cos(degrees);

        let rotation = match axis {
            Axis::Z => Self::from_affine(cos, sin, -sin, cos, 0.0, 0.0),
            Axis::Y => Self {
                m11: cos,
                m13: -sin * INV_DIST_TO_PLANE,
                ..Self::IDENTITY
            },
            Axis::X => Self {
                m22: cos,
                m23: -sin * INV_DIST_TO_PLANE,
                ..Self::IDENTITY
            },
        };

        rotation * self
    }

    /// Prepends a scale.
    pub fn scale(self, sx: f64, sy: f64) -> Self {
        Self::from_scale(sx, sy) * self
    }

    /// Prepends a translation.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::from_translate(dx, dy) * self
    }

    pub fn is_identity(&self) -> bool {
        self.kind() == MatrixKind::None
    }

    pub fn kind(&self) -> MatrixKind {
        if !fuzzy_is_null(self.m13) || !fuzzy_is_null(self.m23) || !fuzzy_is_null(self.m33 - 1.0) {
            MatrixKind::Project
        } else if !fuzzy_is_null(self.m12) || !fuzzy_is_null(self.m21) {
            let dot = self.m11 * self.m21 + self.m12 * self.m22;
            if fuzzy_is_null(dot) {
                MatrixKind::Rotate
            } else {
                MatrixKind::Shear
            }
        } else if !fuzzy_is_null(self.m11 - 1.0) || !fuzzy_is_null(self.m22 - 1.0) {
            MatrixKind::Scale
        } else if !fuzzy_is_null(self.m31) || !fuzzy_is_null(self.m32) {
            MatrixKind::Translate
        } else {
            MatrixKind::None
        }
    }

    /// Maps a point, dividing by the projective weight when there is one.
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        let mx = self.m11 * x + self.m21 * y + self.m31;
        let my = self.m12 * x + self.m22 * y + self.m32;
        let w = self.m13 * x + self.m23 * y + self.m33;

        if fuzzy_is_null(w - 1.0) || fuzzy_is_null(w) {
            (mx, my)
        } else {
            (mx / w, my / w)
        }
    }

    /// The affine part as a tiny-skia transform. Projective terms are dropped.
    pub fn to_skia(&self) -> tiny_skia::Transform {
        tiny_skia::Transform::from_row(
            self.m11 as f32,
            self.m12 as f32,
            self.m21 as f32,
            self.m22 as f32,
            self.m31 as f32,
            self.m32 as f32,
        )
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Matrix3) -> Matrix3 {
        let a = [
            [self.m11, self.m12, self.m13],
            [self.m21, self.m22, self.m23],
            [self.m31, self.m32, self.m33],
        ];
        let b = [
            [rhs.m11, rhs.m12, rhs.m13],
            [rhs.m21, rhs.m22, rhs.m23],
            [rhs.m31, rhs.m32, rhs.m33],
        ];

        let at = |i: usize, j: usize| a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];

        Matrix3::new(
            at(0, 0),
            at(0, 1),
            at(0, 2),
            at(1, 0),
            at(1, 1),
            at(1, 2),
            at(2, 0),
            at(2, 1),
            at(2, 2),
        )
    }
}

fn exact_sin_cos(degrees: f64) -> (f64, f64) {
    let normalized = degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        (0.0, 1.0)
    } else if normalized == 90.0 {
        (1.0, 0.0)
    } else if normalized == 180.0 {
        (0.0, -1.0)
    } else if normalized == 270.0 {
        (-1.0, 0.0)
    } else {
        degrees.to_radians().sin_cos()
    }
}

/// Wraps `matrix` so that it operates around the centre of `rect`.
pub fn centered(matrix: &Matrix3, rect: &RectF) -> Matrix3 {
    let (cx, cy) = rect.center();
    let (cx, cy) = (cx as f64, cy as f64);
    Matrix3::from_translate(-cx, -cy) * *matrix * Matrix3::from_translate(cx, cy)
}

// ============================================================================
// Transform
// ============================================================================

/// Kind of an icon transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Transform {
    #[default]
    None,
    HorizontalFlip,
    VerticalFlip,
    Rotate90,
    Rotate180,
    Rotate270,
    /// Arbitrary matrix, see [`IconTransform::Matrix`].
    Matrix,
}

static IDENTITY: Matrix3 = Matrix3::IDENTITY;
static HORIZONTAL_FLIP: Matrix3 = Matrix3::from_scale(-1.0, 1.0);
static VERTICAL_FLIP: Matrix3 = Matrix3::from_scale(1.0, -1.0);
static ROTATE_90: Matrix3 = Matrix3::from_affine(0.0, 1.0, -1.0, 0.0, 0.0, 0.0);
static ROTATE_180: Matrix3 = Matrix3::from_affine(-1.0, 0.0, 0.0, -1.0, 0.0, 0.0);
static ROTATE_270: Matrix3 = Matrix3::from_affine(0.0, -1.0, 1.0, 0.0, 0.0, 0.0);

impl Transform {
    pub const ALL: [Transform; 7] = [
        Self::None,
        Self::HorizontalFlip,
        Self::VerticalFlip,
        Self::Rotate90,
        Self::Rotate180,
        Self::Rotate270,
        Self::Matrix,
    ];

    /// The shared matrix of a canonical transform; identity for
    /// [`Transform::None`] and [`Transform::Matrix`].
    pub fn matrix(self) -> &'static Matrix3 {
        match self {
            Self::None | Self::Matrix => &IDENTITY,
            Self::HorizontalFlip => &HORIZONTAL_FLIP,
            Self::VerticalFlip => &VERTICAL_FLIP,
            Self::Rotate90 => &ROTATE_90,
            Self::Rotate180 => &ROTATE_180,
            Self::Rotate270 => &ROTATE_270,
        }
    }

    pub fn is_canonical(self) -> bool {
        self != Self::Matrix
    }
}

// ============================================================================
// IconTransform
// ============================================================================

/// The transform stored in an [`Icon`](crate::Icon).
///
/// Cloning never copies a matrix. Equality compares kinds, and matrices for
/// [`IconTransform::Matrix`].
#[derive(Clone, Default)]
pub enum IconTransform {
    #[default]
    None,
    Canonical(Transform),
    Matrix(Arc<Matrix3>),
}

impl IconTransform {
    /// Stores a transform kind. `Matrix` has no matrix to store and gives
    /// [`IconTransform::None`].
    pub fn from_kind(kind: Transform) -> Self {
        match kind {
            Transform::None | Transform::Matrix => Self::None,
            canonical => Self::Canonical(canonical),
        }
    }

    /// Canonicalizes an arbitrary matrix.
    pub fn from_matrix(matrix: &Matrix3) -> Self {
        match canonical_kind(matrix) {
            Some(kind) => Self::from_kind(kind),
            None => Self::Matrix(Arc::new(*matrix)),
        }
    }

    /// Like [`IconTransform::from_matrix`], aliasing `matrix` when it is not
    /// canonical.
    pub fn from_shared(matrix: Arc<Matrix3>) -> Self {
        match canonical_kind(&matrix) {
            Some(kind) => Self::from_kind(kind),
            None => Self::Matrix(matrix),
        }
    }

    pub fn kind(&self) -> Transform {
        match self {
            Self::None => Transform::None,
            Self::Canonical(kind) => *kind,
            Self::Matrix(_) => Transform::Matrix,
        }
    }

    pub fn matrix(&self) -> &Matrix3 {
        match self {
            Self::None => &IDENTITY,
            Self::Canonical(kind) => kind.matrix(),
            Self::Matrix(matrix) => matrix,
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind() == Transform::None
    }
}

/// The canonical kind `matrix` stands for, or `None` for arbitrary matrices.
fn canonical_kind(matrix: &Matrix3) -> Option<Transform> {
    let untranslated = matrix.m31 == 0.0 && matrix.m32 == 0.0;
    let planar = matrix.m13 == 0.0 && matrix.m23 == 0.0 && matrix.m33 == 1.0;

    match matrix.kind() {
        MatrixKind::None => Some(Transform::None),
        MatrixKind::Scale if untranslated && planar => {
            match (matrix.m11, matrix.m22) {
                (m11, m22) if m11 == -1.0 && m22 == 1.0 => Some(Transform::HorizontalFlip),
                (m11, m22) if m11 == 1.0 && m22 == -1.0 => Some(Transform::VerticalFlip),
                (m11, m22) if m11 == -1.0 && m22 == -1.0 => Some(Transform::Rotate180),
                _ => None,
            }
        }
        MatrixKind::Rotate if untranslated && planar && matrix.m11 == 0.0 && matrix.m22 == 0.0 => {
            match (matrix.m12, matrix.m21) {
                (m12, m21) if m12 == 1.0 && m21 == -1.0 => Some(Transform::Rotate90),
                (m12, m21) if m12 == -1.0 && m21 == 1.0 => Some(Transform::Rotate270),
                _ => None,
            }
        }
        _ => None,
    }
}

impl PartialEq for IconTransform {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Matrix(lhs), Self::Matrix(rhs)) => Arc::ptr_eq(lhs, rhs) || lhs == rhs,
            (Self::Matrix(_), _) | (_, Self::Matrix(_)) => false,
            _ => self.kind() == other.kind(),
        }
    }
}

impl fmt::Debug for IconTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matrix(matrix) => write!(f, "{:?}", matrix.coefficients()),
            _ => write!(f, "{:?}", self.kind()),
        }
    }
}

impl From<Transform> for IconTransform {
    fn from(kind: Transform) -> Self {
        Self::from_kind(kind)
    }
}

impl From<Matrix3> for IconTransform {
    fn from(matrix: Matrix3) -> Self {
        Self::from_matrix(&matrix)
    }
}

impl From<Arc<Matrix3>> for IconTransform {
    fn from(matrix: Arc<Matrix3>) -> Self {
        Self::from_shared(matrix)
    }
}

// ============================================================================
// Tests
// ============================================================================
