//! Transform definitions for color space conversions.
//!
//! Transforms describe operations on pixel values without evaluating them:
//! matrix conversions, LUT file references, CDL grades, and references to
//! other config entities (color spaces, looks, display/view pairs).
//!
//! Transforms can be chained via `GroupTransform`.

use std::path::PathBuf;

/// Transform application direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformDirection {
    /// Forward transform.
    #[default]
    Forward,
    /// Inverse transform.
    Inverse,
}

impl TransformDirection {
    /// Returns the opposite direction.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Self::Forward => Self::Inverse,
            Self::Inverse => Self::Forward,
        }
    }
}

/// Interpolation method for LUT files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Nearest neighbor.
    Nearest,
    /// Linear interpolation.
    #[default]
    Linear,
    /// Tetrahedral interpolation.
    Tetrahedral,
    /// Best available for the file type.
    Best,
}

/// Color transform definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// 4x4 matrix + offset.
    Matrix(MatrixTransform),

    /// Built-in transform by style name.
    Builtin(BuiltinTransform),

    /// LUT or grade loaded from a file.
    FileTransform(FileTransform),

    /// CDL (slope/offset/power/sat).
    Cdl(CdlTransform),

    /// Conversion between two named color spaces.
    ColorSpace(ColorSpaceTransform),

    /// Application of named looks between two color spaces.
    Look(LookTransform),

    /// Reference to a display/view pair.
    DisplayView(DisplayViewTransform),

    /// Group of chained transforms.
    Group(GroupTransform),
}

impl Transform {
    /// Creates a matrix transform from a 4x4 array.
    pub fn matrix(m: [f64; 16]) -> Self {
        Self::Matrix(MatrixTransform {
            matrix: m,
            offset: [0.0; 4],
            direction: TransformDirection::Forward,
        })
    }

    /// Creates an identity matrix transform.
    pub fn identity() -> Self {
        Self::matrix(MatrixTransform::IDENTITY)
    }

    /// Creates a group transform.
    pub fn group(transforms: Vec<Transform>) -> Self {
        Self::Group(GroupTransform {
            transforms,
            direction: TransformDirection::Forward,
        })
    }

    /// Creates a file transform (LUT reference).
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::FileTransform(FileTransform {
            src: path.into(),
            ccc_id: None,
            interpolation: Interpolation::default(),
            direction: TransformDirection::Forward,
        })
    }

    /// Returns the inverse of this transform.
    pub fn inverse(self) -> Self {
        match self {
            Self::Matrix(mut t) => {
                t.direction = t.direction.inverse();
                Self::Matrix(t)
            }
            Self::Builtin(mut t) => {
                t.direction = t.direction.inverse();
                Self::Builtin(t)
            }
            Self::FileTransform(mut t) => {
                t.direction = t.direction.inverse();
                Self::FileTransform(t)
            }
            Self::Cdl(mut t) => {
                t.direction = t.direction.inverse();
                Self::Cdl(t)
            }
            Self::ColorSpace(mut t) => {
                t.direction = t.direction.inverse();
                Self::ColorSpace(t)
            }
            Self::Look(mut t) => {
                t.direction = t.direction.inverse();
                Self::Look(t)
            }
            Self::DisplayView(mut t) => {
                t.direction = t.direction.inverse();
                Self::DisplayView(t)
            }
            Self::Group(mut t) => {
                t.direction = t.direction.inverse();
                t.transforms.reverse();
                Self::Group(t)
            }
        }
    }
}

/// 4x4 matrix + offset transform.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixTransform {
    /// 4x4 matrix in row-major order.
    pub matrix: [f64; 16],
    /// RGBA offset.
    pub offset: [f64; 4],
    /// Direction.
    pub direction: TransformDirection,
}

impl MatrixTransform {
    /// Identity matrix.
    pub const IDENTITY: [f64; 16] = [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ];
}

/// Built-in transform referenced by style name.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinTransform {
    /// Builtin style name (e.g. "ACEScct_to_ACES2065-1").
    pub style: String,
    /// Direction.
    pub direction: TransformDirection,
}

/// File-based transform (LUT, CDL collection, etc.).
#[derive(Debug, Clone, PartialEq)]
pub struct FileTransform {
    /// Source file path.
    pub src: PathBuf,
    /// CDL correction id (for .cc/.ccc/.cdl files).
    pub ccc_id: Option<String>,
    /// Interpolation method.
    pub interpolation: Interpolation,
    /// Direction.
    pub direction: TransformDirection,
}

/// CDL (ASC Color Decision List) transform.
#[derive(Debug, Clone, PartialEq)]
pub struct CdlTransform {
    /// Per-channel slope [R, G, B].
    pub slope: [f64; 3],
    /// Per-channel offset [R, G, B].
    pub offset: [f64; 3],
    /// Per-channel power [R, G, B].
    pub power: [f64; 3],
    /// Saturation (1.0 = no change).
    pub saturation: f64,
    /// Direction.
    pub direction: TransformDirection,
}

impl Default for CdlTransform {
    fn default() -> Self {
        Self {
            slope: [1.0, 1.0, 1.0],
            offset: [0.0, 0.0, 0.0],
            power: [1.0, 1.0, 1.0],
            saturation: 1.0,
            direction: TransformDirection::Forward,
        }
    }
}

/// Conversion between two named color spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpaceTransform {
    /// Source color space name (may be a context reference like `$VAR`).
    pub src: String,
    /// Destination color space name.
    pub dst: String,
    /// Pass non-color data through unchanged.
    pub data_bypass: bool,
    /// Direction.
    pub direction: TransformDirection,
}

/// Application of named looks between two color spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct LookTransform {
    /// Source color space.
    pub src: String,
    /// Destination color space.
    pub dst: String,
    /// Look names (comma-separated for multiple, `+`/`-` for direction).
    pub looks: String,
    /// Apply looks without the src/dst color space conversion.
    pub skip_colorspace_conversion: bool,
    /// Direction.
    pub direction: TransformDirection,
}

/// Reference to a display/view pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayViewTransform {
    /// Source color space.
    pub src: String,
    /// Display name.
    pub display: String,
    /// View name.
    pub view: String,
    /// Skip the view's looks.
    pub looks_bypass: bool,
    /// Direction.
    pub direction: TransformDirection,
}

/// Group of chained transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTransform {
    /// Ordered list of transforms.
    pub transforms: Vec<Transform>,
    /// Direction (affects iteration order).
    pub direction: TransformDirection,
}

impl GroupTransform {
    /// Number of transforms in the group.
    #[inline]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Checks if the group is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_inverse() {
        assert_eq!(TransformDirection::Forward.inverse(), TransformDirection::Inverse);
        assert_eq!(TransformDirection::Inverse.inverse(), TransformDirection::Forward);
    }

    #[test]
    fn matrix_transform() {
        let t = Transform::matrix(MatrixTransform::IDENTITY);
        if let Transform::Matrix(m) = t {
            assert_eq!(m.matrix[0], 1.0);
            assert_eq!(m.direction, TransformDirection::Forward);
        }
    }

    #[test]
    fn group_inverse() {
        let g = Transform::group(vec![
            Transform::matrix(MatrixTransform::IDENTITY),
            Transform::file("test.cube"),
        ]);
        let inv = g.inverse();
        if let Transform::Group(g) = inv {
            assert_eq!(g.direction, TransformDirection::Inverse);
            assert_eq!(g.transforms.len(), 2);
            assert!(matches!(g.transforms[0], Transform::FileTransform(_)));
        }
    }

    #[test]
    fn colorspace_inverse_keeps_endpoints() {
        let t = Transform::ColorSpace(ColorSpaceTransform {
            src: "A".into(),
            dst: "B".into(),
            data_bypass: true,
            direction: TransformDirection::Forward,
        });
        if let Transform::ColorSpace(cst) = t.inverse() {
            assert_eq!(cst.src, "A");
            assert_eq!(cst.dst, "B");
            assert_eq!(cst.direction, TransformDirection::Inverse);
            assert!(cst.data_bypass);
        }
    }
}
