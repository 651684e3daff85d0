//! 2x3 affine transforms (`ItemTransform`) and their classification.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rotations smaller than this (degrees) are treated as none.
pub const ROTATION_EPSILON_DEG: f64 = 0.01;

/// Shear components smaller than this are treated as none.
pub const SKEW_EPSILON: f64 = 0.01;

/// An `ItemTransform` value: `a b c d tx ty`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

/// What a transform does to a placed image, by priority.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Manipulation {
    HorizontalFlip,
    VerticalFlip,
    /// Rotation in degrees.
    Rotation(f64),
    Skew { b: f64, c: f64 },
}

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Rotation angle in degrees, `atan2(b, a)`.
    pub fn rotation_degrees(&self) -> f64 {
        self.b.atan2(self.a).to_degrees()
    }

    /// Classify the transform. Branches are tried in a fixed order and only
    /// the first match is reported: horizontal flip, vertical flip,
    /// rotation, skew.
    ///
    /// `-1 0 0 1` also reads as a 180 degree rotation; the horizontal flip
    /// wins.
    pub fn classify(&self) -> Option<Manipulation> {
        let a = self.a;
        let d = self.d;
        if a < 0.0 && d > 0.0 {
            return Some(Manipulation::HorizontalFlip);
        }
        if a > 0.0 && d < 0.0 {
            return Some(Manipulation::VerticalFlip);
        }
        let rotation = self.rotation_degrees();
        if rotation.abs() > ROTATION_EPSILON_DEG {
            return Some(Manipulation::Rotation(rotation));
        }
        if self.b.abs() > SKEW_EPSILON || self.c.abs() > SKEW_EPSILON {
            return Some(Manipulation::Skew {
                b: self.b,
                c: self.c,
            });
        }
        None
    }
}

impl FromStr for AffineTransform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split_whitespace()
            .map(|v| v.parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::InvalidTransform(format!("'{}': {}", s, e)))?;

        match values.as_slice() {
            &[a, b, c, d, tx, ty] => Ok(Self { a, b, c, d, tx, ty }),
            _ => Err(Error::InvalidTransform(format!(
                "'{}': expected 6 values, found {}",
                s,
                values.len()
            ))),
        }
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.a, self.b, self.c, self.d, self.tx, self.ty
        )
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> AffineTransform {
        s.parse().unwrap()
    }

    #[test]
    fn test_identity_is_clean() {
        assert_eq!(t("1 0 0 1 0 0").classify(), None);
        assert_eq!(AffineTransform::default().classify(), None);
    }

    #[test]
    fn test_horizontal_flip() {
        assert_eq!(
            t("-1 0 0 1 0 0").classify(),
            Some(Manipulation::HorizontalFlip)
        );
        assert_eq!(
            t("-0.7071 0.7071 0.7071 0.7071 0 0").classify(),
            Some(Manipulation::HorizontalFlip)
        );
    }

    #[test]
    fn test_vertical_flip() {
        assert_eq!(
            t("1 0 0 -1 10 20").classify(),
            Some(Manipulation::VerticalFlip)
        );
    }

    #[test]
    fn test_half_turn_is_rotation_not_flip() {
        match t("-1 0 0 -1 0 0").classify() {
            Some(Manipulation::Rotation(deg)) => assert!((deg.abs() - 180.0).abs() < 1e-9),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_small_rotation() {
        match t("0.9998 0.0175 -0.0175 0.9998 0 0").classify() {
            Some(Manipulation::Rotation(deg)) => assert!((deg - 1.0027).abs() < 0.01),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_skew_without_rotation() {
        assert_eq!(
            t("1 0 0.5 1 0 0").classify(),
            Some(Manipulation::Skew { b: 0.0, c: 0.5 })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "1 0 0 1".parse::<AffineTransform>(),
            Err(Error::InvalidTransform(_))
        ));
        assert!(matches!(
            "1 0 x 1 0 0".parse::<AffineTransform>(),
            Err(Error::InvalidTransform(_))
        ));
    }

    #[test]
    fn test_display_roundtrip_text() {
        assert_eq!(t("1 0 0 1 12.5 -3").to_string(), "1 0 0 1 12.5 -3");
    }
}
