//! Geom trait system
//!
//! A geom describes which aesthetics it can draw and which of them are mandatory.
//! The dashboard only draws points, but writers validate plot descriptions against
//! the geom rather than hard-coding the channel list.

use serde::{Deserialize, Serialize};

/// Enum of all geom types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeomType {
    Point,
}

/// Aesthetics a geom supports and requires
#[derive(Debug, Clone, Copy)]
pub struct GeomAesthetics {
    pub supported: &'static [&'static str],
    pub required: &'static [&'static str],
}

impl GeomAesthetics {
    pub fn is_supported(&self, name: &str) -> bool {
        self.supported.contains(&name)
    }
}

/// Behaviour shared by all geoms
pub trait GeomTrait {
    fn geom_type(&self) -> GeomType;

    fn aesthetics(&self) -> GeomAesthetics;

    /// Check that every required aesthetic is among `mapped`
    fn validate_required_aesthetics(&self, mapped: &[&str]) -> Result<(), String> {
        let missing: Vec<&str> = self
            .aesthetics()
            .required
            .iter()
            .filter(|name| !mapped.contains(*name))
            .copied()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "Geom '{:?}' requires the {} aesthetic(s)",
                self.geom_type(),
                missing.join(", ")
            ))
        }
    }
}

/// Point geom - scatter plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point;

impl GeomTrait for Point {
    fn geom_type(&self) -> GeomType {
        GeomType::Point
    }

    fn aesthetics(&self) -> GeomAesthetics {
        GeomAesthetics {
            supported: &["x", "y", "color", "size", "shape"],
            required: &["x", "y"],
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "point")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_supports_all_dashboard_aesthetics() {
        let aesthetics = Point.aesthetics();
        for aesthetic in crate::plot::Aesthetic::ALL {
            assert!(aesthetics.is_supported(aesthetic.name()));
        }
        assert!(!aesthetics.is_supported("linetype"));
    }

    #[test]
    fn test_point_requires_position() {
        assert!(Point.validate_required_aesthetics(&["x", "y"]).is_ok());
        let err = Point
            .validate_required_aesthetics(&["x", "color"])
            .unwrap_err();
        assert!(err.contains("y"));
    }
}
