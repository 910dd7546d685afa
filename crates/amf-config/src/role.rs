//! Color space roles.
//!
//! Roles reference color spaces by purpose rather than by name, so that
//! configs stay portable across facilities.
//!
//! # Standard Roles
//!
//! - `scene_linear` - scene-referred linear working space
//! - `aces_interchange` - ACES2065-1 interchange space
//! - `cie_xyz_d65_interchange` - CIE XYZ D65 interchange space
//! - `color_timing` - color grading/timing space
//! - `compositing_log` - log compositing space
//! - `data` - non-color data
//! - `default` - default input color space

use std::collections::HashMap;

/// Standard role names.
pub mod names {
    /// Scene-referred linear working space.
    pub const SCENE_LINEAR: &str = "scene_linear";
    /// ACES interchange scene-referred.
    pub const ACES_INTERCHANGE: &str = "aces_interchange";
    /// CIE XYZ interchange (D65).
    pub const CIE_XYZ_D65_INTERCHANGE: &str = "cie_xyz_d65_interchange";
    /// Color grading space.
    pub const COLOR_TIMING: &str = "color_timing";
    /// Compositing log space.
    pub const COMPOSITING_LOG: &str = "compositing_log";
    /// Non-color data (normals, masks).
    pub const DATA: &str = "data";
    /// Default input color space.
    pub const DEFAULT: &str = "default";
}

/// Role to color space mapping.
#[derive(Debug, Clone, Default)]
pub struct Roles {
    /// Role name -> color space name mapping.
    mapping: HashMap<String, String>,
}

impl Roles {
    /// Creates an empty roles mapping.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a role mapping.
    #[inline]
    pub fn define(&mut self, role: impl Into<String>, colorspace: impl Into<String>) {
        self.mapping.insert(role.into(), colorspace.into());
    }

    /// Removes a role mapping, returning its former target.
    #[inline]
    pub fn unset(&mut self, role: &str) -> Option<String> {
        self.mapping.remove(role)
    }

    /// Gets the color space name for a role.
    #[inline]
    pub fn get(&self, role: &str) -> Option<&str> {
        self.mapping.get(role).map(String::as_str)
    }

    /// Checks if a role is defined.
    #[inline]
    pub fn contains(&self, role: &str) -> bool {
        self.mapping.contains_key(role)
    }

    /// Returns all defined roles.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mapping.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of defined roles.
    #[inline]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Checks if no roles are defined.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let mut roles = Roles::new();
        roles.define("scene_linear", "ACEScg");
        roles.define("aces_interchange", "ACES2065-1");

        assert_eq!(roles.get("scene_linear"), Some("ACEScg"));
        assert_eq!(roles.get("aces_interchange"), Some("ACES2065-1"));
        assert_eq!(roles.get("unknown"), None);
    }

    #[test]
    fn unset_role() {
        let mut roles = Roles::new();
        roles.define("default", "Raw");
        assert_eq!(roles.unset("default"), Some("Raw".to_string()));
        assert!(!roles.contains("default"));
    }

    #[test]
    fn iterate_roles() {
        let mut roles = Roles::new();
        roles.define("a", "A");
        roles.define("b", "B");

        let pairs: Vec<_> = roles.iter().collect();
        assert_eq!(pairs.len(), 2);
    }
}
