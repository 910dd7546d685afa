//! Color management configuration model for ACES pipelines.
//!
//! This crate provides the configuration object graph consumed and produced
//! by color-pipeline tooling:
//! - Color spaces, roles, displays/views, looks, named transforms
//! - Transform value types (matrix, LUT file, CDL, color-space, look,
//!   display/view, group)
//! - A built-in ACES studio reference configuration
//! - YAML config loading and cross-reference validation
//!
//! # Quick Start
//!
//! ```
//! use amf_config::{builtin, Config};
//!
//! // The built-in studio reference config
//! let reference = builtin::studio_config();
//! let acescg = reference.colorspace("ACEScg").unwrap();
//! assert_eq!(acescg.name(), "ACEScg");
//!
//! // Build a new config through the editing interface
//! let mut config = Config::raw();
//! config.set_version(2, 3);
//! config.add_colorspace(reference.colorspace("ACES2065-1").unwrap().clone());
//! config.set_role("aces_interchange", "ACES2065-1");
//! config.validate().unwrap();
//! ```
//!
//! # Roles
//!
//! Roles give semantic access to color spaces:
//!
//! ```
//! use amf_config::builtin;
//!
//! let config = builtin::studio_config();
//! let linear = config.colorspace("scene_linear").unwrap();
//! assert_eq!(linear.name(), "ACEScg");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod colorspace;
mod config;
mod display;
mod environment;
mod error;
mod look;
mod transform;

pub mod builtin;
pub mod role;
pub mod validate;

// Re-exports
pub use colorspace::{ColorSpace, ColorSpaceBuilder, Encoding};
pub use config::{Config, ConfigVersion, NamedTransform};
pub use display::{
    Display, DisplayManager, SharedView, View, ViewTransform, USE_DISPLAY_NAME,
};
pub use environment::Environment;
pub use error::{ConfigError, ConfigResult};
pub use look::{parse_looks, Look, LookManager};
pub use role::Roles;
pub use transform::{
    BuiltinTransform, CdlTransform, ColorSpaceTransform, DisplayViewTransform, FileTransform,
    GroupTransform, Interpolation, LookTransform, MatrixTransform, Transform, TransformDirection,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_lookup_by_alias() {
        let config = builtin::studio_config();
        assert!(config.colorspace("aces").is_some());
        assert!(config.colorspace("ACES - ACEScg").is_some());
    }

    #[test]
    fn editing_round() {
        let mut config = Config::raw();
        config.set_version(2, 3);

        let reference = builtin::studio_config();
        config.add_colorspace(reference.colorspace("ACES2065-1").unwrap().clone());
        config.add_colorspace(reference.colorspace("ACEScg").unwrap().clone());
        config.set_role("scene_linear", "ACEScg");
        config.add_environment_var("SHOT_LOOKS", "ACES2065-1");

        assert!(config.validate().is_ok());
        assert_eq!(config.version(), ConfigVersion::new(2, 3));
    }
}
