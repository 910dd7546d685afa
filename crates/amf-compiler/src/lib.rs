//! Compiles ACES Metadata Files (AMF) into color management configurations.
//!
//! An AMF document is a declarative manifest describing how a clip should
//! be color-managed: an input transform, zero or more look transforms, an
//! optional working-location marker, and an output transform. This crate
//! translates such a manifest into an executable [`amf_config::Config`]
//! seeded from an ACES reference config, together with an [`AmfInfo`]
//! summary of the choices made.
//!
//! # Quick Start
//!
//! ```no_run
//! use amf_compiler::AmfCompiler;
//!
//! let compiler = AmfCompiler::new();
//! let compiled = compiler.compile("clip_010.amf").unwrap();
//!
//! println!("input space: {}", compiled.info.input_colorspace_name);
//! println!("display: {}", compiled.info.display_name);
//! assert!(compiled.config.colorspace("ACES2065-1").is_some());
//! ```
//!
//! Compilation is single-threaded and synchronous: one call owns one
//! parser state. The reference config is only read, so one compiler can
//! serve many sequential compilations, and independent compilations can
//! run on separate threads with their own compiler.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::path::Path;

use tracing::debug;

use amf_config::{builtin, Config};

mod builder;
mod error;
mod model;
mod resolver;
mod router;
mod working_space;

pub use error::{AmfError, AmfResult};

/// Summary of one AMF compilation, populated alongside the built config.
#[derive(Debug, Clone, Default)]
pub struct AmfInfo {
    /// Role name synthesized for this clip (`amf_clip_<sanitized name>`).
    pub clip_identifier: String,
    /// Human-readable clip identifier drawn from the AMF.
    pub clip_name: String,
    /// Color space chosen to represent the clip's input pixels.
    pub input_colorspace_name: String,
    /// Color space the pixels are currently in, after considering which
    /// transforms were already applied.
    pub clip_colorspace_name: String,
    /// Chosen active display.
    pub display_name: String,
    /// Chosen active view.
    pub view_name: String,
    /// Count of look transforms already applied to pixels.
    pub num_looks_applied: usize,
}

/// Result of a successful compilation.
#[derive(Debug, Clone)]
pub struct Compiled {
    /// The built color management configuration.
    pub config: Config,
    /// Summary of the compilation.
    pub info: AmfInfo,
}

/// Compiles AMF documents against a reference config.
///
/// The reference config is read-only; the same compiler can be reused for
/// any number of compilations.
#[derive(Debug, Clone)]
pub struct AmfCompiler {
    reference: Config,
}

impl AmfCompiler {
    /// Creates a compiler using the built-in studio reference config.
    pub fn new() -> Self {
        Self {
            reference: builtin::studio_config(),
        }
    }

    /// Creates a compiler using the given reference config.
    pub fn with_reference(reference: Config) -> Self {
        Self { reference }
    }

    /// Creates a compiler loading the reference config from a file.
    pub fn from_reference_file(path: impl AsRef<Path>) -> AmfResult<Self> {
        let reference = Config::from_file(path).map_err(|source| AmfError::Config {
            line: 0,
            source,
        })?;
        Ok(Self { reference })
    }

    /// Returns the reference config this compiler resolves against.
    pub fn reference(&self) -> &Config {
        &self.reference
    }

    /// Compiles an AMF document into a config and summary.
    ///
    /// The document is parsed in one pass, the config is assembled from
    /// the reference config, and the result is validated. On error no
    /// partial config is returned.
    pub fn compile(&self, amf_path: impl AsRef<Path>) -> AmfResult<Compiled> {
        let amf_path = amf_path.as_ref();
        debug!(path = %amf_path.display(), "compiling AMF");

        builder::check_reference(&self.reference)?;

        let xml = std::fs::read_to_string(amf_path).map_err(|source| AmfError::Io {
            path: amf_path.to_path_buf(),
            source,
        })?;
        let doc = router::parse_amf(&xml)?;
        let (config, info) = builder::build(&self.reference, &doc, amf_path)?;
        Ok(Compiled { config, info })
    }
}

impl Default for AmfCompiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiles an AMF document against the built-in studio reference config.
pub fn compile_amf(amf_path: impl AsRef<Path>) -> AmfResult<Compiled> {
    AmfCompiler::new().compile(amf_path)
}
