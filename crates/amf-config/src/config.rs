//! Configuration storage, editing interface, and YAML loading.
//!
//! A [`Config`] holds color spaces, roles, displays/views, looks, named
//! transforms, environment variables, and file rules. Reference configs are
//! read-only inputs; the AMF compiler builds a new config through the
//! editing interface below.
//!
//! # Example
//!
//! ```
//! use amf_config::{builtin, Config};
//!
//! let reference = builtin::studio_config();
//! assert!(reference.colorspace("ACES2065-1").is_some());
//!
//! let mut config = Config::raw();
//! config.set_version(2, 3);
//! config.add_colorspace(reference.colorspace("ACES2065-1").unwrap().clone());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::colorspace::{ColorSpace, Encoding};
use crate::display::{Display, DisplayManager, SharedView, View, ViewTransform};
use crate::environment::Environment;
use crate::error::{ConfigError, ConfigResult};
use crate::look::{Look, LookManager};
use crate::role::Roles;
use crate::transform::{
    BuiltinTransform, CdlTransform, ColorSpaceTransform, FileTransform, Interpolation,
    MatrixTransform, Transform, TransformDirection,
};
use crate::validate;

/// Config format version (`major.minor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfigVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
}

impl ConfigVersion {
    /// Creates a version value.
    #[inline]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parses a `major` or `major.minor` profile version string.
    pub fn parse(s: &str) -> ConfigResult<Self> {
        let mut parts = s.trim().splitn(2, '.');
        let major = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(|| ConfigError::UnsupportedVersion { version: s.into() })?;
        let minor = match parts.next() {
            Some(p) => p
                .parse::<u32>()
                .map_err(|_| ConfigError::UnsupportedVersion { version: s.into() })?,
            None => 0,
        };
        Ok(Self { major, minor })
    }
}

impl fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Default for ConfigVersion {
    fn default() -> Self {
        Self::new(2, 0)
    }
}

/// A named transform: a transform published under a name without defining a
/// color space, usable from application UIs and views.
#[derive(Debug, Clone)]
pub struct NamedTransform {
    /// Unique name.
    name: String,
    /// Alternative names.
    aliases: Vec<String>,
    /// Family path for UI grouping.
    family: String,
    /// Description.
    description: String,
    /// Categories.
    categories: Vec<String>,
    /// Forward transform.
    forward_transform: Option<Transform>,
    /// Inverse transform.
    inverse_transform: Option<Transform>,
}

impl NamedTransform {
    /// Creates a new named transform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            family: String::new(),
            description: String::new(),
            categories: Vec::new(),
            forward_transform: None,
            inverse_transform: None,
        }
    }

    /// Sets the family path.
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Sets the forward transform.
    pub fn forward(mut self, t: Transform) -> Self {
        self.forward_transform = Some(t);
        self
    }

    /// Sets the inverse transform.
    pub fn inverse(mut self, t: Transform) -> Self {
        self.inverse_transform = Some(t);
        self
    }

    /// Returns the name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the aliases.
    #[inline]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the family path.
    #[inline]
    pub fn get_family(&self) -> &str {
        &self.family
    }

    /// Returns the description.
    #[inline]
    pub fn get_description(&self) -> &str {
        &self.description
    }

    /// Returns the categories.
    #[inline]
    pub fn get_categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns the forward transform.
    #[inline]
    pub fn forward_transform(&self) -> Option<&Transform> {
        self.forward_transform.as_ref()
    }

    /// Returns the inverse transform.
    #[inline]
    pub fn inverse_transform(&self) -> Option<&Transform> {
        self.inverse_transform.as_ref()
    }
}

/// Color management configuration.
///
/// The main entry point: defines color spaces, roles, displays/views,
/// looks, named transforms, and environment variables.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Config name/description.
    name: String,
    /// Config version.
    version: ConfigVersion,
    /// Search paths for LUT files.
    search_paths: Vec<PathBuf>,
    /// Working directory (config file location).
    working_dir: PathBuf,
    /// All color spaces.
    colorspaces: Vec<ColorSpace>,
    /// Role mappings.
    roles: Roles,
    /// Displays, shared views, view transforms.
    displays: DisplayManager,
    /// Looks.
    looks: LookManager,
    /// Named transforms.
    named_transforms: Vec<NamedTransform>,
    /// Active displays (subset shown in UI; first is the default).
    active_displays: Vec<String>,
    /// Active views.
    active_views: Vec<String>,
    /// Inactive color spaces (hidden from UI).
    inactive_colorspaces: Vec<String>,
    /// Default file-rule color space.
    default_file_rule_colorspace: Option<String>,
    /// Declared environment variables.
    environment: Environment,
}

impl Config {
    /// Creates a new empty configuration.
    pub fn new() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            ..Self::default()
        }
    }

    /// Creates the "raw" seed configuration: a single `Raw` data color
    /// space and an `sRGB` display with a `Raw` view.
    pub fn raw() -> Self {
        let mut config = Self::new();
        config.name = "raw".into();
        config.add_colorspace(
            ColorSpace::builder("Raw")
                .family("Utility")
                .encoding(Encoding::Data)
                .description("A non-color space")
                .is_data(true)
                .build(),
        );
        let mut display = Display::new("sRGB");
        display.add_view(View::new("Raw", "Raw"));
        config.displays.add_display(display);
        config
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let working_dir = path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        debug!(path = %path.display(), "loading config");
        Self::from_yaml_str(&content, working_dir)
    }

    /// Loads configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str, working_dir: PathBuf) -> ConfigResult<Self> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        Self::from_raw(raw, working_dir)
    }

    /// Constructs a config from parsed raw data.
    fn from_raw(raw: RawConfig, working_dir: PathBuf) -> ConfigResult<Self> {
        let version_str = match &raw.ocio_profile_version {
            serde_yaml::Value::String(s) => s.clone(),
            serde_yaml::Value::Number(n) => n.to_string(),
            other => {
                return Err(ConfigError::UnsupportedVersion {
                    version: format!("{:?}", other),
                })
            }
        };
        let version = ConfigVersion::parse(&version_str)?;

        let mut config = Self {
            name: raw.name.unwrap_or_default(),
            version,
            working_dir: working_dir.clone(),
            search_paths: raw
                .search_path
                .map(|s| {
                    s.split(':')
                        .filter(|p| !p.is_empty())
                        .map(|p| working_dir.join(p))
                        .collect()
                })
                .unwrap_or_default(),
            active_displays: raw.active_displays.unwrap_or_default(),
            active_views: raw.active_views.unwrap_or_default(),
            inactive_colorspaces: raw.inactive_colorspaces.unwrap_or_default(),
            ..Self::default()
        };

        if let Some(environment) = raw.environment {
            for (name, value) in environment {
                config.environment.add(name, value);
            }
        }

        if let Some(roles) = raw.roles {
            for (role, cs) in roles {
                config.roles.define(role, cs);
            }
        }

        if let Some(colorspaces) = raw.colorspaces {
            for raw_cs in colorspaces {
                let cs = parse_colorspace(raw_cs)?;
                config.colorspaces.push(cs);
            }
        }

        if let Some(view_transforms) = raw.view_transforms {
            for raw_vt in view_transforms {
                let mut vt = ViewTransform::new(&raw_vt.name)
                    .with_description(raw_vt.description.unwrap_or_default());
                if let Some(family) = raw_vt.family {
                    vt = vt.with_family(family);
                }
                if let Some(t) = raw_vt.from_scene_reference {
                    vt = vt.with_from_scene_reference(parse_transform(&t)?);
                }
                if let Some(t) = raw_vt.to_scene_reference {
                    vt = vt.with_to_scene_reference(parse_transform(&t)?);
                }
                config.displays.add_view_transform(vt);
            }
        }

        if let Some(looks) = raw.looks {
            for raw_look in looks {
                let mut look = Look::new(&raw_look.name)
                    .process_space(raw_look.process_space.unwrap_or_default())
                    .description(raw_look.description.unwrap_or_default());
                if let Some(t) = raw_look.transform {
                    look = look.transform(parse_transform(&t)?);
                }
                if let Some(t) = raw_look.inverse_transform {
                    look = look.inverse_transform(parse_transform(&t)?);
                }
                config.looks.add(look);
            }
        }

        if let Some(displays) = raw.displays {
            for (name, views) in displays {
                let mut display = Display::new(&name);
                for raw_view in views {
                    let mut view = View::new(&raw_view.name, raw_view.colorspace.unwrap_or_default());
                    if let Some(looks) = raw_view.looks {
                        view = view.with_looks(looks);
                    }
                    if let Some(vt) = raw_view.view_transform {
                        view = view.with_view_transform(vt);
                    }
                    display.add_view(view);
                }
                config.displays.add_display(display);
            }
        }

        if let Some(file_rules) = raw.file_rules {
            for rule in file_rules {
                if rule.name.eq_ignore_ascii_case("Default") {
                    config.default_file_rule_colorspace = Some(rule.colorspace);
                }
            }
        }

        debug!(
            name = %config.name,
            colorspaces = config.colorspaces.len(),
            "config loaded"
        );
        Ok(config)
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Returns the config name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the config name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the config version.
    #[inline]
    pub fn version(&self) -> ConfigVersion {
        self.version
    }

    /// Returns the working directory.
    #[inline]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Returns all search paths.
    #[inline]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Returns all color spaces.
    #[inline]
    pub fn colorspaces(&self) -> &[ColorSpace] {
        &self.colorspaces
    }

    /// Gets a color space by name, alias, or role.
    pub fn colorspace(&self, name: &str) -> Option<&ColorSpace> {
        if let Some(cs_name) = self.roles.get(name) {
            return self.colorspaces.iter().find(|cs| cs.matches_name(cs_name));
        }
        self.colorspaces.iter().find(|cs| cs.matches_name(name))
    }

    /// Returns color space names in registration order.
    pub fn colorspace_names(&self) -> impl Iterator<Item = &str> {
        self.colorspaces.iter().map(|cs| cs.name())
    }

    /// Returns the roles mapping.
    #[inline]
    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    /// Returns the display manager.
    #[inline]
    pub fn displays(&self) -> &DisplayManager {
        &self.displays
    }

    /// Returns the display manager mutably.
    #[inline]
    pub fn displays_mut(&mut self) -> &mut DisplayManager {
        &mut self.displays
    }

    /// Gets a view transform by name.
    pub fn view_transform(&self, name: &str) -> Option<&ViewTransform> {
        self.displays.view_transform(name)
    }

    /// Returns all view transforms.
    #[inline]
    pub fn view_transforms(&self) -> &[ViewTransform] {
        self.displays.view_transforms()
    }

    /// Returns the look manager.
    #[inline]
    pub fn looks(&self) -> &LookManager {
        &self.looks
    }

    /// Gets a look by name.
    pub fn look(&self, name: &str) -> Option<&Look> {
        self.looks.get(name)
    }

    /// Gets a named transform by name.
    pub fn named_transform(&self, name: &str) -> Option<&NamedTransform> {
        self.named_transforms
            .iter()
            .find(|nt| nt.name().eq_ignore_ascii_case(name))
    }

    /// Returns all named transforms.
    #[inline]
    pub fn named_transforms(&self) -> &[NamedTransform] {
        &self.named_transforms
    }

    /// Returns active display names (first is the default).
    #[inline]
    pub fn active_displays(&self) -> &[String] {
        &self.active_displays
    }

    /// Returns active view names.
    #[inline]
    pub fn active_views(&self) -> &[String] {
        &self.active_views
    }

    /// Returns inactive color space names.
    #[inline]
    pub fn inactive_colorspaces(&self) -> &[String] {
        &self.inactive_colorspaces
    }

    /// Returns the default file-rule color space.
    #[inline]
    pub fn default_file_rule_colorspace(&self) -> Option<&str> {
        self.default_file_rule_colorspace.as_deref()
    }

    /// Returns the declared environment variables.
    #[inline]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Gets a declared environment variable's value.
    pub fn environment_var(&self, name: &str) -> Option<&str> {
        self.environment.get(name)
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Sets the config version.
    pub fn set_version(&mut self, major: u32, minor: u32) {
        self.version = ConfigVersion::new(major, minor);
    }

    /// Adds a color space, replacing any existing one of the same name.
    pub fn add_colorspace(&mut self, cs: ColorSpace) {
        if let Some(existing) = self
            .colorspaces
            .iter_mut()
            .find(|existing| existing.name().eq_ignore_ascii_case(cs.name()))
        {
            *existing = cs;
        } else {
            self.colorspaces.push(cs);
        }
    }

    /// Removes a color space by name. Returns whether one was removed.
    pub fn remove_colorspace(&mut self, name: &str) -> bool {
        let before = self.colorspaces.len();
        self.colorspaces.retain(|cs| !cs.name().eq_ignore_ascii_case(name));
        self.colorspaces.len() != before
    }

    /// Adds a view transform (duplicate names ignored).
    pub fn add_view_transform(&mut self, vt: ViewTransform) {
        self.displays.add_view_transform(vt);
    }

    /// Adds a look.
    pub fn add_look(&mut self, look: Look) {
        self.looks.add(look);
    }

    /// Adds a named transform.
    pub fn add_named_transform(&mut self, nt: NamedTransform) {
        self.named_transforms.push(nt);
    }

    /// Adds a view bound to `colorspace` under `display`, creating the
    /// display when absent.
    pub fn add_display_view(
        &mut self,
        display: &str,
        view: &str,
        colorspace: &str,
        looks: Option<&str>,
    ) {
        let mut v = View::new(view, colorspace);
        if let Some(looks) = looks {
            v = v.with_looks(looks);
        }
        self.displays.display_or_insert(display).add_view(v);
    }

    /// Removes a view from a display, dropping the display when it has no
    /// views left. Returns whether a view was removed.
    pub fn remove_display_view(&mut self, display: &str, view: &str) -> bool {
        let removed = self
            .displays
            .display_mut(display)
            .map(|d| d.remove_view(view))
            .unwrap_or(false);
        if removed {
            if let Some(d) = self.displays.display(display) {
                if d.is_empty() {
                    self.displays.remove_display(display);
                }
            }
        }
        removed
    }

    /// Registers a shared view definition.
    pub fn add_shared_view(&mut self, view: SharedView) {
        self.displays.add_shared_view(view);
    }

    /// Binds a registered shared view to a display (duplicate-safe),
    /// creating the display when absent.
    pub fn add_display_shared_view(&mut self, display: &str, shared_view: &str) {
        self.displays
            .display_or_insert(display)
            .add_shared_view(shared_view);
    }

    /// Defines a role mapping.
    pub fn set_role(&mut self, role: impl Into<String>, colorspace: impl Into<String>) {
        self.roles.define(role, colorspace);
    }

    /// Removes a role mapping.
    pub fn unset_role(&mut self, role: &str) {
        self.roles.unset(role);
    }

    /// Sets the default file-rule color space.
    pub fn set_default_file_rule_colorspace(&mut self, colorspace: impl Into<String>) {
        self.default_file_rule_colorspace = Some(colorspace.into());
    }

    /// Replaces the active display list.
    pub fn set_active_displays(&mut self, displays: Vec<String>) {
        self.active_displays = displays;
    }

    /// Replaces the active view list.
    pub fn set_active_views(&mut self, views: Vec<String>) {
        self.active_views = views;
    }

    /// Replaces the inactive color space list.
    pub fn set_inactive_colorspaces(&mut self, names: Vec<String>) {
        self.inactive_colorspaces = names;
    }

    /// Appends an inactive color space (duplicate-safe).
    pub fn add_inactive_colorspace(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self
            .inactive_colorspaces
            .iter()
            .any(|n| n.eq_ignore_ascii_case(&name))
        {
            self.inactive_colorspaces.push(name);
        }
    }

    /// Appends a search path.
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.push(path.into());
    }

    /// Declares an environment variable.
    pub fn add_environment_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.environment.add(name, value);
    }

    /// Validates cross-references; fails on the first error-severity issue.
    pub fn validate(&self) -> ConfigResult<()> {
        let issues = validate::check(self);
        if let Some(issue) = issues
            .iter()
            .find(|i| i.severity == validate::Severity::Error)
        {
            return Err(ConfigError::Validation(issue.message.clone()));
        }
        Ok(())
    }
}

// ============================================================================
// Raw YAML structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawConfig {
    ocio_profile_version: serde_yaml::Value,
    name: Option<String>,
    #[allow(dead_code)]
    description: Option<String>,
    search_path: Option<String>,
    environment: Option<HashMap<String, String>>,
    roles: Option<HashMap<String, String>>,
    colorspaces: Option<Vec<RawColorSpace>>,
    view_transforms: Option<Vec<RawViewTransform>>,
    looks: Option<Vec<RawLook>>,
    displays: Option<HashMap<String, Vec<RawView>>>,
    active_displays: Option<Vec<String>>,
    active_views: Option<Vec<String>>,
    inactive_colorspaces: Option<Vec<String>>,
    file_rules: Option<Vec<RawFileRule>>,
}

#[derive(Debug, Deserialize)]
struct RawColorSpace {
    name: String,
    description: Option<String>,
    family: Option<String>,
    encoding: Option<String>,
    aliases: Option<Vec<String>>,
    to_reference: Option<RawTransform>,
    from_reference: Option<RawTransform>,
    to_scene_reference: Option<RawTransform>,
    from_scene_reference: Option<RawTransform>,
}

#[derive(Debug, Deserialize)]
struct RawView {
    name: String,
    colorspace: Option<String>,
    looks: Option<String>,
    view_transform: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLook {
    name: String,
    process_space: Option<String>,
    description: Option<String>,
    transform: Option<RawTransform>,
    inverse_transform: Option<RawTransform>,
}

#[derive(Debug, Deserialize)]
struct RawViewTransform {
    name: String,
    description: Option<String>,
    family: Option<String>,
    from_scene_reference: Option<RawTransform>,
    to_scene_reference: Option<RawTransform>,
}

#[derive(Debug, Deserialize)]
struct RawFileRule {
    name: String,
    colorspace: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTransform {
    Single(Box<RawTransformDef>),
    Group(Vec<RawTransformDef>),
}

#[derive(Debug, Deserialize)]
struct RawTransformDef {
    #[serde(rename = "!<MatrixTransform>")]
    matrix: Option<RawMatrixTransform>,
    #[serde(rename = "!<BuiltinTransform>")]
    builtin: Option<RawBuiltinTransform>,
    #[serde(rename = "!<FileTransform>")]
    file: Option<RawFileTransform>,
    #[serde(rename = "!<CDLTransform>")]
    cdl: Option<RawCdlTransform>,
    #[serde(rename = "!<ColorSpaceTransform>")]
    colorspace: Option<RawColorSpaceTransform>,
}

#[derive(Debug, Deserialize)]
struct RawMatrixTransform {
    matrix: Option<Vec<f64>>,
    offset: Option<Vec<f64>>,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBuiltinTransform {
    style: String,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFileTransform {
    src: String,
    cccid: Option<String>,
    interpolation: Option<String>,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCdlTransform {
    slope: Option<Vec<f64>>,
    offset: Option<Vec<f64>>,
    power: Option<Vec<f64>>,
    saturation: Option<f64>,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawColorSpaceTransform {
    src: String,
    dst: String,
    direction: Option<String>,
}

// ============================================================================
// Raw parsing helpers
// ============================================================================

fn parse_colorspace(raw: RawColorSpace) -> ConfigResult<ColorSpace> {
    let mut builder = ColorSpace::builder(&raw.name);

    if let Some(desc) = raw.description {
        builder = builder.description(desc);
    }
    if let Some(family) = raw.family {
        builder = builder.family(family);
    }
    if let Some(encoding) = raw.encoding {
        builder = builder.encoding(Encoding::parse(&encoding));
    }
    if let Some(aliases) = raw.aliases {
        for alias in aliases {
            builder = builder.alias(alias);
        }
    }

    if let Some(raw_t) = raw.to_reference.or(raw.to_scene_reference) {
        builder = builder.to_reference(parse_transform(&raw_t)?);
    }
    if let Some(raw_t) = raw.from_reference.or(raw.from_scene_reference) {
        builder = builder.from_reference(parse_transform(&raw_t)?);
    }

    Ok(builder.build())
}

fn parse_transform(raw: &RawTransform) -> ConfigResult<Transform> {
    match raw {
        RawTransform::Single(def) => parse_transform_def(def.as_ref()),
        RawTransform::Group(defs) => {
            let mut transforms = Vec::new();
            for def in defs {
                transforms.push(parse_transform_def(def)?);
            }
            if transforms.is_empty() {
                return Err(ConfigError::Validation("empty transform group".into()));
            }
            Ok(Transform::group(transforms))
        }
    }
}

fn parse_transform_def(def: &RawTransformDef) -> ConfigResult<Transform> {
    if let Some(m) = &def.matrix {
        return Ok(Transform::Matrix(MatrixTransform {
            matrix: parse_matrix_16(&m.matrix),
            offset: parse_offset_4(&m.offset),
            direction: parse_direction(&m.direction),
        }));
    }

    if let Some(b) = &def.builtin {
        return Ok(Transform::Builtin(BuiltinTransform {
            style: b.style.clone(),
            direction: parse_direction(&b.direction),
        }));
    }

    if let Some(f) = &def.file {
        return Ok(Transform::FileTransform(FileTransform {
            src: PathBuf::from(&f.src),
            ccc_id: f.cccid.clone(),
            interpolation: parse_interpolation(&f.interpolation),
            direction: parse_direction(&f.direction),
        }));
    }

    if let Some(c) = &def.cdl {
        return Ok(Transform::Cdl(CdlTransform {
            slope: parse_rgb(&c.slope, 1.0),
            offset: parse_rgb(&c.offset, 0.0),
            power: parse_rgb(&c.power, 1.0),
            saturation: c.saturation.unwrap_or(1.0),
            direction: parse_direction(&c.direction),
        }));
    }

    if let Some(cs) = &def.colorspace {
        return Ok(Transform::ColorSpace(ColorSpaceTransform {
            src: cs.src.clone(),
            dst: cs.dst.clone(),
            data_bypass: false,
            direction: parse_direction(&cs.direction),
        }));
    }

    Err(ConfigError::Validation("unknown transform type".into()))
}

fn parse_direction(dir: &Option<String>) -> TransformDirection {
    match dir.as_deref() {
        Some(d) if d.eq_ignore_ascii_case("inverse") => TransformDirection::Inverse,
        _ => TransformDirection::Forward,
    }
}

fn parse_interpolation(interp: &Option<String>) -> Interpolation {
    match interp.as_deref() {
        Some(i) if i.eq_ignore_ascii_case("nearest") => Interpolation::Nearest,
        Some(i) if i.eq_ignore_ascii_case("tetrahedral") => Interpolation::Tetrahedral,
        Some(i) if i.eq_ignore_ascii_case("best") => Interpolation::Best,
        _ => Interpolation::Linear,
    }
}

fn parse_matrix_16(m: &Option<Vec<f64>>) -> [f64; 16] {
    match m {
        Some(v) if v.len() >= 16 => {
            let mut out = [0.0; 16];
            out.copy_from_slice(&v[..16]);
            out
        }
        Some(v) if v.len() >= 9 => [
            // 3x3 matrix
            v[0], v[1], v[2], 0.0,
            v[3], v[4], v[5], 0.0,
            v[6], v[7], v[8], 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
        _ => MatrixTransform::IDENTITY,
    }
}

fn parse_offset_4(o: &Option<Vec<f64>>) -> [f64; 4] {
    match o {
        Some(v) if v.len() >= 4 => [v[0], v[1], v[2], v[3]],
        Some(v) if v.len() >= 3 => [v[0], v[1], v[2], 0.0],
        _ => [0.0; 4],
    }
}

fn parse_rgb(v: &Option<Vec<f64>>, default: f64) -> [f64; 3] {
    match v {
        Some(vec) if vec.len() >= 3 => [vec[0], vec[1], vec[2]],
        Some(vec) if vec.len() == 1 => [vec[0]; 3],
        _ => [default; 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_CONFIG: &str = r#"
ocio_profile_version: "2.3"

environment:
  SHOT_LOOKS: ACES2065-1

roles:
  aces_interchange: ACES2065-1
  scene_linear: ACEScg

colorspaces:
  - name: ACES2065-1
    family: ACES
    encoding: scene-linear
    description: ACES reference space

  - name: ACEScg
    family: ACES
    encoding: scene-linear
    description: ACES CG working space
    to_reference:
      "!<BuiltinTransform>": {style: "ACEScg_to_ACES2065-1"}

displays:
  sRGB:
    - name: Raw
      colorspace: ACES2065-1
"#;

    #[test]
    fn parse_minimal_config() {
        let config = Config::from_yaml_str(MINIMAL_CONFIG, PathBuf::from(".")).unwrap();

        assert_eq!(config.version(), ConfigVersion::new(2, 3));
        assert_eq!(config.colorspaces().len(), 2);
        assert!(config.colorspace("ACES2065-1").is_some());
        assert!(config.colorspace("ACEScg").unwrap().to_reference().is_some());
        assert_eq!(config.environment_var("SHOT_LOOKS"), Some("ACES2065-1"));
    }

    #[test]
    fn roles_lookup() {
        let config = Config::from_yaml_str(MINIMAL_CONFIG, PathBuf::from(".")).unwrap();
        let cs = config.colorspace("scene_linear").unwrap();
        assert_eq!(cs.name(), "ACEScg");
    }

    #[test]
    fn version_parse() {
        assert_eq!(ConfigVersion::parse("2.3").unwrap(), ConfigVersion::new(2, 3));
        assert_eq!(ConfigVersion::parse("2").unwrap(), ConfigVersion::new(2, 0));
        assert!(ConfigVersion::parse("two").is_err());
    }

    #[test]
    fn raw_config_shape() {
        let config = Config::raw();
        assert!(config.colorspace("Raw").is_some());
        let display = config.displays().display("sRGB").unwrap();
        assert!(display.has_view("Raw"));
    }

    #[test]
    fn add_colorspace_replaces_same_name() {
        let mut config = Config::new();
        config.add_colorspace(ColorSpace::builder("A").description("one").build());
        config.add_colorspace(ColorSpace::builder("A").description("two").build());
        assert_eq!(config.colorspaces().len(), 1);
        assert_eq!(config.colorspace("A").unwrap().description(), "two");
    }

    #[test]
    fn remove_display_view() {
        let mut config = Config::raw();
        assert!(config.remove_display_view("sRGB", "Raw"));
        assert!(!config.remove_display_view("sRGB", "Raw"));
    }

    #[test]
    fn inactive_colorspace_dedup() {
        let mut config = Config::new();
        config.add_inactive_colorspace("CIE-XYZ-D65");
        config.add_inactive_colorspace("CIE-XYZ-D65");
        assert_eq!(config.inactive_colorspaces().len(), 1);
    }
}
