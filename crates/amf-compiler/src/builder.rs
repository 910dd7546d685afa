//! Config synthesis from the parsed intermediate model.
//!
//! Translates the AMF's declarative input/look/output sections into an
//! imperative config: color spaces, display/view bindings, looks, named
//! transforms, environment variables, roles, and file rules, all seeded
//! from the reference config.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use amf_config::{
    CdlTransform, ColorSpace, ColorSpaceTransform, Config, DisplayViewTransform, FileTransform,
    Interpolation, Look, LookTransform, NamedTransform, SharedView, Transform, TransformDirection,
    USE_DISPLAY_NAME,
};

use crate::error::{AmfError, AmfResult};
use crate::model::{
    marker_section, tag_eq, tags, AmfDocument, NestedTransformRecord, TransformRecord,
    CDL_NODE_TAGS, LOOK_CONTAINER_TAGS, NESTED_TRANSFORM_TAGS,
};
use crate::resolver::Resolver;
use crate::AmfInfo;

/// The ACES interchange color space.
pub(crate) const ACES: &str = "ACES2065-1";
/// Name of the seed look every built config carries.
pub(crate) const ACES_LOOK_NAME: &str = "ACES Look Transform";
/// Environment variable routing shot looks into views.
pub(crate) const CONTEXT_NAME: &str = "SHOT_LOOKS";

/// Checks that a reference config is usable: major version 2, minor >= 3.
pub(crate) fn check_reference(reference: &Config) -> AmfResult<()> {
    let version = reference.version();
    if version.major != 2 || version.minor < 3 {
        return Err(AmfError::UnsupportedRefVersion {
            line: 0,
            version: version.to_string(),
        });
    }
    Ok(())
}

/// Builds the AMF config and summary from a parsed document.
pub(crate) fn build(
    reference: &Config,
    doc: &AmfDocument,
    amf_path: &Path,
) -> AmfResult<(Config, AmfInfo)> {
    let mut builder = Builder::new(reference, doc, amf_path);
    builder.process_clip_id(doc, amf_path);
    builder.init_config()?;
    builder.process_input_transform(doc)?;
    builder.process_output_transform(doc)?;
    builder.process_look_transforms(doc)?;
    builder.reassemble_working_space(doc)?;
    builder.finish(doc)
}

/// Mutable state shared by the translation passes.
pub(crate) struct Builder<'a> {
    pub(crate) resolver: Resolver<'a>,
    pub(crate) config: Config,
    pub(crate) info: AmfInfo,
    pub(crate) clip_name: String,
    pub(crate) amf_dir: PathBuf,
    /// Line number attributed to post-parse errors.
    pub(crate) line: usize,
}

impl<'a> Builder<'a> {
    fn new(reference: &'a Config, doc: &AmfDocument, amf_path: &Path) -> Self {
        let amf_dir = amf_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            resolver: Resolver::new(reference),
            config: Config::raw(),
            info: AmfInfo::default(),
            clip_name: String::new(),
            amf_dir,
            line: doc.lines,
        }
    }

    fn clip_family(&self) -> String {
        format!("AMF/{}", self.clip_name)
    }

    // ------------------------------------------------------------------
    // Clip identity
    // ------------------------------------------------------------------

    fn process_clip_id(&mut self, doc: &AmfDocument, amf_path: &Path) {
        // First clipName or uuid sub-element in document order.
        let mut clip_name = doc
            .clip_id
            .sub_elements
            .iter()
            .find(|(tag, _)| tag_eq(tag, tags::CLIP_NAME) || tag_eq(tag, tags::UUID))
            .map(|(_, value)| value.clone())
            .unwrap_or_default();

        if clip_name.is_empty() {
            clip_name = amf_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string();
        }
        if clip_name.is_empty() {
            clip_name = "AMF Clip Name".to_string();
        }

        debug!(clip = %clip_name, "clip identity");
        self.info.clip_name = clip_name.clone();
        self.clip_name = clip_name;
    }

    // ------------------------------------------------------------------
    // Initialization
    // ------------------------------------------------------------------

    fn init_config(&mut self) -> AmfResult<()> {
        let reference = self.resolver.reference();

        self.config.set_version(2, 3);
        self.config.remove_display_view("sRGB", "Raw");
        self.config.remove_colorspace("Raw");

        let aces = reference
            .colorspace(ACES)
            .ok_or(AmfError::MissingRefAces { line: self.line })?;
        self.config.add_colorspace(aces.clone());
        for name in ["ACEScg", "ACEScct", "CIE-XYZ-D65", "Raw"] {
            if let Some(cs) = reference.colorspace(name) {
                self.config.add_colorspace(cs.clone());
            }
        }
        self.config.set_inactive_colorspaces(vec!["CIE-XYZ-D65".into()]);

        self.config.set_role("scene_linear", "ACEScg");
        self.config.set_role("aces_interchange", ACES);
        self.config.set_role("cie_xyz_d65_interchange", "CIE-XYZ-D65");
        self.config.set_role("color_timing", "ACEScct");
        self.config.set_role("compositing_log", "ACEScct");
        self.config.unset_role("default");

        self.config.set_default_file_rule_colorspace(ACES);

        let seed = Look::new(ACES_LOOK_NAME)
            .process_space(ACES)
            .transform(Transform::ColorSpace(ColorSpaceTransform {
                src: format!("${}", CONTEXT_NAME),
                dst: ACES.into(),
                data_bypass: true,
                direction: TransformDirection::Forward,
            }));
        self.config.add_look(seed);

        self.config.add_environment_var(CONTEXT_NAME, ACES);
        self.config.add_search_path(self.amf_dir.clone());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Input transform
    // ------------------------------------------------------------------

    fn process_input_transform(&mut self, doc: &AmfDocument) -> AmfResult<()> {
        let resolver = self.resolver;
        let input = &doc.input;

        if input.is_empty() {
            self.info.input_colorspace_name = ACES.to_string();
            return Ok(());
        }

        for (tag, value) in &input.tld_elements {
            if tag_eq(tag, tags::TRANSFORM_ID) {
                if let Some(cs) = resolver.search_colorspaces(value) {
                    self.config.add_colorspace(cs.clone());
                    self.info.input_colorspace_name = cs.name().to_string();
                    if let Some(linear) = resolver.linear_companion(cs.name()) {
                        self.config.add_colorspace(linear.clone());
                    }
                }
            } else if tag_eq(tag, tags::FILE) {
                self.check_lut_path(value)?;
                let name = format!("AMF Input Transform -- {}", self.clip_name);
                let cs = ColorSpace::builder(&name)
                    .family(self.clip_family())
                    .category("file-io")
                    .to_reference(Transform::FileTransform(FileTransform {
                        src: PathBuf::from(value),
                        ccc_id: None,
                        interpolation: Interpolation::Best,
                        direction: TransformDirection::Forward,
                    }))
                    .build();
                self.config.add_colorspace(cs);
                self.info.input_colorspace_name = name;
            }
        }

        if let Some(section) =
            marker_section(&input.record.sub_elements, tags::INVERSE_ODT, NESTED_TRANSFORM_TAGS)
        {
            for (tag, value) in section {
                if tag_eq(tag, tags::TRANSFORM_ID) {
                    self.process_output_transform_id(value, TransformDirection::Inverse)?;
                } else if tag_eq(tag, tags::FILE) {
                    let name = format!("AMF Input Transform LUT -- {}", self.clip_name);
                    self.build_lut_display(
                        input,
                        value,
                        tags::INVERSE_RRT,
                        TransformDirection::Inverse,
                        &name,
                    )?;
                    self.info.input_colorspace_name = name;
                }
            }
        }

        if self.info.input_colorspace_name.is_empty() {
            return Err(AmfError::MissingInputTransform { line: self.line });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Output transform
    // ------------------------------------------------------------------

    fn process_output_transform(&mut self, doc: &AmfDocument) -> AmfResult<()> {
        let output = &doc.output;

        if output.is_empty() {
            // No output transform: a dummy display so the config still has
            // an active display/view, plus the un-tone-mapped rendering.
            if let Some(vt) = self.resolver.reference().view_transform("Un-tone-mapped") {
                self.config.add_view_transform(vt.clone());
            }
            self.config.add_display_view("None", "Raw", "Raw", None);
            self.config.set_active_displays(vec!["None".into()]);
            self.config.set_active_views(vec!["Raw".into()]);
            return Ok(());
        }

        for (tag, value) in &output.tld_elements {
            if tag_eq(tag, tags::TRANSFORM_ID) {
                self.process_output_transform_id(value, TransformDirection::Forward)?;
                return Ok(());
            } else if tag_eq(tag, tags::FILE) {
                self.check_lut_path(value)?;
                let name = format!("AMF Output Transform LUT -- {}", self.clip_name);
                let cs = ColorSpace::builder(&name)
                    .family(self.clip_family())
                    .category("file-io")
                    .from_reference(Transform::FileTransform(FileTransform {
                        src: PathBuf::from(value),
                        ccc_id: None,
                        interpolation: Interpolation::Best,
                        direction: TransformDirection::Forward,
                    }))
                    .build();
                let display_name = description_of(output).unwrap_or_default().to_string();
                self.config.add_display_view(&display_name, &name, &name, Some(ACES_LOOK_NAME));
                self.config.add_colorspace(cs);
                self.config.add_inactive_colorspace(&name);
                self.config.set_active_displays(vec![display_name]);
                self.config.set_active_views(vec![name]);
                return Ok(());
            }
        }

        if let Some(section) =
            marker_section(&output.record.sub_elements, tags::ODT, NESTED_TRANSFORM_TAGS)
        {
            for (tag, value) in section {
                if tag_eq(tag, tags::TRANSFORM_ID) {
                    self.process_output_transform_id(value, TransformDirection::Forward)?;
                } else if tag_eq(tag, tags::FILE) {
                    let name = format!("AMF Output Transform LUT -- {}", self.clip_name);
                    self.build_lut_display(
                        output,
                        value,
                        tags::RRT,
                        TransformDirection::Forward,
                        &name,
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Resolves an output transform id against the reference config and
    /// binds the display/view pair it describes.
    fn process_output_transform_id(
        &mut self,
        transform_id: &str,
        direction: TransformDirection,
    ) -> AmfResult<()> {
        let resolver = self.resolver;
        let (Some(dcs), Some(vt)) = (
            resolver.search_colorspaces(transform_id),
            resolver.search_view_transforms(transform_id),
        ) else {
            debug!(transform_id, "output transform id did not resolve");
            return Ok(());
        };

        self.config.add_colorspace(dcs.clone());
        self.config.add_view_transform(vt.clone());

        self.config.add_shared_view(SharedView {
            name: vt.name().to_string(),
            view_transform: vt.name().to_string(),
            colorspace: USE_DISPLAY_NAME.to_string(),
            looks: ACES_LOOK_NAME.to_string(),
        });
        self.config.add_display_shared_view(dcs.name(), vt.name());

        if direction == TransformDirection::Inverse {
            let name = format!("AMF Input Transform -- {}", self.clip_name);
            let cs = ColorSpace::builder(&name)
                .family(self.clip_family())
                .category("file-io")
                .to_reference(Transform::DisplayView(DisplayViewTransform {
                    src: ACES.into(),
                    display: dcs.name().to_string(),
                    view: vt.name().to_string(),
                    looks_bypass: true,
                    direction: TransformDirection::Inverse,
                }))
                .build();
            self.config.add_colorspace(cs);
            self.info.input_colorspace_name = name;
        } else {
            self.config.set_active_displays(vec![dcs.name().to_string()]);
            self.config.set_active_views(vec![vt.name().to_string()]);
        }
        Ok(())
    }

    /// Builds a LUT-backed display color space from an ODT file plus an
    /// optional RRT file found in its own marker section, composed as
    /// `[RRT, ODT]` in the from-reference direction.
    fn build_lut_display(
        &mut self,
        record: &NestedTransformRecord,
        odt_file: &str,
        rrt_marker: &str,
        direction: TransformDirection,
        cs_name: &str,
    ) -> AmfResult<()> {
        self.check_lut_path(odt_file)?;
        let odt_ft = Transform::FileTransform(FileTransform {
            src: PathBuf::from(odt_file),
            ccc_id: None,
            interpolation: Interpolation::Best,
            direction,
        });

        let rrt_file = marker_section(&record.record.sub_elements, rrt_marker, NESTED_TRANSFORM_TAGS)
            .and_then(|section| {
                section
                    .iter()
                    .find(|(tag, _)| tag_eq(tag, tags::FILE))
                    .map(|(_, value)| value.clone())
            });

        let mut transforms = Vec::new();
        if let Some(rrt_file) = rrt_file {
            self.check_lut_path(&rrt_file)?;
            transforms.push(Transform::FileTransform(FileTransform {
                src: PathBuf::from(rrt_file),
                ccc_id: None,
                interpolation: Interpolation::Best,
                direction,
            }));
        }
        transforms.push(odt_ft);

        let cs = ColorSpace::builder(cs_name)
            .family(self.clip_family())
            .category("file-io")
            .from_reference(Transform::group(transforms))
            .build();

        let display_name = description_of(record).unwrap_or_default().to_string();
        self.config
            .add_display_view(&display_name, cs_name, cs_name, Some(ACES_LOOK_NAME));
        self.config.add_colorspace(cs);
        self.config.add_inactive_colorspace(cs_name);
        self.config.set_active_displays(vec![display_name]);
        self.config.set_active_views(vec![cs_name.to_string()]);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Looks
    // ------------------------------------------------------------------

    fn process_look_transforms(&mut self, doc: &AmfDocument) -> AmfResult<()> {
        self.info.num_looks_applied = 0;
        for (idx, look) in doc.looks.iter().enumerate() {
            let applied =
                self.process_look_transform(look, idx + 1, doc.num_looks_before_working_location)?;
            if applied {
                self.info.num_looks_applied += 1;
            }
        }

        // Combine all unapplied looks into one named transform for views.
        let unapplied: Vec<String> = self
            .config
            .looks()
            .names()
            .filter(|name| !name.contains("Applied)") && *name != ACES_LOOK_NAME)
            .map(str::to_string)
            .collect();

        if !unapplied.is_empty() {
            let group = Transform::group(
                unapplied
                    .iter()
                    .map(|look_name| {
                        Transform::Look(LookTransform {
                            src: ACES.into(),
                            dst: ACES.into(),
                            looks: look_name.clone(),
                            skip_colorspace_conversion: false,
                            direction: TransformDirection::Forward,
                        })
                    })
                    .collect(),
            );
            let name = format!("AMF Unapplied Look Transforms -- {}", self.clip_name);
            self.config.add_named_transform(
                NamedTransform::new(&name)
                    .family(self.clip_family())
                    .forward(group),
            );
            self.config.add_environment_var(CONTEXT_NAME, name);
        }
        Ok(())
    }

    /// Translates one lookTransform record. Returns whether the look was
    /// already applied to pixels.
    fn process_look_transform(
        &mut self,
        look: &TransformRecord,
        index: usize,
        num_looks_before_working_location: Option<usize>,
    ) -> AmfResult<bool> {
        let resolver = self.resolver;
        let was_applied = !must_apply(look);

        let location = num_looks_before_working_location.map(|n| {
            if index <= n {
                "Pre-working-location"
            } else {
                "Post-working-location"
            }
        });
        let qualifier = match (location, was_applied) {
            (Some(loc), true) => format!(" ({loc} and Applied)"),
            (Some(loc), false) => format!(" ({loc})"),
            (None, true) => " (Applied)".to_string(),
            (None, false) => String::new(),
        };
        let look_name = format!("AMF Look {index}{qualifier} -- {}", self.clip_name);

        for (tag, value) in &look.sub_elements {
            if tag_eq(tag, tags::TRANSFORM_ID) {
                if let Some(mut lk) = resolver.search_look_transforms(value) {
                    lk.set_name(&look_name);
                    self.config.add_look(lk);
                    return Ok(was_applied);
                }
            } else if tag_eq(tag, tags::FILE) {
                let mut description = look.find(tags::DESCRIPTION).unwrap_or_default().to_string();
                let ccc_id = look.find(tags::CDL_CCR).unwrap_or_default().to_string();
                if !ccc_id.is_empty() {
                    description += &format!(" ({ccc_id})");
                }

                self.check_lut_path(value)?;
                let ft = Transform::FileTransform(FileTransform {
                    src: PathBuf::from(value),
                    ccc_id: (!ccc_id.is_empty()).then_some(ccc_id),
                    interpolation: Interpolation::Best,
                    direction: TransformDirection::Forward,
                });

                self.config.add_look(
                    Look::new(&look_name)
                        .process_space(ACES)
                        .transform(ft)
                        .description(description),
                );
                return Ok(was_applied);
            }
        }

        // No transformId or file: scan for an inline ASC CDL.
        let mut has_cdl = false;
        let mut slope = "";
        let mut offset = "";
        let mut power = "";
        let mut saturation = "";

        for marker in [tags::SOP_NODE, tags::ASC_SOP] {
            if let Some(section) = marker_section(&look.sub_elements, marker, LOOK_CONTAINER_TAGS) {
                has_cdl = true;
                for (tag, value) in section {
                    if tag_eq(tag, tags::SLOPE) {
                        slope = value;
                    } else if tag_eq(tag, tags::OFFSET) {
                        offset = value;
                    } else if tag_eq(tag, tags::POWER) {
                        power = value;
                    }
                }
            }
        }
        for marker in [tags::SAT_NODE, tags::ASC_SAT] {
            if let Some(section) = marker_section(&look.sub_elements, marker, LOOK_CONTAINER_TAGS) {
                has_cdl = true;
                for (tag, value) in section {
                    if tag_eq(tag, tags::SATURATION) {
                        saturation = value;
                    }
                }
            }
        }

        if !has_cdl {
            return Ok(false);
        }

        let cdl = Transform::Cdl(CdlTransform {
            slope: extract_three_floats(slope),
            offset: extract_three_floats(offset),
            power: extract_three_floats(power),
            saturation: parse_saturation(saturation),
            direction: TransformDirection::Forward,
        });

        let to_transform = self.load_cdl_ws_transform(look, true)?;
        let from_transform = self.load_cdl_ws_transform(look, false)?;

        let transforms = match (to_transform, from_transform) {
            (None, None) => vec![cdl],
            (Some(to), Some(from)) => vec![to, cdl, from],
            (Some(to), None) => vec![to.clone(), cdl, to.inverse()],
            (None, Some(from)) => vec![from.clone().inverse(), cdl, from],
        };

        self.config.add_look(
            Look::new(&look_name)
                .process_space(ACES)
                .transform(Transform::group(transforms))
                .description("ASC CDL"),
        );
        Ok(was_applied)
    }

    /// Loads the to- or from-working-space half of a `cdlWorkingSpace`
    /// definition: either a color-space transform identified by a reference
    /// transform id, or a LUT file transform.
    fn load_cdl_ws_transform(
        &mut self,
        look: &TransformRecord,
        is_to: bool,
    ) -> AmfResult<Option<Transform>> {
        let resolver = self.resolver;
        let Some(ws) = marker_section(&look.sub_elements, tags::CDL_WORKING_SPACE, CDL_NODE_TAGS)
        else {
            return Ok(None);
        };

        let (marker, stop) = if is_to {
            (tags::TO_CDL_WS, tags::FROM_CDL_WS)
        } else {
            (tags::FROM_CDL_WS, tags::TO_CDL_WS)
        };
        let Some(section) = marker_section(ws, marker, &[stop]) else {
            return Ok(None);
        };

        for (tag, value) in section {
            if tag_eq(tag, tags::TRANSFORM_ID) {
                let Some(cs) = resolver.search_colorspaces(value) else {
                    continue;
                };
                let cs = cs.clone();
                let (src, dst) = if is_to {
                    (ACES.to_string(), cs.name().to_string())
                } else {
                    (cs.name().to_string(), ACES.to_string())
                };
                self.config.add_colorspace(cs);
                return Ok(Some(Transform::ColorSpace(ColorSpaceTransform {
                    src,
                    dst,
                    data_bypass: false,
                    direction: TransformDirection::Forward,
                })));
            } else if tag_eq(tag, tags::FILE) {
                self.check_lut_path(value)?;
                return Ok(Some(Transform::FileTransform(FileTransform {
                    src: PathBuf::from(value),
                    ccc_id: None,
                    interpolation: Interpolation::Best,
                    direction: TransformDirection::Forward,
                })));
            }
        }
        Ok(None)
    }

    // ------------------------------------------------------------------
    // Finalization
    // ------------------------------------------------------------------

    fn finish(mut self, doc: &AmfDocument) -> AmfResult<(Config, AmfInfo)> {
        self.info.display_name = self.config.active_displays().join(", ");
        self.info.view_name = self.config.active_views().join(", ");
        self.determine_clip_colorspace(doc);

        let role = format!("amf_clip_{}", sanitize_clip_name(&self.clip_name));
        self.config
            .set_role(&role, self.info.clip_colorspace_name.clone());
        self.info.clip_identifier = role;

        self.config.validate().map_err(|source| AmfError::Config {
            line: self.line,
            source,
        })?;

        info!(
            clip = %self.info.clip_name,
            input = %self.info.input_colorspace_name,
            display = %self.info.display_name,
            "AMF config built"
        );
        Ok((self.config, self.info))
    }

    /// Answers "which color space are the pixels currently in?" after
    /// considering what was already applied.
    fn determine_clip_colorspace(&mut self, doc: &AmfDocument) {
        let must_apply_input = must_apply(&doc.input.record);
        let must_apply_output = must_apply(&doc.output.record);

        self.info.clip_colorspace_name = if !must_apply_output {
            let display = self
                .config
                .active_displays()
                .first()
                .cloned()
                .unwrap_or_default();
            if self.config.colorspace(&display).is_some() {
                display
            } else {
                // LUT-based outputs use the file description as display
                // name; fall through to the active view's target space.
                self.active_view_colorspace().unwrap_or(display)
            }
        } else if must_apply_input {
            self.info.input_colorspace_name.clone()
        } else {
            ACES.to_string()
        };
    }

    /// Target color space of the active display's active view.
    fn active_view_colorspace(&self) -> Option<String> {
        let display_name = self.config.active_displays().first()?;
        let view_name = self.config.active_views().first()?;
        let display = self.config.displays().display(display_name)?;
        if let Some(view) = display.view(view_name) {
            return Some(view.colorspace().to_string());
        }
        let shared = self.config.displays().shared_view(view_name)?;
        if shared.colorspace == USE_DISPLAY_NAME {
            Some(display_name.clone())
        } else {
            Some(shared.colorspace.clone())
        }
    }

    /// Verifies a LUT path is readable, either as given or relative to the
    /// AMF document's directory.
    fn check_lut_path(&self, lut_path: &str) -> AmfResult<()> {
        if std::fs::File::open(lut_path).is_ok() {
            return Ok(());
        }
        if std::fs::File::open(self.amf_dir.join(lut_path)).is_ok() {
            return Ok(());
        }
        Err(AmfError::InvalidLutPath {
            line: self.line,
            path: PathBuf::from(lut_path),
        })
    }
}

// ----------------------------------------------------------------------
// Record helpers
// ----------------------------------------------------------------------

/// Whether the record's transform still has to be applied to pixels: only
/// a case-insensitive `applied="true"` marks it as already applied.
pub(crate) fn must_apply(record: &TransformRecord) -> bool {
    match record.attribute("applied") {
        Some(value) if value.eq_ignore_ascii_case("true") => false,
        _ => true,
    }
}

/// The record's `aces:description` value, checking the outer transform's
/// elements first and the nested-transform elements second.
fn description_of(record: &NestedTransformRecord) -> Option<&str> {
    record
        .tld_elements
        .iter()
        .chain(record.record.sub_elements.iter())
        .find(|(tag, _)| tag_eq(tag, tags::DESCRIPTION))
        .map(|(_, value)| value.as_str())
}

/// Splits a whitespace-separated triple; missing or unparseable entries
/// become 0.0.
fn extract_three_floats(text: &str) -> [f64; 3] {
    let mut values = text.split_whitespace().map(|part| part.parse().unwrap_or(0.0));
    [
        values.next().unwrap_or(0.0),
        values.next().unwrap_or(0.0),
        values.next().unwrap_or(0.0),
    ]
}

/// Parses a CDL saturation; a missing or empty value falls back to 1.0,
/// the ASC CDL identity.
fn parse_saturation(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 1.0;
    }
    text.parse().unwrap_or(1.0)
}

/// Strips every character outside `[0-9A-Za-z_]` from a clip name.
pub(crate) fn sanitize_clip_name(clip_name: &str) -> String {
    clip_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn must_apply_defaults_true() {
        let mut record = TransformRecord::default();
        assert!(must_apply(&record));

        // An explicit "false" still means the transform must be applied.
        record.add_attribute("applied", "false");
        assert!(must_apply(&record));
    }

    #[test]
    fn must_apply_true_is_case_insensitive() {
        let mut record = TransformRecord::default();
        record.add_attribute("Applied", "TRUE");
        assert!(!must_apply(&record));
    }

    #[test]
    fn extract_three_floats_parses_triple() {
        assert_eq!(extract_three_floats("1.1 1.0 0.9"), [1.1, 1.0, 0.9]);
        assert_eq!(extract_three_floats("  -.03\t2e-2 0 "), [-0.03, 0.02, 0.0]);
        assert_eq!(extract_three_floats(""), [0.0, 0.0, 0.0]);
        assert_eq!(extract_three_floats("1.5"), [1.5, 0.0, 0.0]);
    }

    #[test]
    fn saturation_defaults_to_identity() {
        assert_eq!(parse_saturation(""), 1.0);
        assert_eq!(parse_saturation("  "), 1.0);
        assert_eq!(parse_saturation("1.2"), 1.2);
    }

    #[test]
    fn sanitize_strips_non_alnum() {
        assert_eq!(sanitize_clip_name("shot 010 (v2)"), "shot010v2");
        assert_eq!(sanitize_clip_name("A001_C002_0815"), "A001_C002_0815");
        assert_eq!(sanitize_clip_name("日本語 clip"), "clip");
    }

    #[test]
    fn reference_version_check() {
        let mut reference = amf_config::builtin::studio_config();
        assert!(check_reference(&reference).is_ok());

        reference.set_version(2, 2);
        assert!(matches!(
            check_reference(&reference),
            Err(AmfError::UnsupportedRefVersion { .. })
        ));

        reference.set_version(1, 7);
        assert!(check_reference(&reference).is_err());
    }
}
