//! End-to-end compilation scenarios.

use std::path::{Path, PathBuf};

use amf_compiler::{AmfCompiler, AmfError, Compiled};
use amf_config::{builtin, Transform, TransformDirection};

const LOGC3_ID: &str = "urn:ampas:aces:transformId:v1.5:IDT.ARRI.LogC3.a1.v1";
const REC709_ODT_ID: &str = "urn:ampas:aces:transformId:v1.5:ODT.Academy.Rec709_100nits_dim.a1.0.3";
const ACESCCT_CSC_ID: &str = "urn:ampas:aces:transformId:v1.5:ACEScsc.Academy.ACEScct_to_ACES.a1.0.3";

fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("amf_compiler_tests").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_amf(dir: &Path, file_name: &str, pipeline_body: &str) -> PathBuf {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<aces:asset xmlns:aces="urn:ampas:aces:amf:v1.0" xmlns:cdl="urn:ASC:CDL:v1.01">
  <aces:clipId>
    <aces:clipName>clip_010</aces:clipName>
  </aces:clipId>
  <aces:pipeline>
{pipeline_body}
  </aces:pipeline>
</aces:asset>
"#
    );
    let path = dir.join(file_name);
    std::fs::write(&path, xml).unwrap();
    path
}

fn compile(path: &Path) -> Compiled {
    AmfCompiler::new().compile(path).unwrap()
}

fn input_and_output() -> String {
    format!(
        r#"    <aces:inputTransform>
      <aces:transformId>{LOGC3_ID}</aces:transformId>
    </aces:inputTransform>
    <aces:outputTransform>
      <aces:transformId>{REC709_ODT_ID}</aces:transformId>
    </aces:outputTransform>"#
    )
}

// ----------------------------------------------------------------------
// S1: transformId input and output, no looks
// ----------------------------------------------------------------------

#[test]
fn transform_id_input_and_output() {
    let dir = test_dir("s1");
    let path = write_amf(&dir, "s1.amf", &input_and_output());
    let compiled = compile(&path);

    assert_eq!(compiled.info.input_colorspace_name, "ARRI LogC3 (EI800)");
    assert!(compiled.config.colorspace("ARRI LogC3 (EI800)").is_some());
    assert!(compiled.config.colorspace("Linear ARRI Wide Gamut 3").is_some());

    assert_eq!(compiled.info.display_name, "Rec.709 - Display");
    assert_eq!(compiled.info.view_name, "ACES 1.0 - SDR Video");

    // Only the seed look.
    assert_eq!(compiled.config.looks().len(), 1);
    assert!(compiled.config.look("ACES Look Transform").is_some());

    // Nothing applied yet: pixels are in the input space.
    assert_eq!(compiled.info.clip_colorspace_name, "ARRI LogC3 (EI800)");
    assert_eq!(compiled.info.num_looks_applied, 0);
}

#[test]
fn round_trip_names_match_reference() {
    let dir = test_dir("s1_roundtrip");
    let path = write_amf(&dir, "s1.amf", &input_and_output());
    let compiled = compile(&path);

    let reference = builtin::studio_config();
    let cs = reference
        .colorspaces()
        .iter()
        .find(|cs| cs.description().contains(LOGC3_ID))
        .unwrap();
    assert_eq!(compiled.info.input_colorspace_name, cs.name());

    let vt = reference
        .view_transforms()
        .iter()
        .find(|vt| vt.description().contains(REC709_ODT_ID))
        .unwrap();
    assert_eq!(compiled.info.view_name, vt.name());
}

// ----------------------------------------------------------------------
// S2: unapplied CDL look
// ----------------------------------------------------------------------

fn cdl_look(applied: bool) -> String {
    let applied = if applied { " applied=\"true\"" } else { "" };
    format!(
        r#"    <aces:lookTransform{applied}>
      <aces:description>Warm</aces:description>
      <cdl:SOPNode>
        <cdl:Slope>1.1 1.0 0.9</cdl:Slope>
        <cdl:Offset>0.0 0.0 0.0</cdl:Offset>
        <cdl:Power>1.0 1.0 1.0</cdl:Power>
      </cdl:SOPNode>
      <cdl:SatNode>
        <cdl:Saturation>1.2</cdl:Saturation>
      </cdl:SatNode>
    </aces:lookTransform>"#
    )
}

#[test]
fn unapplied_cdl_look() {
    let dir = test_dir("s2");
    let pipeline = format!("{}\n{}", input_and_output(), cdl_look(false));
    let path = write_amf(&dir, "s2.amf", &pipeline);
    let compiled = compile(&path);

    assert_eq!(compiled.config.looks().len(), 2);
    let look = compiled.config.look("AMF Look 1 -- clip_010").unwrap();
    assert_eq!(look.get_description(), "ASC CDL");
    assert_eq!(look.get_process_space(), Some("ACES2065-1"));

    let Some(Transform::Group(group)) = look.get_transform() else {
        panic!("CDL look should hold a group transform");
    };
    assert_eq!(group.len(), 1);
    let Transform::Cdl(cdl) = &group.transforms[0] else {
        panic!("expected a CDL transform");
    };
    assert_eq!(cdl.slope, [1.1, 1.0, 0.9]);
    assert_eq!(cdl.saturation, 1.2);

    let nt = compiled
        .config
        .named_transform("AMF Unapplied Look Transforms -- clip_010")
        .unwrap();
    let Some(Transform::Group(group)) = nt.forward_transform() else {
        panic!("unapplied looks should compose a group");
    };
    assert_eq!(group.len(), 1);

    assert_eq!(
        compiled.config.environment_var("SHOT_LOOKS"),
        Some("AMF Unapplied Look Transforms -- clip_010")
    );
    assert_eq!(compiled.info.num_looks_applied, 0);
}

// ----------------------------------------------------------------------
// S3: applied look
// ----------------------------------------------------------------------

#[test]
fn applied_look_skips_unapplied_transform() {
    let dir = test_dir("s3");
    let pipeline = format!("{}\n{}", input_and_output(), cdl_look(true));
    let path = write_amf(&dir, "s3.amf", &pipeline);
    let compiled = compile(&path);

    assert_eq!(compiled.config.looks().len(), 2);
    assert!(compiled.config.look("AMF Look 1 (Applied) -- clip_010").is_some());
    assert!(compiled
        .config
        .named_transform("AMF Unapplied Look Transforms -- clip_010")
        .is_none());
    assert_eq!(compiled.config.environment_var("SHOT_LOOKS"), Some("ACES2065-1"));
    assert_eq!(compiled.info.num_looks_applied, 1);
}

// ----------------------------------------------------------------------
// S4: workingLocation after one unapplied look
// ----------------------------------------------------------------------

#[test]
fn working_location_after_unapplied_look() {
    let dir = test_dir("s4");
    let pipeline = format!(
        "{}\n{}\n    <aces:workingLocation/>",
        input_and_output(),
        cdl_look(false)
    );
    let path = write_amf(&dir, "s4.amf", &pipeline);
    let compiled = compile(&path);

    let look_name = "AMF Look 1 (Pre-working-location) -- clip_010";
    assert!(compiled.config.look(look_name).is_some());

    let nt = compiled
        .config
        .named_transform("AMF Clip to Working Space Transform -- clip_010")
        .unwrap();
    let Some(Transform::Group(group)) = nt.forward_transform() else {
        panic!("clip-to-working-space should compose a group");
    };
    assert_eq!(group.len(), 2);

    let Transform::ColorSpace(cst) = &group.transforms[0] else {
        panic!("expected the input conversion first");
    };
    assert_eq!(cst.src, "ARRI LogC3 (EI800)");
    assert_eq!(cst.dst, "ACES2065-1");
    assert!(cst.data_bypass);
    assert_eq!(cst.direction, TransformDirection::Forward);

    let Transform::Look(lt) = &group.transforms[1] else {
        panic!("expected the pre-working-location look second");
    };
    assert_eq!(lt.looks, look_name);
    assert_eq!(lt.direction, TransformDirection::Forward);
}

#[test]
fn working_location_at_position_zero_undoes_applied_look() {
    let dir = test_dir("s4_zero");
    let pipeline = format!(
        "{}\n    <aces:workingLocation/>\n{}",
        input_and_output(),
        cdl_look(true)
    );
    let path = write_amf(&dir, "s4_zero.amf", &pipeline);
    let compiled = compile(&path);

    let look_name = "AMF Look 1 (Post-working-location and Applied) -- clip_010";
    assert!(compiled.config.look(look_name).is_some());

    let nt = compiled
        .config
        .named_transform("AMF Clip to Working Space Transform -- clip_010")
        .unwrap();
    let Some(Transform::Group(group)) = nt.forward_transform() else {
        panic!("clip-to-working-space should compose a group");
    };
    // The applied look past the working location is undone.
    assert_eq!(group.len(), 1);
    let Transform::Look(lt) = &group.transforms[0] else {
        panic!("expected an inverse look transform");
    };
    assert_eq!(lt.looks, look_name);
    assert_eq!(lt.direction, TransformDirection::Inverse);
}

// ----------------------------------------------------------------------
// S5: file-based input transform with relative LUT path
// ----------------------------------------------------------------------

#[test]
fn file_input_transform_resolves_relative_path() {
    let dir = test_dir("s5");
    std::fs::create_dir_all(dir.join("cube")).unwrap();
    std::fs::write(dir.join("cube/foo.cube"), "LUT_3D_SIZE 2\n").unwrap();

    let pipeline = format!(
        r#"    <aces:inputTransform>
      <aces:file>./cube/foo.cube</aces:file>
    </aces:inputTransform>
    <aces:outputTransform>
      <aces:transformId>{REC709_ODT_ID}</aces:transformId>
    </aces:outputTransform>"#
    );
    let path = write_amf(&dir, "s5.amf", &pipeline);
    let compiled = compile(&path);

    assert_eq!(
        compiled.info.input_colorspace_name,
        "AMF Input Transform -- clip_010"
    );
    let cs = compiled
        .config
        .colorspace("AMF Input Transform -- clip_010")
        .unwrap();
    assert_eq!(cs.family(), "AMF/clip_010");
    assert_eq!(cs.categories(), ["file-io"]);

    let Some(Transform::FileTransform(ft)) = cs.to_reference() else {
        panic!("file input should install a file transform to reference");
    };
    assert_eq!(ft.src, PathBuf::from("./cube/foo.cube"));

    assert!(compiled.config.search_paths().contains(&dir));
}

#[test]
fn missing_lut_path_is_fatal() {
    let dir = test_dir("s5_missing");
    let pipeline = r#"    <aces:inputTransform>
      <aces:file>./does/not/exist.cube</aces:file>
    </aces:inputTransform>"#;
    let path = write_amf(&dir, "s5_missing.amf", pipeline);

    let err = AmfCompiler::new().compile(&path).unwrap_err();
    assert!(matches!(err, AmfError::InvalidLutPath { .. }));
}

// ----------------------------------------------------------------------
// S6: reference config too old
// ----------------------------------------------------------------------

#[test]
fn old_reference_config_is_rejected() {
    let dir = test_dir("s6");
    let path = write_amf(&dir, "s6.amf", &input_and_output());

    let mut reference = builtin::studio_config();
    reference.set_version(2, 2);
    let err = AmfCompiler::with_reference(reference).compile(&path).unwrap_err();
    assert!(matches!(err, AmfError::UnsupportedRefVersion { .. }));
}

// ----------------------------------------------------------------------
// Boundary cases
// ----------------------------------------------------------------------

#[test]
fn absent_input_and_output() {
    let dir = test_dir("empty");
    let path = write_amf(&dir, "empty.amf", "");
    let compiled = compile(&path);

    assert_eq!(compiled.info.input_colorspace_name, "ACES2065-1");
    assert_eq!(compiled.info.clip_colorspace_name, "ACES2065-1");
    assert_eq!(compiled.info.display_name, "None");
    assert_eq!(compiled.info.view_name, "Raw");

    let displays = compiled.config.displays();
    assert_eq!(displays.displays().len(), 1);
    let none = displays.display("None").unwrap();
    assert!(none.has_view("Raw"));
    assert!(compiled.config.view_transform("Un-tone-mapped").is_some());
}

#[test]
fn sop_without_sat_defaults_saturation_to_identity() {
    let dir = test_dir("sop_only");
    let pipeline = format!(
        r#"{}
    <aces:lookTransform>
      <cdl:SOPNode>
        <cdl:Slope>1.1 1.0 0.9</cdl:Slope>
        <cdl:Offset>0.0 0.0 0.0</cdl:Offset>
        <cdl:Power>1.0 1.0 1.0</cdl:Power>
      </cdl:SOPNode>
    </aces:lookTransform>"#,
        input_and_output()
    );
    let path = write_amf(&dir, "sop_only.amf", &pipeline);
    let compiled = compile(&path);

    let look = compiled.config.look("AMF Look 1 -- clip_010").unwrap();
    let Some(Transform::Group(group)) = look.get_transform() else {
        panic!("CDL look should hold a group transform");
    };
    let Transform::Cdl(cdl) = &group.transforms[0] else {
        panic!("expected a CDL transform");
    };
    assert_eq!(cdl.saturation, 1.0);
}

#[test]
fn cdl_working_space_wraps_cdl() {
    let dir = test_dir("cdl_ws");
    let pipeline = format!(
        r#"{}
    <aces:lookTransform>
      <cdl:SOPNode>
        <cdl:Slope>1.2 1.0 0.8</cdl:Slope>
        <cdl:Offset>0.0 0.0 0.0</cdl:Offset>
        <cdl:Power>1.0 1.0 1.0</cdl:Power>
      </cdl:SOPNode>
      <aces:cdlWorkingSpace>
        <aces:toCdlWorkingSpace>
          <aces:transformId>{ACESCCT_CSC_ID}</aces:transformId>
        </aces:toCdlWorkingSpace>
      </aces:cdlWorkingSpace>
    </aces:lookTransform>"#,
        input_and_output()
    );
    let path = write_amf(&dir, "cdl_ws.amf", &pipeline);
    let compiled = compile(&path);

    let look = compiled.config.look("AMF Look 1 -- clip_010").unwrap();
    let Some(Transform::Group(group)) = look.get_transform() else {
        panic!("CDL look should hold a group transform");
    };
    // to, cdl, inverse(to)
    assert_eq!(group.len(), 3);
    let Transform::ColorSpace(to) = &group.transforms[0] else {
        panic!("expected the to-working-space conversion first");
    };
    assert_eq!(to.src, "ACES2065-1");
    assert_eq!(to.dst, "ACEScct");
    assert_eq!(to.direction, TransformDirection::Forward);
    assert!(matches!(&group.transforms[1], Transform::Cdl(_)));
    let Transform::ColorSpace(back) = &group.transforms[2] else {
        panic!("expected the inverse conversion last");
    };
    assert_eq!(back.direction, TransformDirection::Inverse);
}

#[test]
fn inverse_lut_input_composes_rrt_then_odt() {
    let dir = test_dir("lut_input");
    std::fs::write(dir.join("rrt_inv.cube"), "LUT_3D_SIZE 2\n").unwrap();
    std::fs::write(dir.join("odt_inv.cube"), "LUT_3D_SIZE 2\n").unwrap();

    let pipeline = format!(
        r#"    <aces:inputTransform>
      <aces:description>Show LUT pipeline</aces:description>
      <aces:inverseReferenceRenderingTransform>
        <aces:file>rrt_inv.cube</aces:file>
      </aces:inverseReferenceRenderingTransform>
      <aces:inverseOutputDeviceTransform>
        <aces:file>odt_inv.cube</aces:file>
      </aces:inverseOutputDeviceTransform>
    </aces:inputTransform>
    <aces:outputTransform>
      <aces:transformId>{REC709_ODT_ID}</aces:transformId>
    </aces:outputTransform>"#
    );
    let path = write_amf(&dir, "lut_input.amf", &pipeline);
    let compiled = compile(&path);

    let name = "AMF Input Transform LUT -- clip_010";
    assert_eq!(compiled.info.input_colorspace_name, name);
    let cs = compiled.config.colorspace(name).unwrap();

    let Some(Transform::Group(group)) = cs.from_reference() else {
        panic!("LUT input should compose a group from reference");
    };
    assert_eq!(group.len(), 2);
    let Transform::FileTransform(rrt) = &group.transforms[0] else {
        panic!("expected the RRT component first");
    };
    assert_eq!(rrt.src, PathBuf::from("rrt_inv.cube"));
    assert_eq!(rrt.direction, TransformDirection::Inverse);
    let Transform::FileTransform(odt) = &group.transforms[1] else {
        panic!("expected the ODT component second");
    };
    assert_eq!(odt.src, PathBuf::from("odt_inv.cube"));
    assert_eq!(odt.direction, TransformDirection::Inverse);

    // The LUT space is hidden and its display is named by the description.
    assert!(compiled
        .config
        .inactive_colorspaces()
        .iter()
        .any(|n| n == name));
    let display = compiled.config.displays().display("Show LUT pipeline").unwrap();
    assert!(display.has_view(name));
}

#[test]
fn clip_role_is_sanitized() {
    let dir = test_dir("role");
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<aces:asset xmlns:aces="urn:ampas:aces:amf:v1.0">
  <aces:clipId>
    <aces:clipName>shot 010 (v2)!</aces:clipName>
  </aces:clipId>
  <aces:pipeline>
{}
  </aces:pipeline>
</aces:asset>
"#,
        input_and_output()
    );
    let path = dir.join("role.amf");
    std::fs::write(&path, xml).unwrap();
    let compiled = compile(&path);

    assert_eq!(compiled.info.clip_identifier, "amf_clip_shot010v2");
    assert_eq!(compiled.info.clip_name, "shot 010 (v2)!");
    assert_eq!(
        compiled.config.roles().get("amf_clip_shot010v2"),
        Some(compiled.info.clip_colorspace_name.as_str())
    );
}

#[test]
fn clip_name_falls_back_to_file_stem() {
    let dir = test_dir("stem");
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<aces:asset xmlns:aces="urn:ampas:aces:amf:v1.0">
  <aces:pipeline>
{}
  </aces:pipeline>
</aces:asset>
"#,
        input_and_output()
    );
    let path = dir.join("A001_C002.amf");
    std::fs::write(&path, xml).unwrap();
    let compiled = compile(&path);

    assert_eq!(compiled.info.clip_name, "A001_C002");
    assert_eq!(compiled.info.clip_identifier, "amf_clip_A001_C002");
}

#[test]
fn compiling_twice_is_idempotent() {
    let dir = test_dir("idempotent");
    let pipeline = format!("{}\n{}", input_and_output(), cdl_look(false));
    let path = write_amf(&dir, "idempotent.amf", &pipeline);

    let compiler = AmfCompiler::new();
    let a = compiler.compile(&path).unwrap();
    let b = compiler.compile(&path).unwrap();

    let mut names_a: Vec<_> = a.config.colorspace_names().collect();
    let mut names_b: Vec<_> = b.config.colorspace_names().collect();
    names_a.sort_unstable();
    names_b.sort_unstable();
    assert_eq!(names_a, names_b);

    let looks_a: Vec<_> = a.config.looks().names().collect();
    let looks_b: Vec<_> = b.config.looks().names().collect();
    assert_eq!(looks_a, looks_b);

    assert_eq!(a.config.active_displays(), b.config.active_displays());
    assert_eq!(a.info.clip_identifier, b.info.clip_identifier);
}

#[test]
fn built_config_validates() {
    let dir = test_dir("validate");
    let pipeline = format!(
        "{}\n{}\n{}",
        input_and_output(),
        cdl_look(false),
        cdl_look(true)
    );
    let path = write_amf(&dir, "validate.amf", &pipeline);
    let compiled = compile(&path);

    // Revalidating the returned config finds nothing broken.
    assert!(compiled.config.validate().is_ok());
    // K looks in the AMF produce K+1 looks in the config.
    assert_eq!(compiled.config.looks().len(), 3);
}

#[test]
fn reference_config_from_file() {
    let dir = test_dir("ref_file");
    let yaml = r#"
ocio_profile_version: "2.3"
name: mini-reference

colorspaces:
  - name: ACES2065-1
    family: ACES
    encoding: scene-linear
    description: The ACES reference space

  - name: ACEScg
    family: ACES
    encoding: scene-linear
    description: ACES CG working space

  - name: ACEScct
    family: ACES
    encoding: log
    description: ACES color timing space

  - name: CIE-XYZ-D65
    family: Utility
    encoding: display-linear
    description: CIE XYZ D65 interchange

  - name: Raw
    family: Utility
    encoding: data
    description: Non-color data

view_transforms:
  - name: Un-tone-mapped
    description: Un-tone-mapped rendering
"#;
    let ref_path = dir.join("reference.ocio");
    std::fs::write(&ref_path, yaml).unwrap();

    let path = write_amf(&dir, "minimal.amf", "");
    let compiler = AmfCompiler::from_reference_file(&ref_path).unwrap();
    let compiled = compiler.compile(&path).unwrap();

    assert_eq!(compiled.info.input_colorspace_name, "ACES2065-1");
    assert_eq!(compiled.info.display_name, "None");
    assert!(compiled.config.view_transform("Un-tone-mapped").is_some());
}

#[test]
fn reference_config_wrong_version_from_file() {
    let dir = test_dir("ref_file_old");
    let yaml = r#"
ocio_profile_version: "2.1"
colorspaces:
  - name: ACES2065-1
    description: The ACES reference space
"#;
    let ref_path = dir.join("reference.ocio");
    std::fs::write(&ref_path, yaml).unwrap();
    let path = write_amf(&dir, "minimal.amf", "");

    let compiler = AmfCompiler::from_reference_file(&ref_path).unwrap();
    let err = compiler.compile(&path).unwrap_err();
    assert!(matches!(err, AmfError::UnsupportedRefVersion { .. }));
}

#[test]
fn look_resolved_from_reference_by_transform_id() {
    let dir = test_dir("look_id");
    let pipeline = format!(
        r#"{}
    <aces:lookTransform>
      <aces:transformId>urn:ampas:aces:transformId:v1.5:LMT.Academy.ReferenceGamutCompress.a1.v1.0</aces:transformId>
    </aces:lookTransform>"#,
        input_and_output()
    );
    let path = write_amf(&dir, "look_id.amf", &pipeline);
    let compiled = compile(&path);

    // The reference look is imported under the synthesized name.
    let look = compiled.config.look("AMF Look 1 -- clip_010").unwrap();
    assert!(look.get_description().contains("ReferenceGamutCompress"));
    assert_eq!(compiled.config.looks().len(), 2);
}
