//! Built-in reference configurations.
//!
//! Provides the ACES studio reference config used when no external
//! reference is supplied. Color space, view transform, and look
//! descriptions carry the `ACEStransformID:` lines that description-based
//! resolution searches for.
//!
//! # Example
//!
//! ```
//! use amf_config::builtin;
//!
//! let config = builtin::studio_config();
//! assert!(config.colorspace("ACES2065-1").is_some());
//! assert!(config.colorspace("ARRI LogC3 (EI800)").is_some());
//! ```

use crate::colorspace::{ColorSpace, Encoding};
use crate::config::Config;
use crate::display::{Display, View, ViewTransform};
use crate::look::Look;
use crate::role;
use crate::transform::{BuiltinTransform, Transform, TransformDirection};

/// Name of the built-in studio reference config.
pub const STUDIO_CONFIG_NAME: &str = "studio-config-v2.1.0_aces-v1.3_ocio-v2.3";

/// Creates the ACES studio reference configuration.
///
/// Mirrors the content the AMF compiler relies on from the shipped studio
/// config: the ACES core spaces, the log-camera input spaces with their
/// linearized companions, SDR display spaces, the SDR video view transform,
/// and the reference gamut compression look.
pub fn studio_config() -> Config {
    let mut config = Config::new();
    config.set_name(STUDIO_CONFIG_NAME);
    config.set_version(2, 3);

    config.add_colorspace(aces2065_1());
    config.add_colorspace(acescg());
    config.add_colorspace(acescct());
    config.add_colorspace(cie_xyz_d65());
    config.add_colorspace(raw());

    for cs in camera_spaces() {
        config.add_colorspace(cs);
    }
    for cs in linear_camera_spaces() {
        config.add_colorspace(cs);
    }

    config.add_colorspace(rec709_display());
    config.add_colorspace(srgb_display());

    config.add_view_transform(sdr_video_view_transform());
    config.add_view_transform(untonemapped_view_transform());

    config.add_look(gamut_compression_look());

    config.set_role(role::names::ACES_INTERCHANGE, "ACES2065-1");
    config.set_role(role::names::CIE_XYZ_D65_INTERCHANGE, "CIE-XYZ-D65");
    config.set_role(role::names::COLOR_TIMING, "ACEScct");
    config.set_role(role::names::COMPOSITING_LOG, "ACEScct");
    config.set_role(role::names::DATA, "Raw");
    config.set_role(role::names::DEFAULT, "ACES2065-1");
    config.set_role(role::names::SCENE_LINEAR, "ACEScg");

    let mut rec709 = Display::new("Rec.709");
    rec709.add_view(
        View::new("ACES 1.0 - SDR Video", "Rec.709 - Display")
            .with_view_transform("ACES 1.0 - SDR Video"),
    );
    rec709.add_view(
        View::new("Un-tone-mapped", "Rec.709 - Display").with_view_transform("Un-tone-mapped"),
    );
    rec709.add_view(View::new("Raw", "Raw"));
    config.displays_mut().add_display(rec709);

    let mut srgb = Display::new("sRGB");
    srgb.add_view(
        View::new("ACES 1.0 - SDR Video", "sRGB - Display")
            .with_view_transform("ACES 1.0 - SDR Video"),
    );
    srgb.add_view(View::new("Raw", "Raw"));
    config.displays_mut().add_display(srgb);

    config.set_active_displays(vec!["Rec.709".into(), "sRGB".into()]);
    config.set_active_views(vec![
        "ACES 1.0 - SDR Video".into(),
        "Un-tone-mapped".into(),
        "Raw".into(),
    ]);

    config
}

fn builtin(style: &str, direction: TransformDirection) -> Transform {
    Transform::Builtin(BuiltinTransform {
        style: style.into(),
        direction,
    })
}

// ============================================================================
// ACES core spaces
// ============================================================================

fn aces2065_1() -> ColorSpace {
    ColorSpace::builder("ACES2065-1")
        .alias("aces")
        .alias("ACES - ACES2065-1")
        .family("ACES")
        .encoding(Encoding::SceneLinear)
        .description("The Academy Color Encoding System reference color space (AP0 primaries)")
        .build()
}

fn acescg() -> ColorSpace {
    // AP1 <-> AP0
    let to_ref = Transform::matrix([
        0.6954522414, 0.1406786965, 0.1638690622, 0.0,
        0.0447945634, 0.8596711185, 0.0955343182, 0.0,
        -0.0055258826, 0.0040252103, 1.0015006723, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    let from_ref = Transform::matrix([
        1.4514393161, -0.2365107469, -0.2149285693, 0.0,
        -0.0765537734, 1.1762296998, -0.0996759264, 0.0,
        0.0083161484, -0.0060324498, 0.9977163014, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    ColorSpace::builder("ACEScg")
        .alias("ACES - ACEScg")
        .family("ACES")
        .encoding(Encoding::SceneLinear)
        .description(
            "ACEScg working space (AP1 primaries, linear)\n\nAMF Components\n--------------\nACEStransformID: urn:ampas:aces:transformId:v1.5:ACEScsc.Academy.ACEScg_to_ACES.a1.0.3",
        )
        .to_reference(to_ref)
        .from_reference(from_ref)
        .build()
}

fn acescct() -> ColorSpace {
    ColorSpace::builder("ACEScct")
        .alias("ACES - ACEScct")
        .family("ACES")
        .encoding(Encoding::Log)
        .description(
            "ACEScct logarithmic color timing space (AP1 primaries)\n\nAMF Components\n--------------\nACEStransformID: urn:ampas:aces:transformId:v1.5:ACEScsc.Academy.ACEScct_to_ACES.a1.0.3",
        )
        .to_reference(builtin("ACEScct_to_ACES2065-1", TransformDirection::Forward))
        .from_reference(builtin("ACEScct_to_ACES2065-1", TransformDirection::Inverse))
        .build()
}

fn cie_xyz_d65() -> ColorSpace {
    ColorSpace::builder("CIE-XYZ-D65")
        .family("Utility")
        .encoding(Encoding::DisplayLinear)
        .description("CIE XYZ colorimetry with D65 adopted white")
        .to_reference(builtin("UTILITY - ACES-AP0_from_CIE-XYZ-D65_BFD", TransformDirection::Forward))
        .from_reference(builtin("UTILITY - ACES-AP0_from_CIE-XYZ-D65_BFD", TransformDirection::Inverse))
        .build()
}

fn raw() -> ColorSpace {
    ColorSpace::builder("Raw")
        .alias("Utility - Raw")
        .family("Utility")
        .encoding(Encoding::Data)
        .description("The utility \"Raw\" colorspace")
        .is_data(true)
        .build()
}

// ============================================================================
// Camera input spaces
// ============================================================================

/// `(name, ACEStransformID tail, builtin style)` per log camera space.
const CAMERA_INPUTS: &[(&str, &str, &str)] = &[
    (
        "ARRI LogC3 (EI800)",
        "IDT.ARRI.LogC3.a1.v1",
        "ARRI_LOGC3-EI800-AWG3_to_ACES2065-1",
    ),
    (
        "ARRI LogC4",
        "IDT.ARRI.LogC4.a1.v1",
        "ARRI_LOGC4_to_ACES2065-1",
    ),
    (
        "BMDFilm WideGamut Gen5",
        "IDT.BlackmagicDesign.BMDFilm-WideGamut-Gen5.a1.v1",
        "BMDFILM-WIDEGAMUT-GEN5_to_ACES2065-1",
    ),
    (
        "CanonLog2 CinemaGamut D55",
        "IDT.Canon.CanonLog2-CinemaGamut-D55.a1.v1",
        "CANON_CLOG2-CGAMUT-D55_to_ACES2065-1",
    ),
    (
        "CanonLog3 CinemaGamut D55",
        "IDT.Canon.CanonLog3-CinemaGamut-D55.a1.v1",
        "CANON_CLOG3-CGAMUT-D55_to_ACES2065-1",
    ),
    (
        "V-Log V-Gamut",
        "IDT.Panasonic.VLog-VGamut.a1.v1",
        "PANASONIC_VLOG-VGAMUT_to_ACES2065-1",
    ),
    (
        "Log3G10 REDWideGamutRGB",
        "IDT.RED.Log3G10-RWG.a1.v1",
        "RED_LOG3G10-RWG_to_ACES2065-1",
    ),
    (
        "S-Log3 S-Gamut3",
        "IDT.Sony.SLog3-SGamut3.a1.v1",
        "SONY_SLOG3-SGAMUT3_to_ACES2065-1",
    ),
    (
        "S-Log3 S-Gamut3.Cine",
        "IDT.Sony.SLog3-SGamut3Cine.a1.v1",
        "SONY_SLOG3-SGAMUT3-CINE_to_ACES2065-1",
    ),
    (
        "S-Log3 Venice S-Gamut3",
        "IDT.Sony.Venice-SLog3-SGamut3.a1.v1",
        "SONY_SLOG3-SGAMUT3-VENICE_to_ACES2065-1",
    ),
    (
        "S-Log3 Venice S-Gamut3.Cine",
        "IDT.Sony.Venice-SLog3-SGamut3Cine.a1.v1",
        "SONY_SLOG3-SGAMUT3-VENICE-CINE_to_ACES2065-1",
    ),
];

/// `(name, builtin style)` per linearized camera space.
const LINEAR_CAMERA_SPACES: &[(&str, &str)] = &[
    ("Linear ARRI Wide Gamut 3", "LINEAR-ARRI-WIDE-GAMUT-3_to_ACES2065-1"),
    ("Linear ARRI Wide Gamut 4", "LINEAR-ARRI-WIDE-GAMUT-4_to_ACES2065-1"),
    ("Linear BMD WideGamut Gen5", "LINEAR-BMD-WIDEGAMUT-GEN5_to_ACES2065-1"),
    ("Linear CinemaGamut D55", "LINEAR-CINEMAGAMUT-D55_to_ACES2065-1"),
    ("Linear V-Gamut", "LINEAR-VGAMUT_to_ACES2065-1"),
    ("Linear REDWideGamutRGB", "LINEAR-RWG_to_ACES2065-1"),
    ("Linear S-Gamut3", "LINEAR-SGAMUT3_to_ACES2065-1"),
    ("Linear S-Gamut3.Cine", "LINEAR-SGAMUT3-CINE_to_ACES2065-1"),
    ("Linear Venice S-Gamut3", "LINEAR-SGAMUT3-VENICE_to_ACES2065-1"),
    ("Linear Venice S-Gamut3.Cine", "LINEAR-SGAMUT3-VENICE-CINE_to_ACES2065-1"),
];

fn camera_spaces() -> Vec<ColorSpace> {
    CAMERA_INPUTS
        .iter()
        .map(|(name, aces_id, style)| {
            let description = format!(
                "Convert {name} to ACES2065-1\n\nAMF Components\n--------------\nACEStransformID: urn:ampas:aces:transformId:v1.5:{aces_id}"
            );
            ColorSpace::builder(*name)
                .family("Input/Camera")
                .encoding(Encoding::Log)
                .description(description)
                .to_reference(builtin(style, TransformDirection::Forward))
                .from_reference(builtin(style, TransformDirection::Inverse))
                .build()
        })
        .collect()
}

fn linear_camera_spaces() -> Vec<ColorSpace> {
    LINEAR_CAMERA_SPACES
        .iter()
        .map(|(name, style)| {
            ColorSpace::builder(*name)
                .family("Input/Camera/Linear")
                .encoding(Encoding::SceneLinear)
                .description(format!("Convert {name} to ACES2065-1"))
                .to_reference(builtin(style, TransformDirection::Forward))
                .from_reference(builtin(style, TransformDirection::Inverse))
                .build()
        })
        .collect()
}

// ============================================================================
// Display spaces, view transforms, looks
// ============================================================================

fn rec709_display() -> ColorSpace {
    ColorSpace::builder("Rec.709 - Display")
        .family("Display")
        .encoding(Encoding::Sdr)
        .description(
            "Convert CIE XYZ (D65 white) to Rec.709 (HD video)\n\nAMF Components\n--------------\nACEStransformID: urn:ampas:aces:transformId:v1.5:ODT.Academy.Rec709_100nits_dim.a1.0.3",
        )
        .from_reference(builtin("DISPLAY - CIE-XYZ-D65_to_REC.709", TransformDirection::Forward))
        .to_reference(builtin("DISPLAY - CIE-XYZ-D65_to_REC.709", TransformDirection::Inverse))
        .build()
}

fn srgb_display() -> ColorSpace {
    ColorSpace::builder("sRGB - Display")
        .family("Display")
        .encoding(Encoding::Sdr)
        .description(
            "Convert CIE XYZ (D65 white) to sRGB (piecewise EOTF)\n\nAMF Components\n--------------\nACEStransformID: urn:ampas:aces:transformId:v1.5:ODT.Academy.sRGB_100nits_dim.a1.0.3",
        )
        .from_reference(builtin("DISPLAY - CIE-XYZ-D65_to_sRGB", TransformDirection::Forward))
        .to_reference(builtin("DISPLAY - CIE-XYZ-D65_to_sRGB", TransformDirection::Inverse))
        .build()
}

fn sdr_video_view_transform() -> ViewTransform {
    ViewTransform::new("ACES 1.0 - SDR Video")
        .with_family("ACES")
        .with_description(
            "Component of ACES Output Transforms for SDR D65 video\n\nAMF Components\n--------------\nACEStransformID: urn:ampas:aces:transformId:v1.5:RRT.a1.0.3\nACEStransformID: urn:ampas:aces:transformId:v1.5:ODT.Academy.Rec709_100nits_dim.a1.0.3\nACEStransformID: urn:ampas:aces:transformId:v1.5:ODT.Academy.sRGB_100nits_dim.a1.0.3",
        )
        .with_from_scene_reference(builtin(
            "ACES-OUTPUT - ACES2065-1_to_CIE-XYZ-D65 - SDR-VIDEO_1.0",
            TransformDirection::Forward,
        ))
}

fn untonemapped_view_transform() -> ViewTransform {
    ViewTransform::new("Un-tone-mapped")
        .with_family("Utility")
        .with_description("Convert ACES2065-1 to CIE XYZ (D65 white) with no tone mapping")
        .with_from_scene_reference(builtin(
            "UTILITY - ACES-AP0_to_CIE-XYZ-D65_BFD",
            TransformDirection::Forward,
        ))
}

fn gamut_compression_look() -> Look {
    Look::new("ACES 1.3 Reference Gamut Compression")
        .process_space("ACES2065-1")
        .description(
            "LMT (applied in ACES2065-1) to compress scene-referred values into the AP1 gamut\n\nAMF Components\n--------------\nACEStransformID: urn:ampas:aces:transformId:v1.5:LMT.Academy.ReferenceGamutCompress.a1.v1.0",
        )
        .transform(builtin(
            "ACES-LMT - ACES 1.3 Reference Gamut Compression",
            TransformDirection::Forward,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studio_config_core_spaces() {
        let config = studio_config();
        for name in ["ACES2065-1", "ACEScg", "ACEScct", "CIE-XYZ-D65", "Raw"] {
            assert!(config.colorspace(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn studio_config_camera_pairs() {
        let config = studio_config();
        assert!(config.colorspace("ARRI LogC3 (EI800)").is_some());
        assert!(config.colorspace("Linear ARRI Wide Gamut 3").is_some());
        assert!(config.colorspace("S-Log3 Venice S-Gamut3.Cine").is_some());
    }

    #[test]
    fn descriptions_carry_aces_ids() {
        let config = studio_config();
        let logc3 = config.colorspace("ARRI LogC3 (EI800)").unwrap();
        assert!(logc3
            .description()
            .contains("urn:ampas:aces:transformId:v1.5:IDT.ARRI.LogC3"));

        let vt = config.view_transform("ACES 1.0 - SDR Video").unwrap();
        assert!(vt
            .description()
            .contains("urn:ampas:aces:transformId:v1.5:RRT.a1.0.3"));
    }

    #[test]
    fn studio_config_version() {
        let config = studio_config();
        assert_eq!(config.version().major, 2);
        assert_eq!(config.version().minor, 3);
    }

    #[test]
    fn studio_config_validates() {
        assert!(studio_config().validate().is_ok());
    }

    #[test]
    fn roles_resolve() {
        let config = studio_config();
        assert_eq!(config.colorspace("scene_linear").unwrap().name(), "ACEScg");
        assert_eq!(
            config.colorspace("aces_interchange").unwrap().name(),
            "ACES2065-1"
        );
    }
}
