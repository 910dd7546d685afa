//! Reference-config resolution.
//!
//! ACES transform identifiers in the AMF are matched against the reference
//! config by searching each entity's *description* text for the identifier
//! as a substring (not the entity name). This mirrors how shipped ACES
//! reference configs embed `ACEStransformID:` lines in descriptions; the
//! match is sensitive to whitespace and case, so identifiers must be
//! carried through verbatim.

use amf_config::{ColorSpace, Config, Look, ViewTransform};
use tracing::trace;

/// Mappings from the log camera color spaces in the studio reference
/// config to their linearized camera color space.
pub(crate) const CAMERA_MAPPING: &[(&str, &str)] = &[
    ("ARRI LogC3 (EI800)", "Linear ARRI Wide Gamut 3"),
    ("ARRI LogC4", "Linear ARRI Wide Gamut 4"),
    ("BMDFilm WideGamut Gen5", "Linear BMD WideGamut Gen5"),
    ("CanonLog2 CinemaGamut D55", "Linear CinemaGamut D55"),
    ("CanonLog3 CinemaGamut D55", "Linear CinemaGamut D55"),
    ("V-Log V-Gamut", "Linear V-Gamut"),
    ("Log3G10 REDWideGamutRGB", "Linear REDWideGamutRGB"),
    ("S-Log3 S-Gamut3", "Linear S-Gamut3"),
    ("S-Log3 S-Gamut3.Cine", "Linear S-Gamut3.Cine"),
    ("S-Log3 Venice S-Gamut3", "Linear Venice S-Gamut3"),
    ("S-Log3 Venice S-Gamut3.Cine", "Linear Venice S-Gamut3.Cine"),
];

/// Lookup primitives over a reference config.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resolver<'a> {
    reference: &'a Config,
}

impl<'a> Resolver<'a> {
    pub fn new(reference: &'a Config) -> Self {
        Self { reference }
    }

    /// The reference config this resolver searches.
    pub fn reference(&self) -> &'a Config {
        self.reference
    }

    /// Finds the first color space whose description contains `aces_id`.
    pub fn search_colorspaces(&self, aces_id: &str) -> Option<&'a ColorSpace> {
        let hit = self
            .reference
            .colorspaces()
            .iter()
            .find(|cs| cs.description().contains(aces_id));
        trace!(aces_id, hit = hit.map(|cs| cs.name()), "color space search");
        hit
    }

    /// Finds the first view transform whose description contains `aces_id`.
    pub fn search_view_transforms(&self, aces_id: &str) -> Option<&'a ViewTransform> {
        let hit = self
            .reference
            .view_transforms()
            .iter()
            .find(|vt| vt.description().contains(aces_id));
        trace!(aces_id, hit = hit.map(|vt| vt.name()), "view transform search");
        hit
    }

    /// Finds the first look whose description contains `aces_id` and
    /// returns an editable copy.
    pub fn search_look_transforms(&self, aces_id: &str) -> Option<Look> {
        let hit = self
            .reference
            .looks()
            .all()
            .iter()
            .find(|lk| lk.get_description().contains(aces_id));
        trace!(aces_id, hit = hit.map(|lk| lk.name()), "look search");
        hit.cloned()
    }

    /// Returns the linearized companion of a log camera color space, if
    /// the reference config defines one.
    pub fn linear_companion(&self, camera_space: &str) -> Option<&'a ColorSpace> {
        let linear_name = CAMERA_MAPPING
            .iter()
            .find(|(log, _)| *log == camera_space)
            .map(|(_, linear)| *linear)?;
        self.reference.colorspace(linear_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amf_config::builtin;

    #[test]
    fn colorspace_by_description_substring() {
        let reference = builtin::studio_config();
        let resolver = Resolver::new(&reference);

        let cs = resolver
            .search_colorspaces("urn:ampas:aces:transformId:v1.5:IDT.ARRI.LogC3")
            .unwrap();
        assert_eq!(cs.name(), "ARRI LogC3 (EI800)");

        assert!(resolver.search_colorspaces("no-such-id").is_none());
    }

    #[test]
    fn search_is_case_and_whitespace_sensitive() {
        let reference = builtin::studio_config();
        let resolver = Resolver::new(&reference);

        assert!(resolver
            .search_colorspaces("urn:ampas:aces:transformid:v1.5:idt.arri.logc3")
            .is_none());
    }

    #[test]
    fn view_transform_by_description_substring() {
        let reference = builtin::studio_config();
        let resolver = Resolver::new(&reference);

        let vt = resolver
            .search_view_transforms("ODT.Academy.Rec709_100nits_dim.a1.0.3")
            .unwrap();
        assert_eq!(vt.name(), "ACES 1.0 - SDR Video");
    }

    #[test]
    fn look_search_returns_copy() {
        let reference = builtin::studio_config();
        let resolver = Resolver::new(&reference);

        let mut look = resolver
            .search_look_transforms("LMT.Academy.ReferenceGamutCompress")
            .unwrap();
        look.set_name("renamed");
        // The reference config is untouched.
        assert!(reference.look("renamed").is_none());
        assert!(reference.look("ACES 1.3 Reference Gamut Compression").is_some());
    }

    #[test]
    fn camera_mapping_resolves_linear_companion() {
        let reference = builtin::studio_config();
        let resolver = Resolver::new(&reference);

        let linear = resolver.linear_companion("ARRI LogC3 (EI800)").unwrap();
        assert_eq!(linear.name(), "Linear ARRI Wide Gamut 3");

        // Both Canon log curves share one linear space.
        assert_eq!(
            resolver.linear_companion("CanonLog2 CinemaGamut D55").unwrap().name(),
            resolver.linear_companion("CanonLog3 CinemaGamut D55").unwrap().name(),
        );

        assert!(resolver.linear_companion("ACEScg").is_none());
    }
}
