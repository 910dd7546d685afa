//! Intermediate staging records filled by the XML event router.
//!
//! The router records structured facts about the AMF document; the config
//! builder consumes them after parsing completes. Sub-element order is
//! significant: the builder scans for marker tags and consumes subsequent
//! entries until the next marker.

/// AMF element names.
///
/// Comparisons against these are ASCII case-insensitive throughout.
pub(crate) mod tags {
    pub const CLIP_ID: &str = "aces:clipId";
    pub const CLIP_NAME: &str = "aces:clipName";
    pub const UUID: &str = "aces:uuid";
    pub const DESCRIPTION: &str = "aces:description";

    pub const INPUT_TRANSFORM: &str = "aces:inputTransform";
    pub const OUTPUT_TRANSFORM: &str = "aces:outputTransform";
    pub const LOOK_TRANSFORM: &str = "aces:lookTransform";
    pub const PIPELINE: &str = "aces:pipeline";
    pub const WORKING_LOCATION: &str = "aces:workingLocation";

    pub const TRANSFORM_ID: &str = "aces:transformId";
    pub const FILE: &str = "aces:file";
    pub const CDL_CCR: &str = "cdl:ColorCorrectionRef";

    pub const INVERSE_ODT: &str = "aces:inverseOutputDeviceTransform";
    pub const INVERSE_RRT: &str = "aces:inverseReferenceRenderingTransform";
    pub const ODT: &str = "aces:outputDeviceTransform";
    pub const RRT: &str = "aces:referenceRenderingTransform";

    pub const CDL_WORKING_SPACE: &str = "aces:cdlWorkingSpace";
    pub const TO_CDL_WS: &str = "aces:toCdlWorkingSpace";
    pub const FROM_CDL_WS: &str = "aces:fromCdlWorkingSpace";
    pub const SOP_NODE: &str = "cdl:SOPNode";
    pub const ASC_SOP: &str = "cdl:ASC_SOP";
    pub const SLOPE: &str = "cdl:Slope";
    pub const OFFSET: &str = "cdl:Offset";
    pub const POWER: &str = "cdl:Power";
    pub const SAT_NODE: &str = "cdl:SatNode";
    pub const ASC_SAT: &str = "cdl:ASC_SAT";
    pub const SATURATION: &str = "cdl:Saturation";
}

/// Nested-transform tags that begin an inner inverted/forward transform
/// inside an input or output transform.
pub(crate) const NESTED_TRANSFORM_TAGS: &[&str] = &[
    tags::INVERSE_ODT,
    tags::INVERSE_RRT,
    tags::ODT,
    tags::RRT,
];

/// Container tags inside a look transform that anchor marker scans.
pub(crate) const LOOK_CONTAINER_TAGS: &[&str] = &[
    tags::SOP_NODE,
    tags::ASC_SOP,
    tags::SAT_NODE,
    tags::ASC_SAT,
    tags::CDL_WORKING_SPACE,
    tags::TO_CDL_WS,
    tags::FROM_CDL_WS,
];

/// CDL container tags that stop a `cdlWorkingSpace` section scan.
pub(crate) const CDL_NODE_TAGS: &[&str] = &[
    tags::SOP_NODE,
    tags::ASC_SOP,
    tags::SAT_NODE,
    tags::ASC_SAT,
];

/// Checks tag equality, ASCII case-insensitive.
#[inline]
pub(crate) fn tag_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Checks membership in a tag list, ASCII case-insensitive.
#[inline]
pub(crate) fn tag_in(tag: &str, list: &[&str]) -> bool {
    list.iter().any(|t| tag_eq(tag, t))
}

/// Returns the slice of entries following the first `marker` entry, up to
/// (excluding) the next entry whose tag is in `stops`.
pub(crate) fn marker_section<'e>(
    entries: &'e [(String, String)],
    marker: &str,
    stops: &[&str],
) -> Option<&'e [(String, String)]> {
    let start = entries.iter().position(|(tag, _)| tag_eq(tag, marker))? + 1;
    let len = entries[start..]
        .iter()
        .position(|(tag, _)| tag_in(tag, stops))
        .unwrap_or(entries.len() - start);
    Some(&entries[start..start + len])
}

/// An ordered record of one AMF element's attributes and sub-elements.
#[derive(Debug, Clone, Default)]
pub(crate) struct TransformRecord {
    /// Ordered `(tagName, textValue)` sub-elements.
    pub sub_elements: Vec<(String, String)>,
    /// Ordered `(attrName, attrValue)` attributes.
    pub attributes: Vec<(String, String)>,
}

impl TransformRecord {
    pub fn add_sub_element(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.sub_elements.push((name.into(), value.into()));
    }

    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    /// Reports whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.sub_elements.is_empty() && self.attributes.is_empty()
    }

    /// First value of the given sub-element tag.
    pub fn find(&self, tag: &str) -> Option<&str> {
        self.sub_elements
            .iter()
            .find(|(name, _)| tag_eq(name, tag))
            .map(|(_, value)| value.as_str())
    }

    /// First value of the given attribute name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| tag_eq(attr, name))
            .map(|(_, value)| value.as_str())
    }
}

/// An input or output transform record with top-level-descendant (TLD)
/// tracking, distinguishing elements that belong directly to the outer
/// transform from those belonging to a nested inverted/forward transform.
#[derive(Debug, Clone, Default)]
pub(crate) struct NestedTransformRecord {
    /// Attributes plus sub-elements of nested transforms.
    pub record: TransformRecord,
    /// Whether a nested inverse transform was seen (input transforms).
    pub is_inverse: bool,
    /// Stack of currently open TLD tags.
    pub tld_stack: Vec<String>,
    /// Ordered elements belonging directly to the outer transform.
    pub tld_elements: Vec<(String, String)>,
}

impl NestedTransformRecord {
    pub fn add_tld_element(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tld_elements.push((name.into(), value.into()));
    }

    /// Reports whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.record.is_empty() && self.tld_elements.is_empty()
    }
}

/// The intermediate model of one parsed AMF document.
#[derive(Debug, Clone, Default)]
pub(crate) struct AmfDocument {
    /// The clipId record.
    pub clip_id: TransformRecord,
    /// The inputTransform record.
    pub input: NestedTransformRecord,
    /// The outputTransform record.
    pub output: NestedTransformRecord,
    /// Ordered lookTransform records.
    pub looks: Vec<TransformRecord>,
    /// Count of look records seen before the pipeline's workingLocation
    /// marker; `None` if the marker was absent.
    pub num_looks_before_working_location: Option<usize>,
    /// Total number of lines in the document, for error attribution after
    /// parsing completes.
    pub lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn record_find_is_case_insensitive() {
        let mut record = TransformRecord::default();
        record.add_sub_element("aces:transformId", "urn:x");
        assert_eq!(record.find("ACES:TRANSFORMID"), Some("urn:x"));
        assert_eq!(record.find("aces:file"), None);
    }

    #[test]
    fn record_empty() {
        let mut record = TransformRecord::default();
        assert!(record.is_empty());
        record.add_attribute("applied", "true");
        assert!(!record.is_empty());
    }

    #[test]
    fn marker_section_stops_at_next_marker() {
        let subs = entries(&[
            (tags::INVERSE_RRT, ""),
            (tags::FILE, "rrt.cube"),
            (tags::INVERSE_ODT, ""),
            (tags::FILE, "odt.cube"),
        ]);

        let rrt = marker_section(&subs, tags::INVERSE_RRT, NESTED_TRANSFORM_TAGS).unwrap();
        assert_eq!(rrt.len(), 1);
        assert_eq!(rrt[0].1, "rrt.cube");

        let odt = marker_section(&subs, tags::INVERSE_ODT, NESTED_TRANSFORM_TAGS).unwrap();
        assert_eq!(odt.len(), 1);
        assert_eq!(odt[0].1, "odt.cube");
    }

    #[test]
    fn marker_section_runs_to_end_without_stop() {
        let subs = entries(&[(tags::SOP_NODE, ""), (tags::SLOPE, "1 1 1"), (tags::POWER, "1 1 1")]);
        let sop = marker_section(&subs, tags::SOP_NODE, LOOK_CONTAINER_TAGS).unwrap();
        assert_eq!(sop.len(), 2);
    }

    #[test]
    fn marker_section_missing_marker() {
        let subs = entries(&[(tags::SLOPE, "1 1 1")]);
        assert!(marker_section(&subs, tags::SOP_NODE, LOOK_CONTAINER_TAGS).is_none());
    }
}
