//! Streaming XML event router.
//!
//! Drives a quick-xml reader over the AMF document and dispatches start,
//! text, and end events into the intermediate [`AmfDocument`] records.
//! The router only tracks *where* data belongs (clipId, inputTransform,
//! outputTransform, lookTransform, pipeline); all interpretation happens in
//! the config builder after parsing completes.
//!
//! Element and attribute names compare ASCII case-insensitively; original
//! spelling is preserved in the records for diagnostics.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, trace};

use crate::error::{AmfError, AmfResult};
use crate::model::{
    tag_eq, tag_in, tags, AmfDocument, LOOK_CONTAINER_TAGS, NESTED_TRANSFORM_TAGS,
};

/// Parses an AMF document into its intermediate model.
pub(crate) fn parse_amf(xml: &str) -> AmfResult<AmfDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut router = EventRouter::default();

    loop {
        let position = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let (name, attributes) = decode_start(&e, xml, position)?;
                router.start_element(&name, &attributes, xml, position)?;
            }
            Ok(Event::Empty(e)) => {
                let (name, attributes) = decode_start(&e, xml, position)?;
                router.start_element(&name, &attributes, xml, position)?;
                router.end_element(&name);
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| AmfError::XmlParse {
                    line: line_of_offset(xml, position),
                    message: err.to_string(),
                })?;
                router.character_data(&text);
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                router.end_element(&name);
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(AmfError::XmlParse {
                    line: line_of_offset(xml, reader.error_position() as usize),
                    message: err.to_string(),
                })
            }
            Ok(_) => {}
        }
    }

    router.doc.lines = xml.lines().count().max(1);
    debug!(
        looks = router.doc.looks.len(),
        working_location = ?router.doc.num_looks_before_working_location,
        "AMF document parsed"
    );
    Ok(router.doc)
}

/// Computes the one-based line number of a byte offset.
pub(crate) fn line_of_offset(xml: &str, offset: usize) -> usize {
    let end = offset.min(xml.len());
    xml.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

fn decode_start(
    e: &BytesStart<'_>,
    xml: &str,
    position: usize,
) -> AmfResult<(String, Vec<(String, String)>)> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    if name.is_empty() {
        return Err(AmfError::InternalParse {
            line: line_of_offset(xml, position),
            message: "empty element name".into(),
        });
    }
    let attributes = e
        .attributes()
        .flatten()
        .map(|a| {
            (
                String::from_utf8_lossy(a.key.as_ref()).into_owned(),
                String::from_utf8_lossy(&a.value).into_owned(),
            )
        })
        .collect();
    Ok((name, attributes))
}

/// Section state for the event stream.
#[derive(Debug, Default)]
struct EventRouter {
    doc: AmfDocument,
    inside_input_transform: bool,
    inside_output_transform: bool,
    inside_look_transform: bool,
    inside_clip_id: bool,
    inside_pipeline: bool,
    current_element: String,
}

impl EventRouter {
    fn start_element(
        &mut self,
        name: &str,
        attributes: &[(String, String)],
        xml: &str,
        position: usize,
    ) -> AmfResult<()> {
        trace!(element = name, "start");

        // Section openers and in-section routing, most specific first.
        if tag_eq(name, tags::INPUT_TRANSFORM) {
            self.inside_input_transform = true;
            for (attr, value) in attributes {
                self.doc.input.record.add_attribute(attr.clone(), value.clone());
            }
            self.doc.input.tld_stack.push(name.to_string());
            return Ok(());
        }
        if self.inside_input_transform {
            self.current_element = name.to_string();
            if tag_eq(name, tags::INVERSE_ODT) || tag_eq(name, tags::INVERSE_RRT) {
                self.doc.input.is_inverse = true;
                self.doc.input.tld_stack.push(name.to_string());
                // Marker entry anchoring the builder's section scans.
                self.doc.input.record.add_sub_element(name.to_string(), "");
            }
            return Ok(());
        }

        if tag_eq(name, tags::OUTPUT_TRANSFORM) {
            self.inside_output_transform = true;
            for (attr, value) in attributes {
                self.doc.output.record.add_attribute(attr.clone(), value.clone());
            }
            self.doc.output.tld_stack.push(name.to_string());
            return Ok(());
        }
        if self.inside_output_transform {
            self.current_element = name.to_string();
            if tag_eq(name, tags::ODT) || tag_eq(name, tags::RRT) {
                self.doc.output.tld_stack.push(name.to_string());
                self.doc.output.record.add_sub_element(name.to_string(), "");
            }
            return Ok(());
        }

        if tag_eq(name, tags::LOOK_TRANSFORM) {
            self.inside_look_transform = true;
            let mut record = crate::model::TransformRecord::default();
            for (attr, value) in attributes {
                record.add_attribute(attr.clone(), value.clone());
            }
            self.doc.looks.push(record);
            return Ok(());
        }
        if self.inside_look_transform {
            self.current_element = name.to_string();
            let look = self.doc.looks.last_mut().ok_or_else(|| AmfError::InternalParse {
                line: line_of_offset(xml, position),
                message: "element inside lookTransform with no look record".into(),
            })?;
            if tag_eq(name, tags::CDL_CCR) {
                // Typically an empty element; its attribute value is the
                // correction id.
                if let Some((_, value)) = attributes.first() {
                    look.add_sub_element(tags::CDL_CCR, value.clone());
                }
            } else if tag_in(name, LOOK_CONTAINER_TAGS) {
                look.add_sub_element(name.to_string(), "");
            }
            return Ok(());
        }

        if tag_eq(name, tags::CLIP_ID) {
            self.inside_clip_id = true;
            for (attr, value) in attributes {
                self.doc.clip_id.add_attribute(attr.clone(), value.clone());
            }
            return Ok(());
        }
        if self.inside_clip_id {
            self.current_element = name.to_string();
            return Ok(());
        }

        if tag_eq(name, tags::PIPELINE) {
            self.inside_pipeline = true;
            return Ok(());
        }
        if tag_eq(name, tags::WORKING_LOCATION) && self.inside_pipeline {
            self.doc.num_looks_before_working_location = Some(self.doc.looks.len());
            return Ok(());
        }

        Ok(())
    }

    fn character_data(&mut self, text: &str) {
        if text.is_empty() || text == "\n" {
            return;
        }
        let value = text.to_string();

        if self.inside_input_transform && !self.current_element.is_empty() {
            match self.doc.input.tld_stack.last() {
                Some(top) if tag_eq(top, tags::INPUT_TRANSFORM) => {
                    let element = self.current_element.clone();
                    self.doc.input.add_tld_element(element, value);
                }
                Some(top) if tag_in(top, NESTED_TRANSFORM_TAGS) => {
                    let element = self.current_element.clone();
                    self.doc.input.record.add_sub_element(element, value);
                }
                _ => {}
            }
        } else if self.inside_output_transform && !self.current_element.is_empty() {
            match self.doc.output.tld_stack.last() {
                Some(top) if tag_eq(top, tags::OUTPUT_TRANSFORM) => {
                    let element = self.current_element.clone();
                    self.doc.output.add_tld_element(element, value);
                }
                Some(top) if tag_in(top, NESTED_TRANSFORM_TAGS) => {
                    let element = self.current_element.clone();
                    self.doc.output.record.add_sub_element(element, value);
                }
                _ => {}
            }
        } else if self.inside_look_transform && !self.current_element.is_empty() {
            if let Some(look) = self.doc.looks.last_mut() {
                look.add_sub_element(self.current_element.clone(), value);
            }
        } else if self.inside_clip_id && !self.current_element.is_empty() {
            self.doc.clip_id.add_sub_element(self.current_element.clone(), value);
        }
    }

    fn end_element(&mut self, name: &str) {
        trace!(element = name, "end");

        if tag_eq(name, tags::INPUT_TRANSFORM) {
            self.inside_input_transform = false;
            self.doc.input.tld_stack.pop();
            return;
        }
        if self.inside_input_transform {
            self.current_element.clear();
            if tag_eq(name, tags::INVERSE_ODT) || tag_eq(name, tags::INVERSE_RRT) {
                self.doc.input.tld_stack.pop();
            }
            return;
        }

        if tag_eq(name, tags::OUTPUT_TRANSFORM) {
            self.inside_output_transform = false;
            self.doc.output.tld_stack.pop();
            return;
        }
        if self.inside_output_transform {
            self.current_element.clear();
            if tag_eq(name, tags::ODT) || tag_eq(name, tags::RRT) {
                self.doc.output.tld_stack.pop();
            }
            return;
        }

        if tag_eq(name, tags::LOOK_TRANSFORM) {
            self.inside_look_transform = false;
            return;
        }
        if self.inside_look_transform {
            self.current_element.clear();
            return;
        }

        if tag_eq(name, tags::CLIP_ID) {
            self.inside_clip_id = false;
            return;
        }
        if self.inside_clip_id {
            self.current_element.clear();
            return;
        }

        if tag_eq(name, tags::PIPELINE) {
            self.inside_pipeline = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_AMF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<aces:amf xmlns:aces="urn:ampas:aces:amf:v1.0" xmlns:cdl="urn:ASC:CDL:v1.01">
  <aces:clipId>
    <aces:clipName>shot_010</aces:clipName>
    <aces:uuid>f81d4fae-7dec-11d0-a765-00a0c91e6bf6</aces:uuid>
  </aces:clipId>
  <aces:pipeline>
    <aces:inputTransform applied="false">
      <aces:transformId>urn:ampas:aces:transformId:v1.5:IDT.ARRI.LogC3.a1.v1</aces:transformId>
    </aces:inputTransform>
    <aces:lookTransform applied="true">
      <aces:description>Warm</aces:description>
      <cdl:SOPNode>
        <cdl:Slope>1.1 1.0 0.9</cdl:Slope>
        <cdl:Offset>0.0 0.0 0.0</cdl:Offset>
        <cdl:Power>1.0 1.0 1.0</cdl:Power>
      </cdl:SOPNode>
      <cdl:SatNode>
        <cdl:Saturation>1.2</cdl:Saturation>
      </cdl:SatNode>
    </aces:lookTransform>
    <aces:workingLocation/>
    <aces:outputTransform>
      <aces:transformId>urn:ampas:aces:transformId:v1.5:ODT.Academy.Rec709_100nits_dim.a1.0.3</aces:transformId>
    </aces:outputTransform>
  </aces:pipeline>
</aces:amf>
"#;

    #[test]
    fn routes_clip_id() {
        let doc = parse_amf(SIMPLE_AMF).unwrap();
        assert_eq!(doc.clip_id.find(tags::CLIP_NAME), Some("shot_010"));
        assert!(doc.clip_id.find(tags::UUID).is_some());
    }

    #[test]
    fn routes_input_tld_elements() {
        let doc = parse_amf(SIMPLE_AMF).unwrap();
        assert_eq!(doc.input.tld_elements.len(), 1);
        assert_eq!(doc.input.tld_elements[0].0, tags::TRANSFORM_ID);
        assert!(doc.input.tld_elements[0].1.contains("IDT.ARRI.LogC3"));
        assert!(!doc.input.is_inverse);
        assert!(doc.input.tld_stack.is_empty());
    }

    #[test]
    fn routes_look_with_attributes_and_markers() {
        let doc = parse_amf(SIMPLE_AMF).unwrap();
        assert_eq!(doc.looks.len(), 1);
        let look = &doc.looks[0];
        assert_eq!(look.attribute("applied"), Some("true"));
        assert_eq!(look.find(tags::DESCRIPTION), Some("Warm"));
        assert_eq!(look.find(tags::SLOPE), Some("1.1 1.0 0.9"));
        assert_eq!(look.find(tags::SATURATION), Some("1.2"));
        // Container markers recorded in order.
        assert!(look.find(tags::SOP_NODE).is_some());
        assert!(look.find(tags::SAT_NODE).is_some());
    }

    #[test]
    fn working_location_splits_looks() {
        let doc = parse_amf(SIMPLE_AMF).unwrap();
        assert_eq!(doc.num_looks_before_working_location, Some(1));
    }

    #[test]
    fn working_location_outside_pipeline_ignored() {
        let xml = r#"<aces:amf xmlns:aces="urn:x">
  <aces:workingLocation/>
</aces:amf>"#;
        let doc = parse_amf(xml).unwrap();
        assert_eq!(doc.num_looks_before_working_location, None);
    }

    #[test]
    fn nested_inverse_odt_goes_to_sub_elements() {
        let xml = r#"<aces:amf xmlns:aces="urn:x">
  <aces:inputTransform>
    <aces:inverseOutputDeviceTransform>
      <aces:transformId>urn:ampas:aces:transformId:v1.5:ODT.Academy.Rec709_100nits_dim.a1.0.3</aces:transformId>
    </aces:inverseOutputDeviceTransform>
  </aces:inputTransform>
</aces:amf>"#;
        let doc = parse_amf(xml).unwrap();
        assert!(doc.input.is_inverse);
        assert!(doc.input.tld_elements.is_empty());
        // Marker entry followed by the nested transformId.
        assert_eq!(doc.input.record.sub_elements[0].0, tags::INVERSE_ODT);
        assert_eq!(doc.input.record.sub_elements[1].0, tags::TRANSFORM_ID);
    }

    #[test]
    fn color_correction_ref_attribute_recorded() {
        let xml = r#"<aces:amf xmlns:aces="urn:x" xmlns:cdl="urn:ASC:CDL:v1.01">
  <aces:lookTransform>
    <aces:file>looks/grade.ccc</aces:file>
    <cdl:ColorCorrectionRef idref="cc0001"/>
  </aces:lookTransform>
</aces:amf>"#;
        let doc = parse_amf(xml).unwrap();
        assert_eq!(doc.looks[0].find(tags::CDL_CCR), Some("cc0001"));
    }

    #[test]
    fn malformed_xml_reports_line() {
        let xml = "<aces:amf>\n  <aces:clipId>\n  </aces:wrong>\n</aces:amf>";
        let err = parse_amf(xml).unwrap_err();
        match err {
            AmfError::XmlParse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected XmlParse, got {other:?}"),
        }
    }

    #[test]
    fn tag_matching_is_case_insensitive() {
        let xml = r#"<aces:amf xmlns:aces="urn:x">
  <ACES:CLIPID>
    <aces:clipName>clip</aces:clipName>
  </ACES:CLIPID>
</aces:amf>"#;
        let doc = parse_amf(xml).unwrap();
        assert_eq!(doc.clip_id.find(tags::CLIP_NAME), Some("clip"));
    }

    #[test]
    fn line_of_offset_counts_newlines() {
        let text = "a\nb\nc";
        assert_eq!(line_of_offset(text, 0), 1);
        assert_eq!(line_of_offset(text, 2), 2);
        assert_eq!(line_of_offset(text, 4), 3);
        assert_eq!(line_of_offset(text, 100), 3);
    }
}
