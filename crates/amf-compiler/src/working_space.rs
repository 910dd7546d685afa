//! Clip-to-working-space reassembly.
//!
//! When the AMF pipeline carries a `workingLocation` marker, the pixels of
//! the clip live at that point of the pipeline rather than at either end.
//! This pass synthesizes a named transform that carries the clip's pixels
//! to the working location, composing the input conversion, the
//! pre-working-location looks, and/or the inverse output view depending on
//! which transforms were already applied to the pixels.

use tracing::debug;

use amf_config::{
    ColorSpaceTransform, DisplayViewTransform, LookTransform, NamedTransform, Transform,
    TransformDirection,
};

use crate::builder::{must_apply, Builder, ACES, ACES_LOOK_NAME};
use crate::error::AmfResult;
use crate::model::AmfDocument;

impl Builder<'_> {
    /// Registers the `AMF Clip to Working Space Transform` named transform
    /// when the document marked a working location.
    pub(crate) fn reassemble_working_space(&mut self, doc: &AmfDocument) -> AmfResult<()> {
        let Some(num_before) = doc.num_looks_before_working_location else {
            return Ok(());
        };

        let output_applied = !must_apply(&doc.output.record);
        let num_applied = self.info.num_looks_applied;

        // Pixels sitting past the working location (an applied output, or
        // more applied looks than precede the marker) are walked backward.
        let working_forward = if output_applied {
            false
        } else {
            num_applied <= num_before
        };
        debug!(
            num_before,
            num_applied, output_applied, working_forward, "working location reassembly"
        );

        // Non-seed looks in registration order; index is 1-based.
        let look_names: Vec<String> = self
            .config
            .looks()
            .names()
            .filter(|name| *name != ACES_LOOK_NAME)
            .map(str::to_string)
            .collect();

        let mut transforms: Vec<Transform> = Vec::new();

        if working_forward {
            if must_apply(&doc.input.record) {
                transforms.push(Transform::ColorSpace(ColorSpaceTransform {
                    src: self.info.input_colorspace_name.clone(),
                    dst: ACES.into(),
                    data_bypass: true,
                    direction: TransformDirection::Forward,
                }));
            }
            for (idx, name) in look_names.iter().enumerate() {
                let index = idx + 1;
                if index <= num_before && !name.contains("Applied)") {
                    transforms.push(Transform::Look(LookTransform {
                        src: ACES.into(),
                        dst: ACES.into(),
                        looks: name.clone(),
                        skip_colorspace_conversion: false,
                        direction: TransformDirection::Forward,
                    }));
                }
            }
        } else {
            if output_applied {
                if let (Some(display), Some(view)) = (
                    self.config.active_displays().first().cloned(),
                    self.config.active_views().first().cloned(),
                ) {
                    transforms.push(Transform::DisplayView(DisplayViewTransform {
                        src: ACES.into(),
                        display,
                        view,
                        looks_bypass: false,
                        direction: TransformDirection::Inverse,
                    }));
                }
            }
            // Undo, in reverse order, the applied looks sitting past the
            // working location.
            for (idx, name) in look_names.iter().enumerate().rev() {
                let index = idx + 1;
                if index > num_before && name.contains("Applied)") {
                    transforms.push(Transform::Look(LookTransform {
                        src: ACES.into(),
                        dst: ACES.into(),
                        looks: name.clone(),
                        skip_colorspace_conversion: false,
                        direction: TransformDirection::Inverse,
                    }));
                }
            }
        }

        if transforms.is_empty() {
            transforms.push(Transform::identity());
        }

        let name = format!("AMF Clip to Working Space Transform -- {}", self.clip_name);
        let family = format!("AMF/{}", self.clip_name);
        self.config.add_named_transform(
            NamedTransform::new(name)
                .family(family)
                .forward(Transform::group(transforms)),
        );
        Ok(())
    }
}
