//! Display, view, shared-view, and view-transform management.
//!
//! Output transforms are organized through displays and views:
//! - **Display**: a physical or virtual display device
//! - **View**: a viewing condition for that display
//! - **View transform**: a shared scene-to-display rendering, reusable
//!   across displays
//! - **Shared view**: a view definition bound to displays by reference
//!
//! # Example
//!
//! ```
//! use amf_config::{Display, View};
//!
//! let mut display = Display::new("Rec.709");
//! display.add_view(View::new("ACES 1.0 - SDR Video", "Rec.709 - Display"));
//! display.add_view(View::new("Raw", "Raw"));
//!
//! assert_eq!(display.views().len(), 2);
//! ```

use crate::transform::Transform;

/// Sentinel color space name used by shared views to mean "the display's
/// own color space".
pub const USE_DISPLAY_NAME: &str = "<USE_DISPLAY_NAME>";

/// A view within a display.
#[derive(Debug, Clone)]
pub struct View {
    /// View name.
    name: String,
    /// Target color space name.
    colorspace: String,
    /// Optional looks to apply (comma-separated).
    looks: Option<String>,
    /// Optional view transform name.
    view_transform: Option<String>,
}

impl View {
    /// Creates a new view targeting a color space.
    pub fn new(name: impl Into<String>, colorspace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colorspace: colorspace.into(),
            looks: None,
            view_transform: None,
        }
    }

    /// Adds looks to apply.
    pub fn with_looks(mut self, looks: impl Into<String>) -> Self {
        self.looks = Some(looks.into());
        self
    }

    /// Sets the view transform.
    pub fn with_view_transform(mut self, vt: impl Into<String>) -> Self {
        self.view_transform = Some(vt.into());
        self
    }

    /// Returns the view name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the target color space.
    #[inline]
    pub fn colorspace(&self) -> &str {
        &self.colorspace
    }

    /// Returns the looks to apply.
    #[inline]
    pub fn looks(&self) -> Option<&str> {
        self.looks.as_deref()
    }

    /// Returns the view transform name.
    #[inline]
    pub fn view_transform(&self) -> Option<&str> {
        self.view_transform.as_deref()
    }
}

/// A view definition shared between displays.
#[derive(Debug, Clone)]
pub struct SharedView {
    /// View name.
    pub name: String,
    /// View transform name.
    pub view_transform: String,
    /// Target color space; [`USE_DISPLAY_NAME`] defers to the display.
    pub colorspace: String,
    /// Looks to apply (comma-separated, may be empty).
    pub looks: String,
}

/// A display device configuration.
#[derive(Debug, Clone)]
pub struct Display {
    /// Display name.
    name: String,
    /// Views owned by this display.
    views: Vec<View>,
    /// Names of shared views bound to this display.
    shared_views: Vec<String>,
}

impl Display {
    /// Creates a new display.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            views: Vec::new(),
            shared_views: Vec::new(),
        }
    }

    /// Returns the display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a view to this display.
    pub fn add_view(&mut self, view: View) {
        self.views.push(view);
    }

    /// Removes a view by name. Returns whether a view was removed.
    pub fn remove_view(&mut self, name: &str) -> bool {
        let before = self.views.len();
        self.views.retain(|v| !v.name.eq_ignore_ascii_case(name));
        self.views.len() != before
    }

    /// Binds a shared view by name, ignoring duplicates.
    pub fn add_shared_view(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.shared_views.iter().any(|v| v.eq_ignore_ascii_case(&name)) {
            self.shared_views.push(name);
        }
    }

    /// Returns all owned views.
    #[inline]
    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Returns names of bound shared views.
    #[inline]
    pub fn shared_views(&self) -> &[String] {
        &self.shared_views
    }

    /// Gets an owned view by name.
    pub fn view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.name.eq_ignore_ascii_case(name))
    }

    /// Checks whether a view of the given name exists, owned or shared.
    pub fn has_view(&self, name: &str) -> bool {
        self.view(name).is_some()
            || self.shared_views.iter().any(|v| v.eq_ignore_ascii_case(name))
    }

    /// Returns true if the display has no views at all.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty() && self.shared_views.is_empty()
    }
}

/// View transform definition.
///
/// View transforms are shared scene-to-display renderings reusable across
/// views. For reference configs the description carries the embedded ACES
/// transform identifiers used for resolution.
#[derive(Debug, Clone)]
pub struct ViewTransform {
    /// Name.
    name: String,
    /// Family (for categorization).
    family: String,
    /// Description.
    description: String,
    /// Transform from scene reference.
    from_scene_reference: Option<Transform>,
    /// Transform to scene reference.
    to_scene_reference: Option<Transform>,
}

impl ViewTransform {
    /// Creates a new view transform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            family: String::new(),
            description: String::new(),
            from_scene_reference: None,
            to_scene_reference: None,
        }
    }

    /// Returns the name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the family.
    #[inline]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Sets the family.
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Returns the description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sets the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Sets the transform from scene reference.
    pub fn with_from_scene_reference(mut self, t: Transform) -> Self {
        self.from_scene_reference = Some(t);
        self
    }

    /// Sets the transform to scene reference.
    pub fn with_to_scene_reference(mut self, t: Transform) -> Self {
        self.to_scene_reference = Some(t);
        self
    }

    /// Gets the transform from scene reference.
    #[inline]
    pub fn from_scene_reference(&self) -> Option<&Transform> {
        self.from_scene_reference.as_ref()
    }

    /// Gets the transform to scene reference.
    #[inline]
    pub fn to_scene_reference(&self) -> Option<&Transform> {
        self.to_scene_reference.as_ref()
    }
}

/// Collection of displays, shared views, and view transforms.
#[derive(Debug, Clone, Default)]
pub struct DisplayManager {
    /// All displays.
    displays: Vec<Display>,
    /// Shared view definitions.
    shared_views: Vec<SharedView>,
    /// View transforms.
    view_transforms: Vec<ViewTransform>,
}

impl DisplayManager {
    /// Creates an empty display manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a display.
    pub fn add_display(&mut self, display: Display) {
        self.displays.push(display);
    }

    /// Returns all displays.
    #[inline]
    pub fn displays(&self) -> &[Display] {
        &self.displays
    }

    /// Gets a display by name.
    pub fn display(&self, name: &str) -> Option<&Display> {
        self.displays.iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Gets a mutable display by name.
    pub fn display_mut(&mut self, name: &str) -> Option<&mut Display> {
        self.displays.iter_mut().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Removes a display by name. Returns whether one was removed.
    pub fn remove_display(&mut self, name: &str) -> bool {
        let before = self.displays.len();
        self.displays.retain(|d| !d.name.eq_ignore_ascii_case(name));
        self.displays.len() != before
    }

    /// Gets a display by name, creating it when absent.
    pub fn display_or_insert(&mut self, name: &str) -> &mut Display {
        let idx = match self
            .displays
            .iter()
            .position(|d| d.name.eq_ignore_ascii_case(name))
        {
            Some(idx) => idx,
            None => {
                self.displays.push(Display::new(name));
                self.displays.len() - 1
            }
        };
        &mut self.displays[idx]
    }

    /// Returns display names.
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.displays.iter().map(|d| d.name.as_str())
    }

    /// Adds a shared view definition, replacing any of the same name.
    pub fn add_shared_view(&mut self, view: SharedView) {
        if let Some(existing) = self
            .shared_views
            .iter_mut()
            .find(|v| v.name.eq_ignore_ascii_case(&view.name))
        {
            *existing = view;
        } else {
            self.shared_views.push(view);
        }
    }

    /// Gets a shared view definition by name.
    pub fn shared_view(&self, name: &str) -> Option<&SharedView> {
        self.shared_views
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
    }

    /// Returns all shared view definitions.
    #[inline]
    pub fn shared_views(&self) -> &[SharedView] {
        &self.shared_views
    }

    /// Adds a view transform.
    pub fn add_view_transform(&mut self, vt: ViewTransform) {
        if self
            .view_transforms
            .iter()
            .any(|existing| existing.name().eq_ignore_ascii_case(vt.name()))
        {
            return;
        }
        self.view_transforms.push(vt);
    }

    /// Gets a view transform by name.
    pub fn view_transform(&self, name: &str) -> Option<&ViewTransform> {
        self.view_transforms
            .iter()
            .find(|vt| vt.name.eq_ignore_ascii_case(name))
    }

    /// Returns all view transforms.
    #[inline]
    pub fn view_transforms(&self) -> &[ViewTransform] {
        &self.view_transforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_display() {
        let mut display = Display::new("Rec.709");
        display.add_view(View::new("SDR Video", "Rec.709 - Display"));
        display.add_view(View::new("Raw", "Raw"));

        assert_eq!(display.name(), "Rec.709");
        assert_eq!(display.views().len(), 2);
        assert!(display.has_view("raw"));
    }

    #[test]
    fn remove_view() {
        let mut display = Display::new("sRGB");
        display.add_view(View::new("Raw", "Raw"));
        assert!(display.remove_view("Raw"));
        assert!(!display.remove_view("Raw"));
        assert!(display.is_empty());
    }

    #[test]
    fn shared_view_dedup() {
        let mut display = Display::new("Rec.709");
        display.add_shared_view("ACES 1.0 - SDR Video");
        display.add_shared_view("ACES 1.0 - SDR Video");
        assert_eq!(display.shared_views().len(), 1);
        assert!(display.has_view("ACES 1.0 - SDR Video"));
    }

    #[test]
    fn display_manager_lookup() {
        let mut mgr = DisplayManager::new();
        mgr.add_display(Display::new("sRGB"));
        mgr.add_display(Display::new("Rec.709"));

        assert_eq!(mgr.displays().len(), 2);
        assert!(mgr.display("rec.709").is_some());

        mgr.display_or_insert("DCI-P3");
        assert_eq!(mgr.displays().len(), 3);
        mgr.display_or_insert("DCI-P3");
        assert_eq!(mgr.displays().len(), 3);
    }

    #[test]
    fn view_transform_dedup() {
        let mut mgr = DisplayManager::new();
        mgr.add_view_transform(ViewTransform::new("ACES 1.0 - SDR Video"));
        mgr.add_view_transform(ViewTransform::new("ACES 1.0 - SDR Video"));
        assert_eq!(mgr.view_transforms().len(), 1);
    }
}
