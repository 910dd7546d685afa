//! Configuration validation.
//!
//! Detects broken cross-references before a config is handed to a host:
//! - color spaces referenced by transforms but never added
//! - roles, views, and shared views pointing at missing color spaces
//! - look references to undefined looks
//! - duplicate color space names
//!
//! # Example
//!
//! ```
//! use amf_config::{validate, Config};
//!
//! let config = Config::raw();
//! let issues = validate::check(&config);
//! assert!(!validate::has_errors(&issues));
//! ```

use std::collections::HashSet;

use crate::config::Config;
use crate::display::USE_DISPLAY_NAME;
use crate::look::parse_looks;
use crate::transform::Transform;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning - config works but may have issues.
    Warning,
    /// Error - config has problems that will cause failures.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A validation issue found in the config.
#[derive(Debug, Clone)]
pub struct Issue {
    /// Severity level.
    pub severity: Severity,
    /// Issue category.
    pub category: IssueCategory,
    /// Human-readable message.
    pub message: String,
    /// Related element (color space name, role, etc.).
    pub context: Option<String>,
}

/// Categories of validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCategory {
    /// Missing color space reference.
    MissingColorSpace,
    /// Missing look reference.
    MissingLook,
    /// Missing display/view reference.
    MissingDisplay,
    /// Missing view transform reference.
    MissingViewTransform,
    /// Undeclared environment variable.
    UndeclaredVariable,
    /// Duplicate definition.
    Duplicate,
}

/// Validates a config and returns all issues found.
pub fn check(config: &Config) -> Vec<Issue> {
    let mut issues = Vec::new();

    check_colorspaces(config, &mut issues);
    check_roles(config, &mut issues);
    check_displays(config, &mut issues);
    check_transform_refs(config, &mut issues);

    issues
}

/// Returns true if there are any errors.
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Returns true if there are any warnings or errors.
pub fn has_warnings(issues: &[Issue]) -> bool {
    issues
        .iter()
        .any(|i| i.severity == Severity::Warning || i.severity == Severity::Error)
}

fn check_colorspaces(config: &Config, issues: &mut Vec<Issue>) {
    let mut names: HashSet<String> = HashSet::new();

    for cs in config.colorspaces() {
        if !names.insert(cs.name().to_ascii_lowercase()) {
            issues.push(Issue {
                severity: Severity::Error,
                category: IssueCategory::Duplicate,
                message: format!("duplicate color space name: '{}'", cs.name()),
                context: Some(cs.name().to_string()),
            });
        }
    }

    for name in config.inactive_colorspaces() {
        if config.colorspace(name).is_none() {
            issues.push(Issue {
                severity: Severity::Warning,
                category: IssueCategory::MissingColorSpace,
                message: format!("inactive color space '{}' is not defined", name),
                context: Some(name.clone()),
            });
        }
    }
}

fn check_roles(config: &Config, issues: &mut Vec<Issue>) {
    for (role, cs_name) in config.roles().iter() {
        if config.colorspace(cs_name).is_none() {
            issues.push(Issue {
                severity: Severity::Error,
                category: IssueCategory::MissingColorSpace,
                message: format!(
                    "role '{}' references non-existent color space '{}'",
                    role, cs_name
                ),
                context: Some(role.to_string()),
            });
        }
    }
}

fn check_displays(config: &Config, issues: &mut Vec<Issue>) {
    for display in config.displays().displays() {
        for view in display.views() {
            if config.colorspace(view.colorspace()).is_none() {
                issues.push(Issue {
                    severity: Severity::Error,
                    category: IssueCategory::MissingColorSpace,
                    message: format!(
                        "view '{}' in display '{}' references non-existent color space '{}'",
                        view.name(),
                        display.name(),
                        view.colorspace()
                    ),
                    context: Some(format!("{}:{}", display.name(), view.name())),
                });
            }
            if let Some(vt) = view.view_transform() {
                if config.view_transform(vt).is_none() {
                    issues.push(Issue {
                        severity: Severity::Error,
                        category: IssueCategory::MissingViewTransform,
                        message: format!(
                            "view '{}' in display '{}' references non-existent view transform '{}'",
                            view.name(),
                            display.name(),
                            vt
                        ),
                        context: Some(format!("{}:{}", display.name(), view.name())),
                    });
                }
            }
        }

        for shared in display.shared_views() {
            if config.displays().shared_view(shared).is_none() {
                issues.push(Issue {
                    severity: Severity::Error,
                    category: IssueCategory::MissingDisplay,
                    message: format!(
                        "display '{}' binds undefined shared view '{}'",
                        display.name(),
                        shared
                    ),
                    context: Some(display.name().to_string()),
                });
            }
        }
    }

    for shared in config.displays().shared_views() {
        if shared.colorspace != USE_DISPLAY_NAME && config.colorspace(&shared.colorspace).is_none()
        {
            issues.push(Issue {
                severity: Severity::Error,
                category: IssueCategory::MissingColorSpace,
                message: format!(
                    "shared view '{}' references non-existent color space '{}'",
                    shared.name, shared.colorspace
                ),
                context: Some(shared.name.clone()),
            });
        }
        if config.view_transform(&shared.view_transform).is_none() {
            issues.push(Issue {
                severity: Severity::Error,
                category: IssueCategory::MissingViewTransform,
                message: format!(
                    "shared view '{}' references non-existent view transform '{}'",
                    shared.name, shared.view_transform
                ),
                context: Some(shared.name.clone()),
            });
        }
        for (look, _) in parse_looks(&shared.looks) {
            if config.look(look).is_none() {
                issues.push(Issue {
                    severity: Severity::Error,
                    category: IssueCategory::MissingLook,
                    message: format!(
                        "shared view '{}' references non-existent look '{}'",
                        shared.name, look
                    ),
                    context: Some(shared.name.clone()),
                });
            }
        }
    }
}

/// Walks every transform reachable from the config and checks the entities
/// it references.
fn check_transform_refs(config: &Config, issues: &mut Vec<Issue>) {
    let mut walk = |owner: &str, t: Option<&Transform>| {
        if let Some(t) = t {
            walk_transform(config, owner, t, issues);
        }
    };

    for cs in config.colorspaces() {
        walk(cs.name(), cs.to_reference());
        walk(cs.name(), cs.from_reference());
    }
    for look in config.looks().all() {
        walk(look.name(), look.get_transform());
        walk(look.name(), look.get_inverse_transform());
    }
    for nt in config.named_transforms() {
        walk(nt.name(), nt.forward_transform());
        walk(nt.name(), nt.inverse_transform());
    }
    for vt in config.view_transforms() {
        walk(vt.name(), vt.from_scene_reference());
        walk(vt.name(), vt.to_scene_reference());
    }
}

fn walk_transform(config: &Config, owner: &str, t: &Transform, issues: &mut Vec<Issue>) {
    match t {
        Transform::ColorSpace(cst) => {
            check_space_ref(config, owner, &cst.src, issues);
            check_space_ref(config, owner, &cst.dst, issues);
        }
        Transform::Look(lt) => {
            check_space_ref(config, owner, &lt.src, issues);
            check_space_ref(config, owner, &lt.dst, issues);
            for (look, _) in parse_looks(&lt.looks) {
                if config.look(look).is_none() {
                    issues.push(Issue {
                        severity: Severity::Error,
                        category: IssueCategory::MissingLook,
                        message: format!(
                            "transform in '{}' references non-existent look '{}'",
                            owner, look
                        ),
                        context: Some(owner.to_string()),
                    });
                }
            }
        }
        Transform::DisplayView(dvt) => {
            check_space_ref(config, owner, &dvt.src, issues);
            match config.displays().display(&dvt.display) {
                None => issues.push(Issue {
                    severity: Severity::Error,
                    category: IssueCategory::MissingDisplay,
                    message: format!(
                        "transform in '{}' references non-existent display '{}'",
                        owner, dvt.display
                    ),
                    context: Some(owner.to_string()),
                }),
                Some(d) if !d.has_view(&dvt.view) => issues.push(Issue {
                    severity: Severity::Error,
                    category: IssueCategory::MissingDisplay,
                    message: format!(
                        "transform in '{}' references non-existent view '{}' of display '{}'",
                        owner, dvt.view, dvt.display
                    ),
                    context: Some(owner.to_string()),
                }),
                _ => {}
            }
        }
        Transform::Group(g) => {
            for inner in &g.transforms {
                walk_transform(config, owner, inner, issues);
            }
        }
        _ => {}
    }
}

/// Checks a color-space reference inside a transform. Context references
/// resolve through declared environment variables; a resolved name may be a
/// color space, a role, or a named transform.
fn check_space_ref(config: &Config, owner: &str, name: &str, issues: &mut Vec<Issue>) {
    if name.is_empty() || name == USE_DISPLAY_NAME {
        return;
    }

    let resolved;
    let name = if name.contains('$') {
        resolved = config.environment().resolve(name);
        if resolved.contains('$') {
            issues.push(Issue {
                severity: Severity::Warning,
                category: IssueCategory::UndeclaredVariable,
                message: format!(
                    "transform in '{}' references undeclared variable '{}'",
                    owner, name
                ),
                context: Some(owner.to_string()),
            });
            return;
        }
        resolved.as_str()
    } else {
        name
    };

    if config.colorspace(name).is_none() && config.named_transform(name).is_none() {
        issues.push(Issue {
            severity: Severity::Error,
            category: IssueCategory::MissingColorSpace,
            message: format!(
                "transform in '{}' references non-existent color space '{}'",
                owner, name
            ),
            context: Some(owner.to_string()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorspace::ColorSpace;
    use crate::transform::{ColorSpaceTransform, Transform, TransformDirection};

    #[test]
    fn raw_config_is_clean() {
        let issues = check(&Config::raw());
        assert!(!has_errors(&issues));
    }

    #[test]
    fn missing_transform_ref_is_error() {
        let mut config = Config::new();
        config.add_colorspace(
            ColorSpace::builder("A")
                .to_reference(Transform::ColorSpace(ColorSpaceTransform {
                    src: "A".into(),
                    dst: "Missing".into(),
                    data_bypass: false,
                    direction: TransformDirection::Forward,
                }))
                .build(),
        );

        let issues = check(&config);
        assert!(has_errors(&issues));
        assert!(issues
            .iter()
            .any(|i| i.category == IssueCategory::MissingColorSpace));
    }

    #[test]
    fn context_ref_resolves_through_environment() {
        let mut config = Config::new();
        config.add_colorspace(ColorSpace::builder("ACES2065-1").build());
        config.add_colorspace(
            ColorSpace::builder("A")
                .to_reference(Transform::ColorSpace(ColorSpaceTransform {
                    src: "$SHOT_LOOKS".into(),
                    dst: "ACES2065-1".into(),
                    data_bypass: true,
                    direction: TransformDirection::Forward,
                }))
                .build(),
        );
        config.add_environment_var("SHOT_LOOKS", "ACES2065-1");

        assert!(!has_errors(&check(&config)));
    }

    #[test]
    fn undeclared_variable_is_warning() {
        let mut config = Config::new();
        config.add_colorspace(
            ColorSpace::builder("A")
                .to_reference(Transform::ColorSpace(ColorSpaceTransform {
                    src: "$UNSET".into(),
                    dst: "A".into(),
                    data_bypass: false,
                    direction: TransformDirection::Forward,
                }))
                .build(),
        );

        let issues = check(&config);
        assert!(!has_errors(&issues));
        assert!(has_warnings(&issues));
    }

    #[test]
    fn role_missing_target_is_error() {
        let mut config = Config::new();
        config.add_colorspace(ColorSpace::builder("A").build());
        config.set_role("scene_linear", "B");

        let issues = check(&config);
        assert!(has_errors(&issues));
    }
}
