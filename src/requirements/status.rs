//! Presence status types.
//!
//! Every capability probe produces a [`Presence`]: PATH lookups and package
//! manager queries alike.

use std::path::PathBuf;

use serde::Serialize;

/// Whether a tool is available on the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Presence {
    /// The tool is installed. The path is known when it was found on PATH.
    Present {
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
    },

    /// The tool is definitely not installed.
    Absent,

    /// The probe could not decide (no PATH, query failed to run).
    Unknown,
}

impl Presence {
    /// Present at a known location.
    pub fn found_at(path: PathBuf) -> Self {
        Presence::Present { path: Some(path) }
    }

    /// Present according to a package manager, location unknown.
    pub fn installed() -> Self {
        Presence::Present { path: None }
    }

    /// Whether the tool is installed.
    pub fn is_present(&self) -> bool {
        matches!(self, Presence::Present { .. })
    }

    /// Location of the binary, when known.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Presence::Present { path } => path.as_ref(),
            _ => None,
        }
    }

    /// Combine with a fallback probe, run only when this one did not find the tool.
    pub fn or_else(self, fallback: impl FnOnce() -> Presence) -> Presence {
        if self.is_present() {
            return self;
        }
        match fallback() {
            found @ Presence::Present { .. } => found,
            Presence::Unknown if self == Presence::Absent => Presence::Absent,
            other => other,
        }
    }
}

/// Presence of one named tool, as reported by `dotstrap status`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolStatus {
    /// Tool name from the descriptor.
    pub name: String,
    /// The probe result.
    pub presence: Presence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_reports_path() {
        let presence = Presence::found_at(PathBuf::from("/usr/bin/git"));
        assert!(presence.is_present());
        assert_eq!(presence.path(), Some(&PathBuf::from("/usr/bin/git")));
    }

    #[test]
    fn installed_has_no_path() {
        let presence = Presence::installed();
        assert!(presence.is_present());
        assert!(presence.path().is_none());
    }

    #[test]
    fn absent_and_unknown_are_not_present() {
        assert!(!Presence::Absent.is_present());
        assert!(!Presence::Unknown.is_present());
        assert!(Presence::Unknown.path().is_none());
    }

    #[test]
    fn or_else_skips_fallback_when_present() {
        let presence = Presence::installed().or_else(|| panic!("fallback must not run"));
        assert!(presence.is_present());
    }

    #[test]
    fn or_else_uses_fallback_result() {
        assert_eq!(
            Presence::Absent.or_else(Presence::installed),
            Presence::installed()
        );
        assert_eq!(
            Presence::Unknown.or_else(|| Presence::Absent),
            Presence::Absent
        );
    }

    #[test]
    fn or_else_keeps_definite_absence_over_unknown() {
        assert_eq!(
            Presence::Absent.or_else(|| Presence::Unknown),
            Presence::Absent
        );
    }

    #[test]
    fn presence_serializes_with_state_tag() {
        let json = serde_json::to_value(Presence::found_at(PathBuf::from("/bin/zsh"))).unwrap();
        assert_eq!(json["state"], "present");
        assert_eq!(json["path"], "/bin/zsh");

        let json = serde_json::to_value(Presence::Absent).unwrap();
        assert_eq!(json["state"], "absent");
    }
}
