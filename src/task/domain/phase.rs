//! Phase classification assigned to a task at extraction time.

use super::ParseTaskPhaseError;
use serde::{Deserialize, Serialize};

/// Project phase a task belongs to.
///
/// The phase is assigned by the (external) extraction step and is immutable
/// thereafter. Phases carry a total order used by the scheduling heuristics:
/// a task in a later phase never precedes a same-source task in an earlier
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPhase {
    /// Project scaffolding and directory layout.
    ProjectSetup,
    /// Installing packages and toolchain dependencies.
    DependencyInstallation,
    /// Implementing product features.
    FeatureImplementation,
    /// Writing or running tests.
    Testing,
    /// Wrap-up work after everything else.
    Complete,
}

impl TaskPhase {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProjectSetup => "project_setup",
            Self::DependencyInstallation => "dependency_installation",
            Self::FeatureImplementation => "feature_implementation",
            Self::Testing => "testing",
            Self::Complete => "complete",
        }
    }

    /// Returns the position of this phase in scheduling order.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::ProjectSetup => 0,
            Self::DependencyInstallation => 1,
            Self::FeatureImplementation => 2,
            Self::Testing => 3,
            Self::Complete => 4,
        }
    }
}

impl TryFrom<&str> for TaskPhase {
    type Error = ParseTaskPhaseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "project_setup" => Ok(Self::ProjectSetup),
            "dependency_installation" => Ok(Self::DependencyInstallation),
            "feature_implementation" => Ok(Self::FeatureImplementation),
            "testing" => Ok(Self::Testing),
            "complete" => Ok(Self::Complete),
            _ => Err(ParseTaskPhaseError(value.to_owned())),
        }
    }
}
