//! Target value object - defines which platform to emit bindings for

use serde::{Deserialize, Serialize};

/// Target platform for emission
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    /// Swift bindings for iOS
    Ios,
    /// Kotlin bindings for Android
    Android,
    /// TypeScript bindings for the web
    Web,
}

impl Target {
    /// Every supported target, in emission order
    pub const ALL: [Target; 3] = [Target::Ios, Target::Android, Target::Web];

    /// Get the directory name for this target's output tree
    pub fn directory_name(&self) -> &'static str {
        match self {
            Target::Ios => "ios",
            Target::Android => "android",
            Target::Web => "web",
        }
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Target::Ios => "iOS",
            Target::Android => "Android",
            Target::Web => "Web",
        }
    }

    /// Source file extension for generated artifacts
    pub fn source_extension(&self) -> &'static str {
        match self {
            Target::Ios => "swift",
            Target::Android => "kt",
            Target::Web => "ts",
        }
    }

    /// Root folder of the target's asset convention
    pub fn asset_folder(&self) -> &'static str {
        match self {
            Target::Ios => "Resources",
            Target::Android => "res",
            Target::Web => "static",
        }
    }

    /// Program checked before emitting for this target
    pub fn default_toolchain(&self) -> &'static str {
        match self {
            Target::Ios => "swiftc",
            Target::Android => "kotlinc",
            Target::Web => "node",
        }
    }

    /// Parse a loose target name (as found in env vars)
    pub fn parse_loose(s: &str) -> Option<Target> {
        match s.trim().to_lowercase().as_str() {
            "ios" | "swift" => Some(Target::Ios),
            "android" | "kotlin" => Some(Target::Android),
            "web" | "ts" | "typescript" => Some(Target::Web),
            _ => None,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
