//! PATH-based toolchain lookup

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::domain::ports::ToolchainCheck;
use crate::domain::value_objects::Target;
use crate::error::{SwatchError, SwatchResult};

/// Looks for each target's compiler on `PATH`
#[derive(Debug, Clone, Default)]
pub struct PathToolchain {
    programs: HashMap<Target, String>,
    search_path: Option<OsString>,
}

impl PathToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `program` instead of the target's default compiler
    pub fn with_program(mut self, target: Target, program: impl Into<String>) -> Self {
        self.programs.insert(target, program.into());
        self
    }

    /// Search `path` instead of the `PATH` environment variable
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    pub fn program(&self, target: Target) -> &str {
        self.programs
            .get(&target)
            .map(String::as_str)
            .unwrap_or_else(|| target.default_toolchain())
    }

    fn find(&self, program: &str) -> Option<PathBuf> {
        let direct = Path::new(program);
        if direct.components().count() > 1 {
            return direct.is_file().then(|| direct.to_path_buf());
        }
        let search = self
            .search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"))?;
        std::env::split_paths(&search).find_map(|dir| {
            executable_names(program)
                .into_iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }
}

impl ToolchainCheck for PathToolchain {
    fn check(&self, target: Target) -> SwatchResult<()> {
        let program = self.program(target);
        match self.find(program) {
            Some(_) => Ok(()),
            None => Err(SwatchError::ToolchainUnavailable {
                target,
                program: program.to_string(),
            }),
        }
    }
}

fn executable_names(program: &str) -> Vec<String> {
    if cfg!(windows) {
        vec![format!("{}.exe", program), format!("{}.cmd", program), program.to_string()]
    } else {
        vec![program.to_string()]
    }
}
