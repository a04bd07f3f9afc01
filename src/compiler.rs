use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{IconError, Result};
use crate::logger::log_command;

/// Packs a staged `.iconset` directory into a single icon container.
pub trait IconCompiler {
    fn compile(&self, staging: &Path, output: &Path) -> Result<PathBuf>;
}

impl<F> IconCompiler for F
where
    F: Fn(&Path, &Path) -> Result<PathBuf>,
{
    fn compile(&self, staging: &Path, output: &Path) -> Result<PathBuf> {
        self(staging, output)
    }
}

/// macOS `iconutil -c icns <staging> -o <output>`.
#[derive(Debug, Clone)]
pub struct Iconutil {
    program: String,
}

impl Iconutil {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for Iconutil {
    fn default() -> Self {
        Self::new("iconutil")
    }
}

impl IconCompiler for Iconutil {
    fn compile(&self, staging: &Path, output: &Path) -> Result<PathBuf> {
        let args = vec![
            "-c".to_string(),
            "icns".to_string(),
            staging.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        log_command(&self.program, &args);

        let out = Command::new(&self.program)
            .args(["-c", "icns"])
            .arg(staging)
            .arg("-o")
            .arg(output)
            .output()
            .map_err(|source| IconError::Spawn { program: self.program.clone(), source })?;

        if !out.status.success() {
            return Err(IconError::Compiler {
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(output.to_path_buf())
    }
}
