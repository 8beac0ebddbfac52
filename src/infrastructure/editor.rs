//! Editing post bodies in an external editor

use crate::error::{RosetintError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Session for editing text in an external editor
pub struct EditorSession {
    command: String,
}

impl EditorSession {
    /// Create a new editor session with the given command
    pub fn new(editor_command: String) -> Self {
        EditorSession {
            command: editor_command,
        }
    }

    /// Open `content` in the editor, wait for it to exit, and return the
    /// edited text. The scratch file lives in `scratch_dir` and is removed
    /// afterwards.
    pub fn edit(&self, scratch_dir: &Path, name: &str, content: &str) -> Result<String> {
        fs::create_dir_all(scratch_dir)?;
        let path = scratch_path(scratch_dir, name);
        fs::write(&path, content)?;

        let result = self.run(&path).and_then(|_| fs::read_to_string(&path).map_err(RosetintError::Io));
        if let Err(e) = fs::remove_file(&path) {
            debug!(path = %path.display(), error = %e, "could not remove scratch file");
        }
        result
    }

    fn run(&self, file_path: &Path) -> Result<()> {
        let (program, args) = self.parse_command();

        let mut all_args = args;
        all_args.push(file_path.to_string_lossy().to_string());

        // On Windows, use cmd /c to ensure .bat and .cmd files are found
        #[cfg(windows)]
        let status = Command::new("cmd")
            .arg("/C")
            .arg(&program)
            .args(&all_args)
            .status();

        #[cfg(not(windows))]
        let status = Command::new(&program).args(&all_args).status();

        let status = status.map_err(|e| {
            RosetintError::Editor(format!("Failed to launch editor '{}': {}", program, e))
        })?;

        if !status.success() {
            return Err(RosetintError::Editor(format!(
                "Editor '{}' exited with {}",
                program, status
            )));
        }

        Ok(())
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> (String, Vec<String>) {
        let parts: Vec<&str> = self.command.split_whitespace().collect();

        match parts.split_first() {
            Some((program, rest)) => (
                program.to_string(),
                rest.iter().map(|s| s.to_string()).collect(),
            ),
            // Fallback to notepad if command is empty
            None => ("notepad".to_string(), vec![]),
        }
    }
}

fn scratch_path(dir: &Path, name: &str) -> PathBuf {
    let safe: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    dir.join(format!("{}.rosetint-edit-{}.md", safe, std::process::id()))
}
