use std::path::{Path, PathBuf};

use eyre::Result;

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had identical content and was left untouched
    Unchanged,
}

/// A generated artifact to be written to disk
#[derive(Debug, Clone)]
pub struct Artifact {
    path: PathBuf,
    content: String,
}

impl Artifact {
    /// Create a new artifact with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Write the artifact, skipping the write when the file already matches.
    pub fn write(&self) -> Result<WriteResult> {
        if let Ok(existing) = std::fs::read_to_string(&self.path)
            && existing == self.content
        {
            return Ok(WriteResult::Unchanged);
        }
        write_file(&self.path, &self.content)?;
        Ok(WriteResult::Written)
    }
}

/// A make-style dependency file (`target: dep1 dep2`).
#[derive(Debug, Clone)]
pub struct DepFile {
    target: String,
    dependencies: Vec<PathBuf>,
}

impl DepFile {
    /// Create a dependency file for `target`.
    pub fn new(target: impl Into<String>, dependencies: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            target: target.into(),
            dependencies: dependencies.into_iter().collect(),
        }
    }

    /// Render the dependency rule.
    ///
    /// Spaces inside paths are escaped with a backslash as make expects.
    pub fn render(&self) -> String {
        let mut out = escape_make(&self.target);
        out.push(':');
        for dep in &self.dependencies {
            out.push_str(" \\\n  ");
            out.push_str(&escape_make(&dep.display().to_string()));
        }
        out.push('\n');
        out
    }

    /// Write the dependency file to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        write_file(path, &self.render())
    }
}

fn escape_make(s: &str) -> String {
    s.replace(' ', "\\ ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/tokens.js");
        let artifact = Artifact::new(&path, "module.exports = {};\n");

        assert_eq!(artifact.write().unwrap(), WriteResult::Written);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "module.exports = {};\n"
        );
    }

    #[test]
    fn test_artifact_write_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.scss");
        let artifact = Artifact::new(&path, "$one: red;\n");

        assert_eq!(artifact.write().unwrap(), WriteResult::Written);
        assert_eq!(artifact.write().unwrap(), WriteResult::Unchanged);
    }

    #[test]
    fn test_depfile_render() {
        let dep = DepFile::new(
            "out/tokens.js",
            vec![PathBuf::from("/a/props.json"), PathBuf::from("/a/my import.json")],
        );
        assert_eq!(
            dep.render(),
            "out/tokens.js: \\\n  /a/props.json \\\n  /a/my\\ import.json\n"
        );
    }

    #[test]
    fn test_depfile_without_dependencies() {
        let dep = DepFile::new("out.css", Vec::new());
        assert_eq!(dep.render(), "out.css:\n");
    }
}
