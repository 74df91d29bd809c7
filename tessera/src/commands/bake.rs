use std::{
    io::Write,
    path::{Path, PathBuf},
};

use clap::Args;
use eyre::{Context, Result};
use tessera_core::{Artifact, DepFile, WriteResult};
use tessera_pipeline::{Format, Pipeline};
use tracing::debug;

use super::{PipelineArgs, UnwrapOrExit};

#[derive(Args)]
pub struct BakeCommand {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Transform name (overrides config and query)
    #[arg(short, long)]
    pub transform: Option<String>,

    /// Format name (overrides config and query)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output file or directory (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a make-style depfile listing every file read
    #[arg(long)]
    pub deps: Option<PathBuf>,
}

impl BakeCommand {
    /// Run the bake command
    pub fn run(&self) -> Result<()> {
        let mut options = self.pipeline.options();
        if let Some(transform) = &self.transform {
            options = options.transform(transform.clone());
        }
        if let Some(format) = &self.format {
            options.format.format_type = format.clone();
        }

        let output_path = self
            .output
            .as_deref()
            .map(|path| self.output_file(path, &options.format.format_type));
        let result = Pipeline::new().run(&self.pipeline.entry, options);

        // Dependencies are recorded even for failed runs.
        if let Some(deps) = &self.deps {
            let source_files = match &result {
                Ok(output) => output.source_files.clone(),
                Err(failure) => failure.source_files.clone(),
            };
            DepFile::new(self.target(output_path.as_deref()), source_files)
                .write(deps)
                .wrap_err_with(|| format!("Failed to write {}", deps.display()))?;
            debug!(path = %deps.display(), "wrote depfile");
        }

        let output = result.unwrap_or_exit();
        match &output_path {
            Some(path) => {
                let artifact = Artifact::new(path, output.text);
                let status = artifact
                    .write()
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                if status == WriteResult::Unchanged {
                    debug!(path = %path.display(), "output unchanged");
                }
            }
            None => {
                std::io::stdout()
                    .write_all(output.text.as_bytes())
                    .wrap_err("Failed to write output")?;
            }
        }

        Ok(())
    }

    /// The file to write: `path` itself, or `<entry stem>.<ext>` inside it
    /// when `path` is an existing directory.
    fn output_file(&self, path: &Path, format_type: &str) -> PathBuf {
        if !path.is_dir() {
            return path.to_path_buf();
        }
        let extension = format_type
            .parse::<Format>()
            .map(|format| format.extension())
            .unwrap_or("txt");
        let stem = self.pipeline.entry.file_stem().unwrap_or_default();
        path.join(stem).with_extension(extension)
    }

    fn target(&self, output: Option<&Path>) -> String {
        output
            .unwrap_or(self.pipeline.entry.as_path())
            .display()
            .to_string()
    }
}
