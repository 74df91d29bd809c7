use clap::Args;
use eyre::Result;
use tessera_pipeline::Pipeline;

use super::PipelineArgs;

#[derive(Args)]
pub struct DepsCommand {
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

impl DepsCommand {
    /// Print every file the entry reads, one per line.
    ///
    /// Files are listed even when resolution fails part way, and the exit
    /// status reports the failure.
    pub fn run(&self) -> Result<()> {
        let pipeline = Pipeline::new();
        let (source_files, failure) =
            match pipeline.check(&self.pipeline.entry, self.pipeline.options()) {
                Ok(merged) => (merged.source_files.into_iter().collect(), None),
                Err(failure) => (failure.source_files.clone(), Some(failure)),
            };

        for path in source_files {
            println!("{}", path.display());
        }

        if let Some(failure) = failure {
            eprintln!("{:?}", miette::Report::new(failure));
            std::process::exit(1);
        }
        Ok(())
    }
}
