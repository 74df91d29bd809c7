use clap::Args;
use eyre::Result;
use tessera_pipeline::Pipeline;

use super::{PipelineArgs, UnwrapOrExit};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let merged = Pipeline::new()
            .check(&self.pipeline.entry, self.pipeline.options())
            .unwrap_or_exit();

        println!("✓ {} is valid\n", self.pipeline.entry.display());

        let props = merged.properties.len();
        let aliases = merged.aliases.len();
        println!(
            "  {} propert{}, {} alias{}",
            props,
            if props == 1 { "y" } else { "ies" },
            aliases,
            if aliases == 1 { "" } else { "es" }
        );

        let files = merged.source_files.len();
        println!(
            "\n  {} source file{}:",
            files,
            if files == 1 { "" } else { "s" }
        );
        for path in &merged.source_files {
            println!("    {}", path.display());
        }

        Ok(())
    }
}
