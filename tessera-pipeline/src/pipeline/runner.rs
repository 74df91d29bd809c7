//! Pipeline orchestrator.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tessera_document::MergedDocument;
use tracing::{debug, info_span};

use super::{
    CompilationContext, Phase, PhaseInfo,
    phases::{FormatPhase, ResolvePhase, TransformPhase, ValidatePhase},
};
use crate::{
    Failure, Options,
    resolve::{FsLoader, Loader},
    validate::Validator,
};

/// The result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// The rendered text.
    pub text: String,
    /// Every file read, in first-read order.
    pub source_files: Vec<PathBuf>,
}

/// The compilation pipeline orchestrator.
///
/// A pipeline holds no per-run state, so one instance can serve any number
/// of runs, including concurrent ones.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new();
/// let output = pipeline.run("tokens/props.json", Options::new().transform("ios"))?;
/// ```
pub struct Pipeline {
    loader: Arc<dyn Loader>,
    validator: Arc<Validator>,
}

impl Pipeline {
    /// Create a pipeline that reads from the filesystem.
    pub fn new() -> Self {
        Self {
            loader: Arc::new(FsLoader),
            validator: Arc::new(Validator::new()),
        }
    }

    /// Read documents through `loader` instead of the filesystem.
    pub fn with_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Replace the default validator.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// The phases a full run executes, in order.
    pub fn phases(&self) -> Vec<PhaseInfo> {
        self.build_phases().iter().map(|phase| phase.info()).collect()
    }

    /// Compile the document at `entry`.
    ///
    /// The `get_options` hook runs once before anything else. On failure the
    /// returned [`Failure`] still lists every file read up to that point.
    pub fn run(&self, entry: impl AsRef<Path>, options: Options) -> Result<Output, Failure> {
        let entry = entry.as_ref();
        let _span = info_span!("run", entry = %entry.display()).entered();

        let options = options.resolve();
        debug!(
            transform = %options.transform.name,
            format = %options.format.format_type,
            "effective options"
        );

        let mut ctx = CompilationContext::new(entry, options);
        self.run_phases(&self.build_phases(), &mut ctx)?;

        let source_files = ctx.source_files();
        Ok(Output {
            text: ctx.output.unwrap_or_default(),
            source_files,
        })
    }

    /// Resolve and validate `entry` without transforming or rendering it.
    pub fn check(
        &self,
        entry: impl AsRef<Path>,
        options: Options,
    ) -> Result<MergedDocument, Failure> {
        let entry = entry.as_ref();
        let _span = info_span!("check", entry = %entry.display()).entered();

        let mut ctx = CompilationContext::new(entry, options.resolve());
        let phases: Vec<Box<dyn Phase>> = vec![
            Box::new(ResolvePhase::new(self.loader.clone())),
            Box::new(ValidatePhase::new(self.validator.clone())),
        ];
        self.run_phases(&phases, &mut ctx)?;

        Ok(ctx.merged.unwrap_or_default())
    }

    fn build_phases(&self) -> Vec<Box<dyn Phase>> {
        vec![
            Box::new(ResolvePhase::new(self.loader.clone())),
            Box::new(ValidatePhase::new(self.validator.clone())),
            Box::new(TransformPhase),
            Box::new(FormatPhase),
        ]
    }

    fn run_phases(
        &self,
        phases: &[Box<dyn Phase>],
        ctx: &mut CompilationContext,
    ) -> Result<(), Failure> {
        for phase in phases {
            debug!(phase = phase.name(), "running phase");
            if let Err(error) = phase.run(ctx) {
                debug!(phase = phase.name(), kind = %error.kind(), "phase failed");
                return Err(Failure {
                    error: *error,
                    source_files: ctx.source_files(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io};

    use super::*;
    use crate::ErrorKind;

    #[derive(Default)]
    struct MemoryLoader {
        files: HashMap<PathBuf, String>,
    }

    impl MemoryLoader {
        fn file(mut self, path: &str, content: &str) -> Self {
            self.files.insert(PathBuf::from(path), content.to_string());
            self
        }
    }

    impl Loader for MemoryLoader {
        fn load(&self, path: &Path) -> io::Result<String> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }
    }

    fn pipeline() -> Pipeline {
        Pipeline::new().with_loader(
            MemoryLoader::default()
                .file(
                    "/t/props.json",
                    r#"{ "imports": ["./colors.json"],
                         "props": { "accent": { "value": "{!red}", "category": "color" },
                                    "gap": { "value": "8px", "category": "spacing" } } }"#,
                )
                .file(
                    "/t/colors.json",
                    r##"{ "aliases": { "red": "#ff0000" },
                          "props": { "base": { "value": "#ffffff", "category": "color" } } }"##,
                )
                .file(
                    "/t/broken.json",
                    r#"{ "imports": ["./missing.json"] }"#,
                ),
        )
    }

    #[test]
    fn test_pipeline_phases() {
        let names: Vec<_> = Pipeline::new().phases().iter().map(|p| p.name).collect();
        assert_eq!(names, ["resolve", "validate", "transform", "format"]);
    }

    #[test]
    fn test_run_default_options() {
        let output = pipeline()
            .run("/t/props.json", Options::new())
            .expect("run should succeed");

        insta::assert_snapshot!(output.text, @r#"
        module.exports = {
          base: "rgb(255, 255, 255)",
          accent: "rgb(255, 0, 0)",
          gap: "8px",
        };
        "#);
        assert_eq!(
            output.source_files,
            [PathBuf::from("/t/props.json"), PathBuf::from("/t/colors.json")]
        );
    }

    #[test]
    fn test_run_failure_keeps_source_files() {
        let failure = pipeline()
            .run("/t/broken.json", Options::new())
            .expect_err("missing import should fail");

        assert_eq!(failure.kind(), ErrorKind::MissingFile);
        assert_eq!(
            failure.source_files,
            [PathBuf::from("/t/broken.json"), PathBuf::from("/t/missing.json")]
        );
    }

    #[test]
    fn test_get_options_runs_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let options = Options::new().get_options(move |options| {
            counter.fetch_add(1, Ordering::SeqCst);
            options.format("json")
        });

        let output = pipeline()
            .run("/t/props.json", options)
            .expect("run should succeed");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(output.text.starts_with('{'));
    }

    #[test]
    fn test_check_stops_before_transform() {
        let merged = pipeline()
            .check("/t/props.json", Options::new().transform("nope"))
            .expect("check should succeed");

        assert_eq!(merged.properties.len(), 3);
        assert!(merged.reads(Path::new("/t/colors.json")));
    }

    #[test]
    fn test_transform_rechecks_without_validator() {
        let pipeline = Pipeline::new()
            .with_loader(MemoryLoader::default().file(
                "/t/props.json",
                r#"{ "props": { "one": { "value": "{!nope}", "category": "size" } } }"#,
            ))
            .with_validator(Validator::empty());

        let failure = pipeline
            .run("/t/props.json", Options::new())
            .expect_err("undefined alias should fail");

        assert_eq!(failure.kind(), ErrorKind::Validation);
        assert!(failure.to_string().contains("\"nope\""));
    }
}
