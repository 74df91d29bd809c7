//! End-to-end tests for the compilation pipeline.
//!
//! Fixtures are written to a temporary directory so source file paths are
//! real absolute paths, the same as in a host build.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use tessera_pipeline::{ErrorKind, FormatOptions, Options, Pipeline, Token};

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn file(self, name: &str, content: &str) -> Self {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        fs::write(path, content).expect("Failed to write fixture");
        self
    }

    fn path(&self, name: &str) -> PathBuf {
        std::path::absolute(self.dir.path().join(name)).expect("Failed to absolutize")
    }
}

fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths
}

const PROPS: &str = r##"{
  "aliases": { "primary": "#ff0000" },
  "props": {
    "one": { "value": "8px", "category": "spacing" },
    "two": { "value": "white", "category": "background-color", "type": "color" },
    "three": { "value": "{!one}", "category": "spacing" },
    "four": { "value": "0.5", "category": "opacity" },
    "five": { "value": "{!primary}", "category": "color" }
  }
}"##;

fn run(fixture: &Fixture, entry: &str, options: Options) -> tessera_pipeline::Output {
    Pipeline::new()
        .run(fixture.path(entry), options)
        .expect("run should succeed")
}

#[test]
fn test_no_imports_reads_only_entry() {
    let fixture = Fixture::new().file("props.json", PROPS);

    let output = run(&fixture, "props.json", Options::new());

    assert_eq!(output.source_files, [fixture.path("props.json")]);
}

#[test]
fn test_flat_imports_are_all_recorded() {
    let fixture = Fixture::new()
        .file(
            "props.json",
            r#"{ "imports": ["./a.json", "./b.json"],
                 "props": { "own": { "value": "1", "category": "size" } } }"#,
        )
        .file("a.json", r#"{ "props": { "a": { "value": "2", "category": "size" } } }"#)
        .file("b.json", r#"{ "props": { "b": { "value": "3", "category": "size" } } }"#);

    let output = run(&fixture, "props.json", Options::new());

    assert_eq!(
        sorted(output.source_files),
        sorted(vec![
            fixture.path("props.json"),
            fixture.path("a.json"),
            fixture.path("b.json"),
        ])
    );
}

#[test]
fn test_nested_imports_are_transitive() {
    let fixture = Fixture::new()
        .file("props.json", r#"{ "imports": ["./nested/a.json"] }"#)
        .file(
            "nested/a.json",
            r#"{ "imports": ["../base/b.json"],
                 "props": { "a": { "value": "{!b}", "category": "size" } } }"#,
        )
        .file("base/b.json", r#"{ "props": { "b": { "value": "4px", "category": "size" } } }"#);

    let output = run(&fixture, "props.json", Options::new().format("json"));

    assert_eq!(
        output.source_files,
        [
            fixture.path("props.json"),
            fixture.path("nested/a.json"),
            fixture.path("base/b.json"),
        ]
    );
    insta::assert_snapshot!(output.text, @r#"
    {
      "b": "4px",
      "a": "4px"
    }
    "#);
}

#[test]
fn test_invalid_json_is_syntax_error() {
    let fixture = Fixture::new().file("props.json", r#"{ "props": { "one": "#);

    let failure = Pipeline::new()
        .run(fixture.path("props.json"), Options::new())
        .expect_err("invalid JSON should fail");

    assert_eq!(failure.kind(), ErrorKind::Syntax);
    assert_eq!(failure.source_files, [fixture.path("props.json")]);
}

#[test]
fn test_invalid_yaml_is_syntax_error() {
    let fixture = Fixture::new().file("props.yaml", "props:\n  gap: { value: 4px\n");

    let failure = Pipeline::new()
        .run(fixture.path("props.yaml"), Options::new())
        .expect_err("invalid YAML should fail");

    assert_eq!(failure.kind(), ErrorKind::Syntax);
    assert_eq!(failure.source_files, [fixture.path("props.yaml")]);
}

#[test]
fn test_missing_entry_is_recorded() {
    let fixture = Fixture::new();

    let failure = Pipeline::new()
        .run(fixture.path("absent.json"), Options::new())
        .expect_err("missing entry should fail");

    assert_eq!(failure.kind(), ErrorKind::MissingFile);
    assert_eq!(failure.source_files, [fixture.path("absent.json")]);
}

#[test]
fn test_missing_category_names_property() {
    let fixture = Fixture::new().file(
        "props.json",
        r#"{ "props": { "one": { "value": "8px" } } }"#,
    );

    let failure = Pipeline::new()
        .run(fixture.path("props.json"), Options::new())
        .expect_err("missing category should fail");

    assert_eq!(failure.kind(), ErrorKind::Validation);
    assert!(
        failure
            .to_string()
            .contains(r#"Property "one" contained no "category" key"#)
    );
}

#[test]
fn test_missing_import_keeps_source_files() {
    let fixture = Fixture::new().file("props.json", r#"{ "imports": ["./gone.json"] }"#);

    let failure = Pipeline::new()
        .run(fixture.path("props.json"), Options::new())
        .expect_err("missing import should fail");

    assert_eq!(failure.kind(), ErrorKind::MissingFile);
    assert_eq!(
        failure.source_files,
        [fixture.path("props.json"), fixture.path("gone.json")]
    );
}

#[test]
fn test_cyclic_import() {
    let fixture = Fixture::new()
        .file("a.json", r#"{ "imports": ["./b.json"] }"#)
        .file("b.json", r#"{ "imports": ["./a.json"] }"#);

    let failure = Pipeline::new()
        .run(fixture.path("a.json"), Options::new())
        .expect_err("cycle should fail");

    assert_eq!(failure.kind(), ErrorKind::CyclicImport);
}

#[test]
fn test_runs_are_deterministic() {
    let fixture = Fixture::new().file("props.json", PROPS);

    let first = run(&fixture, "props.json", Options::new().format("scss"));
    let second = run(&fixture, "props.json", Options::new().format("scss"));

    assert_eq!(first.text, second.text);
}

#[test]
fn test_common_js_with_props_map() {
    let fixture = Fixture::new().file("props.json", PROPS);
    let format = FormatOptions::new("common.js")
        .props_filter(|token: &Token| token.category == "color")
        .props_map(|mut token: Token| {
            token.name = format!("PREFIX_{}", token.name);
            token
        });

    let output = run(&fixture, "props.json", Options::new().format(format));

    insta::assert_snapshot!(output.text, @r#"
    module.exports = {
      prefixFive: "rgb(255, 0, 0)",
    };
    "#);
}

#[test]
fn test_scss_renders_resolved_values() {
    let fixture = Fixture::new().file("props.json", PROPS);

    let output = run(&fixture, "props.json", Options::new().format("scss"));

    insta::assert_snapshot!(output.text, @r"
    $one: 8px;
    $two: rgb(255, 255, 255);
    $three: 8px;
    $four: 0.5;
    $five: rgb(255, 0, 0);
    ");
}

#[test]
fn test_raw_transform_keeps_literals() {
    let fixture = Fixture::new().file("props.json", PROPS);

    let output = run(
        &fixture,
        "props.json",
        Options::new().transform("raw").format("scss"),
    );

    assert!(output.text.contains("$two: white;"));
}

#[test]
fn test_filter_drops_other_categories() {
    let fixture = Fixture::new().file("props.json", PROPS);
    let format = FormatOptions::new("json").props_filter(|token: &Token| token.category == "color");

    let output = run(&fixture, "props.json", Options::new().format(format));

    assert!(output.text.contains("\"five\""));
    for absent in ["\"one\"", "\"two\"", "\"three\"", "\"four\""] {
        assert!(!output.text.contains(absent), "{absent} should be filtered");
    }
}

#[test]
fn test_get_options_preprocess_deletes_property() {
    let fixture = Fixture::new().file("props.json", PROPS);
    let options = Options::new()
        .with_query("format=raw.json&propToDelete=three")
        .get_options(|mut options| {
            let name = options.params.get("propToDelete").cloned();
            options.transform = options.transform.preprocess(move |doc| {
                if let Some(name) = &name {
                    doc.remove_property(name);
                }
            });
            options
        });

    let output = run(&fixture, "props.json", options);
    let json: serde_json::Value = serde_json::from_str(&output.text).expect("valid JSON");
    let props = json["props"].as_object().expect("props object");

    assert!(!props.contains_key("three"));
    assert!(props.contains_key("four"));
    assert!(props.contains_key("five"));
}

#[test]
fn test_unknown_names_are_rejected() {
    let fixture = Fixture::new().file("props.json", PROPS);
    let pipeline = Pipeline::new();

    let failure = pipeline
        .run(fixture.path("props.json"), Options::new().transform("windows"))
        .expect_err("unknown transform");
    assert_eq!(failure.kind(), ErrorKind::UnknownTransform);

    let failure = pipeline
        .run(fixture.path("props.json"), Options::new().format("xml"))
        .expect_err("unknown format");
    assert_eq!(failure.kind(), ErrorKind::UnknownFormat);
    assert_eq!(failure.source_files, [fixture.path("props.json")]);
}

#[test]
fn test_concurrent_runs_are_independent() {
    let fixture = Fixture::new()
        .file("a.json", PROPS)
        .file(
            "b.json",
            r#"{ "props": { "gap": { "value": "4px", "category": "spacing" } } }"#,
        );
    let pipeline = Pipeline::new();
    let entries = ["a.json", "b.json", "a.json", "b.json"];

    let outputs: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = entries
            .iter()
            .map(|entry| {
                let path = fixture.path(entry);
                let pipeline = &pipeline;
                scope.spawn(move || pipeline.run(&path, Options::new().format("json")))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked").expect("run failed"))
            .collect()
    });

    assert_eq!(outputs[0], outputs[2]);
    assert_eq!(outputs[1], outputs[3]);
    assert_eq!(outputs[1].source_files, [fixture.path("b.json")]);
}

#[test]
fn test_yaml_entry() {
    let fixture = Fixture::new().file(
        "props.yml",
        "props:\n  gap:\n    value: 4px\n    category: spacing\n",
    );

    let output = run(&fixture, "props.yml", Options::new().format("less"));

    assert_eq!(output.text, "@gap: 4px;\n");
    assert!(Path::new(&output.source_files[0]).ends_with("props.yml"));
}
