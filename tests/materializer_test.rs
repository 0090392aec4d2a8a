use serde_json::json;
use std::fs;
use std::path::Path;
use stencil::catalog::TemplateCatalog;
use stencil::error::Error;
use stencil::materializer::materialize;
use stencil::renderer::MiniJinjaRenderer;
use stencil::structure::{Node, Structure};
use tempfile::TempDir;

fn template(name: &str) -> Node {
    Node::Template(name.to_string())
}

fn scaffold() -> Structure {
    Structure::from_iter([
        ("src", Node::Directory(Structure::from_iter([("main.py", template("main.tpl"))]))),
        ("tests", Node::Empty),
    ])
}

fn catalog_with(dir: &Path, templates: &[(&str, &str)]) -> TemplateCatalog {
    for (name, source) in templates {
        fs::write(dir.join(name), source).unwrap();
    }
    TemplateCatalog::new(dir)
}

#[test]
fn test_nested_scaffold() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let base = output.path().join("proj");
    let catalog = catalog_with(templates.path(), &[("main.tpl", "# {{name}}")]);
    let renderer = MiniJinjaRenderer::new();

    let outcome =
        materialize(&scaffold(), &base, &catalog, &renderer, &json!({"name": "demo"})).unwrap();

    assert_eq!(fs::read_to_string(base.join("src/main.py")).unwrap(), "# demo");
    assert!(base.join("tests").is_dir());
    assert_eq!(fs::read_dir(base.join("tests")).unwrap().count(), 0);
    assert_eq!(
        outcome.created,
        [base.join("src"), base.join("src/main.py"), base.join("tests")]
    );
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_idempotent_materialization() {
    let templates = TempDir::new().unwrap();
    let once = TempDir::new().unwrap();
    let twice = TempDir::new().unwrap();
    let catalog = catalog_with(
        templates.path(),
        &[("main.tpl", "# {{ name }}\n{% for m in modules %}import {{ m }}\n{% endfor %}")],
    );
    let renderer = MiniJinjaRenderer::new();
    let context = json!({"name": "demo", "modules": ["os", "sys"]});
    let mut structure = scaffold();
    structure.insert("README.md", template("missing.tpl"));

    materialize(&structure, once.path(), &catalog, &renderer, &context).unwrap();
    materialize(&structure, twice.path(), &catalog, &renderer, &context).unwrap();
    let second = materialize(&structure, twice.path(), &catalog, &renderer, &context).unwrap();

    assert!(!dir_diff::is_different(once.path(), twice.path()).unwrap());
    assert_eq!(second.created.len(), 4);
    assert_eq!(
        fs::read_to_string(twice.path().join("src/main.py")).unwrap(),
        "# demo\nimport os\nimport sys\n"
    );
}

#[test]
fn test_overwrites_existing_file() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let catalog = catalog_with(templates.path(), &[("main.tpl", "fresh")]);
    fs::create_dir(output.path().join("src")).unwrap();
    fs::write(output.path().join("src/main.py"), "stale content").unwrap();

    materialize(&scaffold(), output.path(), &catalog, &MiniJinjaRenderer::new(), &json!({}))
        .unwrap();

    assert_eq!(fs::read_to_string(output.path().join("src/main.py")).unwrap(), "fresh");
}

#[test_log::test]
fn test_missing_template_fallback() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let catalog = TemplateCatalog::new(templates.path());
    let structure = Structure::from_iter([("a.txt", template("missing_template.tpl"))]);

    let outcome =
        materialize(&structure, output.path(), &catalog, &MiniJinjaRenderer::new(), &json!({}))
            .unwrap();

    let file = output.path().join("a.txt");
    assert!(file.is_file());
    assert_eq!(fs::read_to_string(&file).unwrap(), "");
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("missing_template.tpl"));
}

#[test_log::test]
fn test_render_error_aborts_run() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let catalog = catalog_with(templates.path(), &[("broken.tpl", "{% if %}oops")]);
    let structure = Structure::from_iter([
        ("broken.txt", template("broken.tpl")),
        ("after", Node::Empty),
    ]);

    let renderer = MiniJinjaRenderer::new();
    let err = materialize(&structure, output.path(), &catalog, &renderer, &json!({})).unwrap_err();

    assert!(matches!(err, Error::TemplateRenderError(_)));
    assert!(!output.path().join("broken.txt").exists());
    assert!(!output.path().join("after").exists());
}

#[test]
fn test_directory_over_file_conflict() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let catalog = catalog_with(templates.path(), &[("main.tpl", "x")]);
    fs::write(output.path().join("src"), "not a directory").unwrap();

    let renderer = MiniJinjaRenderer::new();
    let err = materialize(&scaffold(), output.path(), &catalog, &renderer, &json!({})).unwrap_err();

    match err {
        Error::EntryConflict { path, expected, found } => {
            assert_eq!(path, output.path().join("src"));
            assert_eq!(expected, "directory");
            assert_eq!(found, "file");
        }
        other => panic!("Expected EntryConflict, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(output.path().join("src")).unwrap(), "not a directory");
}

#[test]
fn test_file_over_directory_conflict() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let catalog = catalog_with(templates.path(), &[("main.tpl", "x")]);
    fs::create_dir_all(output.path().join("src/main.py")).unwrap();

    let renderer = MiniJinjaRenderer::new();
    let err = materialize(&scaffold(), output.path(), &catalog, &renderer, &json!({})).unwrap_err();

    assert!(matches!(err, Error::EntryConflict { expected: "file", .. }));
    assert!(output.path().join("src/main.py").is_dir());
}

#[test]
fn test_templates_include_catalog_entries() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let catalog = catalog_with(
        templates.path(),
        &[
            ("license.tpl", "Copyright {{ owner }}"),
            ("main.tpl", "{% include \"license.tpl\" %}\npackage {{ package | toFolder }}"),
        ],
    );
    let renderer = MiniJinjaRenderer::with_template_dir(templates.path());
    let context = json!({"owner": "Algo", "package": "dev.algo.app"});

    materialize(&scaffold(), output.path(), &catalog, &renderer, &context).unwrap();

    assert_eq!(
        fs::read_to_string(output.path().join("src/main.py")).unwrap(),
        "Copyright Algo\npackage dev/algo/app"
    );
}
