use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CONFIG: &str = r#"
template_path: templates
markdown_path: markdown
default_template: main.html
web_pages_path: website
markdown_output_dir: templates/pages
toc_file: toc.toc
"#;

fn write_project(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(root.join("markdown/partials"))?;
    fs::create_dir_all(root.join("markdown/img"))?;
    fs::create_dir_all(root.join("templates"))?;

    fs::write(root.join("tsk.yml"), CONFIG)?;
    fs::write(
        root.join("templates/main.html"),
        "<html><h1>{{ data.title }}</h1>{{ contents }}</html>",
    )?;
    fs::write(
        root.join("markdown/intro.md"),
        "---\ntitle: Introduction\n---\n-/-\nnot published\n-/-\n# Introduction\n\n$$ include note.md\n$$ asset img/logo.png\n",
    )?;
    fs::write(root.join("markdown/partials/note.md"), "A shared note.\n")?;
    fs::write(root.join("markdown/img/logo.png"), [0x89, b'P', b'N', b'G'])?;
    fs::write(
        root.join("toc.toc"),
        "---\npage_level: 0\n---\n# Introduction\n## Background\n# Appendix\n",
    )?;
    Ok(())
}

#[test]
fn build_writes_fragments_pages_and_assets() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_project(dir.path())?;

    #[allow(deprecated)]
    Command::cargo_bin("tsk")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success();

    let fragment = fs::read_to_string(dir.path().join("templates/pages/introduction.html"))?;
    assert!(fragment.contains("<h1 id=\"introduction\">Introduction</h1>"));
    assert!(fragment.contains("A shared note."));
    assert!(!fragment.contains("not published"));

    let page = fs::read_to_string(dir.path().join("website/introduction.html"))?;
    assert!(page.starts_with("<html><h1>Introduction</h1>"));
    assert!(page.contains("<img src=\"img/logo.png\""));

    assert!(dir.path().join("website/img/logo.png").is_file());
    Ok(())
}

#[test]
fn build_fails_on_unknown_command() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_project(dir.path())?;
    fs::write(dir.path().join("markdown/broken.md"), "$$ frobnicate now\n")?;

    #[allow(deprecated)]
    Command::cargo_bin("tsk")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frobnicate"));
    Ok(())
}

#[test]
fn build_reports_missing_config_key() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("tsk.yml"), "template_path: templates\n")?;

    #[allow(deprecated)]
    Command::cargo_bin("tsk")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("markdown_path must be set."));
    Ok(())
}

#[test]
fn preprocess_json_outputs_metadata_and_body() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("page.md"),
        "---\ntitle: Page\ntags: a, b\nweight: 3\n---\nBody\n",
    )?;

    #[allow(deprecated)]
    let assert = Command::cargo_bin("tsk")?
        .current_dir(dir.path())
        .args(["preprocess", "page.md", "--json"])
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(json["metadata"]["title"], "Page");
    assert_eq!(json["metadata"]["tags"], serde_json::json!(["a", "b"]));
    assert_eq!(json["metadata"]["weight"], 3);
    assert_eq!(json["body"], "Body\n");
    Ok(())
}

#[test]
fn toc_prints_nested_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_project(dir.path())?;
    fs::create_dir_all(dir.path().join("pages"))?;
    fs::write(dir.path().join("pages/introduction.html"), "")?;

    #[allow(deprecated)]
    let assert = Command::cargo_bin("tsk")?
        .current_dir(dir.path())
        .args(["toc", "toc.toc", "--pages", "pages"])
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(json["page_level"], 0);
    let intro = &json["children"][0];
    assert_eq!(intro["url"], "introduction.html");
    assert_eq!(intro["children"][0]["anchor"], "introduction.html#background");
    assert_eq!(intro["children"][0]["hierarchy"], serde_json::json!([1, 1, 0, 0, 0]));
    assert!(json["children"][1]["url"].is_null());
    Ok(())
}

#[test]
fn slug_joins_words() -> Result<(), Box<dyn std::error::Error>> {
    #[allow(deprecated)]
    Command::cargo_bin("tsk")?
        .args(["slug", "Éléphants", "&", "Île"])
        .assert()
        .success()
        .stdout("elephants-and-ile\n");
    Ok(())
}
