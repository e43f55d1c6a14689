use jstpack::config::{find_config, load_config};
use jstpack::constants::CONFIG_FILES;
use jstpack::fs::LocalFileSystem;
use jstpack::options::Namespace;
use jstpack::processor::Processor;
use jstpack::renderer::MiniJinjaCompiler;
use jstpack::resolver::SourceSpec;
use tempfile::TempDir;

#[test]
fn test_load_json_config_from_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().display().to_string();
    let content = format!(
        r#"{{
  "options": {{ "client": true, "namespace": "tpl", "extension": "js" }},
  "files": [{{ "name": "views", "dest": "{root}/out/", "src": ["{root}/views/"] }}]
}}"#
    );
    std::fs::write(temp_dir.path().join("jstpack.json"), content).unwrap();

    let path = find_config(temp_dir.path(), &CONFIG_FILES).unwrap();
    let config = load_config(path).unwrap();

    assert!(config.options.client);
    assert_eq!(config.options.namespace, Namespace::Named("tpl".to_string()));
    assert_eq!(
        config.files,
        vec![SourceSpec::new("views", format!("{root}/out/"), [format!("{root}/views/")])]
    );
}

#[test]
fn test_yaml_config_drives_a_run() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().display().to_string();
    std::fs::create_dir_all(temp_dir.path().join("views")).unwrap();
    std::fs::write(temp_dir.path().join("views/a.jade"), "a={{ n }}").unwrap();
    std::fs::write(temp_dir.path().join("views/b.jade"), "b={{ n }}").unwrap();
    std::fs::write(
        temp_dir.path().join("jstpack.yml"),
        format!(
            "options:\n  separator: \"|\"\n  data:\n    n: 7\nfiles:\n  - dest: {root}/all.html\n    src:\n      - {root}/views/*.jade\n"
        ),
    )
    .unwrap();

    let config = load_config(find_config(temp_dir.path(), &CONFIG_FILES).unwrap()).unwrap();
    let report = Processor::new(&MiniJinjaCompiler::new(), &LocalFileSystem::new(), &config.options)
        .run(&config.files)
        .unwrap();

    assert_eq!(report.written, vec![format!("{root}/all.html")]);
    assert_eq!(std::fs::read_to_string(temp_dir.path().join("all.html")).unwrap(), "a=7|b=7");
}

#[test]
fn test_relative_paths_resolve_against_config_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().display().to_string();
    std::fs::create_dir_all(temp_dir.path().join("views/sub")).unwrap();
    std::fs::create_dir_all(temp_dir.path().join("partials")).unwrap();
    std::fs::write(temp_dir.path().join("views/x.jade"), "x").unwrap();
    std::fs::write(temp_dir.path().join("views/sub/y.jade"), "y").unwrap();
    std::fs::write(temp_dir.path().join("partials/p.jade"), "p").unwrap();
    std::fs::write(
        temp_dir.path().join("jstpack.json"),
        r#"{
  "options": { "separator": "|" },
  "files": [
    { "dest": "out/", "src": ["views/"] },
    { "dest": "./partials.html", "src": ["./partials/*.jade", "missing/*.jade"] }
  ]
}"#,
    )
    .unwrap();

    // The test process runs from the crate root, not from the config directory.
    assert_ne!(std::env::current_dir().unwrap(), temp_dir.path());
    let config = load_config(find_config(temp_dir.path(), &CONFIG_FILES).unwrap()).unwrap();
    let report = Processor::new(&MiniJinjaCompiler::new(), &LocalFileSystem::new(), &config.options)
        .run(&config.files)
        .unwrap();

    assert_eq!(
        report.written,
        vec![
            format!("{root}/out/sub/y.html"),
            format!("{root}/out/x.html"),
            format!("{root}/partials.html"),
        ]
    );
    assert!(report.warnings.is_empty());
    assert_eq!(std::fs::read_to_string(temp_dir.path().join("out/x.html")).unwrap(), "x");
    assert_eq!(std::fs::read_to_string(temp_dir.path().join("out/sub/y.html")).unwrap(), "y");
    assert_eq!(std::fs::read_to_string(temp_dir.path().join("partials.html")).unwrap(), "p");
}
