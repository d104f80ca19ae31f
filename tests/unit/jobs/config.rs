use serde::Deserialize;

use super::*;

#[derive(Debug, Deserialize)]
struct Demo {
    images: Vec<PathBuf>,
    #[serde(default)]
    columns: u32,
}

fn scratch_dir() -> PathBuf {
    let dir = PathBuf::from("target").join("unit_config");
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn loads_config_and_reports_its_directory() {
    let dir = scratch_dir();
    let path = dir.join("demo.json");
    std::fs::write(&path, r#"{ "images": ["a.png", "/abs/b.png"] }"#).unwrap();

    let (demo, base) = load_config::<Demo>(&path).unwrap();
    assert_eq!(base, dir);
    assert_eq!(demo.columns, 0);
    assert_eq!(
        resolve_path(&base, &demo.images[0]),
        dir.join("a.png"),
        "relative paths resolve against the config directory"
    );
    assert_eq!(
        resolve_path(&base, &demo.images[1]),
        PathBuf::from("/abs/b.png")
    );
}

#[test]
fn missing_and_malformed_configs_are_classified() {
    let dir = scratch_dir();
    let missing = dir.join("nope.json");
    let _ = std::fs::remove_file(&missing);
    assert!(matches!(
        load_config::<Demo>(&missing),
        Err(ConfartError::MissingInput(_))
    ));

    let bad = dir.join("bad.json");
    std::fs::write(&bad, r#"{ "images": 3 }"#).unwrap();
    let err = load_config::<Demo>(&bad).unwrap_err();
    assert!(matches!(err, ConfartError::Serde(_)));
    assert!(err.to_string().contains("bad.json"));
}
