use std::{fs, path::Path};

use tempfile::{TempDir, tempdir};

use uavplex::UavplexError;
use uavplex_cli::{Args, run};

const HEXA: &str = r#"{
    "name": "Hexa",
    "components": [
        { "component_instance": "Hub", "component_type": "MainHub" },
        { "component_instance": "Arm1", "component_type": "Arm" },
        { "component_instance": "M1", "component_type": "Motor" },
        { "component_instance": "P1", "component_type": "Propeller" },
        { "component_instance": "Bat", "component_type": "Battery" }
    ],
    "connections": [
        { "from_ci": "Hub", "to_ci": "Arm1", "from_conn": "Side_Connector_1", "to_conn": "End" },
        { "from_ci": "Arm1", "to_ci": "M1", "from_conn": "Tip", "to_conn": "Base" },
        { "from_ci": "M1", "to_ci": "P1", "from_conn": "Prop", "to_conn": "Hub" },
        { "from_ci": "Hub", "to_ci": "Bat", "from_conn": "Bottom", "to_conn": "Top" }
    ]
}"#;

fn corpus(root: &Path) {
    for name in ["design_1", "design_5", "design_10"] {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("design_low_level.json"), HEXA).unwrap();
    }
    // not a design directory
    fs::create_dir_all(root.join("scratch")).unwrap();
    // unreadable descriptor: skipped, not fatal
    fs::create_dir_all(root.join("design_2")).unwrap();
    fs::write(root.join("design_2").join("design_low_level.json"), "{ nope").unwrap();
}

fn config_file(dir: &TempDir) -> String {
    let path = dir.path().join("config.toml");
    fs::write(&path, "[output]\ndate_stamp = false\n").unwrap();
    path.to_string_lossy().to_string()
}

fn args(data_root: &Path, output: &Path, config: String, no_plots: bool) -> Args {
    Args {
        data_root: Some(data_root.to_string_lossy().to_string()),
        output: Some(output.to_string_lossy().to_string()),
        config: Some(config),
        log_level: "off".to_string(),
        no_plots,
    }
}

#[test]
fn e2e_smoke_test_corpus() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let data = temp_dir.path().join("data");
    let output = temp_dir.path().join("out").join("plots");
    corpus(&data);

    run(&args(&data, &output, config_file(&temp_dir), false)).expect("study should succeed");

    let mut written: Vec<_> = fs::read_dir(&output)
        .unwrap()
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    written.sort();

    assert!(written.contains(&"complexity_report.json".to_string()));
    assert!(written.contains(&"Complexity_Comparison.svg".to_string()));
    assert!(written.contains(&"3D_Network_Graphs_All.svg".to_string()));
    assert!(written.iter().filter(|name| name.ends_with(".svg")).count() >= 6);
    assert!(written.contains(&"Complexity_Comparison.png".to_string()));
    assert_eq!(
        written.iter().filter(|name| name.ends_with(".svg")).count(),
        written.iter().filter(|name| name.ends_with(".png")).count()
    );

    let report = fs::read_to_string(output.join("complexity_report.json")).unwrap();
    assert!(report.contains("design_10"));
    assert!(report.contains("design_2"));
}

#[test]
fn e2e_smoke_test_report_only() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let data = temp_dir.path().join("data");
    let output = temp_dir.path().join("out");
    corpus(&data);

    run(&args(&data, &output, config_file(&temp_dir), true)).expect("study should succeed");

    let written: Vec<_> = fs::read_dir(&output).unwrap().flatten().collect();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].file_name(), "complexity_report.json");
}

#[test]
fn e2e_smoke_test_missing_root_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("absent");

    let err = run(&args(
        &missing,
        temp_dir.path(),
        config_file(&temp_dir),
        true,
    ))
    .unwrap_err();
    assert!(matches!(err, UavplexError::Io(_)));
}

#[test]
fn e2e_smoke_test_bad_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let data = temp_dir.path().join("data");
    corpus(&data);
    let config = temp_dir.path().join("broken.toml");
    fs::write(&config, "[plot]\nbackground_color = \"nonsense\"\n").unwrap();

    let err = run(&args(
        &data,
        temp_dir.path(),
        config.to_string_lossy().to_string(),
        true,
    ))
    .unwrap_err();
    assert!(matches!(err, UavplexError::Config(_)));
}
