//! Pipeline configuration from RON

use neve::util::config::PipelineConfig;
use neve::{run_with_config, VMError};

#[test]
fn test_config_drives_the_pipeline() {
    let config = PipelineConfig::from_ron_str(
        "(compiler: (optimizer: (fold_constants: false)), vm: (stack_size: 2))",
    )
    .unwrap();

    // Unfolded, `1 + 2 * 3` needs three stack slots
    let err = run_with_config("1 + 2 * 3", &config).unwrap_err();
    assert_eq!(
        err.downcast_ref::<VMError>(),
        Some(&VMError::StackOverflow(2))
    );

    // Folded it needs one
    let folding = PipelineConfig::from_ron_str("(vm: (stack_size: 2))").unwrap();
    assert_eq!(run_with_config("1 + 2 * 3", &folding).unwrap(), "7");
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("neve.ron");
    std::fs::write(&path, "(vm: (stack_size: 64, trace_execution: true))").unwrap();

    let config = PipelineConfig::load(&path).unwrap();
    assert_eq!(config.vm.stack_size, 64);
    assert!(config.vm.trace_execution);
    assert_eq!(run_with_config("\"ok\"", &config).unwrap(), "ok");
}

#[test]
fn test_load_config_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.ron");

    let err = neve::load_config(&path).unwrap_err();
    assert!(err.to_string().contains("missing.ron"));

    std::fs::write(&path, "(vm: (stack_size: 0))").unwrap();
    let err = neve::load_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("stack_size"));
}
