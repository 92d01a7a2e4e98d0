use std::sync::Mutex;

use tempfile::NamedTempFile;

use wireframe_detect::config::DetectorConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "WFDETECT_CONFIG",
        "WFDETECT_MODEL_DIR",
        "WFDETECT_MAX_OUTPUTS",
        "WFDETECT_SCORE_THRESHOLD",
        "WFDETECT_IOU_THRESHOLD",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_apply_without_file_or_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = DetectorConfig::load().expect("load config");

    assert_eq!(cfg.model_dir.to_str().unwrap(), "model");
    assert_eq!(cfg.suppression.max_outputs, 20);
    assert_eq!(cfg.suppression.score_threshold, 0.5);
    assert_eq!(cfg.suppression.iou_threshold, 0.5);

    clear_env();
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "model_dir": "artifacts/wireframe",
        "suppression": {
            "max_outputs": 10,
            "score_threshold": 0.6,
            "iou_threshold": 0.4
        }
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("WFDETECT_CONFIG", file.path());
    std::env::set_var("WFDETECT_SCORE_THRESHOLD", "0.75");

    let cfg = DetectorConfig::load().expect("load config");

    assert_eq!(cfg.model_dir.to_str().unwrap(), "artifacts/wireframe");
    assert_eq!(cfg.suppression.max_outputs, 10);
    assert_eq!(cfg.suppression.score_threshold, 0.75);
    assert_eq!(cfg.suppression.iou_threshold, 0.4);

    clear_env();
}

#[test]
fn partial_suppression_section_keeps_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{ "suppression": { "score_threshold": 0.3 } }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("WFDETECT_CONFIG", file.path());

    let cfg = DetectorConfig::load().expect("load config");
    assert_eq!(cfg.suppression.score_threshold, 0.3);
    assert_eq!(cfg.suppression.max_outputs, 20);
    assert_eq!(cfg.suppression.iou_threshold, 0.5);

    clear_env();
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("WFDETECT_IOU_THRESHOLD", "1.5");

    let err = DetectorConfig::load().unwrap_err();
    assert!(err.to_string().contains("iou_threshold"));

    clear_env();
}

#[test]
fn non_numeric_env_override_is_rejected() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("WFDETECT_MAX_OUTPUTS", "many");

    let err = DetectorConfig::load().unwrap_err();
    assert!(err.to_string().contains("WFDETECT_MAX_OUTPUTS"));

    clear_env();
}
