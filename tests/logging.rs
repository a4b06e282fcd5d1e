use std::{fs, thread::sleep, time::Duration};

use serial_test::serial;
use tempfile::tempdir;

// The global subscriber can only be installed once per test binary, so the
// file-backed init is the first and only real initialisation here.
#[test]
#[serial]
fn writes_log_file_and_ignores_reinit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gesture_calc.log");

    gesture_calc::logging::init(false, Some(path.clone()));
    tracing::info!("pipeline ready");

    let other = dir.path().join("second.log");
    gesture_calc::logging::init(true, Some(other.clone()));
    tracing::info!("still logging");

    sleep(Duration::from_millis(200));

    assert!(path.exists(), "log file was not created");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("pipeline ready"));
    assert!(contents.contains("still logging"));
    assert!(!other.exists(), "second init should be a no-op");
}
