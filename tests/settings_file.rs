//! Loading controller settings from JSON files on disk.

use std::fs;
use std::path::PathBuf;
use std::process;

use jetrunner::{ControllerSettings, SettingsError};
use rstest::rstest;

/// Settings file in the temp directory, removed on drop.
struct ScratchFile(PathBuf);

impl ScratchFile {
    fn with_contents(name: &str, contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!("jetrunner-{}-{name}.json", process::id()));
        fs::write(&path, contents).expect("write scratch settings");
        Self(path)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

#[rstest]
fn loads_overrides_from_file() {
    let file = ScratchFile::with_contents(
        "overrides",
        r#"{ "horizontal_speed": 4.5, "sounds": { "jetpack": "whoosh" } }"#,
    );
    let settings = ControllerSettings::load(&file.0).expect("settings load");
    assert_eq!(settings.horizontal_speed, 4.5);
    assert_eq!(settings.sounds.jetpack, "whoosh");
    assert_eq!(settings.ascend_impulse, ControllerSettings::default().ascend_impulse);
}

#[rstest]
fn missing_file_reports_its_path() {
    let path = std::env::temp_dir().join("jetrunner-does-not-exist.json");
    match ControllerSettings::load(&path) {
        Err(err @ SettingsError::Io { .. }) => {
            assert!(err.to_string().contains("jetrunner-does-not-exist.json"));
        }
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[rstest]
#[case::bad_json("broken", "{ not json")]
#[case::bad_value("invalid", r#"{ "ascent_cap": 0.0 }"#)]
fn invalid_files_are_rejected(#[case] name: &str, #[case] contents: &str) {
    let file = ScratchFile::with_contents(name, contents);
    assert!(ControllerSettings::load(&file.0).is_err());
}

#[rstest]
fn serialised_defaults_round_trip() {
    let json = serde_json::to_string(&ControllerSettings::default()).expect("serialise");
    let file = ScratchFile::with_contents("defaults", &json);
    assert_eq!(
        ControllerSettings::load(&file.0).expect("settings load"),
        ControllerSettings::default()
    );
}
