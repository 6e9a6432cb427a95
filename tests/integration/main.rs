//! Integration tests for EpiLab

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Command with state isolated to a per-test directory
    fn epilab(state: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("epilab");
        cmd.env("EPILAB_STATE_DIR", state.path());
        cmd.env("EPILAB_CONFIG", state.path().join("config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Offline-capable incubation tracker"));
    }

    #[test]
    fn version_displays() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("epilab"));
    }

    #[test]
    fn list_empty() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No incubations recorded"));
    }

    #[test]
    fn list_empty_json() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn add_then_list() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["add", "Yeast H2O2 stress", "--hours", "2", "--temperature", "30C"])
            .assert()
            .success();

        epilab(&state)
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Yeast H2O2 stress"))
            .stdout(predicate::str::contains("running"));
    }

    #[test]
    fn add_rejects_empty_name() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["add", "   "])
            .assert()
            .failure()
            .stderr(predicate::str::contains("must not be empty"));
    }

    #[test]
    fn malformed_store_is_treated_as_empty() {
        let state = TempDir::new().unwrap();
        std::fs::write(state.path().join("samples.json"), "{ not json").unwrap();

        epilab(&state)
            .args(["list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No incubations recorded"));
    }

    #[test]
    fn remove_missing_sample() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["remove", "nonexistent", "--yes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Sample not found"));
    }

    #[test]
    fn remove_with_yes_deletes() {
        let state = TempDir::new().unwrap();
        epilab(&state).args(["add", "Doomed"]).assert().success();
        epilab(&state)
            .args(["remove", "Doomed", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Deleted incubation: Doomed"));

        epilab(&state)
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn remove_without_confirmation_aborts() {
        let state = TempDir::new().unwrap();
        epilab(&state).args(["add", "Kept"]).assert().success();

        // Non-interactive default is abort
        epilab(&state)
            .args(["remove", "Kept"])
            .assert()
            .success()
            .stdout(predicate::str::contains("nothing deleted"));

        epilab(&state)
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Kept"));
    }

    #[test]
    fn duplicate_creates_copy() {
        let state = TempDir::new().unwrap();
        epilab(&state).args(["add", "Original"]).assert().success();
        epilab(&state)
            .args(["duplicate", "Original"])
            .assert()
            .success();

        epilab(&state)
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Original (copy)"));
    }

    #[test]
    fn edit_renames_sample() {
        let state = TempDir::new().unwrap();
        epilab(&state).args(["add", "Before"]).assert().success();
        epilab(&state)
            .args(["edit", "Before", "--name", "After"])
            .assert()
            .success();

        epilab(&state)
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("After"));
    }

    #[test]
    fn export_empty_fails() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["export", "ics"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Nothing to export"));
    }

    #[test]
    fn export_ics_to_stdout() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["add", "Yeast", "--start", "2026-08-24T09:00", "--end", "2026-08-24T11:00"])
            .assert()
            .success();

        epilab(&state)
            .args(["export", "ics"])
            .assert()
            .success()
            .stdout(predicate::str::contains("BEGIN:VCALENDAR"))
            .stdout(predicate::str::contains("DTSTART:20260824T090000Z"))
            .stdout(predicate::str::contains("DTEND:20260824T110000Z"));
    }

    #[test]
    fn export_csv_quotes_data_fields() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["add", "Yeast", "--notes", "check \"OD600\" twice"])
            .assert()
            .success();

        // Header unquoted, data fields quoted with inner quotes doubled
        epilab(&state)
            .args(["export", "csv"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Name,Start,End,Temperature,Location,Notes",
            ))
            .stdout(predicate::str::contains("\"check \"\"OD600\"\" twice\""));
    }

    #[test]
    fn export_to_file() {
        let state = TempDir::new().unwrap();
        epilab(&state).args(["add", "Yeast"]).assert().success();

        let out = state.path().join("out.ics");
        epilab(&state)
            .args(["export", "ics", "--output", out.to_str().unwrap()])
            .assert()
            .success();

        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("BEGIN:VCALENDAR"));
    }

    #[test]
    fn link_prints_calendar_url() {
        let state = TempDir::new().unwrap();
        epilab(&state).args(["add", "Yeast"]).assert().success();

        epilab(&state)
            .args(["link", "Yeast"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "https://calendar.google.com/calendar/render?action=TEMPLATE",
            ));
    }

    #[test]
    fn config_path() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[lifecycle]"))
            .stdout(predicate::str::contains("grace_secs = 60"));
    }

    #[test]
    fn cache_offline_prints_document() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["cache", "offline"])
            .assert()
            .success()
            .stdout(predicate::str::contains("You're offline"));
    }

    #[test]
    fn cache_info_shows_store() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["cache", "info"])
            .assert()
            .success()
            .stdout(predicate::str::contains("epilab-v1"));
    }

    #[test]
    fn fetch_rejects_non_http_url() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["fetch", "ftp://a.test/file"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid URL"));
    }

    #[test]
    fn fetch_navigation_offline_serves_offline_page() {
        let state = TempDir::new().unwrap();
        // Port 9 (discard) refuses connections; a navigation must still
        // resolve to the offline document.
        epilab(&state)
            .args(["fetch", "http://127.0.0.1:9/", "--navigate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("You're offline"));
    }

    #[test]
    fn fetch_resource_offline_without_cache_fails() {
        let state = TempDir::new().unwrap();
        epilab(&state)
            .args(["fetch", "http://127.0.0.1:9/app.js"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Fetch failed"));
    }

    #[test]
    fn watch_single_tick_renders() {
        let state = TempDir::new().unwrap();
        epilab(&state).args(["add", "Yeast"]).assert().success();

        epilab(&state)
            .args(["watch", "--ticks", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("EpiLab watch"));
    }
}
