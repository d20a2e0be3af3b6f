use predicates::prelude::*;
use test_env::{TestEnv, ROSTER_CSV, STAGES_CSV};

#[test]
fn test_command_line_sources_override_rc() {
    let env = TestEnv::with_sheets(STAGES_CSV, ROSTER_CSV);
    let other = env.write_sheet("other.csv", "Nate,4:00:00\n");
    env.cmd()
        .args(&["standings", "--standings-source", other.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nate"))
        .stdout(predicate::str::contains("Leo").not());
}

#[test]
fn test_custom_participants() {
    let env = TestEnv::with_sheets("Ann,1:00:00\nBob,0:59:00\nLeo,0:30:00\n", "Rider,Team\nX,Ann\n");
    env.write_rc("standings.source=stages.csv\nroster.source=riders.csv\nparticipants=Ann,Bob\n");
    let output = env.cmd()
        .args(&["standings", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["count"], 2);
    assert_eq!(value["standings"][0]["name"], "Bob");

    env.cmd()
        .args(&["--participants", "Leo", "standings", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 1"));
}

#[test]
fn test_bad_config_value_is_user_error() {
    let env = TestEnv::with_sheets(STAGES_CSV, ROSTER_CSV);
    env.write_rc("standings.source=stages.csv\ncache.ttl=later\n");
    env.cmd()
        .args(&["standings"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load configuration"))
        .stderr(predicate::str::contains("Invalid cache.ttl"));
}

#[test]
fn test_empty_participants_flag_is_user_error() {
    let env = TestEnv::with_sheets(STAGES_CSV, ROSTER_CSV);
    env.cmd()
        .args(&["--participants", "", "standings"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid participants"));
}

#[test]
fn test_version_and_help() {
    let env = TestEnv::new();
    env.cmd()
        .args(&["--version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    env.cmd()
        .args(&["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("standings"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_unknown_command_is_usage_error() {
    let env = TestEnv::new();
    env.cmd()
        .args(&["podium"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
