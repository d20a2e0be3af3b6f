use predicates::prelude::*;
use test_env::{TestEnv, ROSTER_CSV, STAGES_CSV};

#[test]
fn test_rosters_grouped_by_participant() {
    let env = TestEnv::with_sheets(STAGES_CSV, ROSTER_CSV);
    env.cmd()
        .args(&["rosters"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jeremy (1 rider)\n  Jonas Vingegaard\n"))
        .stdout(predicate::str::contains("Leo (2 riders)\n  Tadej Pogacar\n  Remco Evenepoel\n"))
        .stdout(predicate::str::contains("Nate (0 riders)"))
        .stdout(predicate::str::contains("Wout van Aert").not());
}

#[test]
fn test_rosters_json() {
    let env = TestEnv::with_sheets(STAGES_CSV, ROSTER_CSV);
    let output = env.cmd()
        .args(&["rosters", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let rosters = value.as_array().unwrap();
    assert_eq!(rosters.len(), 5);
    assert_eq!(rosters[1]["owner"], "Leo");
    assert_eq!(rosters[1]["riders"][1], "Remco Evenepoel");
}

#[test]
fn test_rosters_missing_team_column() {
    let env = TestEnv::with_sheets(STAGES_CSV, "Rider,Owner\nTadej Pogacar,Leo\n");
    env.cmd()
        .args(&["rosters"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Roster data unavailable: missing 'Team' column"));
}

#[test]
fn test_rosters_unreadable_source() {
    let env = TestEnv::new();
    env.write_sheet("stages.csv", STAGES_CSV);
    env.write_rc("standings.source=stages.csv\nroster.source=nowhere.csv\n");
    env.cmd()
        .args(&["rosters"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Roster data unavailable: Roster source unavailable"));
}
