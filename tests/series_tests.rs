use predicates::prelude::*;
use test_env::{TestEnv, ROSTER_CSV};

const GAPPY_STAGES: &str = "\
Name,1,2,3
Leo,1:00:00,,3:03:20
Nate,1:01:40,2:01:40,3:05:00
Aaron,1:00:00,2:00:00
";

fn series_json(env: &TestEnv, extra: &[&str]) -> serde_json::Value {
    let mut args = vec!["series", "--json"];
    args.extend_from_slice(extra);
    let output = env.cmd()
        .args(&args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

fn points(series: &serde_json::Value, name: &str) -> Option<Vec<(u64, u64)>> {
    series.as_array()?.iter().find(|s| s["name"] == name).map(|s| {
        s["points"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| (p["stage"].as_u64().unwrap(), p["seconds"].as_u64().unwrap()))
            .collect()
    })
}

#[test]
fn test_series_json_has_all_views() {
    let env = TestEnv::with_sheets(GAPPY_STAGES, ROSTER_CSV);
    let value = series_json(&env, &[]);
    assert_eq!(value["through_stage"], 3);
    assert_eq!(points(&value["cumulative"], "Leo"), Some(vec![(1, 3600), (3, 11_000)]));
    assert_eq!(points(&value["cumulative"], "Aaron"), Some(vec![(1, 3600), (2, 7200)]));
}

#[test]
fn test_delta_spans_missing_stage() {
    let env = TestEnv::with_sheets(GAPPY_STAGES, ROSTER_CSV);
    let value = series_json(&env, &[]);
    assert_eq!(points(&value["delta"], "Leo"), Some(vec![(1, 3600), (3, 7400)]));
    assert_eq!(points(&value["delta"], "Nate"), Some(vec![(1, 3700), (2, 3600), (3, 3800)]));
}

#[test]
fn test_strict_delta_skips_after_missing_stage() {
    let env = TestEnv::with_sheets(GAPPY_STAGES, ROSTER_CSV);
    let value = series_json(&env, &["--strict-delta"]);
    assert_eq!(points(&value["delta"], "Leo"), Some(vec![(1, 3600)]));
}

#[test]
fn test_gap_series_drops_constant_leader() {
    let env = TestEnv::with_sheets(GAPPY_STAGES, ROSTER_CSV);
    let value = series_json(&env, &[]);
    // Leo and Aaron tie stage 1; Aaron leads stage 2; Leo leads stage 3
    assert_eq!(points(&value["gap"], "Leo"), None);
    assert_eq!(points(&value["gap"], "Aaron"), None);
    assert_eq!(points(&value["gap"], "Nate"), Some(vec![(1, 100), (2, 100), (3, 100)]));
}

#[test]
fn test_series_table_view() {
    let env = TestEnv::with_sheets(GAPPY_STAGES, ROSTER_CSV);
    env.cmd()
        .args(&["series", "--view", "gap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gap to Stage Leader"))
        .stdout(predicate::str::contains("+0:01:40"));

    env.cmd()
        .args(&["series"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cumulative Time by Stage"))
        .stdout(predicate::str::contains("3:03:20"));
}
