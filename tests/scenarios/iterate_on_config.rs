//! Scenario: a team iterates on an existing stack
//!
//! Journey: synthesize, change a value, review the diff, synthesize again.
//!
//! Success Criteria:
//! - diff shows exactly the changed lines before anything is written
//! - the manifest hash follows the written document

use crate::common::*;

/// SCENARIO: change the schedule, diff, then apply
#[test]
fn scenario_change_schedule_then_resynthesize() {
    let env = TestEnv::with_orders_vars();
    env.write(
        "funcstack.toml",
        "[vars]\nfiles = [\"orders.json\"]\n",
    );

    let result = env.run(&["synth"]);
    assert!(result.success, "{}", result.combined_output());
    let first_hash = env.read_json("cdktf.out/manifest.json")["stacks"]["gcp-function"]
        ["content_hash"]
        .clone();

    let result = env.run(&["diff", "--var", "schedule=*/15 * * * *"]);
    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("1 line(s) added, 1 line(s) removed"));

    let result = env.run(&["synth", "--var", "schedule=*/15 * * * *"]);
    assert!(result.success, "{}", result.combined_output());

    let doc = env.read_json(DEFAULT_STACK_FILE);
    assert_eq!(
        doc["resource"]["google_cloud_scheduler_job"]["job"]["schedule"],
        "*/15 * * * *"
    );
    let second_hash = env.read_json("cdktf.out/manifest.json")["stacks"]["gcp-function"]
        ["content_hash"]
        .clone();
    assert_ne!(first_hash, second_hash);

    let result = env.run(&["diff", "--var", "schedule=*/15 * * * *"]);
    assert!(result.stdout.contains("No changes"));
}
