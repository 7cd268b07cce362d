//! Scenario: a data team provisions the `orders` function
//!
//! Journey: the finance direction writes a vars file, synthesizes, and
//! hands `cdk.tf.json` to Terraform.
//!
//! Success Criteria:
//! - every resource named after project_name and project_id
//! - references use Terraform interpolation, never resolved values
//! - the credentials key only reaches the GitHub secret

use crate::common::*;

fn synthesized_orders() -> serde_json::Value {
    let env = TestEnv::with_orders_vars();
    let result = env.run(&["synth", "--var-file", "orders.json"]);
    assert!(result.success, "{}", result.combined_output());
    env.read_json(DEFAULT_STACK_FILE)
}

/// SCENARIO: names, image and output of a default orders stack
#[test]
fn scenario_orders_resources_follow_naming_conventions() {
    let doc = synthesized_orders();
    let resources = &doc["resource"];

    let run = &resources["google_cloud_run_service"]["cloud_run"];
    assert_eq!(run["name"], "cloudrun-orders-prj-fin-01");
    assert_eq!(run["location"], "europe-west1");
    assert_eq!(
        run["template"]["spec"]["containers"][0]["image"],
        "europe-west1-docker.pkg.dev/prj-fin-01/orders/orders-function:latest"
    );

    assert_eq!(
        resources["google_cloud_scheduler_job"]["job"]["name"],
        "schedule-orders-prj-fin-01"
    );
    assert_eq!(
        resources["google_workflows_workflow"]["workflow"]["name"],
        "workflow-orders-prj-fin-01"
    );
    assert_eq!(
        resources["google_storage_bucket"]["bucket"]["name"],
        "bucket-orders-prj-fin-01"
    );
    assert_eq!(
        resources["github_repository"]["function_repo"]["name"],
        "finance-orders-function"
    );
    assert_eq!(
        resources["google_service_account"]["service_account"]["account_id"],
        "sa-orders"
    );

    assert_eq!(
        doc["output"]["run_url"]["value"],
        "${google_cloud_run_service.cloud_run.status[0].url}"
    );
}

/// SCENARIO: providers and explicit dependencies are rendered
#[test]
fn scenario_orders_providers_and_dependencies() {
    let doc = synthesized_orders();

    assert_eq!(
        doc["terraform"]["required_providers"]["google"]["source"],
        "hashicorp/google"
    );
    assert_eq!(
        doc["terraform"]["required_providers"]["github"]["source"],
        "integrations/github"
    );
    assert_eq!(doc["provider"]["github"][0]["owner"], "gouv-nc-data");
    assert_eq!(doc["//"]["metadata"]["backend"], "local");

    let deps = doc["resource"]["google_cloud_scheduler_job"]["job"]["depends_on"]
        .as_array()
        .unwrap();
    assert_eq!(deps.len(), 5);
    assert!(deps
        .iter()
        .all(|d| d.as_str().unwrap().starts_with("google_project_service.service_")));

    let bindings = doc["resource"]["google_project_iam_member"]
        .as_object()
        .unwrap();
    assert_eq!(bindings.len(), 11);
    for binding in bindings.values() {
        assert_eq!(
            binding["member"],
            "serviceAccount:${google_service_account.service_account.email}"
        );
    }
}

/// SCENARIO: the service account key is wired to the GitHub secret only
#[test]
fn scenario_orders_credentials_reach_github() {
    let doc = synthesized_orders();
    let resources = &doc["resource"];

    let secret = &resources["github_actions_secret"]["gcp_credentials"];
    assert_eq!(secret["secret_name"], "GCP_CREDENTIALS");
    assert_eq!(
        secret["plaintext_value"],
        "${google_service_account_key.service_account_key.private_key}"
    );
    assert_eq!(secret["repository"], "${github_repository.function_repo.name}");

    let text = serde_json::to_string(&doc).unwrap();
    assert_eq!(text.matches(".private_key}").count(), 1);

    let variables = resources["github_actions_variable"].as_object().unwrap();
    assert_eq!(variables.len(), 6);
    let function_name = variables
        .values()
        .find(|v| v["variable_name"] == "FUNCTION_NAME")
        .unwrap();
    assert_eq!(function_name["value"], "orders");

    let repository = variables
        .values()
        .find(|v| v["variable_name"] == "GCP_REPOSITORY")
        .unwrap();
    assert_eq!(
        repository["value"],
        "${google_artifact_registry_repository.project_repo.name}"
    );
}

/// SCENARIO: alerting and scheduling point at the right services
#[test]
fn scenario_orders_alert_and_schedule() {
    let doc = synthesized_orders();
    let resources = &doc["resource"];

    let alert = &resources["google_monitoring_alert_policy"]["errors"];
    assert_eq!(
        alert["notification_channels"][0],
        "projects/prj-fin-01/notificationChannels/42"
    );
    assert_eq!(
        alert["conditions"][0]["condition_matched_log"]["filter"],
        "severity=ERROR AND resource.labels.service_name = ${google_cloud_run_service.cloud_run.name}"
    );

    let job = &resources["google_cloud_scheduler_job"]["job"];
    assert_eq!(job["schedule"], "0 6 * * *");
    assert_eq!(job["time_zone"], "Pacific/Noumea");
    assert_eq!(
        job["http_target"]["uri"],
        "https://workflowexecutions.googleapis.com/v1/${google_workflows_workflow.workflow.id}/executions"
    );
}
