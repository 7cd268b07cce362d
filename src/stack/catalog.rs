//! Fixed catalog of the stack: roles, platform services, and the constants
//! every generated project shares.

/// Project roles granted to the function's service account, one binding each
pub const SERVICE_ACCOUNT_ROLES: [&str; 11] = [
    "roles/bigquery.dataEditor",
    "roles/bigquery.user",
    "roles/storage.objectAdmin",
    "roles/storagetransfer.user",
    "roles/run.admin",
    "roles/iam.serviceAccountUser",
    "roles/iam.workloadIdentityUser",
    "roles/artifactregistry.admin",
    "roles/workflows.invoker",
    "roles/storage.objectUser",
    "roles/storage.insightsCollectorService",
];

/// Platform APIs activated before any resource that needs them
pub const REQUIRED_SERVICES: [&str; 5] = [
    "run.googleapis.com",
    "workflows.googleapis.com",
    "cloudscheduler.googleapis.com",
    "iamcredentials.googleapis.com",
    "storage-component.googleapis.com",
];

/// Role on the artifact registry repository itself
pub const REPOSITORY_ADMIN_ROLE: &str = "roles/artifactregistry.repoAdmin";

pub const CLOUD_RUN_INGRESS: &str = "internal-and-cloud-load-balancing";
pub const CLOUD_RUN_INGRESS_ANNOTATION: &str = "run.googleapis.com/ingress";

pub const SCHEDULER_TIME_ZONE: &str = "Pacific/Noumea";
pub const SCHEDULER_ATTEMPT_DEADLINE: &str = "320s";
pub const SCHEDULER_RETRY_COUNT: i64 = 1;
pub const WORKFLOW_EXECUTIONS_API: &str = "https://workflowexecutions.googleapis.com/v1/";

/// Timeout of the workflow's HTTP call to the function
pub const WORKFLOW_CALL_TIMEOUT_SECS: u32 = 1800;

pub const ALERT_RATE_LIMIT_PERIOD: &str = "300s";
pub const ALERT_COMBINER: &str = "OR";
pub const ERROR_LOG_FILTER_PREFIX: &str = "severity=ERROR AND resource.labels.service_name = ";

pub const BUCKET_STORAGE_CLASS: &str = "REGIONAL";

pub const DEFAULT_GITHUB_OWNER: &str = "gouv-nc-data";
pub const DEFAULT_TEMPLATE_REPOSITORY: &str = "gcp-function-template";

/// Secret and variable names in the GitHub repository
pub mod github {
    pub const GCP_CREDENTIALS: &str = "GCP_CREDENTIALS";
    pub const FUNCTION_NAME: &str = "FUNCTION_NAME";
    pub const GCP_CLOUD_SERVICE: &str = "GCP_CLOUD_SERVICE";
    pub const GCP_PROJECT_ID: &str = "GCP_PROJECT_ID";
    pub const GCP_REGION: &str = "GCP_REGION";
    pub const GCP_REPOSITORY: &str = "GCP_REPOSITORY";
    pub const PROJECT_NAME: &str = "PROJECT_NAME";
}
