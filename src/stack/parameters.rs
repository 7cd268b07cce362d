//! Parameters of the function stack

use crate::domain::entities::Parameter;
use crate::domain::value_objects::{ParamType, ParamValue};

pub const CPU_LIMITS: &str = "cpu_limits";
pub const CREATE_BUCKET: &str = "create_bucket";
pub const DIRECTION: &str = "direction";
pub const ENV: &str = "env";
pub const IMAGE: &str = "image";
pub const MEMORY_LIMITS: &str = "memory_limits";
pub const NOTIFICATION_CHANNELS: &str = "notification_channels";
pub const PROJECT_ID: &str = "project_id";
pub const PROJECT_NAME: &str = "project_name";
pub const REGION: &str = "region";
pub const SCHEDULE: &str = "schedule";
pub const TIMEOUT_SECONDS: &str = "timeout_seconds";

/// All parameters, in the order they are bound and listed
pub fn declare() -> Vec<Parameter> {
    vec![
        Parameter::with_default(CPU_LIMITS, ParamType::String, "1000m".into())
            .describe("Maximum CPU allocated to the container"),
        Parameter::with_default(CREATE_BUCKET, ParamType::Bool, true.into())
            .describe("Whether to create a storage bucket for the project"),
        Parameter::required(DIRECTION, ParamType::String)
            .describe("Direction (organisational unit) owning the project"),
        Parameter::with_default(ENV, ParamType::map(ParamType::Any), ParamValue::Null)
            .describe("Environment variables for the Cloud Run container"),
        Parameter::with_default(IMAGE, ParamType::String, ParamValue::Null)
            .describe("Container image to deploy; derived from the registry convention when unset"),
        Parameter::with_default(MEMORY_LIMITS, ParamType::String, "512Mi".into())
            .describe("Maximum memory allocated to the container"),
        Parameter::required(NOTIFICATION_CHANNELS, ParamType::list(ParamType::String))
            .describe("Notification channels for Cloud Run error alerts"),
        Parameter::required(PROJECT_ID, ParamType::String).describe("GCP project id"),
        Parameter::required(PROJECT_NAME, ParamType::String).describe("Project name"),
        Parameter::with_default(REGION, ParamType::String, "europe-west1".into()),
        Parameter::required(SCHEDULE, ParamType::String)
            .describe("Cron expression of the scheduled job"),
        Parameter::with_default(TIMEOUT_SECONDS, ParamType::Number, 300.0.into())
            .describe("Execution timeout of the function, in seconds"),
    ]
}
