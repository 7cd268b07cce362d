//! Naming conventions derived from parameters
//!
//! Pure string substitution; nothing is looked up.

/// Image location used when no explicit image is supplied
pub fn default_image(region: &str, project_id: &str, project_name: &str) -> String {
    format!(
        "{region}-docker.pkg.dev/{project_id}/{project_name}/{project_name}-function:latest"
    )
}

/// Supplied image verbatim, or the conventional default
pub fn resolve_image(
    image: Option<&str>,
    region: &str,
    project_id: &str,
    project_name: &str,
) -> String {
    match image {
        Some(image) => image.to_string(),
        None => default_image(region, project_id, project_name),
    }
}

/// `FUNCTION_NAME`: project name with every hyphen replaced by an underscore
pub fn function_name(project_name: &str) -> String {
    project_name.replace('-', "_")
}

pub fn cloud_run_name(project_name: &str, project_id: &str) -> String {
    format!("cloudrun-{project_name}-{project_id}")
}

pub fn scheduler_name(project_name: &str, project_id: &str) -> String {
    format!("schedule-{project_name}-{project_id}")
}

pub fn workflow_name(project_name: &str, project_id: &str) -> String {
    format!("workflow-{project_name}-{project_id}")
}

pub fn bucket_name(project_name: &str, project_id: &str) -> String {
    format!("bucket-{project_name}-{project_id}")
}

pub fn service_account_id(project_name: &str) -> String {
    format!("sa-{project_name}")
}

/// GitHub repository holding the function's code
pub fn repository_name(direction: &str, project_name: &str) -> String {
    format!("{direction}-{project_name}-function")
}
