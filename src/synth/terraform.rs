//! Terraform JSON rendering
//!
//! Renders a validated declaration graph into the JSON configuration syntax
//! Terraform reads from `*.tf.json` files.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as Json};

use crate::domain::entities::Declaration;
use crate::domain::services::DeclarationGraph;
use crate::domain::value_objects::Provider;
use crate::error::StackResult;

/// Provider source and version constraint for `required_providers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRequirement {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ProviderRequirement {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Remote state in a GCS bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcsBackend {
    pub bucket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Everything synthesis needs beyond the graph itself
#[derive(Debug, Clone, PartialEq)]
pub struct SynthSettings {
    pub stack_name: String,
    pub project_id: String,
    pub region: String,
    pub github_owner: String,
    pub google: ProviderRequirement,
    pub github: ProviderRequirement,
    pub backend: Option<GcsBackend>,
}

impl SynthSettings {
    pub fn new(
        stack_name: impl Into<String>,
        project_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            stack_name: stack_name.into(),
            project_id: project_id.into(),
            region: region.into(),
            github_owner: crate::stack::catalog::DEFAULT_GITHUB_OWNER.to_string(),
            google: ProviderRequirement::new("hashicorp/google"),
            github: ProviderRequirement::new("integrations/github"),
            backend: None,
        }
    }

    pub fn with_github_owner(mut self, owner: impl Into<String>) -> Self {
        self.github_owner = owner.into();
        self
    }

    pub fn with_providers(mut self, google: ProviderRequirement, github: ProviderRequirement) -> Self {
        self.google = google;
        self.github = github;
        self
    }

    pub fn with_backend(mut self, backend: Option<GcsBackend>) -> Self {
        self.backend = backend;
        self
    }

    fn requirement(&self, provider: Provider) -> &ProviderRequirement {
        match provider {
            Provider::Google => &self.google,
            Provider::Github => &self.github,
        }
    }
}

/// Render the graph as a Terraform JSON document.
///
/// Validates first; resources appear in dependency order.
pub fn synthesize(graph: &DeclarationGraph, settings: &SynthSettings) -> StackResult<Json> {
    graph.validate()?;
    let ordered = graph.topological_order()?;

    let backend = if settings.backend.is_some() { "gcs" } else { "local" };
    let mut document = Map::new();
    document.insert(
        "//".to_string(),
        json!({
            "metadata": {
                "stackName": settings.stack_name,
                "backend": backend,
            }
        }),
    );
    document.insert("terraform".to_string(), terraform_block(settings));
    document.insert("provider".to_string(), provider_block(settings));

    let mut resources: Map<String, Json> = Map::new();
    for declaration in &ordered {
        let kind = declaration.kind().terraform_type().to_string();
        let entry = resources
            .entry(kind)
            .or_insert_with(|| Json::Object(Map::new()));
        if let Json::Object(by_name) = entry {
            by_name.insert(
                declaration.address().name().to_string(),
                resource_body(declaration),
            );
        }
    }
    document.insert("resource".to_string(), Json::Object(resources));

    if !graph.outputs().is_empty() {
        let outputs: Map<String, Json> = graph
            .outputs()
            .iter()
            .map(|output| {
                let mut body = Map::new();
                body.insert("value".to_string(), output.value().to_json());
                if let Some(description) = output.description() {
                    body.insert("description".to_string(), json!(description));
                }
                if output.is_sensitive() {
                    body.insert("sensitive".to_string(), json!(true));
                }
                (output.name().to_string(), Json::Object(body))
            })
            .collect();
        document.insert("output".to_string(), Json::Object(outputs));
    }

    tracing::info!(
        stack = %settings.stack_name,
        resources = ordered.len(),
        outputs = graph.outputs().len(),
        "synthesized"
    );

    Ok(Json::Object(document))
}

fn terraform_block(settings: &SynthSettings) -> Json {
    let mut required = Map::new();
    for provider in [Provider::Google, Provider::Github] {
        required.insert(
            provider.name().to_string(),
            serde_json::to_value(settings.requirement(provider)).unwrap_or(Json::Null),
        );
    }

    let mut block = Map::new();
    block.insert("required_providers".to_string(), Json::Object(required));
    if let Some(backend) = &settings.backend {
        block.insert(
            "backend".to_string(),
            json!({ "gcs": serde_json::to_value(backend).unwrap_or(Json::Null) }),
        );
    }
    Json::Object(block)
}

fn provider_block(settings: &SynthSettings) -> Json {
    json!({
        "google": [{
            "project": settings.project_id,
            "region": settings.region,
        }],
        "github": [{
            "owner": settings.github_owner,
        }],
    })
}

fn resource_body(declaration: &Declaration) -> Json {
    let mut body: Map<String, Json> = declaration
        .attributes()
        .iter()
        .map(|(key, value)| (key.clone(), value.to_json()))
        .collect();

    let depends_on: Vec<Json> = declaration
        .explicit_dependencies()
        .iter()
        .map(|address| Json::String(address.to_string()))
        .collect();
    if !depends_on.is_empty() {
        body.insert("depends_on".to_string(), Json::Array(depends_on));
    }

    Json::Object(body)
}
