//! ProjectStack composer
//!
//! One linear pass: bind parameters, then declare every resource in order.
//! Each step only references addresses returned by earlier steps, which keeps
//! the graph acyclic by construction; `DeclarationGraph::validate` checks it
//! anyway before the stack is handed out.

use std::collections::BTreeMap;

use crate::domain::entities::{CompositeOutput, Declaration, Parameter, Value};
use crate::domain::services::{bind, BindWarning, BoundParameters, DeclarationGraph, Inputs};
use crate::domain::value_objects::{
    Address, FieldPath, LogicalId, OutputRef, ParamValue, ResourceKind, Template,
};
use crate::error::StackResult;

use super::catalog::{self, github};
use super::parameters as p;
use super::{naming, workflow, RepositorySettings};

/// Name of the composite output carrying the function URL
pub const RUN_URL_OUTPUT: &str = "run_url";

/// The function stack composer
#[derive(Debug, Clone, Default)]
pub struct ProjectStack {
    repository: RepositorySettings,
}

/// Addresses of the declarations a caller may want to inspect
#[derive(Debug, Clone, PartialEq)]
pub struct StackHandles {
    pub repository: Address,
    pub services: Vec<Address>,
    pub service_account: Address,
    pub service_account_key: Address,
    /// Present only when `create_bucket` is true
    pub bucket: Option<Address>,
    pub cloud_run: Address,
    pub role_bindings: Vec<Address>,
    pub artifact_repository: Address,
    pub artifact_repository_binding: Address,
    pub workflow: Address,
    pub scheduler: Address,
    pub alert_policy: Address,
    pub credentials_secret: Address,
    pub variables: Vec<Address>,
}

/// Result of one composition pass
#[derive(Debug, Clone)]
pub struct ComposedStack {
    pub graph: DeclarationGraph,
    pub handles: StackHandles,
    pub parameters: BoundParameters,
    pub warnings: Vec<BindWarning>,
}

/// Parameter values read once, before the first declaration
struct StackInputs<'a> {
    project_name: &'a str,
    direction: &'a str,
    project_id: &'a str,
    region: &'a str,
    image: String,
    cpu_limits: &'a str,
    memory_limits: &'a str,
    env: Option<&'a BTreeMap<String, ParamValue>>,
    notification_channels: Vec<&'a str>,
    schedule: &'a str,
    timeout_seconds: f64,
    create_bucket: bool,
}

impl<'a> StackInputs<'a> {
    fn read(params: &'a BoundParameters) -> StackResult<Self> {
        let project_name = params.string(p::PROJECT_NAME)?;
        let project_id = params.string(p::PROJECT_ID)?;
        let region = params.string(p::REGION)?;
        let image = naming::resolve_image(
            params.optional_string(p::IMAGE)?,
            region,
            project_id,
            project_name,
        );

        Ok(Self {
            project_name,
            direction: params.string(p::DIRECTION)?,
            project_id,
            region,
            image,
            cpu_limits: params.string(p::CPU_LIMITS)?,
            memory_limits: params.string(p::MEMORY_LIMITS)?,
            env: params.optional_map(p::ENV)?,
            notification_channels: params.string_list(p::NOTIFICATION_CHANNELS)?,
            schedule: params.string(p::SCHEDULE)?,
            timeout_seconds: params.number(p::TIMEOUT_SECONDS)?,
            create_bucket: params.bool(p::CREATE_BUCKET)?,
        })
    }
}

impl ProjectStack {
    pub fn new(repository: RepositorySettings) -> Self {
        Self { repository }
    }

    /// Declared parameters of the stack
    pub fn parameters() -> Vec<Parameter> {
        p::declare()
    }

    /// Bind `inputs` and compose the declaration graph.
    ///
    /// Fails before any declaration exists when a required parameter is
    /// missing or a value has the wrong type.
    pub fn compose(&self, inputs: &Inputs) -> StackResult<ComposedStack> {
        let binding = bind(&Self::parameters(), inputs)?;
        let (graph, handles) = self.compose_bound(&binding.parameters)?;
        Ok(ComposedStack {
            graph,
            handles,
            parameters: binding.parameters,
            warnings: binding.warnings,
        })
    }

    /// Compose from already bound parameters
    pub fn compose_bound(
        &self,
        params: &BoundParameters,
    ) -> StackResult<(DeclarationGraph, StackHandles)> {
        let inputs = StackInputs::read(params)?;
        let mut graph = DeclarationGraph::new();

        let repository = self.declare_repository(&mut graph, &inputs)?;
        let services = declare_services(&mut graph, &inputs)?;
        let (service_account, service_account_key) =
            declare_service_account(&mut graph, &inputs)?;
        let bucket = declare_bucket(&mut graph, &inputs, &services)?;
        let cloud_run = declare_cloud_run(&mut graph, &inputs, &service_account, &services)?;
        let role_bindings = declare_role_bindings(&mut graph, &inputs, &service_account)?;
        let (artifact_repository, artifact_repository_binding) =
            declare_artifact_registry(&mut graph, &inputs, &service_account, &services)?;
        let workflow = declare_workflow(&mut graph, &inputs, &service_account, &cloud_run, &services)?;
        let scheduler =
            declare_scheduler(&mut graph, &inputs, &service_account, &workflow, &services)?;
        let alert_policy = declare_alert_policy(&mut graph, &inputs, &cloud_run)?;
        let credentials_secret =
            declare_credentials_secret(&mut graph, &repository, &service_account_key)?;
        let variables = declare_repository_variables(
            &mut graph,
            &inputs,
            &repository,
            &cloud_run,
            &artifact_repository,
        )?;

        graph.add_output(
            CompositeOutput::new(RUN_URL_OUTPUT, function_url(&cloud_run))
                .describe("URL of the Cloud Run service"),
        );

        graph.validate()?;
        tracing::info!(
            declarations = graph.len(),
            bucket = bucket.is_some(),
            "stack composed"
        );

        let handles = StackHandles {
            repository,
            services,
            service_account,
            service_account_key,
            bucket,
            cloud_run,
            role_bindings,
            artifact_repository,
            artifact_repository_binding,
            workflow,
            scheduler,
            alert_policy,
            credentials_secret,
            variables,
        };
        Ok((graph, handles))
    }

    fn declare_repository(
        &self,
        graph: &mut DeclarationGraph,
        inputs: &StackInputs<'_>,
    ) -> StackResult<Address> {
        let settings = &self.repository;
        graph.insert(
            Declaration::new(ResourceKind::GithubRepository, id("function_repo")?)
                .attr(
                    "name",
                    naming::repository_name(inputs.direction, inputs.project_name),
                )
                .attr(
                    "description",
                    format!(
                        "Repository for project {} of direction {}",
                        inputs.project_name, inputs.direction
                    ),
                )
                .attr("visibility", settings.visibility.as_str())
                .attr(
                    "template",
                    Value::block([
                        ("owner", Value::from(settings.template_owner.as_str())),
                        ("repository", Value::from(settings.template_repository.as_str())),
                        ("include_all_branches", Value::from(settings.include_all_branches)),
                    ]),
                ),
        )
    }
}

fn id(name: &str) -> StackResult<LogicalId> {
    LogicalId::new(name)
}

/// `status[0].url` of the Cloud Run service
fn function_url(cloud_run: &Address) -> OutputRef {
    cloud_run.lookup(FieldPath::attr("status").then_index(0).then_attr("url"))
}

/// `serviceAccount:<email>` member string
fn service_account_member(service_account: &Address) -> Template {
    Template::new()
        .lit("serviceAccount:")
        .reference(service_account.field("email"))
}

fn declare_services(
    graph: &mut DeclarationGraph,
    inputs: &StackInputs<'_>,
) -> StackResult<Vec<Address>> {
    catalog::REQUIRED_SERVICES
        .iter()
        .map(|service| {
            graph.insert(
                Declaration::new(
                    ResourceKind::ProjectService,
                    LogicalId::fan_out("service", service)?,
                )
                .attr("project", inputs.project_id)
                .attr("service", *service),
            )
        })
        .collect()
}

fn declare_service_account(
    graph: &mut DeclarationGraph,
    inputs: &StackInputs<'_>,
) -> StackResult<(Address, Address)> {
    let account = graph.insert(
        Declaration::new(ResourceKind::ServiceAccount, id("service_account")?)
            .attr("account_id", naming::service_account_id(inputs.project_name))
            .attr(
                "display_name",
                format!(
                    "Service account managed by terraform for {}",
                    inputs.project_id
                ),
            )
            .attr("project", inputs.project_id),
    )?;

    let key = graph.insert(
        Declaration::new(ResourceKind::ServiceAccountKey, id("service_account_key")?)
            .attr("service_account_id", account.field("name")),
    )?;

    Ok((account, key))
}

fn declare_bucket(
    graph: &mut DeclarationGraph,
    inputs: &StackInputs<'_>,
    services: &[Address],
) -> StackResult<Option<Address>> {
    if !inputs.create_bucket {
        tracing::debug!("bucket disabled");
        return Ok(None);
    }

    graph
        .insert(
            Declaration::new(ResourceKind::StorageBucket, id("bucket")?)
                .attr(
                    "name",
                    naming::bucket_name(inputs.project_name, inputs.project_id),
                )
                .attr("location", inputs.region)
                .attr("project", inputs.project_id)
                .attr("storage_class", catalog::BUCKET_STORAGE_CLASS)
                .attr("uniform_bucket_level_access", true)
                .depends_on_all(services),
        )
        .map(Some)
}

fn container_env(env: Option<&BTreeMap<String, ParamValue>>) -> Value {
    let Some(env) = env else {
        return Value::Null;
    };
    Value::List(
        env.iter()
            .map(|(name, value)| {
                Value::block([
                    ("name", Value::from(name.as_str())),
                    ("value", Value::from(value.to_plain_string())),
                ])
            })
            .collect(),
    )
}

fn declare_cloud_run(
    graph: &mut DeclarationGraph,
    inputs: &StackInputs<'_>,
    service_account: &Address,
    services: &[Address],
) -> StackResult<Address> {
    let container = Value::block([
        ("image", Value::from(inputs.image.as_str())),
        ("env", container_env(inputs.env)),
        (
            "resources",
            Value::block([(
                "limits",
                Value::block([
                    ("cpu", inputs.cpu_limits),
                    ("memory", inputs.memory_limits),
                ]),
            )]),
        ),
    ]);

    graph.insert(
        Declaration::new(ResourceKind::CloudRunService, id("cloud_run")?)
            .attr(
                "name",
                naming::cloud_run_name(inputs.project_name, inputs.project_id),
            )
            .attr("location", inputs.region)
            .attr("project", inputs.project_id)
            .attr("autogenerate_revision_name", true)
            .attr(
                "metadata",
                Value::block([(
                    "annotations",
                    Value::block([(
                        catalog::CLOUD_RUN_INGRESS_ANNOTATION,
                        catalog::CLOUD_RUN_INGRESS,
                    )]),
                )]),
            )
            .attr(
                "template",
                Value::block([(
                    "spec",
                    Value::block([
                        (
                            "service_account_name",
                            Value::from(service_account.field("email")),
                        ),
                        ("timeout_seconds", Value::from(inputs.timeout_seconds)),
                        ("containers", Value::List(vec![container])),
                    ]),
                )]),
            )
            .depends_on(service_account)
            .depends_on_all(services),
    )
}

fn declare_role_bindings(
    graph: &mut DeclarationGraph,
    inputs: &StackInputs<'_>,
    service_account: &Address,
) -> StackResult<Vec<Address>> {
    catalog::SERVICE_ACCOUNT_ROLES
        .iter()
        .map(|role| {
            graph.insert(
                Declaration::new(
                    ResourceKind::ProjectIamMember,
                    LogicalId::fan_out("sa_binding", role)?,
                )
                .attr("member", service_account_member(service_account))
                .attr("project", inputs.project_id)
                .attr("role", *role),
            )
        })
        .collect()
}

fn declare_artifact_registry(
    graph: &mut DeclarationGraph,
    inputs: &StackInputs<'_>,
    service_account: &Address,
    services: &[Address],
) -> StackResult<(Address, Address)> {
    let repository = graph.insert(
        Declaration::new(ResourceKind::ArtifactRegistryRepository, id("project_repo")?)
            .attr(
                "description",
                format!("docker repository for {}", inputs.project_name),
            )
            .attr("format", "DOCKER")
            .attr("location", inputs.region)
            .attr("project", inputs.project_id)
            .attr("repository_id", inputs.project_name)
            .depends_on_all(services),
    )?;

    let binding = graph.insert(
        Declaration::new(
            ResourceKind::ArtifactRegistryRepositoryIamMember,
            id("project_repo_admin")?,
        )
        .attr("location", inputs.region)
        .attr("member", service_account_member(service_account))
        .attr("project", inputs.project_id)
        .attr("repository", repository.field("name"))
        .attr("role", catalog::REPOSITORY_ADMIN_ROLE),
    )?;

    Ok((repository, binding))
}

fn declare_workflow(
    graph: &mut DeclarationGraph,
    inputs: &StackInputs<'_>,
    service_account: &Address,
    cloud_run: &Address,
    services: &[Address],
) -> StackResult<Address> {
    graph.insert(
        Declaration::new(ResourceKind::WorkflowsWorkflow, id("workflow")?)
            .attr(
                "name",
                naming::workflow_name(inputs.project_name, inputs.project_id),
            )
            .attr(
                "description",
                format!("Data transfer workflow for {}", inputs.project_id),
            )
            .attr("project", inputs.project_id)
            .attr("region", inputs.region)
            .attr("service_account", service_account.field("id"))
            .attr("source_contents", workflow::source(function_url(cloud_run)))
            .depends_on_all(services),
    )
}

fn declare_scheduler(
    graph: &mut DeclarationGraph,
    inputs: &StackInputs<'_>,
    service_account: &Address,
    workflow: &Address,
    services: &[Address],
) -> StackResult<Address> {
    let executions_uri = Template::new()
        .lit(catalog::WORKFLOW_EXECUTIONS_API)
        .reference(workflow.field("id"))
        .lit("/executions");

    graph.insert(
        Declaration::new(ResourceKind::CloudSchedulerJob, id("job")?)
            .attr(
                "name",
                naming::scheduler_name(inputs.project_name, inputs.project_id),
            )
            .attr(
                "description",
                format!(
                    "Workflow schedule for {} at {}",
                    inputs.project_name, inputs.schedule
                ),
            )
            .attr("project", inputs.project_id)
            .attr("region", inputs.region)
            .attr("schedule", inputs.schedule)
            .attr("time_zone", catalog::SCHEDULER_TIME_ZONE)
            .attr("attempt_deadline", catalog::SCHEDULER_ATTEMPT_DEADLINE)
            .attr(
                "retry_config",
                Value::block([("retry_count", catalog::SCHEDULER_RETRY_COUNT)]),
            )
            .attr(
                "http_target",
                Value::block([
                    ("http_method", Value::from("POST")),
                    ("uri", Value::from(executions_uri)),
                    (
                        "oauth_token",
                        Value::block([(
                            "service_account_email",
                            service_account.field("email"),
                        )]),
                    ),
                ]),
            )
            .depends_on_all(services),
    )
}

fn declare_alert_policy(
    graph: &mut DeclarationGraph,
    inputs: &StackInputs<'_>,
    cloud_run: &Address,
) -> StackResult<Address> {
    let filter = Template::new()
        .lit(catalog::ERROR_LOG_FILTER_PREFIX)
        .reference(cloud_run.field("name"));

    graph.insert(
        Declaration::new(ResourceKind::MonitoringAlertPolicy, id("errors")?)
            .attr(
                "display_name",
                format!("Errors in logs alert policy on {}", inputs.project_name),
            )
            .attr("combiner", catalog::ALERT_COMBINER)
            .attr(
                "conditions",
                Value::List(vec![Value::block([
                    ("display_name", Value::from("Error condition")),
                    (
                        "condition_matched_log",
                        Value::block([("filter", filter)]),
                    ),
                ])]),
            )
            .attr(
                "alert_strategy",
                Value::block([(
                    "notification_rate_limit",
                    Value::block([("period", catalog::ALERT_RATE_LIMIT_PERIOD)]),
                )]),
            )
            .attr(
                "notification_channels",
                inputs.notification_channels.clone(),
            )
            .attr("project", inputs.project_id),
    )
}

fn declare_credentials_secret(
    graph: &mut DeclarationGraph,
    repository: &Address,
    service_account_key: &Address,
) -> StackResult<Address> {
    graph.insert(
        Declaration::new(ResourceKind::GithubActionsSecret, id("gcp_credentials")?)
            .attr("repository", repository.field("name"))
            .attr("secret_name", github::GCP_CREDENTIALS)
            .attr(
                "plaintext_value",
                Value::Secret(service_account_key.field("private_key")),
            )
            .depends_on(repository)
            .depends_on(service_account_key),
    )
}

fn declare_repository_variables(
    graph: &mut DeclarationGraph,
    inputs: &StackInputs<'_>,
    repository: &Address,
    cloud_run: &Address,
    artifact_repository: &Address,
) -> StackResult<Vec<Address>> {
    let variables: [(&str, &str, Value); 6] = [
        (
            "function_name",
            github::FUNCTION_NAME,
            naming::function_name(inputs.project_name).into(),
        ),
        (
            "gcp_cloud_service",
            github::GCP_CLOUD_SERVICE,
            cloud_run.field("name").into(),
        ),
        ("gcp_project_id", github::GCP_PROJECT_ID, inputs.project_id.into()),
        ("gcp_region", github::GCP_REGION, inputs.region.into()),
        (
            "gcp_repository",
            github::GCP_REPOSITORY,
            artifact_repository.field("name").into(),
        ),
        ("project_name", github::PROJECT_NAME, inputs.project_name.into()),
    ];

    variables
        .into_iter()
        .map(|(name, variable_name, value)| {
            graph.insert(
                Declaration::new(ResourceKind::GithubActionsVariable, id(name)?)
                    .attr("repository", repository.field("name"))
                    .attr("variable_name", variable_name)
                    .attr("value", value)
                    .depends_on(repository),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests;
