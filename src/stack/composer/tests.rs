use super::*;
use crate::error::StackError;

fn orders_inputs() -> Inputs {
    let mut inputs = Inputs::new();
    inputs.insert("project_name".into(), "orders".into());
    inputs.insert("direction".into(), "finance".into());
    inputs.insert("project_id".into(), "proj-123".into());
    inputs.insert("schedule".into(), "0 * * * *".into());
    inputs.insert("notification_channels".into(), vec!["chan-1"].into());
    inputs
}

fn compose(inputs: &Inputs) -> ComposedStack {
    ProjectStack::default().compose(inputs).unwrap()
}

fn only<'a>(graph: &'a DeclarationGraph, kind: ResourceKind) -> &'a Declaration {
    let mut found = graph.of_kind(kind);
    let first = found.next().expect("declaration of kind");
    assert!(found.next().is_none(), "more than one {kind}");
    first
}

#[test]
fn orders_scenario() {
    let stack = compose(&orders_inputs());
    let graph = &stack.graph;

    let run = only(graph, ResourceKind::CloudRunService);
    assert_eq!(run.string_attribute("name"), Some("cloudrun-orders-proj-123"));

    let job = only(graph, ResourceKind::CloudSchedulerJob);
    assert_eq!(job.string_attribute("name"), Some("schedule-orders-proj-123"));

    let output = graph.output(RUN_URL_OUTPUT).unwrap();
    assert_eq!(
        output.value(),
        &Value::Ref(stack.handles.cloud_run.lookup(
            FieldPath::attr("status").then_index(0).then_attr("url")
        ))
    );
    assert!(!output.is_sensitive());
    assert!(stack.warnings.is_empty());
}

#[test]
fn composed_graph_validates() {
    let stack = compose(&orders_inputs());
    stack.graph.validate().unwrap();
    assert_eq!(
        stack.graph.topological_order().unwrap().len(),
        stack.graph.len()
    );
}

#[test]
fn missing_required_parameter_fails_first_in_order() {
    let mut inputs = orders_inputs();
    inputs.remove("direction");
    inputs.remove("schedule");

    let err = ProjectStack::default().compose(&inputs).unwrap_err();
    assert!(matches!(err, StackError::MissingParameter { ref name } if name == "direction"));
}

#[test]
fn wrong_type_fails_composition() {
    let mut inputs = orders_inputs();
    inputs.insert("create_bucket".into(), "yes".into());

    let err = ProjectStack::default().compose(&inputs).unwrap_err();
    assert!(matches!(err, StackError::TypeMismatch { ref name, .. } if name == "create_bucket"));
}

#[test]
fn bucket_is_declared_by_default() {
    let stack = compose(&orders_inputs());
    let bucket = stack.handles.bucket.as_ref().unwrap();
    let decl = stack.graph.get(bucket).unwrap();
    assert_eq!(decl.string_attribute("name"), Some("bucket-orders-proj-123"));
    assert_eq!(decl.string_attribute("storage_class"), Some("REGIONAL"));
    assert!(stack.graph.dependents(bucket).is_empty());
}

#[test]
fn no_bucket_when_disabled() {
    let mut inputs = orders_inputs();
    inputs.insert("create_bucket".into(), false.into());
    let stack = compose(&inputs);

    assert!(stack.handles.bucket.is_none());
    assert_eq!(stack.graph.of_kind(ResourceKind::StorageBucket).count(), 0);
    for decl in stack.graph.declarations() {
        assert!(decl
            .dependencies()
            .iter()
            .all(|d| d.kind() != ResourceKind::StorageBucket));
    }
}

#[test]
fn default_image_follows_registry_convention() {
    let stack = compose(&orders_inputs());
    let run = stack.graph.get(&stack.handles.cloud_run).unwrap();
    let image = run.attribute("template").unwrap().to_json()["spec"]["containers"][0]["image"].clone();
    assert_eq!(
        image,
        serde_json::json!("europe-west1-docker.pkg.dev/proj-123/orders/orders-function:latest")
    );
}

#[test]
fn explicit_image_is_used_verbatim() {
    let mut inputs = orders_inputs();
    inputs.insert("image".into(), "gcr.io/other/img:1.2".into());
    let stack = compose(&inputs);
    let run = stack.graph.get(&stack.handles.cloud_run).unwrap();
    let spec = run.attribute("template").unwrap().to_json();
    assert_eq!(
        spec["spec"]["containers"][0]["image"],
        serde_json::json!("gcr.io/other/img:1.2")
    );
}

#[test]
fn cloud_run_carries_limits_env_and_ingress() {
    let mut inputs = orders_inputs();
    let mut env = std::collections::BTreeMap::new();
    env.insert("MODE".to_string(), ParamValue::from("batch"));
    env.insert("RETRIES".to_string(), ParamValue::Number(3.0));
    inputs.insert("env".into(), ParamValue::Map(env));
    inputs.insert("timeout_seconds".into(), ParamValue::Number(600.0));

    let stack = compose(&inputs);
    let run = stack.graph.get(&stack.handles.cloud_run).unwrap();
    let template = run.attribute("template").unwrap().to_json();
    let spec = &template["spec"];

    assert_eq!(spec["timeout_seconds"], serde_json::json!(600));
    assert_eq!(
        spec["service_account_name"],
        serde_json::json!("${google_service_account.service_account.email}")
    );
    let container = &spec["containers"][0];
    assert_eq!(
        container["resources"]["limits"],
        serde_json::json!({"cpu": "1000m", "memory": "512Mi"})
    );
    assert_eq!(
        container["env"],
        serde_json::json!([
            {"name": "MODE", "value": "batch"},
            {"name": "RETRIES", "value": "3"},
        ])
    );
    assert_eq!(
        run.attribute("metadata").unwrap().to_json()["annotations"]["run.googleapis.com/ingress"],
        serde_json::json!("internal-and-cloud-load-balancing")
    );
}

#[test]
fn capability_consumers_depend_on_every_activation() {
    let stack = compose(&orders_inputs());
    let h = &stack.handles;
    assert_eq!(h.services.len(), catalog::REQUIRED_SERVICES.len());

    let consumers = [
        &h.cloud_run,
        &h.artifact_repository,
        &h.workflow,
        &h.scheduler,
        h.bucket.as_ref().unwrap(),
    ];
    for consumer in consumers {
        let decl = stack.graph.get(consumer).unwrap();
        for service in &h.services {
            assert!(
                decl.explicit_dependencies().contains(service),
                "{consumer} misses {service}"
            );
        }
    }
}

#[test]
fn function_name_replaces_hyphens() {
    let mut inputs = orders_inputs();
    inputs.insert("project_name".into(), "my-cool-fn".into());
    let stack = compose(&inputs);

    let variable = stack
        .graph
        .of_kind(ResourceKind::GithubActionsVariable)
        .find(|d| d.string_attribute("variable_name") == Some("FUNCTION_NAME"))
        .unwrap();
    assert_eq!(variable.string_attribute("value"), Some("my_cool_fn"));
}

#[test]
fn eleven_role_bindings_share_the_service_account() {
    let stack = compose(&orders_inputs());
    let bindings: Vec<_> = stack.graph.of_kind(ResourceKind::ProjectIamMember).collect();
    assert_eq!(bindings.len(), 11);
    assert_eq!(stack.handles.role_bindings.len(), 11);

    let mut roles: Vec<&str> = bindings
        .iter()
        .filter_map(|b| b.string_attribute("role"))
        .collect();
    roles.sort_unstable();
    roles.dedup();
    assert_eq!(roles.len(), 11);

    for binding in bindings {
        let refs = binding.references();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].target(), &stack.handles.service_account);
    }
}

#[test]
fn artifact_repository_is_administered_by_service_account() {
    let stack = compose(&orders_inputs());
    let repo = stack.graph.get(&stack.handles.artifact_repository).unwrap();
    assert_eq!(repo.string_attribute("format"), Some("DOCKER"));
    assert_eq!(repo.string_attribute("location"), Some("europe-west1"));
    assert_eq!(repo.string_attribute("project"), Some("proj-123"));
    assert_eq!(repo.string_attribute("repository_id"), Some("orders"));

    let binding = stack
        .graph
        .get(&stack.handles.artifact_repository_binding)
        .unwrap();
    assert_eq!(
        binding.string_attribute("role"),
        Some("roles/artifactregistry.repoAdmin")
    );
    assert_eq!(
        binding.attribute("repository").unwrap().to_json(),
        serde_json::json!("${google_artifact_registry_repository.project_repo.name}")
    );
    assert_eq!(
        binding.attribute("member").unwrap().to_json(),
        serde_json::json!("serviceAccount:${google_service_account.service_account.email}")
    );
}

#[test]
fn alert_filter_references_cloud_run_name() {
    let stack = compose(&orders_inputs());
    let policy = stack.graph.get(&stack.handles.alert_policy).unwrap();
    let conditions = policy.attribute("conditions").unwrap().to_json();
    assert_eq!(
        conditions[0]["condition_matched_log"]["filter"],
        serde_json::json!(
            "severity=ERROR AND resource.labels.service_name = ${google_cloud_run_service.cloud_run.name}"
        )
    );
    assert_eq!(policy.string_attribute("combiner"), Some("OR"));
    assert_eq!(
        policy.attribute("alert_strategy").unwrap().to_json()["notification_rate_limit"]["period"],
        serde_json::json!("300s")
    );
    assert_eq!(
        policy.attribute("notification_channels").unwrap().to_json(),
        serde_json::json!(["chan-1"])
    );
}

#[test]
fn scheduler_posts_to_workflow_executions() {
    let stack = compose(&orders_inputs());
    let job = stack.graph.get(&stack.handles.scheduler).unwrap();
    let target = job.attribute("http_target").unwrap().to_json();
    assert_eq!(target["http_method"], serde_json::json!("POST"));
    assert_eq!(
        target["uri"],
        serde_json::json!(
            "https://workflowexecutions.googleapis.com/v1/${google_workflows_workflow.workflow.id}/executions"
        )
    );
    assert_eq!(job.string_attribute("time_zone"), Some("Pacific/Noumea"));
    assert_eq!(job.string_attribute("attempt_deadline"), Some("320s"));
    assert_eq!(
        job.attribute("retry_config").unwrap().to_json()["retry_count"],
        serde_json::json!(1)
    );
}

#[test]
fn workflow_calls_function_url() {
    let stack = compose(&orders_inputs());
    let workflow = stack.graph.get(&stack.handles.workflow).unwrap();
    let deps = workflow.dependencies();
    assert!(deps.contains(&&stack.handles.cloud_run));
    assert_eq!(
        workflow.string_attribute("name"),
        Some("workflow-orders-proj-123")
    );
}

#[test]
fn private_key_only_reaches_the_secret() {
    let stack = compose(&orders_inputs());
    let key = &stack.handles.service_account_key;

    let holders: Vec<_> = stack
        .graph
        .declarations()
        .iter()
        .filter(|d| d.references().iter().any(|r| r.target() == key))
        .collect();
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].address(), &stack.handles.credentials_secret);
    assert_eq!(
        holders[0].secret_attributes().collect::<Vec<_>>(),
        vec!["plaintext_value"]
    );

    for output in stack.graph.outputs() {
        let mut refs = Vec::new();
        output.value().collect_references(&mut refs);
        assert!(refs.iter().all(|r| r.target() != key));
    }
}

#[test]
fn repository_variables_depend_on_repository() {
    let stack = compose(&orders_inputs());
    let names: Vec<_> = stack
        .handles
        .variables
        .iter()
        .map(|a| {
            let decl = stack.graph.get(a).unwrap();
            assert!(decl.explicit_dependencies().contains(&stack.handles.repository));
            decl.string_attribute("variable_name").unwrap()
        })
        .collect();
    assert_eq!(
        names,
        vec![
            "FUNCTION_NAME",
            "GCP_CLOUD_SERVICE",
            "GCP_PROJECT_ID",
            "GCP_REGION",
            "GCP_REPOSITORY",
            "PROJECT_NAME",
        ]
    );
}

#[test]
fn repository_settings_shape_template_block() {
    let stack = ProjectStack::new(RepositorySettings {
        template_owner: "acme".into(),
        template_repository: "fn-template".into(),
        visibility: crate::stack::Visibility::Private,
        include_all_branches: true,
    })
    .compose(&orders_inputs())
    .unwrap();

    let repo = stack.graph.get(&stack.handles.repository).unwrap();
    assert_eq!(repo.string_attribute("name"), Some("finance-orders-function"));
    assert_eq!(repo.string_attribute("visibility"), Some("private"));
    assert_eq!(
        repo.attribute("template").unwrap().to_json(),
        serde_json::json!({
            "owner": "acme",
            "repository": "fn-template",
            "include_all_branches": true,
        })
    );
}
