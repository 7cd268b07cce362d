//! Property tests for naming conventions and logical ids.

use proptest::prelude::*;

use funcstack::domain::value_objects::LogicalId;
use funcstack::stack::naming;

fn project_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9-]{0,20}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: FUNCTION_NAME never contains a hyphen and keeps its length.
    #[test]
    fn property_function_name_has_no_hyphens(name in project_name()) {
        let function_name = naming::function_name(&name);
        prop_assert!(!function_name.contains('-'));
        prop_assert_eq!(function_name.len(), name.len());
    }

    /// PROPERTY: the default image is scoped to the region, project and name.
    #[test]
    fn property_default_image_embeds_inputs(
        name in project_name(),
        project_id in "[a-z][a-z0-9-]{3,20}",
        region in "(europe|us|asia)-[a-z]{4,8}[1-9]",
    ) {
        let image = naming::default_image(&region, &project_id, &name);
        let expected_prefix = format!("{}-docker.pkg.dev/{}/{}/", region, project_id, name);
        let expected_suffix = format!("/{}-function:latest", name);
        prop_assert!(image.starts_with(&expected_prefix));
        prop_assert!(image.ends_with(&expected_suffix));
    }

    /// PROPERTY: fan-out ids are valid for any item text.
    #[test]
    fn property_fan_out_ids_are_always_valid(item in "(?s).{0,40}") {
        let id = LogicalId::fan_out("service", &item).unwrap();
        prop_assert!(LogicalId::is_valid(id.as_str()));
        prop_assert!(id.as_str().starts_with("service_"));
    }
}
