//! Tool Router - builds the rmcp ToolRouter.
//!
//! This is the single list of registered tools. Every tool is bound to the
//! shared client factory and translator through [`create_route`].

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::contract::create_route;
use super::definitions::{
    GetBackupTool, GetEnvironmentTool, GetInstanceTool, GetOrganizationTool, ListBackupsTool,
    ListEnvironmentsTool, ListInstancesTool, ListOrganizationsTool,
};
use crate::domains::cloud::ClientFactory;
use crate::domains::translations::Translator;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(factory: Arc<ClientFactory>, translator: &Translator) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(create_route::<S, ListOrganizationsTool>(factory.clone(), translator))
        .with_route(create_route::<S, GetOrganizationTool>(factory.clone(), translator))
        .with_route(create_route::<S, ListEnvironmentsTool>(factory.clone(), translator))
        .with_route(create_route::<S, GetEnvironmentTool>(factory.clone(), translator))
        .with_route(create_route::<S, ListInstancesTool>(factory.clone(), translator))
        .with_route(create_route::<S, GetInstanceTool>(factory.clone(), translator))
        .with_route(create_route::<S, ListBackupsTool>(factory.clone(), translator))
        .with_route(create_route::<S, GetBackupTool>(factory, translator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::cloud::testing::RecordingConnector;
    use crate::domains::tools::definitions::test_support::factory;
    use std::collections::{HashMap, HashSet};

    struct TestServer {}

    fn router() -> ToolRouter<TestServer> {
        let factory = Arc::new(factory(RecordingConnector::respond(200, "{}")));
        let translator = Translator::with_sources("KB_CLOUD_MCP_UNIT_TEST_UNSET_", HashMap::new());
        build_tool_router(factory, &translator)
    }

    #[test]
    fn test_build_router() {
        let tools = router().list_all();
        let names: HashSet<_> = tools.iter().map(|t| t.name.to_string()).collect();

        assert_eq!(tools.len(), 8);
        assert_eq!(names.len(), 8);
        for name in [
            "list_organizations",
            "get_organization",
            "list_environments",
            "get_environment",
            "list_instances",
            "get_instance",
            "list_backups",
            "get_backup",
        ] {
            assert!(names.contains(name), "{name} is not registered");
        }
    }

    #[test]
    fn test_required_parameters_in_schema() {
        let tools = router().list_all();
        let get_instance = tools.iter().find(|t| t.name == "get_instance").unwrap();
        let required = get_instance.input_schema.get("required").unwrap();
        assert_eq!(
            required,
            &serde_json::json!(["org_name", "env_name", "instance_name"])
        );
    }
}
