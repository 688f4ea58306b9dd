//! Tool Registry - what every tool handler captures at registration.
//!
//! The registry owns the client factory and the translator. The tool list
//! itself lives in the router it builds.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::router::build_tool_router;
use crate::domains::cloud::ClientFactory;
use crate::domains::translations::Translator;

/// Tool registry - owns what every tool handler captures at registration.
#[derive(Clone)]
pub struct ToolRegistry {
    factory: Arc<ClientFactory>,
    translator: Arc<Translator>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(factory: ClientFactory, translator: Arc<Translator>) -> Self {
        Self {
            factory: Arc::new(factory),
            translator,
        }
    }

    /// The translator shared by all tool descriptions.
    pub fn translator(&self) -> &Arc<Translator> {
        &self.translator
    }

    /// Build the rmcp router with every tool registered.
    pub fn router<S>(&self) -> ToolRouter<S>
    where
        S: Send + Sync + 'static,
    {
        build_tool_router(self.factory.clone(), &self.translator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::cloud::testing::RecordingConnector;
    use crate::domains::tools::definitions::test_support::factory;
    use std::collections::HashMap;

    struct TestServer;

    #[test]
    fn test_descriptions_come_from_translator() {
        let mut file = HashMap::new();
        file.insert(
            "TOOL_LIST_BACKUPS_DESCRIPTION".to_string(),
            "Backups, overridden".to_string(),
        );
        let registry = ToolRegistry::new(
            factory(RecordingConnector::respond(200, "{}")),
            Arc::new(Translator::with_sources("KB_CLOUD_MCP_UNIT_TEST_UNSET_", file)),
        );

        let router: ToolRouter<TestServer> = registry.router();
        let tools = router.list_all();
        let list_backups = tools.iter().find(|t| t.name == "list_backups").unwrap();

        assert_eq!(list_backups.description.as_deref(), Some("Backups, overridden"));
        assert!(
            registry
                .translator()
                .snapshot()
                .contains_key("TOOL_GET_ORGANIZATION_DESCRIPTION")
        );
    }
}
