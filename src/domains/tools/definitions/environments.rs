//! Environment tools.

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domains::cloud::{ApiResponse, CloudClient, CloudResult, Page};
use crate::domains::tools::contract::CloudTool;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::params::{
    Arguments, ENV_NAME, ORG_NAME, PAGINATION, ParamSpec, optional_pagination, required_param,
};

/// Parameters for [`ListEnvironmentsTool`].
#[derive(Debug, Clone)]
pub struct ListEnvironmentsParams {
    pub org_name: String,
    pub page: Page,
}

/// Lists the environments of an organization.
pub struct ListEnvironmentsTool;

impl CloudTool for ListEnvironmentsTool {
    const NAME: &'static str = "list_environments";
    const DESCRIPTION: &'static str = "List all environments within a KB Cloud organization";
    const ACTION: &'static str = "list environments";

    type Params = ListEnvironmentsParams;

    fn parameters() -> Vec<ParamSpec> {
        let mut params = vec![ORG_NAME];
        params.extend(PAGINATION);
        params
    }

    fn extract(args: &Arguments) -> Result<Self::Params, ToolError> {
        Ok(ListEnvironmentsParams {
            org_name: required_param(args, ORG_NAME.name)?,
            page: optional_pagination(args)?,
        })
    }

    fn invoke(client: &CloudClient, params: Self::Params) -> BoxFuture<'_, CloudResult<ApiResponse>> {
        async move { client.environments.list(&params.org_name, params.page).await }.boxed()
    }
}

/// Parameters for [`GetEnvironmentTool`].
#[derive(Debug, Clone)]
pub struct GetEnvironmentParams {
    pub org_name: String,
    pub env_name: String,
}

/// Gets one environment of an organization.
pub struct GetEnvironmentTool;

impl CloudTool for GetEnvironmentTool {
    const NAME: &'static str = "get_environment";
    const DESCRIPTION: &'static str = "Get details of a specific environment in KB Cloud";
    const ACTION: &'static str = "get environment";

    type Params = GetEnvironmentParams;

    fn parameters() -> Vec<ParamSpec> {
        vec![ORG_NAME, ENV_NAME]
    }

    fn extract(args: &Arguments) -> Result<Self::Params, ToolError> {
        Ok(GetEnvironmentParams {
            org_name: required_param(args, ORG_NAME.name)?,
            env_name: required_param(args, ENV_NAME.name)?,
        })
    }

    fn invoke(client: &CloudClient, params: Self::Params) -> BoxFuture<'_, CloudResult<ApiResponse>> {
        async move {
            client
                .environments
                .get(&params.org_name, &params.env_name)
                .await
        }
        .boxed()
    }
}
