//! Instance tools.
//!
//! KB Cloud calls instances clusters; the tools keep the user-facing name.

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domains::cloud::{ApiResponse, CloudClient, CloudResult, Page};
use crate::domains::tools::contract::CloudTool;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::params::{
    Arguments, ENV_NAME, INSTANCE_NAME, ORG_NAME, PAGINATION, ParamSpec, optional_pagination,
    required_param,
};

/// Parameters for [`ListInstancesTool`].
#[derive(Debug, Clone)]
pub struct ListInstancesParams {
    pub org_name: String,
    pub env_name: String,
    pub page: Page,
}

/// Lists the instances of an environment.
pub struct ListInstancesTool;

impl CloudTool for ListInstancesTool {
    const NAME: &'static str = "list_instances";
    const DESCRIPTION: &'static str = "List all instances within a KB Cloud environment";
    const ACTION: &'static str = "list instances";

    type Params = ListInstancesParams;

    fn parameters() -> Vec<ParamSpec> {
        let mut params = vec![ORG_NAME, ENV_NAME];
        params.extend(PAGINATION);
        params
    }

    fn extract(args: &Arguments) -> Result<Self::Params, ToolError> {
        Ok(ListInstancesParams {
            org_name: required_param(args, ORG_NAME.name)?,
            env_name: required_param(args, ENV_NAME.name)?,
            page: optional_pagination(args)?,
        })
    }

    fn invoke(client: &CloudClient, params: Self::Params) -> BoxFuture<'_, CloudResult<ApiResponse>> {
        async move {
            client
                .clusters
                .list(&params.org_name, &params.env_name, params.page)
                .await
        }
        .boxed()
    }
}

/// Parameters for [`GetInstanceTool`].
#[derive(Debug, Clone)]
pub struct GetInstanceParams {
    pub org_name: String,
    pub env_name: String,
    pub instance_name: String,
}

/// Gets one instance.
pub struct GetInstanceTool;

impl CloudTool for GetInstanceTool {
    const NAME: &'static str = "get_instance";
    const DESCRIPTION: &'static str = "Get details of a specific instance in KB Cloud";
    const ACTION: &'static str = "get instance";

    type Params = GetInstanceParams;

    fn parameters() -> Vec<ParamSpec> {
        vec![ORG_NAME, ENV_NAME, INSTANCE_NAME]
    }

    fn extract(args: &Arguments) -> Result<Self::Params, ToolError> {
        Ok(GetInstanceParams {
            org_name: required_param(args, ORG_NAME.name)?,
            env_name: required_param(args, ENV_NAME.name)?,
            instance_name: required_param(args, INSTANCE_NAME.name)?,
        })
    }

    fn invoke(client: &CloudClient, params: Self::Params) -> BoxFuture<'_, CloudResult<ApiResponse>> {
        async move {
            client
                .clusters
                .get(&params.org_name, &params.env_name, &params.instance_name)
                .await
        }
        .boxed()
    }
}
