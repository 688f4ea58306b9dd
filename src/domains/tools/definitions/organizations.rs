//! Organization tools.

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domains::cloud::{ApiResponse, CloudClient, CloudResult, Page};
use crate::domains::tools::contract::CloudTool;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::params::{
    Arguments, PAGINATION, ParamSpec, optional_pagination, required_param,
};

/// Lists the organizations the credentials have access to.
pub struct ListOrganizationsTool;

impl CloudTool for ListOrganizationsTool {
    const NAME: &'static str = "list_organizations";
    const DESCRIPTION: &'static str = "List all organizations you have access to in KB Cloud";
    const ACTION: &'static str = "list organizations";

    type Params = Page;

    fn parameters() -> Vec<ParamSpec> {
        PAGINATION.to_vec()
    }

    fn extract(args: &Arguments) -> Result<Page, ToolError> {
        optional_pagination(args)
    }

    fn invoke(client: &CloudClient, page: Page) -> BoxFuture<'_, CloudResult<ApiResponse>> {
        client.organizations.list(page).boxed()
    }
}

/// Parameters for [`GetOrganizationTool`].
#[derive(Debug, Clone)]
pub struct GetOrganizationParams {
    pub name: String,
}

/// Gets one organization by name.
pub struct GetOrganizationTool;

impl CloudTool for GetOrganizationTool {
    const NAME: &'static str = "get_organization";
    const DESCRIPTION: &'static str = "Get details of a specific organization in KB Cloud";
    const ACTION: &'static str = "get organization";

    type Params = GetOrganizationParams;

    fn parameters() -> Vec<ParamSpec> {
        vec![ParamSpec::required_string("name", "Organization name")]
    }

    fn extract(args: &Arguments) -> Result<Self::Params, ToolError> {
        Ok(GetOrganizationParams {
            name: required_param(args, "name")?,
        })
    }

    fn invoke(client: &CloudClient, params: Self::Params) -> BoxFuture<'_, CloudResult<ApiResponse>> {
        async move { client.organizations.get(&params.name).await }.boxed()
    }
}
