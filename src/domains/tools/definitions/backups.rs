//! Backup tools.

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domains::cloud::{ApiResponse, CloudClient, CloudResult, Page};
use crate::domains::tools::contract::CloudTool;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::params::{
    Arguments, ENV_NAME, INSTANCE_NAME, ORG_NAME, PAGINATION, ParamSpec, optional_pagination,
    required_param,
};

const BACKUP_ID: ParamSpec = ParamSpec::required_string("backup_id", "Backup ID");

/// Parameters for [`ListBackupsTool`].
#[derive(Debug, Clone)]
pub struct ListBackupsParams {
    pub org_name: String,
    pub env_name: String,
    pub instance_name: String,
    pub page: Page,
}

/// Lists the backups of an instance.
pub struct ListBackupsTool;

impl CloudTool for ListBackupsTool {
    const NAME: &'static str = "list_backups";
    const DESCRIPTION: &'static str = "List all backups for a KB Cloud instance";
    const ACTION: &'static str = "list backups";

    type Params = ListBackupsParams;

    fn parameters() -> Vec<ParamSpec> {
        let mut params = vec![ORG_NAME, ENV_NAME, INSTANCE_NAME];
        params.extend(PAGINATION);
        params
    }

    fn extract(args: &Arguments) -> Result<Self::Params, ToolError> {
        Ok(ListBackupsParams {
            org_name: required_param(args, ORG_NAME.name)?,
            env_name: required_param(args, ENV_NAME.name)?,
            instance_name: required_param(args, INSTANCE_NAME.name)?,
            page: optional_pagination(args)?,
        })
    }

    fn invoke(client: &CloudClient, params: Self::Params) -> BoxFuture<'_, CloudResult<ApiResponse>> {
        async move {
            client
                .backups
                .list(
                    &params.org_name,
                    &params.env_name,
                    &params.instance_name,
                    params.page,
                )
                .await
        }
        .boxed()
    }
}

/// Parameters for [`GetBackupTool`].
#[derive(Debug, Clone)]
pub struct GetBackupParams {
    pub org_name: String,
    pub backup_id: String,
}

/// Gets one backup by id.
pub struct GetBackupTool;

impl CloudTool for GetBackupTool {
    const NAME: &'static str = "get_backup";
    const DESCRIPTION: &'static str = "Get details of a specific backup in KB Cloud";
    const ACTION: &'static str = "get backup";

    type Params = GetBackupParams;

    fn parameters() -> Vec<ParamSpec> {
        vec![ORG_NAME, BACKUP_ID]
    }

    fn extract(args: &Arguments) -> Result<Self::Params, ToolError> {
        Ok(GetBackupParams {
            org_name: required_param(args, ORG_NAME.name)?,
            backup_id: required_param(args, BACKUP_ID.name)?,
        })
    }

    fn invoke(client: &CloudClient, params: Self::Params) -> BoxFuture<'_, CloudResult<ApiResponse>> {
        async move { client.backups.get(&params.org_name, &params.backup_id).await }.boxed()
    }
}
