//! Tool definitions module.
//!
//! One file per KB Cloud resource area, each holding its list/get tools.

pub mod backups;
pub mod environments;
pub mod instances;
pub mod organizations;

pub use backups::{GetBackupTool, ListBackupsTool};
pub use environments::{GetEnvironmentTool, ListEnvironmentsTool};
pub use instances::{GetInstanceTool, ListInstancesTool};
pub use organizations::{GetOrganizationTool, ListOrganizationsTool};
