//! Domains module containing business logic organized by bounded contexts.
//!
//! - **cloud**: credentials, client construction and the KB Cloud API surface
//! - **tools**: MCP tools exposing the API to clients
//! - **translations**: overridable description strings

pub mod cloud;
pub mod tools;
pub mod translations;
