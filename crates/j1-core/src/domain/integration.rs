//! Integration definitions and instances.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::PageInfo;

/// A configured instance of an integration in the account.
///
/// Listing only returns the identifying fields; `config` is filled in when a
/// single instance is fetched or updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationInstance {
    pub id: String,
    pub name: String,
    pub integration_definition_id: String,
    pub description: Option<String>,
    pub polling_interval: Option<String>,
    pub account_id: Option<String>,
    /// Integration-specific settings such as `roleArn` or `@tag`.
    #[serde(deserialize_with = "null_as_empty")]
    pub config: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// An integration available for configuration.
///
/// `config_fields` differ per integration and stay opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationDefinition {
    pub id: String,
    pub integration_type: String,
    pub integration_class: Vec<String>,
    pub name: String,
    pub title: String,
    pub repo_web_link: Option<String>,
    pub config_fields: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationInstancePage {
    pub instances: Vec<IntegrationInstance>,
    #[serde(default)]
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationDefinitionPage {
    pub definitions: Vec<IntegrationDefinition>,
    #[serde(default)]
    pub page_info: PageInfo,
}
