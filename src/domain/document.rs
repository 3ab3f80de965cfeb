use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The server's view of a resume. Supplied as the reference document for
/// update/clone sessions and returned by a successful submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
}

/// One work-experience record. `index` is the persisted index understood by
/// the remote store; it is an ordering hint, not the array position, and may
/// be sparse or non-contiguous on a freshly loaded document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub index: i32,
    pub position: String,
    pub company_name: String,
    pub from_date: String,
    pub to_date: String,
    pub achievements: Vec<String>,
}

/// One education record, shaped like [`Experience`] with school fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub index: i32,
    pub school: String,
    pub course: String,
    pub from_date: String,
    pub to_date: String,
    pub achievements: Vec<String>,
}

/// The diff payload sent to the submit collaborator. Omitted keys mean
/// "unchanged"; list values are always full replacements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResumeInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiences: Option<Vec<Experience>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Education>>,
}
