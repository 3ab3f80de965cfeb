use schemars::JsonSchema;
use serde::Serialize;

use crate::domain::{Education, Experience, ResumeDocument};

/// The field values currently shown by the rendering collaborator. The
/// per-field validation rules are declared here as schema attributes; the
/// validator compiles the generated schema once and maps error pointers back
/// onto [`ScalarField`](super::ScalarField)s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormContext {
    #[schemars(length(min = 2))]
    pub title: String,
    pub description: String,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
}

impl FormContext {
    pub fn from_document(resume: &ResumeDocument) -> Self {
        Self {
            title: resume.title.clone(),
            description: resume.description.clone(),
            experiences: resume.experiences.clone(),
            education: resume.education.clone(),
        }
    }

    /// True when no field differs from the reference document. Record lists
    /// count: a reorder, insert, removal or in-record edit is a difference.
    pub fn matches_document(&self, resume: &ResumeDocument) -> bool {
        self.title == resume.title
            && self.description == resume.description
            && self.experiences == resume.experiences
            && self.education == resume.education
    }
}
