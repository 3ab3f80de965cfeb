use crate::domain::UpdateResumeInput;

use super::records::replace_list_payload;
use super::state::FormState;

/// Builds the minimal submission payload for the current form.
///
/// Update/clone sessions diff against the reference document: the record id
/// plus only the scalar fields whose value differs, plus the full list for
/// every touched list field. Create sessions have no baseline and include
/// every populated field.
pub fn compute_submission_data(form: &FormState) -> UpdateResumeInput {
    let mut input = UpdateResumeInput::default();
    let context = &form.context;

    match form.mode.reference() {
        Some(resume) => {
            input.id = Some(resume.id.clone());
            if context.title != resume.title {
                input.title = Some(context.title.clone());
            }
            if context.description != resume.description {
                input.description = Some(context.description.clone());
            }
            if form.touched.experiences {
                input.experiences = Some(replace_list_payload(
                    &resume.experiences,
                    &context.experiences,
                ));
            }
            if form.touched.education {
                input.education =
                    Some(replace_list_payload(&resume.education, &context.education));
            }
        }
        None => {
            if !context.title.is_empty() {
                input.title = Some(context.title.clone());
            }
            if !context.description.is_empty() {
                input.description = Some(context.description.clone());
            }
            if !context.experiences.is_empty() {
                input.experiences = Some(context.experiences.clone());
            }
            if !context.education.is_empty() {
                input.education = Some(context.education.clone());
            }
        }
    }
    input
}
