use crate::domain::ResumeDocument;

/// How the session was opened. `Update` and `Clone` carry the server's last
/// known version of the document, used as the validation and diff baseline.
/// A session never switches mode, except that a successful submit re-enters
/// `Update` with the freshly returned document.
#[derive(Debug, Clone)]
pub enum Mode {
    Create,
    Update { resume: ResumeDocument },
    Clone { resume: ResumeDocument },
}

impl Mode {
    pub fn reference(&self) -> Option<&ResumeDocument> {
        match self {
            Mode::Create => None,
            Mode::Update { resume } | Mode::Clone { resume } => Some(resume),
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Mode::Create)
    }
}
