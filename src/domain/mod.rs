mod document;

pub use document::{Education, Experience, ResumeDocument, UpdateResumeInput};
