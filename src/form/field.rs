/// The scalar fields tracked individually by the edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    Title,
    Description,
}

impl ScalarField {
    pub const ALL: [ScalarField; 2] = [ScalarField::Title, ScalarField::Description];

    pub fn name(self) -> &'static str {
        match self {
            ScalarField::Title => "title",
            ScalarField::Description => "description",
        }
    }

    pub fn pointer(self) -> &'static str {
        match self {
            ScalarField::Title => "/title",
            ScalarField::Description => "/description",
        }
    }

    pub fn from_pointer(pointer: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.pointer() == pointer)
    }
}

/// The record-list fields of the form context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Experiences,
    Education,
}

/// Per-field edit progress: `Changing` on every keystroke, `Changed` only
/// after a blur that passed validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldEdit {
    #[default]
    Unchanged,
    Changing,
    Changed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValidity {
    #[default]
    Unvalidated,
    Valid,
    Invalid {
        error: String,
    },
}

impl FieldValidity {
    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldValidity::Invalid { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormValidity {
    #[default]
    Unvalidated,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, Default)]
pub struct FieldState {
    pub edit: FieldEdit,
    pub validity: FieldValidity,
}

#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pub title: FieldState,
    pub description: FieldState,
}

impl FormFields {
    pub fn field(&self, field: ScalarField) -> &FieldState {
        match field {
            ScalarField::Title => &self.title,
            ScalarField::Description => &self.description,
        }
    }

    pub fn field_mut(&mut self, field: ScalarField) -> &mut FieldState {
        match field {
            ScalarField::Title => &mut self.title,
            ScalarField::Description => &mut self.description,
        }
    }
}

/// Which list fields have been touched by a structural or in-record edit
/// since the last successful submit. A touched list is resent in full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchedLists {
    pub experiences: bool,
    pub education: bool,
}

impl TouchedLists {
    pub fn mark(&mut self, list: ListField) {
        match list {
            ListField::Experiences => self.experiences = true,
            ListField::Education => self.education = true,
        }
    }
}
