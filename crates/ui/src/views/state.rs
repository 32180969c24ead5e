#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    InvalidConfig,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            ViewError::InvalidConfig => "This drill could not be set up. Check the settings and try again.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}
