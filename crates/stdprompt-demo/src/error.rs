use thiserror::Error;

/// Why the demo stopped without printing a value.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Usage: {program} <type>")]
    Usage { program: String },
    #[error("Unknown type '{name}'")]
    UnknownType { name: String },
    /// The getter returned its sentinel: input ran out, or the user typed
    /// the type's maximum value.
    #[error("Unable to allocate {what}")]
    Sentinel { what: &'static str },
    #[error("output failed: {0}")]
    Io(#[from] std::io::Error),
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage { .. } => 1,
            Self::UnknownType { .. } => 2,
            Self::Sentinel { .. } => 3,
            Self::Io(_) => 4,
        }
    }

    /// Usage problems get a pointer to `--help`.
    #[must_use]
    pub fn wants_help_hint(&self) -> bool {
        matches!(self, Self::Usage { .. } | Self::UnknownType { .. })
    }
}
