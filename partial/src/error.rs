use partial_core::AnyKeyPath;

/// Errors that can occur when reading from a partial value.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum PartialError {
    /// A required field was read, but it was never set on the partial value
    /// and there is no backing value to fall back on.
    ///
    /// When a nested partial fails to materialize, this names the innermost
    /// missing field, not the field holding the nested partial.
    KeyPathNotSet {
        /// The key path that was read
        key_path: AnyKeyPath,
    },
}

impl PartialError {
    /// The key path this error is about
    pub fn key_path(&self) -> &AnyKeyPath {
        match self {
            PartialError::KeyPathNotSet { key_path } => key_path,
        }
    }
}

impl core::fmt::Display for PartialError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PartialError::KeyPathNotSet { key_path } => {
                write!(
                    f,
                    "Key path '{key_path}' has not been set and there is no backing value"
                )
            }
        }
    }
}

impl core::error::Error for PartialError {}
