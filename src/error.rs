/// Errors that can occur while building or parsing a parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// Parameter name is empty
    InvalidName,
    /// Invalid percent encoding, or decoded bytes that are not UTF-8
    InvalidPercentEncoding,
}

impl core::fmt::Display for ParamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::InvalidName => "Invalid parameter name",
            Self::InvalidPercentEncoding => "Invalid percent encoding",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParamError {}

/// Result type for parameter list operations
pub type Result<T> = core::result::Result<T, ParamError>;
