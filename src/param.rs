use crate::compat::{String, ToString};
use crate::encoding::Encoding;
use crate::error::{ParamError, Result};
use core::fmt::{self, Write};

/// A single named query parameter with an optional value.
///
/// Params order by name first. The value only breaks ties so that `Ord`
/// agrees with `Eq`; names are unique inside a [`ParamList`](crate::ParamList).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Param {
    name: String,
    value: Option<String>,
}

impl Param {
    /// Create a parameter. `None` means the parameter has no value at all,
    /// which renders differently from `Some("")`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidName`] if `name` is empty.
    pub fn new(name: &str, value: Option<&str>) -> Result<Self> {
        Self::from_owned(name.to_string(), value.map(ToString::to_string))
    }

    pub(crate) fn from_owned(name: String, value: Option<String>) -> Result<Self> {
        if name.is_empty() {
            return Err(ParamError::InvalidName);
        }
        Ok(Self { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn into_parts(self) -> (String, Option<String>) {
        (self.name, self.value)
    }

    /// Write `name` or `name=value`, each component encoded with `encoding`
    ///
    /// # Errors
    ///
    /// Only fails if `out` does.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W, encoding: Encoding) -> fmt::Result {
        encoding.write_component(out, &self.name)?;
        if let Some(value) = &self.value {
            out.write_char('=')?;
            encoding.write_component(out, value)?;
        }
        Ok(())
    }

    pub fn render(&self, encoding: Encoding) -> String {
        let mut result = String::with_capacity(self.name.len() + 1);
        let _ = self.write_to(&mut result, encoding);
        result
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, Encoding::default())
    }
}
