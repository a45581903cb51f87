use std::fmt::Display;

use serde::Serialize;

use crate::errors::{Error, Result};

/// An optional string attribute of a gateway request.
///
/// The gateway distinguishes an absent attribute from an empty one, so a
/// `Field` is never defaulted to `""`: it is either present with a value
/// (possibly empty) or absent, in which case it takes no part in signing or
/// serialization.
///
/// ```
/// use fondy_core::types::Field;
///
/// let mut field = Field::absent();
/// assert!(!field.is_present());
///
/// field.set("UAH");
/// assert_eq!(field.value("currency").unwrap(), "UAH");
///
/// let empty = Field::from("");
/// assert!(empty.is_present());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Field(Option<String>);

impl Field {
    pub const fn absent() -> Self {
        Field(None)
    }

    pub fn new(value: impl Into<String>) -> Self {
        Field(Some(value.into()))
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Get the value, failing with [`Error::FieldAbsent`] tagged with `name` if absent.
    pub fn value(&self, name: &'static str) -> Result<&str> {
        self.0.as_deref().ok_or(Error::FieldAbsent(name))
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.0 = Some(value.into());
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Serializer for attributes the gateway expects on every request.
    ///
    /// An absent value is written as an empty string instead of being skipped.
    pub fn serialize_or_empty<S>(field: &Field, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(field.as_deref().unwrap_or_default())
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::new(value)
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field(Some(value))
    }
}

impl From<&String> for Field {
    fn from(value: &String) -> Self {
        Field::new(value.as_str())
    }
}

impl From<Option<String>> for Field {
    fn from(value: Option<String>) -> Self {
        Field(value)
    }
}

impl From<Option<&str>> for Field {
    fn from(value: Option<&str>) -> Self {
        Field(value.map(str::to_owned))
    }
}

impl From<Field> for Option<String> {
    fn from(field: Field) -> Self {
        field.0
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "<absent>"),
        }
    }
}

impl Serialize for Field {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}
