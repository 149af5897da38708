use std::{
    fmt,
    fmt::{Debug, Display},
};

use serde::Deserialize;

/// A wrapper for sensitive configuration values (API secrets, signing keys) that masks the value in `Debug` and
/// `Display` output so that it cannot leak into logs.
#[derive(Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Secret<T>
where T: Clone + Default
{
    value: T,
}

impl<T: Clone + Default> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn reveal(&self) -> &T {
        &self.value
    }
}

impl<T: Clone + Default> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Clone + Default> Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl<T: Clone + Default> Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}
