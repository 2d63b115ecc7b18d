//! Uniform result wrapper returned by every business operation.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub const CODE_OK: u16 = 200;
pub const CODE_BAD_REQUEST: u16 = 400;
pub const CODE_FORBIDDEN: u16 = 403;
pub const CODE_NOT_FOUND: u16 = 404;

/// `code` doubles as the HTTP status. Success carries `data` and no errors;
/// failure carries at least one error message and no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub data: Option<T>,
    pub errors: Option<Vec<String>>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { code: CODE_OK, data: Some(data), errors: None }
    }

    pub fn bad_request<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::failure(CODE_BAD_REQUEST, errors)
    }

    pub fn forbidden<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::failure(CODE_FORBIDDEN, errors)
    }

    pub fn not_found(id: impl Display) -> Self {
        Self::failure(CODE_NOT_FOUND, [format!("There is no object with id: {id}")])
    }

    fn failure<I, S>(code: u16, errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { code, data: None, errors: Some(errors.into_iter().map(Into::into).collect()) }
    }

    pub fn is_success(&self) -> bool { self.code == CODE_OK }

    pub fn errors(&self) -> &[String] {
        self.errors.as_deref().unwrap_or_default()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope { code: self.code, data: self.data.map(f), errors: self.errors }
    }
}

impl Envelope<()> {
    /// Success without a payload (deletes).
    pub fn ok_empty() -> Self {
        Self { code: CODE_OK, data: None, errors: None }
    }
}
