//! Client domain model.

use serde::{Deserialize, Serialize};
use shared::validation::{validate_phone_numbers, EMAIL_MAX_LEN, NAME_MAX_LEN, SURNAME_MAX_LEN};
use validator::{Validate, ValidationError, ValidationErrors};

/// A client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub client_id: i32,
    pub name: String,
    pub surname: Option<String>,
    pub email: String,
}

/// Input for creating a client together with its initial phone numbers.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    #[validate(length(max = NAME_MAX_LEN, message = "Name must be at most 40 characters"))]
    pub name: String,

    #[validate(length(
        max = SURNAME_MAX_LEN,
        message = "Surname must be at most 40 characters"
    ))]
    pub surname: Option<String>,

    #[validate(length(max = EMAIL_MAX_LEN, message = "Email must be at most 40 characters"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_phone_numbers"))]
    pub phones: Vec<String>,
}

impl NewClient {
    pub fn new(name: impl Into<String>, surname: Option<&str>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.map(str::to_string),
            email: email.into(),
            phones: Vec::new(),
        }
    }

    /// Adds initial phone numbers, inserted after the client row.
    pub fn with_phones<I, S>(mut self, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phones.extend(phones.into_iter().map(Into::into));
        self
    }
}

/// One updatable client column together with its new value.
///
/// The set of columns is closed: statement text is only ever built from
/// [`ClientField::column`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientField {
    Name(String),
    Surname(Option<String>),
    Email(String),
}

impl ClientField {
    /// Column name in the `client` table.
    pub fn column(&self) -> &'static str {
        match self {
            ClientField::Name(_) => "name",
            ClientField::Surname(_) => "surname",
            ClientField::Email(_) => "email",
        }
    }

    /// Value to bind; `None` writes NULL.
    pub fn value(&self) -> Option<&str> {
        match self {
            ClientField::Name(v) | ClientField::Email(v) => Some(v.as_str()),
            ClientField::Surname(v) => v.as_deref(),
        }
    }
}

/// Partial update of a client. Only the provided fields are written.
///
/// `surname: Some(None)` clears the surname.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub surname: Option<Option<String>>,
    pub email: Option<String>,
}

impl ClientUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn surname(mut self, surname: Option<String>) -> Self {
        self.surname = Some(surname);
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns `true` when no field is set and no statement should be executed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.surname.is_none() && self.email.is_none()
    }

    /// The fields to write, in column order.
    pub fn fields(&self) -> Vec<ClientField> {
        let mut fields = Vec::with_capacity(3);
        if let Some(name) = &self.name {
            fields.push(ClientField::Name(name.clone()));
        }
        if let Some(surname) = &self.surname {
            fields.push(ClientField::Surname(surname.clone()));
        }
        if let Some(email) = &self.email {
            fields.push(ClientField::Email(email.clone()));
        }
        fields
    }
}

impl Validate for ClientUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(name) = &self.name {
            if let Err(e) = check_length(name, NAME_MAX_LEN, "Name must be at most 40 characters") {
                errors.add("name", e);
            }
        }
        if let Some(Some(surname)) = &self.surname {
            if let Err(e) = check_length(
                surname,
                SURNAME_MAX_LEN,
                "Surname must be at most 40 characters",
            ) {
                errors.add("surname", e);
            }
        }
        if let Some(email) = &self.email {
            if let Err(e) =
                check_length(email, EMAIL_MAX_LEN, "Email must be at most 40 characters")
            {
                errors.add("email", e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_length(value: &str, max: u64, message: &'static str) -> Result<(), ValidationError> {
    if value.chars().count() as u64 <= max {
        Ok(())
    } else {
        let mut err = ValidationError::new("length");
        err.message = Some(message.into());
        Err(err)
    }
}
