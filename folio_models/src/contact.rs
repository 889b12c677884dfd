use std::{collections::BTreeMap, fmt, str::FromStr, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email_address::EmailAddress;

/// Minimum number of characters a message must have after trimming.
pub const MESSAGE_MIN_CHARS: usize = 10;
/// Maximum number of characters of the name after trimming.
pub const NAME_MAX_CHARS: usize = 256;
/// Maximum number of characters of the subject after trimming.
pub const SUBJECT_MAX_CHARS: usize = 256;
/// Maximum number of characters of the message after trimming.
pub const MESSAGE_MAX_CHARS: usize = 4096;

/// Permissive single-`@` shape check. This is not an RFC 5322 validation.
pub static EMAIL_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: ContactMessageAuthorEmail,
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorEmail(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

impl ContactMessageAuthorEmail {
    /// Returns the address if it is a deliverable mailbox address.
    pub fn parse_address(&self) -> Option<EmailAddress> {
        self.parse().ok()
    }
}

/// Returned when the fields of a message cannot be accepted as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactMessageFieldsError {
    /// One of the four fields is missing or blank.
    #[error("Missing required fields")]
    Missing,
    /// A field exceeds its maximum length.
    #[error("Fields too long")]
    TooLong,
}

macro_rules! fields_error_from {
    ($($error:ident),* $(,)?) => {
        $(
            impl From<$error> for ContactMessageFieldsError {
                fn from(value: $error) -> Self {
                    match value {
                        $error::NotEmptyViolated => Self::Missing,
                        $error::LenCharMaxViolated => Self::TooLong,
                    }
                }
            }
        )*
    };
}

fields_error_from!(
    ContactMessageAuthorNameError,
    ContactMessageSubjectError,
    ContactMessageContentError,
);

impl From<ContactMessageAuthorEmailError> for ContactMessageFieldsError {
    fn from(value: ContactMessageAuthorEmailError) -> Self {
        match value {
            ContactMessageAuthorEmailError::NotEmptyViolated => Self::Missing,
        }
    }
}

impl ContactMessage {
    /// Builds a message from raw field values, checking presence and maximum
    /// lengths only. A missing field takes precedence over a too long one.
    pub fn from_fields(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ContactMessageFieldsError> {
        match (
            ContactMessageAuthorName::try_new(name),
            ContactMessageAuthorEmail::try_new(email),
            ContactMessageSubject::try_new(subject),
            ContactMessageContent::try_new(content),
        ) {
            (Ok(name), Ok(email), Ok(subject), Ok(content)) => Ok(Self {
                author: ContactMessageAuthor { name, email },
                subject,
                content,
            }),
            (name, email, subject, content) => {
                let errors: [Option<ContactMessageFieldsError>; 4] = [
                    name.err().map(Into::into),
                    email.err().map(Into::into),
                    subject.err().map(Into::into),
                    content.err().map(Into::into),
                ];
                if errors.contains(&Some(ContactMessageFieldsError::Missing)) {
                    Err(ContactMessageFieldsError::Missing)
                } else {
                    Err(ContactMessageFieldsError::TooLong)
                }
            }
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown contact form field: {0}")]
pub struct UnknownContactFieldError(pub String);

impl FromStr for ContactField {
    type Err = UnknownContactFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownContactFieldError(s.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Enter a valid email")]
    EmailInvalid,
    #[error("Subject is required")]
    SubjectRequired,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
    #[error("Name must be at most 256 characters")]
    NameTooLong,
    #[error("Subject must be at most 256 characters")]
    SubjectTooLong,
    #[error("Message must be at most 4096 characters")]
    MessageTooLong,
}

impl Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Per-field validation errors of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrorSet(BTreeMap<ContactField, ValidationError>);

impl ValidationErrorSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: ContactField) -> Option<ValidationError> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: ContactField, error: ValidationError) {
        self.0.insert(field, error);
    }

    /// Removes the error of `field`, returning whether there was one.
    pub fn remove(&mut self, field: ContactField) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, ValidationError)> + '_ {
        self.0.iter().map(|(&field, &error)| (field, error))
    }
}

impl FromIterator<(ContactField, ValidationError)> for ValidationErrorSet {
    fn from_iter<T: IntoIterator<Item = (ContactField, ValidationError)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Raw values of the contact form as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        };
        *slot = value;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Checks every field independently and returns all violations.
    pub fn validate(&self) -> ValidationErrorSet {
        ContactField::ALL
            .into_iter()
            .filter_map(|field| validate_field(field, self.get(field)).map(|err| (field, err)))
            .collect()
    }

    /// Converts a form that passes validation into a [`ContactMessage`].
    pub fn to_message(&self) -> Result<ContactMessage, ValidationErrorSet> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        ContactMessage::from_fields(
            self.name.as_str(),
            self.email.as_str(),
            self.subject.as_str(),
            self.message.as_str(),
        )
        .map_err(|err| {
            // unreachable: presence and maximum lengths are a subset of the validation rules
            ContactField::ALL
                .into_iter()
                .filter_map(|field| {
                    let value = self.get(field).trim();
                    match err {
                        ContactMessageFieldsError::Missing => {
                            value.is_empty().then(|| required_error(field))
                        }
                        ContactMessageFieldsError::TooLong => too_long_error(field, value),
                    }
                    .map(|error| (field, error))
                })
                .collect()
        })
    }
}

fn required_error(field: ContactField) -> ValidationError {
    match field {
        ContactField::Name => ValidationError::NameRequired,
        ContactField::Email => ValidationError::EmailRequired,
        ContactField::Subject => ValidationError::SubjectRequired,
        ContactField::Message => ValidationError::MessageRequired,
    }
}

fn validate_field(field: ContactField, value: &str) -> Option<ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(required_error(field));
    }

    if let Some(error) = too_long_error(field, trimmed) {
        return Some(error);
    }

    match field {
        ContactField::Email if !EMAIL_SHAPE_REGEX.is_match(value) => {
            Some(ValidationError::EmailInvalid)
        }
        ContactField::Message if trimmed.chars().count() < MESSAGE_MIN_CHARS => {
            Some(ValidationError::MessageTooShort)
        }
        _ => None,
    }
}

fn too_long_error(field: ContactField, trimmed: &str) -> Option<ValidationError> {
    let chars = trimmed.chars().count();
    match field {
        ContactField::Name if chars > NAME_MAX_CHARS => Some(ValidationError::NameTooLong),
        ContactField::Subject if chars > SUBJECT_MAX_CHARS => {
            Some(ValidationError::SubjectTooLong)
        }
        ContactField::Message if chars > MESSAGE_MAX_CHARS => {
            Some(ValidationError::MessageTooLong)
        }
        _ => None,
    }
}

/// A static contact link shown next to the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfoLink {
    pub label: String,
    pub value: String,
    pub href: String,
}
