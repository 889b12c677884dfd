use folio_models::contact::{ContactMessage, ContactMessageFieldsError};
use serde::Deserialize;

/// Body of a contact request. Fields are optional here so that a missing
/// field is reported as such instead of as a malformed body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiContactMessage {
    /// Full name of the sender
    pub name: Option<String>,
    /// Email address of the sender
    pub email: Option<String>,
    /// Subject of the message
    pub subject: Option<String>,
    /// Content of the message
    pub message: Option<String>,
}

impl TryFrom<ApiContactMessage> for ContactMessage {
    type Error = ContactMessageFieldsError;

    fn try_from(value: ApiContactMessage) -> Result<Self, Self::Error> {
        let (Some(name), Some(email), Some(subject), Some(message)) =
            (value.name, value.email, value.subject, value.message)
        else {
            return Err(ContactMessageFieldsError::Missing);
        };

        ContactMessage::from_fields(name, email, subject, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_field_is_missing() {
        let message = ApiContactMessage {
            name: Some("Jo".into()),
            email: Some("jo@x.com".into()),
            subject: None,
            message: Some("This is a long enough message.".into()),
        };

        assert_eq!(
            ContactMessage::try_from(message).unwrap_err(),
            ContactMessageFieldsError::Missing
        );
    }

    #[test]
    fn absent_field_wins_over_too_long() {
        let message = ApiContactMessage {
            name: Some("n".repeat(300)),
            email: None,
            subject: Some("Hi".into()),
            message: Some("This is a long enough message.".into()),
        };

        assert_eq!(
            ContactMessage::try_from(message).unwrap_err(),
            ContactMessageFieldsError::Missing
        );
    }

    #[test]
    fn blank_field_is_missing() {
        let message = ApiContactMessage {
            name: Some("Jo".into()),
            email: Some("jo@x.com".into()),
            subject: Some(" \t ".into()),
            message: Some("This is a long enough message.".into()),
        };

        ContactMessage::try_from(message).unwrap_err();
    }

    #[test]
    fn presence_is_enough() {
        let message = ApiContactMessage {
            name: Some("Jo".into()),
            email: Some("not an address".into()),
            subject: Some("Hi".into()),
            message: Some("short".into()),
        };

        let message = ContactMessage::try_from(message).unwrap();

        assert_eq!(message.author.email.as_str(), "not an address");
        assert_eq!(message.content.as_str(), "short");
    }
}
