use folio_core_contact_impl::{ContactRelayServiceImpl, ContactServiceImpl};
use folio_email_impl::EmailServiceImpl;
use folio_extern_impl::{emailjs::EmailJsApiServiceImpl, relay::RelayApiServiceImpl};
use folio_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = folio_api_rest::RestServer<Contact>;

// Extern
pub type EmailJsApi = EmailJsApiServiceImpl;
pub type RelayApi = RelayApiServiceImpl;

// Email
pub type Email = EmailServiceImpl;
pub type Template = TemplateServiceImpl;

// Core
pub type Contact = ContactServiceImpl<Email, Template, EmailJsApi>;
pub type ContactRelay = ContactRelayServiceImpl<RelayApi>;
