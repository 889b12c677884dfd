pub mod emailjs;
pub mod http;
pub mod relay;
