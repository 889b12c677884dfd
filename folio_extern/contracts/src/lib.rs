pub mod emailjs;
pub mod relay;
