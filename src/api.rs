pub mod backend;
pub mod client;
pub mod consultation;
pub mod emailjs;
