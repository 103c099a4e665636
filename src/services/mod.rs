pub mod artifacts;
pub mod certificate;
pub mod chat_image;
pub mod generator;
pub mod speech;
pub mod templates;
