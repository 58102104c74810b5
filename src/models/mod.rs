// Module exports for models

pub mod birthday;
pub mod settings;
