pub mod redis;
pub mod settings;
