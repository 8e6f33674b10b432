pub mod builder_config;
pub mod resume;
