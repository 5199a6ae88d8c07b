pub mod constants;
pub mod form_token;
pub mod tracing;
