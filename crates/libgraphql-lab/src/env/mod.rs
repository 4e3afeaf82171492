//! Session environment variables and `{{key}}` templating.

mod environment;
mod template;

pub use environment::Environment;
pub use template::interpolate;
