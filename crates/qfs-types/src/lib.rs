#[allow(non_snake_case)]
pub mod status_code;

pub mod location;

// Re-export commonly used items at the crate root.
pub use location::ServerLocation;
pub use status_code::*;
