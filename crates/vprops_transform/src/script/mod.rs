pub mod resolve_type;
pub mod setup;
pub mod utils;
