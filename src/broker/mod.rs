pub mod dhan;
pub mod traits;
pub mod types;
