pub mod reference;
pub mod validate;

pub use validate::ValidationError;
