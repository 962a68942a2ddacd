pub mod context;
pub mod datetime;
pub mod export;
pub mod serialize;

pub use crate::domain::fields::Fields;
pub use crate::domain::ports::{Export, Model};
pub use crate::utils::error::Result;
