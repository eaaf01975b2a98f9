pub mod contacts;
pub mod error;
pub mod model;
pub mod params;
pub mod seed;

pub use contacts::{ContactRepository, PgContactStore};
pub use error::StoreError;
pub use model::{Contact, User};
pub use params::{PgParam, PgParamStore};
