pub mod error;
pub mod plan_client;
pub mod principal;

pub use error::ClientError;
pub use plan_client::PlanClient;
pub use principal::{Principal, Resource};
