pub mod agency;
pub mod clean;
pub mod config;
pub mod error;
pub mod filter;
pub mod headsigns;
pub mod model;
pub mod output;
pub mod routes;
pub mod stops;

pub use agency::{AgencyTools, CitrousAgency};
pub use config::AdapterConfig;
pub use error::AdapterError;
pub use filter::ServiceFilter;
