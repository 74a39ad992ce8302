#[cfg(any(test, feature = "test_utilities"))]
pub mod test_helpers;

mod catalog_reader;
mod error;
mod generator;
mod helpers;
mod models;
mod postgres_client_wrapper;
mod struct_renderer;
mod type_mapper;

pub use catalog_reader::*;
pub use error::*;
pub use generator::*;
pub use models::*;
pub use postgres_client_wrapper::PostgresClientWrapper;
pub use struct_renderer::*;
pub use type_mapper::*;
