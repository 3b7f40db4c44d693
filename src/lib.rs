pub mod config;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod services;

pub use config::{Config, ConfigError};
pub use models::{Pizza, PizzaSize, RepositoryError, ServiceError};
pub use observability::init_tracing;
pub use repositories::{DynamoDbPizzaRepository, InMemoryPizzaRepository, PizzaRepository};
pub use services::PizzaService;
