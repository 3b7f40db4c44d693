// Repositories module - data access layer

pub mod memory;
pub mod pizza_repository;

pub use memory::InMemoryPizzaRepository;
pub use pizza_repository::{DynamoDbPizzaRepository, PizzaRepository};
