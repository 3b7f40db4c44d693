// Services module - business logic layer

pub mod pizza_service;

pub use pizza_service::PizzaService;
