use std::sync::Arc;

use pizzastore_rs::models::{Pizza, PizzaSize};
use pizzastore_rs::repositories::{InMemoryPizzaRepository, PizzaRepository};
use pizzastore_rs::services::PizzaService;
use rust_decimal_macros::dec;

pub fn margherita() -> Pizza {
    Pizza::new("Margherita", PizzaSize::Medium, dec!(12.50))
}

pub fn pepperoni() -> Pizza {
    Pizza::new("Pepperoni", PizzaSize::Large, dec!(14.00))
}

pub fn garden_special() -> Pizza {
    Pizza::new("Garden Special", PizzaSize::Small, dec!(9.25)).gluten_free(true)
}

/// Service over a fresh in-memory catalog seeded with the given pizzas
pub async fn seeded_service(seed: Vec<Pizza>) -> PizzaService {
    let repository = Arc::new(InMemoryPizzaRepository::new());
    for pizza in seed {
        repository
            .create(pizza)
            .await
            .expect("seeding the in-memory catalog cannot fail");
    }
    PizzaService::new(repository)
}
