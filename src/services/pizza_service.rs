use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{Pizza, RepositoryError, ServiceResult};
use crate::repositories::PizzaRepository;

/// Service for managing the pizza catalog
pub struct PizzaService {
    repository: Arc<dyn PizzaRepository>,
}

impl PizzaService {
    /// Create a new PizzaService backed by the given repository
    pub fn new(repository: Arc<dyn PizzaRepository>) -> Self {
        Self { repository }
    }

    /// List every pizza currently in the catalog, in insertion order
    #[instrument(skip(self))]
    pub async fn get_pizzas(&self) -> ServiceResult<Vec<Pizza>> {
        info!("Listing pizzas");

        let pizzas = self.repository.find_all().await?;

        info!("Found {} pizzas", pizzas.len());
        Ok(pizzas)
    }

    /// Store a new pizza. The repository assigns its id; the stored record
    /// is returned with that id set.
    #[instrument(skip(self, pizza), fields(name = %pizza.name, size = %pizza.size))]
    pub async fn add_pizza(&self, pizza: Pizza) -> ServiceResult<Pizza> {
        info!("Adding pizza");

        // The id belongs to the store. A record that already carries one
        // would collide with the row it was loaded from.
        if pizza.is_persisted() {
            warn!(id = pizza.id, "Refusing to re-add a persisted pizza");
            return Err(RepositoryError::ConstraintViolation {
                message: format!("Pizza already has id {}", pizza.id),
            }
            .into());
        }

        let stored = self.repository.create(pizza).await?;

        info!(id = stored.id, "Pizza added");
        Ok(stored)
    }

    /// Remove a pizza by id. Removing an id that is not in the catalog is a
    /// no-op, not an error.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_pizza(&self, id: i64) -> ServiceResult<()> {
        info!("Deleting pizza");

        self.repository.delete(id).await?;

        info!("Pizza deleted");
        Ok(())
    }
}
