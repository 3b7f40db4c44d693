use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use super::PizzaRepository;
use crate::models::{Pizza, RepositoryResult};

/// In-process implementation of the PizzaRepository trait.
///
/// Rows are kept in insertion order behind an RwLock; ids are handed out
/// from a monotone counter starting at 1. Suitable for tests and local
/// development in place of the DynamoDB-backed store.
#[derive(Debug, Default)]
pub struct InMemoryPizzaRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    next_id: i64,
    rows: Vec<Pizza>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

impl InMemoryPizzaRepository {
    /// Create an empty in-memory catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.rows.is_empty()
    }
}

#[async_trait]
impl PizzaRepository for InMemoryPizzaRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Pizza>> {
        let inner = self.inner.read().await;

        info!("Found {} pizzas", inner.rows.len());
        Ok(inner.rows.clone())
    }

    #[instrument(skip(self, pizza), fields(name = %pizza.name))]
    async fn create(&self, pizza: Pizza) -> RepositoryResult<Pizza> {
        let mut inner = self.inner.write().await;

        let mut pizza = pizza;
        pizza.id = inner.next_id;
        inner.next_id += 1;
        inner.rows.push(pizza.clone());

        info!(id = pizza.id, "Pizza created");
        Ok(pizza)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut inner = self.inner.write().await;

        // Removing an id that is not present leaves the rows untouched.
        inner.rows.retain(|pizza| pizza.id != id);

        info!("Pizza deleted");
        Ok(())
    }
}
