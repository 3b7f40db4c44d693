use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue, Select};
use aws_sdk_dynamodb::{Client as DynamoDbClient, Error as DynamoDbError};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::models::{Pizza, PizzaSize, RepositoryError, RepositoryResult};

/// Trait defining the interface for catalog data access operations
#[async_trait]
pub trait PizzaRepository: Send + Sync {
    /// Enumerate all pizzas, in insertion order
    async fn find_all(&self) -> RepositoryResult<Vec<Pizza>>;

    /// Persist a new pizza, assigning the next catalog id
    async fn create(&self, pizza: Pizza) -> RepositoryResult<Pizza>;

    /// Remove a pizza by id; removing an absent id is a no-op
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}

/// Reserved key of the id-counter item. Catalog ids start at 1, so the
/// counter can share the table without colliding with a row.
const COUNTER_ITEM_ID: i64 = 0;

/// DynamoDB implementation of the PizzaRepository trait
pub struct DynamoDbPizzaRepository {
    client: Arc<DynamoDbClient>,
    table_name: String,
}

impl DynamoDbPizzaRepository {
    /// Create a new DynamoDB pizza repository
    pub fn new(client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// Build a repository from loaded configuration
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            Arc::new(config.aws.dynamodb_client.clone()),
            config.database.pizzas_table_name.clone(),
        )
    }

    /// Get the table name (for testing)
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Allocate the next catalog id by incrementing the counter item
    async fn allocate_id(&self) -> RepositoryResult<i64> {
        let response = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::N(COUNTER_ITEM_ID.to_string()))
            .update_expression("ADD next_id :one")
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        response
            .attributes()
            .and_then(|attributes| attributes.get("next_id"))
            .and_then(|value| value.as_n().ok())
            .and_then(|n| n.parse::<i64>().ok())
            .ok_or_else(|| RepositoryError::InvalidItem {
                message: "Counter item did not return a numeric next_id".to_string(),
            })
    }

    /// Convert a Pizza struct to DynamoDB attribute values
    pub fn pizza_to_item(&self, pizza: &Pizza) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();

        item.insert("id".to_string(), AttributeValue::N(pizza.id.to_string()));
        item.insert("name".to_string(), AttributeValue::S(pizza.name.clone()));
        item.insert(
            "size".to_string(),
            AttributeValue::S(pizza.size.to_string()),
        );
        item.insert(
            "price".to_string(),
            AttributeValue::N(pizza.price.to_string()),
        );
        item.insert(
            "is_gluten_free".to_string(),
            AttributeValue::Bool(pizza.is_gluten_free),
        );

        item
    }

    /// Convert a DynamoDB item to a Pizza struct
    pub fn item_to_pizza(&self, item: HashMap<String, AttributeValue>) -> RepositoryResult<Pizza> {
        let id = item
            .get("id")
            .and_then(|v| v.as_n().ok())
            .and_then(|n| n.parse::<i64>().ok())
            .ok_or_else(|| RepositoryError::InvalidItem {
                message: "Invalid id".to_string(),
            })?;

        let name = item
            .get("name")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| RepositoryError::InvalidItem {
                message: "Missing name".to_string(),
            })?
            .clone();

        let size = item
            .get("size")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| PizzaSize::from_str(s).ok())
            .ok_or_else(|| RepositoryError::InvalidItem {
                message: "Invalid size".to_string(),
            })?;

        let price = item
            .get("price")
            .and_then(|v| v.as_n().ok())
            .and_then(|n| Decimal::from_str(n).ok())
            .ok_or_else(|| RepositoryError::InvalidItem {
                message: "Invalid price".to_string(),
            })?;

        let is_gluten_free = item
            .get("is_gluten_free")
            .and_then(|v| v.as_bool().ok())
            .copied()
            .unwrap_or(false);

        Ok(Pizza {
            id,
            name,
            size,
            price,
            is_gluten_free,
        })
    }

    /// Convert DynamoDB error to RepositoryError
    fn map_dynamodb_error(&self, error: DynamoDbError) -> RepositoryError {
        error!("DynamoDB error: {:?}", error);

        match &error {
            DynamoDbError::ConditionalCheckFailedException(_) => {
                RepositoryError::ConstraintViolation {
                    message: error.to_string(),
                }
            }
            DynamoDbError::ResourceNotFoundException(_) => RepositoryError::TableNotFound {
                table_name: self.table_name.clone(),
            },
            _ => RepositoryError::AwsSdk {
                message: error.to_string(),
            },
        }
    }
}

#[async_trait]
impl PizzaRepository for DynamoDbPizzaRepository {
    #[instrument(skip(self), fields(table = %self.table_name))]
    async fn find_all(&self) -> RepositoryResult<Vec<Pizza>> {
        info!("Listing catalog");

        let response = self
            .client
            .scan()
            .table_name(&self.table_name)
            .select(Select::AllAttributes)
            .filter_expression("id <> :counter")
            .expression_attribute_values(
                ":counter",
                AttributeValue::N(COUNTER_ITEM_ID.to_string()),
            )
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        let mut pizzas = Vec::new();
        if let Some(items) = response.items {
            for item in items {
                match self.item_to_pizza(item) {
                    Ok(pizza) => pizzas.push(pizza),
                    Err(e) => {
                        warn!("Failed to parse catalog item: {}", e);
                        continue;
                    }
                }
            }
        }

        // Scan order is unspecified; ids are allocated monotonically, so
        // sorting by id restores insertion order.
        pizzas.sort_by_key(|pizza| pizza.id);

        info!("Found {} pizzas", pizzas.len());
        Ok(pizzas)
    }

    #[instrument(skip(self, pizza), fields(table = %self.table_name, name = %pizza.name))]
    async fn create(&self, pizza: Pizza) -> RepositoryResult<Pizza> {
        info!("Creating pizza");

        let mut pizza = pizza;
        pizza.id = self.allocate_id().await?;

        let item = self.pizza_to_item(&pizza);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        info!(id = pizza.id, "Pizza created");
        Ok(pizza)
    }

    #[instrument(skip(self), fields(table = %self.table_name, id = %id))]
    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        info!("Deleting pizza");

        // An unconditioned DeleteItem succeeds whether or not the row
        // exists, which matches the catalog's remove semantics.
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::N(id.to_string()))
            .send()
            .await
            .map_err(|e| self.map_dynamodb_error(e.into()))?;

        info!("Pizza deleted");
        Ok(())
    }
}
