use crate::{error, item, store};

use aws_sdk_dynamodb::{Client, types};
use indexmap::IndexMap;
use std::{collections, fmt, marker};

/// update expression with its placeholder maps
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateExpression {
    expression: String,
    names: collections::HashMap<String, String>,
    values: collections::HashMap<String, types::AttributeValue>,
}

/// Builds `SET #a = :set0, ...` over the given attributes, in sorted
/// attribute order so the rendered expression is deterministic. Every
/// attribute name goes through a `#` placeholder, so reserved words are safe.
fn update_expression(
    attributes: collections::HashMap<String, types::AttributeValue>,
) -> UpdateExpression {
    let mut sorted: IndexMap<String, types::AttributeValue> = attributes.into_iter().collect();
    sorted.sort_keys();
    let mut assignments = Vec::with_capacity(sorted.len());
    let mut names = collections::HashMap::with_capacity(sorted.len());
    let mut values = collections::HashMap::with_capacity(sorted.len());
    for (index, (name, value)) in sorted.into_iter().enumerate() {
        let placeholder = format!("#{name}");
        let value_placeholder = format!(":set{index}");
        assignments.push(format!("{placeholder} = {value_placeholder}"));
        names.insert(placeholder, name);
        values.insert(value_placeholder, value);
    }
    UpdateExpression {
        expression: format!("SET {}", assignments.join(", ")),
        names,
        values,
    }
}

fn start_key(key_name: &str, cursor: &str) -> collections::HashMap<String, types::AttributeValue> {
    collections::HashMap::from([(
        key_name.to_string(),
        types::AttributeValue::S(cursor.to_string()),
    )])
}

/// DynamoDB-backed item store for one record type over one table.
///
/// The service owns its client handle and is cheap to clone, one handle per
/// invocation. Existence invariants are enforced by server-evaluated
/// conditional expressions, never by a read-before-write check, and every
/// mutation re-reads the item so callers receive the canonical persisted
/// representation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_item_service::store::{ItemStore, dynamodb};
/// # use dynamodb_item_service::item;
/// # use serde::{Deserialize, Serialize};
/// # #[derive(Clone, Debug, Deserialize, Serialize)]
/// # #[serde(rename_all = "camelCase")]
/// # struct Product {
/// #     sku: String,
/// #     created_at: Option<String>,
/// #     updated_at: Option<String>,
/// # }
/// # impl item::Item for Product {
/// #     fn key(&self) -> &str {
/// #         &self.sku
/// #     }
/// #     fn created_at(&self) -> Option<&str> {
/// #         self.created_at.as_deref()
/// #     }
/// #     fn updated_at(&self) -> Option<&str> {
/// #         self.updated_at.as_deref()
/// #     }
/// #     fn set_created_at(&mut self, timestamp: String) {
/// #         self.created_at = Some(timestamp);
/// #     }
/// #     fn set_updated_at(&mut self, timestamp: String) {
/// #         self.updated_at = Some(timestamp);
/// #     }
/// # }
///
/// # async fn example(client: Client) -> Result<(), dynamodb_item_service::error::Error> {
/// let service: dynamodb::ItemService<Product> =
///     dynamodb::ItemService::new(client, "products", "sku");
/// service.read("sku-1").await?;
/// # Ok(())
/// # }
/// ```
pub struct ItemService<T> {
    client: Client,
    table_name: String,
    key_name: String,
    item: marker::PhantomData<T>,
}

impl<T> ItemService<T> {
    /// Creates a service bound to one logical table, keyed on the attribute
    /// named `key_name`.
    pub fn new(client: Client, table_name: impl Into<String>, key_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            key_name: key_name.into(),
            item: marker::PhantomData,
        }
    }
}

impl<T> Clone for ItemService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            table_name: self.table_name.clone(),
            key_name: self.key_name.clone(),
            item: marker::PhantomData,
        }
    }
}

impl<T> fmt::Debug for ItemService<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ItemService")
            .field("table_name", &self.table_name)
            .field("key_name", &self.key_name)
            .finish_non_exhaustive()
    }
}

impl<T: item::Item> store::ItemStore for ItemService<T> {
    type Item = T;

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "item_service.create", skip(self, item), err)
    )]
    async fn create(&self, mut item: T) -> error::Result<T> {
        let key = item.key().to_string();
        if key.is_empty() {
            return Err(error::Error::validation("item key must not be empty"));
        }
        let now = item::timestamp();
        item.set_created_at(now.clone());
        item.set_updated_at(now);
        let attributes: collections::HashMap<String, types::AttributeValue> =
            serde_dynamo::to_item(&item).map_err(error::Error::database)?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(attributes))
            .condition_expression("attribute_not_exists(#key)")
            .expression_attribute_names("#key", &self.key_name)
            .send()
            .await
            .map_err(|err| {
                let err = err.into_service_error();
                if err.is_conditional_check_failed_exception() {
                    error::Error::Conflict(key.clone())
                } else {
                    error::Error::database(err)
                }
            })?;
        self.read(&key).await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "item_service.read", skip(self), err)
    )]
    async fn read(&self, key: &str) -> error::Result<T> {
        if key.is_empty() {
            return Err(error::Error::validation("item key must not be empty"));
        }
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(&self.key_name, types::AttributeValue::S(key.to_string()))
            .send()
            .await
            .map_err(|err| error::Error::database(err.into_service_error()))?;
        let attributes = output
            .item
            .ok_or_else(|| error::Error::NotFound(key.to_string()))?;
        let item = serde_dynamo::from_item(attributes).map_err(error::Error::database)?;
        Ok(item)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "item_service.update", skip(self, item), err)
    )]
    async fn update(&self, mut item: T) -> error::Result<T> {
        let key = item.key().to_string();
        if key.is_empty() {
            return Err(error::Error::validation("item key must not be empty"));
        }
        item.set_updated_at(item::timestamp());
        let mut attributes: collections::HashMap<String, types::AttributeValue> =
            serde_dynamo::to_item(&item).map_err(error::Error::database)?;
        // The key is immutable and `createdAt` is owned by create; neither may
        // appear in the update expression.
        attributes.remove(&self.key_name);
        attributes.remove(item::CREATED_AT);
        let update = update_expression(attributes);
        let mut names = update.names;
        names.insert(format!("#{}", item::CREATED_AT), item::CREATED_AT.to_string());
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(&self.key_name, types::AttributeValue::S(key.clone()))
            .update_expression(update.expression)
            .condition_expression(format!("attribute_exists(#{})", item::CREATED_AT))
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(update.values))
            .send()
            .await
            .map_err(|err| {
                let err = err.into_service_error();
                if err.is_conditional_check_failed_exception() {
                    error::Error::NotFound(key.clone())
                } else {
                    error::Error::database(err)
                }
            })?;
        self.read(&key).await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "item_service.delete", skip(self), err)
    )]
    async fn delete(&self, key: &str) -> error::Result<()> {
        if key.is_empty() {
            return Err(error::Error::validation("item key must not be empty"));
        }
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(&self.key_name, types::AttributeValue::S(key.to_string()))
            .send()
            .await
            .map_err(|err| error::Error::database(err.into_service_error()))?;
        Ok(())
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "item_service.list", skip(self), err)
    )]
    async fn list(
        &self,
        cursor: Option<&str>,
        limit: Option<i32>,
    ) -> error::Result<store::Page<T>> {
        if matches!(limit, Some(limit) if limit < 1) {
            return Err(error::Error::validation("limit must be at least 1"));
        }
        let exclusive_start_key = cursor.map(|cursor| start_key(&self.key_name, cursor));
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_limit(limit)
            .set_exclusive_start_key(exclusive_start_key)
            .send()
            .await
            .map_err(|err| error::Error::database(err.into_service_error()))?;
        let last_evaluated_key = output
            .last_evaluated_key
            .as_ref()
            .and_then(|attributes| attributes.get(&self.key_name))
            .and_then(|value| value.as_s().ok())
            .cloned();
        let items =
            serde_dynamo::from_items(output.items.unwrap_or_default())
                .map_err(error::Error::database)?;
        Ok(store::Page {
            items,
            last_evaluated_key,
        })
    }
}
