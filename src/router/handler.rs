use crate::{error, router::event, store};

use std::str;

/// The five operations a handler can serve, selected once at startup.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
    /// Persist a new record from the request body.
    Create,
    /// Look up a record by the key path parameter.
    Read,
    /// Overwrite an existing record from the request body.
    Update,
    /// Remove a record by the key path parameter.
    Delete,
    /// Return one page of records.
    List,
}

impl str::FromStr for Operation {
    type Err = error::Error;

    /// Accepts a bare operation name or a full lambda handler selector such
    /// as `build/Products.create`, keyed on the segment after the last `.`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let name = value.rsplit('.').next().unwrap_or(value);
        match name {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "list" => Ok(Self::List),
            _ => Err(error::Error::UnknownOperation(value.to_string())),
        }
    }
}

/// Routes inbound events onto an injected item store.
///
/// A handler serves exactly one operation and holds no cross-invocation
/// state. Each dispatch produces exactly one response; store failures and
/// decode failures alike are converted into error responses here, with the
/// status code taken from [`error::Error::status_code`].
#[derive(Clone, Debug)]
pub struct Handler<S> {
    store: S,
    operation: Operation,
    key_parameter: String,
}

impl<S: store::ItemStore> Handler<S> {
    /// Creates a handler for one operation; `key_parameter` names the path
    /// parameter carrying the record key on read and delete.
    pub fn new(store: S, operation: Operation, key_parameter: impl Into<String>) -> Self {
        Self {
            store,
            operation,
            key_parameter: key_parameter.into(),
        }
    }

    /// Dispatches `event` and produces its response.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "handler.handle", skip(self, event))
    )]
    pub async fn handle(&self, event: &event::Request) -> event::Response {
        let result = match self.operation {
            Operation::Create => self.create(event).await,
            Operation::Read => self.read(event).await,
            Operation::Update => self.update(event).await,
            Operation::Delete => self.delete(event).await,
            Operation::List => self.list(event).await,
        };
        result.unwrap_or_else(|error| event::Response::from_error(&error))
    }

    async fn create(&self, event: &event::Request) -> error::Result<event::Response> {
        let item: S::Item = event.body_object()?;
        let item = self.store.create(item).await?;
        Ok(event::Response::with_object(&item, 201))
    }

    async fn read(&self, event: &event::Request) -> error::Result<event::Response> {
        let key = event.path_parameter(&self.key_parameter)?;
        let item = self.store.read(key).await?;
        Ok(event::Response::with_object(&item, 200))
    }

    async fn update(&self, event: &event::Request) -> error::Result<event::Response> {
        let item: S::Item = event.body_object()?;
        let item = self.store.update(item).await?;
        Ok(event::Response::with_object(&item, 200))
    }

    async fn delete(&self, event: &event::Request) -> error::Result<event::Response> {
        let key = event.path_parameter(&self.key_parameter)?;
        self.store.delete(key).await?;
        Ok(event::Response::with_object(&serde_json::json!({}), 200))
    }

    async fn list(&self, event: &event::Request) -> error::Result<event::Response> {
        let cursor = event.query_parameter("cursor");
        let limit = event
            .query_parameter("limit")
            .map(|limit| {
                limit.parse::<i32>().map_err(|_| {
                    error::Error::Validation(format!(
                        "query parameter `limit` must be an integer: {limit}"
                    ))
                })
            })
            .transpose()?;
        let page = self.store.list(cursor, limit).await?;
        Ok(event::Response::with_object(&page, 200))
    }
}
