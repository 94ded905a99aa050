use crate::{error, router::handler};

use std::env;

/// Environment variable naming the table all operations target; required.
pub const TABLE_NAME_VAR: &str = "TABLE_NAME";

/// Environment variable naming the primary-key attribute; defaults to `id`.
pub const KEY_NAME_VAR: &str = "KEY_NAME";

/// Environment variable naming the AWS region; optional, the client default
/// applies when absent.
pub const REGION_VAR: &str = "AWS_REGION";

/// Environment variable carrying the lambda handler selector; required.
pub const HANDLER_VAR: &str = "_HANDLER";

const DEFAULT_KEY_NAME: &str = "id";

/// Startup configuration consumed from the process environment.
///
/// An absent table name or handler selector is fatal: [`Config::from_env`]
/// fails and initialization must abort. Everything else in the crate takes
/// explicitly constructed values; this is the only place the environment is
/// read.
///
/// ```rust,no_run
/// use dynamodb_item_service::config;
///
/// # fn example() -> Result<(), dynamodb_item_service::error::Error> {
/// let config = config::Config::from_env()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    /// The name of the table all operations target.
    pub table_name: String,
    /// The primary-key attribute name, also used as the path parameter name
    /// for read and delete.
    pub key_name: String,
    /// The AWS region, when set; constructing the client is the host's
    /// concern.
    pub region: Option<String>,
    /// The operation this process serves.
    pub operation: handler::Operation,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> error::Result<Self> {
        Self::from_lookup(|variable| env::var(variable).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> error::Result<Self> {
        let table_name =
            lookup(TABLE_NAME_VAR).ok_or(error::Error::Environment(TABLE_NAME_VAR))?;
        let key_name = lookup(KEY_NAME_VAR).unwrap_or_else(|| DEFAULT_KEY_NAME.to_string());
        let region = lookup(REGION_VAR);
        let operation = lookup(HANDLER_VAR)
            .ok_or(error::Error::Environment(HANDLER_VAR))?
            .parse()?;
        Ok(Self {
            table_name,
            key_name,
            region,
            operation,
        })
    }
}
