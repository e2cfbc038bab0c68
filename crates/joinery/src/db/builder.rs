use super::{connect::Connect, Db};
use crate::{Entity, Result};

use joinery_core::{
    driver::{Driver, IsolationLevel},
    schema::app,
    NamingStyle, Options, Schema,
};

use std::sync::Arc;

/// Collects entity registrations and options, then resolves the schema and
/// opens a connection.
#[derive(Debug, Default)]
pub struct Builder {
    /// Attribute metadata emitted by `#[derive(Entity)]`.
    models: Vec<app::Model>,

    options: Options,
}

impl Builder {
    pub fn register<T: Entity>(&mut self) -> &mut Self {
        self.models.push(T::schema());
        self
    }

    /// Replaces every option at once, typically with values read from a
    /// configuration file.
    pub fn options(&mut self, options: Options) -> &mut Self {
        self.options = options;
        self
    }

    /// Schema used for entities that do not declare one.
    pub fn schema(&mut self, schema: impl Into<String>) -> &mut Self {
        self.options.schema = schema.into();
        self
    }

    pub fn naming_style(&mut self, naming_style: NamingStyle) -> &mut Self {
        self.options.naming_style = naming_style;
        self
    }

    pub fn use_composed_id(&mut self, enabled: bool) -> &mut Self {
        self.options.use_composed_id = enabled;
        self
    }

    pub fn infer_composed_id_in_foreign_keys(&mut self, enabled: bool) -> &mut Self {
        self.options.infer_composed_id_in_foreign_keys = enabled;
        self
    }

    pub fn implicit_key_auto_generated(&mut self, enabled: bool) -> &mut Self {
        self.options.implicit_key_auto_generated = enabled;
        self
    }

    pub fn auto_trim_strings(&mut self, enabled: bool) -> &mut Self {
        self.options.auto_trim_strings = enabled;
        self
    }

    pub fn handle_empty_in_args(&mut self, enabled: bool) -> &mut Self {
        self.options.handle_empty_in_args = enabled;
        self
    }

    pub fn rollback_on_error(&mut self, enabled: bool) -> &mut Self {
        self.options.rollback_on_error = enabled;
        self
    }

    pub fn isolation_level(&mut self, isolation_level: IsolationLevel) -> &mut Self {
        self.options.isolation_level = isolation_level;
        self
    }

    /// Resolves the schema without connecting.
    pub fn build_schema(&self) -> Result<Schema> {
        Schema::build(self.models.clone(), &self.options)
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let schema = self.build_schema()?;
        let connection = driver.connect().await?;

        tracing::debug!(
            target: "joinery::db",
            url = %driver.url(),
            entities = schema.entities().len(),
            "database handle ready",
        );

        Ok(Db {
            schema: Arc::new(schema),
            options: self.options.clone(),
            capability: driver.capability(),
            connection,
            in_transaction: false,
        })
    }
}
