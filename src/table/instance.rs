//! Emulated instance
//!
//! Owns the registry of tables. Table handles obtained from the same
//! instance share state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::table::{Registry, Table};
use crate::config::Config;

/// A project-scoped collection of tables
#[derive(Clone)]
pub struct Instance {
    project_id: String,
    instance_id: String,
    tables: Registry,
}

impl Instance {
    /// Create an empty instance
    pub fn new(project_id: impl Into<String>, instance_id: impl Into<String>) -> Self {
        let instance = Self {
            project_id: project_id.into(),
            instance_id: instance_id.into(),
            tables: Arc::new(RwLock::new(HashMap::new())),
        };

        tracing::debug!(
            "Opened instance {}/{}",
            instance.project_id,
            instance.instance_id
        );
        instance
    }

    /// Create an empty instance named by `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.project_id, &config.instance_id)
    }

    /// Handle to a table, whether or not it exists yet
    pub fn table(&self, table_id: impl Into<String>) -> Table {
        Table::new(table_id.into(), Arc::clone(&self.tables))
    }

    /// Ids of every existing table, sorted
    pub fn list_tables(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.tables.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }
}
