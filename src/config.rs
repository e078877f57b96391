//! Configuration for WideCell
//!
//! Identifies which emulated table the sample scenario provisions.

use crate::error::{Result, WideCellError};

/// Main configuration for a WideCell scenario run
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Instance Configuration
    // -------------------------------------------------------------------------
    /// Project the instance belongs to
    pub project_id: String,

    /// Instance that owns the table
    pub instance_id: String,

    // -------------------------------------------------------------------------
    // Table Configuration
    // -------------------------------------------------------------------------
    /// Table to create (or truncate if it already exists)
    pub table_id: String,

    /// Column family every cell is written to
    pub column_family: String,

    /// Max versions retained per cell in `column_family`
    pub max_versions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_id: "some_random_project_id".to_string(),
            instance_id: "some_random_instance_id".to_string(),
            table_id: "some_random_table_id".to_string(),
            column_family: "W".to_string(),
            max_versions: 1,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject empty identifiers and a zero version limit
    pub fn validate(&self) -> Result<()> {
        let ids = [
            ("project_id", &self.project_id),
            ("instance_id", &self.instance_id),
            ("table_id", &self.table_id),
            ("column_family", &self.column_family),
        ];
        for (name, value) in ids {
            if value.is_empty() {
                return Err(WideCellError::Config(format!("{} must not be empty", name)));
            }
        }

        if self.max_versions == 0 {
            return Err(WideCellError::Config(
                "max_versions must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the project id
    pub fn project_id(mut self, id: impl Into<String>) -> Self {
        self.config.project_id = id.into();
        self
    }

    /// Set the instance id
    pub fn instance_id(mut self, id: impl Into<String>) -> Self {
        self.config.instance_id = id.into();
        self
    }

    /// Set the table id
    pub fn table_id(mut self, id: impl Into<String>) -> Self {
        self.config.table_id = id.into();
        self
    }

    /// Set the column family name
    pub fn column_family(mut self, name: impl Into<String>) -> Self {
        self.config.column_family = name.into();
        self
    }

    /// Set the max versions kept per cell
    pub fn max_versions(mut self, count: usize) -> Self {
        self.config.max_versions = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
