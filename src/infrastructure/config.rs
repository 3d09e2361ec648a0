use crate::domain::canvas::GridSpec;
use crate::domain::field_aliases::FieldAliases;
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub grid: GridSettings,
    pub aliases: FieldAliases,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Grid used for dashboards created without an explicit one.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GridSettings {
    pub columns: u32,
    pub row_height: u32,
    pub margin: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        let grid = GridSpec::default();
        Self {
            columns: grid.columns,
            row_height: grid.row_height,
            margin: grid.margin,
        }
    }
}

impl GridSettings {
    pub fn to_grid_spec(&self) -> anyhow::Result<GridSpec> {
        let grid = GridSpec::new(self.columns, self.row_height, self.margin);
        anyhow::ensure!(
            grid.is_valid(),
            "grid needs 1 to {} columns and a positive row height",
            crate::domain::canvas::MAX_COLUMNS
        );
        Ok(grid)
    }
}

/// Defaults, then `config/canvas.*` if present, then `CANVAS__*` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/canvas").required(false))
        .add_source(
            config::Environment::with_prefix("CANVAS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
