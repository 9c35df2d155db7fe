use crate::domain::dashboard::DashboardConfiguration;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub source: SourceSettings,
    pub layouts: LayoutSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LayoutSettings {
    pub dir: String,
}

/// `config/app.toml`, overridable with `DASHBOARD__<SECTION>__<KEY>`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    build_app_config(config::Environment::with_prefix("DASHBOARD").separator("__"))
}

fn build_app_config(env: config::Environment) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("source.base_url", "http://localhost:3000/api")?
        .set_default("source.timeout_secs", 10)?
        .set_default("layouts.dir", "config/layouts")?
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Load every `<role>.toml` in `dir`, keyed by role name.
pub fn load_layouts(dir: &Path) -> anyhow::Result<HashMap<String, DashboardConfiguration>> {
    let mut layouts = HashMap::new();

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read layout directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        let Some(role) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read layout {}", path.display()))?;
        let layout = parse_layout(&text)
            .with_context(|| format!("Invalid layout {}", path.display()))?;

        tracing::debug!(
            "Loaded layout for {}: {} rows, {} stats",
            role,
            layout.rows.len(),
            layout.stats.len()
        );
        layouts.insert(role.to_string(), layout);
    }

    Ok(layouts)
}

pub fn parse_layout(text: &str) -> anyhow::Result<DashboardConfiguration> {
    Ok(toml::from_str(text)?)
}
