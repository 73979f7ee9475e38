use crate::domain::widget::{WidgetKind, WidgetSize};
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data/storage.json")
}

fn default_refresh_delay_ms() -> u64 {
    1500
}

fn default_order() -> Vec<WidgetKind> {
    vec![
        WidgetKind::Portfolio,
        WidgetKind::ChartWidget,
        WidgetKind::MarketOverview,
        WidgetKind::GreedFearIndex,
        WidgetKind::TopPerformers,
        WidgetKind::TrendingCoins,
        WidgetKind::CryptoNews,
    ]
}

fn default_expanded() -> Vec<WidgetKind> {
    vec![WidgetKind::Portfolio]
}

fn default_viewport_width() -> u32 {
    1280
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
    /// Per-widget size overrides keyed by widget id.
    #[serde(default)]
    pub widgets: HashMap<String, WidgetSize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Keep the layout in process memory only.
    #[serde(default)]
    pub in_memory: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            in_memory: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    #[serde(default = "default_refresh_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            delay_ms: default_refresh_delay_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LayoutSettings {
    #[serde(default = "default_order")]
    pub default_order: Vec<WidgetKind>,
    /// Widgets that start expanded.
    #[serde(default = "default_expanded")]
    pub expanded: Vec<WidgetKind>,
    /// Viewport width assumed until the client reports its own.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            default_order: default_order(),
            expanded: default_expanded(),
            viewport_width: default_viewport_width(),
        }
    }
}

impl AppConfig {
    /// Resolve `widgets.<Id>` overrides to registry kinds.
    ///
    /// Keys match case-insensitively since environment sources lowercase them.
    pub fn size_overrides(&self) -> anyhow::Result<HashMap<WidgetKind, WidgetSize>> {
        self.widgets
            .iter()
            .map(|(key, size)| {
                let kind = WidgetKind::ALL
                    .into_iter()
                    .find(|kind| kind.as_str().eq_ignore_ascii_case(key))
                    .with_context(|| format!("size override for unknown widget '{key}'"))?;
                if size.width == 0 || size.height == 0 {
                    anyhow::bail!("size override for '{key}' must be at least 1x1");
                }
                Ok((kind, *size))
            })
            .collect()
    }
}

/// `DASHBOARD__*` variables. List keys take comma-separated widget ids.
fn environment() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("layout.default_order")
        .with_list_parse_key("layout.expanded")
}

/// Load `config/dashboard.*` (optional) layered under `DASHBOARD__*` environment variables.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(environment())
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> anyhow::Result<AppConfig> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    fn from_env(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        let settings = config::Config::builder()
            .add_source(environment().source(Some(vars)))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
        assert_eq!(cfg.refresh.delay_ms, 1500);
        assert_eq!(cfg.layout, LayoutSettings::default());
        assert_eq!(cfg.layout.default_order.len(), 7);
        assert_eq!(cfg.layout.expanded, vec![WidgetKind::Portfolio]);
        assert!(cfg.size_overrides().unwrap().is_empty());
    }

    #[test]
    fn test_layout_and_overrides() {
        let cfg = parse(
            r#"
            [layout]
            default_order = ["CryptoNews", "SnakeGame"]
            expanded = []
            viewport_width = 600

            [widgets.SnakeGame]
            width = 2
            height = 3
            "#,
        )
        .unwrap();

        assert_eq!(
            cfg.layout.default_order,
            vec![WidgetKind::CryptoNews, WidgetKind::SnakeGame]
        );
        assert!(cfg.layout.expanded.is_empty());
        assert_eq!(cfg.layout.viewport_width, 600);

        let overrides = cfg.size_overrides().unwrap();
        assert_eq!(overrides.get(&WidgetKind::SnakeGame), Some(&WidgetSize::new(2, 3)));
    }

    #[test]
    fn test_unknown_widget_in_layout_is_rejected() {
        let result = parse(
            r#"
            [layout]
            default_order = ["Portfolio", "Orderbook"]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_size_override_is_rejected() {
        let cfg = parse(
            r#"
            [widgets.Orderbook]
            width = 1
            height = 1
            "#,
        )
        .unwrap();
        assert!(cfg.size_overrides().is_err());
    }

    #[test]
    fn test_layout_lists_from_environment() {
        let cfg = from_env(&[
            ("DASHBOARD__LAYOUT__DEFAULT_ORDER", "CryptoNews,Portfolio"),
            ("DASHBOARD__LAYOUT__EXPANDED", "CryptoNews"),
            ("DASHBOARD__LAYOUT__VIEWPORT_WIDTH", "800"),
        ])
        .unwrap();

        assert_eq!(
            cfg.layout.default_order,
            vec![WidgetKind::CryptoNews, WidgetKind::Portfolio]
        );
        assert_eq!(cfg.layout.expanded, vec![WidgetKind::CryptoNews]);
        assert_eq!(cfg.layout.viewport_width, 800);
    }

    #[test]
    fn test_environment_scalars_still_parse() {
        let cfg = from_env(&[
            ("DASHBOARD__SERVER__BIND", "127.0.0.1:9000"),
            ("DASHBOARD__REFRESH__DELAY_MS", "250"),
            ("DASHBOARD__STORAGE__IN_MEMORY", "true"),
        ])
        .unwrap();

        assert_eq!(cfg.server.bind, "127.0.0.1:9000");
        assert_eq!(cfg.refresh.delay_ms, 250);
        assert!(cfg.storage.in_memory);
    }

    #[test]
    fn test_unknown_widget_in_environment_list_is_rejected() {
        assert!(from_env(&[("DASHBOARD__LAYOUT__EXPANDED", "Portfolio,Orderbook")]).is_err());
    }
}
