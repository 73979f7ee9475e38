// Widget domain model - registry variants, persisted ids and grid footprints
use super::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Persisted widget identifier.
///
/// Stored ids are kept verbatim even when the registry no longer knows them,
/// so a shrunk registry never rewrites a user's saved layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Resolve the persisted id to its registry variant.
    pub fn kind(&self) -> Result<WidgetKind, DashboardError> {
        self.0.parse()
    }

    /// Registry title when known, the raw id otherwise.
    pub fn display_title(&self) -> String {
        self.kind()
            .map(|kind| kind.title().to_string())
            .unwrap_or_else(|_| self.0.clone())
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<WidgetKind> for WidgetId {
    fn from(kind: WidgetKind) -> Self {
        Self(kind.as_str().to_string())
    }
}

/// Grid footprint in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSize {
    pub width: u8,
    pub height: u8,
}

impl WidgetSize {
    pub const fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }
}

/// Every widget the dashboard knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum WidgetKind {
    Portfolio,
    ChartWidget,
    MarketOverview,
    GreedFearIndex,
    TopPerformers,
    TrendingCoins,
    CryptoNews,
    PriceTicker,
    CurrencyConverter,
    WhaleAlerts,
    SnakeGame,
}

impl WidgetKind {
    /// Registry order, which is also the order of the "add widget" menu.
    pub const ALL: [WidgetKind; 11] = [
        WidgetKind::Portfolio,
        WidgetKind::ChartWidget,
        WidgetKind::MarketOverview,
        WidgetKind::GreedFearIndex,
        WidgetKind::TopPerformers,
        WidgetKind::TrendingCoins,
        WidgetKind::CryptoNews,
        WidgetKind::PriceTicker,
        WidgetKind::CurrencyConverter,
        WidgetKind::WhaleAlerts,
        WidgetKind::SnakeGame,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Portfolio => "Portfolio",
            WidgetKind::ChartWidget => "ChartWidget",
            WidgetKind::MarketOverview => "MarketOverview",
            WidgetKind::GreedFearIndex => "GreedFearIndex",
            WidgetKind::TopPerformers => "TopPerformers",
            WidgetKind::TrendingCoins => "TrendingCoins",
            WidgetKind::CryptoNews => "CryptoNews",
            WidgetKind::PriceTicker => "PriceTicker",
            WidgetKind::CurrencyConverter => "CurrencyConverter",
            WidgetKind::WhaleAlerts => "WhaleAlerts",
            WidgetKind::SnakeGame => "SnakeGame",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WidgetKind::Portfolio => "Portfolio",
            WidgetKind::ChartWidget => "Price Chart",
            WidgetKind::MarketOverview => "Market Overview",
            WidgetKind::GreedFearIndex => "Fear & Greed Index",
            WidgetKind::TopPerformers => "Top Performers",
            WidgetKind::TrendingCoins => "Trending Coins",
            WidgetKind::CryptoNews => "Crypto News",
            WidgetKind::PriceTicker => "Price Ticker",
            WidgetKind::CurrencyConverter => "Currency Converter",
            WidgetKind::WhaleAlerts => "Whale Alerts",
            WidgetKind::SnakeGame => "Snake",
        }
    }

    /// Upstream the widget's client pulls its data from.
    pub fn source(self) -> &'static str {
        match self {
            WidgetKind::Portfolio => "storage",
            WidgetKind::ChartWidget
            | WidgetKind::MarketOverview
            | WidgetKind::TopPerformers
            | WidgetKind::TrendingCoins
            | WidgetKind::CurrencyConverter => "coingecko",
            WidgetKind::GreedFearIndex => "alternative.me",
            WidgetKind::CryptoNews => "cryptocompare",
            WidgetKind::PriceTicker => "binance-ws",
            WidgetKind::WhaleAlerts => "blockchain",
            WidgetKind::SnakeGame => "local",
        }
    }

    pub fn default_size(self) -> WidgetSize {
        match self {
            WidgetKind::Portfolio => WidgetSize::new(2, 2),
            WidgetKind::ChartWidget => WidgetSize::new(2, 2),
            WidgetKind::MarketOverview => WidgetSize::new(1, 2),
            WidgetKind::GreedFearIndex => WidgetSize::new(1, 1),
            WidgetKind::TopPerformers => WidgetSize::new(1, 1),
            WidgetKind::TrendingCoins => WidgetSize::new(1, 1),
            WidgetKind::CryptoNews => WidgetSize::new(1, 2),
            WidgetKind::PriceTicker => WidgetSize::new(1, 1),
            WidgetKind::CurrencyConverter => WidgetSize::new(1, 1),
            WidgetKind::WhaleAlerts => WidgetSize::new(1, 2),
            WidgetKind::SnakeGame => WidgetSize::new(1, 2),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<WidgetKind> for &'static str {
    fn from(kind: WidgetKind) -> Self {
        kind.as_str()
    }
}

impl TryFrom<String> for WidgetKind {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for WidgetKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DashboardError::UnknownWidget(s.to_string()))
    }
}

/// Footprint a card occupies given its expansion state and the live column count.
///
/// Expanded cards span the full row and double their height.
pub fn effective_size(base: WidgetSize, expanded: bool, columns: u8) -> WidgetSize {
    if expanded {
        WidgetSize::new(columns, base.height.saturating_mul(2))
    } else {
        base
    }
}
