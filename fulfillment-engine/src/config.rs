//! Engine configuration
//!
//! # Environment variables
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | LOW_STOCK_THRESHOLD | 10 | Default per-item low-stock alert level |
//! | EXPIRY_ALERT_DAYS | 7 | Window for the expiring-batch report |
//! | REFUND_SHELF_LIFE_DAYS | 7 | Shelf life assigned to refund batches |
//! | NOTIFY_QUEUE_CAPACITY | 256 | Notifier channel capacity |

/// Engine configuration, env-var backed with sane defaults
#[derive(Debug, Clone)]
pub struct Config {
    /// Default low-stock alert threshold for items without an explicit one
    pub low_stock_threshold: i64,
    /// Days ahead the expiring-batch report looks, inclusive
    pub expiry_alert_days: i64,
    /// Shelf life (days) assigned to batches created by order cancellation
    pub refund_shelf_life_days: i64,
    /// Bounded capacity of the fire-and-forget notification queue
    pub notify_queue_capacity: usize,
}

impl Config {
    /// Load configuration, reading `.env` first if present
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable
    pub fn from_env() -> Self {
        Self {
            low_stock_threshold: env_parse("LOW_STOCK_THRESHOLD", 10),
            expiry_alert_days: env_parse("EXPIRY_ALERT_DAYS", 7),
            refund_shelf_life_days: env_parse("REFUND_SHELF_LIFE_DAYS", 7),
            notify_queue_capacity: env_parse("NOTIFY_QUEUE_CAPACITY", 256),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            low_stock_threshold: 10,
            expiry_alert_days: 7,
            refund_shelf_life_days: 7,
            notify_queue_capacity: 256,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_from_env_without_overrides() {
        let d = Config::default();
        assert_eq!(d.low_stock_threshold, 10);
        assert_eq!(d.expiry_alert_days, 7);
        assert_eq!(d.refund_shelf_life_days, 7);
        assert_eq!(d.notify_queue_capacity, 256);
    }
}
