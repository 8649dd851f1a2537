use crate::config::LoggingConfig;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logging(cfg: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.filter));
    let _ = fmt().with_env_filter(filter).try_init();
}
