//! Logger setup shared by the clock binaries

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the `env_logger` backend once per process
///
/// Defaults to `info`; `RUST_LOG` overrides it.
pub fn init() {
    INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or("info");
        // A test harness or embedding app may already own the logger.
        let _ = env_logger::Builder::from_env(env).format_timestamp_millis().try_init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_is_idempotent() {
        super::init();
        super::init();
        log::info!("logger ready");
    }
}
