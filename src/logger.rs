use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs the global logger once. `RUST_LOG` overrides the default
/// `warn` level, e.g. `RUST_LOG=chaintable=debug`.
pub fn initialize_logger() {
  INIT.call_once_force(|_| {
    let mut builder = Builder::new();

    builder
      .filter_level(LevelFilter::Warn)
      .filter_module("chaintable", LevelFilter::Warn)
      .format_timestamp_millis()
      .parse_default_env();

    // another logger may already be installed, e.g. by a test harness
    let _ = builder.try_init();
  });
}
