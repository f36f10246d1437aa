pub use tracing::{Level, debug, error, event, info, span, trace, warn};

/// Installs a global fmt subscriber. Safe to call more than once; only the
/// first call wins.
pub fn init() {
    let _ = tracing_subscriber::fmt().with_max_level(Level::DEBUG).try_init();
}
