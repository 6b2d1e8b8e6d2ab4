use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. With `debug` off the level is fixed at
/// `info`; with it on `RUST_LOG` may override the default `debug` level.
pub fn init(debug: bool) {
    let filter = if debug {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
	EnvFilter::new("info")
    };

    // a subscriber may already be installed, e.g. by a test harness
    let _ = tracing_subscriber::fmt()
	.with_env_filter(filter)
	.with_writer(std::io::stderr)
	.try_init();
}
