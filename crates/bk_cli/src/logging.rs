use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Install the stderr subscriber. `RUST_LOG` wins over `level`.
pub fn init_subscriber(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let formatter = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let subscriber = Registry::default().with(filter).with(formatter);

    // a second install (tests, embedding) keeps the first subscriber
    let _ = tracing::subscriber::set_global_default(subscriber);
}
