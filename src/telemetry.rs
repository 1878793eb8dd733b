use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

/// Bunyan-formatted JSON subscriber. `RUST_LOG` wins over `default_filter`.
pub fn get_subscriber<Sink>(
    name: &str,
    default_filter: &str,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs `subscriber` globally and routes `log` records (actix-web's among
/// them) into it. Must be called once per process.
pub fn set_global_default(subscriber: impl Subscriber + Send + Sync) {
    // 将`log`中的记录导入`trace`中
    LogTracer::init().expect("failed to set logger.");
    tracing::subscriber::set_global_default(subscriber).expect("failed to set subscriber.");
}

pub fn init_subscriber(name: &str) {
    set_global_default(get_subscriber(name, "info", std::io::stdout));
}
