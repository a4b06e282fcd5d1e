use once_cell::sync::OnceCell;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

static INSTALLED: OnceCell<Option<WorkerGuard>> = OnceCell::new();

/// Initialise logging to stdout and, when `log_file` is given, to that file.
///
/// With `debug` set the default level is `debug` and `RUST_LOG` may override
/// it. Otherwise the level is forced to `info` regardless of the environment.
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    if INSTALLED.get().is_some() {
        return;
    }

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let file_layer = log_file.and_then(|path| {
        let name = path.file_name()?.to_owned();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let appender = tracing_appender::rolling::never(dir, name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        Some((writer, guard))
    });

    let (file_layer, guard) = match file_layer {
        Some((writer, guard)) => (
            Some(fmt::layer().with_writer(writer).with_ansi(false).boxed()),
            Some(guard),
        ),
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        let _ = INSTALLED.set(guard);
    }
}
