#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::{Mutex, Once};

#[cfg(feature = "trace")]
use tracing_appender::non_blocking::WorkerGuard;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

#[cfg(feature = "trace")]
static GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Keeps the trace writer alive; dropping it flushes pending events.
#[must_use = "trace output is flushed when the session is dropped"]
pub struct TraceSession(());

impl Drop for TraceSession {
    fn drop(&mut self) {
        finish_tracing();
    }
}

/// Route core spans to `<log_dir>/hanviet-trace.jsonl`.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> TraceSession {
    INIT.call_once(|| {
        let file_appender = tracing_appender::rolling::never(log_dir, "hanviet-trace.jsonl");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        if let Ok(mut slot) = GUARD.lock() {
            *slot = Some(guard);
        }

        tracing_subscriber::fmt()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hanviet_core=debug")),
            )
            .init();
    });
    TraceSession(())
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) -> TraceSession {
    TraceSession(())
}

/// Flush and stop the trace writer. Must run before `process::exit`, which
/// skips destructors.
pub fn finish_tracing() {
    #[cfg(feature = "trace")]
    {
        let guard = GUARD.lock().ok().and_then(|mut slot| slot.take());
        drop(guard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "trace")]
    #[test]
    fn session_drop_flushes_trace_file() {
        let dir = tempfile::tempdir().unwrap();
        let session = init_tracing(dir.path());
        tracing::debug!(target: "hanviet_core", rows = 3, "table_build");
        drop(session);

        assert!(GUARD.lock().unwrap().is_none());
        let text = std::fs::read_to_string(dir.path().join("hanviet-trace.jsonl")).unwrap();
        assert!(text.contains("table_build"));
    }

    #[cfg(not(feature = "trace"))]
    #[test]
    fn finish_without_init_is_noop() {
        finish_tracing();
        finish_tracing();
    }
}
