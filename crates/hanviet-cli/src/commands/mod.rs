macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            $crate::trace_init::finish_tracing();
            std::process::exit(1);
        })
    };
}

pub mod annotate_ops;
pub mod config_ops;
pub mod sentence_ops;
pub mod table_ops;

use std::fs;
use std::path::Path;

use serde::Serialize;

/// Write `value` as pretty-printed UTF-8 JSON.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> std::io::Result<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(path, text)
}
