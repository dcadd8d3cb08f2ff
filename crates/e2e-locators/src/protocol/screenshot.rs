// Screenshot artifacts
//
// Files are named `{name}-{timestamp}.png` where the timestamp is an ISO-8601
// UTC instant with millisecond precision and ':' / '.' replaced by '-', e.g.
// `login-failure-2026-10-19T12-00-00-000Z.png`.

use crate::error::Result;
use crate::protocol::engine::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};

/// Builds the artifact file name for `name` captured at `at`.
pub fn screenshot_file_name(name: &str, at: DateTime<Utc>) -> String {
    let timestamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{}-{}.png", name, timestamp)
}

/// Takes a full-page screenshot into `dir`, creating it if needed.
///
/// Returns the path that was written.
pub async fn take_screenshot<E: Engine + ?Sized>(
    engine: &E,
    dir: &Path,
    name: &str,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(screenshot_file_name(name, Utc::now()));
    engine.screenshot(&path).await?;

    tracing::debug!("Screenshot saved to {}", path.display());
    Ok(path)
}
