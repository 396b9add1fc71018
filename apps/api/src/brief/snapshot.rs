//! Point-in-time JSON snapshots of assembled briefs.
//!
//! One pretty-printed file per generate call, named from the business and a
//! seconds-resolution timestamp. Write-only: nothing ever reads these back.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::models::Brief;

/// Writes `brief` to `<dir>/brief_<business>_<YYYYMMDD_HHMMSS>.json` and
/// returns the path. No retry, no verification.
pub async fn write(dir: &Path, brief: &Brief) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!(
        "brief_{}_{timestamp}.json",
        sanitize_business_name(&brief.business)
    ));

    let json = serde_json::to_vec_pretty(brief).context("failed to serialize brief")?;
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("failed to write snapshot {}", path.display()))?;

    Ok(path)
}

/// Spaces become underscores so the business name is filename-safe enough for
/// the observed naming scheme.
fn sanitize_business_name(name: &str) -> String {
    name.replace(' ', "_")
}
