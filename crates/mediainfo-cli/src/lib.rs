use anyhow::{Context, Result};
use mediainfo_core::{apply_encode_profile, EnrichedRequest, HandlerError, MediaInfoHandler};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Read a JSON event from `path`, or from `reader` when no path is given.
pub fn read_event(path: Option<&Path>, reader: impl Read) -> Result<Value> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut raw = String::new();
            let mut reader = reader;
            reader
                .read_to_string(&mut raw)
                .context("Failed to read event from stdin")?;
            raw
        }
    };

    if raw.trim().is_empty() {
        anyhow::bail!("Event input is empty");
    }

    serde_json::from_str(&raw).context("Event is not valid JSON")
}

/// Render a value as pretty JSON for stdout.
pub fn to_pretty_json(value: &impl serde::Serialize) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

/// Run the step on `event`, applying the encode profile when `profile` is set.
///
/// Always yields a record to print. On failure that is the fallback record
/// (profiled as well), returned next to the error.
pub fn run_step(
    handler: &MediaInfoHandler,
    event: Value,
    profile: bool,
) -> (EnrichedRequest, Option<HandlerError>) {
    let (mut record, error) = match handler.handle(event) {
        Ok(enriched) => (enriched, None),
        Err(err) => (err.fallback().clone(), Some(err)),
    };

    if profile {
        let tier = apply_encode_profile(&mut record);
        tracing::debug!(tier = %tier, "Encode profile applied");
    }

    (record, error)
}
