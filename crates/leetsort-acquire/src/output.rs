use anyhow::Result;
use leetsort_model::ProblemRecord;
use std::fs;
use std::path::Path;

/// Cache raw fetched HTML to the cache directory for archival/debugging.
///
/// Writes `raw_<slug>.html` so the original description can be re-examined
/// (or re-normalized) without re-fetching.
pub fn cache_html(cache_dir: &str, slug: &str, html: &str) -> Result<()> {
    let dir = Path::new(cache_dir);
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("raw_{slug}.html"));
    fs::write(&path, html)?;
    tracing::info!(path = %path.display(), bytes = html.len(), "Cached raw HTML");
    Ok(())
}

/// Write the provenance-stamped metadata record as `<slug>.json`.
pub fn write_record(cache_dir: &str, record: &ProblemRecord) -> Result<()> {
    let dir = Path::new(cache_dir);
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", record.source.slug));
    let json = serde_json::to_string_pretty(record)?;
    fs::write(&path, &json)?;
    tracing::info!(
        path = %path.display(),
        id = %record.details.id,
        difficulty = %record.details.difficulty,
        "Wrote metadata record"
    );
    Ok(())
}
