use anyhow::{Context, Result};
use leetsort_acquire::{leetcode, output};
use leetsort_model::ProblemDetails;
use std::fs;
use std::path::{Path, PathBuf};

pub mod header;
pub mod slug;

/// Options for a sorting run.
#[derive(Debug, Clone)]
pub struct SortOptions {
    /// Directory scanned for unsorted solution files (non-recursive).
    pub dir: String,
    /// Solution file extension without the dot (e.g., "py").
    pub ext: String,
    /// Root for the difficulty directories. Defaults to `dir`, so the
    /// archive grows next to the unsorted files.
    pub output_dir: Option<String>,
    /// Log planned moves without touching the filesystem.
    pub dry_run: bool,
    /// When set, archive raw HTML + metadata JSON for each fetched problem.
    pub cache_dir: Option<String>,
}

/// Counts for one sorting run.
#[derive(Debug, Default, Clone, Copy)]
pub struct SortStats {
    pub moved: usize,
    pub skipped: usize,
}

/// Main driver: scan a directory for solution files, fetch metadata for
/// each, inject headers, and move files into difficulty directories.
///
/// Files whose metadata cannot be fetched (unknown slug, API refusal) are
/// logged and skipped; the run continues. Network-level failures abort.
pub async fn sort_solutions(opts: &SortOptions) -> Result<SortStats> {
    let dir = Path::new(&opts.dir);
    let out_dir = opts.output_dir.as_deref().map(Path::new).unwrap_or(dir);
    let files = solution_files(dir, &opts.ext)?;
    tracing::info!(dir = %dir.display(), count = files.len(), ext = %opts.ext, "Scanning for solutions");

    let language = language_for_ext(&opts.ext);
    let mut stats = SortStats::default();

    for filename in files {
        let slug = slug::slug_from_filename(&filename);

        let fetched = match leetcode::fetch_problem(&slug).await? {
            Some(f) => f,
            None => {
                tracing::warn!(file = %filename, slug = %slug, "Could not fetch metadata; skipping");
                stats.skipped += 1;
                continue;
            }
        };

        if let Some(cache_dir) = &opts.cache_dir {
            output::cache_html(cache_dir, &slug, &fetched.raw_html)?;
            let record = leetcode::build_record(&slug, fetched.details.clone());
            output::write_record(cache_dir, &record)?;
        }

        let dest = place_solution(
            dir,
            out_dir,
            &filename,
            &fetched.details,
            &slug,
            &opts.ext,
            language,
            opts.dry_run,
        )?;
        tracing::info!(
            from = %filename,
            to = %dest.display(),
            dry_run = opts.dry_run,
            "Moved and renamed"
        );
        stats.moved += 1;
    }

    tracing::info!(moved = stats.moved, skipped = stats.skipped, "Sorting run complete");
    Ok(stats)
}

/// Regular files in `dir` with the given extension, sorted by name.
pub fn solution_files(dir: &Path, ext: &str) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::warn!(path = %entry.path().display(), "Skipping non-UTF-8 filename");
            continue;
        };
        if Path::new(name).extension().is_some_and(|e| e == ext) {
            files.push(name.to_string());
        }
    }
    files.sort();
    Ok(files)
}

/// Move one solution from `src_dir` into its difficulty directory under
/// `out_dir` as `<id>-<slug>.<ext>` and inject the metadata header. With
/// `dry_run` the destination is computed and returned but nothing is
/// written.
pub fn place_solution(
    src_dir: &Path,
    out_dir: &Path,
    filename: &str,
    details: &ProblemDetails,
    slug: &str,
    ext: &str,
    language: &str,
    dry_run: bool,
) -> Result<PathBuf> {
    let target_dir = out_dir.join(details.difficulty.dir_name());
    let dest = target_dir.join(details.canonical_filename(slug, ext));

    if dry_run {
        return Ok(dest);
    }

    fs::create_dir_all(&target_dir)
        .with_context(|| format!("Failed to create {}", target_dir.display()))?;
    fs::rename(src_dir.join(filename), &dest)
        .with_context(|| format!("Failed to move {filename} to {}", dest.display()))?;
    header::inject_header(&dest, details, slug, language)?;

    Ok(dest)
}

/// Header `Language:` line for a file extension.
fn language_for_ext(ext: &str) -> &str {
    match ext {
        "py" => "Python3",
        "rs" => "Rust",
        "go" => "Go",
        "java" => "Java",
        "cpp" | "cc" => "C++",
        "js" => "JavaScript",
        "ts" => "TypeScript",
        other => other,
    }
}
