use anyhow::{Context, Result};
use leetsort_model::ProblemDetails;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Identify stale editor/header comment lines to strip before injecting
/// a fresh header: `# @lc ...` markers, bare `#`, and `# [217] Title` lines.
pub fn is_stale_header_line(line: &str) -> bool {
    let stripped = line.trim();
    stripped.starts_with("# @lc")
        || stripped == "#"
        || Regex::new(r"^#\s*\[\d+\]").unwrap().is_match(stripped)
}

/// Inject the metadata docstring header at the top of a solution file.
///
/// Stale header lines are dropped first. If the remaining code already
/// starts with a `Title:` header the file is left alone. Returns whether a
/// header was written.
pub fn inject_header(
    path: &Path,
    details: &ProblemDetails,
    slug: &str,
    language: &str,
) -> Result<bool> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let cleaned: Vec<&str> = contents
        .lines()
        .filter(|line| !is_stale_header_line(line))
        .collect();
    let mut cleaned_code = cleaned.join("\n").trim_start().to_string();
    if contents.ends_with('\n') && !cleaned_code.is_empty() {
        cleaned_code.push('\n');
    }

    // The injected header opens with a bare `"""` line, so the Title line
    // is the second one. Checking both keeps injection idempotent.
    let has_header = cleaned_code
        .lines()
        .take(2)
        .any(|l| l.contains("Title:"));
    if has_header {
        tracing::debug!(path = %path.display(), "Header already present; skipping injection");
        return Ok(false);
    }

    let mut output = details.header_block(slug, language);
    output.push_str(&cleaned_code);
    fs::write(path, output)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leetsort_model::Difficulty;

    fn sample_details() -> ProblemDetails {
        ProblemDetails {
            id: "217".into(),
            title: "Contains Duplicate".into(),
            difficulty: Difficulty::Easy,
            content: "Given an integer array nums...".into(),
        }
    }

    #[test]
    fn test_stale_line_detection() {
        assert!(is_stale_header_line("# @lc app=leetcode id=217 lang=python3"));
        assert!(is_stale_header_line("# @lc code=start"));
        assert!(is_stale_header_line("#"));
        assert!(is_stale_header_line("# [217] Contains Duplicate"));
        assert!(is_stale_header_line("#[217]"));

        assert!(!is_stale_header_line("# a real comment"));
        assert!(!is_stale_header_line("class Solution:"));
        assert!(!is_stale_header_line(""));
    }

    #[test]
    fn test_inject_strips_stale_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("217-contains-duplicate.py");
        fs::write(
            &path,
            "#\n# @lc app=leetcode id=217 lang=python3\n#\n# [217] Contains Duplicate\n#\nclass Solution:\n    pass\n",
        )
        .unwrap();

        let injected =
            inject_header(&path, &sample_details(), "contains-duplicate", "Python3").unwrap();
        assert!(injected);

        let result = fs::read_to_string(&path).unwrap();
        assert!(result.starts_with("\"\"\"\nTitle: Contains Duplicate - 217\n"));
        assert!(result.contains("Link: https://leetcode.com/problems/contains-duplicate/\n"));
        assert!(result.ends_with("class Solution:\n    pass\n"));
        assert!(!result.contains("@lc"));
        assert!(!result.contains("[217]"));
    }

    #[test]
    fn test_inject_skips_existing_header() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("solution.py");
        let existing = "\"\"\"\nTitle: Contains Duplicate - 217\n\"\"\"\nclass Solution:\n    pass\n";
        fs::write(&path, existing).unwrap();

        let injected =
            inject_header(&path, &sample_details(), "contains-duplicate", "Python3").unwrap();
        assert!(!injected);
        assert_eq!(fs::read_to_string(&path).unwrap(), existing);
    }

    #[test]
    fn test_inject_into_empty_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("empty.py");
        fs::write(&path, "").unwrap();

        let injected =
            inject_header(&path, &sample_details(), "contains-duplicate", "Python3").unwrap();
        assert!(injected);

        let result = fs::read_to_string(&path).unwrap();
        assert!(result.starts_with("\"\"\"\nTitle: Contains Duplicate - 217\n"));
    }
}
