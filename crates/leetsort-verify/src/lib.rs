use anyhow::{Context, Result};
use leetsort_model::Difficulty;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("unexpected directory '{0}' (expected easy/, medium/, or hard/)")]
    UnknownDirectory(String),

    #[error("'{0}' is not named <id>-<slug>.{1}")]
    BadFilename(String, String),

    #[error("'{0}' has no metadata header")]
    MissingHeader(String),

    #[error("'{file}' says 'Difficulty: {header}' but sits in '{dir}/'")]
    DifficultyMismatch {
        file: String,
        header: String,
        dir: String,
    },

    #[error("problem id {id} appears in both '{first}' and '{second}'")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },
}

/// Verify an organized archive for consistency.
///
/// Walks the difficulty subdirectories of `dir` and checks every solution
/// file with extension `ext`: canonical `<id>-<slug>.<ext>` naming, a
/// metadata header, a `Difficulty:` line agreeing with the directory, and
/// archive-wide unique problem ids. Subdirectories other than
/// easy/medium/hard (dotted ones excepted) are reported too.
///
/// Findings are logged as warnings and returned; an empty vec means the
/// archive is consistent.
pub fn verify_archive(dir: &Path, ext: &str) -> Result<Vec<VerifyError>> {
    let mut errors = Vec::new();
    // id -> first relative path seen
    let mut seen_ids: HashMap<String, String> = HashMap::new();

    // Slug segments are whatever slug derivation produces: lowercased
    // letters and digits, possibly non-ASCII. Uppercase, underscores, and
    // whitespace never survive it.
    let filename_re = Regex::new(&format!(
        r"^(\d+)-[\p{{Ll}}\p{{Lo}}\p{{Nd}}]+(?:-[\p{{Ll}}\p{{Lo}}\p{{Nd}}]+)*\.{}$",
        regex::escape(ext)
    ))
    .expect("valid filename pattern");

    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let dir_name = entry.file_name().to_string_lossy().into_owned();
        if dir_name.starts_with('.') {
            continue;
        }

        let Ok(difficulty) = dir_name.parse::<Difficulty>() else {
            errors.push(VerifyError::UnknownDirectory(dir_name));
            continue;
        };

        verify_difficulty_dir(
            &entry.path(),
            &dir_name,
            difficulty,
            ext,
            &filename_re,
            &mut seen_ids,
            &mut errors,
        )?;
    }

    if !errors.is_empty() {
        for e in &errors {
            tracing::warn!("{e}");
        }
    }
    tracing::info!(
        files = seen_ids.len(),
        errors = errors.len(),
        "Verified archive"
    );

    Ok(errors)
}

fn verify_difficulty_dir(
    path: &Path,
    dir_name: &str,
    difficulty: Difficulty,
    ext: &str,
    filename_re: &Regex,
    seen_ids: &mut HashMap<String, String>,
    errors: &mut Vec<VerifyError>,
) -> Result<()> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !Path::new(&name).extension().is_some_and(|e| e == ext) {
            continue;
        }
        let rel = format!("{dir_name}/{name}");

        match filename_re.captures(&name) {
            Some(caps) => {
                let id = caps[1].to_string();
                if let Some(first) = seen_ids.get(&id) {
                    errors.push(VerifyError::DuplicateId {
                        id,
                        first: first.clone(),
                        second: rel.clone(),
                    });
                } else {
                    seen_ids.insert(id, rel.clone());
                }
            }
            None => errors.push(VerifyError::BadFilename(rel.clone(), ext.to_string())),
        }

        let contents = fs::read_to_string(entry.path())
            .with_context(|| format!("Failed to read {rel}"))?;
        check_header(&contents, &rel, dir_name, difficulty, errors);
    }

    Ok(())
}

/// Check the header of one solution file: a `Title:` line within the first
/// two lines, and a `Difficulty:` line matching the directory.
fn check_header(
    contents: &str,
    rel: &str,
    dir_name: &str,
    difficulty: Difficulty,
    errors: &mut Vec<VerifyError>,
) {
    let has_title = contents.lines().take(2).any(|l| l.contains("Title:"));
    if !has_title {
        errors.push(VerifyError::MissingHeader(rel.to_string()));
        return;
    }

    // Difficulty line sits near the top of the injected header
    let header_difficulty = contents
        .lines()
        .take(12)
        .find_map(|l| l.trim().strip_prefix("Difficulty:"))
        .map(str::trim);

    if let Some(header) = header_difficulty {
        if header.parse::<Difficulty>().ok() != Some(difficulty) {
            errors.push(VerifyError::DifficultyMismatch {
                file: rel.to_string(),
                header: header.to_string(),
                dir: dir_name.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_solution(dir: &Path, rel_dir: &str, name: &str, contents: &str) {
        let d = dir.join(rel_dir);
        fs::create_dir_all(&d).unwrap();
        fs::write(d.join(name), contents).unwrap();
    }

    fn headered(title_id: &str, difficulty: &str) -> String {
        format!(
            "\"\"\"\nTitle: {title_id}\nDifficulty: {difficulty}\n\"\"\"\nclass Solution:\n    pass\n"
        )
    }

    #[test]
    fn test_clean_archive_passes() {
        let tmp = tempfile::tempdir().unwrap();
        write_solution(
            tmp.path(),
            "easy",
            "217-contains-duplicate.py",
            &headered("Contains Duplicate - 217", "Easy"),
        );
        write_solution(
            tmp.path(),
            "medium",
            "49-group-anagrams.py",
            &headered("Group Anagrams - 49", "Medium"),
        );

        let errors = verify_archive(tmp.path(), "py").unwrap();
        assert!(errors.is_empty(), "unexpected: {errors:?}");
    }

    #[test]
    fn test_bad_filename_reported() {
        let tmp = tempfile::tempdir().unwrap();
        write_solution(
            tmp.path(),
            "easy",
            "ContainsDuplicate.py",
            &headered("Contains Duplicate - 217", "Easy"),
        );

        let errors = verify_archive(tmp.path(), "py").unwrap();
        assert!(matches!(&errors[..], [VerifyError::BadFilename(f, _)] if f == "easy/ContainsDuplicate.py"));
    }

    #[test]
    fn test_non_ascii_slug_filename_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        write_solution(
            tmp.path(),
            "easy",
            "100-caf-é.py",
            &headered("Café - 100", "Easy"),
        );

        let errors = verify_archive(tmp.path(), "py").unwrap();
        assert!(errors.is_empty(), "unexpected: {errors:?}");
    }

    #[test]
    fn test_missing_header_reported() {
        let tmp = tempfile::tempdir().unwrap();
        write_solution(
            tmp.path(),
            "easy",
            "217-contains-duplicate.py",
            "class Solution:\n    pass\n",
        );

        let errors = verify_archive(tmp.path(), "py").unwrap();
        assert!(matches!(&errors[..], [VerifyError::MissingHeader(_)]));
    }

    #[test]
    fn test_difficulty_mismatch_reported() {
        let tmp = tempfile::tempdir().unwrap();
        write_solution(
            tmp.path(),
            "easy",
            "49-group-anagrams.py",
            &headered("Group Anagrams - 49", "Medium"),
        );

        let errors = verify_archive(tmp.path(), "py").unwrap();
        assert!(matches!(
            &errors[..],
            [VerifyError::DifficultyMismatch { dir, header, .. }]
                if dir == "easy" && header == "Medium"
        ));
    }

    #[test]
    fn test_duplicate_id_reported() {
        let tmp = tempfile::tempdir().unwrap();
        write_solution(
            tmp.path(),
            "easy",
            "217-contains-duplicate.py",
            &headered("Contains Duplicate - 217", "Easy"),
        );
        write_solution(
            tmp.path(),
            "medium",
            "217-contains-duplicate.py",
            &headered("Contains Duplicate - 217", "Medium"),
        );

        let errors = verify_archive(tmp.path(), "py").unwrap();
        assert!(matches!(&errors[..], [VerifyError::DuplicateId { id, .. }] if id == "217"));
    }

    #[test]
    fn test_unknown_directory_reported() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("brutal")).unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();

        let errors = verify_archive(tmp.path(), "py").unwrap();
        assert!(matches!(&errors[..], [VerifyError::UnknownDirectory(d)] if d == "brutal"));
    }

    #[test]
    fn test_other_extensions_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        write_solution(tmp.path(), "easy", "notes.md", "no header at all\n");

        let errors = verify_archive(tmp.path(), "py").unwrap();
        assert!(errors.is_empty());
    }
}
