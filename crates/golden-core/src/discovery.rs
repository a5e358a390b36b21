use crate::domain::{FIXTURE_EXTENSION, Fixture};
use crate::runner::RunnerError;
use globset::{Glob, GlobMatcher};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Restricts discovery to fixtures whose file name matches a glob.
#[derive(Debug, Clone, Default)]
pub struct FixtureFilter {
    matcher: Option<GlobMatcher>,
}

impl FixtureFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_glob(pattern: &str) -> Result<Self, RunnerError> {
        let glob = Glob::new(pattern).map_err(|source| RunnerError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            matcher: Some(glob.compile_matcher()),
        })
    }

    pub fn matches(&self, file_name: &OsStr) -> bool {
        self.matcher
            .as_ref()
            .is_none_or(|matcher| matcher.is_match(Path::new(file_name)))
    }
}

/// Lists the `.las` fixtures directly inside `sources_dir`, sorted by entry
/// file name.
///
/// Entries are canonicalized before inspection, so a symlink counts when its
/// target is a regular `.las` file and dangling links are skipped. Names need
/// not be valid UTF-8. The returned order is stable across platforms, which
/// keeps early aborts reproducible.
pub fn discover_fixtures(
    sources_dir: &Path,
    filter: &FixtureFilter,
) -> Result<Vec<Fixture>, RunnerError> {
    let directory = fs::read_dir(sources_dir).map_err(|source| RunnerError::ReadDirectory {
        path: sources_dir.to_path_buf(),
        source,
    })?;

    let mut fixtures = Vec::new();
    for entry in directory {
        let entry = entry.map_err(|source| RunnerError::ReadDirectory {
            path: sources_dir.to_path_buf(),
            source,
        })?;

        let Ok(canonical_path) = fs::canonicalize(entry.path()) else {
            continue;
        };
        if !canonical_path.is_file() || !has_fixture_extension(&canonical_path) {
            continue;
        }

        let file_name = entry.file_name();
        if !filter.matches(&file_name) {
            continue;
        }

        if let Some(fixture) = Fixture::new(sources_dir, canonical_path) {
            fixtures.push(fixture.with_file_name(file_name));
        }
    }

    fixtures.sort_by(|a, b| {
        a.file_name
            .cmp(&b.file_name)
            .then_with(|| a.path.cmp(&b.path))
    });
    Ok(fixtures)
}

fn has_fixture_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == FIXTURE_EXTENSION)
}
