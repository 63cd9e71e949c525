//! Lazy discovery of request files from glob patterns and directories.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error_handling::DiscoveryError;

/// True when the file name carries a recognized request-file extension.
/// The match is case-sensitive: `.HTTP` is not a request file.
fn is_request_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".http") || name.ends_with(".rest"))
}

/// Expands `patterns` into absolute request-file paths.
///
/// For each non-empty pattern: glob matches that are regular files are
/// yielded when they carry a `.http`/`.rest` extension; matches that are
/// directories have their immediate children listed (non-recursive) and
/// filtered the same way. Order follows glob match order, then
/// directory-listing order.
///
/// The returned iterator is lazy and pull-based: the filesystem is only
/// touched as items are consumed, and the sequence is not restartable
/// mid-iteration — call `expand_paths` again for a fresh scan.
pub fn expand_paths<I, S>(patterns: I) -> RequestFilePaths
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    RequestFilePaths {
        patterns: patterns.into_iter().map(Into::into).collect(),
        matches: None,
        children: VecDeque::new(),
    }
}

/// Iterator over discovered request-file paths. See [`expand_paths`].
pub struct RequestFilePaths {
    patterns: VecDeque<String>,
    matches: Option<glob::Paths>,
    children: VecDeque<PathBuf>,
}

impl Iterator for RequestFilePaths {
    type Item = Result<PathBuf, DiscoveryError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Queued directory children belong to the current match and
            // are drained first.
            if let Some(child) = self.children.pop_front() {
                return Some(absolutize(&child));
            }

            match self.matches.as_mut().map(Iterator::next) {
                Some(Some(Ok(path))) => match self.inspect(&path) {
                    Ok(Some(path)) => return Some(Ok(path)),
                    Ok(None) => continue,
                    Err(error) => return Some(Err(error)),
                },
                Some(Some(Err(error))) => return Some(Err(error.into())),
                Some(None) => {
                    self.matches = None;
                    continue;
                }
                None => {}
            }

            let pattern = loop {
                match self.patterns.pop_front() {
                    Some(pattern) if pattern.is_empty() => continue,
                    Some(pattern) => break pattern,
                    None => return None,
                }
            };
            debug!("Expanding request-file pattern {pattern}");
            match glob::glob(&pattern) {
                Ok(matches) => self.matches = Some(matches),
                Err(error) => return Some(Err(error.into())),
            }
        }
    }
}

impl RequestFilePaths {
    /// Classifies one glob match: a matching regular file is yielded
    /// directly; a directory queues its filtered immediate children.
    fn inspect(&mut self, path: &Path) -> Result<Option<PathBuf>, DiscoveryError> {
        let metadata = fs::symlink_metadata(path).map_err(|source| DiscoveryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if metadata.is_file() {
            if is_request_file(path) {
                return absolutize(path).map(Some);
            }
            return Ok(None);
        }

        if metadata.is_dir() {
            let entries = fs::read_dir(path).map_err(|source| DiscoveryError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| DiscoveryError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let child = entry.path();
                if is_request_file(&child) {
                    self.children.push_back(child);
                }
            }
        }

        Ok(None)
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, DiscoveryError> {
    std::path::absolute(path).map_err(|source| DiscoveryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_request_file_extensions() {
        assert!(is_request_file(Path::new("a.http")));
        assert!(is_request_file(Path::new("dir/b.rest")));
        assert!(!is_request_file(Path::new("c.txt")));
        assert!(!is_request_file(Path::new("d.HTTP")));
        assert!(!is_request_file(Path::new("http")));
    }

    #[test]
    fn empty_and_missing_patterns_yield_nothing() {
        assert_eq!(expand_paths(Vec::<String>::new()).count(), 0);
        assert_eq!(expand_paths([""]).count(), 0);
        assert_eq!(expand_paths(["no/such/dir/*.http"]).count(), 0);
    }
}
