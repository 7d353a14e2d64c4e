//! Path enumeration: walking search roots for candidate plugin modules.
//!
//! A namespace `a.b.c` corresponds to a directory `a/b/c` under each search
//! root. Inside it, module files carry the [`MODULE_EXTENSION`] and package
//! directories are marked by a `mod.plugin` file, mirroring Rust's `mod.rs`
//! convention.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Recognized extension for plugin module files.
pub const MODULE_EXTENSION: &str = "plugin";

/// Stem of the package-marker file.
///
/// A directory is a package only if it contains `mod.plugin`; the marker
/// file itself is never a candidate.
pub const PACKAGE_MARKER: &str = "mod";

/// Check whether a directory is a package (contains the marker file).
pub fn is_package(path: &Path) -> bool {
    path.join(format!("{PACKAGE_MARKER}.{MODULE_EXTENSION}")).is_file()
}

/// A discovered, not-yet-imported candidate: `"<namespace>/<entry>"`, where
/// the namespace keeps its dots (`acme.plugins/mock`,
/// `acme.plugins.mock/factory.plugin`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidatePath(String);

impl CandidatePath {
    pub(crate) fn new(namespace: &str, entry: &str) -> Self {
        Self(format!("{namespace}/{entry}"))
    }

    /// Get the candidate string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace the candidate was found under.
    pub fn namespace(&self) -> &str {
        self.0.split_once('/').map_or(self.0.as_str(), |(namespace, _)| namespace)
    }

    /// The directory or file name of the candidate itself.
    pub fn entry(&self) -> &str {
        self.0.split_once('/').map_or("", |(_, entry)| entry)
    }

    /// Derive the dotted import path: strip the extension from the last
    /// segment and join every segment with `.`.
    pub fn import_path(&self) -> String {
        let mut segments: Vec<&str> = self.0.split('/').filter(|s| !s.is_empty()).collect();
        if let Some(last) = segments.last_mut() {
            if let Some(stem) = Path::new(*last).file_stem().and_then(OsStr::to_str) {
                *last = stem;
            }
        }
        segments.join(".")
    }
}

impl fmt::Display for CandidatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CandidatePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One traversal frame: either a namespace still to be expanded over every
/// search root, or an open directory listing.
enum Frame {
    Namespace(String),
    Dir { namespace: String, entries: fs::ReadDir },
}

/// What to do with the top frame after inspecting it.
enum Step {
    Expand,
    Pop,
    Skip,
    Candidate { candidate: CandidatePath, sub_namespace: Option<String> },
}

/// Lazy iterator over candidate paths for one namespace.
///
/// Filesystem access happens on demand: each `next` call reads at most a
/// handful of directory entries. The de-duplication set lives for exactly
/// one iterator; a fresh call starts a fresh set.
pub struct PluginPaths<'a> {
    roots: &'a [PathBuf],
    recurse: bool,
    seen: HashSet<String>,
    stack: Vec<Frame>,
}

impl<'a> PluginPaths<'a> {
    pub(crate) fn new(roots: &'a [PathBuf], namespace: &str, recurse: bool) -> Self {
        let stack = if namespace.is_empty() {
            tracing::debug!("empty namespace, nothing to enumerate");
            Vec::new()
        } else {
            vec![Frame::Namespace(namespace.to_string())]
        };

        Self { roots, recurse, seen: HashSet::new(), stack }
    }

    /// Inspect the top frame and decide the next step. Only borrows the
    /// stack; mutation happens in `next`.
    fn step(&mut self) -> Option<Step> {
        let frame = self.stack.last_mut()?;
        let step = match frame {
            Frame::Namespace(_) => Step::Expand,
            Frame::Dir { namespace, entries } => match entries.next() {
                None => Step::Pop,
                Some(Err(err)) => {
                    tracing::debug!(error = %err, "skipping unreadable directory entry");
                    Step::Skip
                }
                Some(Ok(entry)) => {
                    let Ok(name) = entry.file_name().into_string() else {
                        return Some(Step::Skip);
                    };
                    let path = entry.path();

                    if path.is_dir() {
                        if !is_package(&path) {
                            // Plain directories are invisible: not a
                            // candidate, not recursed into.
                            Step::Skip
                        } else {
                            let sub_namespace = self.recurse.then(|| {
                                let stem = Path::new(&name)
                                    .file_stem()
                                    .and_then(OsStr::to_str)
                                    .unwrap_or(&name);
                                format!("{namespace}.{stem}")
                            });
                            Step::Candidate {
                                candidate: CandidatePath::new(namespace, &name),
                                sub_namespace,
                            }
                        }
                    } else {
                        let file = Path::new(&name);
                        let stem = file.file_stem().and_then(OsStr::to_str);
                        let extension = file.extension().and_then(OsStr::to_str);
                        if stem == Some(PACKAGE_MARKER) || extension != Some(MODULE_EXTENSION) {
                            Step::Skip
                        } else {
                            Step::Candidate {
                                candidate: CandidatePath::new(namespace, &name),
                                sub_namespace: None,
                            }
                        }
                    }
                }
            },
        };
        Some(step)
    }

    /// Expand the top namespace frame into one directory frame per search
    /// root that contains it. Absence under a root is not an error.
    fn expand_namespace(&mut self) {
        let Some(Frame::Namespace(namespace)) = self.stack.pop() else {
            return;
        };

        tracing::debug!(namespace = %namespace, recurse = self.recurse, "collecting plugin paths");

        let relative: PathBuf = namespace.split('.').collect();
        // Reversed so the first root ends up on top of the stack.
        for root in self.roots.iter().rev() {
            let dir = root.join(&relative);
            if !dir.exists() {
                continue;
            }
            match fs::read_dir(&dir) {
                Ok(entries) => {
                    self.stack.push(Frame::Dir { namespace: namespace.clone(), entries });
                }
                Err(err) => {
                    tracing::debug!(dir = %dir.display(), error = %err, "skipping unreadable namespace directory");
                }
            }
        }
    }
}

impl Iterator for PluginPaths<'_> {
    type Item = CandidatePath;

    fn next(&mut self) -> Option<CandidatePath> {
        loop {
            match self.step()? {
                Step::Expand => self.expand_namespace(),
                Step::Pop => {
                    self.stack.pop();
                }
                Step::Skip => {}
                Step::Candidate { candidate, sub_namespace } => {
                    // Descend before the rest of this directory; the seen
                    // set is shared with the sub-enumeration.
                    if let Some(sub) = sub_namespace {
                        self.stack.push(Frame::Namespace(sub));
                    }
                    if self.seen.insert(candidate.as_str().to_string()) {
                        return Some(candidate);
                    }
                }
            }
        }
    }
}
