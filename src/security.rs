use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// The only way resolution fails: the canonical result lies outside the root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapesRoot {
    #[error("Path escapes project root: {}", .path.display())]
    PathEscapesRoot { path: PathBuf },
}

impl EscapesRoot {
    pub fn path(&self) -> &Path {
        match self {
            EscapesRoot::PathEscapesRoot { path } => path,
        }
    }
}

/// Canonical project root, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    root: PathBuf,
}

impl ProjectRoot {
    pub fn new(root: &Path) -> anyhow::Result<Self> {
        let root = dunce::canonicalize(root)?;
        if !root.is_dir() {
            anyhow::bail!("project root is not a directory: {}", root.display());
        }
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path { &self.root }

    pub fn join(&self, rel: impl AsRef<Path>) -> PathBuf { self.root.join(rel) }

    pub fn resolve(&self, input: &str) -> Result<PathBuf, EscapesRoot> {
        resolve_under_root(&self.root, Path::new(input))
    }
}

/// Joins `input` onto `root` when relative, canonicalizes, and checks containment.
///
/// `root` must already be canonical. Existing prefixes are canonicalized by the
/// host (symlinks followed); components past the first missing one are
/// normalized lexically. Nothing is created or modified.
pub fn resolve_under_root(root: &Path, input: &Path) -> Result<PathBuf, EscapesRoot> {
    let joined = if input.is_absolute() { input.to_path_buf() } else { root.join(input) };
    let resolved = canonicalize_lenient(&joined)?;
    if resolved.starts_with(root) {
        Ok(resolved)
    } else {
        Err(EscapesRoot::PathEscapesRoot { path: resolved })
    }
}

fn canonicalize_lenient(path: &Path) -> Result<PathBuf, EscapesRoot> {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::Prefix(_) | Component::RootDir => out.push(comp.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => {
                let next = out.join(name);
                if fs::symlink_metadata(&next).is_ok() {
                    // exists but cannot be canonicalized: dangling or looping link
                    out = dunce::canonicalize(&next)
                        .map_err(|_| EscapesRoot::PathEscapesRoot { path: next.clone() })?;
                } else {
                    out = next;
                }
            }
        }
    }
    Ok(out)
}
