use crate::error::{ArcPubError, Result};
use crate::table::Workbook;
use std::fmt;
use std::path::{Component, Path, PathBuf};

// ---------------------------------------------------------------------------
// RelativePath
// ---------------------------------------------------------------------------

/// A path validated to stay strictly inside whatever base it is resolved
/// against: relative, non-empty, and free of `..` or root components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ArcPubError::InvalidPath(String::new()));
        }
        for component in path.components() {
            match component {
                Component::Normal(_) => {}
                _ => return Err(ArcPubError::InvalidPath(path.display().to_string())),
            }
        }
        Ok(Self(path.to_path_buf()))
    }

    pub fn resolve(&self, base: &Path) -> PathBuf {
        base.join(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

// ---------------------------------------------------------------------------
// ContractPath
// ---------------------------------------------------------------------------

/// A contract path declares whether it names a leaf file or a directory.
/// The producer knows which one it means; guessing from extensions would
/// misclassify extensionless filenames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractPath {
    File(RelativePath),
    Directory(RelativePath),
}

impl ContractPath {
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::File(RelativePath::new(path)?))
    }

    pub fn directory(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::Directory(RelativePath::new(path)?))
    }

    pub fn relative(&self) -> &RelativePath {
        match self {
            Self::File(p) | Self::Directory(p) => p,
        }
    }
}

// ---------------------------------------------------------------------------
// Operation / Payload / WriteContract
// ---------------------------------------------------------------------------

/// Planned mutation kind. Only `Create` is fulfilled today; the engine
/// rejects the others with a warning instead of silently writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// Typed payload of a write contract, matched exhaustively by the engine.
#[derive(Debug, Clone)]
pub enum Payload {
    /// No content: an empty file, or nothing beyond the directory itself.
    Empty,
    /// Verbatim text content.
    PlainText(String),
    /// Tabular content serialized as an xlsx workbook.
    Table(Workbook),
    /// A payload kind this engine does not know how to serialize. Carried
    /// through so the engine can skip it with a useful warning.
    Unrecognized { kind: String },
}

impl Payload {
    pub fn kind(&self) -> &str {
        match self {
            Payload::Empty => "empty",
            Payload::PlainText(_) => "plain-text",
            Payload::Table(workbook) => workbook.kind.as_str(),
            Payload::Unrecognized { kind } => kind,
        }
    }
}

/// A single planned filesystem mutation, produced once by the contract
/// generator and consumed exactly once, in list order.
#[derive(Debug, Clone)]
pub struct WriteContract {
    pub path: ContractPath,
    pub operation: Operation,
    pub payload: Payload,
}

impl WriteContract {
    pub fn create(path: ContractPath, payload: Payload) -> Self {
        Self {
            path,
            operation: Operation::Create,
            payload,
        }
    }
}
