use std::fmt::Display;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TransportError {
    #[error("Decoding response of {0} failed: {1}")]
    Decode(String, String),
    #[error("Request to {0} failed: {1}")]
    Request(String, String),
    #[error("Server responded with status {status} for {path}")]
    Status { path: String, status: u16 },
    #[error("Request to {0} timed out")]
    Timeout(String),
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Collection {
    Restore,
    #[default]
    Trash,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Restore => "restore",
            Collection::Trash => "trash",
        }
    }
}

/// Address of a resource below the trash root of the current user, e.g.
/// `trash/somedir.d99999/One.txt` or `restore/One.txt.d11111`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct RemotePath {
    pub collection: Collection,
    pub segments: Vec<String>,
}

impl RemotePath {
    pub fn collection(collection: Collection) -> Self {
        Self {
            collection,
            segments: Vec::new(),
        }
    }

    pub fn new(collection: Collection, segments: Vec<String>) -> Self {
        Self {
            collection,
            segments,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Display for RemotePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.collection.as_str())?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Request {
    Move {
        source: RemotePath,
        destination: RemotePath,
    },
    Remove(RemotePath),
}

impl Request {
    pub fn source(&self) -> &RemotePath {
        match self {
            Request::Move { source, .. } => source,
            Request::Remove(path) => path,
        }
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::Move {
                source,
                destination,
            } => write!(f, "MOVE {} -> {}", source, destination),
            Request::Remove(path) => write!(f, "DELETE {}", path),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RawKind {
    Dir,
    File,
}

/// Listing item as the server reports it. Nothing outside of the listing
/// decoder works with this shape.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RawEntry {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: RawKind,
    pub name: String,
    pub mtime: u64,
    #[serde(default)]
    pub mimetype: String,
    #[serde(default)]
    pub etag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Lists the trash directory addressed by `dir`, relative to the trash root.
    async fn list(&self, dir: &[String]) -> Result<Vec<RawEntry>, TransportError>;

    async fn remove(&self, path: &RemotePath) -> Result<(), TransportError>;

    async fn move_to(
        &self,
        source: &RemotePath,
        destination: &RemotePath,
    ) -> Result<(), TransportError>;
}

pub async fn send<T: Transport + ?Sized>(
    transport: &T,
    request: &Request,
) -> Result<(), TransportError> {
    match request {
        Request::Move {
            source,
            destination,
        } => transport.move_to(source, destination).await,
        Request::Remove(path) => transport.remove(path).await,
    }
}

#[cfg(test)]
mod test {
    use super::{Collection, RawEntry, RawKind, RemotePath, Request};

    #[test]
    fn remote_path_display() {
        let path = RemotePath::new(
            Collection::Trash,
            vec!["somedir.d99999".to_string(), "One.txt".to_string()],
        );

        assert_eq!("trash/somedir.d99999/One.txt", path.to_string());
        assert_eq!("trash", RemotePath::collection(Collection::Trash).to_string());
        assert!(RemotePath::collection(Collection::Trash).is_collection());
    }

    #[test]
    fn request_display() {
        let request = Request::Move {
            source: RemotePath::new(Collection::Trash, vec!["One.txt.d11111".to_string()]),
            destination: RemotePath::new(Collection::Restore, vec!["One.txt.d11111".to_string()]),
        };

        assert_eq!(
            "MOVE trash/One.txt.d11111 -> restore/One.txt.d11111",
            request.to_string()
        );
    }

    #[test]
    fn deserialize_raw_entries() {
        let json = r#"[
            {"id": 1, "type": "file", "name": "One.txt.d11111", "mtime": 11111000,
             "mimetype": "text/plain", "etag": "abc", "size": 12},
            {"id": 4, "type": "dir", "name": "somedir.d99999", "mtime": 99999000,
             "mimetype": "httpd/unix-directory", "etag": "456", "permissions": 31}
        ]"#;

        let entries: Vec<RawEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(2, entries.len());
        assert_eq!(RawKind::File, entries[0].kind);
        assert_eq!(Some(12), entries[0].size);
        assert_eq!(None, entries[0].permissions);
        assert_eq!(RawKind::Dir, entries[1].kind);
        assert_eq!(None, entries[1].size);
        assert_eq!(Some(31), entries[1].permissions);
    }
}
