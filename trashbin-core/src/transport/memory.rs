use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;

use super::{Collection, RawEntry, RemotePath, Request, Transport, TransportError};

/// Transport serving a trash bin held in memory. Every remove and move is
/// recorded in the order it was issued and in the order it completed.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    completed: Mutex<Vec<Request>>,
    delays: HashMap<RemotePath, Duration>,
    failing: HashSet<RemotePath>,
    failing_listings: HashSet<Vec<String>>,
    listings: Mutex<HashMap<Vec<String>, Vec<RawEntry>>>,
    listed: Mutex<Vec<Vec<String>>>,
    requests: Mutex<Vec<Request>>,
}

impl MemoryTransport {
    pub fn with_listing(self, dir: &[&str], entries: Vec<RawEntry>) -> Self {
        self.set_listing(dir, entries);
        self
    }

    pub fn with_failing(mut self, path: RemotePath) -> Self {
        self.failing.insert(path);
        self
    }

    pub fn with_failing_listing(mut self, dir: &[&str]) -> Self {
        self.failing_listings.insert(to_dir(dir));
        self
    }

    pub fn with_delay(mut self, path: RemotePath, delay: Duration) -> Self {
        self.delays.insert(path, delay);
        self
    }

    pub fn set_listing(&self, dir: &[&str], entries: Vec<RawEntry>) {
        lock(&self.listings).insert(to_dir(dir), entries);
    }

    pub fn requests(&self) -> Vec<Request> {
        lock(&self.requests).clone()
    }

    pub fn completed(&self) -> Vec<Request> {
        lock(&self.completed).clone()
    }

    pub fn listed(&self) -> Vec<Vec<String>> {
        lock(&self.listed).clone()
    }

    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
        lock(&self.completed).clear();
    }

    async fn handle(&self, request: Request) -> Result<(), TransportError> {
        tracing::trace!("memory transport received: {}", request);

        lock(&self.requests).push(request.clone());

        let source = request.source().clone();
        if let Some(delay) = self.delays.get(&source) {
            tokio::time::sleep(*delay).await;
        }

        let result = if self.failing.contains(&source) {
            Err(TransportError::Status {
                path: source.to_string(),
                status: 500,
            })
        } else if source.collection != Collection::Trash {
            Err(TransportError::Status {
                path: source.to_string(),
                status: 403,
            })
        } else {
            self.take(&source)
        };

        lock(&self.completed).push(request);

        result
    }

    fn take(&self, path: &RemotePath) -> Result<(), TransportError> {
        let mut listings = lock(&self.listings);
        if path.is_collection() {
            listings.clear();
            listings.insert(Vec::new(), Vec::new());
            return Ok(());
        }

        let not_found = || TransportError::Status {
            path: path.to_string(),
            status: 404,
        };

        let (name, parent) = path.segments.split_last().ok_or_else(not_found)?;

        let entries = listings.get_mut(parent).ok_or_else(not_found)?;
        let index = entries
            .iter()
            .position(|entry| &entry.name == name)
            .ok_or_else(not_found)?;

        entries.remove(index);
        listings.retain(|dir, _| !dir.starts_with(&path.segments));

        Ok(())
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn list(&self, dir: &[String]) -> Result<Vec<RawEntry>, TransportError> {
        lock(&self.listed).push(dir.to_vec());

        let path = format!("/{}", dir.join("/"));
        if self.failing_listings.contains(dir) {
            return Err(TransportError::Request(
                path,
                "connection refused".to_string(),
            ));
        }

        lock(&self.listings)
            .get(dir)
            .cloned()
            .ok_or(TransportError::Status { path, status: 404 })
    }

    async fn remove(&self, path: &RemotePath) -> Result<(), TransportError> {
        self.handle(Request::Remove(path.clone())).await
    }

    async fn move_to(
        &self,
        source: &RemotePath,
        destination: &RemotePath,
    ) -> Result<(), TransportError> {
        self.handle(Request::Move {
            source: source.clone(),
            destination: destination.clone(),
        })
        .await
    }
}

fn to_dir(dir: &[&str]) -> Vec<String> {
    dir.iter().map(|segment| segment.to_string()).collect()
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod test {
    use super::MemoryTransport;
    use crate::transport::{Collection, RawEntry, RawKind, RemotePath, Transport};

    fn raw(id: u64, name: &str) -> RawEntry {
        RawEntry {
            id,
            kind: RawKind::File,
            name: name.to_string(),
            mtime: 1,
            mimetype: "text/plain".to_string(),
            etag: "etag".to_string(),
            permissions: None,
            size: None,
        }
    }

    #[tokio::test]
    async fn remove_takes_entry_from_listing() {
        let transport = MemoryTransport::default()
            .with_listing(&[], vec![raw(1, "a.d1"), raw(2, "b.d2")]);

        let path = RemotePath::new(Collection::Trash, vec!["a.d1".to_string()]);
        transport.remove(&path).await.unwrap();

        let listing = transport.list(&[]).await.unwrap();
        assert_eq!(vec![raw(2, "b.d2")], listing);

        assert!(transport.remove(&path).await.is_err());
        assert_eq!(2, transport.requests().len());
    }

    #[tokio::test]
    async fn remove_collection_clears_everything() {
        let transport = MemoryTransport::default()
            .with_listing(&[], vec![raw(1, "dir.d1")])
            .with_listing(&["dir.d1"], vec![raw(2, "inner")]);

        transport
            .remove(&RemotePath::collection(Collection::Trash))
            .await
            .unwrap();

        assert!(transport.list(&[]).await.unwrap().is_empty());
        assert!(transport.list(&["dir.d1".to_string()]).await.is_err());
    }
}
