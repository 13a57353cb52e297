use std::{cmp::Reverse, str::FromStr};

use url::form_urlencoded::byte_serialize;

use crate::{
    codec,
    error::TrashError,
    permission::{Permissions, TRASH_PERMISSIONS},
    transport::{Collection, RemotePath},
};

use super::entry::TrashEntry;

pub const HOME_LABEL: &str = "Home";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Breadcrumb {
    pub label: String,
    pub dir: String,
}

impl Breadcrumb {
    pub fn href(&self, web_root: &str) -> String {
        let dir = self
            .dir
            .split('/')
            .map(|segment| byte_serialize(segment.as_bytes()).collect::<String>())
            .collect::<Vec<_>>()
            .join("/");

        format!(
            "{}/index.php/apps/files?view=trashbin&dir={}",
            web_root.trim_end_matches('/'),
            dir
        )
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirectoryView {
    breadcrumbs: Vec<Breadcrumb>,
    current_path: Vec<String>,
    entries: Vec<TrashEntry>,
}

impl Default for DirectoryView {
    fn default() -> Self {
        Self {
            breadcrumbs: build_breadcrumbs(&[]),
            current_path: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl DirectoryView {
    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.breadcrumbs
    }

    pub fn current_path(&self) -> &[String] {
        &self.current_path
    }

    pub fn dir(&self) -> String {
        to_dir(&self.current_path)
    }

    pub fn entries(&self) -> &[TrashEntry] {
        &self.entries
    }

    pub fn find(&self, stored_name: &str) -> Option<&TrashEntry> {
        self.entries
            .iter()
            .find(|entry| entry.stored_name == stored_name)
    }

    pub fn get(&self, id: u64) -> Option<&TrashEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.current_path.is_empty()
    }

    /// The trash never grants more than reading and deleting, whatever the
    /// listing claims for the directory itself.
    pub fn permissions(&self) -> Permissions {
        TRASH_PERMISSIONS
    }

    /// Address of `entry` inside the trash collection.
    pub fn trash_path(&self, entry: &TrashEntry) -> RemotePath {
        let mut segments = self.current_path.clone();
        segments.push(codec::encode(
            &entry.display_name,
            entry.marker(),
            self.is_root(),
        ));

        RemotePath::new(Collection::Trash, segments)
    }

    /// Restoring keeps the stored name and only swaps the collection.
    pub fn restore_path(&self, entry: &TrashEntry) -> RemotePath {
        RemotePath::new(Collection::Restore, vec![entry.stored_name.clone()])
    }

    pub(crate) fn replace(&mut self, path: Vec<String>, entries: Vec<TrashEntry>) {
        self.breadcrumbs = build_breadcrumbs(&path);
        self.current_path = path;
        self.entries = entries;
    }

    pub(crate) fn remove(&mut self, ids: &[u64]) {
        self.entries.retain(|entry| !ids.contains(&entry.id));
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Splits a user supplied trash directory like `/somedir.d99999/inner` into
/// its segments. Root is empty.
pub fn parse_path(path: &str) -> Result<Vec<String>, TrashError> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(TrashError::InvalidPath(path.to_owned())),
            _ => segments.push(segment.to_owned()),
        }
    }

    Ok(segments)
}

pub fn to_dir(segments: &[String]) -> String {
    format!("/{}", segments.join("/"))
}

fn build_breadcrumbs(path: &[String]) -> Vec<Breadcrumb> {
    let mut breadcrumbs = vec![Breadcrumb {
        label: HOME_LABEL.to_owned(),
        dir: "/".to_owned(),
    }];

    for (index, segment) in path.iter().enumerate() {
        breadcrumbs.push(Breadcrumb {
            label: segment.to_owned(),
            dir: to_dir(&path[..=index]),
        });
    }

    breadcrumbs
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortMode {
    #[default]
    Mtime,
    Name,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "mtime" => Ok(SortMode::Mtime),
            "name" => Ok(SortMode::Name),
            _ => Err(format!("unknown sort mode: {}", value)),
        }
    }
}

/// Presentation order for a listing. Newest deletions come first by default.
pub fn sorted(entries: &[TrashEntry], mode: SortMode) -> Vec<&TrashEntry> {
    let mut sorted: Vec<_> = entries.iter().collect();
    match mode {
        SortMode::Mtime => sorted.sort_by_key(|entry| Reverse(entry.mtime)),
        SortMode::Name => sorted.sort_by(|a, b| {
            a.display_name
                .to_ascii_uppercase()
                .cmp(&b.display_name.to_ascii_uppercase())
        }),
    }
    sorted
}
