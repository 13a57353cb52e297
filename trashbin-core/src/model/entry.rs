use crate::{
    codec,
    permission::{self, Permissions},
    transport::{RawEntry, RawKind},
};

pub const DIRECTORY_MIME_TYPE: &str = "httpd/unix-directory";

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum EntryKind {
    Directory,
    #[default]
    File,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrashEntry {
    pub id: u64,
    pub kind: EntryKind,
    pub stored_name: String,
    pub display_name: String,
    pub deleted_at: u64,
    pub mtime: u64,
    pub mime_type: String,
    pub etag: String,
    pub permissions: Permissions,
    pub size: Option<u64>,
}

impl TrashEntry {
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Deletion timestamp carried by the stored name, if any.
    pub fn marker(&self) -> Option<u64> {
        codec::decode(&self.stored_name).1
    }

    /// Decodes a listing item. Only entries at the trash root carry a
    /// deletion marker, names below are taken as they are.
    pub fn from_raw(raw: RawEntry, is_root: bool) -> Self {
        let (display_name, marker) = if is_root {
            codec::decode(&raw.name)
        } else {
            (raw.name.clone(), None)
        };
        let kind = match raw.kind {
            RawKind::Dir => EntryKind::Directory,
            RawKind::File => EntryKind::File,
        };

        let mime_type = if kind == EntryKind::Directory {
            DIRECTORY_MIME_TYPE.to_owned()
        } else {
            raw.mimetype
        };

        let size = match kind {
            EntryKind::Directory => None,
            EntryKind::File => raw.size,
        };

        let reported = Permissions::from_bits_truncate(raw.permissions.unwrap_or_default());

        Self {
            id: raw.id,
            kind,
            stored_name: raw.name,
            display_name,
            deleted_at: marker.unwrap_or(raw.mtime),
            mtime: raw.mtime,
            mime_type,
            etag: raw.etag,
            permissions: permission::normalize(reported),
            size,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        permission::TRASH_PERMISSIONS,
        transport::{RawEntry, RawKind},
    };

    use super::{EntryKind, TrashEntry, DIRECTORY_MIME_TYPE};

    #[test]
    fn from_raw_file_at_root() {
        let entry = TrashEntry::from_raw(
            RawEntry {
                id: 1,
                kind: RawKind::File,
                name: "One.txt.d11111".to_string(),
                mtime: 11111000,
                mimetype: "text/plain".to_string(),
                etag: "abc".to_string(),
                permissions: Some(31),
                size: None,
            },
            true,
        );

        assert_eq!(1, entry.id);
        assert_eq!(EntryKind::File, entry.kind);
        assert_eq!("One.txt.d11111", entry.stored_name);
        assert_eq!("One.txt", entry.display_name);
        assert_eq!(11111, entry.deleted_at);
        assert_eq!(11111000, entry.mtime);
        assert_eq!("text/plain", entry.mime_type);
        assert_eq!("abc", entry.etag);
        assert_eq!(TRASH_PERMISSIONS, entry.permissions);
        assert_eq!(None, entry.size);
        assert_eq!(Some(11111), entry.marker());
    }

    #[test]
    fn from_raw_file_in_subdirectory() {
        let entry = TrashEntry::from_raw(
            RawEntry {
                id: 1,
                kind: RawKind::File,
                name: "One.txt".to_string(),
                mtime: 11111000,
                mimetype: "text/plain".to_string(),
                etag: "abc".to_string(),
                permissions: None,
                size: Some(512),
            },
            false,
        );

        assert_eq!("One.txt", entry.stored_name);
        assert_eq!("One.txt", entry.display_name);
        assert_eq!(11111000, entry.deleted_at);
        assert_eq!(None, entry.marker());
        assert_eq!(Some(512), entry.size);
    }

    #[test]
    fn from_raw_keeps_marker_like_names_below_root() {
        let entry = TrashEntry::from_raw(
            RawEntry {
                id: 7,
                kind: RawKind::File,
                name: "report.d2024".to_string(),
                mtime: 5,
                mimetype: "text/plain".to_string(),
                etag: "x".to_string(),
                permissions: None,
                size: None,
            },
            false,
        );

        assert_eq!("report.d2024", entry.display_name);
        assert_eq!(5, entry.deleted_at);
    }

    #[test]
    fn from_raw_directory() {
        let entry = TrashEntry::from_raw(
            RawEntry {
                id: 4,
                kind: RawKind::Dir,
                name: "somedir.d99999".to_string(),
                mtime: 99999000,
                mimetype: String::new(),
                etag: "456".to_string(),
                permissions: Some(1),
                size: Some(4096),
            },
            true,
        );

        assert!(entry.is_directory());
        assert_eq!("somedir", entry.display_name);
        assert_eq!(DIRECTORY_MIME_TYPE, entry.mime_type);
        assert_eq!(TRASH_PERMISSIONS, entry.permissions);
        assert_eq!(None, entry.size);
    }
}
