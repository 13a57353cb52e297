use std::collections::HashSet;

use crate::{
    error::TrashError,
    model::{entry::TrashEntry, view, Model},
    transport::Transport,
};

/// Fetches and decodes the listing of `path`. Nothing of the model is touched,
/// so a failing request leaves the current view as it is.
#[tracing::instrument(skip(transport))]
pub async fn load<T: Transport + ?Sized>(
    transport: &T,
    path: &[String],
) -> Result<Vec<TrashEntry>, TrashError> {
    let raw = transport
        .list(path)
        .await
        .map_err(|source| TrashError::ListingFailed {
            path: view::to_dir(path),
            source,
        })?;

    let is_root = path.is_empty();
    let mut ids = HashSet::new();
    let mut entries = Vec::with_capacity(raw.len());
    for item in raw {
        if !ids.insert(item.id) {
            tracing::warn!("skipping duplicate listing entry: {} ({})", item.name, item.id);
            continue;
        }

        entries.push(TrashEntry::from_raw(item, is_root));
    }

    tracing::debug!("loaded {} entries for {:?}", entries.len(), path);

    Ok(entries)
}

/// Replaces the current listing. Every previous entry and selection is
/// invalidated.
pub fn apply(model: &mut Model, path: Vec<String>, entries: Vec<TrashEntry>) {
    model.view.replace(path, entries);
    model.selection.clear();
}

#[cfg(test)]
mod test {
    use crate::{
        error::TrashError,
        model::Model,
        transport::{memory::MemoryTransport, RawEntry, RawKind},
    };

    fn raw(id: u64, name: &str) -> RawEntry {
        RawEntry {
            id,
            kind: RawKind::File,
            name: name.to_string(),
            mtime: id * 1000,
            mimetype: "text/plain".to_string(),
            etag: format!("etag{}", id),
            permissions: Some(31),
            size: None,
        }
    }

    #[tokio::test]
    async fn load_skips_duplicate_ids() {
        let transport = MemoryTransport::default().with_listing(
            &[],
            vec![raw(1, "a.d1"), raw(1, "b.d2"), raw(2, "c.d3")],
        );

        let entries = super::load(&transport, &[]).await.unwrap();

        assert_eq!(2, entries.len());
        assert_eq!("a", entries[0].display_name);
        assert_eq!("c", entries[1].display_name);
    }

    #[tokio::test]
    async fn load_failure_is_listing_failed() {
        let transport = MemoryTransport::default().with_failing_listing(&["subdir"]);

        let result = super::load(&transport, &["subdir".to_string()]).await;

        assert!(matches!(
            result,
            Err(TrashError::ListingFailed { ref path, .. }) if path == "/subdir"
        ));
    }

    #[test]
    fn apply_clears_selection() {
        let mut model = Model::default();
        let entries = vec![crate::model::entry::TrashEntry {
            id: 1,
            ..Default::default()
        }];

        super::apply(&mut model, Vec::new(), entries.clone());
        model.selection.select_all(model.view.entries());
        assert_eq!(1, model.selection.selected_count());

        super::apply(&mut model, vec!["subdir".to_string()], entries);
        assert_eq!(0, model.selection.selected_count());
        assert_eq!(2, model.view.breadcrumbs().len());
    }
}
