use crate::{
    action::{Action, BatchScope},
    batch::BatchKind,
    error::TrashError,
    message::Message,
    model::{view, Model, ViewState},
};

/// Applies a message to the model. Selection changes happen in place, loading
/// and batches are handed back as actions for the async side.
#[tracing::instrument(skip(model))]
pub fn update(model: &mut Model, message: &Message) -> Result<Vec<Action>, TrashError> {
    if model.state != ViewState::Ready {
        tracing::warn!("skipping {:?} while view is {:?}", message, model.state);
        return Err(TrashError::Busy);
    }

    let actions = match message {
        Message::ClearSelection => {
            model.selection.clear();
            Vec::new()
        }
        Message::DeleteEntry(id) => entry(model, BatchKind::Delete, *id),
        Message::DeleteSelected => selected(model, BatchKind::Delete),
        Message::Navigate(path) => vec![Action::Load(view::parse_path(path)?)],
        Message::Reload => vec![Action::Load(model.view.current_path().to_vec())],
        Message::RestoreEntry(id) => entry(model, BatchKind::Restore, *id),
        Message::RestoreSelected => selected(model, BatchKind::Restore),
        Message::SelectAll => {
            model.selection.select_all(model.view.entries());
            Vec::new()
        }
        Message::Toggle(id) => {
            model.selection.toggle(*id, model.view.entries());
            Vec::new()
        }
        Message::ToggleAll => {
            model.selection.toggle_all(model.view.entries());
            Vec::new()
        }
    };

    Ok(actions)
}

fn entry(model: &Model, kind: BatchKind, id: u64) -> Vec<Action> {
    if model.view.get(id).is_none() {
        tracing::warn!("skipping {} of unknown entry: {}", kind, id);
        return Vec::new();
    }

    vec![Action::Batch(kind, BatchScope::Entry(id))]
}

fn selected(model: &Model, kind: BatchKind) -> Vec<Action> {
    if model.selection.selected_count() == 0 {
        tracing::debug!("nothing selected to {}", kind);
        return Vec::new();
    }

    vec![Action::Batch(kind, BatchScope::Selected)]
}
