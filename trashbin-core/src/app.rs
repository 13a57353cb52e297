use crate::{
    action::{Action, BatchScope},
    batch::{self, BatchKind, BatchReport},
    error::TrashError,
    listing,
    message::Message,
    model::{Model, ViewState},
    notify::Notifier,
    transport::Transport,
    update::update,
};

/// Owns the model of the trash bin and drives every listing and batch against
/// the transport. Methods take `&mut self`, so a batch and a listing can never
/// overlap on the same view.
pub struct TrashBin<T: Transport, N: Notifier> {
    model: Model,
    notifier: N,
    transport: T,
}

impl<T: Transport, N: Notifier> TrashBin<T, N> {
    pub fn new(transport: T, notifier: N) -> Self {
        Self {
            model: Model::default(),
            notifier,
            transport,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs the message through update and executes the resulting actions.
    /// Reports of every batch that ran are returned in order.
    #[tracing::instrument(skip(self))]
    pub async fn dispatch(&mut self, message: Message) -> Result<Vec<BatchReport>, TrashError> {
        let actions = update(&mut self.model, &message)?;

        let mut reports = Vec::new();
        for action in actions {
            match action {
                Action::Batch(kind, scope) => reports.push(self.run_batch(kind, scope).await),
                Action::Load(path) => self.load(path).await?,
            }
        }

        Ok(reports)
    }

    pub async fn load_directory(&mut self, path: &str) -> Result<(), TrashError> {
        self.dispatch(Message::Navigate(path.to_owned())).await?;
        Ok(())
    }

    pub async fn reload(&mut self) -> Result<(), TrashError> {
        self.dispatch(Message::Reload).await?;
        Ok(())
    }

    pub fn toggle(&mut self, id: u64) -> Result<(), TrashError> {
        update(&mut self.model, &Message::Toggle(id))?;
        Ok(())
    }

    pub fn select_all(&mut self) -> Result<(), TrashError> {
        update(&mut self.model, &Message::SelectAll)?;
        Ok(())
    }

    pub fn toggle_all(&mut self) -> Result<(), TrashError> {
        update(&mut self.model, &Message::ToggleAll)?;
        Ok(())
    }

    pub fn clear_selection(&mut self) -> Result<(), TrashError> {
        update(&mut self.model, &Message::ClearSelection)?;
        Ok(())
    }

    pub async fn restore_selected(&mut self) -> Result<BatchReport, TrashError> {
        self.single_report(Message::RestoreSelected, BatchKind::Restore)
            .await
    }

    pub async fn delete_selected(&mut self) -> Result<BatchReport, TrashError> {
        self.single_report(Message::DeleteSelected, BatchKind::Delete)
            .await
    }

    pub async fn restore_entry(&mut self, id: u64) -> Result<BatchReport, TrashError> {
        self.single_report(Message::RestoreEntry(id), BatchKind::Restore)
            .await
    }

    pub async fn delete_entry(&mut self, id: u64) -> Result<BatchReport, TrashError> {
        self.single_report(Message::DeleteEntry(id), BatchKind::Delete)
            .await
    }

    async fn single_report(
        &mut self,
        message: Message,
        kind: BatchKind,
    ) -> Result<BatchReport, TrashError> {
        let report = self.dispatch(message).await?.into_iter().next();
        Ok(report.unwrap_or_else(|| BatchReport::empty(kind)))
    }

    async fn load(&mut self, path: Vec<String>) -> Result<(), TrashError> {
        self.model.state = ViewState::Loading;
        let result = listing::load(&self.transport, &path).await;
        self.model.state = ViewState::Ready;

        match result {
            Ok(entries) => {
                listing::apply(&mut self.model, path, entries);
                Ok(())
            }
            Err(err) => {
                tracing::error!("loading listing failed: {}", err);
                Err(err)
            }
        }
    }

    async fn run_batch(&mut self, kind: BatchKind, scope: BatchScope) -> BatchReport {
        let (ids, collapse) = match scope {
            BatchScope::Entry(id) => (vec![id], false),
            BatchScope::Selected => (self.model.selection.ordered(self.model.view.entries()), true),
        };

        let plan = batch::plan(kind, &self.model, &ids, collapse);

        self.model.state = ViewState::Processing;
        let outcomes = batch::execute(&self.transport, &plan).await;
        self.model.state = ViewState::Ready;

        let report = batch::apply(&mut self.model, kind, &plan, outcomes);
        if let Some(summary) = &report.summary {
            self.notifier.notify(summary);
        }

        tracing::info!(
            "{} finished: {} succeeded, {} failed",
            kind,
            report.succeeded.len(),
            report.failures.len()
        );

        report
    }
}
