use std::fmt::Display;

use futures::future::join_all;

use crate::{
    error::TrashError,
    model::{entry::TrashEntry, view::DirectoryView, Model},
    notify::FailureSummary,
    transport::{self, Collection, RemotePath, Request, Transport, TransportError},
};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BatchKind {
    Delete,
    Restore,
}

impl BatchKind {
    /// Only purging can address the whole trash collection at once. A
    /// restore always moves entry by entry.
    pub fn collapses(&self) -> bool {
        matches!(self, BatchKind::Delete)
    }

    pub fn progressive(&self) -> &'static str {
        match self {
            BatchKind::Delete => "deleting",
            BatchKind::Restore => "restoring",
        }
    }

    fn request(&self, view: &DirectoryView, entry: &TrashEntry) -> Request {
        match self {
            BatchKind::Delete => Request::Remove(view.trash_path(entry)),
            BatchKind::Restore => Request::Move {
                source: view.trash_path(entry),
                destination: view.restore_path(entry),
            },
        }
    }
}

impl Display for BatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchKind::Delete => write!(f, "delete"),
            BatchKind::Restore => write!(f, "restore"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BatchPlan {
    Collection { ids: Vec<u64>, request: Request },
    Entries(Vec<(u64, Request)>),
}

impl BatchPlan {
    pub fn requests(&self) -> Vec<&Request> {
        match self {
            BatchPlan::Collection { request, .. } => vec![request],
            BatchPlan::Entries(requests) => requests.iter().map(|(_, request)| request).collect(),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self, BatchPlan::Collection { .. })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchReport {
    pub collapsed: bool,
    pub failures: Vec<TrashError>,
    pub kind: BatchKind,
    pub requested: Vec<u64>,
    pub succeeded: Vec<u64>,
    pub summary: Option<FailureSummary>,
}

impl BatchReport {
    pub fn empty(kind: BatchKind) -> Self {
        Self {
            collapsed: false,
            failures: Vec::new(),
            kind,
            requested: Vec::new(),
            succeeded: Vec::new(),
            summary: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn error(&self) -> Option<TrashError> {
        if self.failures.is_empty() {
            None
        } else {
            Some(TrashError::Aggregate(self.failures.clone()))
        }
    }

    pub fn failed(&self) -> Vec<u64> {
        self.failures
            .iter()
            .flat_map(|failure| match failure {
                TrashError::CollectionOperationFailed { ids, .. } => ids.clone(),
                TrashError::EntryOperationFailed { id, .. } => vec![*id],
                _ => Vec::new(),
            })
            .collect()
    }
}

/// Decides which requests a batch over `ids` issues. With `collapse` set, a
/// purge of every entry at the trash root becomes a single request on the
/// trash collection.
#[tracing::instrument(skip(model))]
pub fn plan(kind: BatchKind, model: &Model, ids: &[u64], collapse: bool) -> BatchPlan {
    let view = &model.view;
    if collapse && kind.collapses() && view.is_root() && model.is_all_selected() {
        tracing::debug!("collapsing {} of {} entries", kind, ids.len());

        return BatchPlan::Collection {
            ids: ids.to_vec(),
            request: Request::Remove(RemotePath::collection(Collection::Trash)),
        };
    }

    let requests: Vec<_> = ids
        .iter()
        .filter_map(|id| view.get(*id))
        .map(|entry| (entry.id, kind.request(view, entry)))
        .collect();

    tracing::debug!("issuing {} {} requests", requests.len(), kind);

    BatchPlan::Entries(requests)
}

/// Issues every request of the plan concurrently and waits until all of them
/// settled. Results are returned in issuance order.
pub async fn execute<T: Transport + ?Sized>(
    transport: &T,
    plan: &BatchPlan,
) -> Vec<Result<(), TransportError>> {
    let requests = plan.requests();
    join_all(
        requests
            .into_iter()
            .map(|request| transport::send(transport, request)),
    )
    .await
}

/// Folds the outcomes into the model. Succeeded entries leave the listing and
/// the selection, failed ones stay where they are.
pub fn apply(
    model: &mut Model,
    kind: BatchKind,
    plan: &BatchPlan,
    outcomes: Vec<Result<(), TransportError>>,
) -> BatchReport {
    match plan {
        BatchPlan::Collection { ids, .. } => apply_collection(model, kind, ids, outcomes),
        BatchPlan::Entries(requests) => apply_entries(model, kind, requests, outcomes),
    }
}

fn apply_collection(
    model: &mut Model,
    kind: BatchKind,
    ids: &[u64],
    outcomes: Vec<Result<(), TransportError>>,
) -> BatchReport {
    let mut report = BatchReport {
        collapsed: true,
        failures: Vec::new(),
        kind,
        requested: ids.to_vec(),
        succeeded: Vec::new(),
        summary: None,
    };

    let outcome = outcomes.into_iter().next().unwrap_or_else(|| {
        Err(TransportError::Request(
            Collection::Trash.as_str().to_owned(),
            "request was not issued".to_owned(),
        ))
    });

    match outcome {
        Ok(()) => {
            model.view.clear();
            model.selection.clear();
            report.succeeded = ids.to_vec();
        }
        Err(source) => {
            tracing::error!("{} of trash collection failed: {}", kind, source);

            report.summary = Some(FailureSummary {
                collection: true,
                kind,
                names: names(&model.view, ids),
            });
            report.failures.push(TrashError::CollectionOperationFailed {
                ids: ids.to_vec(),
                source,
            });
        }
    }

    report
}

fn apply_entries(
    model: &mut Model,
    kind: BatchKind,
    requests: &[(u64, Request)],
    outcomes: Vec<Result<(), TransportError>>,
) -> BatchReport {
    let mut report = BatchReport {
        collapsed: false,
        failures: Vec::new(),
        kind,
        requested: requests.iter().map(|(id, _)| *id).collect(),
        succeeded: Vec::new(),
        summary: None,
    };

    for ((id, request), outcome) in requests.iter().zip(outcomes) {
        match outcome {
            Ok(()) => report.succeeded.push(*id),
            Err(source) => {
                tracing::error!("{} failed: {}", request, source);

                let name = model
                    .view
                    .get(*id)
                    .map(|entry| entry.display_name.clone())
                    .unwrap_or_else(|| id.to_string());

                report.failures.push(TrashError::EntryOperationFailed {
                    id: *id,
                    name,
                    source,
                });
            }
        }
    }

    let failed = report.failed();
    if !failed.is_empty() {
        report.summary = Some(FailureSummary {
            collection: false,
            kind,
            names: names(&model.view, &failed),
        });
    }

    model.view.remove(&report.succeeded);
    model.selection.retain(model.view.entries());

    report
}

fn names(view: &DirectoryView, ids: &[u64]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| view.get(*id))
        .map(|entry| entry.display_name.clone())
        .collect()
}
