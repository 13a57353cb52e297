pub use app::TrashBin;
pub use batch::{BatchKind, BatchPlan, BatchReport};
pub use error::TrashError;
pub use message::Message;
pub use model::{
    entry::{EntryKind, TrashEntry},
    selection::Selection,
    view::{Breadcrumb, DirectoryView, SortMode},
    Model, ViewState,
};
pub use notify::{CollectingNotifier, FailureSummary, Notifier};
pub use permission::Permissions;
pub use settings::Settings;
pub use transport::{Collection, RawEntry, RawKind, RemotePath, Request, Transport, TransportError};

pub mod action;
mod app;
pub mod batch;
pub mod codec;
pub mod error;
pub mod listing;
pub mod message;
pub mod model;
pub mod notify;
pub mod permission;
pub mod settings;
pub mod transport;
mod update;

pub use update::update;
