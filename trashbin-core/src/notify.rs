use std::{fmt::Display, sync::Mutex};

use crate::batch::BatchKind;

/// Human readable report of a batch that did not fully succeed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FailureSummary {
    pub collection: bool,
    pub kind: BatchKind,
    pub names: Vec<String>,
}

impl Display for FailureSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.collection {
            return write!(f, "Error while {} all entries of the trash bin", self.kind.progressive());
        }

        let noun = if self.names.len() == 1 { "entry" } else { "entries" };
        write!(
            f,
            "Error while {} {} {}: {}",
            self.kind.progressive(),
            self.names.len(),
            noun,
            self.names.join(", ")
        )
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, summary: &FailureSummary);
}

/// Logs every failure summary and keeps it until the ui picks it up.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    summaries: Mutex<Vec<FailureSummary>>,
}

impl CollectingNotifier {
    pub fn summaries(&self) -> Vec<FailureSummary> {
        match self.summaries.lock() {
            Ok(summaries) => summaries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn take(&self) -> Vec<FailureSummary> {
        match self.summaries.lock() {
            Ok(mut summaries) => std::mem::take(&mut *summaries),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, summary: &FailureSummary) {
        tracing::error!("{}", summary);

        match self.summaries.lock() {
            Ok(mut summaries) => summaries.push(summary.clone()),
            Err(poisoned) => poisoned.into_inner().push(summary.clone()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{CollectingNotifier, FailureSummary, Notifier};
    use crate::batch::BatchKind;

    #[test]
    fn summary_lists_names() {
        let summary = FailureSummary {
            collection: false,
            kind: BatchKind::Restore,
            names: vec!["One.txt".to_string(), "somedir".to_string()],
        };

        assert_eq!(
            "Error while restoring 2 entries: One.txt, somedir",
            summary.to_string()
        );

        let summary = FailureSummary {
            collection: false,
            kind: BatchKind::Delete,
            names: vec!["One.txt".to_string()],
        };

        assert_eq!("Error while deleting 1 entry: One.txt", summary.to_string());
    }

    #[test]
    fn summary_for_collection() {
        let summary = FailureSummary {
            collection: true,
            kind: BatchKind::Delete,
            names: vec!["One.txt".to_string(), "Two.jpg".to_string()],
        };

        assert_eq!(
            "Error while deleting all entries of the trash bin",
            summary.to_string()
        );
    }

    #[test]
    fn collecting_notifier_take() {
        let notifier = CollectingNotifier::default();
        let summary = FailureSummary {
            collection: false,
            kind: BatchKind::Delete,
            names: vec!["One.txt".to_string()],
        };

        notifier.notify(&summary);
        assert_eq!(vec![summary.clone()], notifier.summaries());
        assert_eq!(vec![summary], notifier.take());
        assert!(notifier.summaries().is_empty());
    }
}
