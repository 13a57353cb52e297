use crate::batch::BatchKind;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Batch(BatchKind, BatchScope),
    Load(Vec<String>),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BatchScope {
    Entry(u64),
    Selected,
}
