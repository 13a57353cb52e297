use self::{selection::Selection, view::DirectoryView};

pub mod entry;
pub mod selection;
pub mod view;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Model {
    pub selection: Selection,
    pub state: ViewState,
    pub view: DirectoryView,
}

impl Model {
    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(self.view.entries())
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ViewState {
    Loading,
    Processing,
    #[default]
    Ready,
}
