/// Intents the ui sends into the trash bin.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    ClearSelection,
    DeleteEntry(u64),
    DeleteSelected,
    Navigate(String),
    Reload,
    RestoreEntry(u64),
    RestoreSelected,
    SelectAll,
    Toggle(u64),
    ToggleAll,
}
