/// A resolved user intent, decoupled from the raw key event that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Open the add-card form at the bottom of a column (0-based).
    OpenAddForm(usize),
    InputChar(char),
    InputBackspace,
    InputLeft,
    InputRight,
    InputHome,
    InputEnd,
    InputDeleteWord,
    InputConfirm,
    InputCancel,
    Quit,
    None,
}
