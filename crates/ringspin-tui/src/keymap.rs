use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, SpinnerAction};

/// Key bindings shown in the status bar and help popup, as (keys, description).
pub const BINDINGS: &[(&str, &str)] = &[
    ("space/s", "start or stop the animation"),
    ("x", "stop and hide"),
    ("v", "show or hide the ring"),
    ("r", "re-render the ring"),
    ("←/→", "move the active spoke"),
    ("l", "toggle the log panel"),
    ("h/?", "help"),
    ("q/Ctrl+c", "quit"),
];

/// Resolve a key event to an action.
pub fn resolve_key(key: KeyEvent) -> Action {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Action::Quit,
        (_, KeyCode::Char('q')) => Action::Quit,
        (_, KeyCode::Char(' ')) | (_, KeyCode::Char('s')) => Action::Spinner(SpinnerAction::Toggle),
        (_, KeyCode::Char('x')) => Action::Spinner(SpinnerAction::StopAndHide),
        (_, KeyCode::Char('v')) => Action::Spinner(SpinnerAction::ToggleVisibility),
        (_, KeyCode::Char('r')) => Action::Spinner(SpinnerAction::Rerender),
        (_, KeyCode::Right) => Action::Spinner(SpinnerAction::StepForward),
        (_, KeyCode::Left) => Action::Spinner(SpinnerAction::StepBack),
        (_, KeyCode::Char('l')) => Action::ToggleLogPanel,
        (_, KeyCode::Char('h')) | (_, KeyCode::Char('?')) | (_, KeyCode::F(1)) => Action::ShowHelp,
        _ => Action::None,
    }
}

/// Compact hint line for the status bar.
pub const HINTS: &str = "space:spin v:show ←/→:step h:help q:quit";
