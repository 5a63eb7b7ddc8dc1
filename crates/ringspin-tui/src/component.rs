use ratatui::layout::Rect;
use ratatui::Frame;

use crate::action::Action;

/// A region of the main screen. Popups sit outside this trait and take keys
/// directly while open.
pub trait Component {
    /// React to a dispatched action, optionally chaining a follow-up.
    fn update(&mut self, _action: &Action) -> Action {
        Action::None
    }

    fn render(&self, frame: &mut Frame, area: Rect);
}
