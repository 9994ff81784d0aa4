use ratatui::Frame;
use ratatui::layout::Rect;

/// A panel of the chat screen.
///
/// Components are rebuilt every frame from borrowed core state and render
/// into the `Rect` the layout gave them.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
