//! Mapping of crossterm events onto scene actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use glam::Vec2;
use ratatui::layout::{Position, Rect};

/// What a key press asks for while browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    EditText,
    ToggleHearts,
    ToggleStars,
    ToggleMoon,
    FireworkShow,
    CycleSpeed,
}

pub fn key_action(key: KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc | KeyCode::Char('q'))
        | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => Some(Action::Quit),
        (_, KeyCode::Char('e')) => Some(Action::EditText),
        (_, KeyCode::Char('h')) => Some(Action::ToggleHearts),
        (_, KeyCode::Char('s')) => Some(Action::ToggleStars),
        (_, KeyCode::Char('m')) => Some(Action::ToggleMoon),
        (_, KeyCode::Char('f')) => Some(Action::FireworkShow),
        (_, KeyCode::Char('v')) => Some(Action::CycleSpeed),
        _ => None,
    }
}

/// Key handling inside the footer text editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Insert(char),
    Backspace,
    Apply,
    Cancel,
}

pub fn edit_action(key: KeyEvent) -> Option<EditAction> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) | (_, KeyCode::Esc) => {
            Some(EditAction::Cancel)
        }
        (_, KeyCode::Enter) => Some(EditAction::Apply),
        (_, KeyCode::Backspace) => Some(EditAction::Backspace),
        (_, KeyCode::Char(c)) if !c.is_control() => Some(EditAction::Insert(c)),
        _ => None,
    }
}

/// Pointer changes derived from a mouse event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move(Vec2),
    Leave,
    Burst(Vec2),
}

/// Translate a mouse event over `canvas` into scene pixels.
///
/// Each terminal cell is `cell` scene pixels; positions are taken at the
/// cell center.
pub fn pointer_event(mouse: MouseEvent, canvas: Rect, cell: Vec2) -> Option<PointerEvent> {
    let inside = canvas.contains(Position::new(mouse.column, mouse.row));
    let at = Vec2::new(
        f32::from(mouse.column.saturating_sub(canvas.x)) + 0.5,
        f32::from(mouse.row.saturating_sub(canvas.y)) + 0.5,
    ) * cell;

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) if inside => Some(PointerEvent::Move(at)),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(PointerEvent::Leave),
        MouseEventKind::Down(MouseButton::Left) if inside => Some(PointerEvent::Burst(at)),
        _ => None,
    }
}
