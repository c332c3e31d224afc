use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    SelectCard(usize),
    Confirm,
    Cancel,
    Draw,
    Flush,
    Continue,
    ToMenu,
    ToggleLocale,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::Cancel,
        KeyCode::Up => InputAction::MoveUp,
        KeyCode::Down => InputAction::MoveDown,
        KeyCode::Left => InputAction::MoveLeft,
        KeyCode::Right => InputAction::MoveRight,
        KeyCode::Enter => InputAction::Confirm,
        KeyCode::Char(' ') => InputAction::Confirm,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Char('d') => InputAction::Draw,
        KeyCode::Char('f') => InputAction::Flush,
        KeyCode::Char('n') => InputAction::Continue,
        KeyCode::Char('m') => InputAction::ToMenu,
        KeyCode::Char('l') => InputAction::ToggleLocale,
        KeyCode::Char(digit @ '1'..='5') => {
            InputAction::SelectCard(digit as usize - '1' as usize)
        }
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn maps_basic_actions() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)),
            InputAction::Draw
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('f'), KeyModifiers::NONE)),
            InputAction::Flush
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            InputAction::Quit
        );
    }

    #[test]
    fn maps_hand_digits_to_zero_based_slots() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE)),
            InputAction::SelectCard(0)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE)),
            InputAction::SelectCard(4)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('6'), KeyModifiers::NONE)),
            InputAction::None
        );
    }

    #[test]
    fn enter_and_space_both_confirm() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            InputAction::Confirm
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)),
            InputAction::Confirm
        );
    }
}
