use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::MoveUp => app.move_cursor(-1, 0),
        InputAction::MoveDown => app.move_cursor(1, 0),
        InputAction::MoveLeft => app.move_cursor(0, -1),
        InputAction::MoveRight => app.move_cursor(0, 1),
        InputAction::SelectCard(index) => app.select_card(index),
        InputAction::Confirm => app.activate_primary(),
        InputAction::Cancel => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.clear_selection();
            }
        }
        InputAction::Draw => app.draw_penalty(),
        InputAction::Flush => app.flush_hand(),
        InputAction::Continue => app.continue_run(),
        InputAction::ToMenu => app.to_menu(),
        InputAction::ToggleLocale => app.toggle_locale(),
    }
}
