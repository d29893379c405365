use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Commands available while no overlay is open. Overlay-local keys (confirm,
/// undo selection, form editing) are handled by the overlay itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiCommand {
    Quit,
    SelectNextModule,
    SelectPreviousModule,
    SelectNextItem,
    SelectPreviousItem,
    ActivateSelection,
    TriggerPinned(usize),
    TogglePinSelected,
    OpenUndoPanel,
    CancelOperation,
    ClearLogs,
    Reconnect,
    ScrollLogsUp,
    ScrollLogsDown,
}

pub fn map_key_to_command(key: KeyEvent) -> Option<UiCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiCommand::Quit);
    }
    if key.code == KeyCode::Esc {
        return Some(UiCommand::Quit);
    }

    match key.code {
        KeyCode::Down => Some(UiCommand::SelectNextItem),
        KeyCode::Up => Some(UiCommand::SelectPreviousItem),
        KeyCode::Right => Some(UiCommand::SelectNextModule),
        KeyCode::Left => Some(UiCommand::SelectPreviousModule),
        KeyCode::Enter => Some(UiCommand::ActivateSelection),
        KeyCode::PageUp => Some(UiCommand::ScrollLogsUp),
        KeyCode::PageDown => Some(UiCommand::ScrollLogsDown),
        KeyCode::Char('p') => Some(UiCommand::TogglePinSelected),
        KeyCode::Char('u') => Some(UiCommand::OpenUndoPanel),
        KeyCode::Char('x') => Some(UiCommand::CancelOperation),
        KeyCode::Char('l') => Some(UiCommand::ClearLogs),
        KeyCode::Char('r') => Some(UiCommand::Reconnect),
        KeyCode::Char(digit @ '1'..='9') => {
            let slot = digit as usize - '1' as usize;
            Some(UiCommand::TriggerPinned(slot))
        }
        _ => None,
    }
}
