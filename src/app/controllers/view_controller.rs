use super::super::*;

pub(in crate::app) fn execute(app: &mut App, action: Action) {
    match action {
        Action::ScrollUp => app.scroll_log_up(),
        Action::ScrollDown => app.scroll_log_down(),
        Action::PageUp => app.page_log_up(),
        Action::PageDown => app.page_log_down(),
        Action::ScrollTop => app.scroll_log_top(),
        Action::ScrollBottom => app.scroll_log_bottom(),
        Action::ShowHelp => app.show_help(),
        Action::CycleTheme => app.cycle_theme(),
        _ => unreachable!("non-view action: {:?}", action),
    }
}
