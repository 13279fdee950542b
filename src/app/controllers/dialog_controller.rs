use super::super::*;
use crate::core::actions::Action;

pub(in crate::app) fn execute<T: Transport, H: HostModel>(
    app: &mut App<T, H>,
    action: Action,
    now: Instant,
) {
    match action {
        Action::Refresh => app.refresh(now),
        Action::FocusPath => app.toggle_focus(),
        Action::Cancel => app.cancel(),
        Action::Quit => {
            info!("quit requested");
            app.cancel();
        }
        _ => unreachable!("non-dialog action: {:?}", action),
    }
}
