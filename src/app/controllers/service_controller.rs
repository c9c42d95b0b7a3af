use super::super::*;
use crate::system::ServiceAction;

pub(in crate::app) fn execute(app: &mut App, action: Action) {
    match action {
        Action::StartService => app.control_service(ServiceAction::Start),
        Action::StopService => app.control_service(ServiceAction::Stop),
        Action::RestartService => app.control_service(ServiceAction::Restart),
        Action::Refresh => {
            app.refresh_status();
            app.set_toast("Refreshed");
        }
        Action::EditConfig => app.start_edit_config(),
        Action::CreateUser => app.open_user_form(),
        _ => unreachable!("non-service action: {:?}", action),
    }
}
