use super::*;
use crate::system::command::fake::FakeRunner;
use crate::system::{FtpUserRequest, ServiceAction, ServiceState};
use ratatui::layout::Rect;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

struct Fixture {
    temp: TempDir,
    conf: PathBuf,
    runner: Rc<FakeRunner>,
    app: App,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let conf = temp.path().join("proftpd.conf");
    fs::write(&conf, "ServerName \"test\"\nPort 2121\n").unwrap();
    let passwd = temp.path().join("passwd");
    fs::write(
        &passwd,
        "root:x:0:0:root:/root:/bin/bash\nalice:x:1000:1000::/home/alice:/bin/sh\n",
    )
    .unwrap();

    let mut config = AppConfig::default();
    config.proftpd.config_paths = vec![temp.path().join("missing.conf"), conf.clone()];
    config.accounts.passwd_file = passwd;
    config.service.privilege_command = "sudo -n".to_string();
    config.editor.command = "nano".to_string();

    let runner = Rc::new(FakeRunner::new());
    let app = App::new_for_test(Box::new(runner.clone()), config);
    Fixture {
        temp,
        conf,
        runner,
        app,
    }
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.dialog_form_char(c);
    }
}

/// 메인 루프 대신 큐에 들어간 권한 작업을 실행
fn run_queued_task(app: &mut App) {
    let task = app
        .take_pending_privileged_task()
        .expect("privileged task should be queued");
    app.run_privileged_task(task);
}

fn fill_user_form(app: &mut App, username: &str, password: &str, folder: &str) {
    app.open_user_form();
    type_text(app, username);
    app.dialog_form_next_focus();
    type_text(app, password);
    app.dialog_form_next_focus();
    type_text(app, folder);
}

fn dialog_text(app: &App) -> (String, String) {
    match &app.dialog {
        Some(DialogKind::Error { title, message }) | Some(DialogKind::Message { title, message }) => {
            (title.clone(), message.clone())
        }
        other => panic!("expected message/error dialog, got {:?}", other),
    }
}

#[test]
fn test_refresh_reads_state_ip_port_and_logs() {
    let mut fx = fixture();
    fx.runner.push_output(0, "active\n");
    fx.runner.push_output(0, "proftpd started\nclient connected\n");

    fx.app.refresh_status();

    assert_eq!(fx.app.server_info.state, ServiceState::Active);
    assert_eq!(fx.app.server_info.ip, "192.0.2.10");
    assert_eq!(fx.app.server_info.port.port, 2121);
    assert_eq!(fx.app.server_info.port.source.as_deref(), Some(fx.conf.as_path()));
    assert!(fx.app.server_info.refreshed_at.is_some());
    assert_eq!(
        fx.app.log_view.lines(),
        &["proftpd started".to_string(), "client connected".to_string()]
    );
    assert_eq!(
        fx.runner.command_lines(),
        vec![
            "systemctl is-active proftpd",
            "journalctl -u proftpd --no-pager -n 100"
        ]
    );
}

#[test]
fn test_refresh_inactive_service_ignores_exit_code() {
    let mut fx = fixture();
    fx.runner.push_output(3, "inactive\n");

    fx.app.execute_action(Action::Refresh);

    assert_eq!(fx.app.server_info.state, ServiceState::Inactive);
    assert_eq!(fx.app.toast_display(), Some("Refreshed"));
}

#[test]
fn test_start_success_toasts_and_refreshes() {
    let mut fx = fixture();
    fx.runner.push_output(0, "");
    fx.runner.push_output(0, "active\n");

    fx.app.execute_action(Action::StartService);
    run_queued_task(&mut fx.app);

    assert!(fx.app.dialog.is_none());
    assert_eq!(fx.app.toast_display(), Some("proftpd started"));
    assert_eq!(fx.app.server_info.state, ServiceState::Active);
    assert_eq!(
        fx.runner.command_lines(),
        vec![
            "sudo -n systemctl start proftpd",
            "systemctl is-active proftpd",
            "journalctl -u proftpd --no-pager -n 100"
        ]
    );
}

#[test]
fn test_restart_failure_shows_raw_output() {
    let mut fx = fixture();
    fx.runner
        .push_output(1, "Job for proftpd.service failed because the control process exited.\n");
    fx.runner.push_output(3, "failed\n");

    fx.app.execute_action(Action::RestartService);
    run_queued_task(&mut fx.app);

    let (title, message) = dialog_text(&fx.app);
    assert_eq!(title, "Error");
    assert!(message.starts_with("systemctl restart proftpd failed."));
    assert!(message.contains("Reason: exit 1"));
    assert!(message.contains("Job for proftpd.service failed because the control process exited."));
    assert!(fx.app.toast_display().is_none());
    // 실패해도 새로고침은 수행
    assert_eq!(fx.app.server_info.state, ServiceState::Failed);
    assert_eq!(fx.runner.command_lines().len(), 3);
}

#[test]
fn test_control_spawn_failure_shows_error() {
    let mut fx = fixture();
    fx.runner.push_spawn_error("No such file or directory");

    fx.app.execute_action(Action::StartService);
    run_queued_task(&mut fx.app);

    let (_, message) = dialog_text(&fx.app);
    assert!(message.contains("Failed to run 'sudo -n systemctl start proftpd'"));
    assert!(message.contains("No such file or directory"));
}

#[test]
fn test_stop_requires_confirmation() {
    let mut fx = fixture();

    fx.app.execute_action(Action::StopService);
    assert!(matches!(
        fx.app.dialog,
        Some(DialogKind::Confirm {
            action: ServiceAction::Stop,
            selected_button: 0,
            ..
        })
    ));
    assert!(fx.runner.command_lines().is_empty());

    // Cancel
    fx.app.dialog_confirm_toggle();
    fx.app.dialog_confirm_enter();
    assert!(fx.app.dialog.is_none());
    assert!(fx.app.take_pending_privileged_task().is_none());

    // OK
    fx.app.execute_action(Action::StopService);
    fx.app.dialog_confirm_enter();
    assert!(fx.app.dialog.is_none());
    assert!(fx.runner.command_lines().is_empty());
    run_queued_task(&mut fx.app);
    assert_eq!(fx.runner.command_lines()[0], "sudo -n systemctl stop proftpd");
    assert_eq!(fx.app.toast_display(), Some("proftpd stopped"));
}

#[test]
fn test_service_actions_wait_for_terminal_handoff() {
    let mut fx = fixture();

    fx.app.execute_action(Action::StartService);

    // 메인 루프가 터미널을 내려놓기 전까지는 아무 명령도 실행하지 않는다
    assert!(fx.runner.command_lines().is_empty());
    assert!(fx.app.privileged_task_needs_terminal());
    let task = fx.app.take_pending_privileged_task().unwrap();
    assert_eq!(task, PrivilegedTask::Service(ServiceAction::Start));
    assert_eq!(task.describe(), "systemctl start");
    assert!(fx.app.take_pending_privileged_task().is_none());

    fx.app.config.service.privilege_command = String::new();
    assert!(!fx.app.privileged_task_needs_terminal());
}

#[test]
fn test_edit_config_queues_first_existing_file() {
    let mut fx = fixture();

    fx.app.execute_action(Action::EditConfig);

    let request = fx.app.take_pending_editor_request().unwrap();
    assert_eq!(request.editor_command, "nano");
    assert_eq!(request.target_path, fx.conf);
    assert!(fx.app.take_pending_editor_request().is_none());
    assert!(fx.app.dialog.is_none());
}

#[test]
fn test_edit_config_without_file_shows_error() {
    let mut fx = fixture();
    fx.app.config.proftpd.config_paths = vec![fx.temp.path().join("nope.conf")];

    fx.app.start_edit_config();

    assert!(fx.app.take_pending_editor_request().is_none());
    let (title, message) = dialog_text(&fx.app);
    assert_eq!(title, "Error");
    assert!(message.starts_with("Edit config failed."));
    assert!(message.contains("nope.conf"));
}

#[test]
fn test_editor_success_rereads_port() {
    let mut fx = fixture();
    fx.app.start_edit_config();
    let request = fx.app.take_pending_editor_request().unwrap();
    fs::write(&fx.conf, "Port 2222\n").unwrap();

    fx.app.apply_editor_result(&request, Ok(()));

    assert_eq!(fx.app.toast_display(), Some("Edited: proftpd.conf"));
    assert_eq!(fx.app.server_info.port.port, 2222);
}

#[test]
fn test_editor_failure_shows_error() {
    let mut fx = fixture();
    fx.app.start_edit_config();
    let request = fx.app.take_pending_editor_request().unwrap();

    fx.app
        .apply_editor_result(&request, Err("nano exited with status 1".to_string()));

    let (_, message) = dialog_text(&fx.app);
    assert!(message.starts_with("Edit config failed."));
    assert!(message.contains("proftpd.conf"));
    assert!(message.contains("Editor error: nano exited with status 1"));
}

#[test]
fn test_user_form_missing_input_keeps_form() {
    let mut fx = fixture();
    fx.app.execute_action(Action::CreateUser);
    type_text(&mut fx.app, "bob");

    fx.app.dialog_form_enter();

    let (title, _) = dialog_text(&fx.app);
    assert_eq!(title, "Missing input");
    assert!(fx.runner.command_lines().is_empty());

    fx.app.close_dialog();
    match &fx.app.dialog {
        Some(DialogKind::UserForm(form)) => assert_eq!(form.username.value, "bob"),
        other => panic!("expected restored form, got {:?}", other),
    }
}

#[test]
fn test_user_form_rejects_unsafe_username() {
    let mut fx = fixture();
    fill_user_form(&mut fx.app, "bo:b", "pw", "/srv/ftp/bob");

    fx.app.dialog_form_enter();

    let (title, message) = dialog_text(&fx.app);
    assert_eq!(title, "Invalid input");
    assert!(message.contains("bo:b"));
    assert!(fx.runner.command_lines().is_empty());
    assert!(fx.app.take_pending_privileged_task().is_none());
}

#[test]
fn test_user_form_creates_user() {
    let mut fx = fixture();
    let folder = fx.temp.path().join("share").join("bob");
    fill_user_form(&mut fx.app, "bob", "s3cret", &folder.to_string_lossy());

    fx.app.dialog_form_enter();

    // 폼은 닫히고 계정 생성은 터미널 인계를 기다린다
    assert!(fx.app.dialog.is_none());
    assert!(fx.runner.command_lines().is_empty());
    assert!(!folder.exists());
    assert_eq!(
        fx.app.pending_privileged_task.as_ref().map(PrivilegedTask::describe),
        Some("create FTP user 'bob'".to_string())
    );
    run_queued_task(&mut fx.app);

    let (title, message) = dialog_text(&fx.app);
    assert_eq!(title, "User created");
    assert!(message.starts_with("User 'bob' created"));
    assert!(folder.is_dir());

    let calls = fx.runner.calls.borrow();
    assert_eq!(calls[0].program, "sudo");
    assert_eq!(calls[0].args[..2], ["-n".to_string(), "useradd".to_string()]);
    assert_eq!(calls[1].stdin.as_deref(), Some("bob:s3cret\n"));
    assert_eq!(calls[2].args[1], "chown");
    // 계정 생성 후 상태/로그 새로고침
    assert_eq!(calls.len(), 5);
    assert_eq!(calls[3].program, "systemctl");

    drop(calls);
    // 성공 후에는 폼이 복원되지 않는다
    fx.app.close_dialog();
    assert!(fx.app.dialog.is_none());
}

#[test]
fn test_user_form_existing_user_shows_message() {
    let mut fx = fixture();
    fill_user_form(&mut fx.app, "alice", "pw", "/srv/ftp/alice");

    fx.app.dialog_form_enter();

    assert!(matches!(fx.app.dialog, Some(DialogKind::Message { .. })));
    let (title, message) = dialog_text(&fx.app);
    assert_eq!(title, "User exists");
    assert_eq!(message, "User 'alice' already exists.");
    assert!(fx.app.take_pending_privileged_task().is_none());
    assert!(fx.runner.command_lines().is_empty());

    // 이름을 고칠 수 있도록 폼을 되돌린다
    fx.app.close_dialog();
    match &fx.app.dialog {
        Some(DialogKind::UserForm(form)) => assert_eq!(form.username.value, "alice"),
        other => panic!("expected restored form, got {:?}", other),
    }
}

#[test]
fn test_queued_user_created_elsewhere_shows_message() {
    let mut fx = fixture();
    let request = FtpUserRequest::from_form("alice", "pw", "/srv/ftp/alice").unwrap();

    fx.app.run_privileged_task(PrivilegedTask::CreateUser(request));

    assert!(matches!(fx.app.dialog, Some(DialogKind::Message { .. })));
    let (title, message) = dialog_text(&fx.app);
    assert_eq!(title, "User exists");
    assert_eq!(message, "User 'alice' already exists.");
    // useradd 없이 새로고침만 실행
    assert_eq!(
        fx.runner.command_lines(),
        vec![
            "systemctl is-active proftpd",
            "journalctl -u proftpd --no-pager -n 100"
        ]
    );
}

#[test]
fn test_user_form_step_failure_reports_output() {
    let mut fx = fixture();
    let folder = fx.temp.path().join("carol");
    fx.runner.push_output(0, "");
    fx.runner.push_output(1, "chpasswd: (user carol) pam_chauthtok() failed\n");
    fill_user_form(&mut fx.app, "carol", "pw", &folder.to_string_lossy());

    fx.app.dialog_form_enter();
    run_queued_task(&mut fx.app);

    let (_, message) = dialog_text(&fx.app);
    assert!(message.starts_with("Failed to create user:"));
    assert!(message.contains("pam_chauthtok() failed"));
    // chown은 실행되지 않음 (useradd, chpasswd, 새로고침 2회)
    assert_eq!(fx.runner.command_lines().len(), 4);
}

#[test]
fn test_user_form_cancel_button() {
    let mut fx = fixture();
    fx.app.open_user_form();
    type_text(&mut fx.app, "bob");
    for _ in 0..3 {
        fx.app.dialog_form_next_focus();
    }
    fx.app.dialog_form_toggle_button();

    fx.app.dialog_form_enter();

    assert!(fx.app.dialog.is_none());
    assert!(fx.runner.command_lines().is_empty());
}

#[test]
fn test_user_form_editing_keys() {
    let mut fx = fixture();
    fx.app.open_user_form();
    type_text(&mut fx.app, "bobx");
    fx.app.dialog_form_backspace();
    fx.app.dialog_form_home();
    fx.app.dialog_form_delete();
    fx.app.dialog_form_end();
    type_text(&mut fx.app, "by");

    match &fx.app.dialog {
        Some(DialogKind::UserForm(form)) => assert_eq!(form.username.value, "obby"),
        other => panic!("expected form, got {:?}", other),
    }
}

#[test]
fn test_cycle_theme_persists_to_config() {
    let mut fx = fixture();
    let path = fx.temp.path().join("config.toml");
    fx.app.config_path = Some(path.clone());

    fx.app.execute_action(Action::CycleTheme);

    assert_eq!(fx.app.theme_manager.current_name(), "light");
    assert_eq!(fx.app.toast_display(), Some("Theme: light"));
    let saved = AppConfig::load_from(&path).unwrap();
    assert_eq!(saved.theme, "light");
    assert_eq!(saved.accounts, fx.app.config.accounts);
}

#[test]
fn test_log_navigation_uses_viewport() {
    let mut fx = fixture();
    let text: Vec<String> = (1..=30).map(|i| format!("entry {}", i)).collect();
    fx.app.log_view.set_text(&text.join("\n"));
    fx.app.layout.update(Rect::new(0, 0, 80, 24));
    fx.app.sync_log_viewport();
    assert_eq!(fx.app.log_view.scroll_offset(), 16);

    fx.app.execute_action(Action::ScrollTop);
    assert_eq!(fx.app.log_view.scroll_offset(), 0);
    fx.app.execute_action(Action::ScrollDown);
    assert_eq!(fx.app.log_view.scroll_offset(), 1);
    fx.app.execute_action(Action::PageDown);
    assert_eq!(fx.app.log_view.scroll_offset(), 15);
    fx.app.execute_action(Action::PageUp);
    assert_eq!(fx.app.log_view.scroll_offset(), 1);
    fx.app.execute_action(Action::ScrollUp);
    fx.app.execute_action(Action::ScrollUp);
    assert_eq!(fx.app.log_view.scroll_offset(), 0);
    fx.app.execute_action(Action::ScrollBottom);
    assert_eq!(fx.app.log_view.scroll_offset(), 16);
}

#[test]
fn test_help_dialog_scroll_and_close() {
    let mut fx = fixture();
    fx.app.execute_action(Action::ShowHelp);
    fx.app.dialog_help_scroll_down();
    fx.app.dialog_help_scroll_down();
    fx.app.dialog_help_scroll_up();
    assert!(matches!(
        fx.app.dialog,
        Some(DialogKind::Help { scroll_offset: 1 })
    ));

    fx.app.close_dialog();
    assert!(!fx.app.is_dialog_active());
}

#[test]
fn test_quit() {
    let mut fx = fixture();
    assert!(!fx.app.should_quit());
    fx.app.execute_action(Action::Quit);
    assert!(fx.app.should_quit());
}

#[test]
fn test_format_user_error() {
    let message = App::format_user_error(
        "Edit config",
        Some(Path::new("/etc/proftpd.conf")),
        "permission denied",
        "",
    );
    assert_eq!(
        message,
        "Edit config failed.\nPath: /etc/proftpd.conf\nReason: permission denied"
    );
}
