use super::*;
use crate::system::proftpd_config::{discover_port, first_existing_config};
use crate::system::accounts::user_exists;
use crate::system::{AccountManager, FtpUserRequest, ServiceAction, ServiceManager};
use crate::utils::error::PanelError;
use crate::utils::formatter::{format_exit_status, output_or_placeholder};
use chrono::Local;

impl App {
    // === 상태 새로고침 ===

    /// 상태 → IP → 포트 → 로그 순으로 다시 읽는다
    pub fn refresh_status(&mut self) {
        let service = ServiceManager::new(self.runner.as_ref(), &self.config.service);
        self.server_info.state = service.status();
        self.server_info.ip = (self.ip_probe)();
        self.server_info.port = discover_port(&self.config.proftpd.config_paths);
        let logs = service.logs();
        self.log_view.set_text(&logs);
        self.server_info.refreshed_at = Some(Local::now());
        log::debug!(
            "refreshed: state={} ip={} port={}",
            self.server_info.state.label(),
            self.server_info.ip,
            self.server_info.port.port
        );
    }

    pub(super) fn refresh_port(&mut self) {
        self.server_info.port = discover_port(&self.config.proftpd.config_paths);
    }

    // === 서비스 제어 ===

    /// Stop은 접속 중인 클라이언트를 끊으므로 확인을 먼저 받는다
    pub fn control_service(&mut self, action: ServiceAction) {
        if action == ServiceAction::Stop {
            let unit = &self.config.service.unit;
            self.dialog = Some(DialogKind::confirm(
                "Stop server",
                format!(
                    "Stop {}?\nConnected FTP clients will be disconnected.",
                    unit
                ),
                ServiceAction::Stop,
            ));
            return;
        }
        self.queue_privileged_task(PrivilegedTask::Service(action));
    }

    // === 권한 상승 작업 ===

    pub(super) fn queue_privileged_task(&mut self, task: PrivilegedTask) {
        log::debug!("queued privileged task: {}", task.describe());
        self.pending_privileged_task = Some(task);
    }

    pub fn take_pending_privileged_task(&mut self) -> Option<PrivilegedTask> {
        self.pending_privileged_task.take()
    }

    /// 권한 상승 접두어가 있으면 인증 프롬프트용으로 터미널을 넘겨야 한다
    pub fn privileged_task_needs_terminal(&self) -> bool {
        !self.config.service.privilege_prefix().is_empty()
    }

    /// 큐에서 꺼낸 작업 실행 (완료 후 상태 새로고침)
    pub fn run_privileged_task(&mut self, task: PrivilegedTask) {
        match task {
            PrivilegedTask::Service(action) => self.run_service_action(action),
            PrivilegedTask::CreateUser(request) => self.run_create_user(&request),
        }
    }

    fn run_service_action(&mut self, action: ServiceAction) {
        let unit = self.config.service.unit.clone();
        let command = format!("systemctl {} {}", action.verb(), unit);
        let result =
            ServiceManager::new(self.runner.as_ref(), &self.config.service).control(action);

        match result {
            Ok(output) if output.success() => {
                log::info!("{} {}", unit, action.past_tense());
                self.set_toast(&format!("{} {}", unit, action.past_tense()));
            }
            Ok(output) => {
                let mut message = Self::format_user_error(
                    &command,
                    None,
                    &format_exit_status(output.status),
                    "Check the privilege command setting and the journal.",
                );
                message.push_str("\n\n");
                message.push_str(output_or_placeholder(&output.text));
                self.dialog = Some(DialogKind::error("Error", message));
            }
            Err(e) => {
                self.dialog = Some(DialogKind::error(
                    "Error",
                    Self::format_user_error(
                        &command,
                        None,
                        &e.to_string(),
                        "Make sure the privilege command is installed.",
                    ),
                ));
            }
        }

        self.refresh_status();
    }

    // === 설정 파일 편집 ===

    pub fn start_edit_config(&mut self) {
        let Some(target_path) = first_existing_config(&self.config.proftpd.config_paths) else {
            let searched = self
                .config
                .proftpd
                .config_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            self.dialog = Some(DialogKind::error(
                "Error",
                Self::format_user_error(
                    "Edit config",
                    None,
                    "No ProFTPD configuration file found",
                    &format!("Searched: {}", searched),
                ),
            ));
            return;
        };

        self.pending_editor_request = Some(EditorRequest {
            editor_command: self.config.editor.resolve(),
            target_path,
        });
    }

    pub fn take_pending_editor_request(&mut self) -> Option<EditorRequest> {
        self.pending_editor_request.take()
    }

    /// 에디터 종료 후 호출 (포트가 바뀌었을 수 있으므로 다시 읽는다)
    pub fn apply_editor_result(
        &mut self,
        request: &EditorRequest,
        result: std::result::Result<(), String>,
    ) {
        match result {
            Ok(()) => {
                let display_name = request
                    .target_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| request.target_path.to_string_lossy().to_string());
                self.set_toast(&format!("Edited: {}", display_name));
            }
            Err(reason) => {
                log::warn!("editor '{}' failed: {}", request.editor_command, reason);
                self.dialog = Some(DialogKind::error(
                    "Error",
                    Self::format_user_error(
                        "Edit config",
                        Some(&request.target_path),
                        &PanelError::Editor(reason).to_string(),
                        "Check the editor command ([editor] command, $VISUAL or $EDITOR).",
                    ),
                ));
            }
        }
        self.refresh_port();
    }

    // === FTP 사용자 생성 ===

    pub fn open_user_form(&mut self) {
        self.dialog = Some(DialogKind::user_form());
    }

    /// 폼 제출
    ///
    /// 입력 오류와 기존 사용자는 폼을 보관한 채 안내한다.
    /// 통과하면 폼을 닫고 계정 생성을 권한 작업으로 큐에 넣는다.
    pub fn confirm_user_form(&mut self) {
        let Some(DialogKind::UserForm(form)) = &self.dialog else {
            return;
        };

        let request = match FtpUserRequest::from_form(
            &form.username.value,
            &form.password.value,
            &form.folder.value,
        ) {
            Ok(request) => request,
            Err(e) => {
                self.suspended_form = Some(form.clone());
                self.dialog = Some(if matches!(e, PanelError::MissingInput) {
                    DialogKind::message("Missing input", e.to_string())
                } else {
                    DialogKind::error("Invalid input", e.to_string())
                });
                return;
            }
        };

        match user_exists(&self.config.accounts.passwd_file, &request.username) {
            Ok(false) => {}
            Ok(true) => {
                self.suspended_form = Some(form.clone());
                self.dialog = Some(DialogKind::message(
                    "User exists",
                    PanelError::UserExists(request.username).to_string(),
                ));
                return;
            }
            Err(e) => {
                self.dialog = Some(DialogKind::error(
                    "Error",
                    format!("Failed to create user: {}", e),
                ));
                return;
            }
        }

        self.dialog = None;
        self.queue_privileged_task(PrivilegedTask::CreateUser(request));
    }

    fn run_create_user(&mut self, request: &FtpUserRequest) {
        let result =
            AccountManager::new(self.runner.as_ref(), &self.config.service, &self.config.accounts)
                .create_user(request);

        match result {
            Ok(confirmation) => {
                self.refresh_status();
                self.dialog = Some(DialogKind::message("User created", confirmation));
            }
            Err(e @ PanelError::UserExists(_)) => {
                self.refresh_status();
                self.dialog = Some(DialogKind::message("User exists", e.to_string()));
            }
            Err(e) => {
                log::warn!("user creation failed: {}", e);
                self.refresh_status();
                self.dialog = Some(DialogKind::error(
                    "Error",
                    format!("Failed to create user: {}", e),
                ));
            }
        }
    }

    // === 테마 ===

    /// 다음 테마로 전환하고 설정 파일에 기록
    pub fn cycle_theme(&mut self) {
        self.theme_manager.cycle_theme();
        let name = self.theme_manager.current_name().to_string();
        self.config.theme = name.clone();
        self.save_config();
        self.set_toast(&format!("Theme: {}", name));
    }

    // === 로그 스크롤 ===

    pub fn scroll_log_up(&mut self) {
        self.log_view.scroll_up(1);
    }

    pub fn scroll_log_down(&mut self) {
        self.log_view.scroll_down(1);
    }

    pub fn page_log_up(&mut self) {
        self.log_view.page_up();
    }

    pub fn page_log_down(&mut self) {
        self.log_view.page_down();
    }

    pub fn scroll_log_top(&mut self) {
        self.log_view.scroll_to_top();
    }

    pub fn scroll_log_bottom(&mut self) {
        self.log_view.scroll_to_bottom();
    }
}
