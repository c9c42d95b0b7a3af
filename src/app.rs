use crate::core::actions::Action;
use crate::core::config::AppConfig;
use crate::models::{LogView, ServerInfo, UserForm};
use crate::system::{network, CommandRunner, FtpUserRequest, ServiceAction};
use crate::ui::{DialogKind, LayoutManager, ThemeManager};
use std::path::{Path, PathBuf};
use std::time::Instant;

mod controllers;
mod dialogs;
mod operations;

/// 외부 에디터 실행 요청
///
/// 메인 루프가 TUI를 잠시 내려놓고 실행한 뒤 `apply_editor_result`로 결과를 돌려준다.
#[derive(Debug, Clone)]
pub struct EditorRequest {
    pub editor_command: String,
    pub target_path: PathBuf,
}

/// 권한 상승이 필요한 작업
///
/// pkexec/sudo가 터미널에서 인증을 물을 수 있으므로 메인 루프가 TUI를 내려놓고 실행한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivilegedTask {
    Service(ServiceAction),
    CreateUser(FtpUserRequest),
}

impl PrivilegedTask {
    /// 터미널에 안내할 작업 설명 (비밀번호 제외)
    pub fn describe(&self) -> String {
        match self {
            PrivilegedTask::Service(action) => format!("systemctl {}", action.verb()),
            PrivilegedTask::CreateUser(request) => {
                format!("create FTP user '{}'", request.username)
            }
        }
    }
}

/// 앱 상태
pub struct App {
    /// 종료 플래그
    should_quit: bool,
    /// 레이아웃 매니저
    pub layout: LayoutManager,
    /// 테마 매니저
    pub theme_manager: ThemeManager,
    pub config: AppConfig,
    /// 테마 변경을 저장할 설정 파일 (None이면 저장 안 함)
    config_path: Option<PathBuf>,
    runner: Box<dyn CommandRunner>,
    ip_probe: fn() -> String,
    /// 서버 정보 박스 내용
    pub server_info: ServerInfo,
    /// 데몬 로그
    pub log_view: LogView,
    /// 현재 다이얼로그
    pub dialog: Option<DialogKind>,
    /// 입력 오류 메시지를 보여주는 동안 보관하는 사용자 폼
    suspended_form: Option<UserForm>,
    /// 토스트 메시지 (메시지, 표시 시작 시간)
    pub toast_message: Option<(String, Instant)>,
    pending_editor_request: Option<EditorRequest>,
    pending_privileged_task: Option<PrivilegedTask>,
}

impl App {
    const TOAST_SECS: u64 = 3;

    pub fn new(
        config: AppConfig,
        config_path: Option<PathBuf>,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        let mut theme_manager = ThemeManager::new();
        if let Some(dir) = AppConfig::themes_dir().filter(|dir| dir.is_dir()) {
            match theme_manager.load_themes_from_dir(&dir) {
                Ok(0) => {}
                Ok(count) => log::info!(
                    "loaded {} theme(s) from {}; available: {}",
                    count,
                    dir.display(),
                    theme_manager.available_themes().join(", ")
                ),
                Err(e) => log::warn!("failed to read themes from {}: {}", dir.display(), e),
            }
        }
        if let Err(e) = theme_manager.switch_theme(&config.theme) {
            log::warn!("{}; falling back to '{}'", e, theme_manager.current_name());
        }

        let mut app = Self {
            should_quit: false,
            layout: LayoutManager::new(),
            theme_manager,
            config,
            config_path,
            runner,
            ip_probe: network::probe_ip_label,
            server_info: ServerInfo::default(),
            log_view: LogView::new(),
            dialog: None,
            suspended_form: None,
            toast_message: None,
            pending_editor_request: None,
            pending_privileged_task: None,
        };
        app.refresh_status();
        app
    }

    /// 테스트용: 초기 새로고침 없이 고정 IP를 돌려주는 앱
    #[cfg(test)]
    pub(crate) fn new_for_test(runner: Box<dyn CommandRunner>, config: AppConfig) -> Self {
        Self {
            should_quit: false,
            layout: LayoutManager::new(),
            theme_manager: ThemeManager::new(),
            config,
            config_path: None,
            runner,
            ip_probe: || "192.0.2.10".to_string(),
            server_info: ServerInfo::default(),
            log_view: LogView::new(),
            dialog: None,
            suspended_form: None,
            toast_message: None,
            pending_editor_request: None,
            pending_privileged_task: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        log::info!("quit requested");
        self.should_quit = true;
    }

    /// 키 입력으로 결정된 액션 실행
    pub fn execute_action(&mut self, action: Action) {
        log::debug!("action: {}", action.id());
        match action {
            Action::Quit => self.quit(),
            Action::StartService
            | Action::StopService
            | Action::RestartService
            | Action::Refresh
            | Action::EditConfig
            | Action::CreateUser => controllers::service_controller::execute(self, action),
            Action::ScrollUp
            | Action::ScrollDown
            | Action::PageUp
            | Action::PageDown
            | Action::ScrollTop
            | Action::ScrollBottom
            | Action::ShowHelp
            | Action::CycleTheme => controllers::view_controller::execute(self, action),
        }
    }

    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn show_help(&mut self) {
        self.dialog = Some(DialogKind::help());
    }

    /// 다이얼로그 닫기 (보관 중인 사용자 폼이 있으면 다시 연다)
    pub fn close_dialog(&mut self) {
        self.dialog = self.suspended_form.take().map(DialogKind::UserForm);
    }

    /// 토스트 메시지 설정 (3초 후 자동 소멸)
    pub fn set_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now()));
    }

    /// 만료된 토스트 제거
    pub fn clear_expired_toast(&mut self) {
        if let Some((_, time)) = &self.toast_message {
            if time.elapsed().as_secs() >= Self::TOAST_SECS {
                self.toast_message = None;
            }
        }
    }

    /// 토스트 메시지 가져오기 (만료 안 된 경우만)
    pub fn toast_display(&self) -> Option<&str> {
        self.toast_message.as_ref().and_then(|(msg, time)| {
            if time.elapsed().as_secs() < Self::TOAST_SECS {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }

    /// 렌더링된 로그 영역 높이를 스크롤 상태에 반영
    pub fn sync_log_viewport(&mut self) {
        self.log_view
            .set_viewport_height(self.layout.log_viewport_height());
    }

    /// 에러 다이얼로그 본문
    ///
    /// "X failed." 다음 줄부터 경로, 원인, 힌트를 붙인다.
    pub(crate) fn format_user_error(
        action: &str,
        path: Option<&Path>,
        error: &str,
        hint: &str,
    ) -> String {
        let mut message = format!("{} failed.", action);
        if let Some(p) = path {
            message.push_str(&format!("\nPath: {}", p.display()));
        }
        message.push_str(&format!("\nReason: {}", error));
        if !hint.is_empty() {
            message.push_str(&format!("\nHint: {}", hint));
        }
        message
    }

    fn save_config(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            log::warn!("failed to save config to {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests;
