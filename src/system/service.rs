// Service control - systemctl / journalctl 연동

use crate::core::config::ServiceSettings;
use crate::system::command::{with_privilege, CommandOutput, CommandRunner, CommandSpec};
use crate::utils::error::Result;

/// `systemctl is-active` 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceState {
    Active,
    Inactive,
    Failed,
    Activating,
    Deactivating,
    /// 그 밖의 응답 (원문 보관)
    Unknown(String),
}

impl ServiceState {
    /// is-active 출력의 첫 줄을 해석
    pub fn parse(text: &str) -> Self {
        let word = text.lines().next().unwrap_or("").trim();
        match word {
            "active" => ServiceState::Active,
            "inactive" => ServiceState::Inactive,
            "failed" => ServiceState::Failed,
            "activating" => ServiceState::Activating,
            "deactivating" => ServiceState::Deactivating,
            "" => ServiceState::Unknown("unknown".to_string()),
            other => ServiceState::Unknown(other.to_string()),
        }
    }

    /// 화면 표시용 문자열
    pub fn label(&self) -> &str {
        match self {
            ServiceState::Active => "active",
            ServiceState::Inactive => "inactive",
            ServiceState::Failed => "failed",
            ServiceState::Activating => "activating",
            ServiceState::Deactivating => "deactivating",
            ServiceState::Unknown(word) => word.as_str(),
        }
    }
}

/// 서비스 제어 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Start,
    Stop,
    Restart,
}

impl ServiceAction {
    pub fn verb(&self) -> &'static str {
        match self {
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
            ServiceAction::Restart => "restart",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            ServiceAction::Start => "started",
            ServiceAction::Stop => "stopped",
            ServiceAction::Restart => "restarted",
        }
    }
}

/// 데몬 제어기
pub struct ServiceManager<'a> {
    runner: &'a dyn CommandRunner,
    settings: &'a ServiceSettings,
}

impl<'a> ServiceManager<'a> {
    pub fn new(runner: &'a dyn CommandRunner, settings: &'a ServiceSettings) -> Self {
        Self { runner, settings }
    }

    /// 현재 상태 조회 (권한 불필요)
    ///
    /// is-active는 비활성일 때 0이 아닌 코드로 끝나므로 종료 코드는 보지 않는다.
    pub fn status(&self) -> ServiceState {
        let spec = CommandSpec::new("systemctl").args(["is-active", self.settings.unit.as_str()]);
        match self.runner.run(&spec) {
            Ok(output) => ServiceState::parse(&output.text),
            Err(e) => {
                log::warn!("status probe failed: {}", e);
                ServiceState::Unknown("unavailable".to_string())
            }
        }
    }

    /// start/stop/restart 실행 (권한 상승 접두어 사용)
    pub fn control(&self, action: ServiceAction) -> Result<CommandOutput> {
        let spec = with_privilege(
            &self.settings.privilege_prefix(),
            CommandSpec::new("systemctl").args([action.verb(), self.settings.unit.as_str()]),
        );
        self.runner.run(&spec)
    }

    /// 최근 로그 (journalctl -n N)
    ///
    /// 실행 실패 메시지도 그대로 로그 본문으로 돌려준다.
    pub fn logs(&self) -> String {
        let spec = CommandSpec::new("journalctl").args([
            "-u".to_string(),
            self.settings.unit.clone(),
            "--no-pager".to_string(),
            "-n".to_string(),
            self.settings.log_lines.to_string(),
        ]);
        match self.runner.run(&spec) {
            Ok(output) => output.text,
            Err(e) => e.to_string(),
        }
    }
}
