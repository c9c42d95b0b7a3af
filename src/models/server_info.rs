use crate::system::network::UNAVAILABLE;
use crate::system::{PortDiscovery, ServiceState};
use chrono::{DateTime, Local};

/// 서버 정보 패널 데이터
#[derive(Debug, Clone)]
pub struct ServerInfo {
    /// systemctl is-active 결과
    pub state: ServiceState,
    /// 로컬 IP (조회 실패 시 "Unavailable")
    pub ip: String,
    /// 설정 파일에서 찾은 포트
    pub port: PortDiscovery,
    /// 마지막 새로고침 시각
    pub refreshed_at: Option<DateTime<Local>>,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            state: ServiceState::Unknown("unknown".to_string()),
            ip: UNAVAILABLE.to_string(),
            port: PortDiscovery::fallback(),
            refreshed_at: None,
        }
    }
}

impl ServerInfo {
    /// 포트 표시 문자열 (기본값이면 표기)
    pub fn port_label(&self) -> String {
        if self.port.is_default() {
            format!("{} (default)", self.port.port)
        } else {
            self.port.port.to_string()
        }
    }
}
