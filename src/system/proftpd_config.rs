// ProFTPD configuration scanning - 포트 탐색
//
// 설정 의미를 해석하지 않고 텍스트만 훑는다.

use std::fs;
use std::path::{Path, PathBuf};

/// 포트 지시어가 없을 때 기본 FTP 포트
pub const DEFAULT_PORT: u16 = 21;

/// 배포판별 기본 설정 파일 위치 (앞에서부터 탐색)
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["/etc/proftpd.conf", "/etc/proftpd/proftpd.conf"];

/// 포트 탐색 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDiscovery {
    pub port: u16,
    /// 포트를 찾은 파일 (기본값이면 None)
    pub source: Option<PathBuf>,
}

impl PortDiscovery {
    pub fn fallback() -> Self {
        Self {
            port: DEFAULT_PORT,
            source: None,
        }
    }

    pub fn is_default(&self) -> bool {
        self.source.is_none()
    }
}

impl Default for PortDiscovery {
    fn default() -> Self {
        Self::fallback()
    }
}

/// 설정 텍스트에서 첫 번째 포트 지시어 값을 찾는다
///
/// 앞뒤 공백을 제거한 줄이 대소문자 무관하게 `port`로 시작하고,
/// 두 번째 필드가 숫자일 때만 채택한다. 그렇지 않은 줄은 건너뛰고 계속 탐색.
/// 숫자지만 포트 범위를 벗어난 값은 경고를 남기고 건너뛴다.
pub fn parse_port(contents: &str) -> Option<u16> {
    contents.lines().filter_map(port_directive_value).find_map(|value| {
        match value.parse::<u16>() {
            Ok(port) => Some(port),
            Err(_) => {
                log::warn!("ignoring out-of-range port directive value '{}'", value);
                None
            }
        }
    })
}

/// `port`로 시작하는 줄의 숫자 두 번째 필드
fn port_directive_value(line: &str) -> Option<&str> {
    let line = line.trim();
    if !line.to_lowercase().starts_with("port") {
        return None;
    }
    let value = line.split_whitespace().nth(1)?;
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(value)
}

/// 설정 파일 목록을 순서대로 탐색
///
/// 없거나 읽을 수 없는 파일은 건너뛴다. 아무 데도 없으면 기본 포트.
pub fn discover_port<P: AsRef<Path>>(paths: &[P]) -> PortDiscovery {
    for path in paths {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                log::debug!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        if let Some(port) = parse_port(&contents) {
            return PortDiscovery {
                port,
                source: Some(path.to_path_buf()),
            };
        }
    }
    PortDiscovery::fallback()
}

/// 에디터로 열 설정 파일 (존재하는 첫 파일, 없으면 첫 후보)
pub fn first_existing_config<P: AsRef<Path>>(paths: &[P]) -> Option<PathBuf> {
    paths
        .iter()
        .map(|p| p.as_ref())
        .find(|p| p.is_file())
        .or_else(|| paths.first().map(|p| p.as_ref()))
        .map(Path::to_path_buf)
}
