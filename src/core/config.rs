//! 설정 파일 (TOML)
//!
//! `$PROFTPD_PANEL_CONFIG` 또는 `<config_dir>/proftpd-panel/config.toml`에서 읽는다.
//! 모든 필드에 기본값이 있어 일부만 적어도 된다.

use crate::utils::error::{PanelError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "PROFTPD_PANEL_CONFIG";
const APP_DIR_NAME: &str = "proftpd-panel";
const FALLBACK_EDITOR: &str = "vi";

/// 서비스 제어 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// systemd 유닛 이름
    pub unit: String,
    /// journalctl로 가져올 줄 수
    pub log_lines: usize,
    /// 권한 상승 명령 (shlex 분리, 빈 문자열이면 사용 안 함)
    pub privilege_command: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            unit: "proftpd".to_string(),
            log_lines: 100,
            privilege_command: "pkexec".to_string(),
        }
    }
}

impl ServiceSettings {
    /// 권한 상승 접두어를 단어 목록으로 분리
    ///
    /// 따옴표가 맞지 않는 등 파싱 불가한 값은 공백 기준으로 나눈다.
    pub fn privilege_prefix(&self) -> Vec<String> {
        let raw = self.privilege_command.trim();
        if raw.is_empty() {
            return Vec::new();
        }
        shlex::split(raw).unwrap_or_else(|| raw.split_whitespace().map(str::to_string).collect())
    }
}

/// ProFTPD 설정 파일 위치
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProftpdSettings {
    pub config_paths: Vec<PathBuf>,
}

impl Default for ProftpdSettings {
    fn default() -> Self {
        Self {
            config_paths: crate::system::proftpd_config::DEFAULT_CONFIG_PATHS
                .iter()
                .map(PathBuf::from)
                .collect(),
        }
    }
}

/// 계정 생성 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSettings {
    /// 사용자 존재 여부를 확인할 passwd 파일
    pub passwd_file: PathBuf,
    /// FTP 전용 계정에 지정할 로그인 셸
    pub nologin_shell: String,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            passwd_file: PathBuf::from("/etc/passwd"),
            nologin_shell: "/bin/false".to_string(),
        }
    }
}

/// 에디터 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// 비어 있으면 $VISUAL → $EDITOR → vi
    pub command: String,
}

impl EditorSettings {
    pub fn resolve(&self) -> String {
        let configured = self.command.trim();
        if !configured.is_empty() {
            return configured.to_string();
        }
        for key in ["VISUAL", "EDITOR"] {
            if let Ok(value) = env::var(key) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
        FALLBACK_EDITOR.to_string()
    }
}

/// 앱 전체 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: String,
    pub service: ServiceSettings,
    pub proftpd: ProftpdSettings,
    pub accounts: AccountSettings,
    pub editor: EditorSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            service: ServiceSettings::default(),
            proftpd: ProftpdSettings::default(),
            accounts: AccountSettings::default(),
            editor: EditorSettings::default(),
        }
    }
}

impl AppConfig {
    /// 기본 설정 파일 경로
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var(CONFIG_ENV_VAR) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
    }

    /// 사용자 테마 디렉토리 (`*.toml`)
    pub fn themes_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("themes"))
    }

    pub fn parse(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|e| PanelError::Config(e.to_string()))
    }

    /// 파일에서 로드 (파일이 없으면 기본값)
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(data) => Self::parse(&data)
                .map_err(|e| PanelError::Config(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(self).map_err(|e| PanelError::Config(e.to_string()))?;
        fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_stock_proftpd_layout() {
        let config = AppConfig::default();
        assert_eq!(config.service.unit, "proftpd");
        assert_eq!(config.service.log_lines, 100);
        assert_eq!(config.service.privilege_prefix(), vec!["pkexec"]);
        assert_eq!(
            config.proftpd.config_paths,
            vec![
                PathBuf::from("/etc/proftpd.conf"),
                PathBuf::from("/etc/proftpd/proftpd.conf")
            ]
        );
        assert_eq!(config.accounts.nologin_shell, "/bin/false");
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = AppConfig::parse(
            r#"
theme = "light"

[service]
log_lines = 250
"#,
        )
        .unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.service.log_lines, 250);
        assert_eq!(config.service.unit, "proftpd");
        assert_eq!(config.accounts.passwd_file, PathBuf::from("/etc/passwd"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let err = AppConfig::parse("theme = [").unwrap_err();
        assert!(matches!(err, PanelError::Config(_)));
    }

    #[test]
    fn test_privilege_prefix_split() {
        let settings = ServiceSettings {
            privilege_command: "sudo -n".to_string(),
            ..ServiceSettings::default()
        };
        assert_eq!(settings.privilege_prefix(), vec!["sudo", "-n"]);

        let disabled = ServiceSettings {
            privilege_command: "  ".to_string(),
            ..ServiceSettings::default()
        };
        assert!(disabled.privilege_prefix().is_empty());
    }

    #[test]
    fn test_editor_configured_command_wins() {
        let settings = EditorSettings {
            command: " nano -w ".to_string(),
        };
        assert_eq!(settings.resolve(), "nano -w");
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp.path().join("nope.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.theme = "high_contrast".to_string();
        config.service.unit = "proftpd-custom".to_string();

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
