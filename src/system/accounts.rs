// FTP account provisioning - useradd / chpasswd / chown
//
// 실패 시 롤백하지 않는다. 첫 실패 단계의 출력을 그대로 돌려준다.

use crate::core::config::{AccountSettings, ServiceSettings};
use crate::system::command::{with_privilege, CommandRunner, CommandSpec};
use crate::utils::error::{PanelError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// FTP 전용 계정 생성 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpUserRequest {
    pub username: String,
    pub password: String,
    pub shared_folder: PathBuf,
}

impl FtpUserRequest {
    /// 폼 입력값으로부터 생성 (앞뒤 공백 제거, 빈 값 거부)
    pub fn from_form(username: &str, password: &str, folder: &str) -> Result<Self> {
        let username = username.trim();
        let password = password.trim();
        let folder = folder.trim();

        if username.is_empty() || password.is_empty() || folder.is_empty() {
            return Err(PanelError::MissingInput);
        }
        validate_username(username)?;

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
            shared_folder: PathBuf::from(folder),
        })
    }

    fn folder_display(&self) -> String {
        self.shared_folder.display().to_string()
    }
}

/// chpasswd 입력(`user:pass`)과 인자 해석을 깨뜨리는 이름 거부
fn validate_username(username: &str) -> Result<()> {
    let invalid = username.starts_with('-')
        || username.contains(':')
        || username.chars().any(char::is_whitespace);
    if invalid {
        return Err(PanelError::InvalidUsername(username.to_string()));
    }
    Ok(())
}

/// passwd 형식 파일에 사용자가 있는지 확인
pub fn user_exists(passwd_path: &Path, username: &str) -> Result<bool> {
    let contents = fs::read_to_string(passwd_path)?;
    Ok(contents
        .lines()
        .filter_map(|line| line.split(':').next())
        .any(|name| name == username))
}

/// 계정 생성기
pub struct AccountManager<'a> {
    runner: &'a dyn CommandRunner,
    service: &'a ServiceSettings,
    accounts: &'a AccountSettings,
}

impl<'a> AccountManager<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        service: &'a ServiceSettings,
        accounts: &'a AccountSettings,
    ) -> Self {
        Self {
            runner,
            service,
            accounts,
        }
    }

    /// 계정 생성 후 확인 메시지 반환
    pub fn create_user(&self, request: &FtpUserRequest) -> Result<String> {
        if user_exists(&self.accounts.passwd_file, &request.username)? {
            return Err(PanelError::UserExists(request.username.clone()));
        }

        if !request.shared_folder.exists() {
            fs::create_dir_all(&request.shared_folder).map_err(|source| {
                PanelError::SharedFolder {
                    path: request.shared_folder.clone(),
                    source,
                }
            })?;
            log::info!("created shared folder {}", request.shared_folder.display());
        }

        let folder = request.folder_display();
        let owner = format!("{0}:{0}", request.username);

        self.run_step(
            CommandSpec::new("useradd")
                .args(["-d", folder.as_str(), "-s"])
                .arg(self.accounts.nologin_shell.as_str())
                .arg(request.username.as_str()),
        )?;
        self.run_step(
            CommandSpec::new("chpasswd")
                .stdin(format!("{}:{}\n", request.username, request.password)),
        )?;
        self.run_step(CommandSpec::new("chown").args(["-R", owner.as_str(), folder.as_str()]))?;

        log::info!("created FTP user '{}'", request.username);
        Ok(format!(
            "User '{}' created and assigned to folder '{}'.",
            request.username, folder
        ))
    }

    fn run_step(&self, spec: CommandSpec) -> Result<()> {
        let spec = with_privilege(&self.service.privilege_prefix(), spec);
        let output = self.runner.run(&spec)?;
        if output.success() {
            Ok(())
        } else {
            Err(PanelError::CommandFailed {
                command: spec.display(),
                output: output.text,
            })
        }
    }
}
