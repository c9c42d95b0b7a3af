// External command execution
//
// 모든 OS 연동(systemctl, journalctl, useradd ...)은 CommandRunner를 거친다.
// 셸을 거치지 않고 인자 벡터로 실행한다.

use crate::utils::error::{PanelError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// 실행할 외부 명령 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// 표준 입력으로 전달할 내용 (chpasswd 등)
    pub stdin: Option<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// 로그/다이얼로그용 명령줄 문자열 (stdin 내용은 포함하지 않음)
    pub fn display(&self) -> String {
        let words = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        shlex::try_join(words).unwrap_or_else(|_| {
            std::iter::once(self.program.clone())
                .chain(self.args.iter().cloned())
                .collect::<Vec<_>>()
                .join(" ")
        })
    }
}

/// 명령 실행 결과
///
/// stdout 뒤에 stderr를 이어 붙인 원문을 그대로 보관한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// 종료 코드 (시그널 종료 시 None)
    pub status: Option<i32>,
    pub text: String,
}

impl CommandOutput {
    pub fn new(status: Option<i32>, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// 외부 명령 실행기
///
/// 0이 아닌 종료 코드는 에러가 아니다. 프로세스를 띄우지 못한 경우만 Err.
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// std::process 기반 실제 실행기
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        let display = spec.display();
        log::info!("running: {}", display);

        let spawn_error = |source: std::io::Error| PanelError::CommandSpawn {
            command: display.clone(),
            source,
        };

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        let mut child = command.spawn().map_err(|e| {
            log::error!("failed to spawn '{}': {}", display, e);
            spawn_error(e)
        })?;

        if let (Some(input), Some(mut pipe)) = (spec.stdin.as_deref(), child.stdin.take()) {
            pipe.write_all(input.as_bytes()).map_err(spawn_error)?;
            // pipe drop → EOF
        }

        let output = child.wait_with_output().map_err(spawn_error)?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        let result = CommandOutput::new(output.status.code(), text);
        if !result.success() {
            log::warn!("'{}' exited with {:?}", display, result.status);
        }
        Ok(result)
    }
}

/// 권한 상승 접두어(pkexec, sudo -n ...)를 붙인다
///
/// 접두어가 비어 있으면 원래 명령을 그대로 반환
pub fn with_privilege(prefix: &[String], spec: CommandSpec) -> CommandSpec {
    let Some((program, rest)) = prefix.split_first() else {
        return spec;
    };

    let mut args: Vec<String> = rest.to_vec();
    args.push(spec.program);
    args.extend(spec.args);

    CommandSpec {
        program: program.clone(),
        args,
        stdin: spec.stdin,
    }
}
