mod app;
mod core;
mod models;
mod system;
mod ui;
mod utils;

use app::{App, EditorRequest, PrivilegedTask};
use core::actions::{find_action, generate_help_entries};
use core::config::AppConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::Env;
use models::FormFocus;
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use std::fs::{self, OpenOptions};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use system::SystemRunner;
use ui::{
    CommandBar, Dialog, DialogKind, InfoPanel, LayoutMode, LogPanel, StatusBar, WarningScreen,
};
use utils::{
    error::Result,
    formatter::{format_exit_status, format_refreshed_at},
};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    if let Some(code) = handle_cli_args() {
        std::process::exit(code);
    }

    init_logging();
    let (config, config_path) = load_config();
    log::info!(
        "starting proftpd-panel {} (unit: {})",
        env!("CARGO_PKG_VERSION"),
        config.service.unit
    );

    // 첫 새로고침은 터미널 전환 전에 (명령 실행 중 빈 화면 방지)
    let mut app = App::new(config, config_path, Box::new(SystemRunner::new()));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("fatal: {}", err);
        eprintln!("Error: {}", err);
    }

    Ok(())
}

/// `--help` / `--version` 처리. 종료해야 하면 종료 코드를 반환
fn handle_cli_args() -> Option<i32> {
    let arg = std::env::args().nth(1)?;
    match arg.as_str() {
        "-h" | "--help" => {
            print_usage();
            Some(0)
        }
        "-V" | "--version" => {
            println!("proftpd-panel {}", env!("CARGO_PKG_VERSION"));
            Some(0)
        }
        other => {
            eprintln!("proftpd-panel: unknown argument '{}'", other);
            eprintln!("Try 'proftpd-panel --help'.");
            Some(2)
        }
    }
}

fn print_usage() {
    println!("proftpd-panel {}", env!("CARGO_PKG_VERSION"));
    println!("Terminal control panel for a local ProFTPD server.\n");
    println!("USAGE:\n    proftpd-panel [--help | --version]\n");
    match AppConfig::default_path() {
        Some(path) => println!("CONFIG:\n    {}\n", path.display()),
        None => println!("CONFIG:\n    (no config directory; using defaults)\n"),
    }
    for (category, items) in generate_help_entries() {
        println!("{}:", category.to_uppercase());
        for (key, label) in items {
            println!("    {:<14} {}", key, label);
        }
    }
}

/// 로그 파일 초기화
///
/// TUI가 터미널을 점유하므로 파일로만 기록한다. 파일을 열 수 없으면 로깅 없이 진행.
fn init_logging() {
    let Some(dir) = dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("proftpd-panel"))
    else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("panel.log"))
    else {
        return;
    };

    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init();
}

/// 설정 로드. 읽을 수 없는 파일은 덮어쓰지 않도록 저장 경로를 버린다
fn load_config() -> (AppConfig, Option<PathBuf>) {
    let Some(path) = AppConfig::default_path() else {
        return (AppConfig::default(), None);
    };
    match AppConfig::load_from(&path) {
        Ok(config) => (config, Some(path)),
        Err(e) => {
            log::warn!("{}; using defaults", e);
            eprintln!("warning: {}; using defaults", e);
            (AppConfig::default(), None)
        }
    }
}

fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let size = f.area();

            // 레이아웃 업데이트
            app.layout.update(size);
            app.sync_log_viewport();

            match app.layout.mode() {
                LayoutMode::TooSmall => {
                    let (width, height) = app.layout.terminal_size();
                    let warning = WarningScreen::new()
                        .current_size(width, height)
                        .theme(app.theme_manager.current());
                    f.render_widget(warning, size);
                }
                LayoutMode::Normal => {
                    render_main_ui(f, app);
                }
            }
        })?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if app.is_dialog_active() {
                        handle_dialog_keys(app, key.modifiers, key.code);
                    } else {
                        handle_normal_keys(app, key.modifiers, key.code);
                    }
                }
            }
        }

        if let Some(request) = app.take_pending_editor_request() {
            let result = with_suspended_terminal(terminal, || run_editor(&request))?;
            app.apply_editor_result(&request, result);
        }

        if let Some(task) = app.take_pending_privileged_task() {
            run_privileged_task(terminal, app, task)?;
        }

        app.clear_expired_toast();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// TUI를 내려놓고 외부 프로그램 실행 후 복구
fn with_suspended_terminal<T>(terminal: &mut Tui, run: impl FnOnce() -> T) -> Result<T> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let result = run();

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()?;
    Ok(result)
}

/// 권한 상승 작업 실행
///
/// pkexec 텍스트 에이전트나 sudo는 /dev/tty에서 비밀번호를 읽으므로
/// raw 모드와 대체 화면을 해제한 상태로 실행한다.
fn run_privileged_task(terminal: &mut Tui, app: &mut App, task: PrivilegedTask) -> Result<()> {
    if !app.privileged_task_needs_terminal() {
        app.run_privileged_task(task);
        return Ok(());
    }

    let description = task.describe();
    with_suspended_terminal(terminal, || {
        println!("proftpd-panel: {} (authenticate if prompted)", description);
        app.run_privileged_task(task);
    })
}

/// 에디터 명령(shlex 분리) 뒤에 대상 파일 경로를 붙여 실행
fn run_editor(request: &EditorRequest) -> std::result::Result<(), String> {
    let mut words = shlex::split(&request.editor_command)
        .filter(|words| !words.is_empty())
        .ok_or_else(|| format!("cannot parse editor command '{}'", request.editor_command))?;
    let program = words.remove(0);

    log::info!(
        "launching editor: {} {}",
        request.editor_command,
        request.target_path.display()
    );
    let status = Command::new(&program)
        .args(&words)
        .arg(&request.target_path)
        .status()
        .map_err(|e| format!("failed to start '{}': {}", program, e))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!(
            "'{}' finished with {}",
            program,
            format_exit_status(status.code())
        ))
    }
}

/// 일반 모드 키 처리 (액션 레지스트리 기반)
fn handle_normal_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    if let Some(action) = find_action(modifiers, code) {
        app.execute_action(action);
    }
}

/// 다이얼로그 모드 키 처리
fn handle_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    match &app.dialog {
        Some(DialogKind::Error { .. }) | Some(DialogKind::Message { .. }) => {
            handle_message_dialog_keys(app, modifiers, code);
        }
        Some(DialogKind::Confirm { .. }) => {
            handle_confirm_dialog_keys(app, modifiers, code);
        }
        Some(DialogKind::UserForm(form)) => {
            let on_buttons = form.focus == FormFocus::Buttons;
            handle_user_form_keys(app, modifiers, code, on_buttons);
        }
        Some(DialogKind::Help { .. }) => {
            handle_help_dialog_keys(app, modifiers, code);
        }
        None => {}
    }
}

/// 사용자 생성 폼 키 처리
fn handle_user_form_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode, on_buttons: bool) {
    match (modifiers, code) {
        (_, KeyCode::Enter) => app.dialog_form_enter(),
        (_, KeyCode::Esc) => app.close_dialog(),
        // 필드 이동 (Tab / Shift+Tab / 화살표)
        (KeyModifiers::NONE, KeyCode::Tab) | (_, KeyCode::Down) => app.dialog_form_next_focus(),
        (KeyModifiers::SHIFT, KeyCode::BackTab) | (_, KeyCode::Up) => {
            app.dialog_form_prev_focus()
        }
        // 버튼 줄에서는 좌우로 OK/Cancel 전환
        (_, KeyCode::Left | KeyCode::Right) if on_buttons => app.dialog_form_toggle_button(),
        (_, KeyCode::Left) => app.dialog_form_left(),
        (_, KeyCode::Right) => app.dialog_form_right(),
        (_, KeyCode::Home) => app.dialog_form_home(),
        (_, KeyCode::End) => app.dialog_form_end(),
        (_, KeyCode::Backspace) => app.dialog_form_backspace(),
        (_, KeyCode::Delete) => app.dialog_form_delete(),
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.dialog_form_delete_prev_word(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => app.dialog_form_char(c),
        _ => {}
    }
}

/// 확인 다이얼로그 키 처리
fn handle_confirm_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    match (modifiers, code) {
        // 버튼 이동 (Tab / Shift+Tab)
        (KeyModifiers::NONE, KeyCode::Tab)
        | (KeyModifiers::SHIFT, KeyCode::BackTab)
        | (_, KeyCode::Left)
        | (_, KeyCode::Right) => {
            app.dialog_confirm_toggle();
        }
        (_, KeyCode::Enter) => {
            app.dialog_confirm_enter();
        }
        (_, KeyCode::Esc) => {
            app.close_dialog();
        }
        _ => {}
    }
}

/// 메시지/에러 다이얼로그 키 처리
fn handle_message_dialog_keys(app: &mut App, _modifiers: KeyModifiers, code: KeyCode) {
    match code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
            app.close_dialog();
        }
        _ => {}
    }
}

/// 도움말 다이얼로그 키 처리
fn handle_help_dialog_keys(app: &mut App, _modifiers: KeyModifiers, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.close_dialog();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.dialog_help_scroll_down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.dialog_help_scroll_up();
        }
        _ => {}
    }
}

/// 상단 제목 줄
fn render_header(f: &mut ratatui::Frame<'_>, theme: &ui::Theme, area: Rect) {
    let style = Style::default()
        .bg(theme.header_bg.to_color())
        .fg(theme.header_fg.to_color());
    let line = Line::from(vec![
        Span::styled(" ProFTPD Panel", style.add_modifier(Modifier::BOLD)),
        Span::styled(format!("  v{}", env!("CARGO_PKG_VERSION")), style),
    ]);
    f.render_widget(Paragraph::new(line).style(style), area);
}

/// 상태바 데이터 수집 + 렌더링
fn render_status_bar(f: &mut ratatui::Frame<'_>, app: &App, theme: &ui::Theme, area: Rect) {
    let refreshed_at = format_refreshed_at(app.server_info.refreshed_at.as_ref());
    let status_bar = StatusBar::new()
        .unit(&app.config.service.unit)
        .refreshed_at(&refreshed_at)
        .toast(app.toast_display())
        .theme_name(app.theme_manager.current_name())
        .theme(theme);
    f.render_widget(status_bar, area);
}

/// 메인 UI 렌더링
fn render_main_ui(f: &mut ratatui::Frame<'_>, app: &App) {
    let areas = app.layout.areas();
    let theme = app.theme_manager.current();

    render_header(f, theme, areas.header);

    f.render_widget(InfoPanel::new(&app.server_info).theme(theme), areas.info);

    let log_title = format!("journalctl -u {}", app.config.service.unit);
    let log_panel = LogPanel::new(&app.log_view)
        .title(&log_title)
        .theme(theme);
    f.render_widget(log_panel, areas.log);

    render_status_bar(f, app, theme, areas.status_bar);

    let command_bar = CommandBar::new().theme(theme);
    f.render_widget(command_bar, areas.command_bar);

    if let Some(ref dialog_kind) = app.dialog {
        let dialog = Dialog::new(dialog_kind).theme(theme);
        f.render_widget(dialog, f.area());
    }
}
