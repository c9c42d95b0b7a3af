//! 액션 시스템 — 단일 진실 원천 (Single Source of Truth)
//!
//! 키 바인딩, 커맨드바 항목, 도움말 내용이 모두
//! 이 모듈의 레지스트리를 참조합니다.

use crate::ui::components::command_bar::CommandItem;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 모든 가능한 액션의 열거
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Service
    StartService,
    StopService,
    RestartService,
    Refresh,
    EditConfig,
    CreateUser,
    // Log view
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    ScrollBottom,
    // System
    ShowHelp,
    CycleTheme,
    Quit,
}

/// 액션 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Service,
    LogView,
    System,
}

impl ActionCategory {
    fn title(self) -> &'static str {
        match self {
            ActionCategory::Service => "Server",
            ActionCategory::LogView => "Log View",
            ActionCategory::System => "System",
        }
    }
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub id: &'static str,
    pub label: &'static str,
    pub category: ActionCategory,
    pub shortcut_display: Option<&'static str>,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    // Service
    ActionDef {
        action: Action::StartService,
        id: "start",
        label: "Start server",
        category: ActionCategory::Service,
        shortcut_display: Some("s"),
        command_bar: Some(CommandBarEntry {
            key: "s",
            label: "Start",
            priority: 10,
        }),
    },
    ActionDef {
        action: Action::StopService,
        id: "stop",
        label: "Stop server",
        category: ActionCategory::Service,
        shortcut_display: Some("x"),
        command_bar: Some(CommandBarEntry {
            key: "x",
            label: "Stop",
            priority: 11,
        }),
    },
    ActionDef {
        action: Action::RestartService,
        id: "restart",
        label: "Restart server",
        category: ActionCategory::Service,
        shortcut_display: Some("r"),
        command_bar: Some(CommandBarEntry {
            key: "r",
            label: "Restart",
            priority: 12,
        }),
    },
    ActionDef {
        action: Action::Refresh,
        id: "refresh",
        label: "Refresh status and logs",
        category: ActionCategory::Service,
        shortcut_display: Some("F5 / ^R"),
        command_bar: Some(CommandBarEntry {
            key: "F5",
            label: "Refresh",
            priority: 13,
        }),
    },
    ActionDef {
        action: Action::EditConfig,
        id: "edit_config",
        label: "Edit proftpd.conf",
        category: ActionCategory::Service,
        shortcut_display: Some("e"),
        command_bar: Some(CommandBarEntry {
            key: "e",
            label: "Config",
            priority: 20,
        }),
    },
    ActionDef {
        action: Action::CreateUser,
        id: "create_user",
        label: "Create FTP user",
        category: ActionCategory::Service,
        shortcut_display: Some("u"),
        command_bar: Some(CommandBarEntry {
            key: "u",
            label: "User",
            priority: 21,
        }),
    },
    // Log view
    ActionDef {
        action: Action::ScrollUp,
        id: "scroll_up",
        label: "Scroll up / down",
        category: ActionCategory::LogView,
        shortcut_display: Some("k / j"),
        command_bar: Some(CommandBarEntry {
            key: "j/k",
            label: "Scroll",
            priority: 50,
        }),
    },
    ActionDef {
        action: Action::ScrollDown,
        id: "scroll_down",
        label: "Scroll down",
        category: ActionCategory::LogView,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::PageUp,
        id: "page_up",
        label: "Page up / down",
        category: ActionCategory::LogView,
        shortcut_display: Some("PgUp / PgDn"),
        command_bar: None,
    },
    ActionDef {
        action: Action::PageDown,
        id: "page_down",
        label: "Page down",
        category: ActionCategory::LogView,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::ScrollTop,
        id: "scroll_top",
        label: "Oldest line",
        category: ActionCategory::LogView,
        shortcut_display: Some("g / Home"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ScrollBottom,
        id: "scroll_bottom",
        label: "Newest line",
        category: ActionCategory::LogView,
        shortcut_display: Some("G / End"),
        command_bar: Some(CommandBarEntry {
            key: "g/G",
            label: "Top/Bot",
            priority: 51,
        }),
    },
    // System
    ActionDef {
        action: Action::ShowHelp,
        id: "help",
        label: "Help",
        category: ActionCategory::System,
        shortcut_display: Some("? / F1"),
        command_bar: Some(CommandBarEntry {
            key: "?",
            label: "Help",
            priority: 90,
        }),
    },
    ActionDef {
        action: Action::CycleTheme,
        id: "cycle_theme",
        label: "Next theme",
        category: ActionCategory::System,
        shortcut_display: Some("t"),
        command_bar: None,
    },
    ActionDef {
        action: Action::Quit,
        id: "quit",
        label: "Quit",
        category: ActionCategory::System,
        shortcut_display: Some("q / F10"),
        command_bar: Some(CommandBarEntry {
            key: "q",
            label: "Quit",
            priority: 99,
        }),
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        // 종료
        KeyBinding {
            code: KeyCode::Char('q'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::F(10),
            modifiers: None,
            action: Action::Quit,
        },
        // 서비스 제어
        KeyBinding {
            code: KeyCode::Char('s'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::StartService,
        },
        KeyBinding {
            code: KeyCode::Char('x'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::StopService,
        },
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::RestartService,
        },
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Refresh,
        },
        KeyBinding {
            code: KeyCode::F(5),
            modifiers: None,
            action: Action::Refresh,
        },
        KeyBinding {
            code: KeyCode::Char('e'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::EditConfig,
        },
        KeyBinding {
            code: KeyCode::Char('u'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::CreateUser,
        },
        // 로그 스크롤: Vim
        KeyBinding {
            code: KeyCode::Char('j'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ScrollDown,
        },
        KeyBinding {
            code: KeyCode::Down,
            modifiers: None,
            action: Action::ScrollDown,
        },
        KeyBinding {
            code: KeyCode::Char('k'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ScrollUp,
        },
        KeyBinding {
            code: KeyCode::Up,
            modifiers: None,
            action: Action::ScrollUp,
        },
        KeyBinding {
            code: KeyCode::PageUp,
            modifiers: None,
            action: Action::PageUp,
        },
        KeyBinding {
            code: KeyCode::PageDown,
            modifiers: None,
            action: Action::PageDown,
        },
        KeyBinding {
            code: KeyCode::Char('g'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ScrollTop,
        },
        KeyBinding {
            code: KeyCode::Home,
            modifiers: None,
            action: Action::ScrollTop,
        },
        // 'G'는 터미널에 따라 SHIFT가 붙어서 들어옴
        KeyBinding {
            code: KeyCode::Char('G'),
            modifiers: None,
            action: Action::ScrollBottom,
        },
        KeyBinding {
            code: KeyCode::End,
            modifiers: None,
            action: Action::ScrollBottom,
        },
        // 시스템
        KeyBinding {
            code: KeyCode::Char('?'),
            modifiers: None,
            action: Action::ShowHelp,
        },
        KeyBinding {
            code: KeyCode::F(1),
            modifiers: None,
            action: Action::ShowHelp,
        },
        KeyBinding {
            code: KeyCode::Char('t'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::CycleTheme,
        },
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    for binding in key_bindings() {
        let code_matches = binding.code == code;
        let mod_matches = match binding.modifiers {
            None => true, // any modifier
            Some(required) => modifiers == required,
        };
        if code_matches && mod_matches {
            return Some(binding.action);
        }
    }
    None
}

impl Action {
    /// 로그 기록용 액션 식별자
    pub fn id(&self) -> &'static str {
        ACTION_DEFS
            .iter()
            .find(|d| d.action == *self)
            .map(|d| d.id)
            .unwrap_or("unknown")
    }
}

/// 커맨드바용 항목 생성 (priority 순 정렬)
pub fn generate_command_bar_items() -> Vec<CommandItem> {
    let mut entries: Vec<&CommandBarEntry> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref())
        .collect();

    entries.sort_by_key(|cb| cb.priority);

    entries
        .into_iter()
        .map(|cb| CommandItem::new(cb.key, cb.label))
        .collect()
}

/// 도움말 다이얼로그용 엔트리 생성
///
/// 반환: (카테고리명, Vec<(단축키, 설명)>) 목록
pub fn generate_help_entries() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    [
        ActionCategory::Service,
        ActionCategory::LogView,
        ActionCategory::System,
    ]
    .iter()
    .map(|cat| {
        let items: Vec<(&'static str, &'static str)> = ACTION_DEFS
            .iter()
            .filter(|d| d.category == *cat)
            .filter_map(|d| d.shortcut_display.map(|key| (key, d.label)))
            .collect();
        (cat.title(), items)
    })
    .filter(|(_, items)| !items.is_empty())
    .collect()
}
