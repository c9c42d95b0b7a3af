use crate::models::TextField;

/// 사용자 생성 폼의 포커스 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    #[default]
    Username,
    Password,
    Folder,
    /// OK / Cancel 버튼 줄
    Buttons,
}

impl FormFocus {
    fn next(self) -> Self {
        match self {
            FormFocus::Username => FormFocus::Password,
            FormFocus::Password => FormFocus::Folder,
            FormFocus::Folder => FormFocus::Buttons,
            FormFocus::Buttons => FormFocus::Username,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormFocus::Username => FormFocus::Buttons,
            FormFocus::Password => FormFocus::Username,
            FormFocus::Folder => FormFocus::Password,
            FormFocus::Buttons => FormFocus::Folder,
        }
    }
}

/// FTP 사용자 생성 폼
///
/// 입력값은 계정 생성 명령에 바로 넘긴 뒤 버린다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub username: TextField,
    /// 화면에는 마스킹되어 표시
    pub password: TextField,
    pub folder: TextField,
    pub focus: FormFocus,
    pub selected_button: usize, // 0: OK, 1: Cancel
}

impl UserForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    /// 포커스된 입력 필드 (버튼 줄이면 None)
    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            FormFocus::Username => Some(&mut self.username),
            FormFocus::Password => Some(&mut self.password),
            FormFocus::Folder => Some(&mut self.folder),
            FormFocus::Buttons => None,
        }
    }

    pub fn toggle_button(&mut self) {
        self.selected_button = 1 - self.selected_button.min(1);
    }

    /// Enter가 제출을 뜻하는지 (입력 필드에서의 Enter도 OK로 취급)
    pub fn is_submit(&self) -> bool {
        self.focus != FormFocus::Buttons || self.selected_button == 0
    }
}
