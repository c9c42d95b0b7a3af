use super::*;
use crate::models::TextField;

impl App {
    // === 사용자 폼 입력 처리 ===

    /// 포커스된 입력 필드에 편집 적용 (버튼 줄이면 무시)
    fn with_focused_field(&mut self, edit: impl FnOnce(&mut TextField)) {
        if let Some(DialogKind::UserForm(form)) = &mut self.dialog {
            if let Some(field) = form.focused_field_mut() {
                edit(field);
            }
        }
    }

    pub fn dialog_form_char(&mut self, c: char) {
        self.with_focused_field(|field| field.insert_char(c));
    }

    pub fn dialog_form_backspace(&mut self) {
        self.with_focused_field(TextField::backspace);
    }

    pub fn dialog_form_delete(&mut self) {
        self.with_focused_field(TextField::delete);
    }

    /// 이전 단어 삭제 (Ctrl+W)
    pub fn dialog_form_delete_prev_word(&mut self) {
        self.with_focused_field(TextField::delete_prev_word);
    }

    pub fn dialog_form_left(&mut self) {
        self.with_focused_field(TextField::left);
    }

    pub fn dialog_form_right(&mut self) {
        self.with_focused_field(TextField::right);
    }

    pub fn dialog_form_home(&mut self) {
        self.with_focused_field(TextField::home);
    }

    pub fn dialog_form_end(&mut self) {
        self.with_focused_field(TextField::end);
    }

    pub fn dialog_form_next_focus(&mut self) {
        if let Some(DialogKind::UserForm(form)) = &mut self.dialog {
            form.next_focus();
        }
    }

    pub fn dialog_form_prev_focus(&mut self) {
        if let Some(DialogKind::UserForm(form)) = &mut self.dialog {
            form.prev_focus();
        }
    }

    /// 버튼 줄에서 OK/Cancel 전환
    pub fn dialog_form_toggle_button(&mut self) {
        if let Some(DialogKind::UserForm(form)) = &mut self.dialog {
            form.toggle_button();
        }
    }

    /// 폼에서 Enter: 제출 또는 취소
    pub fn dialog_form_enter(&mut self) {
        let submit = match &self.dialog {
            Some(DialogKind::UserForm(form)) => form.is_submit(),
            _ => return,
        };
        if submit {
            self.confirm_user_form();
        } else {
            self.close_dialog();
        }
    }

    // === 확인 다이얼로그 ===

    /// 확인 다이얼로그 버튼 토글
    pub fn dialog_confirm_toggle(&mut self) {
        if let Some(DialogKind::Confirm {
            selected_button, ..
        }) = &mut self.dialog
        {
            *selected_button = if *selected_button == 0 { 1 } else { 0 };
        }
    }

    /// 확인 다이얼로그 확정 (OK면 보류된 서비스 동작을 큐에 넣는다)
    pub fn dialog_confirm_enter(&mut self) {
        let pending = match &self.dialog {
            Some(DialogKind::Confirm {
                selected_button,
                action,
                ..
            }) => (*selected_button == 0).then_some(*action),
            _ => return,
        };
        self.close_dialog();
        if let Some(action) = pending {
            self.queue_privileged_task(PrivilegedTask::Service(action));
        }
    }

    // === 도움말 ===

    /// 도움말 스크롤 아래로
    pub fn dialog_help_scroll_down(&mut self) {
        if let Some(DialogKind::Help { scroll_offset }) = &mut self.dialog {
            *scroll_offset += 1;
        }
    }

    /// 도움말 스크롤 위로
    pub fn dialog_help_scroll_up(&mut self) {
        if let Some(DialogKind::Help { scroll_offset }) = &mut self.dialog {
            *scroll_offset = scroll_offset.saturating_sub(1);
        }
    }
}
