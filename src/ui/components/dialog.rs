//! 다이얼로그 시스템
//!
//! 메시지/에러 알림, 서버 중지 확인, FTP 사용자 생성 폼, 단축키 도움말

use crate::core::actions::generate_help_entries;
use crate::models::{FormFocus, TextField, UserForm};
use crate::system::ServiceAction;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;
/// 다이얼로그 내부 상단 패딩 (border 아래 여백)
const DIALOG_V_PADDING: u16 = 1;
/// 사용자 폼 레이블 열 너비
const FORM_LABEL_WIDTH: u16 = 16;

/// 다이얼로그 종류
#[derive(Debug, Clone)]
pub enum DialogKind {
    /// 에러 다이얼로그 (명령 출력 원문 포함)
    Error { title: String, message: String },
    /// 메시지 다이얼로그 (정보 표시)
    Message { title: String, message: String },
    /// 확인 다이얼로그 (OK/Cancel)
    Confirm {
        title: String,
        message: String,
        selected_button: usize, // 0: OK, 1: Cancel
        /// OK 시 실행할 서비스 동작
        action: ServiceAction,
    },
    /// FTP 사용자 생성 폼
    UserForm(UserForm),
    /// 단축키 도움말 다이얼로그
    Help { scroll_offset: usize },
}

impl DialogKind {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn message(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Message {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn confirm(
        title: impl Into<String>,
        message: impl Into<String>,
        action: ServiceAction,
    ) -> Self {
        DialogKind::Confirm {
            title: title.into(),
            message: message.into(),
            selected_button: 0,
            action,
        }
    }

    pub fn user_form() -> Self {
        DialogKind::UserForm(UserForm::new())
    }

    pub fn help() -> Self {
        DialogKind::Help { scroll_offset: 0 }
    }
}

/// 다이얼로그 위젯
pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    dim_color: Color,
    border_color: Color,
    title_color: Color,
    error_color: Color,
    key_color: Color,
    button_bg: Color,
    button_fg: Color,
    button_selected_bg: Color,
    button_selected_fg: Color,
    input_bg: Color,
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self {
            kind,
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::Rgb(212, 212, 212),
            dim_color: Color::Rgb(128, 128, 128),
            border_color: Color::Rgb(0, 120, 212),
            title_color: Color::Rgb(0, 120, 212),
            error_color: Color::Rgb(244, 71, 71),
            key_color: Color::Rgb(86, 156, 214),
            button_bg: Color::Rgb(60, 60, 60),
            button_fg: Color::Rgb(212, 212, 212),
            button_selected_bg: Color::Rgb(0, 120, 212),
            button_selected_fg: Color::White,
            input_bg: Color::Rgb(30, 30, 30),
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.panel_bg.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.dim_color = theme.fg_dim.to_color();
        self.border_color = theme.accent.to_color();
        self.title_color = theme.accent.to_color();
        self.error_color = theme.error.to_color();
        self.key_color = theme.label.to_color();
        self.button_bg = theme.command_bar_bg.to_color();
        self.button_fg = theme.fg_primary.to_color();
        self.button_selected_bg = theme.selected_bg.to_color();
        self.button_selected_fg = theme.selected_fg.to_color();
        self.input_bg = theme.input_bg.to_color();
        self
    }

    /// 다이얼로그 영역 계산 (화면 중앙, 반응형)
    fn calculate_area(&self, screen: Rect) -> Rect {
        let sw = screen.width;
        let sh = screen.height;

        let (width, height) = match self.kind {
            DialogKind::Error { message, .. } | DialogKind::Message { message, .. } => {
                let w = 64u16.min(sw.saturating_sub(4)).max(30);
                let text_width = w.saturating_sub(DIALOG_H_PADDING * 2 + 2).max(1) as usize;
                // 줄바꿈 후 줄 수 추정
                let lines: usize = message
                    .lines()
                    .map(|l| l.width().max(1).div_ceil(text_width))
                    .sum::<usize>()
                    .max(1);
                let h = (6 + lines as u16).min(sh.saturating_sub(4)).max(6);
                (w, h)
            }
            DialogKind::Confirm { .. } => (46u16.min(sw.saturating_sub(4)).max(25), 8u16),
            DialogKind::UserForm(_) => (60u16.min(sw.saturating_sub(4)).max(40), 12u16),
            DialogKind::Help { .. } => {
                let w = 56u16.min(sw.saturating_sub(4)).max(40);
                let h = sh.saturating_sub(6).max(12);
                (w, h)
            }
        };

        let width = width.min(sw.saturating_sub(4));
        let height = height.min(sh.saturating_sub(4));

        let x = screen.x + (sw.saturating_sub(width)) / 2;
        let y = screen.y + (sh.saturating_sub(height)) / 2;

        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// 테두리 + 제목, 패딩 적용된 내부 영역 반환 (에러는 빨간 테두리)
    fn frame(&self, buf: &mut Buffer, area: Rect, title: &str, is_error: bool) -> Rect {
        let (title_color, border_color) = if is_error {
            (self.error_color, self.error_color)
        } else {
            (self.title_color, self.border_color)
        };
        let block = Block::default()
            .title(format!(" {} ", title))
            .title_style(
                Style::default()
                    .fg(title_color)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.bg_color));
        block.render(area, buf);

        Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(DIALOG_V_PADDING * 2),
        }
    }

    /// 버튼 렌더링 헬퍼
    fn render_button(
        &self,
        buf: &mut Buffer,
        x: u16,
        y: u16,
        label: &str,
        is_selected: bool,
    ) -> u16 {
        let (bg, fg) = if is_selected {
            (self.button_selected_bg, self.button_selected_fg)
        } else {
            (self.button_bg, self.button_fg)
        };

        let padded_label = format!(" {} ", label);
        let width = padded_label.width() as u16;
        buf.set_string(x, y, &padded_label, Style::default().fg(fg).bg(bg));
        width
    }

    /// OK/Cancel 버튼 쌍 (하단 중앙)
    fn render_ok_cancel(&self, buf: &mut Buffer, area: Rect, selected: Option<usize>) {
        let button_y = area.y + area.height.saturating_sub(2);
        let buttons_width = 14; // " OK "  " Cancel "
        let button_x = area.x + (area.width.saturating_sub(buttons_width)) / 2;

        let ok_width = self.render_button(buf, button_x, button_y, "OK", selected == Some(0));
        self.render_button(
            buf,
            button_x + ok_width + 2,
            button_y,
            "Cancel",
            selected == Some(1),
        );
    }

    /// 한 줄 입력 필드 (cursor_pos는 표시 문자열 기준 바이트 인덱스)
    fn render_text_field(
        &self,
        buf: &mut Buffer,
        x: u16,
        y: u16,
        width: u16,
        value: &str,
        cursor_pos: Option<usize>,
    ) {
        for fx in x..x + width {
            if let Some(cell) = buf.cell_mut((fx, y)) {
                cell.set_bg(self.input_bg);
            }
        }

        // 커서가 보이도록 앞부분을 잘라냄
        let max_display = width.saturating_sub(2) as usize;
        let cursor = cursor_pos.unwrap_or(value.len()).min(value.len());
        let cursor_col = value[..cursor].width();
        let mut start = 0;
        let mut skipped = 0;
        if cursor_col >= max_display {
            let target = cursor_col + 1 - max_display;
            start = value.len();
            for (i, c) in value.char_indices() {
                if skipped >= target {
                    start = i;
                    break;
                }
                skipped += c.width().unwrap_or(0);
            }
        }
        let display = &value[start..];

        let value_style = Style::default().fg(self.fg_color).bg(self.input_bg);
        buf.set_stringn(x + 1, y, display, max_display, value_style);

        if cursor_pos.is_some() {
            let cursor_x = x + 1 + cursor_col.saturating_sub(skipped) as u16;
            if cursor_x < x + width.saturating_sub(1) {
                if let Some(cell) = buf.cell_mut((cursor_x, y)) {
                    if cursor < value.len() {
                        cell.set_style(Style::default().fg(self.input_bg).bg(self.fg_color));
                    } else {
                        cell.set_char('▏');
                        cell.set_style(Style::default().fg(self.fg_color).bg(self.input_bg));
                    }
                }
            }
        }
    }

    /// 에러/메시지 다이얼로그 렌더링
    fn render_message(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &str,
        message: &str,
        is_error: bool,
    ) {
        let inner = self.frame(buf, area, title, is_error);
        let text_area = Rect {
            height: inner.height.saturating_sub(2),
            ..inner
        };

        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: false })
            .render(text_area, buf);

        let button_y = area.y + area.height.saturating_sub(2);
        let button_x = area.x + (area.width.saturating_sub(6)) / 2;
        self.render_button(buf, button_x, button_y, "OK", true);
    }

    /// 확인 다이얼로그 렌더링
    fn render_confirm(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &str,
        message: &str,
        selected_button: usize,
    ) {
        let inner = self.frame(buf, area, title, false);
        let msg_area = Rect {
            height: inner.height.saturating_sub(2),
            ..inner
        };
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(msg_area, buf);

        self.render_ok_cancel(buf, area, Some(selected_button));
    }

    /// FTP 사용자 생성 폼 렌더링
    fn render_user_form(&self, buf: &mut Buffer, area: Rect, form: &UserForm) {
        let inner = self.frame(buf, area, "Create FTP User", false);

        let label_style = Style::default().fg(self.fg_color);
        let focused_label_style = Style::default()
            .fg(self.title_color)
            .add_modifier(Modifier::BOLD);
        let field_x = inner.x + FORM_LABEL_WIDTH;
        let field_width = inner.width.saturating_sub(FORM_LABEL_WIDTH);

        let rows: [(&str, &TextField, FormFocus, bool); 3] = [
            ("Username:", &form.username, FormFocus::Username, false),
            ("Password:", &form.password, FormFocus::Password, true),
            ("Shared folder:", &form.folder, FormFocus::Folder, false),
        ];

        for (i, (label, field, focus, masked)) in rows.iter().enumerate() {
            let y = inner.y + (i as u16) * 2;
            let is_focused = form.focus == *focus;
            let style = if is_focused {
                focused_label_style
            } else {
                label_style
            };
            buf.set_string(inner.x, y, label, style);

            let (value, cursor) = if *masked {
                (field.masked(), field.masked_cursor())
            } else {
                (field.value.clone(), field.cursor_pos)
            };
            self.render_text_field(
                buf,
                field_x,
                y,
                field_width,
                &value,
                is_focused.then_some(cursor),
            );
        }

        let hint = "Tab:Next field  Enter:OK  Esc:Cancel";
        let hint_x = area.x + (area.width.saturating_sub(hint.len() as u16)) / 2;
        buf.set_string(
            hint_x,
            inner.y + 6,
            hint,
            Style::default().fg(self.dim_color),
        );

        let selected = (form.focus == FormFocus::Buttons).then_some(form.selected_button);
        self.render_ok_cancel(buf, area, selected);
    }

    /// 도움말 다이얼로그 렌더링
    fn render_help(&self, buf: &mut Buffer, area: Rect, scroll_offset: usize) {
        self.frame(buf, area, "Keyboard Shortcuts", false);

        let inner = Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(3), // 하단 힌트 공간 확보
        };

        let header_style = Style::default()
            .fg(self.title_color)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default().fg(self.key_color);
        let desc_style = Style::default().fg(self.fg_color);

        // 도움말 내용 (액션 레지스트리에서 생성)
        let mut all_rows: Vec<(bool, &str, &str)> = Vec::new(); // (is_header, col1, col2)
        for (category, items) in generate_help_entries() {
            all_rows.push((true, category, ""));
            for (key, desc) in items {
                all_rows.push((false, key, desc));
            }
            all_rows.push((false, "", ""));
        }

        let visible_height = inner.height as usize;
        let max_scroll = all_rows.len().saturating_sub(visible_height);
        let effective_scroll = scroll_offset.min(max_scroll);
        let key_col_width = 16u16;

        for (i, row) in all_rows
            .iter()
            .skip(effective_scroll)
            .take(visible_height)
            .enumerate()
        {
            let y = inner.y + i as u16;
            if row.0 {
                buf.set_string(inner.x, y, row.1, header_style);
            } else if !row.1.is_empty() {
                buf.set_string(inner.x + 2, y, row.1, key_style);
                buf.set_string(inner.x + key_col_width, y, row.2, desc_style);
            }
        }

        // 스크롤바 (내용이 화면보다 많을 때만)
        let total_items = all_rows.len();
        if total_items > visible_height && visible_height > 0 {
            let track_height = visible_height;
            let thumb_height = (track_height * track_height / total_items).max(1);
            let thumb_pos = effective_scroll * (track_height.saturating_sub(thumb_height)) / max_scroll;
            let scrollbar_x = area.x + area.width - 2;

            for i in 0..track_height {
                let sy = inner.y + i as u16;
                let (symbol, color) = if i >= thumb_pos && i < thumb_pos + thumb_height {
                    ("┃", self.fg_color)
                } else {
                    ("│", self.dim_color)
                };
                buf.set_string(scrollbar_x, sy, symbol, Style::default().fg(color));
            }
        }

        let hint = "Esc/?:Close  j/k:Scroll";
        let hint_x = area.x + (area.width.saturating_sub(hint.len() as u16)) / 2;
        let hint_y = area.y + area.height - 2;
        buf.set_string(hint_x, hint_y, hint, Style::default().fg(self.dim_color));
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = self.calculate_area(area);
        if dialog_area.width < 4 || dialog_area.height < 4 {
            return;
        }

        // 배경 클리어
        Clear.render(dialog_area, buf);

        match self.kind {
            DialogKind::Error { title, message } => {
                self.render_message(buf, dialog_area, title, message, true);
            }
            DialogKind::Message { title, message } => {
                self.render_message(buf, dialog_area, title, message, false);
            }
            DialogKind::Confirm {
                title,
                message,
                selected_button,
                ..
            } => {
                self.render_confirm(buf, dialog_area, title, message, *selected_button);
            }
            DialogKind::UserForm(form) => {
                self.render_user_form(buf, dialog_area, form);
            }
            DialogKind::Help { scroll_offset } => {
                self.render_help(buf, dialog_area, *scroll_offset);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(kind: &DialogKind, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        Dialog::new(kind).render(area, &mut buf);

        let mut rendered = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                if let Some(cell) = buf.cell((x, y)) {
                    rendered.push_str(cell.symbol());
                }
            }
            rendered.push('\n');
        }
        rendered
    }

    #[test]
    fn test_dialog_confirm_creation() {
        let dialog = DialogKind::confirm("Stop server", "Stop proftpd?", ServiceAction::Stop);
        match dialog {
            DialogKind::Confirm {
                title,
                message,
                selected_button,
                action,
            } => {
                assert_eq!(title, "Stop server");
                assert_eq!(message, "Stop proftpd?");
                assert_eq!(selected_button, 0);
                assert_eq!(action, ServiceAction::Stop);
            }
            _ => panic!("Expected Confirm dialog"),
        }
    }

    #[test]
    fn test_error_dialog_renders_output_verbatim() {
        let kind = DialogKind::error(
            "Error",
            "Start failed.\nReason: Job for proftpd.service failed.",
        );
        let rendered = render_to_string(&kind, 80, 24);
        assert!(rendered.contains(" Error "));
        assert!(rendered.contains("Start failed."));
        assert!(rendered.contains("Job for proftpd.service failed."));
        assert!(rendered.contains(" OK "));
    }

    #[test]
    fn test_user_form_masks_password() {
        let mut form = UserForm::new();
        form.username = TextField::with_value("bob");
        form.password = TextField::with_value("s3cret");
        form.folder = TextField::with_value("/srv/ftp/bob");
        let rendered = render_to_string(&DialogKind::UserForm(form), 80, 24);

        assert!(rendered.contains("Create FTP User"));
        assert!(rendered.contains("bob"));
        assert!(rendered.contains("******"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("/srv/ftp/bob"));
    }

    #[test]
    fn test_long_field_keeps_cursor_visible() {
        let mut form = UserForm::new();
        form.focus = FormFocus::Folder;
        form.folder = TextField::with_value(format!("/srv/{}/end", "x".repeat(80)));
        let rendered = render_to_string(&DialogKind::UserForm(form), 80, 24);
        assert!(rendered.contains("x/end▏"));
    }

    #[test]
    fn test_help_lists_registry_shortcuts() {
        let rendered = render_to_string(&DialogKind::help(), 80, 40);
        assert!(rendered.contains("Keyboard Shortcuts"));
        assert!(rendered.contains("Server"));
        assert!(rendered.contains("Stop server"));
        assert!(rendered.contains("Esc/?:Close"));
    }

    #[test]
    fn test_tiny_screen_does_not_panic() {
        render_to_string(&DialogKind::user_form(), 5, 3);
        render_to_string(&DialogKind::help(), 10, 6);
    }
}
