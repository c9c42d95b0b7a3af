// Status bar component - 상태바 컴포넌트
//
// 유닛 이름, 마지막 새로고침 시각, 토스트 메시지, 테마 이름 표시

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 상태바 컴포넌트
pub struct StatusBar<'a> {
    /// systemd 유닛 이름
    unit: &'a str,
    /// 마지막 새로고침 시각 (포맷된 문자열)
    refreshed_at: &'a str,
    /// 토스트 메시지 (있을 경우 왼쪽 정보 대신 표시)
    toast: Option<&'a str>,
    /// 오른쪽에 표시할 테마 이름
    theme_name: &'a str,
    bg_color: Color,
    fg_color: Color,
    dim_color: Color,
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self {
            unit: "proftpd",
            refreshed_at: "never",
            toast: None,
            theme_name: "dark",
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            dim_color: Color::Rgb(100, 100, 100),
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit(mut self, unit: &'a str) -> Self {
        self.unit = unit;
        self
    }

    pub fn refreshed_at(mut self, refreshed_at: &'a str) -> Self {
        self.refreshed_at = refreshed_at;
        self
    }

    pub fn toast(mut self, toast: Option<&'a str>) -> Self {
        self.toast = toast;
        self
    }

    pub fn theme_name(mut self, name: &'a str) -> Self {
        self.theme_name = name;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.dim_color = theme.fg_dim.to_color();
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // 배경 채우기
        buf.set_style(area, Style::default().bg(self.bg_color));

        let (left_info, left_style) = match self.toast {
            Some(message) => (
                format!(" {}", message),
                Style::default()
                    .fg(self.fg_color)
                    .add_modifier(Modifier::BOLD),
            ),
            None => (
                format!(" {}.service | refreshed {}", self.unit, self.refreshed_at),
                Style::default().fg(self.fg_color),
            ),
        };
        let right_info = format!("[{}] ", self.theme_name);

        // 가용 공간 계산
        let padding_len = (area.width as usize)
            .saturating_sub(left_info.width() + right_info.width());

        let spans = vec![
            Span::styled(left_info, left_style),
            Span::raw(" ".repeat(padding_len)),
            Span::styled(right_info, Style::default().fg(self.dim_color)),
        ];

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_text(bar: StatusBar<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width)
            .filter_map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn test_status_bar_shows_unit_and_refresh_time() {
        let text = render_text(
            StatusBar::new()
                .unit("proftpd")
                .refreshed_at("12:34:56")
                .theme_name("light"),
            60,
        );
        assert!(text.starts_with(" proftpd.service | refreshed 12:34:56"));
        assert!(text.trim_end().ends_with("[light]"));
    }

    #[test]
    fn test_status_bar_toast_replaces_left_info() {
        let text = render_text(StatusBar::new().toast(Some("proftpd started")), 60);
        assert!(text.starts_with(" proftpd started"));
        assert!(!text.contains("refreshed"));
    }
}
