// Log panel component - 데몬 로그 뷰
//
// journalctl 출력의 보이는 구간과 스크롤바, 위치 표시

use crate::models::LogView;
use crate::ui::Theme;
use crate::utils::formatter::pluralize;
use crate::utils::path_display::truncate_end;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// 로그 패널
pub struct LogPanel<'a> {
    view: &'a LogView,
    title: &'a str,
    border_color: Color,
    title_color: Color,
    fg_color: Color,
    dim_color: Color,
    bg_color: Color,
}

impl<'a> LogPanel<'a> {
    pub fn new(view: &'a LogView) -> Self {
        Self {
            view,
            title: "Logs",
            border_color: Color::Rgb(60, 60, 60),
            title_color: Color::Rgb(86, 156, 214),
            fg_color: Color::Rgb(212, 212, 212),
            dim_color: Color::Rgb(128, 128, 128),
            bg_color: Color::Rgb(30, 30, 30),
        }
    }

    /// 제목 설정 (예: "journalctl -u proftpd")
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.border_color = theme.panel_border.to_color();
        self.title_color = theme.panel_title.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.dim_color = theme.fg_dim.to_color();
        self.bg_color = theme.panel_bg.to_color();
        self
    }

    /// 하단 위치 표시 (예: "91-100/100")
    fn position_label(&self) -> String {
        let total = self.view.len();
        let visible = self.view.visible().len();
        if total == 0 {
            return pluralize(0, "line", "lines");
        }
        let first = self.view.scroll_offset() + 1;
        format!("{}-{}/{}", first, first + visible - 1, total)
    }

    fn render_scrollbar(&self, buf: &mut Buffer, area: Rect, inner: Rect) {
        let total = self.view.len();
        let track_height = inner.height as usize;
        if total <= track_height || track_height == 0 {
            return;
        }

        let max_scroll = total - track_height;
        let thumb_height = (track_height * track_height / total).max(1);
        let thumb_pos =
            self.view.scroll_offset().min(max_scroll) * (track_height - thumb_height) / max_scroll;

        let scrollbar_x = area.x + area.width - 1;
        let track_style = Style::default().fg(self.border_color);
        let thumb_style = Style::default().fg(self.dim_color);

        for i in 0..track_height {
            let sy = inner.y + i as u16;
            let (symbol, style) = if i >= thumb_pos && i < thumb_pos + thumb_height {
                ("┃", thumb_style)
            } else {
                ("│", track_style)
            };
            buf.set_string(scrollbar_x, sy, symbol, style);
        }
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(self.title_color)
                    .add_modifier(Modifier::BOLD),
            )
            .title_bottom(
                Line::styled(
                    format!(" {} ", self.position_label()),
                    Style::default().fg(self.dim_color),
                )
                .right_aligned(),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .style(Style::default().bg(self.bg_color));

        let inner = block.inner(area);
        block.render(area, buf);

        let max_width = inner.width.saturating_sub(1) as usize;
        let lines: Vec<Line> = if self.view.is_empty() {
            vec![Line::styled(
                "(no log output)",
                Style::default().fg(self.dim_color),
            )]
        } else {
            self.view
                .visible()
                .iter()
                .take(inner.height as usize)
                .map(|line| {
                    Line::styled(truncate_end(line, max_width), Style::default().fg(self.fg_color))
                })
                .collect()
        };
        Paragraph::new(lines).render(inner, buf);

        self.render_scrollbar(buf, area, inner);
    }
}
