// Info panel component - 서버 정보 박스
//
// 서비스 상태, IP 주소, FTP 포트를 세 줄로 표시

use crate::models::ServerInfo;
use crate::system::ServiceState;
use crate::ui::Theme;
use crate::utils::path_display::display_path;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const LABEL_WIDTH: usize = 10;

/// 서버 정보 패널
pub struct InfoPanel<'a> {
    info: &'a ServerInfo,
    border_color: Color,
    title_color: Color,
    label_color: Color,
    fg_color: Color,
    dim_color: Color,
    bg_color: Color,
    running_color: Color,
    stopped_color: Color,
    transition_color: Color,
}

impl<'a> InfoPanel<'a> {
    pub fn new(info: &'a ServerInfo) -> Self {
        Self {
            info,
            border_color: Color::Rgb(60, 60, 60),
            title_color: Color::Rgb(86, 156, 214),
            label_color: Color::Rgb(156, 220, 254),
            fg_color: Color::Rgb(212, 212, 212),
            dim_color: Color::Rgb(128, 128, 128),
            bg_color: Color::Rgb(30, 30, 30),
            running_color: Color::Green,
            stopped_color: Color::Red,
            transition_color: Color::Yellow,
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.border_color = theme.panel_border.to_color();
        self.title_color = theme.panel_title.to_color();
        self.label_color = theme.label.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.dim_color = theme.fg_dim.to_color();
        self.bg_color = theme.panel_bg.to_color();
        self.running_color = theme.success.to_color();
        self.stopped_color = theme.error.to_color();
        self.transition_color = theme.warning.to_color();
        self
    }

    fn state_color(&self) -> Color {
        match self.info.state {
            ServiceState::Active => self.running_color,
            ServiceState::Activating | ServiceState::Deactivating => self.transition_color,
            ServiceState::Failed | ServiceState::Inactive => self.stopped_color,
            ServiceState::Unknown(_) => self.dim_color,
        }
    }

    fn row(&self, label: &str, value: Vec<Span<'a>>) -> Line<'a> {
        let mut spans = vec![Span::styled(
            format!("{:<width$}", label, width = LABEL_WIDTH),
            Style::default().fg(self.label_color),
        )];
        spans.extend(value);
        Line::from(spans)
    }
}

impl Widget for InfoPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Server ")
            .title_style(
                Style::default()
                    .fg(self.title_color)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .style(Style::default().bg(self.bg_color));

        let status = self.row(
            "Status",
            vec![
                Span::styled("● ", Style::default().fg(self.state_color())),
                Span::styled(
                    self.info.state.label().to_string(),
                    Style::default()
                        .fg(self.state_color())
                        .add_modifier(Modifier::BOLD),
                ),
            ],
        );

        let ip = self.row(
            "IP",
            vec![Span::styled(
                self.info.ip.clone(),
                Style::default().fg(self.fg_color),
            )],
        );

        // 포트 출처 파일은 남는 폭만큼만 표시
        let port_label = self.info.port_label();
        let mut port_value = vec![Span::styled(
            port_label.clone(),
            Style::default().fg(self.fg_color),
        )];
        if let Some(source) = &self.info.port.source {
            let used = LABEL_WIDTH + port_label.len() + 3;
            let room = (area.width as usize).saturating_sub(used + 4);
            if room > 8 {
                port_value.push(Span::styled(
                    format!("  {}", display_path(source, room)),
                    Style::default().fg(self.dim_color),
                ));
            }
        }
        let port = self.row("Port", port_value);

        Paragraph::new(vec![status, ip, port])
            .block(block)
            .render(area, buf);
    }
}
