use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 색상 테마 시스템
///
/// 애플리케이션 전체의 색상 테마를 관리합니다.
/// TOML 파일에서 테마를 로드하거나 미리 정의된 테마를 사용할 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    // 배경/전경
    pub bg_primary: ColorDef,
    pub fg_primary: ColorDef,
    pub fg_dim: ColorDef,

    // 패널 (서버 정보, 로그)
    pub panel_border: ColorDef,
    pub panel_title: ColorDef,
    pub panel_bg: ColorDef,
    pub label: ColorDef,

    // 다이얼로그 버튼/입력
    pub selected_fg: ColorDef,
    pub selected_bg: ColorDef,
    pub input_bg: ColorDef,

    // UI 컴포넌트
    pub header_bg: ColorDef,
    pub header_fg: ColorDef,
    pub status_bar_bg: ColorDef,
    pub status_bar_fg: ColorDef,
    pub command_bar_bg: ColorDef,
    pub command_bar_fg: ColorDef,

    // 강조
    pub accent: ColorDef,
    pub warning: ColorDef,
    pub error: ColorDef,
    pub success: ColorDef,
}

/// 색상 정의 (TOML 직렬화/역직렬화 지원)
///
/// Hex 문자열("#1e1e1e") 또는 색상 이름("Red")을 지원합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Hex(String),
    Named(String),
}

impl ColorDef {
    /// ColorDef를 ratatui의 Color로 변환
    pub fn to_color(&self) -> Color {
        match self {
            // untagged라 TOML에서는 항상 Hex로 들어오므로 접두어로 구분
            ColorDef::Hex(value) | ColorDef::Named(value) if value.starts_with('#') => {
                parse_hex_color(value)
            }
            ColorDef::Hex(name) | ColorDef::Named(name) => parse_named_color(name),
        }
    }
}

impl From<&str> for ColorDef {
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            ColorDef::Hex(s.to_string())
        } else {
            ColorDef::Named(s.to_string())
        }
    }
}

/// Hex 색상 문자열을 Color로 파싱
fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 && hex.is_ascii() {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color::Rgb(r, g, b)
    } else {
        Color::Reset
    }
}

/// 색상 이름을 Color로 파싱
fn parse_named_color(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

impl Theme {
    /// Dark 테마 (기본)
    pub fn dark() -> Self {
        Theme {
            bg_primary: "#1e1e1e".into(),
            fg_primary: "#d4d4d4".into(),
            fg_dim: "#808080".into(),

            panel_border: "#3c3c3c".into(),
            panel_title: "#569cd6".into(),
            panel_bg: "#1e1e1e".into(),
            label: "#9cdcfe".into(),

            selected_fg: "#ffffff".into(),
            selected_bg: "#0078d4".into(),
            input_bg: "#2d2d30".into(),

            header_bg: "#2d2d30".into(),
            header_fg: "#ffffff".into(),
            status_bar_bg: "#007acc".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#2d2d30".into(),
            command_bar_fg: "#cccccc".into(),

            accent: "#0078d4".into(),
            warning: "#ffa500".into(),
            error: "#f44747".into(),
            success: "#4ec9b0".into(),
        }
    }

    /// Light 테마
    pub fn light() -> Self {
        Theme {
            bg_primary: "#ffffff".into(),
            fg_primary: "#1e1e1e".into(),
            fg_dim: "#6e6e6e".into(),

            panel_border: "#cccccc".into(),
            panel_title: "#0066cc".into(),
            panel_bg: "#ffffff".into(),
            label: "#0451a5".into(),

            selected_fg: "#000000".into(),
            selected_bg: "#add6ff".into(),
            input_bg: "#f3f3f3".into(),

            header_bg: "#0078d4".into(),
            header_fg: "#ffffff".into(),
            status_bar_bg: "#0078d4".into(),
            status_bar_fg: "#ffffff".into(),
            command_bar_bg: "#f3f3f3".into(),
            command_bar_fg: "#1e1e1e".into(),

            accent: "#0078d4".into(),
            warning: "#ff8c00".into(),
            error: "#e51400".into(),
            success: "#107c10".into(),
        }
    }

    /// High Contrast 테마
    pub fn high_contrast() -> Self {
        Theme {
            bg_primary: "#000000".into(),
            fg_primary: "#ffffff".into(),
            fg_dim: "#c0c0c0".into(),

            panel_border: "#00ff00".into(),
            panel_title: "#ffff00".into(),
            panel_bg: "#000000".into(),
            label: "#00ffff".into(),

            selected_fg: "#000000".into(),
            selected_bg: "#00ff00".into(),
            input_bg: "#1a1a1a".into(),

            header_bg: "#000000".into(),
            header_fg: "#00ff00".into(),
            status_bar_bg: "#000000".into(),
            status_bar_fg: "#00ff00".into(),
            command_bar_bg: "#000000".into(),
            command_bar_fg: "#ffffff".into(),

            accent: "#00ff00".into(),
            warning: "#ffff00".into(),
            error: "#ff0000".into(),
            success: "#00ff00".into(),
        }
    }

    /// TOML 파일에서 테마 로드
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let theme: Theme = toml::from_str(&content)?;
        Ok(theme)
    }
}

/// 테마 관리자
///
/// 현재 활성 테마를 관리하고 런타임에 테마를 전환합니다.
pub struct ThemeManager {
    current_index: usize,
    available_themes: Vec<(String, Theme)>,
}

impl ThemeManager {
    /// 기본 테마 관리자 생성 (Dark 테마)
    pub fn new() -> Self {
        Self {
            current_index: 0,
            available_themes: vec![
                ("dark".to_string(), Theme::dark()),
                ("light".to_string(), Theme::light()),
                ("high_contrast".to_string(), Theme::high_contrast()),
            ],
        }
    }

    /// 현재 테마 반환
    pub fn current(&self) -> &Theme {
        &self.available_themes[self.current_index].1
    }

    /// 현재 테마 이름
    pub fn current_name(&self) -> &str {
        &self.available_themes[self.current_index].0
    }

    /// 테마 전환 (이름으로)
    pub fn switch_theme(&mut self, name: &str) -> Result<(), String> {
        match self.available_themes.iter().position(|(n, _)| n == name) {
            Some(index) => {
                self.current_index = index;
                Ok(())
            }
            None => Err(format!("Unknown theme: {}", name)),
        }
    }

    /// 다음 테마로 순환
    pub fn cycle_theme(&mut self) {
        self.current_index = (self.current_index + 1) % self.available_themes.len();
    }

    /// 사용 가능한 테마 목록 반환
    pub fn available_themes(&self) -> Vec<String> {
        self.available_themes
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// 커스텀 테마 추가 (같은 이름이면 교체)
    pub fn add_theme(&mut self, name: String, theme: Theme) {
        match self.available_themes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = theme,
            None => self.available_themes.push((name, theme)),
        }
    }

    /// 테마 디렉토리의 *.toml 파일 로드 (파일명이 테마 이름)
    pub fn load_themes_from_dir(&mut self, themes_dir: &Path) -> Result<usize, anyhow::Error> {
        if !themes_dir.is_dir() {
            return Ok(0);
        }

        let mut loaded = 0;
        for entry in fs::read_dir(themes_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }
            match Theme::from_file(&path) {
                Ok(theme) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("custom")
                        .to_string();
                    self.add_theme(name, theme);
                    loaded += 1;
                }
                Err(e) => log::warn!("ignoring theme {}: {}", path.display(), e),
            }
        }
        Ok(loaded)
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dark_theme_creation() {
        let theme = Theme::dark();
        assert_eq!(theme.bg_primary.to_color(), Color::Rgb(30, 30, 30));
    }

    #[test]
    fn test_light_theme_creation() {
        let theme = Theme::light();
        assert_eq!(theme.bg_primary.to_color(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!(parse_hex_color("#1e1e1e"), Color::Rgb(30, 30, 30));
        assert_eq!(parse_hex_color("#12"), Color::Reset);
    }

    #[test]
    fn test_named_color_parsing() {
        assert_eq!(parse_named_color("red"), Color::Red);
        assert_eq!(parse_named_color("DarkGray"), Color::DarkGray);
        assert_eq!(parse_named_color("nope"), Color::Reset);
        assert_eq!(ColorDef::from("white").to_color(), Color::White);
    }

    #[test]
    fn test_theme_switching() {
        let mut manager = ThemeManager::new();
        assert_eq!(manager.current_name(), "dark");
        assert!(manager.switch_theme("light").is_ok());
        assert_eq!(manager.current_name(), "light");
        assert_eq!(
            manager.current().bg_primary.to_color(),
            Color::Rgb(255, 255, 255)
        );
        assert!(manager.switch_theme("solarized").is_err());
        assert_eq!(manager.current_name(), "light");
    }

    #[test]
    fn test_theme_cycling() {
        let mut manager = ThemeManager::new();
        manager.cycle_theme();
        assert_eq!(manager.current_name(), "light");
        manager.cycle_theme();
        assert_eq!(manager.current_name(), "high_contrast");
        manager.cycle_theme();
        assert_eq!(manager.current_name(), "dark");
    }

    #[test]
    fn test_load_themes_from_dir() {
        let temp = TempDir::new().unwrap();
        let custom = toml::to_string_pretty(&Theme::high_contrast()).unwrap();
        fs::write(temp.path().join("midnight.toml"), custom).unwrap();
        fs::write(temp.path().join("broken.toml"), "bg_primary = 3").unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let mut manager = ThemeManager::new();
        let loaded = manager.load_themes_from_dir(temp.path()).unwrap();

        assert_eq!(loaded, 1);
        assert_eq!(manager.available_themes().len(), 4);
        assert!(manager.switch_theme("midnight").is_ok());
        assert_eq!(manager.current().bg_primary.to_color(), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_load_themes_missing_dir_is_noop() {
        let temp = TempDir::new().unwrap();
        let mut manager = ThemeManager::new();
        assert_eq!(
            manager.load_themes_from_dir(&temp.path().join("none")).unwrap(),
            0
        );
        assert_eq!(manager.available_themes().len(), 3);
    }
}
