use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// 경로를 최대 너비에 맞춰 축약한다.
/// 규칙: HOME 경로는 `~`로 표시하고, 길면 앞부분을 `...`으로 생략해 파일명이 남도록 한다.
pub fn display_path(path: &Path, max_width: usize) -> String {
    let text = shorten_home(&path.to_string_lossy());
    truncate_from_start(&text, max_width)
}

/// 문자열 뒷부분을 생략한다 (로그 줄, 제목 등)
pub fn truncate_end(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= ELLIPSIS.width() {
        return take_prefix_by_width(text, max_width);
    }
    let prefix = take_prefix_by_width(text, max_width - ELLIPSIS.width());
    format!("{}{}", prefix, ELLIPSIS)
}

fn shorten_home(path: &str) -> String {
    let Some(home) = dirs::home_dir() else {
        return path.to_string();
    };
    let home = home.to_string_lossy();
    if home.is_empty() || home == "/" {
        return path.to_string();
    }

    if path == home {
        "~".to_string()
    } else {
        match path.strip_prefix(home.as_ref()) {
            Some(rest) if rest.starts_with('/') => format!("~{}", rest),
            _ => path.to_string(),
        }
    }
}

fn truncate_from_start(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= ELLIPSIS.width() {
        return take_prefix_by_width(text, max_width);
    }

    let mut kept: Vec<char> = Vec::new();
    let mut width = 0;
    let budget = max_width - ELLIPSIS.width();
    for ch in text.chars().rev() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + w > budget {
            break;
        }
        kept.push(ch);
        width += w;
    }
    kept.reverse();
    format!("{}{}", ELLIPSIS, kept.into_iter().collect::<String>())
}

fn take_prefix_by_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + w > max_width {
            break;
        }
        result.push(ch);
        width += w;
    }
    result
}
