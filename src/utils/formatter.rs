// Formatters - 새로고침 시각, 종료 코드, 출력 요약 포맷팅

use chrono::{DateTime, Local};

/// 마지막 새로고침 시각 (상태바용)
///
/// 아직 한 번도 새로고침하지 않았으면 "never"
pub fn format_refreshed_at(time: Option<&DateTime<Local>>) -> String {
    match time {
        Some(t) => t.format("%H:%M:%S").to_string(),
        None => "never".to_string(),
    }
}

/// 프로세스 종료 상태 표시
///
/// 시그널로 종료되어 코드가 없으면 "signal"
pub fn format_exit_status(status: Option<i32>) -> String {
    match status {
        Some(code) => format!("exit {}", code),
        None => "signal".to_string(),
    }
}

/// 명령 출력이 비어 있을 때 다이얼로그에 보여줄 대체 문구
pub fn output_or_placeholder(output: &str) -> &str {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        "(no output)"
    } else {
        trimmed
    }
}

/// 단수/복수 표기
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_refreshed_at() {
        assert_eq!(format_refreshed_at(None), "never");
        let t = Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap();
        assert_eq!(format_refreshed_at(Some(&t)), "09:05:07");
    }

    #[test]
    fn test_format_exit_status() {
        assert_eq!(format_exit_status(Some(0)), "exit 0");
        assert_eq!(format_exit_status(Some(127)), "exit 127");
        assert_eq!(format_exit_status(None), "signal");
    }

    #[test]
    fn test_output_or_placeholder() {
        assert_eq!(output_or_placeholder("  \n"), "(no output)");
        assert_eq!(output_or_placeholder(" failed\n"), "failed");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "line", "lines"), "1 line");
        assert_eq!(pluralize(0, "line", "lines"), "0 lines");
        assert_eq!(pluralize(100, "line", "lines"), "100 lines");
    }
}
