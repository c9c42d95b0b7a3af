/// 데몬 로그 뷰 상태
///
/// journalctl 출력 원문을 줄 단위로 보관하고 스크롤 위치를 관리한다.
/// scroll_offset은 화면 맨 위에 보이는 줄 인덱스.
#[derive(Debug, Clone, Default)]
pub struct LogView {
    lines: Vec<String>,
    scroll_offset: usize,
    /// 마지막 렌더링 시 보이는 높이 (페이지 이동/클램프 기준)
    viewport_height: usize,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// 내용 교체 후 가장 최근 줄(맨 아래)로 이동
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.lines().map(|line| line.replace('\t', "    ")).collect();
        self.scroll_to_bottom();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// 렌더링 영역 높이 갱신 (스크롤 위치 재클램프)
    pub fn set_viewport_height(&mut self, height: usize) {
        let was_at_bottom = self.is_at_bottom();
        self.viewport_height = height;
        if was_at_bottom {
            self.scroll_to_bottom();
        } else {
            self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        }
    }

    fn page_size(&self) -> usize {
        self.viewport_height.max(1)
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.page_size())
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_offset >= self.max_scroll()
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_offset = (self.scroll_offset + n).min(self.max_scroll());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page_size());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_size());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// 현재 화면에 보이는 줄
    pub fn visible(&self) -> &[String] {
        let start = self.scroll_offset.min(self.lines.len());
        let end = (start + self.page_size()).min(self.lines.len());
        &self.lines[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> String {
        (1..=count)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn view_with(count: usize, height: usize) -> LogView {
        let mut view = LogView::new();
        view.set_viewport_height(height);
        view.set_text(&numbered(count));
        view
    }

    #[test]
    fn test_set_text_scrolls_to_newest() {
        let view = view_with(100, 10);
        assert_eq!(view.len(), 100);
        assert_eq!(view.scroll_offset(), 90);
        assert_eq!(view.visible().first().map(String::as_str), Some("line 91"));
        assert_eq!(view.visible().last().map(String::as_str), Some("line 100"));
    }

    #[test]
    fn test_scroll_clamps() {
        let mut view = view_with(30, 10);
        view.scroll_down(100);
        assert_eq!(view.scroll_offset(), 20);
        view.scroll_up(5);
        assert_eq!(view.scroll_offset(), 15);
        view.scroll_up(100);
        assert_eq!(view.scroll_offset(), 0);
    }

    #[test]
    fn test_page_navigation() {
        let mut view = view_with(35, 10);
        view.scroll_to_top();
        view.page_down();
        assert_eq!(view.scroll_offset(), 10);
        view.page_down();
        view.page_down();
        assert_eq!(view.scroll_offset(), 25);
        view.page_up();
        assert_eq!(view.scroll_offset(), 15);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut view = view_with(3, 10);
        view.scroll_down(5);
        assert_eq!(view.scroll_offset(), 0);
        assert_eq!(view.visible().len(), 3);
    }

    #[test]
    fn test_viewport_resize_keeps_bottom_anchor() {
        let mut view = view_with(50, 10);
        assert!(view.is_at_bottom());
        view.set_viewport_height(20);
        assert_eq!(view.scroll_offset(), 30);
        assert!(view.is_at_bottom());
    }

    #[test]
    fn test_viewport_resize_clamps_manual_position() {
        let mut view = view_with(50, 10);
        view.scroll_to_top();
        view.scroll_down(5);
        view.set_viewport_height(48);
        assert_eq!(view.scroll_offset(), 2);
    }

    #[test]
    fn test_empty_and_tabs() {
        let mut view = LogView::new();
        view.set_text("");
        assert!(view.is_empty());
        assert!(view.visible().is_empty());

        view.set_text("a\tb");
        assert_eq!(view.lines()[0], "a    b");
    }
}
