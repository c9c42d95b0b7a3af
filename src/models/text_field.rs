/// 한 줄 입력 필드 (UTF-8 경계 안전)
///
/// cursor_pos는 바이트 인덱스이며 항상 문자 경계에 위치한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub value: String,
    pub cursor_pos: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor_pos = value.len();
        Self { value, cursor_pos }
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos == 0 {
            return;
        }
        let prev = self.prev_char_start(self.cursor_pos);
        self.value.remove(prev);
        self.cursor_pos = prev;
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.value.len() {
            self.value.remove(self.cursor_pos);
        }
    }

    pub fn left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos = self.prev_char_start(self.cursor_pos);
        }
    }

    pub fn right(&mut self) {
        if let Some(c) = self.value[self.cursor_pos..].chars().next() {
            self.cursor_pos += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn end(&mut self) {
        self.cursor_pos = self.value.len();
    }

    /// Ctrl+W: 커서 앞 단어 삭제 (경로 구분자 포함)
    pub fn delete_prev_word(&mut self) {
        let original = self.cursor_pos;
        let mut pos = original;

        // 1) 커서 왼쪽의 구분자들을 먼저 건너뜀
        while pos > 0 {
            let prev = self.prev_char_start(pos);
            if !Self::is_word_delimiter(self.char_at(prev)) {
                break;
            }
            pos = prev;
        }

        // 2) 실제 단어 시작까지 이동
        while pos > 0 {
            let prev = self.prev_char_start(pos);
            if Self::is_word_delimiter(self.char_at(prev)) {
                break;
            }
            pos = prev;
        }

        self.value.replace_range(pos..original, "");
        self.cursor_pos = pos;
    }

    /// 비밀번호 표시용 마스킹 문자열
    pub fn masked(&self) -> String {
        "*".repeat(self.value.chars().count())
    }

    /// 마스킹 문자열 기준 커서 위치 (문자 수 = 바이트 수)
    pub fn masked_cursor(&self) -> usize {
        self.value[..self.cursor_pos].chars().count()
    }

    fn char_at(&self, pos: usize) -> char {
        self.value[pos..].chars().next().unwrap_or_default()
    }

    fn prev_char_start(&self, pos: usize) -> usize {
        self.value[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn is_word_delimiter(ch: char) -> bool {
        ch.is_whitespace() || matches!(ch, '/' | '\\' | ':' | ';' | ',' | '.' | '-' | '_')
    }
}
