// Path view - 한 줄 경로 입력창
//
// 확정된 경로를 보여주고, 응답 전에는 예상 경로(prospective)를 먼저 보여준다.
// 예상 경로 표시는 PathState를 건드리지 않는다.

use crate::models::path_state::with_trailing_sep;
use crate::models::PathState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 경로 입력창 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathView {
    sep: String,
    text: String,
    /// 바이트 단위 커서 (항상 문자 경계)
    cursor: usize,
    prospective: bool,
}

impl PathView {
    pub fn new(sep: impl Into<String>) -> Self {
        Self {
            sep: sep.into(),
            text: String::new(),
            cursor: 0,
            prospective: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_prospective(&self) -> bool {
        self.prospective
    }

    /// 확정된 경로 표시
    pub fn set_to(&mut self, path: &str) {
        self.replace_text(path.to_string());
        self.prospective = false;
    }

    /// 열어 들어갈 하위 경로를 구분자와 함께 미리 표시
    pub fn set_to_prospective(&mut self, path: &str) {
        self.replace_text(with_trailing_sep(path, &self.sep));
        self.prospective = true;
    }

    /// 상위 경로를 미리 표시
    pub fn set_to_parent_prospective(&mut self, state: &PathState) {
        self.replace_text(state.parent_display(&self.sep));
        self.prospective = true;
    }

    fn replace_text(&mut self, text: String) {
        self.cursor = text.len();
        self.text = text;
    }

    // === 편집 ===

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.prospective = false;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.prev_char_start(self.cursor);
        self.text.remove(prev);
        self.cursor = prev;
        self.prospective = false;
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
            self.prospective = false;
        }
    }

    pub fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_char_start(self.cursor);
        }
    }

    pub fn right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    /// 커서 앞의 경로 구성 요소 하나 지우기 (Ctrl+W)
    pub fn delete_prev_segment(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let original = self.cursor;
        let head = &self.text[..original];
        // 끝의 구분자는 건너뛰고 그 앞 구분자 뒤까지 지운다
        let trimmed = head.strip_suffix(self.sep.as_str()).unwrap_or(head);
        let start = trimmed
            .rfind(self.sep.as_str())
            .map(|index| index + self.sep.len())
            .unwrap_or(0);
        self.text.replace_range(start..original, "");
        self.cursor = start;
        self.prospective = false;
    }

    fn prev_char_start(&self, pos: usize) -> usize {
        self.text[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

/// 경로 입력창 위젯
pub struct PathInput<'a> {
    view: &'a PathView,
    focused: bool,
}

impl<'a> PathInput<'a> {
    pub fn new(view: &'a PathView) -> Self {
        Self {
            view,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for PathInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let base = if self.focused {
            Style::default()
                .fg(Color::Rgb(255, 255, 255))
                .bg(Color::Rgb(45, 45, 45))
        } else {
            Style::default()
                .fg(Color::Rgb(212, 212, 212))
                .bg(Color::Rgb(37, 37, 38))
        };
        let text_style = if self.view.is_prospective() {
            base.fg(Color::Rgb(150, 150, 150)).add_modifier(Modifier::ITALIC)
        } else {
            base
        };

        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_symbol(" ").set_style(base);
        }

        // 커서가 보이도록 왼쪽을 잘라낸다
        let width = area.width as usize;
        let text = self.view.text();
        let before_cursor = &text[..self.view.cursor()];
        let mut skip = before_cursor.width().saturating_sub(width.saturating_sub(1));

        let mut x = area.x;
        let mut cursor_x = None;
        for (index, ch) in text.char_indices() {
            let ch_width = ch.width().unwrap_or(0);
            if skip > 0 {
                skip = skip.saturating_sub(ch_width);
                continue;
            }
            if (x - area.x) as usize + ch_width > width {
                break;
            }
            if index == self.view.cursor() {
                cursor_x = Some(x);
            }
            buf[(x, area.y)].set_char(ch).set_style(text_style);
            x += ch_width as u16;
        }

        if self.focused {
            let cursor_x = cursor_x.unwrap_or(x);
            if cursor_x < area.x + area.width {
                let cell = &mut buf[(cursor_x, area.y)];
                cell.set_style(base.add_modifier(Modifier::REVERSED));
            }
        }
    }
}
