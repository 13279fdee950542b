// Select button - 선택 상태에서 파생되는 확정 버튼

use crate::models::FileEntry;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// 버튼 상태 (선택 항목만으로 결정됨)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectButton {
    pub enabled: bool,
    pub label: &'static str,
}

impl SelectButton {
    pub const SELECT: &'static str = "Select";
    pub const OPEN: &'static str = "Open";

    pub fn from_marked(marked: &[&FileEntry]) -> Self {
        match marked {
            [entry] if entry.is_folder() => Self {
                enabled: true,
                label: Self::OPEN,
            },
            [_] => Self {
                enabled: true,
                label: Self::SELECT,
            },
            // 단일 선택이라 둘 이상은 나올 수 없지만 비활성으로 둔다
            _ => Self {
                enabled: false,
                label: Self::SELECT,
            },
        }
    }

    /// 화면에 표시되는 버튼 텍스트
    pub fn caption(&self) -> String {
        format!("[ {} ]", self.label)
    }
}

impl Default for SelectButton {
    fn default() -> Self {
        Self::from_marked(&[])
    }
}

/// 푸터 버튼 위젯 (Select/Cancel 공용)
pub struct ButtonWidget<'a> {
    caption: &'a str,
    enabled: bool,
    primary: bool,
}

impl<'a> ButtonWidget<'a> {
    pub fn new(caption: &'a str) -> Self {
        Self {
            caption,
            enabled: true,
            primary: false,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }
}

impl Widget for ButtonWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = match (self.enabled, self.primary) {
            (false, _) => Style::default().fg(Color::Rgb(100, 100, 100)),
            (true, true) => Style::default()
                .fg(Color::Rgb(255, 255, 255))
                .bg(Color::Rgb(0, 120, 212))
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(Color::Rgb(212, 212, 212)),
        };
        buf.set_stringn(area.x, area.y, self.caption, area.width as usize, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileKind, FileSubtype};
    use chrono::Utc;

    fn entry(kind: FileKind) -> FileEntry {
        FileEntry::new("/a/x", "x", kind, None, Utc::now())
    }

    #[test]
    fn test_nothing_marked() {
        let button = SelectButton::from_marked(&[]);
        assert!(!button.enabled);
        assert_eq!(button.label, "Select");
    }

    #[test]
    fn test_folder_marked_opens() {
        let folder = entry(FileKind::Folder);
        let button = SelectButton::from_marked(&[&folder]);
        assert!(button.enabled);
        assert_eq!(button.label, "Open");
    }

    #[test]
    fn test_file_marked_selects() {
        let file = entry(FileKind::File(FileSubtype::Pdf));
        let button = SelectButton::from_marked(&[&file]);
        assert!(button.enabled);
        assert_eq!(button.label, "Select");
    }

    #[test]
    fn test_many_marked_falls_back_to_disabled() {
        let a = entry(FileKind::Folder);
        let b = entry(FileKind::File(FileSubtype::Generic));
        assert_eq!(SelectButton::from_marked(&[&a, &b]), SelectButton::default());
    }
}
