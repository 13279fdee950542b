// Layout - 다이얼로그 내부 영역 계산
//
// 모든 좌표는 다이얼로그 왼쪽 위(테두리 포함) 기준의 로컬 좌표다.
//
//   0  ┌ border ──────────────────────┐
//   1  │ title (이동 트리거)      [✕] │
//   2  │ [↑] path input               │
//   3  │ Name / Size / Modified       │
//   .  │ table body                   │
//  h-3 │ status                       │
//  h-2 │ hints      [ Cancel ][Select]│
//  h-1 └──────────────────────────────┘

use ratatui::layout::Rect;

/// 이동 트리거 높이 (제목 줄)
pub const TRIGGER_HEIGHT: u16 = 1;
/// 버튼 폭
pub const BUTTON_WIDTH: u16 = 10;
const ICON_BUTTON_WIDTH: u16 = 3;

/// 다이얼로그 내부에서 눌린 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogZone {
    Title,
    CloseButton,
    UpButton,
    PathInput,
    TableHeader,
    /// 본문 행 번호 (스크롤 전, 화면 기준)
    TableRow(usize),
    Status,
    CancelButton,
    SelectButton,
    Footer,
}

/// 다이얼로그 영역 배치
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogLayout {
    pub title: Rect,
    pub close_button: Rect,
    pub up_button: Rect,
    pub path_input: Rect,
    /// 헤더 행을 포함한 테이블 영역
    pub table: Rect,
    pub status: Rect,
    pub hints: Rect,
    pub cancel_button: Rect,
    pub select_button: Rect,
}

impl DialogLayout {
    /// 테두리를 포함한 다이얼로그 크기로 배치 계산
    pub fn compute(width: u16, height: u16) -> Self {
        let inner_x = 1;
        let inner_width = width.saturating_sub(2);
        if inner_width == 0 || height < 7 {
            return Self::default();
        }

        let close_x = inner_x + inner_width.saturating_sub(ICON_BUTTON_WIDTH);
        let title = Rect::new(inner_x, 1, inner_width.saturating_sub(ICON_BUTTON_WIDTH), 1);
        let close_button = Rect::new(close_x, 1, ICON_BUTTON_WIDTH.min(inner_width), 1);

        let up_button = Rect::new(inner_x, 2, ICON_BUTTON_WIDTH.min(inner_width), 1);
        let path_x = inner_x + ICON_BUTTON_WIDTH + 1;
        let path_input = Rect::new(
            path_x,
            2,
            inner_width.saturating_sub(ICON_BUTTON_WIDTH + 1),
            1,
        );

        let status_y = height - 3;
        let footer_y = height - 2;
        let table = Rect::new(inner_x, 3, inner_width, status_y.saturating_sub(3));
        let status = Rect::new(inner_x, status_y, inner_width, 1);

        let buttons_width = (BUTTON_WIDTH * 2 + 1).min(inner_width);
        let buttons_x = inner_x + inner_width - buttons_width;
        let cancel_button = Rect::new(buttons_x, footer_y, BUTTON_WIDTH.min(buttons_width), 1);
        let select_button = Rect::new(
            buttons_x + BUTTON_WIDTH + 1,
            footer_y,
            buttons_width.saturating_sub(BUTTON_WIDTH + 1),
            1,
        );
        let hints = Rect::new(inner_x, footer_y, inner_width - buttons_width, 1);

        Self {
            title,
            close_button,
            up_button,
            path_input,
            table,
            status,
            hints,
            cancel_button,
            select_button,
        }
    }

    /// 본문에 보이는 행 수
    pub fn body_rows(&self) -> usize {
        self.table.height.saturating_sub(1) as usize
    }

    /// 로컬 좌표 판정. 테두리나 영역 밖이면 None.
    pub fn zone_at(&self, x: u16, y: u16) -> Option<DialogZone> {
        let inside = |rect: Rect| {
            rect.width > 0
                && rect.height > 0
                && x >= rect.x
                && x < rect.x + rect.width
                && y >= rect.y
                && y < rect.y + rect.height
        };

        if inside(self.close_button) {
            Some(DialogZone::CloseButton)
        } else if inside(self.title) {
            Some(DialogZone::Title)
        } else if inside(self.up_button) {
            Some(DialogZone::UpButton)
        } else if inside(self.path_input) {
            Some(DialogZone::PathInput)
        } else if inside(self.table) {
            match y - self.table.y {
                0 => Some(DialogZone::TableHeader),
                row => Some(DialogZone::TableRow(row as usize - 1)),
            }
        } else if inside(self.status) {
            Some(DialogZone::Status)
        } else if inside(self.cancel_button) {
            Some(DialogZone::CancelButton)
        } else if inside(self.select_button) {
            Some(DialogZone::SelectButton)
        } else if inside(self.hints) {
            Some(DialogZone::Footer)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_standard() {
        let layout = DialogLayout::compute(80, 24);

        assert_eq!(layout.title, Rect::new(1, 1, 75, 1));
        assert_eq!(layout.close_button, Rect::new(76, 1, 3, 1));
        assert_eq!(layout.path_input, Rect::new(5, 2, 74, 1));
        assert_eq!(layout.table, Rect::new(1, 3, 78, 18));
        assert_eq!(layout.body_rows(), 17);
        assert_eq!(layout.status.y, 21);
        assert_eq!(layout.select_button, Rect::new(69, 22, 10, 1));
        assert_eq!(layout.cancel_button, Rect::new(58, 22, 10, 1));
    }

    #[test]
    fn test_zone_at() {
        let layout = DialogLayout::compute(80, 24);

        assert_eq!(layout.zone_at(0, 0), None);
        assert_eq!(layout.zone_at(10, 1), Some(DialogZone::Title));
        assert_eq!(layout.zone_at(77, 1), Some(DialogZone::CloseButton));
        assert_eq!(layout.zone_at(2, 2), Some(DialogZone::UpButton));
        assert_eq!(layout.zone_at(30, 2), Some(DialogZone::PathInput));
        assert_eq!(layout.zone_at(30, 3), Some(DialogZone::TableHeader));
        assert_eq!(layout.zone_at(30, 4), Some(DialogZone::TableRow(0)));
        assert_eq!(layout.zone_at(30, 6), Some(DialogZone::TableRow(2)));
        assert_eq!(layout.zone_at(70, 22), Some(DialogZone::SelectButton));
        assert_eq!(layout.zone_at(60, 22), Some(DialogZone::CancelButton));
        assert_eq!(layout.zone_at(5, 22), Some(DialogZone::Footer));
    }

    #[test]
    fn test_compute_minimum() {
        let layout = DialogLayout::compute(40, 10);
        assert_eq!(layout.body_rows(), 3);
        assert!(layout.hints.width > 0);

        assert_eq!(DialogLayout::compute(2, 2), DialogLayout::default());
    }
}
