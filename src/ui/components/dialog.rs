// Picker dialog - 떠 있는 파일 선택 다이얼로그
//
// 창 전체를 별도 버퍼에 그린 다음 화면 버퍼에 잘라서 복사한다.
// 창이 화면 왼쪽/위로 일부 벗어나 있어도 (음수 좌표) 그릴 수 있다.

use super::directory_view::{DirectoryTable, DirectoryView};
use super::path_view::{PathInput, PathView};
use super::select_button::{ButtonWidget, SelectButton};
use crate::core::actions::hint_entries;
use crate::core::geometry::PanelRect;
use crate::ui::layout::DialogLayout;
use crate::utils::config::IconMode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// 상태 줄 메시지
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// 다이얼로그 위젯
pub struct PickerDialog<'a> {
    title: &'a str,
    path_view: &'a PathView,
    view: &'a DirectoryView,
    select_button: SelectButton,
    status: Option<&'a StatusMessage>,
    path_focused: bool,
    dragging: bool,
    icon_mode: IconMode,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    active_border_color: Color,
    muted_color: Color,
    error_color: Color,
}

impl<'a> PickerDialog<'a> {
    pub fn new(path_view: &'a PathView, view: &'a DirectoryView) -> Self {
        Self {
            title: "Select a file",
            path_view,
            view,
            select_button: SelectButton::default(),
            status: None,
            path_focused: false,
            dragging: false,
            icon_mode: IconMode::default(),
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::Rgb(212, 212, 212),
            border_color: Color::Rgb(0, 120, 212),
            active_border_color: Color::Rgb(255, 200, 0),
            muted_color: Color::Rgb(128, 128, 128),
            error_color: Color::Rgb(244, 71, 71),
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn select_button(mut self, button: SelectButton) -> Self {
        self.select_button = button;
        self
    }

    pub fn status(mut self, status: Option<&'a StatusMessage>) -> Self {
        self.status = status;
        self
    }

    pub fn path_focused(mut self, focused: bool) -> Self {
        self.path_focused = focused;
        self
    }

    /// 이동/크기 조절 중이면 테두리 강조
    pub fn dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }

    pub fn icon_mode(mut self, mode: IconMode) -> Self {
        self.icon_mode = mode;
        self
    }

    /// 창 위치에 맞춰 화면 버퍼에 그린다
    pub fn render_at(self, rect: PanelRect, screen: &mut Buffer) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        let width = rect.width.min(u16::MAX as i32) as u16;
        let height = rect.height.min(u16::MAX as i32) as u16;
        let mut offscreen = Buffer::empty(Rect::new(0, 0, width, height));
        self.render_local(&mut offscreen);
        blit(&offscreen, screen, rect.x, rect.y);
    }

    fn render_local(self, buf: &mut Buffer) {
        let area = buf.area;
        let layout = DialogLayout::compute(area.width, area.height);
        let base = Style::default().fg(self.fg_color).bg(self.bg_color);

        let border_color = if self.dragging {
            self.active_border_color
        } else {
            self.border_color
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(base)
            .render(area, buf);

        // 제목 줄 (이동 트리거)
        let title_style = Style::default()
            .fg(self.border_color)
            .bg(self.bg_color)
            .add_modifier(Modifier::BOLD);
        buf.set_stringn(
            layout.title.x + 1,
            layout.title.y,
            self.title,
            layout.title.width.saturating_sub(1) as usize,
            title_style,
        );
        buf.set_stringn(
            layout.close_button.x,
            layout.close_button.y,
            "[✕]",
            layout.close_button.width as usize,
            base,
        );

        // 경로 줄
        buf.set_stringn(
            layout.up_button.x,
            layout.up_button.y,
            "[↑]",
            layout.up_button.width as usize,
            base,
        );
        PathInput::new(self.path_view)
            .focused(self.path_focused)
            .render(layout.path_input, buf);

        DirectoryTable::new(self.view)
            .icon_mode(self.icon_mode)
            .focused(!self.path_focused)
            .render(layout.table, buf);

        // 상태 줄
        let (status_text, status_style) = match self.status {
            Some(StatusMessage::Error(message)) => (message.clone(), base.fg(self.error_color)),
            Some(StatusMessage::Info(message)) => (message.clone(), base),
            None => (
                format!("{} items", self.view.entries().len()),
                base.fg(self.muted_color),
            ),
        };
        buf.set_stringn(
            layout.status.x + 1,
            layout.status.y,
            status_text,
            layout.status.width.saturating_sub(1) as usize,
            status_style,
        );

        // 하단 힌트와 버튼
        let mut spans = Vec::new();
        for hint in hint_entries() {
            spans.push(Span::styled(
                format!(" {}", hint.key),
                base.fg(self.border_color).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!(" {}", hint.label), base.fg(self.muted_color)));
        }
        buf.set_line(layout.hints.x, layout.hints.y, &Line::from(spans), layout.hints.width);

        ButtonWidget::new("[ Cancel ]").render(layout.cancel_button, buf);
        let caption = self.select_button.caption();
        ButtonWidget::new(&caption)
            .enabled(self.select_button.enabled)
            .primary(true)
            .render(layout.select_button, buf);
    }
}

/// 버퍼를 (x, y) 위치에 복사. 대상 영역 밖은 잘라낸다.
pub fn blit(src: &Buffer, dst: &mut Buffer, x: i32, y: i32) {
    let src_area = src.area;
    for row in 0..src_area.height {
        let ty = y + row as i32;
        if ty < 0 || ty > u16::MAX as i32 {
            continue;
        }
        for col in 0..src_area.width {
            let tx = x + col as i32;
            if tx < 0 || tx > u16::MAX as i32 {
                continue;
            }
            if let Some(cell) = dst.cell_mut((tx as u16, ty as u16)) {
                *cell = src[(src_area.x + col, src_area.y + row)].clone();
            }
        }
    }
}
