//! 터미널 입력 라우팅
//!
//! 마우스 누르기는 창 판정 → 크기 조절 핸들 → 버튼/입력창 → 이동 트리거 →
//! 테이블 행 순으로 한 곳에서만 처리된다.

use super::super::*;
use crate::core::actions::{find_action, Action};
use crate::core::geometry::{Hit, Point};
use crate::ui::DialogZone;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// 키 입력 처리
pub fn handle_key<T: Transport, H: HostModel>(app: &mut App<T, H>, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release || app.is_closed() {
        return;
    }
    match app.focus() {
        Focus::Table => {
            if let Some(action) = find_action(key.modifiers, key.code) {
                app.execute_action(action, now);
            }
        }
        Focus::Path => handle_path_key(app, key.modifiers, key.code, now),
    }
}

/// 경로 입력창 키 처리
fn handle_path_key<T: Transport, H: HostModel>(
    app: &mut App<T, H>,
    modifiers: KeyModifiers,
    code: KeyCode,
    now: Instant,
) {
    match (modifiers, code) {
        (_, KeyCode::Enter) => app.submit_path(now),
        (_, KeyCode::Esc) => app.execute_action(Action::Cancel, now),
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => app.toggle_focus(),
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.execute_action(Action::Quit, now),
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.path_view_mut().delete_prev_segment(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.path_view_mut().insert_char(c)
        }
        (_, KeyCode::Backspace) => app.path_view_mut().backspace(),
        (_, KeyCode::Delete) => app.path_view_mut().delete(),
        (_, KeyCode::Left) => app.path_view_mut().left(),
        (_, KeyCode::Right) => app.path_view_mut().right(),
        (_, KeyCode::Home) => app.path_view_mut().home(),
        (_, KeyCode::End) => app.path_view_mut().end(),
        _ => {}
    }
}

/// 마우스 입력 처리
pub fn handle_mouse<T: Transport, H: HostModel>(
    app: &mut App<T, H>,
    mouse: MouseEvent,
    now: Instant,
) {
    if app.is_closed() {
        return;
    }
    let point = Point::new(mouse.column as i32, mouse.row as i32);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => press(app, point, now),
        MouseEventKind::Drag(MouseButton::Left) => {
            let viewport = app.viewport();
            app.panel_mut().pointer_move(point, viewport);
        }
        MouseEventKind::Up(MouseButton::Left) => app.panel_mut().release(),
        MouseEventKind::ScrollDown if app.panel().rect().contains(point) => app.scroll(1),
        MouseEventKind::ScrollUp if app.panel().rect().contains(point) => app.scroll(-1),
        _ => {}
    }
}

fn press<T: Transport, H: HostModel>(app: &mut App<T, H>, point: Point, now: Instant) {
    let Some(hit) = app.panel().hit_test(point) else {
        return;
    };

    // 크기 조절 핸들은 아래 영역으로 전달되지 않는다
    if let Hit::Resize(edges) = hit {
        app.panel_mut().begin_resize(edges, point);
        return;
    }

    let rect = app.panel().rect();
    let local_x = (point.x - rect.x) as u16;
    let local_y = (point.y - rect.y) as u16;
    let Some(zone) = app.layout().zone_at(local_x, local_y) else {
        return;
    };

    match zone {
        DialogZone::CloseButton | DialogZone::CancelButton => app.cancel(),
        DialogZone::UpButton => app.navigate_up(now),
        DialogZone::PathInput => {
            app.set_focus(Focus::Path);
            app.path_view_mut().end();
        }
        DialogZone::Title if hit == Hit::DragTrigger => app.panel_mut().begin_drag(point),
        DialogZone::TableRow(row) => app.click_row(row, now),
        DialogZone::SelectButton => app.select_clicked(now),
        _ => {}
    }
}
