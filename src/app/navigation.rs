use super::controllers;
use super::*;
use crate::core::actions::Action;
use crate::models::FileEntry;
use crate::ui::ViewEvent;

impl<T: Transport, H: HostModel> App<T, H> {
    /// 액션 실행 (단일 진실 원천)
    pub fn execute_action(&mut self, action: Action, now: Instant) {
        if self.is_closed() {
            return;
        }
        match action {
            Action::MoveUp => self.move_mark(-1),
            Action::MoveDown => self.move_mark(1),
            Action::GoToTop => {
                self.view.mark_first();
                self.scroll_to_mark();
            }
            Action::GoToBottom => {
                self.view.mark_last();
                self.scroll_to_mark();
            }
            Action::GoToParent => self.navigate_up(now),
            Action::Activate => self.activate_marked(now),
            Action::Refresh | Action::FocusPath | Action::Cancel | Action::Quit => {
                controllers::dialog_controller::execute(self, action, now)
            }
        }
    }

    /// 테이블 이벤트 처리
    pub fn handle_view_event(&mut self, event: ViewEvent, now: Instant) {
        match event {
            ViewEvent::Marked(entry) => debug!("marked {}", entry.path),
            ViewEvent::Activated(entry) => self.activate(entry, now),
        }
    }

    /// 폴더면 들어가고, 파일이면 선택을 확정한다
    pub fn activate(&mut self, entry: FileEntry, now: Instant) {
        if self.is_closed() {
            return;
        }
        if !entry.is_folder() {
            self.finalize(&entry.path);
            return;
        }

        // 느린 응답 전에 미리 표시
        self.path_view.set_to_prospective(&entry.path);
        self.request_listing(&entry.path, now);
    }

    /// 선택 버튼 클릭 = 선택된 행 더블 클릭
    pub fn select_clicked(&mut self, now: Instant) {
        if !self.select_button().enabled {
            return;
        }
        self.activate_marked(now);
    }

    fn activate_marked(&mut self, now: Instant) {
        if let Some(entry) = self.view.marked_entry().cloned() {
            self.activate(entry, now);
        }
    }

    /// 상위 폴더로 이동
    pub fn navigate_up(&mut self, now: Instant) {
        if self.is_closed() {
            return;
        }
        self.path_view.set_to_parent_prospective(&self.path_state);
        self.view.show_loading(now);
        let path = self.path_state.current().to_string();
        if self.send(|channel| channel.request_list_parent(&path)) {
            self.state = DialogState::Navigating;
        }
    }

    /// 경로 입력창의 값으로 이동
    pub fn submit_path(&mut self, now: Instant) {
        if self.is_closed() {
            return;
        }
        let path = self.path_view.text().to_string();
        self.focus = Focus::Table;
        self.request_listing(&path, now);
    }

    /// 현재 경로 다시 읽기
    pub fn refresh(&mut self, now: Instant) {
        let path = self.path_state.current().to_string();
        self.status = Some(StatusMessage::Info(format!("Reloading {}", path)));
        self.request_listing(&path, now);
    }

    fn request_listing(&mut self, path: &str, now: Instant) {
        self.view.show_loading(now);
        if self.send(|channel| channel.request_list_dir(path)) {
            self.state = DialogState::Navigating;
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Table => Focus::Path,
            Focus::Path => Focus::Table,
        };
    }

    /// 행 클릭 (본문 화면 행 기준)
    pub fn click_row(&mut self, row: usize, now: Instant) {
        self.focus = Focus::Table;
        let Some(index) = self.view.index_at_row(row) else {
            return;
        };
        if let Some(event) = self.view.click(index, now) {
            self.handle_view_event(event, now);
        }
    }

    pub fn scroll(&mut self, delta: isize) {
        let rows = self.layout().body_rows();
        self.view.scroll_by(delta, rows);
    }

    fn move_mark(&mut self, delta: isize) {
        self.view.move_mark(delta);
        self.scroll_to_mark();
    }

    fn scroll_to_mark(&mut self) {
        let rows = self.layout().body_rows();
        self.view.ensure_visible(rows);
    }

    pub(super) fn path_view_mut(&mut self) -> &mut PathView {
        &mut self.path_view
    }

    pub(super) fn panel_mut(&mut self) -> &mut FloatingPanel {
        &mut self.panel
    }
}
