//! 다이얼로그 컨트롤러
//!
//! 경로 상태, 디렉토리 뷰, 선택 버튼, 떠 있는 창을 묶고 백엔드와의
//! 요청/응답 흐름과 상태 머신(Opening → Browsing ⇄ Navigating → Closed)을 소유한다.

use crate::core::geometry::{FloatingPanel, GeometryLimits, PanelRect, Viewport};
use crate::models::{DirectoryListing, HostModel, PathState};
use crate::system::channel::{BackendChannel, Transport};
use crate::system::protocol::{ErrorPayload, Response};
use crate::ui::layout::{DialogLayout, TRIGGER_HEIGHT};
use crate::ui::{DirectoryView, PathView, SelectButton, StatusMessage};
use crate::utils::config::Config;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use std::time::Instant;

mod controllers;
mod navigation;

pub use controllers::input_controller::{handle_key, handle_mouse};

/// 다이얼로그 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// 첫 목록 요청 대기
    Opening,
    /// 목록 표시 중
    Browsing,
    /// 탐색 요청 대기 (예상 경로 표시 중)
    Navigating,
    /// 종료 (다시 열 수 없음)
    Closed,
}

/// 키 입력을 받는 곳
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    Path,
}

/// 다이얼로그가 닫힌 이유
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Picked(String),
    Cancelled,
}

/// 앱 상태
pub struct App<T: Transport, H: HostModel> {
    channel: BackendChannel<T>,
    host: H,
    config: Config,
    path_state: PathState,
    path_view: PathView,
    view: DirectoryView,
    panel: FloatingPanel,
    viewport: Viewport,
    state: DialogState,
    focus: Focus,
    status: Option<StatusMessage>,
    outcome: Option<Outcome>,
}

impl<T: Transport, H: HostModel> App<T, H> {
    pub fn new(transport: T, host: H, config: Config, viewport: Viewport) -> Self {
        let path_state = PathState::new(host.initial_path(), host.initial_segments());
        let mut path_view = PathView::new(host.path_sep());
        path_view.set_to(path_state.current());

        let limits = GeometryLimits {
            min_visible: config.min_visible,
            min_width: config.min_width,
            min_height: config.min_height,
        };
        let rect = PanelRect::centered(
            viewport,
            config.initial_width.max(config.min_width),
            config.initial_height.max(config.min_height),
        );

        Self {
            channel: BackendChannel::new(transport),
            view: DirectoryView::new(
                config.loading_delay(),
                config.refresh_interval(),
                config.double_click_window(),
            ),
            panel: FloatingPanel::new(rect, limits, TRIGGER_HEIGHT as i32),
            host,
            config,
            path_state,
            path_view,
            viewport,
            state: DialogState::Opening,
            focus: Focus::Table,
            status: None,
            outcome: None,
        }
    }

    /// 화면에 붙이고 첫 목록 요청
    pub fn open(&mut self, now: Instant, wall: DateTime<Utc>) {
        if self.state != DialogState::Opening {
            return;
        }
        info!("opening picker at {}", self.path_state.current());
        self.view.attach(now, wall);
        self.view.show_loading(now);
        let path = self.path_state.current().to_string();
        self.send(|channel| channel.request_list_dir(&path));
    }

    /// 도착한 응답 처리와 타이머 진행. 다시 그려야 하면 true.
    pub fn tick(&mut self, now: Instant, wall: DateTime<Utc>) -> bool {
        let responses = self.channel.poll();
        let mut dirty = !responses.is_empty();
        for response in responses {
            self.handle_response(response, wall);
        }
        if self.state != DialogState::Closed {
            dirty |= self.view.tick(now, wall);
        }
        dirty
    }

    pub fn handle_response(&mut self, response: Response, wall: DateTime<Utc>) {
        if self.state == DialogState::Closed {
            debug!("dialog closed, ignoring {:?}", response.request_id());
            return;
        }
        if let Some(id) = response.request_id() {
            let latest = self.channel.last_request_id();
            if id < latest {
                debug!("discarding stale response {} (latest {})", id, latest);
                return;
            }
        }

        match response {
            Response::ListDir(payload) => self.apply_listing(payload.listing, wall),
            Response::Error(payload) => self.apply_error(payload, wall),
        }
    }

    fn apply_listing(&mut self, listing: DirectoryListing, wall: DateTime<Utc>) {
        if listing.is_file {
            // 파일로 해석됨: 목록을 다시 채우지 않고 바로 확정
            let path = listing
                .entries
                .first()
                .map(|entry| entry.path.clone())
                .unwrap_or(listing.path);
            self.finalize(&path);
            return;
        }

        self.path_state.replace(listing.path, listing.segments);
        self.path_view.set_to(self.path_state.current());
        self.view.populate(listing.entries, wall);
        self.status = None;
        self.state = DialogState::Browsing;
    }

    fn apply_error(&mut self, payload: ErrorPayload, wall: DateTime<Utc>) {
        info!("listing {} failed: {}", payload.path, payload.message);
        self.path_view.set_to(self.path_state.current());
        self.view.cancel_loading();
        if self.state == DialogState::Opening {
            self.view.populate(Vec::new(), wall);
        }
        self.status = Some(StatusMessage::Error(payload.message));
        self.state = DialogState::Browsing;
    }

    /// 선택 확정: 호스트에 한 번 기록하고 저장 후 닫는다
    pub fn finalize(&mut self, path: &str) {
        if self.state == DialogState::Closed {
            return;
        }
        info!("picked {}", path);
        self.host.set_selected(path);
        self.host.save_changes();
        self.outcome = Some(Outcome::Picked(path.to_string()));
        self.teardown();
    }

    /// 취소/닫기 (어느 상태에서든)
    pub fn cancel(&mut self) {
        if self.state == DialogState::Closed {
            return;
        }
        info!("picker cancelled");
        self.outcome = Some(Outcome::Cancelled);
        self.teardown();
    }

    fn teardown(&mut self) {
        self.view.detach();
        self.panel.release();
        self.state = DialogState::Closed;
    }

    /// 요청 전송. 실패는 상태 줄에만 표시한다.
    fn send<F>(&mut self, request: F) -> bool
    where
        F: FnOnce(&mut BackendChannel<T>) -> Result<u64>,
    {
        match request(&mut self.channel) {
            Ok(_) => true,
            Err(e) => {
                error!("failed to reach backend: {}", e);
                self.path_view.set_to(self.path_state.current());
                self.view.cancel_loading();
                self.status = Some(StatusMessage::Error(format!("Backend unavailable: {}", e)));
                false
            }
        }
    }

    /// 터미널 크기 변경
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.panel.fit_into(viewport);
    }

    // === 조회 ===

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == DialogState::Closed
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn path_state(&self) -> &PathState {
        &self.path_state
    }

    pub fn path_view(&self) -> &PathView {
        &self.path_view
    }

    pub fn view(&self) -> &DirectoryView {
        &self.view
    }

    pub fn panel(&self) -> &FloatingPanel {
        &self.panel
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn channel(&self) -> &BackendChannel<T> {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut BackendChannel<T> {
        &mut self.channel
    }

    /// 현재 선택에서 파생된 선택 버튼 상태
    pub fn select_button(&self) -> SelectButton {
        SelectButton::from_marked(&self.view.marked_entries())
    }

    /// 현재 창 크기 기준 내부 배치
    pub fn layout(&self) -> DialogLayout {
        let rect = self.panel.rect();
        DialogLayout::compute(
            rect.width.clamp(0, u16::MAX as i32) as u16,
            rect.height.clamp(0, u16::MAX as i32) as u16,
        )
    }

    /// 호스트를 돌려받는다 (실행 종료 후)
    pub fn into_host(self) -> H {
        self.host
    }
}
