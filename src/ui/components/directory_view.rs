// Directory view - 디렉토리 목록 테이블
//
// 정렬된 엔트리, 단일 선택(마킹), 로딩 표시 디바운스, 수정 시각 라벨 주기 갱신

use crate::models::{FileEntry, FileKind, FileSubtype};
use crate::utils::config::IconMode;
use crate::utils::formatter::{humanize_size, relative_duration};
use crate::utils::timer::{Deadline, Interval};
use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use std::cmp::Ordering;
use std::time::{Duration, Instant};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 로딩 표시 문구
pub const LOADING_TEXT: &str = "Loading folder ...";

/// 테이블이 내보내는 이벤트
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// 한 번 클릭: 유일한 선택 항목으로 표시됨
    Marked(FileEntry),
    /// 더블 클릭: 열기/선택 확정
    Activated(FileEntry),
}

/// 같은 행 연속 클릭 횟수 계산 (브라우저의 click detail과 같은 의미)
#[derive(Debug, Clone)]
pub struct ClickTracker {
    window: Duration,
    last: Option<(usize, Instant)>,
    count: u32,
}

impl ClickTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: None,
            count: 0,
        }
    }

    /// 클릭 등록 후 현재 연속 횟수 반환
    pub fn register(&mut self, row: usize, now: Instant) -> u32 {
        let continues = matches!(
            self.last,
            Some((last_row, at)) if last_row == row && now.duration_since(at) <= self.window
        );
        self.count = if continues { self.count + 1 } else { 1 };
        self.last = Some((row, now));
        self.count
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.count = 0;
    }
}

/// 이름 비교
///
/// 악센트와 대소문자를 뗀 기본 글자로 먼저 비교한다 (기호 < 숫자 < 문자).
/// 같으면 악센트 없는 쪽, 그다음 소문자가 먼저 온다.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| accent_key(a).cmp(accent_key(b)))
        .then_with(|| case_order(a, b))
        .then_with(|| a.len().cmp(&b.len()))
}

fn primary_key(name: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| {
            let class = if c.is_alphabetic() {
                2
            } else if c.is_numeric() {
                1
            } else {
                0
            };
            (class, c)
        })
}

fn accent_key(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

fn case_order(a: &str, b: &str) -> Ordering {
    a.nfd()
        .zip(b.nfd())
        .find(|(x, y)| x != y)
        .map_or(Ordering::Equal, |(x, y)| {
            y.is_lowercase().cmp(&x.is_lowercase()).then(x.cmp(&y))
        })
}

/// 표시 순서 정렬: 폴더 먼저, 그 다음 이름순
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| {
        b.is_folder()
            .cmp(&a.is_folder())
            .then_with(|| collate(&a.name, &b.name))
    });
}

/// 디렉토리 목록 상태
#[derive(Debug, Clone)]
pub struct DirectoryView {
    /// 표시 순서로 정렬된 엔트리
    entries: Vec<FileEntry>,
    /// 마킹된 항목 인덱스
    marked: Option<usize>,
    scroll_offset: usize,
    loading_delay: Duration,
    loading_deadline: Deadline,
    loading_visible: bool,
    refresh: Interval,
    /// 상대 시각 라벨 기준 시각
    reference: DateTime<Utc>,
    attached: bool,
    clicks: ClickTracker,
}

impl DirectoryView {
    pub fn new(loading_delay: Duration, refresh_interval: Duration, double_click: Duration) -> Self {
        Self {
            entries: Vec::new(),
            marked: None,
            scroll_offset: 0,
            loading_delay,
            loading_deadline: Deadline::new(),
            loading_visible: false,
            refresh: Interval::new(refresh_interval),
            reference: DateTime::<Utc>::default(),
            attached: false,
            clicks: ClickTracker::new(double_click),
        }
    }

    /// 화면에 붙음: 수정 시각 라벨 주기 갱신 시작
    pub fn attach(&mut self, now: Instant, wall: DateTime<Utc>) {
        self.attached = true;
        self.reference = wall;
        self.refresh.start(now);
    }

    /// 화면에서 떨어짐: 모든 타이머 취소
    pub fn detach(&mut self) {
        self.attached = false;
        self.refresh.stop();
        self.loading_deadline.cancel();
        self.loading_visible = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// 지연 후 로딩 표시 예약 (이미 예약돼 있으면 다시 예약)
    pub fn show_loading(&mut self, now: Instant) {
        self.loading_deadline.schedule(now, self.loading_delay);
    }

    /// 로딩 표시 취소 (기존 목록 유지)
    pub fn cancel_loading(&mut self) {
        self.loading_deadline.cancel();
        self.loading_visible = false;
    }

    #[cfg(test)]
    pub fn is_loading_pending(&self) -> bool {
        self.loading_deadline.is_pending()
    }

    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    /// 새 목록 채우기. 선택은 항상 초기화된다.
    pub fn populate(&mut self, mut entries: Vec<FileEntry>, wall: DateTime<Utc>) {
        self.cancel_loading();
        sort_entries(&mut entries);
        self.entries = entries;
        self.marked = None;
        self.scroll_offset = 0;
        self.reference = wall;
        self.clicks.reset();
    }

    /// 타이머 진행. 다시 그려야 하면 true.
    pub fn tick(&mut self, now: Instant, wall: DateTime<Utc>) -> bool {
        let mut dirty = false;
        if self.loading_deadline.poll(now) {
            self.loading_visible = true;
            dirty = true;
        }
        if self.attached && self.refresh.poll(now) {
            self.reference = wall;
            dirty = true;
        }
        dirty
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn marked_index(&self) -> Option<usize> {
        self.marked
    }

    pub fn marked_entry(&self) -> Option<&FileEntry> {
        self.marked.and_then(|index| self.entries.get(index))
    }

    /// 마킹된 항목 목록 (단일 선택이므로 0개 또는 1개)
    pub fn marked_entries(&self) -> Vec<&FileEntry> {
        self.marked_entry().into_iter().collect()
    }

    /// 항목 하나를 유일한 선택으로 표시
    pub fn mark(&mut self, index: usize) -> Option<ViewEvent> {
        let entry = self.entries.get(index)?.clone();
        self.marked = Some(index);
        Some(ViewEvent::Marked(entry))
    }

    /// 선택 여부와 무관하게 항목 열기
    pub fn activate(&mut self, index: usize) -> Option<ViewEvent> {
        self.entries
            .get(index)
            .cloned()
            .map(ViewEvent::Activated)
    }

    /// 행 클릭. 두 번째 클릭은 열기, 세 번째 이후는 무시한다.
    pub fn click(&mut self, index: usize, now: Instant) -> Option<ViewEvent> {
        if index >= self.entries.len() {
            return None;
        }
        match self.clicks.register(index, now) {
            1 => self.mark(index),
            2 => self.activate(index),
            _ => None,
        }
    }

    /// 키보드로 선택 이동
    pub fn move_mark(&mut self, delta: isize) -> Option<ViewEvent> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        let next = match self.marked {
            None if delta < 0 => last,
            None => 0,
            Some(current) => current.saturating_add_signed(delta).min(last),
        };
        self.mark(next)
    }

    pub fn mark_first(&mut self) -> Option<ViewEvent> {
        self.mark(0)
    }

    pub fn mark_last(&mut self) -> Option<ViewEvent> {
        let last = self.entries.len().checked_sub(1)?;
        self.mark(last)
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// 마우스 휠 스크롤
    pub fn scroll_by(&mut self, delta: isize, visible_rows: usize) {
        let max_offset = self.entries.len().saturating_sub(visible_rows);
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta).min(max_offset);
    }

    /// 선택 항목이 보이도록 스크롤 조정
    pub fn ensure_visible(&mut self, visible_rows: usize) {
        let Some(marked) = self.marked else {
            return;
        };
        if visible_rows == 0 {
            return;
        }
        if marked < self.scroll_offset {
            self.scroll_offset = marked;
        } else if marked >= self.scroll_offset + visible_rows {
            self.scroll_offset = marked + 1 - visible_rows;
        }
    }

    /// 화면 행 번호(본문 기준)를 엔트리 인덱스로
    pub fn index_at_row(&self, row: usize) -> Option<usize> {
        let index = self.scroll_offset + row;
        (index < self.entries.len()).then_some(index)
    }

    /// 크기 칸 문자열 (폴더는 빈칸)
    pub fn size_label(entry: &FileEntry) -> String {
        if entry.is_folder() {
            String::new()
        } else {
            humanize_size(entry.size)
        }
    }

    pub fn modified_label(&self, entry: &FileEntry) -> String {
        relative_duration(entry.modified_at, self.reference)
    }
}

/// 파일 종류별 아이콘
pub fn icon_for(kind: FileKind, mode: IconMode) -> &'static str {
    match mode {
        IconMode::Emoji => match kind {
            FileKind::Folder => "📁",
            FileKind::File(subtype) => match subtype {
                FileSubtype::Notebook => "📓",
                FileSubtype::Markdown => "📝",
                FileSubtype::Image => "🖼",
                FileSubtype::TabularData => "🗄",
                FileSubtype::Spreadsheet => "📊",
                FileSubtype::Pdf => "📕",
                FileSubtype::Video => "🎞",
                FileSubtype::Json | FileSubtype::Yaml | FileSubtype::Config => "⚙",
                FileSubtype::SourceCode => "📜",
                FileSubtype::Generic => "📄",
            },
        },
        IconMode::Ascii => match kind {
            FileKind::Folder => "/",
            FileKind::File(FileSubtype::SourceCode) => "*",
            FileKind::File(_) => " ",
        },
    }
}

const SIZE_WIDTH: usize = 11;
const MODIFIED_WIDTH: usize = 14;

/// 디렉토리 테이블 위젯
pub struct DirectoryTable<'a> {
    view: &'a DirectoryView,
    icon_mode: IconMode,
    focused: bool,
}

impl<'a> DirectoryTable<'a> {
    pub fn new(view: &'a DirectoryView) -> Self {
        Self {
            view,
            icon_mode: IconMode::default(),
            focused: true,
        }
    }

    pub fn icon_mode(mut self, mode: IconMode) -> Self {
        self.icon_mode = mode;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn name_width(width: usize) -> usize {
        width.saturating_sub(SIZE_WIDTH + MODIFIED_WIDTH + 2)
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let header_style = Style::default()
            .fg(Color::Rgb(150, 150, 150))
            .add_modifier(Modifier::BOLD);
        let name_width = Self::name_width(area.width as usize);
        let text = format!(
            "{:<name_width$} {:>SIZE_WIDTH$} {:<MODIFIED_WIDTH$}",
            "   Name", "Size", "Modified",
        );
        buf.set_string(area.x, area.y, text, header_style);
    }

    fn render_row(&self, entry: &FileEntry, is_marked: bool, area: Rect, y: u16, buf: &mut Buffer) {
        let style = match (is_marked, self.focused) {
            (true, true) => Style::default()
                .fg(Color::Rgb(255, 255, 255))
                .bg(Color::Rgb(0, 120, 212)),
            (true, false) => Style::default()
                .fg(Color::Rgb(255, 255, 255))
                .bg(Color::Rgb(60, 60, 60)),
            (false, _) if entry.is_folder() => Style::default().fg(Color::Rgb(86, 156, 214)),
            (false, _) => Style::default().fg(Color::Rgb(212, 212, 212)),
        };

        let name_width = Self::name_width(area.width as usize);
        let icon = format!("{} ", icon_for(entry.kind, self.icon_mode));
        let name = truncate(&entry.name, name_width.saturating_sub(icon.width()));
        let name_cell = format!("{}{}", icon, name);
        let padding = " ".repeat(name_width.saturating_sub(name_cell.width()));

        let size = DirectoryView::size_label(entry);
        let size_style = if size == crate::utils::formatter::SIZE_ERROR_MARKER {
            style.fg(Color::Rgb(244, 71, 71))
        } else {
            style
        };

        let line = Line::from(vec![
            Span::styled(name_cell, style),
            Span::styled(padding, style),
            Span::styled(" ", style),
            Span::styled(format!("{:>SIZE_WIDTH$}", size), size_style),
            Span::styled(" ", style),
            Span::styled(
                format!(
                    "{:<MODIFIED_WIDTH$}",
                    truncate(&self.view.modified_label(entry), MODIFIED_WIDTH)
                ),
                style,
            ),
        ]);
        buf.set_line(area.x, y, &line, area.width);
    }
}

impl Widget for DirectoryTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        // 로딩 표시는 테이블을 대체한다
        if self.view.is_loading_visible() {
            let style = Style::default().fg(Color::Rgb(150, 150, 150));
            buf.set_string(area.x + 1, area.y, LOADING_TEXT, style);
            return;
        }

        self.render_header(area, buf);

        let body_rows = area.height.saturating_sub(1) as usize;
        let entries = self.view.entries();
        if entries.is_empty() {
            if body_rows > 0 {
                let style = Style::default().fg(Color::Rgb(120, 120, 120));
                buf.set_string(area.x + 1, area.y + 1, "(empty folder)", style);
            }
            return;
        }

        let offset = self.view.scroll_offset();
        for (row, entry) in entries.iter().enumerate().skip(offset).take(body_rows) {
            let y = area.y + 1 + (row - offset) as u16;
            let is_marked = self.view.marked_index() == Some(row);
            self.render_row(entry, is_marked, area, y, buf);
        }
    }
}

/// 표시 폭 기준으로 자르기
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(1);
        if width + ch_width + 1 > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    if max_width > 0 {
        result.push('…');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn wall() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap()
    }

    fn folder(name: &str) -> FileEntry {
        FileEntry::new(format!("/a/{}", name), name, FileKind::Folder, None, wall())
    }

    fn file(name: &str, size: Option<u64>) -> FileEntry {
        FileEntry::new(
            format!("/a/{}", name),
            name,
            FileKind::File(FileSubtype::Generic),
            size,
            wall(),
        )
    }

    fn view() -> DirectoryView {
        DirectoryView::new(
            Duration::from_millis(300),
            Duration::from_secs(60),
            Duration::from_millis(500),
        )
    }

    fn names(view: &DirectoryView) -> Vec<&str> {
        view.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_collate_case_aware() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("A", "a"), Ordering::Greater);
        assert_eq!(collate("abc", "abc"), Ordering::Equal);
        assert_eq!(collate("ab", "abc"), Ordering::Less);
    }

    #[test]
    fn test_collate_folds_accents_and_symbols() {
        assert_eq!(collate("Élan", "eagle"), Ordering::Greater);
        assert_eq!(collate("Élan", "zebra"), Ordering::Less);
        assert_eq!(collate("elan", "élan"), Ordering::Less);
        assert_eq!(collate("élan", "Élan"), Ordering::Less);
        assert_eq!(collate("~notes", "eagle"), Ordering::Less);
        assert_eq!(collate("2024", "april"), Ordering::Less);

        let mut view = view();
        view.populate(
            vec![
                file("zebra", Some(1)),
                file("Élan", Some(1)),
                file("eagle", Some(1)),
                file("~notes", Some(1)),
            ],
            wall(),
        );
        assert_eq!(names(&view), vec!["~notes", "eagle", "Élan", "zebra"]);
    }

    #[test]
    fn test_populate_sorts_folders_first() {
        let mut view = view();
        view.populate(
            vec![
                file("zeta.txt", Some(1)),
                folder("beta"),
                file("Alpha.txt", Some(2)),
                folder("Zoo"),
                folder("alpha"),
            ],
            wall(),
        );
        assert_eq!(names(&view), vec!["alpha", "beta", "Zoo", "Alpha.txt", "zeta.txt"]);
    }

    #[test]
    fn test_mark_replaces_previous_selection() {
        let mut view = view();
        view.populate(vec![file("a", Some(1)), file("b", Some(2))], wall());

        assert_eq!(view.mark(0), Some(ViewEvent::Marked(file("a", Some(1)))));
        view.mark(1);
        assert_eq!(view.marked_entries(), vec![&file("b", Some(2))]);

        view.populate(vec![file("c", Some(3))], wall());
        assert!(view.marked_entries().is_empty());
    }

    #[test]
    fn test_click_then_double_click() {
        let t0 = Instant::now();
        let mut view = view();
        view.populate(vec![folder("b"), file("c.txt", Some(1))], wall());

        assert!(matches!(view.click(1, t0), Some(ViewEvent::Marked(_))));
        let event = view.click(1, t0 + Duration::from_millis(200));
        assert_eq!(event, Some(ViewEvent::Activated(file("c.txt", Some(1)))));
        // 세 번째 클릭은 삼킨다
        assert_eq!(view.click(1, t0 + Duration::from_millis(300)), None);
    }

    #[test]
    fn test_slow_or_different_row_clicks_only_mark() {
        let t0 = Instant::now();
        let mut view = view();
        view.populate(vec![folder("b"), file("c.txt", Some(1))], wall());

        view.click(0, t0);
        assert!(matches!(
            view.click(0, t0 + Duration::from_secs(2)),
            Some(ViewEvent::Marked(_))
        ));
        assert!(matches!(
            view.click(1, t0 + Duration::from_millis(2100)),
            Some(ViewEvent::Marked(_))
        ));
        assert_eq!(view.click(5, t0), None);
    }

    #[test]
    fn test_activate_ignores_selection() {
        let mut view = view();
        view.populate(vec![folder("b"), file("c.txt", Some(1))], wall());
        view.mark(1);
        assert_eq!(view.activate(0), Some(ViewEvent::Activated(folder("b"))));
        assert_eq!(view.marked_index(), Some(1));
    }

    #[test]
    fn test_loading_debounce() {
        let t0 = Instant::now();
        let mut view = view();
        view.attach(t0, wall());

        view.show_loading(t0);
        assert!(!view.tick(t0 + Duration::from_millis(100), wall()));
        assert!(!view.is_loading_visible());

        // 빠른 응답은 로딩 표시 없이 채워진다
        view.populate(vec![folder("b")], wall());
        assert!(!view.tick(t0 + Duration::from_millis(400), wall()));
        assert!(!view.is_loading_visible());

        view.show_loading(t0 + Duration::from_secs(1));
        assert!(view.tick(t0 + Duration::from_millis(1300), wall()));
        assert!(view.is_loading_visible());
    }

    #[test]
    fn test_refresh_only_while_attached() {
        let t0 = Instant::now();
        let later = wall() + chrono::Duration::minutes(5);
        let mut view = view();
        view.populate(vec![file("c.txt", Some(1))], wall());

        // 붙기 전에는 갱신 없음
        assert!(!view.tick(t0 + Duration::from_secs(120), later));

        view.attach(t0, wall());
        let entry = view.entries()[0].clone();
        assert_eq!(view.modified_label(&entry), "now");
        assert!(view.tick(t0 + Duration::from_secs(60), later));
        assert_eq!(view.modified_label(&entry), "5min ago");

        view.detach();
        assert!(!view.tick(t0 + Duration::from_secs(180), later + chrono::Duration::hours(2)));
        assert_eq!(view.modified_label(&entry), "5min ago");
    }

    #[test]
    fn test_size_labels() {
        assert_eq!(DirectoryView::size_label(&folder("b")), "");
        assert_eq!(DirectoryView::size_label(&file("c", Some(1024))), "1.00 kiB");
        assert_eq!(DirectoryView::size_label(&file("c", None)), "ERROR");
    }

    #[test]
    fn test_move_mark_and_scroll() {
        let mut view = view();
        let entries = (0..10).map(|i| file(&format!("f{}", i), Some(i))).collect();
        view.populate(entries, wall());

        view.move_mark(1);
        assert_eq!(view.marked_index(), Some(0));
        view.mark_last();
        view.ensure_visible(4);
        assert_eq!(view.scroll_offset(), 6);
        assert_eq!(view.index_at_row(3), Some(9));
        assert_eq!(view.index_at_row(4), None);

        view.move_mark(-20);
        view.ensure_visible(4);
        assert_eq!(view.marked_index(), Some(0));
        assert_eq!(view.scroll_offset(), 0);
    }

    #[test]
    fn test_render_shows_loading_instead_of_table() {
        let t0 = Instant::now();
        let mut view = view();
        view.populate(vec![folder("b")], wall());
        view.show_loading(t0);
        view.tick(t0 + Duration::from_millis(300), wall());

        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        DirectoryTable::new(&view).render(area, &mut buf);

        let first_row: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(first_row.contains(LOADING_TEXT));
    }
}
