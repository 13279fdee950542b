//! 다이얼로그를 품은 호스트가 노출하는 상태
//!
//! 초기 경로(과 선택적으로 구성 요소, 구분자)를 읽고, 선택이 확정되면
//! 선택 경로를 한 번만 기록한 뒤 호스트에 저장을 요청한다.

use log::warn;

pub trait HostModel {
    /// 처음 열 디렉토리 경로
    fn initial_path(&self) -> &str;
    /// 경로 구분자
    fn path_sep(&self) -> &str;
    /// 처음 경로의 구성 요소 (알 수 없으면 None)
    fn initial_segments(&self) -> Option<Vec<String>>;
    /// 선택 경로 기록. 이미 기록돼 있으면 false를 반환하고 무시한다.
    fn set_selected(&mut self, path: &str) -> bool;
    fn selected(&self) -> Option<&str>;
    /// 기록한 값을 호스트에 반영
    fn save_changes(&mut self);
}

/// 한 번의 실행 동안 유지되는 호스트 상태
#[derive(Debug, Clone, Default)]
pub struct SessionModel {
    initial_path: String,
    sep: String,
    segments: Option<Vec<String>>,
    selected: Option<String>,
    saved: bool,
}

impl SessionModel {
    pub fn new(
        initial_path: impl Into<String>,
        sep: impl Into<String>,
        segments: Option<Vec<String>>,
    ) -> Self {
        Self {
            initial_path: initial_path.into(),
            sep: sep.into(),
            segments,
            selected: None,
            saved: false,
        }
    }

    /// 저장된 선택 경로 (save_changes 이후에만 Some)
    pub fn saved_selection(&self) -> Option<&str> {
        if self.saved {
            self.selected.as_deref()
        } else {
            None
        }
    }
}

impl HostModel for SessionModel {
    fn initial_path(&self) -> &str {
        &self.initial_path
    }

    fn path_sep(&self) -> &str {
        &self.sep
    }

    fn initial_segments(&self) -> Option<Vec<String>> {
        self.segments.clone()
    }

    fn set_selected(&mut self, path: &str) -> bool {
        if self.selected.is_some() {
            warn!("selection already recorded, ignoring {}", path);
            return false;
        }
        self.selected = Some(path.to_string());
        true
    }

    fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    fn save_changes(&mut self) {
        self.saved = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_write_once() {
        let mut model = SessionModel::new("/a/", "/", None);
        assert!(model.set_selected("/a/c.txt"));
        assert!(!model.set_selected("/a/d.txt"));
        assert_eq!(model.selected(), Some("/a/c.txt"));
    }

    #[test]
    fn test_saved_selection_requires_save() {
        let mut model = SessionModel::new("/a/", "/", None);
        model.set_selected("/a/c.txt");
        assert_eq!(model.saved_selection(), None);
        model.save_changes();
        assert_eq!(model.saved_selection(), Some("/a/c.txt"));
    }
}
