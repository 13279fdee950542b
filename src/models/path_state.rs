/// 현재 디렉토리 경로 상태
///
/// 경로와 구성 요소 목록은 항상 `replace`로 함께 교체된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathState {
    current: String,
    segments: Option<Vec<String>>,
}

impl PathState {
    pub fn new(current: impl Into<String>, segments: Option<Vec<String>>) -> Self {
        Self {
            current: current.into(),
            segments,
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn segments(&self) -> Option<&[String]> {
        self.segments.as_deref()
    }

    /// 경로와 구성 요소를 한 번에 교체
    pub fn replace(&mut self, path: impl Into<String>, segments: Option<Vec<String>>) {
        self.current = path.into();
        self.segments = segments;
    }

    /// 응답 전에 보여줄 상위 경로 (구분자로 끝남)
    ///
    /// 구성 요소가 있으면 그것으로 계산하고, 없으면 문자열에서 마지막
    /// 구분자를 찾는다. 더 올라갈 곳이 없으면 빈 문자열이다.
    pub fn parent_display(&self, sep: &str) -> String {
        if let Some(segments) = self.segments.as_deref() {
            if !segments.is_empty() {
                let keep = segments.len().saturating_sub(1).max(1);
                return with_trailing_sep(&join_segments(&segments[..keep], sep), sep);
            }
        }

        let current = self.current.strip_suffix(sep).unwrap_or(&self.current);
        match current.rfind(sep) {
            Some(index) => format!("{}{}", &self.current[..index], sep),
            None => String::new(),
        }
    }
}

/// 구성 요소를 경로 문자열로 결합 (루트 요소는 이미 구분자로 끝난다)
pub fn join_segments(segments: &[String], sep: &str) -> String {
    let mut joined = String::new();
    for segment in segments {
        if !joined.is_empty() && !joined.ends_with(sep) {
            joined.push_str(sep);
        }
        joined.push_str(segment);
    }
    joined
}

pub fn with_trailing_sep(path: &str, sep: &str) -> String {
    if path.ends_with(sep) {
        path.to_string()
    } else {
        format!("{}{}", path, sep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(parts: &[&str]) -> Option<Vec<String>> {
        Some(parts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_replace_is_atomic() {
        let mut state = PathState::new("/a/", segs(&["/", "a"]));
        state.replace("/a/b/", segs(&["/", "a", "b"]));

        assert_eq!(state.current(), "/a/b/");
        assert_eq!(state.segments().unwrap().len(), 3);

        state.replace("/x/", None);
        assert_eq!(state.current(), "/x/");
        assert!(state.segments().is_none());
    }

    #[test]
    fn test_parent_display_from_string() {
        assert_eq!(PathState::new("/a/b", None).parent_display("/"), "/a/");
        assert_eq!(PathState::new("/a/b/", None).parent_display("/"), "/a/");
        assert_eq!(PathState::new("/a", None).parent_display("/"), "/");
        // 루트나 빈 경로는 빈 표시로 떨어진다
        assert_eq!(PathState::new("/", None).parent_display("/"), "");
        assert_eq!(PathState::new("", None).parent_display("/"), "");
    }

    #[test]
    fn test_parent_display_from_segments() {
        let state = PathState::new("/a/b/", segs(&["/", "a", "b"]));
        assert_eq!(state.parent_display("/"), "/a/");

        let root = PathState::new("/", segs(&["/"]));
        assert_eq!(root.parent_display("/"), "/");
    }

    #[test]
    fn test_parent_display_windows_separator() {
        let state = PathState::new("C:\\Users\\me\\", segs(&["C:\\", "Users", "me"]));
        assert_eq!(state.parent_display("\\"), "C:\\Users\\");

        let plain = PathState::new("C:\\Users\\me\\", None);
        assert_eq!(plain.parent_display("\\"), "C:\\Users\\");
    }

    #[test]
    fn test_join_segments() {
        let parts = vec!["/".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(join_segments(&parts, "/"), "/a/b");
        assert_eq!(with_trailing_sep("/a/b", "/"), "/a/b/");
        assert_eq!(with_trailing_sep("/a/b/", "/"), "/a/b/");
    }
}
