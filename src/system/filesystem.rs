use crate::models::path_state::with_trailing_sep;
use crate::models::{DirectoryListing, FileEntry, FileKind, FileSubtype};
use crate::utils::error::{HostPickError, Result};
use chrono::{DateTime, Utc};
use std::fs::{self, Metadata};
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR_STR};

/// 호스트 파일 시스템 목록 서비스
pub struct FileSystem;

impl FileSystem {
    /// 새 파일 시스템 인스턴스 생성
    pub fn new() -> Self {
        Self
    }

    /// 디렉토리 목록
    ///
    /// 경로가 파일이면 `is_file`이 켜진 결과에 그 파일 하나만 담아 반환합니다.
    pub fn list_dir(&self, path: &Path) -> Result<DirectoryListing> {
        let path = absolutize(path)?;

        // 1. 경로 존재 확인 (링크는 대상 기준)
        let metadata = fs::metadata(&path).map_err(|e| map_io_error(e, &path))?;

        // 2. 파일이면 바로 선택 확정용 결과
        if !metadata.is_dir() {
            let entry = self.inspect(&path).ok_or_else(|| HostPickError::PathNotFound {
                path: path.clone(),
            })?;
            return Ok(DirectoryListing {
                path: path_to_string(&path),
                entries: vec![entry],
                is_file: true,
                segments: Some(segments_of(&path)),
            });
        }

        // 3. 디렉토리 읽기
        let read_dir = fs::read_dir(&path).map_err(|e| map_io_error(e, &path))?;

        // 4. 각 엔트리 검사 (읽는 도중 사라진 엔트리는 스킵)
        let entries = read_dir
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| self.inspect(&entry.path()))
            .collect();

        Ok(DirectoryListing {
            path: format_folder_path(&path),
            entries,
            is_file: false,
            segments: Some(segments_of(&path)),
        })
    }

    /// 상위 디렉토리 목록 (루트의 상위는 루트 자신)
    pub fn list_parent(&self, path: &Path) -> Result<DirectoryListing> {
        let path = absolutize(path)?;
        let parent = path.parent().map(Path::to_path_buf).unwrap_or(path);
        self.list_dir(&parent)
    }

    /// 엔트리 하나 검사. 존재하지 않으면 None.
    pub fn inspect(&self, path: &Path) -> Option<FileEntry> {
        let metadata = fs::metadata(path)
            .or_else(|_| fs::symlink_metadata(path))
            .ok()?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path_to_string(path));

        let kind = deduce_kind(path, &metadata);
        let size = if kind.is_folder() {
            None
        } else {
            Some(metadata.len())
        };

        // 수정 시간 (지원하지 않으면 UNIX epoch)
        let modified: DateTime<Utc> = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_default();

        Some(FileEntry::new(path_to_string(path), name, kind, size, modified))
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// 확장자로 파일 종류 추정
pub fn deduce_kind(path: &Path, metadata: &Metadata) -> FileKind {
    if metadata.is_dir() {
        return FileKind::Folder;
    }

    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let subtype = match ext.as_str() {
        "ipynb" => FileSubtype::Notebook,
        "md" | "markdown" => FileSubtype::Markdown,
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "svg" | "webp" | "tif" | "tiff" | "ico" => {
            FileSubtype::Image
        }
        "mp4" | "mkv" | "avi" | "mov" | "webm" | "mpeg" | "mpg" => FileSubtype::Video,
        "pdf" => FileSubtype::Pdf,
        "json" => FileSubtype::Json,
        "yaml" | "yml" => FileSubtype::Yaml,
        "toml" | "ini" | "cfg" | "conf" => FileSubtype::Config,
        "hdf" | "hdf5" | "h5" => FileSubtype::TabularData,
        "csv" | "tsv" | "xls" | "xlsx" | "ods" => FileSubtype::Spreadsheet,
        "py" | "pyi" | "rs" | "c" | "h" | "cpp" | "hpp" | "js" | "ts" | "go" | "java" | "sh" => {
            FileSubtype::SourceCode
        }
        _ => FileSubtype::Generic,
    };
    FileKind::File(subtype)
}

/// 폴더 경로를 구분자로 끝나는 문자열로
pub fn format_folder_path(path: &Path) -> String {
    with_trailing_sep(&path_to_string(path), MAIN_SEPARATOR_STR)
}

/// 경로 구성 요소 (접두사와 루트는 한 요소로 합친다)
pub fn segments_of(path: &Path) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    let mut root = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => root.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => root.push_str(MAIN_SEPARATOR_STR),
            other => {
                if !root.is_empty() {
                    segments.push(std::mem::take(&mut root));
                }
                segments.push(other.as_os_str().to_string_lossy().to_string());
            }
        }
    }
    if !root.is_empty() {
        segments.push(root);
    }
    segments
}

/// 상대 경로를 현재 디렉토리 기준 절대 경로로
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Ok(std::env::current_dir()?);
    }
    Ok(std::path::absolute(path)?)
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn map_io_error(e: std::io::Error, path: &Path) -> HostPickError {
    match e.kind() {
        std::io::ErrorKind::NotFound => HostPickError::PathNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => HostPickError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => HostPickError::Io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn names(listing: &DirectoryListing) -> Vec<String> {
        let mut names: Vec<_> = listing.entries.iter().map(|e| e.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_list_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        let mut file = File::create(temp.path().join("notes.md")).unwrap();
        file.write_all(b"hello").unwrap();

        let listing = FileSystem::new().list_dir(temp.path()).unwrap();

        assert!(!listing.is_file);
        assert!(listing.path.ends_with(MAIN_SEPARATOR_STR));
        assert_eq!(names(&listing), vec!["notes.md", "sub"]);

        let sub = listing.entries.iter().find(|e| e.name == "sub").unwrap();
        assert!(sub.is_folder());
        assert_eq!(sub.size, None);

        let notes = listing.entries.iter().find(|e| e.name == "notes.md").unwrap();
        assert_eq!(notes.kind, FileKind::File(FileSubtype::Markdown));
        assert_eq!(notes.size, Some(5));
    }

    #[test]
    fn test_list_dir_on_file_resolves_as_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.csv");
        File::create(&path).unwrap();

        let listing = FileSystem::new().list_dir(&path).unwrap();

        assert!(listing.is_file);
        assert_eq!(listing.path, path.to_string_lossy());
        assert_eq!(listing.entries.len(), 1);
        assert_eq!(
            listing.entries[0].kind,
            FileKind::File(FileSubtype::Spreadsheet)
        );
    }

    #[test]
    fn test_list_parent() {
        let temp = TempDir::new().unwrap();
        let child = temp.path().join("child");
        fs::create_dir(&child).unwrap();

        let listing = FileSystem::new().list_parent(&child).unwrap();

        assert_eq!(listing.path, format_folder_path(temp.path()));
        assert_eq!(names(&listing), vec!["child"]);
    }

    #[test]
    fn test_list_missing_path() {
        let temp = TempDir::new().unwrap();
        let result = FileSystem::new().list_dir(&temp.path().join("nope"));
        assert!(matches!(result, Err(HostPickError::PathNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_segments_unix() {
        assert_eq!(
            segments_of(Path::new("/a/b")),
            vec!["/".to_string(), "a".to_string(), "b".to_string()]
        );
        assert_eq!(segments_of(Path::new("/")), vec!["/".to_string()]);
        assert_eq!(format_folder_path(Path::new("/a/b")), "/a/b/");
        assert_eq!(format_folder_path(Path::new("/")), "/");
    }

    #[test]
    fn test_deduce_kind_by_extension() {
        let temp = TempDir::new().unwrap();
        let cases = [
            ("a.ipynb", FileSubtype::Notebook),
            ("b.PNG", FileSubtype::Image),
            ("c.h5", FileSubtype::TabularData),
            ("d.yml", FileSubtype::Yaml),
            ("e.pyi", FileSubtype::SourceCode),
            ("f.bin", FileSubtype::Generic),
            ("noext", FileSubtype::Generic),
        ];
        for (name, expected) in cases {
            let path = temp.path().join(name);
            File::create(&path).unwrap();
            let metadata = fs::metadata(&path).unwrap();
            assert_eq!(deduce_kind(&path, &metadata), FileKind::File(expected), "{}", name);
        }
    }
}
