use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 파일 세부 종류 (아이콘 선택에만 사용)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileSubtype {
    Notebook,
    Markdown,
    Image,
    /// HDF5 등 표 형태 데이터 컨테이너
    TabularData,
    Spreadsheet,
    Pdf,
    Video,
    Json,
    Yaml,
    /// toml/ini 등 설정 파일
    Config,
    SourceCode,
    Generic,
}

/// 엔트리 종류: 폴더 또는 세부 종류가 있는 파일
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Folder,
    File(FileSubtype),
}

impl FileKind {
    /// 와이어 태그 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Folder => "folder",
            FileKind::File(subtype) => match subtype {
                FileSubtype::Notebook => "notebook",
                FileSubtype::Markdown => "markdown",
                FileSubtype::Image => "image",
                FileSubtype::TabularData => "tabular-data",
                FileSubtype::Spreadsheet => "spreadsheet",
                FileSubtype::Pdf => "pdf",
                FileSubtype::Video => "video",
                FileSubtype::Json => "json",
                FileSubtype::Yaml => "yaml",
                FileSubtype::Config => "config",
                FileSubtype::SourceCode => "source-code",
                FileSubtype::Generic => "file",
            },
        }
    }

    /// 와이어 태그 파싱. 모르는 태그는 일반 파일로 취급한다.
    pub fn from_tag(tag: &str) -> Self {
        let subtype = match tag {
            "folder" => return FileKind::Folder,
            "notebook" | "ipynb" => FileSubtype::Notebook,
            "markdown" => FileSubtype::Markdown,
            "image" => FileSubtype::Image,
            "tabular-data" | "hdf" => FileSubtype::TabularData,
            "spreadsheet" => FileSubtype::Spreadsheet,
            "pdf" => FileSubtype::Pdf,
            "video" => FileSubtype::Video,
            "json" => FileSubtype::Json,
            "yaml" => FileSubtype::Yaml,
            "config" => FileSubtype::Config,
            "source-code" | "python" => FileSubtype::SourceCode,
            _ => FileSubtype::Generic,
        };
        FileKind::File(subtype)
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, FileKind::Folder)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FileKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FileKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(FileKind::from_tag(&tag))
    }
}

/// 백엔드가 보고한 파일시스템 객체 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// 절대 경로 (리스팅 안에서 유일)
    pub path: String,
    /// 표시 이름
    pub name: String,
    #[serde(alias = "type")]
    pub kind: FileKind,
    /// 바이트 크기 (폴더는 없음)
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(alias = "modified", with = "wire_time")]
    pub modified_at: DateTime<Utc>,
}

impl FileEntry {
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        kind: FileKind,
        size: Option<u64>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            kind,
            size,
            modified_at,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }
}

/// 한 번의 탐색 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryListing {
    /// 백엔드가 정규화한 경로 (요청 경로와 다를 수 있음)
    pub path: String,
    /// 받은 순서 그대로의 엔트리
    #[serde(default, alias = "files")]
    pub entries: Vec<FileEntry>,
    /// 요청 경로가 파일로 해석되었는지 여부
    #[serde(default)]
    pub is_file: bool,
    /// 경로 구성 요소 (지원하는 백엔드만)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<String>>,
}

/// 수정 시각 직렬화
///
/// 보낼 때는 RFC 3339(UTC, 밀리초), 받을 때는 타임존이 없는 ISO-8601도
/// 로컬 시각으로 해석해 받아들인다.
pub mod wire_time {
    use super::*;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_tags() {
        assert_eq!(FileKind::from_tag("folder"), FileKind::Folder);
        assert_eq!(
            FileKind::from_tag("ipynb"),
            FileKind::File(FileSubtype::Notebook)
        );
        assert_eq!(
            FileKind::from_tag("python"),
            FileKind::File(FileSubtype::SourceCode)
        );
        assert_eq!(
            FileKind::from_tag("something-new"),
            FileKind::File(FileSubtype::Generic)
        );
        assert!(FileKind::Folder.is_folder());
        assert!(!FileKind::File(FileSubtype::Pdf).is_folder());
    }

    #[test]
    fn test_entry_from_wire() {
        let json = r#"{
            "path": "/a/c.txt",
            "name": "c.txt",
            "kind": "file",
            "size": 12,
            "modifiedAt": "2024-05-17T12:00:00.250Z"
        }"#;
        let entry: FileEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.name, "c.txt");
        assert_eq!(entry.kind, FileKind::File(FileSubtype::Generic));
        assert_eq!(entry.size, Some(12));
        assert_eq!(entry.modified_at.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn test_entry_from_legacy_wire_names() {
        // 이전 백엔드: type/modified 필드, 타임존 없는 시각, 폴더 크기 null
        let json = r#"{
            "path": "/a/b",
            "name": "b",
            "type": "folder",
            "size": null,
            "modified": "2024-05-17T12:00:00.123456"
        }"#;
        let entry: FileEntry = serde_json::from_str(json).unwrap();

        assert!(entry.is_folder());
        assert_eq!(entry.size, None);
    }

    #[test]
    fn test_listing_accepts_files_alias() {
        let json = r#"{"path": "/a/", "files": [], "isFile": false}"#;
        let listing: DirectoryListing = serde_json::from_str(json).unwrap();

        assert_eq!(listing.path, "/a/");
        assert!(listing.entries.is_empty());
        assert!(!listing.is_file);
        assert!(listing.segments.is_none());
    }

    #[test]
    fn test_invalid_timestamp_rejected() {
        assert!(wire_time::parse("yesterday-ish").is_none());
    }
}
