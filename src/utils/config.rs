// Config - TOML 설정 파일 로드
//
// 위치: $HOSTPICK_CONFIG > <config_dir>/hostpick/config.toml
// 파일이 없으면 기본값을 사용한다.

use crate::utils::error::{HostPickError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 아이콘 표시 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconMode {
    /// 이모지 아이콘 (기본)
    #[default]
    Emoji,
    /// ASCII 텍스트 아이콘 (터미널 호환)
    Ascii,
}

/// 사용자 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 화면 안에 항상 남아 있어야 하는 창의 최소 폭/높이 (셀)
    pub min_visible: i32,
    /// 창 최소 너비
    pub min_width: i32,
    /// 창 최소 높이
    pub min_height: i32,
    /// 처음 열릴 때 창 너비
    pub initial_width: i32,
    /// 처음 열릴 때 창 높이
    pub initial_height: i32,
    /// 로딩 표시 지연
    pub loading_delay_ms: u64,
    /// 수정 시각 라벨 갱신 주기
    pub refresh_interval_secs: u64,
    /// 더블 클릭 판정 시간
    pub double_click_ms: u64,
    pub icons: IconMode,
    /// 다이얼로그 제목
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_visible: 4,
            min_width: 40,
            min_height: 10,
            initial_width: 80,
            initial_height: 24,
            loading_delay_ms: 300,
            refresh_interval_secs: 60,
            double_click_ms: 500,
            icons: IconMode::default(),
            title: "Select a file".to_string(),
        }
    }
}

impl Config {
    const ENV_PATH: &'static str = "HOSTPICK_CONFIG";

    /// 기본 위치에서 설정 로드
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// 지정한 파일에서 설정 로드 (파일이 없으면 기본값)
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(HostPickError::Io(e)),
        };
        Self::parse(&content)
            .map_err(|e| HostPickError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.min_visible < 1 {
            return Err("min_visible must be at least 1".to_string());
        }
        if self.min_width < 3 || self.min_height < 3 {
            return Err("min_width and min_height must be at least 3".to_string());
        }
        if self.refresh_interval_secs == 0 {
            return Err("refresh_interval_secs must be positive".to_string());
        }
        Ok(())
    }

    fn default_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var(Self::ENV_PATH) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::config_dir().map(|dir| dir.join("hostpick").join("config.toml"))
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }
}
