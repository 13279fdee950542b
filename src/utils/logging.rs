// Logging - env_logger 초기화
//
// TUI 모드에서는 화면이 깨지지 않도록 파일로, serve 모드에서는 stderr로 기록한다.

use crate::utils::error::Result;
use env_logger::{Builder, Env, Target};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

const DEFAULT_FILTER: &str = "warn";

/// 로그 출력 대상
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    File,
    Stderr,
}

pub fn init(sink: LogSink) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    match sink {
        LogSink::Stderr => {
            builder.target(Target::Stderr);
        }
        LogSink::File => {
            let Some(path) = log_file_path() else {
                return Ok(());
            };
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
    }
    // 테스트 등에서 이미 초기화되었으면 무시
    let _ = builder.try_init();
    Ok(())
}

fn log_file_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("HOSTPICK_LOG_FILE") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::cache_dir().map(|dir| dir.join("hostpick").join("hostpick.log"))
}
