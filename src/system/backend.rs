//! 백엔드 워커: 요청 메시지를 받아 파일 시스템 목록 응답을 돌려준다.
//!
//! 같은 프로세스의 워커 스레드(mpsc)로 띄우거나, `--serve` 모드에서
//! 표준 입출력 위의 줄 단위 JSON 서비스로 돌릴 수 있다.

use crate::system::channel::LocalTransport;
use crate::system::filesystem::FileSystem;
use crate::system::protocol::{self, ErrorPayload, ListDirPayload, Request, Response};
use crate::utils::error::Result;
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

/// 요청 하나 처리
pub fn handle_request(filesystem: &FileSystem, request: &Request) -> Response {
    let path = request.path();
    let result = match request {
        Request::ListDir(_) => filesystem.list_dir(Path::new(path)),
        Request::ListParent(_) => filesystem.list_parent(Path::new(path)),
    };

    match result {
        Ok(listing) => Response::ListDir(ListDirPayload {
            listing,
            request_id: request.request_id(),
        }),
        Err(e) => {
            warn!("listing {} failed: {}", path, e);
            Response::Error(ErrorPayload {
                path: path.to_string(),
                message: e.to_string(),
                request_id: request.request_id(),
            })
        }
    }
}

/// 원시 메시지 하나 처리. 해석할 수 없으면 로그만 남기고 None.
pub fn handle_raw(filesystem: &FileSystem, raw: &str) -> Option<String> {
    let request = match protocol::decode_request(raw) {
        Ok(request) => request,
        Err(e) => {
            warn!("unknown message: {} ({})", raw, e);
            return None;
        }
    };
    debug!("<- {:?}", request);

    match protocol::encode(&handle_request(filesystem, &request)) {
        Ok(encoded) => Some(encoded),
        Err(e) => {
            warn!("failed to encode response: {}", e);
            None
        }
    }
}

/// 워커 스레드 실행 핸들
pub struct BackendWorker {
    join_handle: Option<JoinHandle<()>>,
}

impl BackendWorker {
    /// 워커 스레드를 띄우고 그와 연결된 전송 계층을 반환한다.
    ///
    /// 전송 계층이 드롭되면 워커도 종료된다.
    pub fn spawn() -> Result<(Self, LocalTransport)> {
        let (request_tx, request_rx) = mpsc::channel::<String>();
        let (response_tx, response_rx) = mpsc::channel::<String>();

        let join_handle = thread::Builder::new()
            .name("hostpick-backend".to_string())
            .spawn(move || {
                let filesystem = FileSystem::new();
                for raw in request_rx {
                    let Some(response) = handle_raw(&filesystem, &raw) else {
                        continue;
                    };
                    if response_tx.send(response).is_err() {
                        break;
                    }
                }
                debug!("backend worker stopped");
            })?;

        Ok((
            Self {
                join_handle: Some(join_handle),
            },
            LocalTransport::new(request_tx, response_rx),
        ))
    }

    /// 워커 종료 대기 (전송 계층을 먼저 드롭해야 한다)
    pub fn join(mut self) {
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.join();
        }
    }
}

/// 줄 단위 JSON 서비스. 입력이 끝나면 반환한다.
pub fn serve<R: BufRead, W: Write>(input: R, mut output: W) -> Result<()> {
    let filesystem = FileSystem::new();
    info!("serving listing requests on stdio");
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(response) = handle_raw(&filesystem, &line) {
            writeln!(output, "{}", response)?;
            output.flush()?;
        }
    }
    Ok(())
}
