//! 백엔드 채널: 호스트 전송 계층 위의 타입 있는 요청/응답 다리
//!
//! 전송 계층은 직렬화된 JSON 문자열만 주고받는다. 채널은 나가는 요청에
//! 요청 번호를 붙이고, 들어오는 메시지를 닫힌 `Response` 열거형으로 해석한다.
//! 해석할 수 없는 메시지는 로그만 남기고 버린다.

use crate::system::protocol::{self, PathPayload, Request, Response};
use crate::utils::error::{HostPickError, Result};
use log::{debug, warn};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

/// 호스트가 제공하는 메시지 전송 계층
pub trait Transport {
    /// 메시지 하나를 보낸다. 응답을 기다리지 않는다.
    fn send(&mut self, message: String) -> Result<()>;
    /// 도착한 메시지 하나를 꺼낸다. 없으면 None.
    fn try_recv(&mut self) -> Option<String>;
}

/// 같은 프로세스 안의 백엔드 워커와 mpsc로 연결된 전송 계층
#[derive(Debug)]
pub struct LocalTransport {
    outgoing: Sender<String>,
    incoming: Receiver<String>,
}

impl LocalTransport {
    pub fn new(outgoing: Sender<String>, incoming: Receiver<String>) -> Self {
        Self { outgoing, incoming }
    }
}

impl Transport for LocalTransport {
    fn send(&mut self, message: String) -> Result<()> {
        self.outgoing
            .send(message)
            .map_err(|_| HostPickError::ChannelClosed)
    }

    fn try_recv(&mut self) -> Option<String> {
        match self.incoming.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// 타입 있는 백엔드 채널
pub struct BackendChannel<T: Transport> {
    transport: T,
    last_request_id: u64,
}

impl<T: Transport> BackendChannel<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            last_request_id: 0,
        }
    }

    /// 디렉토리 목록 요청. 발급한 요청 번호를 반환한다.
    pub fn request_list_dir(&mut self, path: &str) -> Result<u64> {
        let payload = self.next_payload(path);
        self.send(Request::ListDir(payload))
    }

    /// 상위 디렉토리 목록 요청. 응답은 일반 목록 응답으로 도착한다.
    pub fn request_list_parent(&mut self, path: &str) -> Result<u64> {
        let payload = self.next_payload(path);
        self.send(Request::ListParent(payload))
    }

    /// 가장 최근에 발급한 요청 번호 (0 = 아직 없음)
    pub fn last_request_id(&self) -> u64 {
        self.last_request_id
    }

    /// 도착한 메시지를 모두 해석해 반환한다.
    pub fn poll(&mut self) -> Vec<Response> {
        let mut responses = Vec::new();
        while let Some(raw) = self.transport.try_recv() {
            match protocol::decode_response(&raw) {
                Ok(response) => responses.push(response),
                Err(e) => warn!("dropping unroutable message: {} ({})", raw, e),
            }
        }
        responses
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn next_payload(&self, path: &str) -> PathPayload {
        PathPayload {
            path: path.to_string(),
            request_id: Some(self.last_request_id + 1),
        }
    }

    /// 전송 계층이 받아들인 뒤에만 요청 번호를 확정한다
    fn send(&mut self, request: Request) -> Result<u64> {
        debug!("-> {:?}", request);
        let id = request.request_id().unwrap_or(self.last_request_id + 1);
        let message = protocol::encode(&request)?;
        self.transport.send(message)?;
        self.last_request_id = id;
        Ok(id)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingTransport;
    use super::*;
    use crate::models::DirectoryListing;
    use crate::system::protocol::ListDirPayload;
    use std::sync::mpsc;

    #[test]
    fn test_request_ids_increase() {
        let mut channel = BackendChannel::new(RecordingTransport::default());
        assert_eq!(channel.last_request_id(), 0);
        assert_eq!(channel.request_list_dir("/a").unwrap(), 1);
        assert_eq!(channel.request_list_parent("/a/b").unwrap(), 2);

        let sent = channel.transport().sent_requests();
        assert_eq!(
            sent,
            vec![
                Request::ListDir(PathPayload {
                    path: "/a".to_string(),
                    request_id: Some(1),
                }),
                Request::ListParent(PathPayload {
                    path: "/a/b".to_string(),
                    request_id: Some(2),
                }),
            ]
        );
    }

    #[test]
    fn test_failed_send_keeps_request_id() {
        let mut channel = BackendChannel::new(RecordingTransport::default());
        channel.request_list_dir("/a").unwrap();

        channel.transport_mut().closed = true;
        assert!(channel.request_list_parent("/a").is_err());
        assert_eq!(channel.last_request_id(), 1);

        channel.transport_mut().closed = false;
        assert_eq!(channel.request_list_dir("/b").unwrap(), 2);
    }

    #[test]
    fn test_poll_drops_unroutable_messages() {
        let mut channel = BackendChannel::new(RecordingTransport::default());
        let good = Response::ListDir(ListDirPayload {
            listing: DirectoryListing {
                path: "/a/".to_string(),
                entries: Vec::new(),
                is_file: false,
                segments: None,
            },
            request_id: Some(1),
        });
        channel.transport_mut().push_raw(r#"{"type": "res:unknown", "payload": {}}"#);
        channel.transport_mut().push_response(&good);
        channel.transport_mut().push_raw("garbage");

        assert_eq!(channel.poll(), vec![good]);
        assert!(channel.poll().is_empty());
    }

    #[test]
    fn test_send_failure_propagates() {
        let mut channel = BackendChannel::new(RecordingTransport {
            closed: true,
            ..Default::default()
        });
        assert!(matches!(
            channel.request_list_dir("/a"),
            Err(HostPickError::ChannelClosed)
        ));
    }

    #[test]
    fn test_local_transport_roundtrip() {
        let (to_backend, backend_rx) = mpsc::channel();
        let (backend_tx, from_backend) = mpsc::channel();
        let mut transport = LocalTransport::new(to_backend, from_backend);

        transport.send("ping".to_string()).unwrap();
        assert_eq!(backend_rx.recv().unwrap(), "ping");

        assert_eq!(transport.try_recv(), None);
        backend_tx.send("pong".to_string()).unwrap();
        assert_eq!(transport.try_recv(), Some("pong".to_string()));

        drop(backend_rx);
        assert!(transport.send("late".to_string()).is_err());
    }
}
