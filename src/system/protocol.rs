//! 다이얼로그와 백엔드 사이의 메시지 정의
//!
//! 모든 메시지는 `{"type": <태그>, "payload": {...}}` 형태의 JSON 한 개이다.
//! 요청에는 단조 증가하는 `requestId`가 붙고, 응답은 그 값을 그대로 돌려준다.

use crate::models::DirectoryListing;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// 경로 하나를 담는 요청 본문
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPayload {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

/// 다이얼로그 → 백엔드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Request {
    /// 디렉토리 목록 요청 (파일 경로면 파일로 해석됨)
    #[serde(rename = "req:list-dir")]
    ListDir(PathPayload),
    /// 상위 디렉토리 목록 요청 (응답은 일반 목록 응답으로 옴)
    #[serde(rename = "req:list-parent")]
    ListParent(PathPayload),
}

impl Request {
    pub fn path(&self) -> &str {
        match self {
            Request::ListDir(payload) | Request::ListParent(payload) => &payload.path,
        }
    }

    pub fn request_id(&self) -> Option<u64> {
        match self {
            Request::ListDir(payload) | Request::ListParent(payload) => payload.request_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDirPayload {
    #[serde(flatten)]
    pub listing: DirectoryListing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub path: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

/// 백엔드 → 다이얼로그
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Response {
    #[serde(rename = "res:list-dir")]
    ListDir(ListDirPayload),
    #[serde(rename = "res:error")]
    Error(ErrorPayload),
}

impl Response {
    pub fn request_id(&self) -> Option<u64> {
        match self {
            Response::ListDir(payload) => payload.request_id,
            Response::Error(payload) => payload.request_id,
        }
    }
}

pub fn encode<T: Serialize>(message: &T) -> Result<String> {
    Ok(serde_json::to_string(message)?)
}

/// 태그가 등록되지 않았거나 본문이 깨졌으면 Protocol 에러
pub fn decode_response(raw: &str) -> Result<Response> {
    Ok(serde_json::from_str(raw)?)
}

pub fn decode_request(raw: &str) -> Result<Request> {
    Ok(serde_json::from_str(raw)?)
}
