//! Bluesky (AT Protocol XRPC) 客户端
//!
//! 封装登录、上传图片、创建记录三个调用

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, Service};

/// Bluesky 请求错误
#[derive(Debug, Error)]
pub enum BskyError {
    /// 账号或密码错误、令牌失效
    #[error("{error}: {message}")]
    Unauthorized { error: String, message: String },

    /// 其它 XRPC 错误
    #[error("XRPC {method} 返回 HTTP {status} ({error}): {message}")]
    Status {
        method: &'static str,
        status: u16,
        error: String,
        message: String,
    },

    /// 传输层错误
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<BskyError> for AppError {
    fn from(err: BskyError) -> Self {
        match err {
            BskyError::Unauthorized { error, message } => AppError::Auth {
                service: Service::Bluesky,
                message: format!("{error}: {message}"),
            },
            BskyError::Status {
                method,
                status,
                error,
                message,
            } => AppError::Remote {
                service: Service::Bluesky,
                status,
                message: format!("{method} {error}: {message}"),
            },
            BskyError::Http(e) => AppError::network(Service::Bluesky, e),
        }
    }
}

/// XRPC 错误响应体
#[derive(Debug, Default, Deserialize)]
struct XrpcErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

/// 登录会话
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_jwt: String,
    pub did: String,
    pub handle: String,
}

/// 已创建记录的标识
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordRef {
    pub uri: String,
    pub cid: String,
}

#[derive(Debug, Deserialize)]
struct UploadBlobResponse {
    blob: Value,
}

/// Bluesky 客户端
pub struct BskyClient {
    http: Client,
    service_url: String,
}

impl BskyClient {
    /// 创建新的 Bluesky 客户端
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = Client::builder()
            .build()
            .map_err(|e| AppError::network(Service::Bluesky, e))?;
        Ok(Self {
            http,
            service_url: config.bsky_service_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/xrpc/{}", self.service_url, method)
    }

    /// 登录（com.atproto.server.createSession）
    pub async fn create_session(&self, identifier: &str, password: &str) -> Result<Session, BskyError> {
        const METHOD: &str = "com.atproto.server.createSession";
        debug!("Bluesky 登录: {}", identifier);

        let response = self
            .http
            .post(self.endpoint(METHOD))
            .json(&json!({ "identifier": identifier, "password": password }))
            .send()
            .await?;

        // createSession 对错误的账号密码返回 400/401
        parse_response(response, METHOD, &[StatusCode::BAD_REQUEST, StatusCode::UNAUTHORIZED]).await
    }

    /// 上传图片（com.atproto.repo.uploadBlob）
    ///
    /// # 返回
    /// 返回 blob 引用，原样放入帖子的 embed 中
    pub async fn upload_blob(
        &self,
        session: &Session,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<Value, BskyError> {
        const METHOD: &str = "com.atproto.repo.uploadBlob";
        debug!("上传图片: {} 字节, {}", bytes.len(), mime_type);

        let response = self
            .http
            .post(self.endpoint(METHOD))
            .header(AUTHORIZATION, format!("Bearer {}", session.access_jwt))
            .header(CONTENT_TYPE, mime_type)
            .body(bytes)
            .send()
            .await?;

        let uploaded: UploadBlobResponse =
            parse_response(response, METHOD, &[StatusCode::UNAUTHORIZED]).await?;
        Ok(uploaded.blob)
    }

    /// 创建记录（com.atproto.repo.createRecord）
    pub async fn create_record(
        &self,
        session: &Session,
        collection: &str,
        record: Value,
    ) -> Result<RecordRef, BskyError> {
        const METHOD: &str = "com.atproto.repo.createRecord";
        debug!("创建记录: {} {}", collection, record);

        let response = self
            .http
            .post(self.endpoint(METHOD))
            .header(AUTHORIZATION, format!("Bearer {}", session.access_jwt))
            .json(&json!({
                "repo": session.did,
                "collection": collection,
                "record": record,
            }))
            .send()
            .await?;

        parse_response(response, METHOD, &[StatusCode::UNAUTHORIZED]).await
    }
}

/// 解析 XRPC 响应；`auth_statuses` 中的状态码视为认证失败
async fn parse_response<T: DeserializeOwned>(
    response: Response,
    method: &'static str,
    auth_statuses: &[StatusCode],
) -> Result<T, BskyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let body: XrpcErrorBody = serde_json::from_str(&text).unwrap_or_default();
    debug!("XRPC {} 返回 HTTP {}: {}", method, status, text);

    if auth_statuses.contains(&status) {
        Err(BskyError::Unauthorized {
            error: body.error,
            message: body.message,
        })
    } else {
        Err(BskyError::Status {
            method,
            status: status.as_u16(),
            error: body.error,
            message: body.message,
        })
    }
}
