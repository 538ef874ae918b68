//! GitHub 仓库内容 API 客户端
//!
//! 只负责读取仓库中的文件，不认识题目和数据集

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, Service};

/// GitHub 请求错误
#[derive(Debug, Error)]
pub enum GithubError {
    /// 文件不存在（HTTP 404）
    #[error("文件不存在: {path}")]
    NotFound { path: String },

    /// 超出 API 速率限制（HTTP 403 且 `x-ratelimit-remaining: 0`）
    #[error("GitHub 速率限制已用尽: {message}")]
    RateLimited { message: String },

    /// 令牌无效或无权限（HTTP 401/403）
    #[error("GitHub 拒绝访问 (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// 其它非成功状态码
    #[error("GitHub 返回 HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// 传输层错误
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// 内容解码失败
    #[error("无法解码 {path} 的内容: {message}")]
    Decode { path: String, message: String },
}

impl From<GithubError> for AppError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::NotFound { path } => AppError::Remote {
                service: Service::Github,
                status: 404,
                message: format!("文件不存在: {path}"),
            },
            GithubError::RateLimited { message } => AppError::Remote {
                service: Service::Github,
                status: 403,
                message: format!("速率限制已用尽: {message}"),
            },
            GithubError::Unauthorized { message, .. } => AppError::Auth {
                service: Service::Github,
                message,
            },
            GithubError::Status { status, message } => AppError::Remote {
                service: Service::Github,
                status,
                message,
            },
            GithubError::Http(e) => AppError::network(Service::Github, e),
            GithubError::Decode { path, message } => AppError::Remote {
                service: Service::Github,
                status: 200,
                message: format!("无法解码 {path}: {message}"),
            },
        }
    }
}

/// `GET /repos/{owner}/{repo}/contents/{path}` 的响应
#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    download_url: Option<String>,
}

/// GitHub 客户端
pub struct GithubClient {
    http: Client,
    api_base_url: String,
    repo: String,
    token: Option<String>,
}

impl GithubClient {
    /// 创建新的 GitHub 客户端
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::network(Service::Github, e))?;

        Ok(Self {
            http,
            api_base_url: config.github_api_base_url.trim_end_matches('/').to_string(),
            repo: config.puzzle_repo.clone(),
            token: config.github_token.clone(),
        })
    }

    /// 读取仓库中的文件内容
    ///
    /// # 参数
    /// - `path`: 仓库内路径，例如 `data/evaluation/1ae2feb7.json`
    ///
    /// # 返回
    /// 返回解码后的文件字节
    pub async fn get_file(&self, path: &str) -> Result<Vec<u8>, GithubError> {
        let url = format!("{}/repos/{}/contents/{}", self.api_base_url, self.repo, path);
        debug!("GitHub 请求: GET {}", url);

        let response = self
            .authorized(self.http.get(&url))
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;
        let response = check_status(response, path).await?;
        let text = response.text().await?;
        let body: ContentResponse =
            serde_json::from_str(&text).map_err(|e| GithubError::Decode {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        match (body.encoding.as_deref(), body.content) {
            (Some("base64"), Some(content)) if !content.is_empty() => decode_content(&content, path),
            _ => {
                // 超过内联大小限制的文件没有 content，改用 download_url
                let download_url = body.download_url.ok_or_else(|| GithubError::Decode {
                    path: path.to_string(),
                    message: "响应中既没有 content 也没有 download_url".to_string(),
                })?;
                self.download(&download_url, path).await
            }
        }
    }

    async fn download(&self, url: &str, path: &str) -> Result<Vec<u8>, GithubError> {
        debug!("GitHub 下载原始文件: {}", url);
        let response = self.authorized(self.http.get(url)).send().await?;
        let response = check_status(response, path).await?;
        Ok(response.bytes().await?.to_vec())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }
}

/// 检查响应状态码
async fn check_status(response: Response, path: &str) -> Result<Response, GithubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let exhausted = is_rate_limit_exhausted(response.headers());
    let message = response.text().await.unwrap_or_default();
    debug!("GitHub 响应 HTTP {}: {}", status, message);
    match status {
        StatusCode::NOT_FOUND => Err(GithubError::NotFound {
            path: path.to_string(),
        }),
        StatusCode::FORBIDDEN if exhausted => Err(GithubError::RateLimited { message }),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GithubError::Unauthorized {
            status: status.as_u16(),
            message,
        }),
        _ => Err(GithubError::Status {
            status: status.as_u16(),
            message,
        }),
    }
}

/// 速率限制耗尽时 GitHub 也返回 403，靠剩余额度头区分
fn is_rate_limit_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get("x-ratelimit-remaining")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|remaining| remaining.trim() == "0")
}

/// 解码 base64 内容（GitHub 每 60 个字符插入一个换行）
fn decode_content(content: &str, path: &str) -> Result<Vec<u8>, GithubError> {
    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD.decode(compact).map_err(|e| GithubError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}
