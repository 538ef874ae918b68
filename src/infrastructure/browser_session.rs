//! 浏览器会话 - 基础设施层
//!
//! 持有浏览器进程和页面，只暴露"读取元素文本"的能力

use std::path::Path;

use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::browser::launch_headless_browser;
use crate::error::{AppError, Result, Service};

/// 可读取元素文本、用完必须关闭的页面
#[allow(async_fn_in_trait)]
pub trait ElementReader: Sized {
    /// 读取元素的文本内容
    async fn element_text(&self, selector: &str) -> Result<String>;

    /// 释放页面及其背后的资源
    async fn close(self);
}

/// 浏览器会话
///
/// 职责：
/// - 持有唯一的 Browser 与 Page
/// - 暴露元素文本读取能力
/// - 不认识题目
///
/// 使用者必须在所有路径上调用 [`ElementReader::close`]。
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
}

impl BrowserSession {
    /// 启动浏览器并打开页面
    ///
    /// 打开页面失败时浏览器会先被关闭再返回错误。
    pub async fn open(url: &str, chrome_executable: Option<&Path>) -> Result<Self> {
        let (mut browser, handler) = launch_headless_browser(chrome_executable).await?;

        let page = match open_page(&browser, url).await {
            Ok(page) => page,
            Err(e) => {
                shutdown(&mut browser, handler).await;
                return Err(e);
            }
        };

        info!("✅ 无头浏览器已导航到: {}", url);
        Ok(Self {
            browser,
            handler,
            page,
        })
    }
}

impl ElementReader for BrowserSession {
    /// 元素不存在时返回 [`AppError::Resolution`]。
    async fn element_text(&self, selector: &str) -> Result<String> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| AppError::Resolution(format!("页面中找不到元素 {selector}: {e}")))?;

        let text = element
            .inner_text()
            .await
            .map_err(|e| AppError::Resolution(format!("无法读取元素 {selector} 的文本: {e}")))?
            .unwrap_or_default();

        debug!("元素 {} 的文本: {:?}", selector, text);
        Ok(text)
    }

    /// 关闭浏览器进程
    async fn close(mut self) {
        shutdown(&mut self.browser, self.handler).await;
    }
}

async fn open_page(browser: &Browser, url: &str) -> Result<Page> {
    let page = browser
        .new_page(url)
        .await
        .map_err(|e| AppError::network(Service::PlayPage, e))?;
    page.wait_for_navigation()
        .await
        .map_err(|e| AppError::network(Service::PlayPage, e))?;
    Ok(page)
}

async fn shutdown(browser: &mut Browser, handler: JoinHandle<()>) {
    if let Err(e) = browser.close().await {
        warn!("关闭浏览器失败: {}", e);
    }
    if let Err(e) = browser.wait().await {
        warn!("等待浏览器退出失败: {}", e);
    }
    handler.abort();
    debug!("浏览器已关闭");
}
