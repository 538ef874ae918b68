//! 发布服务 - 业务能力层
//!
//! 登录 Bluesky，上传图片，再创建带图片和链接的帖子

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use tracing::info;

use crate::clients::BskyClient;
use crate::config::Config;
use crate::error::Result;
use crate::models::{LinkSpan, StyledText};
use crate::render::RenderedImage;

const POST_COLLECTION: &str = "app.bsky.feed.post";
const IMAGE_MIME_TYPE: &str = "image/png";

/// 发布结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResult {
    pub uri: String,
    pub cid: String,
}

/// 帖子发布
#[allow(async_fn_in_trait)]
pub trait Publisher {
    async fn publish(
        &self,
        image: &RenderedImage,
        alt_text: &str,
        body: &StyledText,
    ) -> Result<PostResult>;
}

/// 发布到 Bluesky
pub struct BskyPublisher {
    client: BskyClient,
    handle: String,
    password: String,
}

impl BskyPublisher {
    pub fn new(client: BskyClient, handle: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            client,
            handle: handle.into(),
            password: password.into(),
        }
    }

    /// 用配置中的服务地址与凭据创建
    pub fn from_config(config: &Config) -> Result<Self> {
        let (handle, password) = config.bsky_credentials()?;
        Ok(Self::new(BskyClient::new(config)?, handle, password))
    }
}

impl Publisher for BskyPublisher {
    async fn publish(
        &self,
        image: &RenderedImage,
        alt_text: &str,
        body: &StyledText,
    ) -> Result<PostResult> {
        let session = self.client.create_session(&self.handle, &self.password).await?;
        info!("🔑 已登录 Bluesky: {}", session.handle);

        let blob = self
            .client
            .upload_blob(&session, image.bytes.clone(), IMAGE_MIME_TYPE)
            .await?;
        info!("📤 图片已上传 ({} 字节)", image.bytes.len());

        let record = build_post_record(
            &body.plain_text(),
            &body.links(),
            blob,
            alt_text,
            (image.width, image.height),
            Utc::now(),
        );
        let created = self.client.create_record(&session, POST_COLLECTION, record).await?;
        info!("📮 帖子已发布: {}", created.uri);

        Ok(PostResult {
            uri: created.uri,
            cid: created.cid,
        })
    }
}

/// 组装 `app.bsky.feed.post` 记录
pub fn build_post_record(
    text: &str,
    links: &[LinkSpan],
    blob: Value,
    alt_text: &str,
    (width, height): (u32, u32),
    created_at: DateTime<Utc>,
) -> Value {
    let mut record = json!({
        "$type": POST_COLLECTION,
        "text": text,
        "createdAt": created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        "embed": {
            "$type": "app.bsky.embed.images",
            "images": [{
                "alt": alt_text,
                "image": blob,
                "aspectRatio": { "width": width, "height": height },
            }],
        },
    });

    if !links.is_empty() {
        let facets: Vec<Value> = links
            .iter()
            .map(|link| {
                json!({
                    "index": { "byteStart": link.byte_start, "byteEnd": link.byte_end },
                    "features": [{
                        "$type": "app.bsky.richtext.facet#link",
                        "uri": link.uri,
                    }],
                })
            })
            .collect();
        record["facets"] = Value::Array(facets);
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn blob() -> Value {
        json!({
            "$type": "blob",
            "ref": { "$link": "bafkreiexample" },
            "mimeType": "image/png",
            "size": 1234,
        })
    }

    #[test]
    fn test_record_with_link() {
        let body = StyledText::new()
            .text("🤖 Daily ARC-AGI puzzle !\n\nTest your solution ")
            .link("here", "https://arcprize.org/play");
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

        let record = build_post_record(
            &body.plain_text(),
            &body.links(),
            blob(),
            "Puzzle abc of ARC-AGI 2",
            (1244, 692),
            created_at,
        );

        assert_eq!(record["$type"], "app.bsky.feed.post");
        assert_eq!(record["createdAt"], "2025-03-01T12:00:00.000Z");
        assert_eq!(record["embed"]["images"][0]["alt"], "Puzzle abc of ARC-AGI 2");
        assert_eq!(record["embed"]["images"][0]["image"], blob());
        assert_eq!(record["embed"]["images"][0]["aspectRatio"]["width"], 1244);
        assert_eq!(record["embed"]["images"][0]["aspectRatio"]["height"], 692);

        let facet = &record["facets"][0];
        let start = facet["index"]["byteStart"].as_u64().unwrap() as usize;
        let end = facet["index"]["byteEnd"].as_u64().unwrap() as usize;
        let text = record["text"].as_str().unwrap();
        assert_eq!(&text[start..end], "here");
        assert_eq!(facet["features"][0]["$type"], "app.bsky.richtext.facet#link");
        assert_eq!(facet["features"][0]["uri"], "https://arcprize.org/play");
    }

    #[test]
    fn test_record_without_link_has_no_facets() {
        let record = build_post_record("Puzzle: abc", &[], blob(), "alt", (10, 10), Utc::now());
        assert!(record.get("facets").is_none());
    }
}
