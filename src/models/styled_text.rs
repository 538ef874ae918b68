//! 富文本（纯文本片段 + 链接片段）

/// 富文本片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextRun {
    Plain(String),
    Link { text: String, uri: String },
}

/// 链接在完整文本中的位置（UTF-8 字节偏移）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    pub byte_start: usize,
    pub byte_end: usize,
    pub uri: String,
}

/// 由若干片段组成的帖子正文
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    runs: Vec<TextRun>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加纯文本
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.runs.push(TextRun::Plain(text.into()));
        self
    }

    /// 追加链接
    pub fn link(mut self, text: impl Into<String>, uri: impl Into<String>) -> Self {
        self.runs.push(TextRun::Link {
            text: text.into(),
            uri: uri.into(),
        });
        self
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// 拼接后的纯文本
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .map(|run| match run {
                TextRun::Plain(text) | TextRun::Link { text, .. } => text.as_str(),
            })
            .collect()
    }

    /// 所有链接的字节区间
    pub fn links(&self) -> Vec<LinkSpan> {
        let mut offset = 0;
        let mut spans = Vec::new();
        for run in &self.runs {
            match run {
                TextRun::Plain(text) => offset += text.len(),
                TextRun::Link { text, uri } => {
                    spans.push(LinkSpan {
                        byte_start: offset,
                        byte_end: offset + text.len(),
                        uri: uri.clone(),
                    });
                    offset += text.len();
                }
            }
        }
        spans
    }
}
