use thiserror::Error;

/// 远端服务
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// GitHub 题库仓库
    Github,
    /// Bluesky (AT Protocol)
    Bluesky,
    /// arcprize.org 每日题目页面
    PlayPage,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::Github => write!(f, "GitHub"),
            Service::Bluesky => write!(f, "Bluesky"),
            Service::PlayPage => write!(f, "arcprize.org"),
        }
    }
}

/// 应用程序错误类型
///
/// 所有错误都不在内部捕获或重试，直接向上传播并终止本次运行。
#[derive(Debug, Error)]
pub enum AppError {
    /// 网格数据格式错误（越界值、空数组、行长不一致等）
    #[error(transparent)]
    Format(#[from] FormatError),

    /// 所有候选数据集中都找不到该题目
    #[error("题目 {puzzle_id} 在数据集 [{}] 中均不存在", .datasets.join(", "))]
    NotFound {
        puzzle_id: String,
        datasets: Vec<String>,
    },

    /// 要求显示答案，但题目的测试用例没有 output
    #[error("题目 {puzzle_id} 没有测试答案，不能使用 --show_answer")]
    MissingAnswer { puzzle_id: String },

    /// 每日题目页面结构不符合预期
    #[error("无法解析今日题目: {0}")]
    Resolution(String),

    /// 认证失败
    #[error("{service} 认证失败: {message}")]
    Auth { service: Service, message: String },

    /// 传输层失败
    #[error("{service} 网络请求失败: {source}")]
    Network {
        service: Service,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 远端返回了非预期的状态码
    #[error("{service} 返回错误响应 (HTTP {status}): {message}")]
    Remote {
        service: Service,
        status: u16,
        message: String,
    },

    /// 数据集 ID 列表为空或不存在
    #[error("数据集 {dataset} 没有可用的题目 ID")]
    EmptyDataset { dataset: String },

    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 图片编码失败
    #[error("图片编码失败: {0}")]
    Image(String),

    /// 文件读写失败
    #[error("文件操作失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 网格数据格式错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// 网格没有任何行或列
    #[error("{context}: 网格为空")]
    EmptyGrid { context: String },

    /// 行长度不一致
    #[error("{context}: 第 {row} 行长度为 {found}，期望 {expected}")]
    RaggedRow {
        context: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// 单元格取值不在 [0, 9]
    #[error("{context}: 单元格 ({row}, {col}) 的值 {value} 不在 [0, 9] 范围内")]
    ValueOutOfRange {
        context: String,
        row: usize,
        col: usize,
        value: i64,
    },

    /// 题目 JSON 结构错误
    #[error("题目 {puzzle_id} 的 JSON 结构错误: {message}")]
    InvalidJson { puzzle_id: String, message: String },

    /// 训练样例列表为空
    #[error("题目 {puzzle_id} 没有训练样例")]
    NoTrainingExamples { puzzle_id: String },

    /// 没有测试用例
    #[error("题目 {puzzle_id} 没有测试用例")]
    NoTestCase { puzzle_id: String },

    /// 网格大于面板，单元格不足 1 像素
    #[error("{context}: 网格 {width}x{height} 超出面板上限 {max}x{max}")]
    GridTooLarge {
        context: String,
        width: usize,
        height: usize,
        max: usize,
    },
}

impl FormatError {
    /// 为错误附加位置描述（例如 `train[2].output`）
    pub fn with_context(self, outer: &str) -> Self {
        let prefix = |inner: String| {
            if inner.is_empty() {
                outer.to_string()
            } else {
                format!("{outer}.{inner}")
            }
        };
        match self {
            FormatError::EmptyGrid { context } => FormatError::EmptyGrid {
                context: prefix(context),
            },
            FormatError::RaggedRow {
                context,
                row,
                expected,
                found,
            } => FormatError::RaggedRow {
                context: prefix(context),
                row,
                expected,
                found,
            },
            FormatError::ValueOutOfRange {
                context,
                row,
                col,
                value,
            } => FormatError::ValueOutOfRange {
                context: prefix(context),
                row,
                col,
                value,
            },
            FormatError::GridTooLarge {
                context,
                width,
                height,
                max,
            } => FormatError::GridTooLarge {
                context: prefix(context),
                width,
                height,
                max,
            },
            other => other,
        }
    }
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 必需的凭据缺失
    #[error("缺少 {what}：请使用 {flag} 或设置环境变量 {env_var}")]
    MissingCredential {
        what: &'static str,
        flag: &'static str,
        env_var: &'static str,
    },

    /// 仓库名称格式错误
    #[error("仓库名称 {0} 格式错误，应为 owner/name")]
    InvalidRepo(String),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建网络错误
    pub fn network(service: Service, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Network {
            service,
            source: Box::new(source),
        }
    }

    /// 创建文件错误
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_context_nesting() {
        let err = FormatError::ValueOutOfRange {
            context: String::new(),
            row: 1,
            col: 2,
            value: 12,
        }
        .with_context("output")
        .with_context("train[3]");

        assert_eq!(
            err.to_string(),
            "train[3].output: 单元格 (1, 2) 的值 12 不在 [0, 9] 范围内"
        );
    }

    #[test]
    fn test_not_found_lists_datasets() {
        let err = AppError::NotFound {
            puzzle_id: "abc".to_string(),
            datasets: vec!["evaluation".to_string(), "training".to_string()],
        };
        assert!(err.to_string().contains("[evaluation, training]"));
    }
}
