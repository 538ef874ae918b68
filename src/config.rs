use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::ConfigError;
use crate::models::{Dataset, PuzzleRequest};

/// 命令行可选的数据集
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DatasetArg {
    #[default]
    Evaluation,
    Test,
}

impl From<DatasetArg> for Dataset {
    fn from(arg: DatasetArg) -> Self {
        match arg {
            DatasetArg::Evaluation => Dataset::Evaluation,
            DatasetArg::Test => Dataset::Test,
        }
    }
}

/// 每日 ARC-AGI 题目发布流程
#[derive(Parser, Debug)]
#[command(name = "arc_daily_bsky", about = "Daily Bluesky ARC-AGI Pipeline", version)]
pub struct Args {
    /// GitHub token for authentication
    #[arg(long = "github_token", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Bluesky handle for authentication
    #[arg(long = "bsky_handle", env = "BSKY_HANDLE")]
    pub bsky_handle: Option<String>,

    /// Bluesky password for authentication
    #[arg(long = "bsky_pwd", env = "BSKY_PASSWORD", hide_env_values = true)]
    pub bsky_pwd: Option<String>,

    /// Puzzle ID to post, or 'today' or 'random'
    #[arg(long = "puzzle_id", default_value = "today")]
    pub puzzle_id: String,

    /// Save the puzzle image
    #[arg(long)]
    pub save: bool,

    /// Show the puzzle image
    #[arg(long)]
    pub show: bool,

    /// Show the answer in the puzzle image
    #[arg(long = "show_answer")]
    pub show_answer: bool,

    /// Dataset to use for puzzles
    #[arg(long, value_enum, default_value = "evaluation")]
    pub dataset: DatasetArg,

    /// Render the puzzle without posting it
    #[arg(long = "dry_run")]
    pub dry_run: bool,
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- 凭据 ---
    pub github_token: Option<String>,
    pub bsky_handle: Option<String>,
    pub bsky_password: Option<String>,
    // --- 本次运行 ---
    /// 题目选择方式
    pub puzzle: PuzzleRequest,
    /// `random` 与指定 ID 时使用的数据集
    pub dataset: Dataset,
    /// 保存图片到 `output_dir`
    pub save: bool,
    /// 用系统查看器打开图片
    pub show: bool,
    /// 图片中包含测试答案
    pub show_answer: bool,
    /// 只渲染，不发布
    pub dry_run: bool,
    // --- 环境配置 ---
    /// 题库仓库（owner/name）
    pub puzzle_repo: String,
    pub github_api_base_url: String,
    /// 每日题目页面
    pub play_url: String,
    pub bsky_service_url: String,
    /// 浏览器可执行文件，未设置时自动查找
    pub chrome_executable: Option<PathBuf>,
    /// `--save` 的输出目录
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            bsky_handle: None,
            bsky_password: None,
            puzzle: PuzzleRequest::Today,
            dataset: Dataset::Evaluation,
            save: false,
            show: false,
            show_answer: false,
            dry_run: false,
            puzzle_repo: "arcprize/ARC-AGI-2".to_string(),
            github_api_base_url: "https://api.github.com".to_string(),
            play_url: "https://arcprize.org/play".to_string(),
            bsky_service_url: "https://bsky.social".to_string(),
            chrome_executable: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// 只从环境变量读取非命令行配置
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            puzzle_repo: std::env::var("ARC_REPO").unwrap_or(default.puzzle_repo),
            github_api_base_url: std::env::var("GITHUB_API_URL").unwrap_or(default.github_api_base_url),
            play_url: std::env::var("ARC_PLAY_URL").unwrap_or(default.play_url),
            bsky_service_url: std::env::var("BSKY_SERVICE").unwrap_or(default.bsky_service_url),
            chrome_executable: std::env::var("CHROME_PATH").ok().map(PathBuf::from).or(default.chrome_executable),
            output_dir: std::env::var("OUTPUT_DIR").map(PathBuf::from).unwrap_or(default.output_dir),
            ..default
        }
    }

    /// 合并命令行参数与环境变量
    ///
    /// 凭据的环境变量回退由 clap 处理。
    pub fn from_args(args: Args) -> Self {
        Self {
            github_token: args.github_token.filter(|s| !s.is_empty()),
            bsky_handle: args.bsky_handle.filter(|s| !s.is_empty()),
            bsky_password: args.bsky_pwd.filter(|s| !s.is_empty()),
            puzzle: PuzzleRequest::parse(&args.puzzle_id),
            dataset: args.dataset.into(),
            save: args.save,
            show: args.show,
            show_answer: args.show_answer,
            dry_run: args.dry_run,
            ..Self::from_env()
        }
    }

    /// 检查配置是否完整
    ///
    /// 发布时必须有 Bluesky 账号和密码；dry run 不需要。
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut parts = self.puzzle_repo.split('/');
        let valid_repo = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty()
        );
        if !valid_repo {
            return Err(ConfigError::InvalidRepo(self.puzzle_repo.clone()));
        }

        if !self.dry_run {
            self.bsky_credentials()?;
        }
        Ok(())
    }

    /// Bluesky 账号与密码
    pub fn bsky_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let handle = self
            .bsky_handle
            .as_deref()
            .ok_or(ConfigError::MissingCredential {
                what: "Bluesky 账号",
                flag: "--bsky_handle",
                env_var: "BSKY_HANDLE",
            })?;
        let password = self
            .bsky_password
            .as_deref()
            .ok_or(ConfigError::MissingCredential {
                what: "Bluesky 密码",
                flag: "--bsky_pwd",
                env_var: "BSKY_PASSWORD",
            })?;
        Ok((handle, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("arc_daily_bsky").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--bsky_handle", "me.bsky.social", "--bsky_pwd", "pw"]);
        assert_eq!(args.puzzle_id, "today");
        assert_eq!(args.dataset, DatasetArg::Evaluation);
        assert!(!args.save && !args.show && !args.show_answer && !args.dry_run);

        let config = Config::from_args(args);
        assert_eq!(config.puzzle, PuzzleRequest::Today);
        assert_eq!(config.dataset, Dataset::Evaluation);
    }

    #[test]
    fn test_underscore_flags() {
        let args = parse(&[
            "--puzzle_id",
            "random",
            "--dataset",
            "test",
            "--show_answer",
            "--save",
            "--show",
            "--dry_run",
            "--github_token",
            "ghp_x",
        ]);
        let config = Config::from_args(args);
        assert_eq!(config.puzzle, PuzzleRequest::Random);
        assert_eq!(config.dataset, Dataset::Test);
        assert!(config.save && config.show && config.show_answer && config.dry_run);
        assert_eq!(config.github_token.as_deref(), Some("ghp_x"));
    }

    #[test]
    fn test_rejects_unknown_dataset() {
        let result = Args::try_parse_from(["arc_daily_bsky", "--dataset", "training"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_requires_bsky_credentials() {
        let config = Config {
            bsky_handle: Some("me.bsky.social".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingCredential {
                env_var: "BSKY_PASSWORD",
                ..
            })
        ));

        let dry = Config {
            dry_run: true,
            ..Config::default()
        };
        assert!(dry.validate().is_ok());
    }

    #[test]
    fn test_validate_repo_format() {
        let config = Config {
            dry_run: true,
            puzzle_repo: "not-a-repo".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRepo(_))));
    }
}
