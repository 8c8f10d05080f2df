use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use noto::orchestrator::read_source_text;
use noto::{logger, App, Config};

#[derive(Parser, Debug)]
#[command(name = "noto", about = "AI-powered study companion")]
struct Cli {
    /// TOML 配置文件路径
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Input {
    /// 从文件读取学习材料
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// 直接传入学习材料
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 生成要点式摘要
    Summarize {
        #[command(flatten)]
        input: Input,
        /// 摘要字数上限
        #[arg(short, long)]
        words: Option<u32>,
    },
    /// 生成测验并作答
    Quiz {
        #[command(flatten)]
        input: Input,
    },
    /// 学习问答
    Chat,
    /// 朗读文本
    Speak {
        #[command(flatten)]
        input: Input,
        /// 语速倍率 (0.5 - 2.0)
        #[arg(short, long)]
        rate: Option<f32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(cli.config.as_deref())?;
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logger::init(config.verbose_logging);

    let app = App::initialize(config);

    match cli.command {
        Command::Summarize { input, words } => {
            let text = read_source_text(input.file.as_deref(), input.text, true).await?;
            app.summarize(&text, words).await?;
        }
        Command::Quiz { input } => {
            let text = read_source_text(input.file.as_deref(), input.text, false).await?;
            app.quiz(&text).await?;
        }
        Command::Chat => app.chat().await?,
        Command::Speak { input, rate } => {
            let text = read_source_text(input.file.as_deref(), input.text, true).await?;
            app.speak(&text, rate).await?;
        }
    }

    Ok(())
}
