//! 终端视觉小说播放器
//!
//! ```text
//! host-cli [SCENES] [--config config.json] [--start introduction] [--json]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use host_cli::{App, AppConfig, FsSceneSource, PlayerCommand, draw_stage, parse_command};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Level, error, warn};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "host-cli", about = "在终端中游玩分支对话式视觉小说")]
struct Cli {
    /// 场景数据文件（覆盖配置文件中的 scenes_path）
    scenes: Option<PathBuf>,

    /// 配置文件路径
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// 起始场景 ID
    #[arg(long)]
    start: Option<String>,

    /// 以 JSON 行输出舞台状态
    #[arg(long)]
    json: bool,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "无法创建异步运行时");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = runtime.block_on(real_main(cli)) {
        error!("{e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

async fn real_main(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(&cli.config);
    if let Some(scenes) = cli.scenes {
        config.scenes_path = scenes;
    }
    if let Some(start) = cli.start {
        config.start_scene_id = start;
    }
    if cli.json {
        config.output.json = true;
    }
    config.validate()?;

    let source = FsSceneSource::new(&config.scenes_path);
    let mut app = App::new(config, source);

    if let Err(e) = app.boot().await {
        // 不重试，保持错误画面直到玩家退出
        error!(error = %e, "场景数据加载失败");
    }
    draw(&app)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Some(PlayerCommand::Quit) => break,
            Some(PlayerCommand::Story(input)) => {
                app.handle(input);
                draw(&app)?;
            }
            None => warn!(input = %line, "无法识别的指令"),
        }
    }

    Ok(())
}

fn draw(app: &App<FsSceneSource>) -> anyhow::Result<()> {
    if app.config().output.json {
        println!("{}", serde_json::to_string(app.stage())?);
    } else {
        println!("{}", draw_stage(app.stage()));
    }
    Ok(())
}
