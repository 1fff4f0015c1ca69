use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use config::{Config, ConfigStore, FileStorage, ProviderName, TranslationConfig};
use env_logger::Env;
use fieldname::{Direction, FieldTranslator};
use naming::{LowercaseMode, SnakeCase, SnakeOptions};
use translator::Translator;

#[derive(Parser)]
#[command(name = app::NAME, version = app::VERSION, about = "字段名称翻译与命名转换")]
struct Cli {
    /// 配置文件, 不存在时自动生成
    #[arg(short, long, default_value = "fieldname.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 翻译字段名称
    Translate {
        text: String,
        /// 目标语言: en | zh
        #[arg(long, default_value = "en")]
        to: Direction,
    },
    /// 翻译并给出各种命名风格
    Variants { text: String },
    /// 转为驼峰命名
    Camel { text: String },
    /// 转为下划线命名
    Snake {
        text: String,
        /// 全小写字段的处理方式: keep | split | ask, 默认取配置文件
        #[arg(long)]
        lowercase: Option<LowercaseMode>,
    },
    /// 启用或停用翻译服务
    Provider { name: ProviderName, state: Switch },
    /// 保存百度翻译的 App ID 和 Secret Key
    Baidu { app_id: String, secret_key: String },
    /// 查看翻译服务配置
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()).await {
        println!("{:#^width$}", " Error ", width = *app::LINE_LENGTH);
        eprintln!("{}", format!("{e:#}").red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config).await?;
    let snake = SnakeOptions::new(config.naming.lowercase);
    let store = ConfigStore::new(Arc::new(FileStorage::new(&config.storage.path)));
    let translator = Translator::new(&config.network)?;
    let mut field = FieldTranslator::open(store, translator, snake).await?;

    match cli.command {
        Command::Translate { text, to } => {
            let translation = field.translate_with_provenance(&text, to).await?;
            println!(
                "{} {}",
                translation.text().green(),
                format!("({to}, {})", translation.provenance()).dimmed()
            );
        }
        Command::Variants { text } => {
            for variant in field.suggest_naming_variants(&text).await? {
                println!("{variant}");
            }
        }
        Command::Camel { text } => println!("{}", naming::to_camel_case(&text)),
        Command::Snake { text, lowercase } => {
            let options = lowercase.map(SnakeOptions::new).unwrap_or(snake);
            match naming::snake_case(text.trim(), &options) {
                SnakeCase::Converted(converted) => println!("{converted}"),
                SnakeCase::NeedsDecision(input) => println!(
                    "{}",
                    format!("{input} 是全小写且没有分隔, 请用 --lowercase keep 或 --lowercase split 指定处理方式")
                        .yellow()
                ),
            }
        }
        Command::Provider { name, state } => {
            field
                .toggle_provider(name, matches!(state, Switch::On))
                .await?;
            print_config(field.config());
        }
        Command::Baidu { app_id, secret_key } => {
            field.save_baidu_credentials(&app_id, &secret_key).await?;
            println!("{}", "百度翻译配置已保存".green());
            if !field.config().baidu.enabled {
                println!("使用 `{} provider baidu on` 启用", app::NAME);
            }
        }
        Command::Config => print_config(field.config()),
    }

    Ok(())
}

fn print_config(config: &TranslationConfig) {
    println!("{:=^width$}", " Providers ".yellow(), width = *app::LINE_LENGTH);
    for (name, provider) in config.iter() {
        let state = if provider.enabled {
            "on".green()
        } else {
            "off".red()
        };
        println!("{name:<10}{state}");
        if name == ProviderName::BaiduSigned {
            match &provider.credentials {
                Some(credentials) => println!(
                    "{:<10}app id {}, secret key {}",
                    "",
                    credentials.app_id,
                    "*".repeat(credentials.secret_key.chars().count())
                ),
                None => println!("{:<10}{}", "", "未配置 App ID / Secret Key".dimmed()),
            }
        }
        for endpoint in provider.endpoints.iter() {
            println!("{:<10}{}", "", endpoint.dimmed());
        }
    }
}
