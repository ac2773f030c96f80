pub mod domain;
pub mod handlers;
pub mod shared;
pub mod system;
pub mod usecases;

use clap::{Parser, Subcommand};
use contracts::usecases::common::UseCaseError;
use std::path::PathBuf;

use system::initialization::AppContext;

/// Импорт товарных таблиц и выгрузка по шаблонам мерчантов
#[derive(Parser)]
#[command(name = "product-sheets", version)]
struct Cli {
    /// config.toml (по умолчанию рядом с исполняемым файлом)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Подробные логи (debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Определить формат таблицы по заголовку
    Classify { file: PathBuf },

    /// Разобрать таблицу (предпросмотр) или сохранить записи (--commit)
    Import {
        file: PathBuf,
        #[arg(long)]
        commit: bool,
        #[arg(long, default_value_t = 1)]
        merchant: i64,
    },

    /// Загрузить шаблон мерчанта
    RegisterTemplate {
        file: PathBuf,
        #[arg(long, default_value_t = 1)]
        merchant: i64,
    },

    /// Есть ли у мерчанта шаблон
    TemplateStatus {
        #[arg(long, default_value_t = 1)]
        merchant: i64,
    },

    /// Структура шаблона: из файла или последнего загруженного
    TemplatePreview {
        file: Option<PathBuf>,
        #[arg(long, default_value_t = 1)]
        merchant: i64,
    },

    /// Заполнить последний шаблон мерчанта записями
    Generate {
        #[arg(long, default_value_t = 1)]
        merchant: i64,
        /// JSON-массив записей; без него берутся сохранённые записи мерчанта
        #[arg(long, value_name = "FILE")]
        records: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Пустой шаблон: стандартный импортный или по схеме партнёра (--schema)
    BlankTemplate {
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        #[arg(long)]
        schema: bool,
        #[arg(long, value_name = "FILE", requires = "schema")]
        records: Option<PathBuf>,
    },
}

async fn run(cli: Cli) -> anyhow::Result<serde_json::Value> {
    use handlers::{u501_import_products as u501, u502_generate_from_template as u502};

    let config = shared::config::load_config(cli.config.as_deref())?;
    let context = AppContext::initialize(config)?;

    match cli.command {
        Command::Classify { file } => u501::classify_file(&file),
        Command::Import {
            file,
            commit,
            merchant,
        } => u501::import_file(&context, &file, merchant, commit).await,
        Command::RegisterTemplate { file, merchant } => {
            u502::register_template(&context, &file, merchant).await
        }
        Command::TemplateStatus { merchant } => u502::template_status(&context, merchant).await,
        Command::TemplatePreview { file, merchant } => {
            u502::template_preview(&context, file.as_deref(), merchant).await
        }
        Command::Generate {
            merchant,
            records,
            out,
        } => u502::generate(&context, merchant, records.as_deref(), out.as_deref()).await,
        Command::BlankTemplate {
            out,
            schema,
            records,
        } => u502::blank_template(&out, schema, records.as_deref()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    system::tracing::initialize(cli.verbose)?;

    match run(cli).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(err) => {
            let error = match err.downcast::<UseCaseError>() {
                Ok(use_case) => use_case,
                Err(other) => UseCaseError::internal(format!("{:#}", other)),
            };
            tracing::error!("{}", error);
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "error": error }))?);
            std::process::exit(1);
        }
    }
}
