use clap::Parser;
use notion_export::utils::{logger, validation::Validate};
use notion_export::{CliArgs, CsvExportPipeline, ExportConfig, ExportEngine, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);

    // 機密只從環境變數來，缺了就不碰網路直接收工
    let config = match ExportConfig::from_env(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ 缺少 NOTION_SECRET 或 NOTION_DATABASE_ID 環境變數");
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = CsvExportPipeline::new(storage, config);
    let engine = ExportEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ 匯出完成");
            println!("✅ 已寫入 {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ 發生錯誤：{}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
