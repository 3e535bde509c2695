use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// 依序跑完 extract → transform → load，任何一步失敗就整個中止。
pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("📥 開始從 Notion 抓資料…");
        let pages = self.pipeline.extract().await?;
        tracing::info!("Fetched {} pages", pages.len());

        let document = self.pipeline.transform(pages).await?;
        tracing::info!(
            "Rendered {} ({} records)",
            document.file_name,
            document.record_count
        );

        let output_path = self.pipeline.load(document).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
