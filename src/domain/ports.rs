use crate::domain::model::{ExportDocument, Page};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn secret(&self) -> &str;
    fn database_id(&self) -> &str;
    fn api_base_url(&self) -> &str;
    fn page_size(&self) -> u32;
    fn output_path(&self) -> &str;

    /// 資料庫查詢端點。base URL 可覆寫，測試才能指向 mock server。
    fn query_endpoint(&self) -> String {
        format!(
            "{}/v1/databases/{}/query",
            self.api_base_url().trim_end_matches('/'),
            self.database_id()
        )
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Page>>;
    async fn transform(&self, pages: Vec<Page>) -> Result<ExportDocument>;
    async fn load(&self, document: ExportDocument) -> Result<String>;
}
