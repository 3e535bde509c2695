use crate::core::client::NotionClient;
use crate::domain::model::{ExportDocument, OrderSummary, Page};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;

pub const JSON_FILE_NAME: &str = "data/orders.json";

/// 變體 B：訂單摘要的 JSON 陣列，給前台輪詢用。
pub struct JsonExportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: NotionClient,
}

impl<S: Storage, C: ConfigProvider> JsonExportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: NotionClient::new(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for JsonExportPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Page>> {
        self.client.fetch_all(&self.config).await
    }

    async fn transform(&self, pages: Vec<Page>) -> Result<ExportDocument> {
        let summaries: Vec<OrderSummary> = pages.iter().map(OrderSummary::from_page).collect();
        let content = serde_json::to_string_pretty(&summaries)?;

        Ok(ExportDocument {
            file_name: JSON_FILE_NAME.to_string(),
            record_count: summaries.len(),
            content,
        })
    }

    async fn load(&self, document: ExportDocument) -> Result<String> {
        tracing::debug!(
            "Writing {} ({} bytes) to storage",
            document.file_name,
            document.content.len()
        );
        self.storage
            .write_file(&document.file_name, document.content.as_bytes())
            .await?;

        Ok(format!(
            "{}/{}",
            self.config.output_path(),
            document.file_name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig;

    impl ConfigProvider for MockConfig {
        fn secret(&self) -> &str {
            "test-secret"
        }

        fn database_id(&self) -> &str {
            "db-test"
        }

        fn api_base_url(&self) -> &str {
            "http://unused.test"
        }

        fn page_size(&self) -> u32 {
            100
        }

        fn output_path(&self) -> &str {
            "test_output"
        }
    }

    fn pages(values: Vec<serde_json::Value>) -> Vec<Page> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn empty_record_list_serializes_to_empty_array_literal() {
        let pipeline = JsonExportPipeline::new(MockStorage::new(), MockConfig);

        let document = pipeline.transform(Vec::new()).await.unwrap();

        assert_eq!(document.content, "[]");
        assert_eq!(document.record_count, 0);
    }

    #[tokio::test]
    async fn summaries_keep_declaration_key_order() {
        let pipeline = JsonExportPipeline::new(MockStorage::new(), MockConfig);

        let input = pages(vec![serde_json::json!({
            "id": "p1",
            "last_edited_time": "2024-03-01T08:30:00.000Z",
            "properties": {
                "商品名稱": {"type": "title", "title": [{"plain_text": "白蝦"}]},
                "狀態": {"type": "rich_text", "rich_text": [{"plain_text": "已出貨"}]},
                "金額": {"type": "number", "number": 450}
            }
        })]);

        let document = pipeline.transform(input).await.unwrap();

        let id_pos = document.content.find("\"id\"").unwrap();
        let product_pos = document.content.find("\"商品名稱\"").unwrap();
        let amount_pos = document.content.find("\"金額\"").unwrap();
        assert!(id_pos < product_pos && product_pos < amount_pos);

        let parsed: Vec<serde_json::Value> = serde_json::from_str(&document.content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["id"], "p1");
        assert_eq!(parsed[0]["商品名稱"], "白蝦");
        assert_eq!(parsed[0]["狀態"], "已出貨");
        assert_eq!(parsed[0]["金額"], 450.0);
    }

    #[tokio::test]
    async fn load_writes_under_data_subdirectory() {
        let storage = MockStorage::new();
        let pipeline = JsonExportPipeline::new(storage.clone(), MockConfig);

        let document = ExportDocument {
            file_name: JSON_FILE_NAME.to_string(),
            content: "[]".to_string(),
            record_count: 0,
        };

        let output_path = pipeline.load(document).await.unwrap();

        assert_eq!(output_path, "test_output/data/orders.json");
        assert_eq!(storage.get_file(JSON_FILE_NAME).await.unwrap(), b"[]");
    }
}
