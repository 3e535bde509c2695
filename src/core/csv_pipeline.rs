use crate::core::client::NotionClient;
use crate::domain::model::{ExportDocument, OrderRow, Page, CSV_HEADERS};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::{ExportError, Result};

/// 前台讀的就是這個檔名，改了要一起改前台常數。
pub const CSV_FILE_NAME: &str = "fishorder.csv";

/// 變體 A：把整個訂單資料庫攤平成 fishorder.csv。
pub struct CsvExportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: NotionClient,
}

impl<S: Storage, C: ConfigProvider> CsvExportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: NotionClient::new(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CsvExportPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Page>> {
        self.client.fetch_all(&self.config).await
    }

    async fn transform(&self, pages: Vec<Page>) -> Result<ExportDocument> {
        let rows: Vec<OrderRow> = pages.iter().map(OrderRow::from_page).collect();

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADERS)?;
        for row in &rows {
            writer.write_record(row.csv_record())?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::ProcessingError {
                message: format!("CSV writer finalization failed: {}", e),
            })?;
        let content = String::from_utf8(bytes).map_err(|e| ExportError::ProcessingError {
            message: format!("CSV output is not valid UTF-8: {}", e),
        })?;

        Ok(ExportDocument {
            file_name: CSV_FILE_NAME.to_string(),
            record_count: rows.len(),
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
    use httpmock::prelude::*;
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

        async fn is_empty(&self) -> bool {
            self.files.lock().await.is_empty()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_base_url: String,
    }

    impl MockConfig {
        fn new(api_base_url: String) -> Self {
            Self { api_base_url }
        }
    }

    impl ConfigProvider for MockConfig {
        fn secret(&self) -> &str {
            "test-secret"
        }

        fn database_id(&self) -> &str {
            "db-test"
        }

        fn api_base_url(&self) -> &str {
            &self.api_base_url
        }

        fn page_size(&self) -> u32 {
            100
        }

        fn output_path(&self) -> &str {
            "test_output"
        }
    }

    fn page(props: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "object": "page",
            "id": "p1",
            "last_edited_time": "2024-03-01T08:30:00.000Z",
            "properties": props
        })
    }

    fn parse_pages(pages: Vec<serde_json::Value>) -> Vec<Page> {
        pages
            .into_iter()
            .map(|p| serde_json::from_value(p).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn transform_emits_fixed_header_for_empty_input() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.test".to_string());
        let pipeline = CsvExportPipeline::new(storage, config);

        let document = pipeline.transform(Vec::new()).await.unwrap();

        assert_eq!(document.record_count, 0);
        assert_eq!(
            document.content.trim_end(),
            "信箱,會員編號,LINE名稱,客人名稱,商品名稱,款式,數量,狀態,金額,商品網址,備註,更新日期,出貨日期,重量,國際運費,含國際運費"
        );
    }

    #[tokio::test]
    async fn transform_quotes_cells_with_commas_and_quotes() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.test".to_string());
        let pipeline = CsvExportPipeline::new(storage, config);

        let pages = parse_pages(vec![page(serde_json::json!({
            "備註": {
                "type": "rich_text",
                "rich_text": [{"plain_text": "He said, \"hi\""}]
            }
        }))]);

        let document = pipeline.transform(pages).await.unwrap();

        assert!(document.content.contains("\"He said, \"\"hi\"\"\""));
    }

    #[tokio::test]
    async fn transform_renders_absent_values_as_empty_cells() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.test".to_string());
        let pipeline = CsvExportPipeline::new(storage, config);

        let pages = parse_pages(vec![page(serde_json::json!({
            "數量": {"type": "number", "number": 3},
            "含國際運費": {"type": "checkbox", "checkbox": false}
        }))]);

        let document = pipeline.transform(pages).await.unwrap();
        let data_line = document.content.lines().nth(1).unwrap();

        // 更新日期退回 last_edited_time，其餘缺值都是空欄
        assert_eq!(
            data_line,
            ",,,,,,3,,,,,2024-03-01T08:30:00.000Z,,,,false"
        );
    }

    #[tokio::test]
    async fn full_pipeline_writes_csv_to_storage() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/databases/db-test/query")
                .json_body(serde_json::json!({"page_size": 100}));
            then.status(200).json_body(serde_json::json!({
                "results": [page(serde_json::json!({
                    "商品名稱": {"type": "title", "title": [{"plain_text": "白蝦"}]},
                    "數量": {"type": "number", "number": 2},
                    "金額": {"type": "number", "number": 450}
                }))],
                "has_more": false,
                "next_cursor": null
            }));
        });

        let storage = MockStorage::new();
        let pipeline = CsvExportPipeline::new(storage.clone(), MockConfig::new(server.base_url()));

        let pages = pipeline.extract().await.unwrap();
        let document = pipeline.transform(pages).await.unwrap();
        let output_path = pipeline.load(document).await.unwrap();

        api_mock.assert();
        assert_eq!(output_path, "test_output/fishorder.csv");

        let written = storage.get_file(CSV_FILE_NAME).await.unwrap();
        let content = String::from_utf8(written).unwrap();
        assert!(content.starts_with("信箱,"));
        assert!(content.contains("白蝦"));
        assert!(content.contains(",2,"));
        assert!(content.contains(",450,"));
    }

    #[tokio::test]
    async fn api_failure_leaves_storage_untouched() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/databases/db-test/query");
            then.status(500).body("internal error");
        });

        let storage = MockStorage::new();
        let pipeline = CsvExportPipeline::new(storage.clone(), MockConfig::new(server.base_url()));

        let err = pipeline.extract().await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, ExportError::ApiStatusError { status: 500, .. }));
        assert!(storage.is_empty().await);
    }
}
