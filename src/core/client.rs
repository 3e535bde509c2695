use crate::domain::model::{Page, QueryRequest, QueryResponse};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ExportError, Result};
use reqwest::Client;

/// Notion API 版本是固定的，升版要跟著屬性結構一起驗過。
pub const NOTION_VERSION: &str = "2022-06-28";

pub struct NotionClient {
    http: Client,
}

impl NotionClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// 取回資料庫裡的所有頁面，依伺服器回傳順序累積。
    ///
    /// 翻頁必須序列執行：下一個請求要帶上一個回應的 next_cursor。
    /// 任何非 2xx 回應都是致命錯誤，整次匯出直接中止。
    pub async fn fetch_all(&self, config: &impl ConfigProvider) -> Result<Vec<Page>> {
        let endpoint = config.query_endpoint();
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let body = QueryRequest {
                page_size: config.page_size(),
                start_cursor: cursor.clone(),
            };

            tracing::debug!("Querying {} (cursor: {:?})", endpoint, cursor);
            let response = self
                .http
                .post(&endpoint)
                .bearer_auth(config.secret())
                .header("Notion-Version", NOTION_VERSION)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                tracing::error!("Notion API error: {} {}", status, body);
                return Err(ExportError::ApiStatusError {
                    status: status.as_u16(),
                    body,
                });
            }

            let data: QueryResponse = response.json().await?;
            tracing::debug!("Received {} results, has_more={}", data.results.len(), data.has_more);
            pages.extend(data.results);

            if !data.has_more {
                break;
            }
            cursor = data.next_cursor;
        }

        Ok(pages)
    }
}

impl Default for NotionClient {
    fn default() -> Self {
        Self::new()
    }
}
