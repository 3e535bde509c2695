use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Notion 資料庫查詢的請求本體。第一頁不帶 start_cursor。
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

/// 查詢回應：一頁結果加上翻頁資訊。
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<Page>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// 一筆 Notion 頁面（資料庫的一列）。
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    pub last_edited_time: DateTime<Utc>,
    #[serde(default)]
    pub properties: HashMap<String, Property>,
}

/// 單一文字片段，只保留 plain_text。
#[derive(Debug, Clone, Deserialize)]
pub struct RichTextSpan {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,
}

/// 匯出會讀取的屬性型別。其他型別一律落在 Unsupported，不會讓整列失敗。
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Property {
    Title {
        #[serde(default)]
        title: Vec<RichTextSpan>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichTextSpan>,
    },
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Checkbox {
        #[serde(default)]
        checkbox: bool,
    },
    Date {
        #[serde(default)]
        date: Option<DateValue>,
    },
    Email {
        #[serde(default)]
        email: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

/// fishorder.csv 的欄位順序，必須跟前台常數一致。
pub const CSV_HEADERS: [&str; 16] = [
    "信箱",
    "會員編號",
    "LINE名稱",
    "客人名稱",
    "商品名稱",
    "款式",
    "數量",
    "狀態",
    "金額",
    "商品網址",
    "備註",
    "更新日期",
    "出貨日期",
    "重量",
    "國際運費",
    "含國際運費",
];

/// 變體 A：訂單列，16 個欄位攤平後的結果。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderRow {
    pub email: String,
    pub member_id: String,
    pub line_name: String,
    pub customer_name: String,
    pub product_name: String,
    pub style: String,
    pub quantity: Option<f64>,
    pub status: String,
    pub amount: Option<f64>,
    pub product_url: String,
    pub note: String,
    pub updated_at: String,
    pub shipped_at: String,
    pub weight: Option<f64>,
    pub intl_shipping_fee: Option<f64>,
    pub intl_shipping_included: String,
}

impl OrderRow {
    /// 依 CSV_HEADERS 的順序輸出所有欄位值。
    pub fn csv_record(&self) -> [String; 16] {
        [
            self.email.clone(),
            self.member_id.clone(),
            self.line_name.clone(),
            self.customer_name.clone(),
            self.product_name.clone(),
            self.style.clone(),
            format_number(self.quantity),
            self.status.clone(),
            format_number(self.amount),
            self.product_url.clone(),
            self.note.clone(),
            self.updated_at.clone(),
            self.shipped_at.clone(),
            format_number(self.weight),
            format_number(self.intl_shipping_fee),
            self.intl_shipping_included.clone(),
        ]
    }
}

/// 變體 B：給前台輪詢的訂單摘要。鍵值順序即欄位宣告順序。
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub id: String,
    pub last_edited_time: DateTime<Utc>,
    #[serde(rename = "商品名稱")]
    pub product_name: String,
    #[serde(rename = "款式")]
    pub style: String,
    #[serde(rename = "數量")]
    pub quantity: Option<f64>,
    #[serde(rename = "狀態")]
    pub status: String,
    #[serde(rename = "金額")]
    pub amount: Option<f64>,
}

/// 轉換完成、尚未落地的輸出文件。
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub file_name: String,
    pub content: String,
    pub record_count: usize,
}

/// 缺值輸出空字串而不是 0；整數值不帶小數點。
fn format_number(value: Option<f64>) -> String {
    match value {
        None => String::new(),
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        Some(v) => v.to_string(),
    }
}
