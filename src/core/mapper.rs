use crate::domain::model::{OrderRow, OrderSummary, Page, Property, RichTextSpan};
use chrono::SecondsFormat;
use std::collections::HashMap;

type Properties = HashMap<String, Property>;

/// 文字型欄位（title / rich_text / email）。缺欄或型別不符都回空字串。
pub fn plain_text(props: &Properties, name: &str) -> String {
    match props.get(name) {
        Some(Property::Title { title }) => join_spans(title),
        Some(Property::RichText { rich_text }) => join_spans(rich_text),
        Some(Property::Email { email }) => email.clone().unwrap_or_default(),
        _ => String::new(),
    }
}

fn join_spans(spans: &[RichTextSpan]) -> String {
    spans.iter().map(|span| span.plain_text.as_str()).collect()
}

/// 數字欄位。缺值是 None，不是 0。
pub fn number(props: &Properties, name: &str) -> Option<f64> {
    match props.get(name) {
        Some(Property::Number { number }) => *number,
        _ => None,
    }
}

/// checkbox 輸出文字 true / false，前台靠字串判斷。
pub fn checkbox(props: &Properties, name: &str) -> String {
    match props.get(name) {
        Some(Property::Checkbox { checkbox: true }) => "true".to_string(),
        Some(Property::Checkbox { checkbox: false }) => "false".to_string(),
        _ => String::new(),
    }
}

/// 日期欄位取 start。
pub fn date_start(props: &Properties, name: &str) -> String {
    match props.get(name) {
        Some(Property::Date { date: Some(value) }) => value.start.clone().unwrap_or_default(),
        _ => String::new(),
    }
}

fn first_non_empty(first: String, second: String) -> String {
    if first.is_empty() {
        second
    } else {
        first
    }
}

impl OrderRow {
    pub fn from_page(page: &Page) -> Self {
        let props = &page.properties;

        // 更新日期沒填就退回頁面的最後編輯時間，格式維持 Notion 原樣
        let updated_at = first_non_empty(
            date_start(props, "更新日期"),
            page.last_edited_time
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        );

        OrderRow {
            email: plain_text(props, "信箱"),
            member_id: plain_text(props, "會員編號"),
            line_name: plain_text(props, "LINE名稱"),
            customer_name: plain_text(props, "客人名稱"),
            // 商品名稱在來源資料庫改過名，兩個欄位名都認得
            product_name: first_non_empty(
                plain_text(props, "商品名稱"),
                plain_text(props, "商品"),
            ),
            style: plain_text(props, "款式"),
            quantity: number(props, "數量"),
            status: plain_text(props, "狀態"),
            amount: number(props, "金額"),
            product_url: plain_text(props, "商品網址"),
            note: plain_text(props, "備註"),
            updated_at,
            shipped_at: date_start(props, "出貨日期"),
            weight: number(props, "重量"),
            intl_shipping_fee: number(props, "國際運費"),
            intl_shipping_included: checkbox(props, "含國際運費"),
        }
    }
}

impl OrderSummary {
    pub fn from_page(page: &Page) -> Self {
        let props = &page.properties;

        OrderSummary {
            id: page.id.clone(),
            last_edited_time: page.last_edited_time,
            product_name: first_non_empty(
                plain_text(props, "商品名稱"),
                plain_text(props, "商品"),
            ),
            style: plain_text(props, "款式"),
            quantity: number(props, "數量"),
            status: plain_text(props, "狀態"),
            amount: number(props, "金額"),
        }
    }
}
