use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CategoryForm {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SupplierForm {
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub address: String,
}

impl From<&Supplier> for SupplierForm {
    fn from(supplier: &Supplier) -> Self {
        SupplierForm {
            name: supplier.name.clone(),
            contact_person: supplier.contact_person.clone().unwrap_or_default(),
            phone: supplier.phone.clone().unwrap_or_default(),
            address: supplier.address.clone().unwrap_or_default(),
        }
    }
}

/// `{id, name}` summary the backend embeds in a part.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Part {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    #[serde(default)]
    pub supplier_id: Option<i64>,
    pub quantity: i32,
    #[serde(deserialize_with = "decimal")]
    pub price: f64,
    #[serde(default)]
    pub date_acquired: Option<NaiveDate>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<NamedRef>,
    #[serde(default)]
    pub supplier: Option<NamedRef>,
}

impl Part {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

/// Editable fields of a part, as held by the edit modal.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PartForm {
    pub name: String,
    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub quantity: i32,
    pub price: f64,
    pub date_acquired: Option<NaiveDate>,
    pub image_path: Option<String>,
    /// Local file to upload alongside the part.
    #[serde(default)]
    pub image: Option<PathBuf>,
}

impl Default for PartForm {
    fn default() -> Self {
        PartForm {
            name: String::new(),
            category_id: None,
            supplier_id: None,
            quantity: 0,
            price: 0.0,
            date_acquired: None,
            image_path: None,
            image: None,
        }
    }
}

impl From<&Part> for PartForm {
    fn from(part: &Part) -> Self {
        PartForm {
            name: part.name.clone(),
            category_id: Some(part.category_id),
            supplier_id: part.supplier_id,
            quantity: part.quantity,
            price: part.price,
            date_acquired: part.date_acquired,
            image_path: part.image_path.clone(),
            image: None,
        }
    }
}

/// Image bytes already read from disk, ready for the multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Multipart payload for `store-part` / `update-part`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartPayload {
    pub fields: Vec<(&'static str, String)>,
    pub image: Option<ImageUpload>,
}

impl PartPayload {
    /// Payload for a new part: every non-null form field as a text field.
    pub fn from_form(form: &PartForm, image: Option<ImageUpload>) -> Self {
        Self::build(form, image, false)
    }

    /// Payload for an existing part. A cleared supplier or date goes out as
    /// an empty field so the backend nulls it instead of keeping the old one.
    pub fn for_update(form: &PartForm, image: Option<ImageUpload>) -> Self {
        Self::build(form, image, true)
    }

    fn build(form: &PartForm, image: Option<ImageUpload>, send_cleared: bool) -> Self {
        let mut fields = vec![("name", form.name.clone())];
        if let Some(category_id) = form.category_id {
            fields.push(("category_id", category_id.to_string()));
        }
        match form.supplier_id {
            Some(supplier_id) => fields.push(("supplier_id", supplier_id.to_string())),
            None if send_cleared => fields.push(("supplier_id", String::new())),
            None => {}
        }
        fields.push(("quantity", form.quantity.to_string()));
        fields.push(("price", format!("{:.2}", form.price)));
        match form.date_acquired {
            Some(date) => fields.push(("date_acquired", date.format("%Y-%m-%d").to_string())),
            None if send_cleared => fields.push(("date_acquired", String::new())),
            None => {}
        }
        if let Some(path) = &form.image_path {
            fields.push(("image_path", path.clone()));
        }

        PartPayload { fields, image }
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Sale {
    pub id: i64,
    pub part_id: i64,
    #[serde(default)]
    pub part_name: Option<String>,
    pub quantity_sold: i32,
    #[serde(deserialize_with = "decimal")]
    pub price_per_unit: f64,
}

impl Sale {
    pub fn total(&self) -> f64 {
        f64::from(self.quantity_sold) * self.price_per_unit
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SaleForm {
    pub part_id: i64,
    pub quantity_sold: i32,
    pub price_per_unit: f64,
}

impl From<&Sale> for SaleForm {
    fn from(sale: &Sale) -> Self {
        SaleForm {
            part_id: sale.part_id,
            quantity_sold: sale.quantity_sold,
            price_per_unit: sale.price_per_unit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustmentReason {
    #[serde(rename = "newstock")]
    NewStockReceived,
    #[serde(rename = "damaged")]
    DamagedRemoved,
    #[serde(rename = "correction")]
    Correction,
    #[serde(rename = "sold")]
    ManualSale,
    #[serde(rename = "Others")]
    Other,
}

impl AdjustmentReason {
    pub const ALL: [AdjustmentReason; 5] = [
        AdjustmentReason::NewStockReceived,
        AdjustmentReason::DamagedRemoved,
        AdjustmentReason::Correction,
        AdjustmentReason::ManualSale,
        AdjustmentReason::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AdjustmentReason::NewStockReceived => "New stock received",
            AdjustmentReason::DamagedRemoved => "Damaged item removed",
            AdjustmentReason::Correction => "Correction",
            AdjustmentReason::ManualSale => "Sold (manual adjustment)",
            AdjustmentReason::Other => "Others",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StockAdjustment {
    pub part_id: i64,
    pub adjustment: i32,
    pub price: f64,
    pub reason: AdjustmentReason,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DashboardStats {
    pub parts_count: i64,
    pub categories_count: i64,
    pub suppliers_count: i64,
    #[serde(deserialize_with = "decimal")]
    pub total_sales: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

/// Body of a successful mutation. The backend is not consistent about what
/// it returns, so everything is optional and an empty body is accepted.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// `{data: [...]}` envelope used by the parts listing.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Laravel serialises decimal columns as strings; accept both.
fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
