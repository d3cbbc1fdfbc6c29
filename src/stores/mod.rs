//! Per-entity operations on the backend.
//!
//! Each store is a trait so views and workflows can run against the real
//! [`GatewayClient`](crate::api::GatewayClient) or any other implementation.
//! Every operation returns a typed error; none of them fall back to an empty
//! collection.

mod auth;
mod categories;
mod dashboard;
mod parts;
mod sales;
mod stock;
mod suppliers;

pub use auth::AuthStore;
pub use categories::CategoryStore;
pub use dashboard::DashboardStore;
pub use parts::PartStore;
pub use sales::SaleStore;
pub use stock::StockStore;
pub use suppliers::SupplierStore;

/// Everything the dashboard needs from the backend.
pub trait InventoryBackend:
    AuthStore + PartStore + CategoryStore + SupplierStore + SaleStore + StockStore + DashboardStore
{
}

impl<T> InventoryBackend for T where
    T: AuthStore
        + PartStore
        + CategoryStore
        + SupplierStore
        + SaleStore
        + StockStore
        + DashboardStore
{
}
