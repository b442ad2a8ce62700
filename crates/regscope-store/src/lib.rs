//! Data access: store configuration, the Supabase fetcher, and the
//! fetch-then-validate retrieval pipeline.

mod config;
mod error;
mod source;
pub mod supabase;

pub use config::{DEFAULT_TABLE, DEFAULT_TIMEOUT, StoreConfig};
pub use error::StoreError;
pub use source::{BillSource, StaticSource, Unconfigured, retrieve};
pub use supabase::SupabaseClient;
