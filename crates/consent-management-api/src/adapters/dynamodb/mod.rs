//! # DynamoDB Adapter
//!
//! - `item` - Attribute model and table layout
//! - `mappers` - Consent and page token conversions
//! - `table` - Table operations port
//! - `memory_table` - In-memory table
//! - `sdk` - AWS SDK table (feature `dynamodb`)
//! - `repository` - Consent repository over any table

pub mod item;
pub mod mappers;
pub mod memory_table;
pub mod repository;
#[cfg(feature = "dynamodb")]
pub mod sdk;
pub mod table;

pub use memory_table::InMemoryConsentTable;
pub use repository::DynamoDbServiceUserConsentRepository;
#[cfg(feature = "dynamodb")]
pub use sdk::AwsSdkConsentTable;
pub use table::{ConsentTable, PutCondition, QueryPage, TableError};
