//! # Adapters Layer
//!
//! - `repository` - In-memory consent repository
//! - `dynamodb` - DynamoDB consent repository and table implementations
//! - `http` - Local axum server
//! - `lambda` - AWS Lambda entry point (feature `lambda`)

pub mod dynamodb;
pub mod http;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod repository;
