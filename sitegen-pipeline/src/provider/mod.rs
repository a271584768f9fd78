//! Model providers
//!
//! Concrete [`ModelClient`](crate::model::ModelClient) backends.

pub mod openai;
