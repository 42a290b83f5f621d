//! Request and Response models for the cache management API
//!
//! This module defines the DTOs used for serializing/deserializing HTTP
//! request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::InvalidateMultipleRequest;
pub use responses::{
    EntityTypeInfo, EntityTypesResponse, FlushResponse, HealthResponse, InvalidateResponse,
    StatsResponse,
};
