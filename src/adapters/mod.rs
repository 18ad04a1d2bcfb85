// Adapters layer: concrete implementations for external systems (storage backends, HTTP).

pub mod http;
pub mod storage;
