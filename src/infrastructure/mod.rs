// Infrastructure layer - External dependencies and adapters
pub mod cached_repository;
pub mod config;
pub mod http_response;
pub mod ibtracs_repository;
pub mod ttl_cache;
