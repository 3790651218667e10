pub mod cache_queries;
