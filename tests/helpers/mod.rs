pub mod log_builder;
pub mod mock_source;
