mod types;

pub use types::OperatorConfig;
