mod errors;
mod exec;
mod payload;
mod payload_builder;

pub use errors::ExecutionEngineError;
pub use exec::ExecutionEngine;
pub use payload::EnginePayload;
pub use payload_builder::PayloadBuilderEngine;
