//! Driven adapters: storage backends and the instrumentation sink.

pub mod instrumentation;
pub mod memory;
pub mod persistence;

pub use instrumentation::TracingInstrumentation;
