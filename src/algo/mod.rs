pub mod api_server;
pub mod commands;
pub mod timer;

pub use api_server::{AlgoState, algo_routes};
pub use commands::AlgoCommands;
pub use timer::{Algorithm, AlgorithmRunner, RunContext, StartOutcome, TimerAlgorithm};
