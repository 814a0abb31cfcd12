//! Request dispatch layer
//!
//! Maps external tool requests onto engine calls:
//! JSON -> Request -> CommandExecutor -> Battlefield / queries -> Response

pub mod executor;
pub mod request;
pub mod response;

pub use executor::CommandExecutor;
pub use request::{AreaSpec, CreatureSpec, MoveSpec, Request, TerrainSpec};
pub use response::{BatchEntry, ErrorReport, Response};
