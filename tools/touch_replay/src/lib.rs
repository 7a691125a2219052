pub mod logging;
pub mod replay;
pub mod scenario;
