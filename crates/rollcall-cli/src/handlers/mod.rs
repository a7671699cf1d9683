mod context;

pub mod attendance;
pub mod audit;
pub mod config;
pub mod demo;
pub mod roles;
pub mod roster;
pub mod students;

pub use context::HandlerContext;
