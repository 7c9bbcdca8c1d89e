pub mod ast;
pub mod backends;
pub mod list;
pub mod run;
mod setup;
