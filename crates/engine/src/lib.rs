pub mod descriptor;
pub mod engine;
pub mod error;
pub mod pack;
pub mod store;
pub mod visitor;

#[cfg(test)]
pub mod harness;
