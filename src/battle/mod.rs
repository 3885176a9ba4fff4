pub mod calculators;
pub mod engine;
pub mod state;
pub mod stats;
pub mod status;

#[cfg(test)]
pub(crate) mod tests;
