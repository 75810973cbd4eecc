pub mod aggregator;
pub mod decoder;
pub mod dto;
pub mod encoder;
pub mod ports;
pub mod services;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
