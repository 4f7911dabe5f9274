pub mod awgn;
pub mod fading;
pub mod random_bit_generator;

pub use awgn::{noise_power, AWGN};
pub use fading::RayleighFading;
pub use random_bit_generator::RandomBitGenerator;
