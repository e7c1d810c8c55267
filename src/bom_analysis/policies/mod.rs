mod rounding;

pub use rounding::RoundingPolicy;
