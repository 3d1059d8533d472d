//! Arithmetic helpers shared by the encoder and the readback decoder

/// GF(256) field operations for Reed-Solomon codes
pub mod gf256;
