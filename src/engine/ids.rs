//! Identifier generation for new messages.

use rand::RngCore;

use crate::models::MessageId;

/// Number of random bytes behind each generated identifier (80 bits)
pub const ID_BYTES: usize = 10;

/// Generates identifiers for newly created messages.
///
/// Swapping the generator lets tests produce a predictable sequence.
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> MessageId;
}

/// Draws `ID_BYTES` from the thread-local CSPRNG and hex-encodes them.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate_id(&self) -> MessageId {
        let mut bytes = [0u8; ID_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        MessageId::from(to_hex(&bytes))
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
