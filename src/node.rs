//! Per-process node identity for UUID v1/v6.

use std::sync::OnceLock;

use md5::{Digest, Md5};

use crate::bits::{dpb, mask};
use crate::rand::{RandBytes, RandSource, ThreadRandom};

/// Multicast bit of a 48-bit node id: the least-significant bit of the first
/// (most-significant) octet. Forcing it to 1 keeps derived node ids out of
/// the real MAC address space (RFC 9562 §6.10).
const MULTICAST_BIT: u64 = 1 << 40;

const NODE_MASK: u64 = 0x0000_FFFF_FFFF_FFFF;

/// Identity of the generating node, derived once per process.
///
/// Holds the 48-bit node id, the randomly seeded 14-bit clock sequence, and
/// the two precomputed least-significant UUID words they produce: `v1_lsb`
/// embeds the real node id, `v6_lsb` substitutes a fresh random node value
/// per the RFC 9562 §5.6 recommendation.
#[derive(Debug)]
pub struct NodeIdentity {
    node_id: u64,
    clock_sequence: u16,
    v1_lsb: u64,
    v6_lsb: u64,
}

impl NodeIdentity {
    fn derive() -> Self {
        let rng = ThreadRandom;
        let node_id = fingerprint_node_id(&rng);

        // Non-zero random clock sequence, seeded once per process lifetime.
        let clock_sequence = loop {
            let seq = u16::from(RandSource::<u8>::rand(&rng)) << 8
                | u16::from(RandSource::<u8>::rand(&rng));
            if seq != 0 {
                break seq;
            }
        };

        let v6_node = (RandSource::<u64>::rand(&rng) & NODE_MASK) | MULTICAST_BIT;

        Self {
            node_id,
            clock_sequence,
            v1_lsb: lsb_word(node_id, clock_sequence),
            v6_lsb: lsb_word(v6_node, clock_sequence),
        }
    }

    /// The 48-bit node id with its multicast bit set.
    #[must_use]
    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    /// The per-process random clock sequence.
    #[must_use]
    pub fn clock_sequence(&self) -> u16 {
        self.clock_sequence
    }

    /// The least-significant UUID word for v1: variant, clock sequence, and
    /// the derived node id.
    #[must_use]
    pub fn v1_lsb(&self) -> u64 {
        self.v1_lsb
    }

    /// The least-significant UUID word for v6: variant, clock sequence, and a
    /// random node value.
    #[must_use]
    pub fn v6_lsb(&self) -> u64 {
        self.v6_lsb
    }
}

/// Packs a node value and clock sequence into a UUID least-significant word:
/// variant `10` in the top two bits, then the 14-bit clock sequence, then the
/// 48-bit node.
fn lsb_word(node: u64, clock_sequence: u16) -> u64 {
    let clk_low = u64::from(clock_sequence) & 0xFF;
    let clk_hi_with_variant = dpb(mask(2, 6), (u64::from(clock_sequence) >> 8) & 0x3F, 0b10);
    dpb(mask(8, 56), dpb(mask(8, 48), node, clk_low), clk_hi_with_variant)
}

/// Derives the 48-bit node id from a stable host fingerprint: host name,
/// platform property strings, and the process id, MD5'd down to six octets
/// with the multicast bit forced.
fn fingerprint_node_id<R>(rng: &R) -> u64
where
    R: RandBytes,
{
    let mut hasher = Md5::new();

    match hostname() {
        Some(name) => hasher.update(name.as_bytes()),
        None => {
            // No host identity available; a random fingerprint still yields a
            // valid multicast-bit node id.
            let mut salt = [0u8; 16];
            rng.fill(&mut salt);
            hasher.update(salt);
        }
    }
    hasher.update(std::env::consts::OS.as_bytes());
    hasher.update(std::env::consts::ARCH.as_bytes());
    hasher.update(std::env::consts::FAMILY.as_bytes());
    hasher.update(std::process::id().to_be_bytes());

    let digest = hasher.finalize();
    let mut node = 0u64;
    for &byte in &digest[..6] {
        node = node << 8 | u64::from(byte);
    }
    node | MULTICAST_BIT
}

fn hostname() -> Option<String> {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .ok()
        .filter(|name| !name.is_empty())
}

static NODE: OnceLock<NodeIdentity> = OnceLock::new();

/// Returns the process-wide [`NodeIdentity`], deriving it on first use.
#[must_use]
pub fn node_identity() -> &'static NodeIdentity {
    NODE.get_or_init(NodeIdentity::derive)
}
