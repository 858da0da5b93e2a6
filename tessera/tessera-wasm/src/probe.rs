//! Engine feature probes.
//!
//! The core never talks to a WebAssembly engine itself; it prepares the
//! probe artifacts and caches the host's verdict. A host wires
//! [`simd_supported_with`] to its validate-bytes entry point and
//! [`threads_supported_with`] to a trial shared-memory allocation (the
//! trial allocation should be dropped as soon as the verdict is known).
//! Probes never error: a failing callback reads as "unsupported".

use std::sync::OnceLock;

use tessera_ir::build;
use tessera_ir::model::types::{MemoryLimits, ValType};

static SIMD_PROBE: OnceLock<Vec<u8>> = OnceLock::new();
static SIMD_SUPPORTED: OnceLock<bool> = OnceLock::new();
static THREADS_SUPPORTED: OnceLock<bool> = OnceLock::new();

/// Minimal module whose type section requires v128: engines without the
/// SIMD proposal reject it at validation.
pub fn simd_probe_module() -> &'static [u8] {
    SIMD_PROBE.get_or_init(|| {
        let module = build::module(vec![build::func(
            "$_simd_probe",
            vec![],
            vec![ValType::V128],
            vec![],
            vec![build::v128_const([0; 16])],
        )]);
        crate::emit_binary(&module).expect("probe module is well formed")
    })
}

/// Memory request used to detect shared-memory support: engines (or
/// host security policy) without threads refuse to allocate it.
pub const fn threads_probe_limits() -> MemoryLimits {
    MemoryLimits::shared(1, 1)
}

/// Ask the host to validate the SIMD probe module. The first verdict is
/// cached process-wide.
pub fn simd_supported_with<F: FnOnce(&[u8]) -> bool>(validate: F) -> bool {
    *SIMD_SUPPORTED.get_or_init(|| validate(simd_probe_module()))
}

/// Ask the host to allocate a shared memory with the probe limits and
/// confirm its buffer is shared. The first verdict is cached
/// process-wide.
pub fn threads_supported_with<F: FnOnce(&MemoryLimits) -> bool>(try_alloc: F) -> bool {
    *THREADS_SUPPORTED.get_or_init(|| try_alloc(&threads_probe_limits()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::MAGIC;

    #[test]
    fn simd_probe_declares_a_v128_result() {
        let bytes = simd_probe_module();
        assert_eq!(&bytes[0..4], &MAGIC);
        // Type section: () -> (v128), and nothing exported.
        assert!(bytes.windows(4).any(|w| w == [0x60, 0x00, 0x01, 0x7B]));
        assert!(!bytes.contains(&0x07));
    }

    #[test]
    fn probe_verdicts_are_cached() {
        assert!(simd_supported_with(|_| true));
        // A contradicting callback cannot flip the cached verdict.
        assert!(simd_supported_with(|_| false));

        assert!(!threads_supported_with(|limits| {
            assert!(limits.shared);
            assert_eq!(limits.min, 1);
            false
        }));
        assert!(!threads_supported_with(|_| true));
    }
}
