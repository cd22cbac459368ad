//! Deterministic component addresses.

/// Derive a stable `0x`-prefixed address for a named component.
///
/// `namespace` separates component kinds (`token`, `lp`, `pool`, `oracle`)
/// and `label` is the instance name, so two deployments with the same labels
/// get the same addresses.
pub fn derive_address(namespace: &str, label: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"oramm:");
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    format!("0x{}", hex::encode(&digest.as_bytes()[..20]))
}
