use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

static PARALLEL_MASK_MIN_VERSION: OnceLock<usize> = OnceLock::new();

/// Smallest version whose eight mask candidates are scored on the rayon pool.
/// 41 turns parallel scoring off.
pub(crate) fn parallel_mask_min_version() -> usize {
    *PARALLEL_MASK_MIN_VERSION
        .get_or_init(|| parse_env_usize("QR_PARALLEL_MASK_MIN_VERSION", 10).clamp(1, 41))
}
