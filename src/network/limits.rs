//! File descriptor budget for concurrent connect probes
//!
//! Every in-flight probe holds one socket. A worker pool larger than the
//! soft `RLIMIT_NOFILE` ends in EMFILE, so the engine sizes the pool to fit.

#[cfg(unix)]
use rlimit::Resource;

/// Descriptors kept free for stdio, log output and the runtime itself
pub const RESERVED_DESCRIPTORS: u64 = 64;

/// Current soft descriptor limit, if the platform exposes one
#[cfg(unix)]
pub fn descriptor_limit() -> Option<u64> {
    match Resource::NOFILE.get() {
        Ok((soft, _hard)) => {
            log::debug!("File descriptor limit: soft={}", soft);
            Some(soft)
        }
        Err(e) => {
            log::warn!("Could not read file descriptor limit: {}", e);
            None
        }
    }
}

#[cfg(not(unix))]
pub fn descriptor_limit() -> Option<u64> {
    None
}

/// Raise the soft limit towards `wanted`, never past the hard limit.
/// Returns the soft limit in effect afterwards.
#[cfg(unix)]
pub fn raise_descriptor_limit(wanted: u64) -> Option<u64> {
    let (soft, hard) = match Resource::NOFILE.get() {
        Ok(limits) => limits,
        Err(e) => {
            log::warn!("Could not read file descriptor limit: {}", e);
            return None;
        }
    };
    if soft >= wanted {
        return Some(soft);
    }

    let target = wanted.min(hard);
    match Resource::NOFILE.set(target, hard) {
        Ok(()) => {
            log::info!("Raised file descriptor limit from {} to {}", soft, target);
            Some(target)
        }
        Err(e) => {
            log::warn!("Failed to raise file descriptor limit to {}: {}", target, e);
            Some(soft)
        }
    }
}

#[cfg(not(unix))]
pub fn raise_descriptor_limit(_wanted: u64) -> Option<u64> {
    None
}

/// Largest worker count a descriptor limit can sustain
pub fn worker_budget(limit: Option<u64>) -> Option<usize> {
    limit.map(|limit| {
        let budget = limit.saturating_sub(RESERVED_DESCRIPTORS).max(1);
        usize::try_from(budget).unwrap_or(usize::MAX)
    })
}
