//! Chequeo de privilegios del principal actual.

/// `true` si el uid efectivo es root.
#[cfg(unix)]
pub fn effective_uid_is_root() -> bool {
    nix::unistd::Uid::effective().is_root()
}

#[cfg(not(unix))]
pub fn effective_uid_is_root() -> bool {
    false
}

/// Precondición estándar para steps privilegiados.
pub fn require_root() -> Result<(), String> {
    if effective_uid_is_root() {
        Ok(())
    } else {
        Err("requires root privileges (effective uid is not 0)".to_string())
    }
}
