//! Process-wide guest context: the installed allocator and configuration.
//!
//! Both are fixed on first use. Installing after a call has already used
//! the default fails with `AlreadyInstalled`, so buffers handed out by one
//! allocator are never released through another.

use std::sync::OnceLock;

use df_engine::{GuestAllocator, SystemAllocator};
use df_primitives::{DfError, DfResult, GuestConfig};

static SYSTEM: SystemAllocator = SystemAllocator;
static ALLOCATOR: OnceLock<&'static dyn GuestAllocator> = OnceLock::new();
static CONFIG: OnceLock<GuestConfig> = OnceLock::new();

/// Install the allocator behind `canonical_abi_realloc` / `canonical_abi_free`.
pub fn install_allocator(allocator: &'static dyn GuestAllocator) -> DfResult<()> {
    ALLOCATOR
        .set(allocator)
        .map_err(|_| DfError::AlreadyInstalled("allocator"))?;
    tracing::debug!("guest allocator installed");
    Ok(())
}

/// The active allocator. Defaults to the process heap.
pub fn allocator() -> &'static dyn GuestAllocator {
    *ALLOCATOR.get_or_init(|| &SYSTEM as &'static dyn GuestAllocator)
}

/// Install the guest configuration.
pub fn configure(config: GuestConfig) -> DfResult<()> {
    tracing::debug!(?config, "configuring guest");
    CONFIG
        .set(config)
        .map_err(|_| DfError::AlreadyInstalled("config"))
}

/// The active configuration. Defaults to `GuestConfig::default()`.
pub fn config() -> &'static GuestConfig {
    CONFIG.get_or_init(GuestConfig::default)
}
