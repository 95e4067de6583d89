//! Build-time identity and sizing of the kernel.

pub const K_KERNEL_NAME: &str = "TickOS";
pub const K_KERNEL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Capacity of the scheduler reaction pool.
pub const K_MAX_REACTIONS: usize = 32;

/// Terminal grid height, in character rows.
pub const K_NROWS: u16 = 24;
/// Terminal grid width, in character columns.
///
/// Echo never writes the last column, as most emulators wrap after it.
pub const K_NCOLS: u16 = 80;

/// Line buffer size. One slot stays reserved, so a line holds at most
/// `K_LINE_LEN - 1` characters.
pub const K_LINE_LEN: usize = 80;
