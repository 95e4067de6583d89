//! Build script for the `tickos` firmware crate.
//!
//! The linker looks for `memory.x` in its search path, not in the crate
//! directory. This script copies `memory.x` into `OUT_DIR` and adds that
//! directory to the link search path so `cortex-m-rt`'s `link.x` can include it.
//!
//! It also sets the linker args required by `cortex-m-rt` (`--nmagic` and `-Tlink.x`).

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let l_crate_dir =
        PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));

    // ---- Ensure the linker can find memory.x ----
    let l_memory_x_src = l_crate_dir.join("memory.x");
    if !l_memory_x_src.exists() {
        panic!(
            "Expected linker memory script at {:?}. \
             Make sure `memory.x` exists in the crate folder.",
            l_memory_x_src
        );
    }

    let l_out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR not set"));
    let l_memory_x_dst = l_out_dir.join("memory.x");

    fs::copy(&l_memory_x_src, &l_memory_x_dst).unwrap_or_else(|e| {
        panic!(
            "Failed to copy {:?} to {:?}: {}",
            l_memory_x_src, l_memory_x_dst, e
        )
    });

    // Add OUT_DIR to the linker search path so `link.x` can include `memory.x`.
    println!("cargo:rustc-link-search={}", l_out_dir.display());

    // Re-run when the memory layout changes.
    println!("cargo:rerun-if-changed={}", l_memory_x_src.display());

    // ---- Linker arguments required for cortex-m-rt embedded targets ----
    // `--nmagic` is required when memory regions are not aligned to 0x10000.
    println!("cargo:rustc-link-arg=--nmagic");

    // Use the linker script provided by cortex-m-rt (it includes `memory.x`).
    println!("cargo:rustc-link-arg=-Tlink.x");
}
