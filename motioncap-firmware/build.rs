//! Build script for motioncap-firmware
//!
//! embassy-stm32 provides memory.x through its `memory-x` feature; this only
//! adds the linker scripts for cortex-m-rt and defmt.

fn main() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}
