//! Build script: puts the S140 memory layout on the linker search path and,
//! for the bare-metal target, adds the cortex-m-rt and defmt link scripts.
//!
//! Host builds (`cargo test`) only get the search path; they link with the
//! system linker and never read `memory.x`.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

const MEMORY_X: &[u8] = include_bytes!("memory.x");

fn main() {
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    File::create(out_dir.join("memory.x"))
        .and_then(|mut f| f.write_all(MEMORY_X))
        .expect("write memory.x to OUT_DIR");
    println!("cargo:rustc-link-search={}", out_dir.display());

    let bare_metal = env::var("CARGO_CFG_TARGET_OS").map_or(false, |os| os == "none");
    if bare_metal {
        for arg in ["--nmagic", "-Tlink.x", "-Tdefmt.x"] {
            println!("cargo:rustc-link-arg-bins={arg}");
        }
    }

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
