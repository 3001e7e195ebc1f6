// build.rs

//! build.rs — locate the MeshKernel shared library and emit link directives
//!
//! Only active with the `link-meshkernel` feature. Two discovery modes:
//!  • Default (pkg-config):  use `pkg_config::probe("MeshKernelApi")`
//!  • Manual    (env-vars):  `MESHKERNEL_NO_PKG_CONFIG=1` plus `MESHKERNEL_DIR`
//!                           or `MESHKERNEL_LIB_DIR`.

#[cfg(feature = "link-meshkernel")]
fn main() {
    use std::env;

    if env::var_os("MESHKERNEL_NO_PKG_CONFIG").is_some() {
        // -------- Manual ----------
        let lib = match env::var("MESHKERNEL_LIB_DIR") {
            Ok(dir) => dir,
            Err(_) => {
                let prefix = env::var("MESHKERNEL_DIR").unwrap_or_else(|_| {
                    panic!("MESHKERNEL_DIR or MESHKERNEL_LIB_DIR must be set when MESHKERNEL_NO_PKG_CONFIG=1")
                });
                format!("{}/lib", prefix)
            }
        };
        println!("cargo:rustc-link-search=native={}", lib);
        println!("cargo:rustc-link-lib=dylib=MeshKernelApi");
    } else {
        // -------- pkg-config ----------
        // pkg-config prints the link-search and link-lib lines itself.
        pkg_config::Config::new()
            .statik(false)
            .probe("MeshKernelApi")
            .unwrap_or_else(|e| {
                panic!("Could not find MeshKernelApi via pkg-config ({e}); set MESHKERNEL_NO_PKG_CONFIG=1 to bypass")
            });
    }

    println!("cargo:rerun-if-env-changed=MESHKERNEL_NO_PKG_CONFIG");
    println!("cargo:rerun-if-env-changed=MESHKERNEL_DIR");
    println!("cargo:rerun-if-env-changed=MESHKERNEL_LIB_DIR");
}

#[cfg(not(feature = "link-meshkernel"))]
fn main() {
    // No-op when the "link-meshkernel" feature is disabled
}
