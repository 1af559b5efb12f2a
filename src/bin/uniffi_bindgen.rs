//! Generates Swift and Kotlin bindings for the catalog FFI layer.
//!
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate \
//!     --library target/release/libfodmap_find.so --language swift --out-dir ./bindings
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
