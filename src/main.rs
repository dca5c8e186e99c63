//! # Voxel Sandbox Entry Point
//!
//! Calls into the library's `run()`, which reads an optional JSON config path
//! from the first argument.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- sandbox.json
//! ```

fn main() {
    if let Err(error) = voxel_sandbox::run() {
        log::error!("{error}");
        eprintln!("voxel-sandbox: {error}");
        std::process::exit(1);
    }
}
