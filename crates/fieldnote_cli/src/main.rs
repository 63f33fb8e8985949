//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `fieldnote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use fieldnote_core::{calculate_word_count, core_version};

fn main() {
    println!("fieldnote_core version={}", core_version());
    for arg in std::env::args().skip(1) {
        println!("words({arg})={}", calculate_word_count(&arg));
    }
}
