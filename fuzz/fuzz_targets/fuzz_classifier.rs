//! Fuzz testing for request classification and the Caesar transform.
//!
//! Feeds arbitrary resource names, query pairs and bodies through the same
//! path a request takes and checks that:
//!
//! - Classification never panics and always yields an operation or an error
//! - A classified encode key either builds a cipher or is rejected cleanly
//! - Decrypting an encryption restores the input, for any UTF-8 text
//!
//! # Running the Fuzz Tests
//!
//! ```bash
//! # Install cargo-fuzz (requires nightly)
//! cargo +nightly install cargo-fuzz
//!
//! # Run the classifier fuzz target
//! cargo +nightly fuzz run fuzz_classifier
//!
//! # Run with a time limit (e.g., 60 seconds)
//! cargo +nightly fuzz run fuzz_classifier -- -max_total_time=60
//! ```

#![no_main]

use arbitrary::Arbitrary;
use caesar_service::cipher::{Caesar, CaesarEngine};
use caesar_service::classifier::classify;
use caesar_service::models::{CipherQuery, Operation};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    resource: String,
    pairs: Vec<(String, String)>,
    body: String,
}

fuzz_target!(|input: Input| {
    let query = CipherQuery::from_pairs(input.pairs);
    let Ok(operation) = classify(&input.resource, CaesarEngine::NAME, &query) else {
        return;
    };

    if let Operation::Encode { key } | Operation::Decode { key } = operation {
        if let Ok(cipher) = Caesar::new(key) {
            let ciphertext = cipher.encrypt_str(&input.body);
            assert_eq!(cipher.decrypt_str(&ciphertext), input.body);
        }
    }
});
