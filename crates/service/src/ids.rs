//! Random public-identifier generation.
//!
//! Public ids and verification tokens are plain alphanumeric strings drawn
//! from the thread-local CSPRNG. The generator makes no uniqueness promise;
//! the unique constraints on `email` and `public_id` are the backstop.

use rand::distributions::Alphanumeric;
use rand::Rng;

pub fn generate_id(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::generate_id;

    #[test]
    fn produces_exact_length() {
        for len in [1usize, 30, 40, 64] {
            assert_eq!(generate_id(len).len(), len);
        }
    }

    #[test]
    fn output_is_alphanumeric() {
        let id = generate_id(256);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn consecutive_ids_differ() {
        // 30 alphanumeric chars; a collision here means the RNG is broken
        assert_ne!(generate_id(30), generate_id(30));
    }
}
