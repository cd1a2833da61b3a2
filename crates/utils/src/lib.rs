use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Creates an alphanumeric secret of the given length, used for api keys
/// when none is provided by the environment
pub fn create_random_secret(secret_len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_secret_with_requested_length() {
        let secret = create_random_secret(32);
        assert_eq!(secret.len(), 32);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn creates_different_secrets() {
        assert_ne!(create_random_secret(24), create_random_secret(24));
    }
}
