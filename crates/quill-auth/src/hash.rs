use rand::Rng;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 5;
const SALT_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Random 5-letter salt. A plain PRNG is fine here: the salt only has to
/// differ between records, the password is the secret.
pub fn make_salt() -> String {
    let mut rng = rand::rng();
    (0..SALT_LEN)
        .map(|_| SALT_CHARS[rng.random_range(0..SALT_CHARS.len())] as char)
        .collect()
}

/// Hash a password for storage, generating a fresh salt.
pub fn make_pw_hash(username: &str, password: &str) -> String {
    hash_with_salt(username, password, &make_salt())
}

/// The stored form is `salt|hexdigest` where
/// digest = SHA-256(username || password || salt), no separators.
pub fn hash_with_salt(username: &str, password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    format!("{}|{}", salt, hex::encode(hasher.finalize()))
}

/// Recompute with the salt carried in `stored` and compare.
pub fn verify_pw(username: &str, password: &str, stored: &str) -> bool {
    match stored.split_once('|') {
        Some((salt, _)) => hash_with_salt(username, password, salt) == stored,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_is_five_ascii_letters() {
        for _ in 0..50 {
            let salt = make_salt();
            assert_eq!(salt.len(), 5);
            assert!(salt.bytes().all(|b| b.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn hash_with_salt_is_deterministic() {
        let a = hash_with_salt("alice", "secret", "xyz12");
        let b = hash_with_salt("alice", "secret", "xyz12");
        assert_eq!(a, b);
        assert_eq!(
            a,
            "xyz12|11c75ecad789eabc4fe091e42841a39bc70028d00ed0ba7e8cbb04adb182cb8f"
        );
    }

    #[test]
    fn hash_shape_is_salt_pipe_hex() {
        let stored = hash_with_salt("bob", "hunter2", "AbCdE");
        let (salt, digest) = stored.split_once('|').unwrap();
        assert_eq!(salt, "AbCdE");
        assert_eq!(digest.len(), 64);
        assert!(digest.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn fresh_hashes_differ_by_salt_but_both_verify() {
        let h1 = make_pw_hash("alice", "secret");
        let h2 = make_pw_hash("alice", "secret");
        // 52^5 salts; a collision here means the salt generator is broken.
        assert_ne!(h1, h2);
        assert!(verify_pw("alice", "secret", &h1));
        assert!(verify_pw("alice", "secret", &h2));
    }

    #[test]
    fn verify_rejects_wrong_inputs() {
        let stored = make_pw_hash("alice", "secret");
        assert!(!verify_pw("alice", "wrong", &stored));
        assert!(!verify_pw("mallory", "secret", &stored));
        assert!(!verify_pw("alice", "secret", "no-pipe-here"));
    }
}
