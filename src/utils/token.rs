use rand::{distributions::Alphanumeric, thread_rng, Rng};

pub const ATTEMPT_TOKEN_LEN: usize = 32;

/// Opaque alphanumeric token identifying one issued Presented Set.
pub fn attempt_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ATTEMPT_TOKEN_LEN)
        .map(char::from)
        .collect()
}
