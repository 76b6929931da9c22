use rand::{distributions::Alphanumeric, prelude::ThreadRng, Rng};

/// key generation for the randomized conformance tests
pub trait Random {
    fn gen(rng: &mut ThreadRng) -> Self;
}

const STRING_KEY_MAX: usize = 12;

impl Random for String {
    // random alphanumeric key whose length is in [0, STRING_KEY_MAX)
    fn gen(rng: &mut ThreadRng) -> Self {
        let length = rng.gen_range(0..STRING_KEY_MAX);

        rng.sample_iter(&Alphanumeric)
            .map(char::from)
            .take(length)
            .collect()
    }
}

impl Random for u64 {
    // small key space so that operations keep colliding with live keys
    fn gen(rng: &mut ThreadRng) -> Self {
        rng.gen_range(0..1024)
    }
}
