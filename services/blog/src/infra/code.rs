use rand::RngExt;

use crate::domain::repository::CodeGenerator;

/// Uniform decimal digits from the thread-local RNG.
#[derive(Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, len: usize) -> String {
        let mut rng = rand::rng();
        (0..len)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect()
    }
}
