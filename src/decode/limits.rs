/// Resource limits enforced during or immediately after parsing, before
/// any structural validation runs. This is the boundary that keeps
/// adversarial input from exhausting memory or blowing the stack before
/// anything else gets a chance to reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    pub max_bytes: usize,
    pub max_depth: usize,
    pub max_string_len: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_depth: 32,
            max_string_len: 64 * 1024,
        }
    }
}
