// Text layout: greedy line packing and full justification.
// Pure and CPU-bound; callers on the async runtime should run it inside spawn_blocking.

pub mod justify;
pub mod wrap;

// Re-export the public API consumed by the route handlers.
pub use justify::justify;
pub use wrap::count_words;
