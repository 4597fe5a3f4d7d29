//! Interpreter tuning constants

/// Stack size for the dedicated interpreter thread.
///
/// Evaluation is host-stack recursion, so deeply nested blocks, combinators
/// and recursive memoised closures are bounded by this figure rather than
/// the platform default. 256 MiB comfortably runs recursion tens of
/// thousands of frames deep.
pub const RECURSION_STACK_BYTES: usize = 256 * 1024 * 1024;

/// File suffix for program input files.
pub const INPUT_SUFFIX: &str = ".in";

/// File suffix for program output files.
pub const OUTPUT_SUFFIX: &str = ".out";
