/// Numeric scanning and conversion helpers.
///
/// This module reads numeric prefixes out of source text the way the C
/// library conversions `strtol` and `strtod` do, accumulates variable indices
/// with overflow detection, and truncates floating-point results into
/// integers without silent saturation.
///
/// Conversions that can fail return a `Result` or an `Option` instead of
/// wrapping or saturating.
pub mod num;
