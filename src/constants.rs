/// Number of coefficients per feature frame.
pub const FRAME_COEFFICIENTS: usize = 13;
pub const DEFAULT_WINDOW_SIZE: usize = 50;
pub const DEFAULT_BEAM_THRESHOLD: f32 = 100.;
/// Label reported when no template produced a finite distance.
pub const UNKNOWN_LABEL: &str = "Unknown";
pub const TEMPLATE_FILE_EXTENSION: &str = "txt";
pub const TEMPLATE_DECIMALS: usize = 6;
pub(crate) const TEMPLATE_VALUE_SEPARATOR: char = '|';
