#[derive(Debug, Default, Clone)]
pub struct Config {
    /// Suppresses decoration.
    ///
    /// `1` hides the banner and headers, `2` also hides passing entries.
    pub quiet: u8,
    /// Emit the result set as JSON on stdout instead of the coloured report.
    pub json: bool,
    pub no_banner: bool,
}
