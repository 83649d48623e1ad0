use sharepass::Settings;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliFlags {
    pub help: bool,
    pub version: bool,
    pub quiet: bool,
    pub clipboard: bool,
    pub share: bool,
    pub interactive: bool,
    pub no_lower: bool,
    pub no_upper: bool,
    pub no_numbers: bool,
    pub no_symbols: bool,
    pub no_leading_special: bool,
    pub length: Option<usize>,
    pub number: Option<usize>,
    pub exclude: Option<String>,
    pub query: Option<String>,
}

impl CliFlags {
    /// Layer explicit flags over settings decoded from a share query.
    /// Flags only ever switch a restriction on.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(length) = self.length {
            settings.length = length;
        }
        settings.exclude_lowercase |= self.no_lower;
        settings.exclude_uppercase |= self.no_upper;
        settings.exclude_numbers |= self.no_numbers;
        settings.exclude_symbols |= self.no_symbols;
        settings.rule_no_leading_special |= self.no_leading_special;
        if let Some(ref chars) = self.exclude {
            settings.excluded_chars.push_str(chars);
        }
    }
}
