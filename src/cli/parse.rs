use super::CliFlags;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Missing value for {0}")]
    MissingValue(String),
    #[error("Unknown argument: {0}")]
    UnknownArg(String),
}

pub fn parse(args: &[String]) -> Result<CliFlags, ParseError> {
    let mut flags = CliFlags::default();
    let mut i = 1;

    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => flags.help = true,
            "-v" | "--version" => flags.version = true,
            "-q" | "--quiet" => flags.quiet = true,
            "-b" | "--board" => flags.clipboard = true,
            "-s" | "--share" => flags.share = true,
            "-i" | "--interactive" => flags.interactive = true,
            "--no-lower" => flags.no_lower = true,
            "--no-upper" => flags.no_upper = true,
            "--no-numbers" => flags.no_numbers = true,
            "--no-symbols" => flags.no_symbols = true,
            "--no-leading-special" => flags.no_leading_special = true,
            "-l" | "--length" => {
                let value = value_for(args, &mut i)?;
                flags.length = Some(parse_number(value)?);
            }
            "-n" | "--number" => {
                let value = value_for(args, &mut i)?;
                flags.number = Some(parse_number(value)?);
            }
            // Excluded characters may legitimately start with '-'.
            "-x" | "--exclude" => flags.exclude = Some(value_for(args, &mut i)?.to_string()),
            "--query" => flags.query = Some(value_for(args, &mut i)?.to_string()),
            _ => return Err(ParseError::UnknownArg(arg.to_string())),
        }
        i += 1;
    }

    Ok(flags)
}

fn value_for<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, ParseError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| ParseError::MissingValue(flag.clone()))
}

fn parse_number(value: &str) -> Result<usize, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))
}
