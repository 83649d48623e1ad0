use sharepass::Settings;

use super::{Session, Status};
use crate::terminal::{
    DIM, RESET, UNDERLINE, box_bottom, box_line, box_line_center, box_opt, box_top, flush,
    print_error, print_rule,
};

fn on_off(flag: bool) -> &'static str {
    if flag { "excluded" } else { "included" }
}

fn print_settings_summary(settings: &Settings) {
    box_line(&format!("{UNDERLINE}Settings{RESET}:"));
    box_line(&format!("  Length: {}", settings.length));
    box_line(&format!(
        "  Lowercase: {}  |  Uppercase: {}",
        on_off(settings.exclude_lowercase),
        on_off(settings.exclude_uppercase)
    ));
    box_line(&format!(
        "  Numbers: {}  |  Symbols: {}",
        on_off(settings.exclude_numbers),
        on_off(settings.exclude_symbols)
    ));
    if !settings.excluded_chars.is_empty() {
        box_line(&format!("  Excluded characters: {}", settings.excluded_chars));
    }
    if settings.rule_no_leading_special {
        box_line("  Rule: first character is a letter");
    }
}

pub fn print_session(session: &Session<'_>) {
    box_top("Sharepass");
    box_line_center("Enter/r: regenerate | c: copy | Esc/q: quit");
    box_line("");
    box_line_center(session.current());
    box_line("");
    print_rule();
    print_settings_summary(session.settings());
    box_line("");

    let share = session.share_query();
    if share.is_empty() {
        box_line("Share: (defaults)");
    } else {
        box_line(&format!("Share: ?{share}"));
    }

    let mut history = session.history().peekable();
    if history.peek().is_some() {
        box_line("");
        box_line(&format!("{UNDERLINE}History{RESET}:"));
        for (i, password) in history.enumerate() {
            box_line(&format!("{DIM}{:>3}) {password}{RESET}", i + 1));
        }
    }
    box_bottom();

    match session.status() {
        Some(Status::Copied) => println!("Copied to clipboard"),
        Some(Status::Failed(reason)) => print_error(reason),
        None => println!(),
    }
    flush();
}

pub fn print_help() {
    box_top("Sharepass");
    box_line_center("Constrained password generator with shareable settings");
    box_line("");
    box_line("MODES:");
    box_line("  1) Client: Pass flags (e.g., -l 20 -n 5) to print passwords.");
    box_line("  2) Interactive: Use -i to regenerate and copy passwords from a");
    box_line("     live session with a short history.");
    box_line("");
    box_line("USAGE:");
    box_line("  sharepass [OPTIONS]");
    box_line("");
    box_line("OPTIONS:");
    box_line(" Password:");
    box_opt("  -l, --length <N>", "Characters per password, 1 to 128 (default: 20)");
    box_opt("  -n, --number <N>", "How many passwords to generate (default: 1)");
    box_opt("      --no-lower", "Exclude lowercase letters");
    box_opt("      --no-upper", "Exclude uppercase letters");
    box_opt("      --no-numbers", "Exclude digits");
    box_opt("      --no-symbols", "Exclude symbols");
    box_opt("  -x, --exclude <CHARS>", "Never use any of these characters");
    box_opt("      --no-leading-special", "First character must be a letter");
    box_line("");
    box_line(" Sharing:");
    box_opt(
        "      --query <QUERY>",
        "Start from a share query or link. Falls back to $SHAREPASS_QUERY.",
    );
    box_opt("  -s, --share", "Print the share query for the effective settings");
    box_line("");
    box_line(" Output:");
    box_opt("  -b, --board", "Copy to clipboard instead of printing");
    box_opt("  -i, --interactive", "Interactive session");
    box_opt("  -q, --quiet", "Suppress warnings and confirmations");
    box_line("");
    box_line(" Info:");
    box_opt("  -h, --help", "Display this help message");
    box_opt("  -v, --version", "Display version");
    box_line("");
    box_line("EXAMPLES:");
    box_line("  sharepass                      One password, default settings");
    box_line("  sharepass -l 16 -n 3           Three passwords, 16 characters each");
    box_line("  sharepass --no-symbols -s      Alphanumeric, plus its share query");
    box_line("  sharepass --query '?len=18&exSym&ruleNoLead'");
    box_line("                                 Reproduce a shared configuration");
    box_line("");
    box_bottom();
    println!();
}
