use owo_colors::OwoColorize;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when the target stream is a TTY.
fn is_tty(stream: atty::Stream) -> bool {
    atty::is(stream)
}

pub fn print_info(msg: &str) {
    if is_tty(atty::Stream::Stdout) {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty(atty::Stream::Stderr) {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty(atty::Stream::Stderr) {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty(atty::Stream::Stdout) {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// One-line run summary, e.g. "3 files rewritten, 5 entries renamed (12 files scanned)".
pub fn summary_line(report: &crate::WalkReport, dry_run: bool) -> String {
    let verb = if dry_run { "would be " } else { "" };
    let mut line = format!(
        "{} files {}rewritten, {} entries {}renamed ({} files scanned, {} binary skipped)",
        report.files_rewritten,
        verb,
        report.renamed,
        verb,
        report.files_scanned,
        report.binary_skipped
    );
    if report.collisions_skipped > 0 {
        line.push_str(&format!(", {} renames skipped on collision", report.collisions_skipped));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WalkReport;

    #[test]
    fn summary_mentions_collisions_only_when_present() {
        let mut r = WalkReport {
            files_rewritten: 2,
            renamed: 3,
            files_scanned: 4,
            ..Default::default()
        };
        let s = summary_line(&r, false);
        assert!(s.starts_with("2 files rewritten, 3 entries renamed"), "{s}");
        assert!(!s.contains("collision"));

        r.collisions_skipped = 1;
        let s = summary_line(&r, true);
        assert!(s.contains("would be rewritten"), "{s}");
        assert!(s.contains("1 renames skipped on collision"), "{s}");
    }
}
