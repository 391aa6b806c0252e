use crate::diagnostics::LogDest;
use std::fs::OpenOptions;
use std::io::Write;

/// Writes a formatted diagnostic line to wherever `dest` points (`log_dest`'s
/// three destinations: console, text file, HTML file).
pub fn emit(dest: &LogDest, message: &str) {
    match dest {
        LogDest::Console => println!("{}", message),
        LogDest::TextFile(path) => {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{}", message);
            }
        }
        LogDest::HtmlFile(path) => {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "<p>{}</p>", html_escape(message));
            }
        }
    }
}

fn html_escape(message: &str) -> String {
    message
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
