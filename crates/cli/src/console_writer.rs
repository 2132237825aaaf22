use speechcheck_core::audit::domain::message_writer::MessageWriter;

const RESET: &str = "\x1b[0m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Report sink that colors each channel with plain ANSI escapes.
pub struct ConsoleWriter {
    colored: bool,
}

impl ConsoleWriter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn print(&self, color: &str, text: &str) {
        if self.colored {
            println!("{color}{text}{RESET}");
        } else {
            println!("{text}");
        }
    }
}

impl MessageWriter for ConsoleWriter {
    fn write(&self, text: &str) {
        println!("{text}");
    }

    fn write_empty_line(&self) {
        println!();
    }

    fn write_notification(&self, text: &str) {
        self.print(GRAY, text);
    }

    fn write_main_notification(&self, text: &str) {
        self.print(BOLD, text);
    }

    fn write_success(&self, text: &str) {
        self.print(GREEN, text);
    }

    fn write_warn(&self, text: &str) {
        self.print(YELLOW, text);
    }

    fn write_failure(&self, text: &str) {
        self.print(RED, text);
    }

    fn write_header(&self, text: &str) {
        self.print(CYAN, text);
    }

    fn write_internal_error(&self, text: &str) {
        if self.colored {
            eprintln!("{RED}{text}{RESET}");
        } else {
            eprintln!("{text}");
        }
    }
}
