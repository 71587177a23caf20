//! Colored echo and fail-fast exit for command-line tools.
//!
//! ```no_run
//! use recept::ui::{echo, exit, Color};
//!
//! echo("Building...", Color::Cyan);
//! exit("Build failed", 2);
//! ```

use console::Style;

/// Named terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Dim,
    Bold,
}

impl Color {
    /// Console style for this color.
    pub fn style(self) -> Style {
        match self {
            Self::Red => Style::new().red(),
            Self::Green => Style::new().green(),
            Self::Yellow => Style::new().yellow(),
            Self::Blue => Style::new().blue(),
            Self::Magenta => Style::new().magenta(),
            Self::Cyan => Style::new().cyan(),
            Self::White => Style::new().white(),
            Self::Dim => Style::new().dim(),
            Self::Bold => Style::new().bold(),
        }
    }

    /// Paint `text` for stdout.
    pub fn paint(self, text: &str) -> String {
        self.style().apply_to(text).to_string()
    }

    /// Paint `text` for stderr.
    pub fn paint_stderr(self, text: &str) -> String {
        self.style().for_stderr().apply_to(text).to_string()
    }
}

/// Print `text` in `color` on stdout.
pub fn echo(text: &str, color: Color) {
    println!("{}", color.paint(text));
}

/// Print `text` in `color` on stderr.
pub fn echo_err(text: &str, color: Color) {
    eprintln!("{}", color.paint_stderr(text));
}

/// Print `message` in red on stderr and exit the process with `code`.
pub fn exit(message: &str, code: i32) -> ! {
    echo_err(message, Color::Red);
    std::process::exit(code)
}
