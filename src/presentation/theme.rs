use colored::Colorize;

pub struct Theme {
    pub title: fn(&str) -> String,
    pub lang: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub idx: fn(&str) -> String,
    pub addi: fn(&str) -> String,
    pub para: fn(&str) -> String,
    pub meta: fn(&str) -> String,
    pub error: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "temp" | "" => Self::temp(),
            "wudao" => Self::wudao(),
            "canvas" => Self::canvas(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::temp()
            }
        }
    }

    fn temp() -> Self {
        Self {
            title: |s| s.bright_magenta().italic().bold().underline().to_string(),
            lang: |s| s.cyan().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_white().to_string(),
            addi: |s| s.cyan().italic().to_string(),
            para: |s| s.yellow().to_string(),
            meta: |s| s.bright_white().dimmed().italic().to_string(),
            error: |s| s.red().bold().to_string(),
        }
    }

    fn wudao() -> Self {
        Self {
            title: |s| s.red().italic().bold().underline().to_string(),
            lang: |s| s.green().italic().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_white().to_string(),
            addi: |s| s.green().italic().to_string(),
            para: |s| s.bright_white().to_string(),
            meta: |s| s.bright_yellow().dimmed().italic().to_string(),
            error: |s| s.red().italic().to_string(),
        }
    }

    fn canvas() -> Self {
        Self {
            title: |s| s.blue().bold().underline().to_string(),
            lang: |s| s.magenta().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.cyan().to_string(),
            addi: |s| s.green().italic().to_string(),
            para: |s| s.black().to_string(),
            meta: |s| s.bright_black().italic().to_string(),
            error: |s| s.red().bold().to_string(),
        }
    }
}
