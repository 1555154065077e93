use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, style,
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::process::Command;

pub fn prompt_input(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_string())
}

/// Prompt until a non-empty value is entered. Returns None if the user
/// submits an empty line twice in a row (treated as a cancel).
pub fn prompt_required(prompt: &str) -> Result<Option<String>> {
    let first = prompt_input(prompt)?;
    if !first.is_empty() {
        return Ok(Some(first));
    }
    println!("El campo es obligatorio (deja vacío de nuevo para cancelar)");
    let second = prompt_input(prompt)?;
    if second.is_empty() {
        Ok(None)
    } else {
        Ok(Some(second))
    }
}

pub fn prompt_yes_no(prompt: &str) -> Result<bool> {
    loop {
        let input = prompt_input(&format!("{} [y/N]: ", prompt))?;
        match input.to_lowercase().as_str() {
            "y" | "yes" | "s" | "si" => return Ok(true),
            "n" | "no" | "" => return Ok(false),
            _ => println!("Please enter 'y' or 'n'"),
        }
    }
}

pub fn select_from_list(items: &[String]) -> Result<Option<usize>> {
    if items.is_empty() {
        return Ok(None);
    }

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();

    let mut selected = 0;
    let result = loop {
        execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;

        println!("Use arrow keys to navigate, Enter to select, q to quit:");
        println!();

        for (i, item) in items.iter().enumerate() {
            if i == selected {
                execute!(stdout, style::Print("> "))?;
            } else {
                execute!(stdout, style::Print("  "))?;
            }
            println!("{}", item);
        }

        match event::read()? {
            Event::Key(KeyEvent { code: KeyCode::Up, .. }) => {
                selected = selected.saturating_sub(1);
            }
            Event::Key(KeyEvent { code: KeyCode::Down, .. }) => {
                if selected < items.len() - 1 {
                    selected += 1;
                }
            }
            Event::Key(KeyEvent { code: KeyCode::Enter, .. }) => {
                break Ok(Some(selected));
            }
            Event::Key(KeyEvent { code: KeyCode::Char('q'), .. })
            | Event::Key(KeyEvent { code: KeyCode::Esc, .. }) => {
                break Ok(None);
            }
            _ => {}
        }
    };

    terminal::disable_raw_mode()?;
    execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    result
}

/// Open a file in the user's editor, blocking until it exits.
pub fn open_in_editor(file_path: &std::path::Path) -> Result<()> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(windows) {
            "notepad".to_string()
        } else if std::path::Path::new("/usr/bin/nvim").exists() {
            "nvim".to_string()
        } else if std::path::Path::new("/usr/bin/vim").exists() {
            "vim".to_string()
        } else if std::path::Path::new("/usr/bin/nano").exists() {
            "nano".to_string()
        } else {
            "vi".to_string()
        }
    });

    let status = Command::new(&editor)
        .arg(file_path)
        .status()
        .with_context(|| format!("Failed to execute editor: {}", editor))?;

    if !status.success() {
        return Err(anyhow::anyhow!("Editor exited with non-zero status"));
    }

    Ok(())
}
