//! Shell completions and man pages.

use std::io::Write;
use std::path::PathBuf;

use clap::CommandFactory;

use crate::Cli;

const BIN_NAME: &str = "issuelift";

fn write_completions(shell: clap_complete::Shell, out: &mut impl Write) {
    clap_complete::generate(shell, &mut Cli::command(), BIN_NAME, out);
}

fn render_man_page(out: &mut impl Write) -> std::io::Result<()> {
    clap_mangen::Man::new(Cli::command()).render(out)
}

pub(crate) fn handle_completions(
    shell: clap_complete::Shell,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout().lock();
    write_completions(shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

pub(crate) fn handle_man(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(dir) => {
            // One page per subcommand, plus the main page
            std::fs::create_dir_all(&dir)?;
            clap_mangen::generate_to(Cli::command(), &dir)?;
            println!("Generated man pages in: {}", dir.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            render_man_page(&mut stdout)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_reference_subcommands() {
        let mut out = Vec::new();
        write_completions(clap_complete::Shell::Zsh, &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains(BIN_NAME));
        assert!(script.contains("import"));
    }

    #[test]
    fn man_page_has_title() {
        let mut out = Vec::new();
        render_man_page(&mut out).unwrap();
        let page = String::from_utf8(out).unwrap();
        assert!(page.to_lowercase().contains(".th issuelift"));
    }

    #[test]
    fn man_pages_written_per_subcommand() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("man");

        handle_man(Some(target.clone())).unwrap();

        let pages: Vec<_> = std::fs::read_dir(&target)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert!(pages.iter().any(|p| p == "issuelift.1"));
        assert!(pages.iter().any(|p| p == "issuelift-import.1"));
    }
}
