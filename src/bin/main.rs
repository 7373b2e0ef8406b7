use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use orphanage_partnerships::logging::{init_logging, Verbosity};
use orphanage_partnerships::view::{self, ExportFile};
use orphanage_partnerships::{FormField, Session, SessionState};

/// An interactive recorder for donations and partnerships of an orphanage
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The directory the CSV export is saved to
    #[clap(long, env = "ORPHANAGE_EXPORT_DIR", default_value = ".")]
    export_dir: PathBuf,
    /// Show more log output, can be repeated
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,
    /// Only log errors
    #[clap(short, long)]
    quiet: bool,
}

const HELP: &str = "\
Commands:
  add      fill in and submit a new partnership entry
  table    show all collected entries
  chart    show the total donations by partnership type
  export   save all entries as CSV
  help     show this message
  quit     end the session, all entries are discarded

While filling in the form, press enter to keep the value in brackets
and enter `-` to clear it.";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(Verbosity::from_flags(args.verbose, args.quiet));

    let stdin = std::io::stdin();
    let mut terminal = Terminal {
        input: stdin.lock(),
        output: std::io::stdout(),
        export_dir: args.export_dir,
    };

    terminal.run(&mut Session::new())
}

/// The line based front end of a session
struct Terminal<R, W> {
    input: R,
    output: W,
    export_dir: PathBuf,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    fn run(&mut self, session: &mut Session) -> anyhow::Result<()> {
        writeln!(self.output, "{}\n\n{HELP}", view::TITLE)?;

        loop {
            let line = match self.prompt("> ")? {
                Some(line) => line,
                None => break,
            };

            match line.trim() {
                "" => {}
                "add" => {
                    if !self.fill_form(session)? {
                        break;
                    }
                    self.submit(session)?;
                }
                "table" => self.show_table(session)?,
                "chart" => self.show_chart(session)?,
                "export" => self.export(session)?,
                "help" => writeln!(self.output, "{HELP}")?,
                "quit" | "exit" => break,
                other => writeln!(self.output, "Unknown command `{other}`, type `help` for a list of commands")?,
            }
        }

        Ok(())
    }

    /// Prompts for every field of the form, returns `false` once input ends
    fn fill_form(&mut self, session: &mut Session) -> anyhow::Result<bool> {
        writeln!(self.output, "\n{}", view::FORM_TITLE)?;

        for field in FormField::ALL {
            loop {
                let current = session.form().inputs().display(field);
                let question = format!("{}{} [{current}]: ", field.label(), hint(field));
                let answer = match self.prompt(&question)? {
                    Some(answer) => answer,
                    None => return Ok(false),
                };

                let text = match answer.as_str() {
                    "" => break,
                    "-" => "",
                    text => text,
                };
                match session.inputs_mut().set(field, text) {
                    Ok(()) => break,
                    Err(err) => writeln!(self.output, "{err}")?,
                }
            }
        }

        Ok(true)
    }

    fn submit(&mut self, session: &mut Session) -> anyhow::Result<()> {
        match session.submit() {
            Ok(_) => {
                writeln!(self.output, "{}", view::SUBMITTED)?;
                self.show_table(session)?;
                self.show_chart(session)?;
            }
            Err(err) => {
                writeln!(self.output, "{err}\nYour entries are kept, type `add` to complete them.")?;
            }
        }

        Ok(())
    }

    fn show_table(&mut self, session: &Session) -> anyhow::Result<()> {
        writeln!(self.output, "\n{}\n{}", view::TABLE_TITLE, session.table())?;
        Ok(())
    }

    fn show_chart(&mut self, session: &Session) -> anyhow::Result<()> {
        writeln!(self.output, "\n{}", view::CHART_TITLE)?;
        match session.chart() {
            Ok(chart) => writeln!(self.output, "{chart}")?,
            Err(err) => writeln!(self.output, "Could not draw the chart: {err}")?,
        }
        Ok(())
    }

    fn export(&mut self, session: &Session) -> anyhow::Result<()> {
        if session.state() == SessionState::Empty {
            writeln!(self.output, "{}", view::NO_RECORDS)?;
            return Ok(());
        }

        let saved = session
            .export()
            .map_err(anyhow::Error::from)
            .and_then(|file| Ok(file.write_to(&self.export_dir)?));
        match saved {
            Ok(path) => writeln!(self.output, "Saved {} ({})", path.display(), ExportFile::CONTENT_TYPE)?,
            Err(err) => {
                tracing::error!("export failed: {err:#}");
                writeln!(self.output, "Could not save the export: {err:#}")?;
            }
        }
        Ok(())
    }

    fn prompt(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

fn hint(field: FormField) -> &'static str {
    match field {
        FormField::AmountUgx => " (min 0, step 1000)",
        FormField::DateDeposited => " (YYYY-MM-DD from 2000-01-01, empty for today)",
        FormField::PartnershipType => " (Individual/Company/Organization/Other)",
        _ if field.is_required() => " *",
        _ => "",
    }
}
