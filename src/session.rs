//! Interactive menu for viewing and editing a [RecordStore].
//!
//! The session reads answers line by line from any [BufRead] and writes
//! prompts to any [Write], so it runs the same against a terminal or an
//! in-memory buffer. After each edit the store is written back to its
//! data file.

use crate::menu::{InputError, MenuChoice, parse_menu_choice, parse_selection, parse_yes_no};
use crate::{Field, RecordStore, save_store};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, error};

const RULE: &str = "----------------------------------";

enum Answer {
    Value(String),
    Skip,
    EndOfInput,
}

pub struct Session<'a, R, W> {
    store: &'a mut RecordStore,
    path: &'a Path,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(store: &'a mut RecordStore, path: &'a Path, input: R, output: W) -> Self {
        Self {
            store,
            path,
            input,
            output,
        }
    }

    /// Runs the menu loop until the user quits or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_answer()? else {
                return Ok(());
            };

            match parse_menu_choice(&line) {
                Ok(MenuChoice::DisplayAll) => self.display_all()?,
                Ok(MenuChoice::Edit) if self.store.is_empty() => {
                    write!(self.output, "There are no planes to edit.\n\n")?;
                }
                Ok(MenuChoice::Edit) => {
                    if !self.edit()? {
                        debug!("input ended during edit, changes not saved");
                        return Ok(());
                    }
                    self.save()?;
                }
                Ok(MenuChoice::Quit) => {
                    writeln!(self.output)?;
                    writeln!(
                        self.output,
                        "Thank you for using the Aircraft Information System. Goodbye!"
                    )?;
                    return Ok(());
                }
                Err(InputError::NotANumber) => {
                    write!(self.output, "Invalid input. Please enter a number.\n\n")?;
                }
                Err(_) => {
                    write!(
                        self.output,
                        "Invalid choice. Please enter a number between 1 and {}.\n\n",
                        MenuChoice::COUNT
                    )?;
                }
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "MENU")?;
        writeln!(self.output, "-----")?;
        writeln!(self.output, "1. Display all planes")?;
        writeln!(self.output, "2. Edit plane information")?;
        writeln!(self.output, "3. Quit")?;
        writeln!(self.output)?;
        self.prompt("Enter your choice (1-3): ")
    }

    fn display_all(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "All Aircraft Information")?;
        writeln!(self.output, "{RULE}")?;
        for record in self.store.iter() {
            write!(self.output, "{record}")?;
        }
        writeln!(self.output)
    }

    /// Walks the user through editing one record. Returns `false` if the
    /// input ended before the edit was complete.
    fn edit(&mut self) -> io::Result<bool> {
        writeln!(self.output)?;
        writeln!(self.output, "Select a plane to edit:")?;
        writeln!(self.output, "-------------------------")?;
        for (i, record) in self.store.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, record.name())?;
        }

        let count = self.store.len();
        let index = loop {
            writeln!(self.output)?;
            self.prompt(&format!("Enter plane number (1-{count}): "))?;
            let Some(line) = self.read_answer()? else {
                return Ok(false);
            };
            match parse_selection(&line, count) {
                Ok(index) => break index,
                Err(_) => writeln!(
                    self.output,
                    "Invalid selection. Please enter a number between 1 and {count}."
                )?,
            }
        };

        writeln!(self.output)?;
        writeln!(self.output, "Editing plane: {}", self.store[index].name())?;
        writeln!(self.output, "Current information:")?;
        writeln!(self.output, "{RULE}")?;
        write!(self.output, "{}", self.store[index])?;

        for field in Field::ALL {
            match self.ask_edit(field)? {
                Answer::Value(value) => {
                    if let Some(record) = self.store.get_mut(index) {
                        record.edit_field(field, &value);
                        debug!(index, %field, "edited field");
                    }
                }
                Answer::Skip => {}
                Answer::EndOfInput => return Ok(false),
            }
        }

        writeln!(self.output)?;
        writeln!(self.output, "Updated information:")?;
        writeln!(self.output, "{RULE}")?;
        write!(self.output, "{}", self.store[index])?;

        let record = &self.store[index];
        if record.name().is_empty() {
            writeln!(
                self.output,
                "Warning: a plane with an empty name will not load correctly from the file."
            )?;
        }
        if index + 1 == self.store.len() && record.description().is_empty() {
            writeln!(
                self.output,
                "Warning: the last plane needs a description or it will not load from the file."
            )?;
        }
        Ok(true)
    }

    fn ask_edit(&mut self, field: Field) -> io::Result<Answer> {
        let edit = loop {
            writeln!(self.output)?;
            self.prompt(&format!("Do you want to edit the {field}? (Y/N): "))?;
            let Some(line) = self.read_answer()? else {
                return Ok(Answer::EndOfInput);
            };
            match parse_yes_no(&line) {
                Ok(edit) => break edit,
                Err(_) => writeln!(self.output, "Invalid input. Please enter Y or N.")?,
            }
        };

        if !edit {
            return Ok(Answer::Skip);
        }

        self.prompt(&format!("Enter new {field}: "))?;
        match self.read_line()? {
            Some(value) => Ok(Answer::Value(value)),
            None => {
                writeln!(self.output, "Error reading input.")?;
                Ok(Answer::EndOfInput)
            }
        }
    }

    fn save(&mut self) -> io::Result<()> {
        match save_store(self.store, self.path) {
            Ok(()) => write!(self.output, "Changes saved successfully.\n\n"),
            Err(err) => {
                error!(error = %err, path = %self.path.display(), "failed to save records");
                write!(self.output, "Error: Could not save changes to file.\n\n")
            }
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()
    }

    /// Next line that is not blank, like `scanf` skipping whitespace.
    fn read_answer(&mut self) -> io::Result<Option<String>> {
        loop {
            match self.read_line()? {
                Some(line) if line.trim().is_empty() => continue,
                answer => return Ok(answer),
            }
        }
    }

    /// Next line of input without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
