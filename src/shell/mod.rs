use std::env;

use crate::{
    core::{
        commands::{BuiltinOutcome, CommandError, CommandExecutor},
        env::EnvSnapshot,
    },
    error::ShellError,
    flags::Flags,
    highlight::Highlighter,
    input::{LineEditor, ReadOutcome},
    lexer,
    process::signal,
};

pub struct Shell {
    pub(crate) editor: LineEditor,
    pub(crate) env: EnvSnapshot,
    pub(crate) executor: CommandExecutor,
    pub(crate) highlighter: Highlighter,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let editor = LineEditor::new();
        let env = EnvSnapshot::from_process();
        let executor = CommandExecutor::new(&flags);
        let highlighter = Highlighter::new();

        Ok(Shell {
            editor,
            env,
            executor,
            highlighter,
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        signal::install_interrupt_handler()?;

        if !self.flags.is_set("quiet") {
            self.print_banner();
        }

        loop {
            // a ^C delivered between cycles just means "fresh prompt"
            signal::take_interrupt();

            let prompt = self.prompt();
            match self.editor.read_line(&prompt)? {
                ReadOutcome::EndOfInput => break,
                ReadOutcome::Line(line) => {
                    if !self.dispatch(&line) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Tokenizes and routes one committed line. Returns false when the
    /// user asked to leave the shell; every failure is local to the cycle.
    fn dispatch(&mut self, line: &str) -> bool {
        let argv = lexer::tokenize(line);
        if argv.is_empty() {
            return true;
        }

        match self.executor.execute(&argv, &self.env) {
            Ok(BuiltinOutcome::Handled) => {}
            Ok(BuiltinOutcome::Env(next)) => self.env = next,
            Ok(BuiltinOutcome::Exit) => return false,
            Err(CommandError::Usage(text)) => println!("Usage: {}", text),
            Err(e) => {
                if !self.flags.is_set("quiet") {
                    eprintln!("{}", self.highlighter.error(&format!("carina: {}", e)));
                }
            }
        }
        true
    }

    fn prompt(&self) -> String {
        let cwd = env::current_dir()
            .map(|path| path.to_string_lossy().to_string())
            .unwrap_or_else(|_| "[unknown]".to_string());
        self.highlighter.prompt(&cwd)
    }

    fn print_banner(&self) {
        // wipe the scrollback like the original and greet from the top
        print!("\x1b[2J\x1b[H");
        let banner = concat!(
            "   ____    _     ____   ___  _   _    _   \n",
            "  / ___|  / \\   |  _ \\ |_ _|| \\ | |  / \\  \n",
            " | |     / _ \\  | |_) | | | |  \\| | / _ \\ \n",
            " | |___ / ___ \\ |  _ <  | | | |\\  |/ ___ \\\n",
            "  \\____/_/   \\_\\|_| \\_\\|___||_| \\_/_/   \\_\\\n",
        );
        println!("{}", self.highlighter.banner(banner));
    }
}
