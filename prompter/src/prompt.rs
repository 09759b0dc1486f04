//! # Typed prompts
//!
//! Shortcuts over [`Terminal::ask`] and [`Terminal::collect`]: each one fixes
//! the request [`Kind`], supplies a default prompt and returns the value as
//! a plain Rust type.
//!
//! The collecting variants (`get_ints`, `get_strings`, ...) stop on `close`
//! unless `exiton` is set, and mention the sentinels in their default
//! prompt: `Enter an integer, ["close"] to exit:\t`.
//!
//! ```rust,no_run
//! use prompter::{Options, Terminal};
//!
//! let mut terminal = Terminal::stdio();
//! let age = terminal.get_int(Options::new().output_text("Age: ").min(0)).unwrap();
//! let tags = terminal.get_strings(Options::new().alphabetical(true)).unwrap();
//! ```
use crate::config::{Kind, Options, Request};
use crate::error::Result;
use crate::utils::{Terminal, Value};
use std::{
    fs::File,
    io::{BufRead, Write},
};

const DEFAULT_SENTINEL: &str = "close";

/// Collect-mode defaults: `close` as sentinel, and a prompt naming the sentinels.
fn collecting(noun: &str, mut options: Options) -> Options {
    let sentinels = options
        .exiton
        .get_or_insert_with(|| vec![DEFAULT_SENTINEL.to_string()]);
    let text = format!("Enter {}, {:?} to exit:\t", noun, sentinels);
    options.with_default_text(text)
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    fn ask_kind(&mut self, kind: Kind, options: Options) -> Result<Option<Value>> {
        let request = Request::new(kind, options)?;
        self.ask(&request)
    }

    fn collect_kind(&mut self, kind: Kind, options: Options) -> Result<Vec<Value>> {
        let request = Request::new(kind, collecting(kind.noun(), options))?;
        self.collect(&request)
    }

    pub fn get_string(&mut self, options: Options) -> Result<Option<String>> {
        Ok(self
            .ask_kind(Kind::String, options)?
            .and_then(Value::into_string))
    }

    pub fn get_strings(&mut self, options: Options) -> Result<Vec<String>> {
        let values = self.collect_kind(Kind::String, options)?;
        Ok(values.into_iter().filter_map(Value::into_string).collect())
    }

    pub fn get_int(&mut self, options: Options) -> Result<Option<i64>> {
        Ok(self.ask_kind(Kind::Int, options)?.and_then(|v| v.as_int()))
    }

    pub fn get_ints(&mut self, options: Options) -> Result<Vec<i64>> {
        let values = self.collect_kind(Kind::Int, options)?;
        Ok(values.iter().filter_map(Value::as_int).collect())
    }

    pub fn get_float(&mut self, options: Options) -> Result<Option<f64>> {
        Ok(self.ask_kind(Kind::Float, options)?.and_then(|v| v.as_float()))
    }

    pub fn get_floats(&mut self, options: Options) -> Result<Vec<f64>> {
        let values = self.collect_kind(Kind::Float, options)?;
        Ok(values.iter().filter_map(Value::as_float).collect())
    }

    /// A float prompt worded as "Enter a number".
    pub fn get_number(&mut self, options: Options) -> Result<Option<f64>> {
        self.get_float(options.with_default_text("Enter a number:\t"))
    }

    pub fn get_numbers(&mut self, options: Options) -> Result<Vec<f64>> {
        let request = Request::new(Kind::Float, collecting("a number", options))?;
        let values = self.collect(&request)?;
        Ok(values.iter().filter_map(Value::as_float).collect())
    }

    /// Hexadecimal input (`ff`, `0x1F`, `-0x10`), returned as an integer.
    pub fn get_hex(&mut self, options: Options) -> Result<Option<i64>> {
        Ok(self.ask_kind(Kind::Hex, options)?.and_then(|v| v.as_int()))
    }

    pub fn get_hexes(&mut self, options: Options) -> Result<Vec<i64>> {
        let values = self.collect_kind(Kind::Hex, options)?;
        Ok(values.iter().filter_map(Value::as_int).collect())
    }

    pub fn get_boolean(&mut self, options: Options) -> Result<Option<bool>> {
        Ok(self.ask_kind(Kind::Bool, options)?.and_then(|v| v.as_bool()))
    }

    pub fn get_booleans(&mut self, options: Options) -> Result<Vec<bool>> {
        let values = self.collect_kind(Kind::Bool, options)?;
        Ok(values.iter().filter_map(Value::as_bool).collect())
    }

    /// A value of the type named by `options.kind`, float when unset.
    pub fn get_comparator(&mut self, options: Options) -> Result<Option<Value>> {
        let request = Request::from_options(options.with_default_text("Enter a comparator:\t"))?;
        self.ask(&request)
    }

    /// Collects comparators. No sentinel is implied: the collection ends on a
    /// configured `exiton`, the `numInputs` budget, or the end of input.
    pub fn get_comparators(&mut self, options: Options) -> Result<Vec<Value>> {
        let request = Request::from_options(options.with_default_text("Enter a comparator:\t"))?;
        self.collect(&request)
    }

    pub fn get_file_name(&mut self, options: Options) -> Result<Option<String>> {
        Ok(self
            .ask_kind(Kind::FileName, options)?
            .and_then(Value::into_string))
    }

    /// Asks for a file name and opens it with `mode` (read-only by default).
    pub fn get_file(&mut self, options: Options) -> Result<Option<File>> {
        let request = Request::new(Kind::FileName, options)?;
        self.ask_file(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptError;
    use crate::utils::Check;

    fn terminal(input: &str) -> Terminal<&[u8], Vec<u8>> {
        Terminal::new(input.as_bytes(), Vec::new())
    }

    fn printed(t: &Terminal<&[u8], Vec<u8>>) -> String {
        String::from_utf8(t.output().clone()).unwrap()
    }

    #[test]
    fn test_prompt_get_int_default_text() {
        let mut t = terminal("12\n");
        assert_eq!(t.get_int(Options::new()).unwrap(), Some(12));
        assert_eq!(printed(&t), "Enter an integer:\t");
    }

    #[test]
    fn test_prompt_get_ints_close_sentinel() {
        let mut t = terminal("1\n2\nclose\n");
        assert_eq!(t.get_ints(Options::new()).unwrap(), vec![1, 2]);
        assert!(printed(&t).starts_with("Enter an integer, [\"close\"] to exit:\t"));
    }

    #[test]
    fn test_prompt_get_ints_custom_sentinels() {
        let mut t = terminal("4\nclose\nq\n");
        let options = Options::new().exit_on("q").exit_on("quit").error_message("?");
        assert_eq!(t.get_ints(options).unwrap(), vec![4]);
        assert!(printed(&t).starts_with("Enter an integer, [\"q\", \"quit\"] to exit:\t"));
        // "close" is just a bad integer once other sentinels are set
        assert!(printed(&t).contains("?\n"));
    }

    #[test]
    fn test_prompt_get_strings_alphabetical() {
        let mut t = terminal("hello world\nhello1\nrust\nclose\n");
        let options = Options::new()
            .alphabetical(true)
            .message(Check::Alphabetical, "letters only");
        assert_eq!(
            t.get_strings(options).unwrap(),
            vec!["hello world".to_string(), "rust".to_string()]
        );
        assert_eq!(printed(&t).matches("letters only").count(), 1);
    }

    #[test]
    fn test_prompt_get_floats_and_numbers() {
        let mut t = terminal("1.5\n-2\nclose\n");
        assert_eq!(t.get_floats(Options::new()).unwrap(), vec![1.5, -2.0]);

        let mut t = terminal("3.25\n");
        assert_eq!(t.get_number(Options::new()).unwrap(), Some(3.25));
        assert_eq!(printed(&t), "Enter a number:\t");

        let mut t = terminal("close\n");
        assert!(t.get_numbers(Options::new()).unwrap().is_empty());
        assert_eq!(printed(&t), "Enter a number, [\"close\"] to exit:\t");
    }

    #[test]
    fn test_prompt_get_hex() {
        let mut t = terminal("zz\n0xff\n");
        assert_eq!(t.get_hex(Options::new().max(0x100)).unwrap(), Some(255));

        let mut t = terminal("a\n-1\nclose\n");
        assert_eq!(t.get_hexes(Options::new()).unwrap(), vec![10, -1]);
    }

    #[test]
    fn test_prompt_get_boolean() {
        let mut t = terminal("FALSE\n");
        assert_eq!(t.get_boolean(Options::new()).unwrap(), Some(false));

        let mut t = terminal("true\nfalse\nclose\n");
        assert_eq!(t.get_booleans(Options::new()).unwrap(), vec![true, false]);
    }

    #[test]
    fn test_prompt_get_comparator_kind_from_options() {
        let mut t = terminal("2.5\n");
        assert_eq!(
            t.get_comparator(Options::new()).unwrap(),
            Some(Value::Float(2.5))
        );
        assert_eq!(printed(&t), "Enter a comparator:\t");

        let mut t = terminal("2.5\n8\n");
        let options = Options::new().kind(Kind::Int).mult(4);
        assert_eq!(t.get_comparator(options).unwrap(), Some(Value::Int(8)));
    }

    #[test]
    fn test_prompt_get_comparators_budget() {
        let mut t = terminal("1\n2\n3\n");
        let options = Options::new().kind(Kind::Int).num_inputs(2);
        assert_eq!(
            t.get_comparators(options).unwrap(),
            vec![Value::Int(1), Value::Int(2)]
        );
    }

    #[test]
    fn test_prompt_get_file_name_extension() {
        let mut t = terminal("notes\nnotes.md\nnotes.txt\n");
        let options = Options::new()
            .extension(".txt")
            .message(Check::Extension, "need .txt");
        assert_eq!(
            t.get_file_name(options).unwrap(),
            Some("notes.txt".to_string())
        );
        assert_eq!(printed(&t).matches("need .txt").count(), 2);
    }

    #[test]
    fn test_prompt_get_file_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "a").unwrap();

        let input = format!("{}\n", path.display());
        let mut t = terminal(&input);
        let mut file = t
            .get_file(Options::new().exists(true).mode("a"))
            .unwrap()
            .unwrap();
        file.write_all(b"b").unwrap();
        drop(file);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ab");
    }

    #[test]
    fn test_prompt_config_error_before_prompting() {
        let mut t = terminal("5\n");
        let res = t.get_string(Options::new().min(1));
        assert!(matches!(res, Err(PromptError::Config(_))));
        assert_eq!(printed(&t), "");

        let res = t.get_file(Options::new().mode("rw"));
        assert!(res.unwrap_err().is_config());
    }
}
