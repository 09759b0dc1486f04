//! # Prompter
//!
//! Validated console input for interactive CLI applications: ask for a
//! value, cast it to the type you need, run it through a chain of rules and
//! either re-prompt or give up when it fails. Collect-mode prompts keep
//! gathering values until an exit sentinel is typed.
//!
//! ## Features
//!
//! - **Typed prompts** - strings, integers, floats, hexadecimal numbers,
//!   booleans, file names and opened files
//! - **Rule chain** - inclusive bounds, multiple-of / factor-of, parity,
//!   interval membership, alphabetic content, file extension and existence
//! - **Custom messages** - one per failed rule, plus a fallback
//! - **Retry or give up** - re-prompt on failure, or return `None` at once
//! - **Collection** - gather values until a sentinel or an input budget
//! - **Validated configuration** - options checked before anything is
//!   prompted, from code or from JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prompter::{Check, Options, Terminal};
//!
//! let mut terminal = Terminal::stdio();
//!
//! // An even integer between 2 and 64
//! let threads = terminal
//!     .get_int(
//!         Options::new()
//!             .output_text("Threads: ")
//!             .min(2)
//!             .max(64)
//!             .even(true)
//!             .message(Check::Even, "Use an even number")
//!             .error_message("Pick a number between 2 and 64"),
//!     )
//!     .unwrap();
//!
//! // Ports until "done"
//! let ports = terminal
//!     .get_ints(Options::new().range(1, 65535).exit_on("done"))
//!     .unwrap();
//!
//! println!("{:?} {:?}", threads, ports);
//! ```
//!
//! ### Requests from JSON
//!
//! ```rust,no_run
//! use prompter::{Request, Terminal};
//!
//! let request = Request::from_json(
//!     r#"{
//!         "type": "int",
//!         "outputText": "Pick: ",
//!         "mult": [2, 3],
//!         "multError": "Must be a multiple of 6",
//!         "repeat": false
//!     }"#,
//! )
//! .unwrap();
//!
//! match Terminal::stdio().ask(&request) {
//!     Ok(Some(value)) => println!("Got {}", value),
//!     Ok(None) => println!("Nothing"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! ## Error Handling
//!
//! A rejected input is never an error: the configured message is printed
//! and the prompt repeats, or `None` comes back when `repeat` is off.
//! Errors are reserved for:
//!
//! - [`PromptError::Config`] - malformed options, caught before prompting
//! - [`PromptError::Io`] - the terminal could not be read or written
//! - [`PromptError::Open`] - a validated file name could not be opened
//!
//! ## Architecture
//!
//! - **`config`** - [`Options`], [`Request`] and the option validation layer
//! - **`utils`** - the rule chain ([`Sanitize`]) and the prompt engine ([`Terminal`])
//! - **`prompt`** - typed shortcuts such as [`Terminal::get_int`]
//! - **`error`** - [`ConfigError`] and [`PromptError`]

pub mod config;
pub use config::{Kind, Number, OpenMode, Options, Request};

pub mod error;
pub use error::{ConfigError, PromptError, Result};

pub mod prompt;

pub mod utils;
pub use utils::{Check, DesiredType, Rejection, Sanitize, Terminal, Value};
