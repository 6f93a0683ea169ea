//! Flagstack: layered option resolution
//!
//! Define named options once, then fill them from the command line,
//! environment variables and structured config files, highest priority
//! first.
//!
//! ```
//! use std::collections::HashMap;
//! use flagstack::flag::{FlagSet, settings};
//!
//! let mut fs = FlagSet::new();
//! let port = fs.string("port,p", "9999", "listen port").unwrap();
//! let debug = fs.bool("debug", false, "enable debug mode").unwrap();
//!
//! let env = HashMap::from([
//!     ("PORT".to_string(), "8888".to_string()),
//!     ("DEBUG".to_string(), "true".to_string()),
//! ]);
//! fs.parse(["--port", "7777"], [settings::env_with("", env)]).unwrap();
//!
//! assert_eq!(port.get(), "7777");
//! assert!(debug.get());
//! ```

pub mod duration;
pub mod flag;
pub mod source;
