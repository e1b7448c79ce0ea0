//! model2code translates the SCXML model of a robotic skill into the source files of a ROS 2
//! node implementing it.
//!
//! The events of the model are classified against the interface definitions
//! (service, topic or action, client or server side),
//! then a directory of templates is specialised once per event.
//!
//! - [`m2c_fmt_xml`] reads the XML documents,
//! - [`m2c_core`] builds the event registry,
//! - [`m2c_codegen`] processes the templates.

mod cli;
mod translator;

pub use cli::Cli;
pub use m2c_codegen;
pub use m2c_core;
pub use m2c_core::m2c_fmt_xml;
pub use translator::{Translation, Translator};
