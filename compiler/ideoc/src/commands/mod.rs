//! The five commands of the command surface (§4.10), one module per
//! command, each exposing a `COMMAND` name and a `run` entry point
//! returning a `CommandEnvelope`.

pub mod compile;
pub mod parse;
pub mod run;
pub mod test_all;
pub mod tokenize;
