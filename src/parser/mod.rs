pub mod userdiag_parser;

pub use userdiag_parser::{ReportParser, UserdiagParser};
