pub mod aggregate;
pub mod convert;
pub mod error;
pub mod jtl;
pub mod results;

pub use convert::{browser_to_report, protocol_to_report, Mode};
pub use error::Jtl2JsonError;
pub use results::Report;
