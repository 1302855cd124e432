pub mod domain;
pub mod keywords;
pub mod problem;
pub mod scoring;

pub use domain::{classify, extract_domain, DomainCategory};
pub use scoring::{analyze_event, score_tab_switch, EXTERNAL_APPLICATION};
