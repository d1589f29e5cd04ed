pub mod import;
pub mod outreach;
pub mod rules;

pub use rules::RulesEngine;
