pub mod checklist;
pub mod review;
pub mod settings;

pub use checklist::*;
pub use review::*;
pub use settings::*;
