pub mod parse;
pub mod postsession;
pub mod presession;
pub mod trade;

pub use parse::RawNumber;
pub use postsession::PostSession;
pub use presession::{
    default_mindset, default_zones, ChecklistItem, Execution, Narrative, PreSession,
};
pub use trade::{Direction, Session, Trade, TradeResult};
