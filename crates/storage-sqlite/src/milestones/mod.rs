//! SQLite storage implementation for milestones.

mod model;
mod repository;

pub use model::{MilestoneChangesetDB, MilestoneDB, NewMilestoneDB};
pub use repository::MilestoneRepository;
