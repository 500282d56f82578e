//! Milestones module - domain models, lifecycle service and settlement.

mod milestones_errors;
mod milestones_model;
mod milestones_service;
mod milestones_traits;
mod settlement;

pub use milestones_errors::MilestoneError;
pub use milestones_model::{Milestone, MilestoneUpdate, NewMilestone};
pub use milestones_service::MilestoneService;
pub use milestones_traits::{MilestoneRepositoryTrait, MilestoneServiceTrait};
pub use settlement::MilestoneSettlement;
