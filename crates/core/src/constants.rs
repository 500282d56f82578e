/// Number of milestones created when milestones are generated for a goal
pub const GENERATED_MILESTONE_COUNT: u32 = 5;

/// Lowest valid user id
pub const MIN_USER_ID: i32 = 1;
