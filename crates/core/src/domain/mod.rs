pub mod context;
pub mod findings;
pub mod outreach;
pub mod positioning;
pub mod run;
